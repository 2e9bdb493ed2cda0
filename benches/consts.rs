use bytes::Bytes;

/// Completion chunk as an OpenAI style server sends it, `{content}` is swapped for the delta
const CHUNK_TEMPLATE: &str = "data: {\"id\":\"chatcmpl-bench\",\"object\":\"chat.completion.chunk\",\"created\":1700000000,\"model\":\"gpt-3.5-turbo\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"{content}\"},\"finish_reason\":null}]}\n\n";

const DELTAS: &[&str] = &["Hello", ",", " world", "!", " こんにちは", " \u{1F431}", " the", " quick", " brown", " fox"];

pub const DONE_EVENT: &[u8] = b"data: [DONE]\n\n";

/// `n` chat completion chunks followed by `[DONE]`
pub fn generate_chat_stream(n: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity((CHUNK_TEMPLATE.len() + 16) * n + DONE_EVENT.len());
    for delta in DELTAS.iter().cycle().take(n) {
        buf.extend_from_slice(CHUNK_TEMPLATE.replace("{content}", delta).as_bytes());
    }
    buf.extend_from_slice(DONE_EVENT);
    buf
}

/// Chop into `size` byte chunks, ignoring event boundaries
pub fn load_chunks(bytes: &[u8], size: usize) -> Vec<Bytes> {
    bytes.chunks(size).map(Bytes::copy_from_slice).collect()
}

/// Reader that hands out at most `step` bytes per call, like a socket would
pub struct Trickle<'a> {
    pub data: &'a [u8],
    pub step: usize,
}

impl std::io::Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}
