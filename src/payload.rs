//! Helpers for handlers that read OpenAI style `data: ...` events.
//!
//! These only look at the start of an event. Multi-line events and `event:`/`id:` fields are
//! passed through as they are; reach for a full SSE parser if you need those.

use crate::constants::{DATA_PREFIX, DONE_SENTINEL};

/// The event with one leading `data:` removed and ASCII whitespace trimmed from both ends,
/// which also takes care of the line break the pump appends
pub fn data(event: &[u8]) -> &[u8] {
    event
        .strip_prefix(DATA_PREFIX)
        .unwrap_or(event)
        .trim_ascii()
}

/// Exact match against the `[DONE]` sentinel that ends a chat completion stream
pub fn is_done(payload: &[u8]) -> bool {
    payload == DONE_SENTINEL
}

/// SSE comment lines start with a colon, servers use them as keep-alives
pub fn is_comment(event: &[u8]) -> bool {
    event.first() == Some(&b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_whitespace() {
        assert_eq!(data(b"data: hello\n"), b"hello");
        assert_eq!(data(b"data:hello"), b"hello");
        assert_eq!(data(b"  data: hello\n"), b"data: hello");
        assert_eq!(data(b"data: \t{\"a\": 1} \r\n"), b"{\"a\": 1}");
        assert_eq!(data(b"no prefix\n"), b"no prefix");
        assert_eq!(data(b"data:\n"), b"");
        assert_eq!(data(b"\n"), b"");
    }

    #[test]
    fn done_is_an_exact_match() {
        assert!(is_done(data(b"data: [DONE]\n")));
        assert!(is_done(data(b"data:[DONE]")));
        assert!(!is_done(data(b"data: [DONE] extra\n")));
        assert!(!is_done(data(b"data: [done]\n")));
        assert!(!is_done(b" [DONE]\n"));
    }

    #[test]
    fn comments() {
        assert!(is_comment(b": keep-alive\n"));
        assert!(!is_comment(b"data: :)\n"));
        assert!(!is_comment(b""));
    }
}
