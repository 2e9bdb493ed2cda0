//! Streams a chat completion to stdout as it arrives.
//!
//! ```sh
//! CHATGPT_API_SECRET=sk-... cargo run --example chat --features reqwest -- "why is the sky blue?"
//! ```
//!
//! Set `RUST_LOG=sseframe=trace` to watch the pump at work on stderr.

use std::error::Error;

use sseframe::chat::{ChatClient, ChatConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ChatConfig::from_env()?;
    let prompt = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let prompt = if prompt.is_empty() {
        "こんにちは".to_owned()
    } else {
        prompt
    };

    let client = ChatClient::new(config, reqwest::Client::new());
    client.chat(&prompt, std::io::stdout()).await?;
    println!();
    Ok(())
}
