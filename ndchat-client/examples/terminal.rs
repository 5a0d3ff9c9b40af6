//! Terminal chat against a running backend.
//!
//! Prints status updates in place of a "thinking" bubble and the final
//! answer as raw markdown. Reads one message per line from stdin.
//!
//! Run with: RUST_LOG=debug cargo run --example terminal -p ndchat-client
//! (set NDCHAT_BASE_URL to point somewhere other than http://localhost:8000)

use std::io::Write;

use ndchat_client::{ChatClient, ClientConfig, Renderer};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Writes every render call to stdout.
struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    type Placeholder = ();

    fn create_placeholder(&mut self) {}

    fn update_placeholder(&mut self, _placeholder: &(), content: &str) {
        print!("\r\x1b[2K⏳ {content}");
        let _ = std::io::stdout().flush();
    }

    fn finalize_placeholder(&mut self, _placeholder: ()) {
        println!("  ✓");
    }

    fn append_final_message(&mut self, content: &str, _rich_text: bool) {
        println!("\n🤖 {content}\n");
    }

    fn append_user_message(&mut self, text: &str) {
        println!("🧑 {text}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber (respects RUST_LOG env var).
    tracing_subscriber::fmt::init();

    let client = ChatClient::from_config(ClientConfig::from_env()?);
    let mut renderer = TerminalRenderer;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let outcome = client.send_message(&line, &mut renderer).await;
        tracing::debug!(?outcome, "cycle finished");
    }

    Ok(())
}
