//! `urlintitle serve` – JSON request/response loop on stdin/stdout.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use urlintitle_core::config::OptionsStore;
use urlintitle_core::service::LocalRenderService;

/// One JSON request per input line, one JSON response per output line.
/// Requests that fail are answered with `null` ("no update").
pub async fn run_serve(store: OptionsStore) -> Result<()> {
    let service = LocalRenderService::new(store);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = service.handle_json(&line).unwrap_or_else(|e| {
            tracing::warn!("render request failed: {e}");
            "null".to_string()
        });
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    Ok(())
}
