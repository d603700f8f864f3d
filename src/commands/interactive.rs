//! Interactive search command.
//!
//! Each line read from stdin is one input event carrying the full current
//! value, as if the user had edited the search box to that text. The view is
//! redrawn whenever it settles into something worth showing.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::{debug, info};

use super::search::format_card;
use crate::client::{
    HttpTransport, SearchSession, SearchTransport, SearchView, SessionPhase, SessionSummary,
    StatsMemo,
};
use crate::Config;

/// Run the interactive command
///
/// # Arguments
/// * `config` - Resolved configuration
/// * `server` - Server base URL override
/// * `debounce_ms` - Quiet period override
pub async fn run(config: &Config, server: Option<String>, debounce_ms: Option<u64>) -> Result<()> {
    let server_url = server.unwrap_or_else(|| config.client.server_url.clone());
    let debounce = Duration::from_millis(debounce_ms.unwrap_or(config.client.debounce_ms));
    let timeout = Duration::from_secs(config.client.request_timeout_secs);

    let transport = Arc::new(
        HttpTransport::new(&server_url, timeout)
            .with_context(|| "Failed to create HTTP client")?,
    );

    info!(server = %server_url, debounce_ms = debounce.as_millis() as u64, "Starting interactive search");
    println!("Searching {} (one query per line, Ctrl+D to quit)", server_url);
    println!("Start typing to search");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let summary = drive(transport, debounce, stdin).await?;

    info!(
        requests = summary.requests_sent,
        discarded = summary.responses_discarded,
        "Interactive search finished"
    );

    Ok(())
}

/// Feed each line of `input` to a new session and render its views.
///
/// At end of input the session is allowed to settle, so a query typed
/// just before EOF is still sent and shown, then it is shut down.
pub async fn drive<T, R>(transport: Arc<T>, debounce: Duration, input: R) -> Result<SessionSummary>
where
    T: SearchTransport,
    R: AsyncBufRead + Unpin,
{
    let handle = SearchSession::new(transport, debounce).spawn();
    let renderer = tokio::spawn(render_loop(handle.subscribe()));

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .with_context(|| "Failed to read input")?
    {
        if handle.input(line).is_err() {
            break;
        }
    }

    if handle.settle().await.is_err() {
        debug!("Session closed before the last query settled");
    }

    let summary = handle.wait().await?;
    let _ = renderer.await;

    Ok(summary)
}

async fn render_loop(mut views: watch::Receiver<SearchView>) {
    let mut memo = StatsMemo::new();
    let mut last_frame = String::new();

    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();

        if let Some(frame) = render(&view, &mut memo) {
            if frame != last_frame {
                println!("{}", frame);
                last_frame = frame;
            }
        }
    }
}

/// Text for the current view, or `None` while typing is still in progress.
pub fn render(view: &SearchView, memo: &mut StatsMemo) -> Option<String> {
    match view.phase() {
        SessionPhase::Debouncing => None,
        SessionPhase::Loading => Some(format!("… searching for '{}'", view.input.trim())),
        SessionPhase::Error => Some(format!(
            "! {}",
            view.error.as_deref().unwrap_or("Search failed")
        )),
        SessionPhase::Idle => {
            if let Some(placeholder) = view.placeholder() {
                return Some(placeholder);
            }

            let stats = memo.get(&view.results);
            let mut frame = stats.to_string();
            for (i, record) in view.results.iter().enumerate() {
                frame.push('\n');
                frame.push_str(&format_card(i + 1, record));
            }
            Some(frame)
        }
    }
}
