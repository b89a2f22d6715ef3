//! Headless replay of focus events.
//!
//! Reads newline-delimited JSON from a file (first argument) or stdin and
//! feeds it to a bubble service with a logging overlay. Visibility changes
//! are printed to stdout, logs go to stderr.
//!
//! Accepted lines:
//!
//! ```text
//! {"type": "field_focused", "element": {"className": "android.widget.EditText"}}
//! {"eventType": 32, "className": "com.example.MainActivity"}
//! {"action": "toggle_bubble"}
//! {"wait_ms": 2500}
//! ```
//!
//! Run with: cargo run -p focus-bubble-replay -- events.jsonl

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use focus_bubble_controller::{
    default_settings_path, BubbleHandle, BubbleService, BubbleSettings,
};
use focus_bubble_events::accessibility::{RawAccessibilityEvent, SubscriptionInfo};
use focus_bubble_events::{event_names, FocusEvent, ServiceAction, VisibilityChanged};
use focus_bubble_overlay::LoggingSurface;
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the settings file location.
const SETTINGS_ENV: &str = "FOCUS_BUBBLE_SETTINGS";

/// Time given to queued input to reach the service at EOF.
const DRAIN_MARGIN: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayLine {
    Focus(FocusEvent),
    Raw(RawAccessibilityEvent),
    Action { action: ServiceAction },
    Wait { wait_ms: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,focus_bubble=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings()?;
    tracing::info!(?settings, "starting replay");

    let service = BubbleService::builder(Arc::new(LoggingSurface))
        .settings(settings)
        .on_visibility_changed(Arc::new(print_visibility))
        .spawn()
        .context("invalid bubble settings")?;

    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            replay(BufReader::new(file), &service).await?;
        }
        None => replay(BufReader::new(tokio::io::stdin()), &service).await?,
    }

    // Let a pending auto-hide play out before tearing down.
    tokio::time::sleep(DRAIN_MARGIN).await;
    if !wait_until_hidden(&service.handle(), settings.debounce()).await {
        tracing::debug!("bubble still visible at shutdown");
    }
    service.shutdown().await;
    Ok(())
}

fn load_settings() -> Result<BubbleSettings> {
    let path = match std::env::var_os(SETTINGS_ENV) {
        Some(path) => PathBuf::from(path),
        None => match default_settings_path() {
            Some(path) => path,
            None => return Ok(BubbleSettings::default()),
        },
    };

    BubbleSettings::load_or_default(&path)
        .with_context(|| format!("failed to load settings from {}", path.display()))
}

async fn replay<R>(reader: R, service: &BubbleService) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let handle = service.handle();
    let subscription = SubscriptionInfo::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parsed: ReplayLine = match serde_json::from_str(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(line_no, "skipping unparseable line: {}", e);
                continue;
            }
        };

        match parsed {
            ReplayLine::Focus(event) => handle.submit(event)?,
            ReplayLine::Raw(raw) => {
                if subscription.includes(raw.event_type) {
                    handle.submit_raw(raw)?;
                } else {
                    tracing::debug!(line_no, event_type = raw.event_type, "not subscribed");
                }
            }
            ReplayLine::Action { action } => handle.perform(action)?,
            ReplayLine::Wait { wait_ms } => {
                tokio::time::sleep(Duration::from_millis(wait_ms)).await;
            }
        }
    }

    tracing::info!(lines = line_no, "input exhausted");
    Ok(())
}

/// Wait until the bubble is hidden, at most `limit`.
///
/// Returns whether it is hidden.
async fn wait_until_hidden(handle: &BubbleHandle, limit: Duration) -> bool {
    let mut visibility = handle.watch_visibility();
    let hidden = visibility.wait_for(|v| !v.is_visible());
    let is_hidden = matches!(tokio::time::timeout(limit, hidden).await, Ok(Ok(_)));
    is_hidden
}

fn print_visibility(event: VisibilityChanged) {
    match serde_json::to_string(&event) {
        Ok(json) => println!("{} {}", event_names::VISIBILITY_CHANGED, json),
        Err(e) => tracing::warn!("failed to serialize visibility event: {}", e),
    }
}
