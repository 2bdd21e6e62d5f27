/// Per-site background colors kept in chrome.storage.sync
///
/// Keys are full page URLs, values are CSS color names.

use log::warn;

use crate::error::HostError;
use crate::host::SyncStore;

/// Colors offered in the popup dropdown
pub const PALETTE: [&str; 4] = ["white", "pink", "green", "yellow"];

pub fn is_palette_color(color: &str) -> bool {
    PALETTE.contains(&color)
}

/// Saved color for `url`, or `None` when nothing usable is stored.
/// A failed read counts as nothing stored.
pub async fn saved_color<S: SyncStore>(store: &S, url: &str) -> Option<String> {
    match store.get(url).await {
        Ok(color) => color.filter(|c| !c.is_empty()),
        Err(e) => {
            warn!("Could not read saved color for {}: {}", url, e);
            None
        }
    }
}

/// Last write wins
pub async fn save_color<S: SyncStore>(store: &S, url: &str, color: &str) -> Result<(), HostError> {
    store.set(url, color).await
}

/// Script that paints the page body
pub fn background_script(color: &str) -> String {
    // JSON string syntax is valid JS string syntax
    let literal = serde_json::to_string(color).unwrap_or_else(|_| "\"\"".to_string());
    format!("document.body.style.backgroundColor={};", literal)
}
