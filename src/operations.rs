/// Popup actions: restoring and changing the page color, and the redirect button

use log::{info, warn};

use crate::config::RedirectConfig;
use crate::error::HostError;
use crate::host::{SyncStore, TabHost};
use crate::rewrite::rewrite_url;
use crate::storage::{background_script, save_color, saved_color};

/// Paint the active page. Fire-and-forget: failures are only logged.
pub async fn apply_color<H: TabHost>(host: &H, color: &str) {
    if let Err(e) = host.execute_script(&background_script(color)).await {
        warn!("Could not apply {}: {}", color, e);
    }
}

/// On popup load: repaint the page with its saved color, if any,
/// and return it so the dropdown can pre-select it
pub async fn restore_color<H: TabHost, S: SyncStore>(host: &H, store: &S, url: &str) -> Option<String> {
    let color = saved_color(store, url).await?;
    apply_color(host, &color).await;
    Some(color)
}

/// Dropdown change: paint the page and remember the choice for `url`
pub async fn change_color<H: TabHost, S: SyncStore>(
    host: &H,
    store: &S,
    url: &str,
    color: &str,
) -> Result<(), HostError> {
    apply_color(host, color).await;
    save_color(store, url, color).await
}

/// Where the redirect button sends the user from `url`
pub fn redirect_target(url: &str, config: &RedirectConfig) -> String {
    match rewrite_url(url, config) {
        Ok(Some(target)) if !target.is_empty() => target,
        Ok(_) => config.fallback_url.clone(),
        Err(e) => {
            warn!("Rewrite failed, using fallback: {}", e);
            config.fallback_url.clone()
        }
    }
}

/// Redirect button: open the rewritten search (or the fallback) in a new tab
pub async fn inspire_me<H: TabHost>(host: &H, url: &str, config: &RedirectConfig) -> Result<String, HostError> {
    let target = redirect_target(url, config);
    info!("Opening {}", target);
    host.create_tab(&target).await?;
    Ok(target)
}
