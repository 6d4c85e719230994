use anyhow::Result;
use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use smartlex_core::ports::NotifierPort;

const TOAST_TIMEOUT_MS: u32 = 5000;

/// Desktop notifications via the OS notification daemon. Delivery is
/// best-effort; callers ignore failures.
pub struct DesktopNotifier;

#[async_trait]
impl NotifierPort for DesktopNotifier {
    async fn request_permission(&self) -> Result<bool> {
        // freedesktop/Windows daemons have no permission prompt; treat the
        // capability as granted and let `notify` surface delivery failures.
        Ok(true)
    }

    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        let title = title.to_string();
        let body = body.to_string();
        // show() blocks on the daemon round-trip.
        tokio::task::spawn_blocking(move || -> Result<()> {
            Notification::new()
                .summary(&title)
                .body(&body)
                .timeout(Timeout::Milliseconds(TOAST_TIMEOUT_MS))
                .show()?;
            Ok(())
        })
        .await??;
        Ok(())
    }
}
