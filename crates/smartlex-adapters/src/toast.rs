use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

use protocol::Toast;
use smartlex_core::ports::ToastPort;

/// Hands toasts to the UI over a channel; the UI side drains and renders.
#[derive(Clone)]
pub struct ChannelToast {
    tx: mpsc::Sender<Toast>,
}

impl ChannelToast {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Toast>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ToastPort for ChannelToast {
    async fn show(&self, toast: Toast) -> Result<()> {
        self.tx.send(toast).await.map_err(|e| anyhow!(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Severity;

    #[tokio::test]
    async fn delivers_toasts_in_order() {
        let (toasts, mut rx) = ChannelToast::new(8);
        toasts.show(Toast::info("one")).await.unwrap();
        toasts.show(Toast::error("two")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().message, "one");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.message, "two");
        assert_eq!(second.severity, Severity::Error);
    }
}
