use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

/// A failure that was deliberately swallowed so the primary operation could
/// finish, e.g. a stale order that could not be cancelled before an open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraderWarning {
    pub operation: &'static str,
    pub symbol: String,
    pub message: String,
}

/// Fan-out for [`TraderWarning`]s: always logged, optionally forwarded to a
/// channel owned by an observability collaborator.
#[derive(Debug, Clone, Default)]
pub struct WarningSink {
    sender: Option<mpsc::UnboundedSender<TraderWarning>>,
}

impl WarningSink {
    pub fn new(sender: Option<mpsc::UnboundedSender<TraderWarning>>) -> Self {
        Self { sender }
    }

    /// Create a sink together with the receiving end of its channel
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TraderWarning>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(Some(tx)), rx)
    }

    pub fn emit(&self, operation: &'static str, symbol: &str, message: impl Into<String>) {
        let warning = TraderWarning {
            operation,
            symbol: symbol.to_string(),
            message: message.into(),
        };

        warn!(
            operation = warning.operation,
            symbol = %warning.symbol,
            message = %warning.message,
            "Best-effort step failed"
        );

        if let Some(sender) = &self.sender {
            // A dropped receiver only means nobody is listening any more
            let _ = sender.send(warning);
        }
    }
}
