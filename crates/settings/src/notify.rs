use std::fmt;
use std::sync::Mutex;

use tracing::{error, info, warn};

/// Severity of a user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// A message shown to the operator after a workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub description: String,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            description: description.into(),
        }
    }

    pub fn success(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(AlertLevel::Success, message, description)
    }

    pub fn error(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, message, description)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.message, self.description)
    }
}

/// Destination for user-facing alerts.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, alert: Alert);
}

/// Writes alerts to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, alert: Alert) {
        match alert.level {
            AlertLevel::Error => error!(title = %alert.message, "{}", alert.description),
            AlertLevel::Warning => warn!(title = %alert.message, "{}", alert.description),
            AlertLevel::Info | AlertLevel::Success => {
                info!(title = %alert.message, "{}", alert.description);
            }
        }
    }
}

/// Keeps every alert in memory until drained.
#[derive(Debug, Default)]
pub struct MemorySink {
    alerts: Mutex<Vec<Alert>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the alerts received so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the alerts received so far.
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(
            &mut *self
                .alerts
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_drains() {
        let sink = MemorySink::new();
        sink.notify(Alert::success("Saved", "All good"));
        sink.notify(Alert::error("Failed", "Not good"));

        assert_eq!(sink.alerts().len(), 2);
        let drained = sink.drain();
        assert_eq!(drained[1].level, AlertLevel::Error);
        assert!(sink.alerts().is_empty());
    }

    #[test]
    fn alert_display() {
        let alert = Alert::success("Saved", "SMS sender updated");
        assert_eq!(alert.to_string(), "[success] Saved: SMS sender updated");
    }
}
