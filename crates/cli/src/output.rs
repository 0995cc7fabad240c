use warden_ops::warden_settings::{Alert, AlertLevel, NotificationSink};

/// Prints alerts to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, alert: Alert) {
        let tag = match alert.level {
            AlertLevel::Success => "OK ",
            AlertLevel::Info => "INF",
            AlertLevel::Warning => "WRN",
            AlertLevel::Error => "ERR",
        };
        eprintln!("[{tag}] {}: {}", alert.message, alert.description);
    }
}

/// Mask a secret for display.
pub fn masked(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "********",
        _ => "-",
    }
}

/// Render an optional value for text output.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
