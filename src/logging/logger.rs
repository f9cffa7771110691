//! Structured logger with warning accounting.
use std::sync::atomic::{AtomicUsize, Ordering};

use super::subscriber::STAGE_TARGET;
use crate::config::validation::ValidationWarning;

/// Thin facade over [`tracing`] used by the commands.
///
/// Counts warnings so a command can report how many issues it surfaced.
#[derive(Debug, Default)]
pub struct Logger {
    warnings: AtomicUsize,
}

impl Logger {
    /// Create a logger with no warnings recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log each validation warning, preceded by a count.
    pub fn report(&self, warnings: &[ValidationWarning]) {
        if warnings.is_empty() {
            return;
        }
        tracing::warn!("found {} data warning(s):", warnings.len());
        for warning in warnings {
            self.warn(&format!(
                "  {} [{}]: {}",
                warning.source, warning.item, warning.message
            ));
        }
    }

    /// Number of warnings logged so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}
