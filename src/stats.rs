use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters collected while loading a source.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LoadStats {
    pub loaded_at: DateTime<Utc>,

    /// Data rows encountered after the header.
    pub rows_seen: usize,
    pub rows_parsed: usize,
    pub rows_skipped: usize,

    /// Fields that failed coercion and were replaced by their default.
    pub fields_defaulted: usize,
}

impl LoadStats {
    pub fn new() -> Self {
        LoadStats {
            loaded_at: Utc::now(),
            ..Default::default()
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn skip_pct(&self) -> f64 {
        Self::pct(self.rows_skipped, self.rows_seen)
    }

    pub(crate) fn record_parsed(&mut self, defaulted: usize) {
        self.rows_seen += 1;
        self.rows_parsed += 1;
        self.fields_defaulted += defaulted;
    }

    pub(crate) fn record_skipped(&mut self) {
        self.rows_seen += 1;
        self.rows_skipped += 1;
    }
}
