//! Case configuration types
//!
//! This module defines the small amount of configuration the merge library
//! accepts. Everything here affects how event names are sanitized before
//! they are stored; the merge algorithm itself has no tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration applied when a case builds its event sequences
///
/// The default configuration leaves event names untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Strip leading and trailing whitespace from event names
    #[serde(default)]
    pub trim: bool,

    /// Lowercase event names so "Gunshot" and "gunshot" anchor together
    #[serde(default)]
    pub case_fold: bool,
}

impl CaseConfig {
    /// Create a new case configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable whitespace trimming
    pub fn with_trim(mut self, enabled: bool) -> Self {
        self.trim = enabled;
        self
    }

    /// Builder method: enable or disable case folding
    pub fn with_case_fold(mut self, enabled: bool) -> Self {
        self.case_fold = enabled;
        self
    }

    /// Normalize a single event name
    pub fn sanitize(&self, event: &str) -> String {
        let event = if self.trim { event.trim() } else { event };
        if self.case_fold {
            event.to_lowercase()
        } else {
            event.to_string()
        }
    }
}
