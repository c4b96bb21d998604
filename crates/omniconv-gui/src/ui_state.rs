//! UI-specific state (ephemeral)

use omniconv_core::ThemePreference;
use std::collections::VecDeque;

/// Entries kept in the technical log before the oldest are dropped.
pub const TECHNICAL_LOG_CAPACITY: usize = 200;

/// UI-specific state that doesn't need to be persisted between batches
#[derive(Clone)]
pub struct UiState {
    /// Current theme (dark/light)
    pub theme: Theme,

    /// Technical log visibility
    pub technical_log_expanded: bool,

    /// Technical log entries (max 200)
    pub technical_log: VecDeque<LogEntry>,
}

impl UiState {
    pub fn new(theme: Theme, technical_log_expanded: bool) -> Self {
        Self {
            theme,
            technical_log_expanded,
            technical_log: VecDeque::with_capacity(TECHNICAL_LOG_CAPACITY),
        }
    }

    /// Add a log entry, maintaining max 200 entries
    pub fn add_log_entry(&mut self, entry: LogEntry) {
        if self.technical_log.len() >= TECHNICAL_LOG_CAPACITY {
            self.technical_log.pop_front();
        }
        self.technical_log.push_back(entry);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Theme::Dark, false)
    }
}

/// Theme selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl From<ThemePreference> for Theme {
    fn from(value: ThemePreference) -> Self {
        match value {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        }
    }
}

impl From<Theme> for ThemePreference {
    fn from(value: Theme) -> Self {
        match value {
            Theme::Dark => ThemePreference::Dark,
            Theme::Light => ThemePreference::Light,
        }
    }
}

/// Technical log entry
#[derive(Clone, Debug)]
pub struct LogEntry {
    /// Timestamp
    pub timestamp: String,

    /// Log level
    pub level: LogLevel,

    /// Message
    pub message: String,
}

/// Log level for coloring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}
