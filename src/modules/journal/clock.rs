use chrono::Local;
use std::fmt::Write;

const DEFAULT_DATE_FORMAT: &str = "%Y/%-m/%-d";

/// Source of the date key for new entries.
pub trait Clock: Send {
    fn today(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct LocalClock {
    format: String,
}

impl LocalClock {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl Clock for LocalClock {
    /// Falls back to the default pattern when the configured one cannot be rendered.
    fn today(&self) -> String {
        let now = Local::now();
        let mut date = String::new();
        if write!(date, "{}", now.format(&self.format)).is_ok() {
            return date;
        }
        tracing::warn!(format = %self.format, "invalid date format, using default");
        now.format(DEFAULT_DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    date: String,
}

impl FixedClock {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.date.clone()
    }
}
