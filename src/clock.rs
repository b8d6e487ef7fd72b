//! Overridable wall clock.
//!
//! Account ids and timestamps are derived from local time at second
//! granularity, so tests pin the clock to reproduce same-second behaviour.

use chrono::{DateTime, Local};

/// `"USR"` + `%Y%m%d%H%M%S`
pub const ID_FORMAT: &str = "USR%Y%m%d%H%M%S";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default)]
pub struct Clock {
    fixed: Option<DateTime<Local>>,
}

impl Clock {
    /// Clock that follows the system time
    pub fn system() -> Self {
        Self { fixed: None }
    }

    /// Clock frozen at `at`
    pub fn fixed(at: DateTime<Local>) -> Self {
        Self { fixed: Some(at) }
    }

    pub fn now(&self) -> DateTime<Local> {
        match self.fixed {
            Some(fixed) => fixed,
            None => Local::now(),
        }
    }

    pub fn fix(&mut self, at: Option<DateTime<Local>>) {
        self.fixed = at;
    }

    /// Account id for the current second. Two calls within the same second
    /// return the same id.
    pub fn account_id(&self) -> String {
        self.now().format(ID_FORMAT).to_string()
    }

    pub fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }
}
