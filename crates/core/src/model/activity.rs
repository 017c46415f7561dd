use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of quiz events recorded on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivitySample {
    pub date: NaiveDate,
    pub count: u32,
}

impl ActivitySample {
    #[must_use]
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}
