//! Activity calendar aggregation.
//!
//! Turns a sparse series of per-day counts into a dense, week-aligned grid
//! ending today, in the style of a contribution heatmap. Weeks start on
//! Sunday; the first week is left-padded so every date sits in its weekday
//! row, and the final week may be partial.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

use crate::model::ActivitySample;

/// Default trailing window shown on the progress page.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalendarError {
    #[error("a window of {window_days} days ending {today} is outside the supported date range")]
    WindowOutOfRange { window_days: u32, today: NaiveDate },
}

//
// ─── COLOR SCALE ───────────────────────────────────────────────────────────────
//

/// Quantized intensity tier for a day's count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorBucket {
    Empty,
    Low,
    Medium,
    High,
    Max,
}

impl ColorBucket {
    /// Every bucket from least to most active, for legends.
    pub const ALL: [ColorBucket; 5] = [
        ColorBucket::Empty,
        ColorBucket::Low,
        ColorBucket::Medium,
        ColorBucket::High,
        ColorBucket::Max,
    ];

    /// Thresholds: `0`, `1..=4`, `5..=9`, `10..=19`, `20+`.
    #[must_use]
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => ColorBucket::Empty,
            1..=4 => ColorBucket::Low,
            5..=9 => ColorBucket::Medium,
            10..=19 => ColorBucket::High,
            _ => ColorBucket::Max,
        }
    }

    /// Numeric tier, `0` for no activity up to `4`.
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            ColorBucket::Empty => 0,
            ColorBucket::Low => 1,
            ColorBucket::Medium => 2,
            ColorBucket::High => 3,
            ColorBucket::Max => 4,
        }
    }
}

//
// ─── GRID ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub count: u32,
    pub bucket: ColorBucket,
}

/// A week column. `None` marks padding before the window starts.
pub type CalendarWeek = Vec<Option<CalendarCell>>;

/// Read-only projection of an activity series over a trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    start: Option<NaiveDate>,
    end: NaiveDate,
    weeks: Vec<CalendarWeek>,
}

impl CalendarGrid {
    #[must_use]
    pub fn weeks(&self) -> &[CalendarWeek] {
        &self.weeks
    }

    /// First date in the window, `None` for a zero-day window.
    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Dated cells in chronological order.
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flatten().flatten()
    }

    /// Number of padding cells in the first week.
    #[must_use]
    pub fn leading_padding(&self) -> usize {
        self.weeks
            .first()
            .map_or(0, |week| week.iter().take_while(|cell| cell.is_none()).count())
    }

    /// Sum of all counts inside the window.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.cells().map(|cell| u64::from(cell.count)).sum()
    }
}

/// Build the week-bucketed grid for `window_days` days ending on `today`.
///
/// Dates missing from `samples` count as zero; samples outside the window are
/// ignored. When a date appears more than once the last sample wins.
///
/// # Errors
///
/// Returns `CalendarError::WindowOutOfRange` if the window start cannot be
/// represented as a calendar date.
pub fn build_grid(
    samples: &[ActivitySample],
    window_days: u32,
    today: NaiveDate,
) -> Result<CalendarGrid, CalendarError> {
    if window_days == 0 {
        return Ok(CalendarGrid {
            start: None,
            end: today,
            weeks: Vec::new(),
        });
    }

    let counts: HashMap<NaiveDate, u32> = samples
        .iter()
        .map(|sample| (sample.date, sample.count))
        .collect();

    let start = today
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .ok_or(CalendarError::WindowOutOfRange { window_days, today })?;

    let padding = start.weekday().num_days_from_sunday() as usize;
    let mut weeks = Vec::new();
    let mut week: CalendarWeek = vec![None; padding];

    for date in start.iter_days().take(window_days as usize) {
        let count = counts.get(&date).copied().unwrap_or(0);
        week.push(Some(CalendarCell {
            date,
            count,
            bucket: ColorBucket::from_count(count),
        }));
        if week.len() == DAYS_PER_WEEK {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        weeks.push(week);
    }

    Ok(CalendarGrid {
        start: Some(start),
        end: today,
        weeks,
    })
}
