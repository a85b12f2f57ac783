//! Calendar-aligned date windows for dashboard filters.
//!
//! A [`DateRangeType`] plus an integer offset names a calendar period relative to
//! "today": `(Month, 0)` is the current month, `(Month, -1)` the previous one.
//! [`DateRangeType::All`] never produces a window; its absence means "unbounded".

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// The granularity of a dashboard date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRangeType {
    /// No filtering.
    #[default]
    All,
    Year,
    Month,
    /// Monday through Sunday.
    Week,
    Day,
}

impl DateRangeType {
    /// Every range type, in the order the dashboard offers them.
    pub const ALL: [DateRangeType; 5] = [
        DateRangeType::All,
        DateRangeType::Year,
        DateRangeType::Month,
        DateRangeType::Week,
        DateRangeType::Day,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateRangeType::All => "all",
            DateRangeType::Year => "year",
            DateRangeType::Month => "month",
            DateRangeType::Week => "week",
            DateRangeType::Day => "day",
        }
    }

    /// Human-readable label shown by the range picker.
    pub fn label(self) -> &'static str {
        match self {
            DateRangeType::All => "All time",
            DateRangeType::Year => "This year",
            DateRangeType::Month => "This month",
            DateRangeType::Week => "This week",
            DateRangeType::Day => "Today",
        }
    }

    /// Whether a previous period exists to compare against.
    pub fn is_comparable(self) -> bool {
        self != DateRangeType::All
    }
}

impl fmt::Display for DateRangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing never fails: unrecognized input falls back to [`DateRangeType::All`].
impl FromStr for DateRangeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "year" => DateRangeType::Year,
            "month" => DateRangeType::Month,
            "week" => DateRangeType::Week,
            "day" => DateRangeType::Day,
            "all" => DateRangeType::All,
            other => {
                tracing::debug!(input = other, "unrecognized range type, using unbounded");
                DateRangeType::All
            }
        })
    }
}

/// An inclusive `[start_date, end_date]` calendar range.
///
/// Serializes as `{"startDate":"YYYY-MM-DD","endDate":"YYYY-MM-DD"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Builds a window, returning `None` when `start_date > end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        (start_date <= end_date).then_some(Self {
            start_date,
            end_date,
        })
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start_date, self.end_date)
    }
}

/// Source of "today" for range computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The local calendar date of the running process.
    #[default]
    System,
    /// A pinned date, for tests and reproducible reports.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(d) => *d,
        }
    }
}

/// Computes the window for `range_type` shifted by `offset` periods from today.
///
/// Reads the system clock once. See [`compute_range_on`].
pub fn compute_range(range_type: DateRangeType, offset: i32) -> Option<DateWindow> {
    compute_range_on(Clock::System.today(), range_type, offset)
}

/// Computes the window for `range_type` shifted by `offset` periods from `today`.
///
/// - `Day`: the single day `today + offset`.
/// - `Week`: the Monday on or before `today`, moved by `offset` weeks, through the following Sunday.
/// - `Month`: first to last day of `today`'s month moved by `offset` months.
/// - `Year`: Jan 1 to Dec 31 of `today`'s year plus `offset`.
/// - `All`: always `None`.
///
/// Offsets that would leave chrono's representable range also yield `None`.
pub fn compute_range_on(today: NaiveDate, range_type: DateRangeType, offset: i32) -> Option<DateWindow> {
    match range_type {
        DateRangeType::All => None,
        DateRangeType::Day => day_window(today, offset),
        DateRangeType::Week => week_window(today, offset),
        DateRangeType::Month => month_window(today, offset),
        DateRangeType::Year => year_window(today, offset),
    }
}

fn day_window(today: NaiveDate, offset: i32) -> Option<DateWindow> {
    let day = today.checked_add_signed(TimeDelta::try_days(i64::from(offset))?)?;
    DateWindow::new(day, day)
}

fn week_window(today: NaiveDate, offset: i32) -> Option<DateWindow> {
    // Sunday counts as day 6 of the week that started the previous Monday.
    let back = u64::from(today.weekday().num_days_from_monday());
    let monday = today.checked_sub_days(Days::new(back))?;
    let start = monday.checked_add_signed(TimeDelta::try_days(i64::from(offset) * 7)?)?;
    let end = start.checked_add_days(Days::new(6))?;
    DateWindow::new(start, end)
}

fn month_window(today: NaiveDate, offset: i32) -> Option<DateWindow> {
    let index = i64::from(today.year()) * 12 + i64::from(today.month0()) + i64::from(offset);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    DateWindow::new(start, end)
}

fn year_window(today: NaiveDate, offset: i32) -> Option<DateWindow> {
    let year = today.year().checked_add(offset)?;
    DateWindow::new(
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    )
}
