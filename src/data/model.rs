use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// ClusterId – pre-computed season/weather cluster label
// ---------------------------------------------------------------------------

/// One of the four season/weather clusters assigned upstream.
///
/// The set is closed: every record carries one of [`ClusterId::ALL`], and
/// grouped outputs always report all four in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(u8);

impl ClusterId {
    /// The complete, ordered key set.
    pub const ALL: [ClusterId; 4] = [ClusterId(0), ClusterId(1), ClusterId(2), ClusterId(3)];

    /// Returns `None` for labels outside `0..=3`.
    pub fn new(raw: i64) -> Option<Self> {
        match raw {
            0..=3 => Some(ClusterId(raw as u8)),
            _ => None,
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Human-readable season/weather meaning shown in the chart legend.
    pub fn description(self) -> &'static str {
        match self.0 {
            0 => "Spring/Summer - Clear",
            1 => "Winter/Autumn - Clear",
            2 => "Spring/Summer - Not clear",
            _ => "Winter/Autumn - Not clear",
        }
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RentalRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single day (or part of a day) of rental activity.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRecord {
    pub date: NaiveDate,
    /// Total rentals; always `registered + casual`.
    pub count: u64,
    pub registered: u64,
    pub casual: u64,
    /// `true` on weekdays that are not holidays.
    pub working_day: bool,
    pub cluster: ClusterId,
}

// ---------------------------------------------------------------------------
// RentalDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never empty, never mutated after construction.
#[derive(Debug, Clone)]
pub struct RentalDataset {
    records: Vec<RentalRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl RentalDataset {
    /// Build the dataset and its date bounds. Returns `None` when `records` is empty.
    pub fn from_records(records: Vec<RentalRecord>) -> Option<Self> {
        let min_date = records.iter().map(|r| r.date).min()?;
        let max_date = records.iter().map(|r| r.date).max()?;
        Some(RentalDataset {
            records,
            min_date,
            max_date,
        })
    }

    /// All records in file order.
    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    /// Earliest date present.
    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Latest date present.
    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
