use chrono::NaiveDate;
use thiserror::Error;

use super::model::{RentalDataset, RentalRecord};

// ---------------------------------------------------------------------------
// Date range predicate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// An inclusive `[start, end]` date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate and build a range. Inverted bounds are rejected, not swapped.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::StartAfterEnd { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// The range spanning the whole dataset.
    pub fn full(dataset: &RentalDataset) -> Self {
        DateRange {
            start: dataset.min_date(),
            end: dataset.max_date(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Records of a dataset that fall inside a [`DateRange`], in file order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    records: Vec<&'a RentalRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Select the records whose date lies in `range`. An empty result is valid.
pub fn filter_by_range<'a>(dataset: &'a RentalDataset, range: &DateRange) -> FilteredView<'a> {
    let records = dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.date))
        .collect();
    FilteredView { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ClusterId;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn dataset(dates: &[&str]) -> RentalDataset {
        let records = dates
            .iter()
            .map(|d| RentalRecord {
                date: date(d),
                count: 3,
                registered: 2,
                casual: 1,
                working_day: false,
                cluster: ClusterId::ALL[1],
            })
            .collect();
        RentalDataset::from_records(records).unwrap()
    }

    #[test]
    fn inverted_range_is_an_error() {
        let err = DateRange::new(date("2011-02-01"), date("2011-01-01")).unwrap_err();
        assert_eq!(
            err,
            RangeError::StartAfterEnd {
                start: date("2011-02-01"),
                end: date("2011-01-01"),
            }
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(date("2011-01-01"), date("2011-01-01")).unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn filter_is_inclusive_on_both_ends() {
        let ds = dataset(&["2011-01-01", "2011-01-02", "2011-01-03", "2011-01-04"]);
        let range = DateRange::new(date("2011-01-02"), date("2011-01-03")).unwrap();
        let view = filter_by_range(&ds, &range);
        let dates: Vec<NaiveDate> = view.records().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2011-01-02"), date("2011-01-03")]);
    }

    #[test]
    fn filter_keeps_only_dates_in_range_and_never_grows() {
        let ds = dataset(&["2011-05-01", "2011-01-01", "2011-03-01", "2011-03-01", "2012-01-01"]);
        let range = DateRange::new(date("2011-02-01"), date("2011-06-01")).unwrap();
        let view = filter_by_range(&ds, &range);
        assert!(view.len() <= ds.len());
        assert_eq!(view.len(), 3);
        assert!(view.records().iter().all(|r| range.contains(r.date)));
    }

    #[test]
    fn range_outside_dataset_gives_empty_view() {
        let ds = dataset(&["2011-01-01", "2011-01-02"]);
        let range = DateRange::new(date("2015-01-01"), date("2015-12-31")).unwrap();
        assert!(filter_by_range(&ds, &range).is_empty());
    }

    #[test]
    fn full_range_selects_everything() {
        let ds = dataset(&["2011-04-01", "2011-01-01", "2011-02-01"]);
        let range = DateRange::full(&ds);
        assert_eq!(range.start(), date("2011-01-01"));
        assert_eq!(range.end(), date("2011-04-01"));
        assert_eq!(filter_by_range(&ds, &range).len(), 3);
    }
}
