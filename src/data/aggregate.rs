use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::filter::FilteredView;
use super::model::ClusterId;

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Headline numbers for a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total: u64,
    pub registered: u64,
    pub casual: u64,
    /// Share of `registered` in `total`, 0.0 when `total` is zero.
    pub percent_registered: f64,
    /// Share of `casual` in `total`, 0.0 when `total` is zero.
    pub percent_casual: f64,
}

/// Sum rentals and split them into registered / casual shares.
/// Sums saturate at `u64::MAX` instead of wrapping.
pub fn compute_totals(view: &FilteredView<'_>) -> Totals {
    let (total, registered, casual) = view
        .records()
        .iter()
        .fold((0u64, 0u64, 0u64), |(t, r, c), rec| {
            (
                t.saturating_add(rec.count),
                r.saturating_add(rec.registered),
                c.saturating_add(rec.casual),
            )
        });

    Totals {
        total,
        registered,
        casual,
        percent_registered: percent_of(registered, total),
        percent_casual: percent_of(casual, total),
    }
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

// ---------------------------------------------------------------------------
// Grouped sums
// ---------------------------------------------------------------------------

/// Total rentals per working-day flag (`false` = weekend/holiday).
/// Flags that never occur in the view are absent from the map.
pub fn compute_by_working_day(view: &FilteredView<'_>) -> BTreeMap<bool, u64> {
    let mut groups: BTreeMap<bool, u64> = BTreeMap::new();
    for rec in view.records() {
        let sum = groups.entry(rec.working_day).or_insert(0);
        *sum = sum.saturating_add(rec.count);
    }
    groups
}

/// Casual + registered rentals per cluster, always keyed by all of
/// [`ClusterId::ALL`] in ascending order.
pub fn compute_by_cluster(view: &FilteredView<'_>) -> BTreeMap<ClusterId, u64> {
    let mut observed: BTreeMap<ClusterId, u64> = BTreeMap::new();
    for rec in view.records() {
        let sum = observed.entry(rec.cluster).or_insert(0);
        *sum = sum.saturating_add(rec.casual.saturating_add(rec.registered));
    }
    zero_fill_clusters(observed)
}

/// Project grouped sums onto the complete cluster key set.
fn zero_fill_clusters(mut observed: BTreeMap<ClusterId, u64>) -> BTreeMap<ClusterId, u64> {
    ClusterId::ALL
        .iter()
        .map(|&id| (id, observed.remove(&id).unwrap_or(0)))
        .collect()
}

/// Rentals per calendar date in ascending date order. Records sharing a date
/// are summed into one point.
pub fn daily_series(view: &FilteredView<'_>) -> Vec<(NaiveDate, u64)> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for rec in view.records() {
        let sum = per_day.entry(rec.date).or_insert(0);
        *sum = sum.saturating_add(rec.count);
    }
    per_day.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Summary – everything the dashboard renders for one range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub totals: Totals,
    pub by_working_day: BTreeMap<bool, u64>,
    pub by_cluster: BTreeMap<ClusterId, u64>,
    pub daily: Vec<(NaiveDate, u64)>,
    /// Number of records in the view.
    pub rows: usize,
}

pub fn summarize(view: &FilteredView<'_>) -> Summary {
    Summary {
        totals: compute_totals(view),
        by_working_day: compute_by_working_day(view),
        by_cluster: compute_by_cluster(view),
        daily: daily_series(view),
        rows: view.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_by_range, DateRange};
    use crate::data::model::{RentalDataset, RentalRecord};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn rec(d: &str, registered: u64, casual: u64, working_day: bool, cluster: i64) -> RentalRecord {
        RentalRecord {
            date: date(d),
            count: registered + casual,
            registered,
            casual,
            working_day,
            cluster: ClusterId::new(cluster).unwrap(),
        }
    }

    fn summary_for(records: Vec<RentalRecord>, start: &str, end: &str) -> Summary {
        let ds = RentalDataset::from_records(records).unwrap();
        let range = DateRange::new(date(start), date(end)).unwrap();
        summarize(&filter_by_range(&ds, &range))
    }

    fn cluster(id: i64) -> ClusterId {
        ClusterId::new(id).unwrap()
    }

    #[test]
    fn single_record_scenario() {
        let s = summary_for(vec![rec("2011-01-01", 8, 2, true, 0)], "2011-01-01", "2011-01-01");

        assert_eq!(s.totals.total, 10);
        assert!((s.totals.percent_registered - 80.0).abs() < 1e-9);
        assert!((s.totals.percent_casual - 20.0).abs() < 1e-9);
        assert_eq!(s.by_working_day, BTreeMap::from([(true, 10)]));
        assert_eq!(
            s.by_cluster,
            BTreeMap::from([(cluster(0), 10), (cluster(1), 0), (cluster(2), 0), (cluster(3), 0)])
        );
    }

    #[test]
    fn range_outside_data_degrades_to_zero() {
        let s = summary_for(
            vec![rec("2011-01-01", 8, 2, true, 0), rec("2011-01-02", 5, 5, false, 2)],
            "2013-01-01",
            "2013-02-01",
        );

        assert_eq!(s.totals, Totals::default());
        assert_eq!(s.totals.percent_registered, 0.0);
        assert_eq!(s.totals.percent_casual, 0.0);
        assert!(!s.totals.percent_registered.is_nan());
        assert!(s.by_working_day.is_empty());
        assert_eq!(s.by_cluster.len(), 4);
        assert!(s.by_cluster.values().all(|&v| v == 0));
        assert!(s.daily.is_empty());
    }

    #[test]
    fn same_date_different_clusters_sum_into_their_keys() {
        let s = summary_for(
            vec![rec("2011-06-01", 100, 20, true, 1), rec("2011-06-01", 30, 10, true, 3)],
            "2011-06-01",
            "2011-06-01",
        );

        assert_eq!(s.by_cluster[&cluster(1)], 120);
        assert_eq!(s.by_cluster[&cluster(3)], 40);
        assert_eq!(s.by_cluster[&cluster(0)], 0);
        assert_eq!(s.daily, vec![(date("2011-06-01"), 160)]);
    }

    #[test]
    fn cluster_keys_are_complete_and_ascending() {
        let s = summary_for(
            vec![rec("2011-01-03", 1, 1, true, 3), rec("2011-01-01", 2, 2, false, 2)],
            "2011-01-01",
            "2011-01-31",
        );
        let keys: Vec<u8> = s.by_cluster.keys().map(|c| c.get()).collect();
        assert_eq!(keys, vec![0, 1, 2, 3]);
    }

    #[test]
    fn totals_are_conserved_across_groupings() {
        let records = vec![
            rec("2011-01-01", 654, 331, false, 1),
            rec("2011-01-02", 670, 131, false, 3),
            rec("2011-01-03", 1229, 120, true, 1),
            rec("2011-06-15", 4000, 900, true, 0),
            rec("2011-07-04", 3000, 2000, false, 2),
            rec("2011-07-04", 10, 5, true, 0),
        ];
        let s = summary_for(records, "2011-01-02", "2011-07-04");

        let by_wd: u64 = s.by_working_day.values().sum();
        let by_cl: u64 = s.by_cluster.values().sum();
        let by_day: u64 = s.daily.iter().map(|(_, c)| c).sum();
        assert_eq!(s.totals.total, by_wd);
        assert_eq!(s.totals.total, by_cl);
        assert_eq!(s.totals.total, by_day);
        assert_eq!(s.totals.registered + s.totals.casual, s.totals.total);
        assert_eq!(s.rows, 5);
    }

    #[test]
    fn working_day_groups_split_counts() {
        let s = summary_for(
            vec![
                rec("2011-01-01", 10, 0, false, 0),
                rec("2011-01-03", 20, 5, true, 0),
                rec("2011-01-04", 30, 5, true, 0),
            ],
            "2011-01-01",
            "2011-01-04",
        );
        assert_eq!(s.by_working_day, BTreeMap::from([(false, 10), (true, 60)]));
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let big = u64::MAX / 2 + 1;
        let s = summary_for(
            vec![rec("2011-01-01", big, 0, true, 2), rec("2011-01-02", big, 0, true, 2)],
            "2011-01-01",
            "2011-01-02",
        );
        assert_eq!(s.totals.total, u64::MAX);
        assert_eq!(s.by_working_day[&true], u64::MAX);
        assert_eq!(s.by_cluster[&cluster(2)], u64::MAX);
        assert!((s.totals.percent_registered - 100.0).abs() < 1e-9);
    }

    #[test]
    fn daily_series_is_sorted_by_date() {
        let s = summary_for(
            vec![
                rec("2011-01-03", 3, 0, true, 0),
                rec("2011-01-01", 1, 0, false, 0),
                rec("2011-01-02", 2, 0, false, 0),
            ],
            "2011-01-01",
            "2011-01-03",
        );
        let dates: Vec<NaiveDate> = s.daily.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![date("2011-01-01"), date("2011-01-02"), date("2011-01-03")]);
    }
}
