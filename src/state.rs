use std::path::PathBuf;

use chrono::NaiveDate;

use crate::color::ChartColors;
use crate::config::DashboardConfig;
use crate::data::aggregate::{summarize, Summary};
use crate::data::filter::{filter_by_range, DateRange, RangeError};
use crate::data::model::RentalDataset;
use crate::format::NumberFormat;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<RentalDataset>,

    /// Date picker values. Only meaningful once a dataset is loaded.
    pub start: NaiveDate,
    pub end: NaiveDate,

    /// Aggregates for the current range; `None` while the range is invalid.
    pub summary: Option<Summary>,

    /// Set when the picked range is inverted; the user is asked to fix it.
    pub range_error: Option<RangeError>,

    /// Fatal startup failure. When set, nothing but this message is shown.
    pub load_error: Option<String>,

    /// Non-fatal status / error message shown in the top bar.
    pub status_message: Option<String>,

    pub number_format: NumberFormat,
    pub colors: ChartColors,
    pub image_path: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            start: NaiveDate::default(),
            end: NaiveDate::default(),
            summary: None,
            range_error: None,
            load_error: None,
            status_message: None,
            number_format: NumberFormat::default(),
            colors: ChartColors::default(),
            image_path: None,
        }
    }
}

impl AppState {
    /// Fresh state carrying the display settings from `config`.
    pub fn from_config(config: &DashboardConfig, colors: ChartColors) -> Self {
        Self {
            number_format: config.number_format(),
            colors,
            image_path: config.image_path.clone(),
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset and select its full date range.
    pub fn set_dataset(&mut self, dataset: RentalDataset) {
        let full = DateRange::full(&dataset);
        self.start = full.start();
        self.end = full.end();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.refresh();
    }

    /// Record a startup load failure.
    pub fn fail_load(&mut self, message: String) {
        self.dataset = None;
        self.summary = None;
        self.load_error = Some(message);
    }

    /// Pick a new range. Both ends are clamped to the dataset's dates.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start = start;
        self.end = end;
        self.refresh();
    }

    /// Back to the dataset's full span.
    pub fn reset_range(&mut self) {
        if let Some(ds) = &self.dataset {
            let full = DateRange::full(ds);
            self.set_range(full.start(), full.end());
        }
    }

    /// Clamp the picker values and recompute the summary.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.summary = None;
            return;
        };

        self.start = self.start.clamp(ds.min_date(), ds.max_date());
        self.end = self.end.clamp(ds.min_date(), ds.max_date());

        match DateRange::new(self.start, self.end) {
            Ok(range) => {
                let view = filter_by_range(ds, &range);
                log::debug!("{} .. {}: {} rows", range.start(), range.end(), view.len());
                self.summary = Some(summarize(&view));
                self.range_error = None;
            }
            Err(e) => {
                log::warn!("Rejected date range: {e}");
                self.summary = None;
                self.range_error = Some(e);
            }
        }
    }

    /// Days covered by the current selection, if valid.
    pub fn selected_days(&self) -> Option<i64> {
        DateRange::new(self.start, self.end).ok().map(|r| r.days())
    }
}
