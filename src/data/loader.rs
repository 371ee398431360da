use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::model::{ClusterId, RentalDataset, RentalRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a rental dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row; needs `dteday`, `cnt`, `registered`, `casual`,
///   `workingday` and `klaster`, any other column is ignored
/// * `.json` – `[{ "dteday": "2011-01-01", "cnt": 985, ... }, ...]`
pub fn load_file(path: &Path) -> Result<RentalDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parse: fn(BufReader<File>) -> Result<RentalDataset> = match ext.as_str() {
        "csv" => parse_csv,
        "json" => parse_json,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let dataset =
        parse(BufReader::new(file)).with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "{} rows spanning {} .. {}",
        dataset.len(),
        dataset.min_date(),
        dataset.max_date()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Raw row shared by both formats
// ---------------------------------------------------------------------------

/// Date cell as it appears on disk. Pandas' `to_json` writes dates as epoch
/// milliseconds; CSV cells are always read as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    EpochMillis(i64),
    Text(String),
}

impl From<String> for RawDate {
    fn from(text: String) -> Self {
        RawDate::Text(text)
    }
}

/// `D` is `String` for CSV so all-digit cells like `20110101` are never
/// taken for epoch milliseconds.
#[derive(Debug, Deserialize)]
struct RawRow<D = RawDate> {
    dteday: D,
    cnt: u64,
    registered: u64,
    casual: u64,
    workingday: i64,
    klaster: i64,
}

impl<D: Into<RawDate>> RawRow<D> {
    fn into_record(self, row: usize) -> Result<RentalRecord> {
        let dteday: RawDate = self.dteday.into();
        let date = parse_date(&dteday)
            .with_context(|| format!("Row {row}: unparseable 'dteday' {dteday:?}"))?;

        let working_day = match self.workingday {
            0 => false,
            1 => true,
            other => bail!("Row {row}: 'workingday' must be 0 or 1, got {other}"),
        };

        let cluster = ClusterId::new(self.klaster)
            .with_context(|| format!("Row {row}: 'klaster' must be 0..=3, got {}", self.klaster))?;

        if self.registered.checked_add(self.casual) != Some(self.cnt) {
            bail!(
                "Row {row}: registered ({}) + casual ({}) does not equal cnt ({})",
                self.registered,
                self.casual,
                self.cnt
            );
        }

        Ok(RentalRecord {
            date,
            count: self.cnt,
            registered: self.registered,
            casual: self.casual,
            working_day,
            cluster,
        })
    }
}

fn parse_date(raw: &RawDate) -> Option<NaiveDate> {
    match raw {
        RawDate::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.date_naive()),
        RawDate::Text(s) => parse_date_text(s.trim()),
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

fn finish(records: Vec<RentalRecord>) -> Result<RentalDataset> {
    RentalDataset::from_records(records).context("dataset contains no rows")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV rows with a header line.
pub fn parse_csv<R: Read>(reader: R) -> Result<RentalDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in reader.deserialize::<RawRow<String>>().enumerate() {
        let row = i + 1;
        let raw = result.with_context(|| format!("CSV row {row}"))?;
        records.push(raw.into_record(row)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array (`df.to_json(orient='records')`).
pub fn parse_json<R: Read>(reader: R) -> Result<RentalDataset> {
    let rows: Vec<RawRow> = serde_json::from_reader(reader).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i + 1))
        .collect::<Result<Vec<_>>>()?;

    finish(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "instant,dteday,season,weathersit,casual,registered,cnt,workingday,klaster\n";

    fn csv(rows: &str) -> Result<RentalDataset> {
        parse_csv(format!("{HEADER}{rows}").as_bytes())
    }

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let ds = csv("1,2011-01-01,1,2,331,654,985,0,1\n2,2011-01-02,1,2,131,670,801,0,3\n").unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(first.count, 985);
        assert_eq!(first.registered, 654);
        assert_eq!(first.casual, 331);
        assert!(!first.working_day);
        assert_eq!(first.cluster.get(), 1);
    }

    #[test]
    fn accepts_datetime_and_us_dates() {
        let ds = csv("1,2011-01-05 00:00:00,1,1,1,1,2,1,0\n2,01/06/2011,1,1,1,1,2,1,0\n").unwrap();
        assert_eq!(ds.min_date(), NaiveDate::from_ymd_opt(2011, 1, 5).unwrap());
        assert_eq!(ds.max_date(), NaiveDate::from_ymd_opt(2011, 1, 6).unwrap());
    }

    #[test]
    fn rejects_missing_column() {
        let err = parse_csv("dteday,cnt,registered,casual,workingday\n2011-01-01,2,1,1,1\n".as_bytes())
            .unwrap_err();
        assert!(format!("{err:#}").contains("klaster"));
    }

    #[test]
    fn rejects_bad_date() {
        let err = csv("1,not-a-date,1,1,1,1,2,1,0\n").unwrap_err();
        assert!(format!("{err:#}").contains("dteday"));
    }

    #[test]
    fn rejects_unknown_cluster() {
        let err = csv("1,2011-01-01,1,1,1,1,2,1,4\n").unwrap_err();
        assert!(format!("{err:#}").contains("klaster"));
    }

    #[test]
    fn rejects_non_binary_working_day() {
        assert!(csv("1,2011-01-01,1,1,1,1,2,2,0\n").is_err());
    }

    #[test]
    fn rejects_inconsistent_counts() {
        let err = csv("1,2011-01-01,1,1,5,5,11,1,0\n").unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"));
    }

    #[test]
    fn rejects_compact_numeric_date() {
        let err = csv("1,20110101,1,1,1,1,2,1,0\n").unwrap_err();
        assert!(format!("{err:#}").contains("dteday"));
    }

    #[test]
    fn overflowing_counts_are_a_row_error() {
        let err = csv("1,2011-01-01,1,1,1,18446744073709551615,0,1,0\n").unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"));
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(csv("").is_err());
    }

    #[test]
    fn parses_json_records_with_epoch_dates() {
        let json = r#"[
            {"dteday": 1293840000000, "cnt": 985, "registered": 654, "casual": 331, "workingday": 0, "klaster": 1},
            {"dteday": "2011-01-02", "cnt": 801, "registered": 670, "casual": 131, "workingday": 0, "klaster": 3}
        ]"#;
        let ds = parse_json(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.min_date(), NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("rentals.parquet")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported"));
    }
}
