use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Seeded generator so every run writes the same sample file.
struct SampleRng {
    state: [u64; 4],
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SampleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// One output row, column names matching what the dashboard reads.
#[derive(Serialize)]
struct Row {
    instant: usize,
    dteday: String,
    season: u8,
    weathersit: u8,
    workingday: u8,
    casual: u64,
    registered: u64,
    cnt: u64,
    klaster: u8,
}

/// 1 = spring, 2 = summer, 3 = fall, 4 = winter (northern meteorological seasons).
fn season_of(date: NaiveDate) -> u8 {
    match date.month() {
        3..=5 => 1,
        6..=8 => 2,
        9..=11 => 3,
        _ => 4,
    }
}

/// Same grouping the upstream clustering settled on: warm vs cold season,
/// clear vs not-clear weather.
fn cluster_of(season: u8, weathersit: u8) -> u8 {
    let warm = matches!(season, 1 | 2);
    let clear = weathersit == 1;
    match (warm, clear) {
        (true, true) => 0,
        (false, true) => 1,
        (true, false) => 2,
        (false, false) => 3,
    }
}

fn main() -> Result<()> {
    let mut rng = SampleRng::new(42);

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).context("invalid start date")?;
    let days = 731;

    let output_path = Path::new("dashboard/bikesharing.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for i in 0..days {
        let date = first + Duration::days(i as i64);
        let season = season_of(date);

        let roll = rng.next_f64();
        let weathersit = if roll < 0.63 {
            1
        } else if roll < 0.95 {
            2
        } else {
            3
        };

        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let holiday = rng.next_f64() < 0.03;
        let working = !weekend && !holiday;

        // Demand grows over time, peaks in summer and drops with bad weather.
        let trend = 1.0 + i as f64 / days as f64;
        let seasonal = match season {
            2 => 1.4,
            1 | 3 => 1.15,
            _ => 0.7,
        };
        let weather = match weathersit {
            1 => 1.0,
            2 => 0.8,
            _ => 0.35,
        };
        let noise = 0.85 + 0.3 * rng.next_f64();
        let base = 2800.0 * trend * seasonal * weather * noise;

        let casual_share = if working { 0.12 } else { 0.35 };
        let casual = (base * casual_share).round() as u64;
        let registered = (base * (1.0 - casual_share)).round() as u64;

        writer.serialize(Row {
            instant: i + 1,
            dteday: date.format("%Y-%m-%d").to_string(),
            season,
            weathersit,
            workingday: u8::from(working),
            casual,
            registered,
            cnt: casual + registered,
            klaster: cluster_of(season, weathersit),
        })?;
    }
    writer.flush()?;

    println!("Wrote {days} daily rows to {}", output_path.display());
    Ok(())
}
