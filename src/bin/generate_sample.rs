use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One synthetic hourly observation, written with the dashboard's column names.
#[derive(Debug, Serialize)]
struct HourRow {
    instant: i64,
    yr: i64,
    mnth: i64,
    hr: i64,
    season: i64,
    weathersit: i64,
    casual: i64,
    registered: i64,
    cnt: i64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
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

/// Season code by month, matching the dataset's 1 = spring … 4 = winter.
fn season_for_month(month: i64) -> i64 {
    match month {
        3..=5 => 1,
        6..=8 => 2,
        9..=11 => 3,
        _ => 4,
    }
}

/// Weather code: mostly clear, occasionally heavy.
fn draw_weather(rng: &mut SimpleRng) -> i64 {
    let u = rng.next_f64();
    if u < 0.65 {
        1
    } else if u < 0.90 {
        2
    } else if u < 0.995 {
        3
    } else {
        4
    }
}

/// Commuter peaks at 8:00 and 17:00 on top of a daytime plateau.
fn hourly_demand(hour: i64) -> f64 {
    let h = hour as f64;
    let peak = |mu: f64, sigma: f64| (-(h - mu).powi(2) / (2.0 * sigma.powi(2))).exp();
    20.0 + 180.0 * peak(13.0, 4.0) + 320.0 * peak(8.0, 1.0) + 420.0 * peak(17.5, 1.3)
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let season_factor = [0.55, 1.05, 1.15, 0.85];
    let weather_factor = [1.0, 0.8, 0.45, 0.1];
    let month_days = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut rows: Vec<HourRow> = Vec::new();
    let mut instant: i64 = 1;

    for yr in 0..2_i64 {
        // Second year grows roughly two thirds, like the real system.
        let year_factor = if yr == 0 { 1.0 } else { 1.65 };
        for (m, &days) in month_days.iter().enumerate() {
            let month = m as i64 + 1;
            let season = season_for_month(month);
            for _day in 0..days {
                for hr in 0..24_i64 {
                    let weathersit = draw_weather(&mut rng);
                    let mean = hourly_demand(hr)
                        * season_factor[(season - 1) as usize]
                        * weather_factor[(weathersit - 1) as usize]
                        * year_factor;
                    let cnt = (mean * (0.7 + 0.6 * rng.next_f64())).round() as i64;
                    let casual_share = 0.1 + 0.15 * rng.next_f64();
                    let casual = (cnt as f64 * casual_share).round() as i64;

                    rows.push(HourRow {
                        instant,
                        yr,
                        mnth: month,
                        hr,
                        season,
                        weathersit,
                        casual,
                        registered: cnt - casual,
                        cnt,
                    });
                    instant += 1;
                }
            }
        }
    }

    // Write CSV
    let csv_path = "hour_analysis.csv";
    let mut writer = csv::Writer::from_path(csv_path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    // Write Parquet with the same columns
    let column = |f: fn(&HourRow) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let names = ["instant", "yr", "mnth", "hr", "season", "weathersit", "casual", "registered", "cnt"];
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(*n, DataType::Int64, false))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(|r| r.instant),
            column(|r| r.yr),
            column(|r| r.mnth),
            column(|r| r.hr),
            column(|r| r.season),
            column(|r| r.weathersit),
            column(|r| r.casual),
            column(|r| r.registered),
            column(|r| r.cnt),
        ],
    )?;

    let parquet_path = "hour_analysis.parquet";
    let file = std::fs::File::create(parquet_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {} hourly rows to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
