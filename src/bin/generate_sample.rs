use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in launch order, with their success probability and
/// typical payload ceiling (kg).
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 0.2, 700.0),
    ("v1.1", 0.35, 4500.0),
    ("FT", 0.75, 9600.0),
    ("B4", 0.6, 7000.0),
    ("B5", 0.95, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const LAUNCHES_PER_BOOSTER: usize = 12;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut flight: Vec<i64> = Vec::new();
    let mut site: Vec<&str> = Vec::new();
    let mut outcome: Vec<i64> = Vec::new();
    let mut payload: Vec<f64> = Vec::new();
    let mut booster: Vec<&str> = Vec::new();

    for (category, p_success, max_payload) in BOOSTERS {
        for _ in 0..LAUNCHES_PER_BOOSTER {
            flight.push(flight.len() as i64 + 1);
            site.push(*rng.pick(&SITES));
            outcome.push(i64::from(rng.next_f64() < p_success));
            payload.push((rng.next_f64() * max_payload).round());
            booster.push(category);
        }
    }

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(flight.clone())),
            Arc::new(StringArray::from(site.clone())),
            Arc::new(Int64Array::from(outcome.clone())),
            Arc::new(Float64Array::from(payload.clone())),
            Arc::new(StringArray::from(booster.clone())),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_launches.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    // ---- CSV ----
    let csv_path = "sample_launches.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    csv_writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for i in 0..flight.len() {
        csv_writer.write_record([
            flight[i].to_string(),
            site[i].to_string(),
            outcome[i].to_string(),
            format!("{:.1}", payload[i]),
            booster[i].to_string(),
        ])?;
    }
    csv_writer.flush()?;

    println!(
        "Wrote {} launches to {parquet_path} and {csv_path}",
        flight.len()
    );
    Ok(())
}
