use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write a synthetic Palmer-Penguins-shaped dataset to Parquet.
#[derive(Debug, Parser)]
struct Args {
    /// Number of penguins to generate.
    #[arg(long, default_value_t = 344)]
    rows: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "sample_penguins.parquet")]
    output: PathBuf,
}

/// Per-species means and standard deviations of
/// (bill length, bill depth, flipper length, body mass).
struct SpeciesProfile {
    name: &'static str,
    islands: &'static [&'static str],
    share: f64,
    mean: [f64; 4],
    std_dev: [f64; 4],
}

static PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        name: "Adelie",
        islands: &["Torgersen", "Biscoe", "Dream"],
        share: 0.44,
        mean: [38.8, 18.3, 190.0, 3700.0],
        std_dev: [2.7, 1.2, 6.5, 460.0],
    },
    SpeciesProfile {
        name: "Gentoo",
        islands: &["Biscoe"],
        share: 0.36,
        mean: [47.5, 15.0, 217.2, 5076.0],
        std_dev: [3.1, 1.0, 6.5, 504.0],
    },
    SpeciesProfile {
        name: "Chinstrap",
        islands: &["Dream"],
        share: 0.20,
        mean: [48.8, 18.4, 195.8, 3733.0],
        std_dev: [3.3, 1.1, 7.1, 384.0],
    },
];

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round_to(v: f64, step: f64) -> f64 {
    (v / step).round() * step
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut species = Vec::with_capacity(args.rows);
    let mut island = Vec::with_capacity(args.rows);
    let mut measures: [Vec<Option<f64>>; 4] = Default::default();
    let mut sex: Vec<Option<&str>> = Vec::with_capacity(args.rows);
    let mut year = Vec::with_capacity(args.rows);

    for _ in 0..args.rows {
        let draw = rng.next_f64();
        let mut acc = 0.0;
        let profile = PROFILES
            .iter()
            .find(|p| {
                acc += p.share;
                draw < acc
            })
            .unwrap_or(&PROFILES[2]);

        let is_male = rng.next_f64() < 0.5;
        // Males run a little larger across every measurement.
        let shift = if is_male { 0.6 } else { -0.6 };
        // About 1 in 150 rows has no measurements at all, like the real data.
        let unmeasured = rng.next_f64() < 1.0 / 150.0;

        let steps = [0.1, 0.1, 1.0, 25.0];
        for (i, column) in measures.iter_mut().enumerate() {
            let value = rng.gauss(profile.mean[i] + shift * profile.std_dev[i], profile.std_dev[i]);
            column.push((!unmeasured).then(|| round_to(value, steps[i])));
        }

        species.push(profile.name);
        island.push(*rng.pick(profile.islands));
        sex.push(if unmeasured || rng.next_f64() < 0.03 {
            None
        } else if is_male {
            Some("male")
        } else {
            Some("female")
        });
        year.push(*rng.pick(&[2007i64, 2008, 2009]));
    }

    let [bill_length, bill_depth, flipper_length, body_mass] = measures;

    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(species)),
            Arc::new(StringArray::from(island)),
            Arc::new(Float64Array::from(bill_length)),
            Arc::new(Float64Array::from(bill_depth)),
            Arc::new(Float64Array::from(flipper_length)),
            Arc::new(Float64Array::from(body_mass)),
            Arc::new(StringArray::from(sex)),
            Arc::new(Int64Array::from(year)),
        ],
    )
    .context("building record batch")?;

    // Write Parquet
    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!("{}", pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])?);
    println!("Wrote {} penguins to {}", args.rows, args.output.display());
    Ok(())
}
