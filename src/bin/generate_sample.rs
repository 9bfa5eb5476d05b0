use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use esci_toolkit::data::model::Results;
use esci_toolkit::report::EvalMetrics;

/// Write a set of sample resource files and training curves.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", version, about)]
struct Cli {
    /// Output directory (created if missing)
    #[arg(default_value = "sample_data")]
    out_dir: PathBuf,

    /// Number of epochs per curve
    #[arg(short, long, default_value_t = 20)]
    epochs: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Saturating learning curve: `start` at epoch 0 approaching `ceiling`.
fn learning_curve(epochs: usize, start: f64, ceiling: f64, tau: f64, rng: &mut SimpleRng) -> Vec<f64> {
    (0..epochs)
        .map(|epoch| {
            let clean = ceiling - (ceiling - start) * (-(epoch as f64) / tau).exp();
            (clean + rng.gauss(0.0, 0.005)).clamp(0.0, 1.0)
        })
        .collect()
}

fn write(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);
    let dir = cli.out_dir.as_path();

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write(dir, "queries.txt", "running shoes\n\nwireless earbuds\nstanding desk\n")?;
    write(
        dir,
        "pid2text.tsv",
        "B000001\tLightweight running shoe, breathable mesh\n\
         B000002\tNoise cancelling wireless earbuds\n\
         malformed line without a tab\n\
         B000003\tAdjustable standing desk\twith memory presets\n",
    )?;
    write(
        dir,
        "classes.tsv",
        "0\tExact\n1\tSubstitute\n2\tComplement\n3\tIrrelevant\n",
    )?;
    write(
        dir,
        "keywords.txt",
        "shoes:running,trail, sneakers\naudio:earbuds,headphones\nfurniture:\n",
    )?;
    write(dir, "class_graph.tsv", "0\t1\n0\t2\n1\t3\n0\t1\n")?;

    // Training curves for three models on both splits
    let models = [
        ("mlp_partial", 0.55, 0.78, 4.0),
        ("mlp_full", 0.50, 0.82, 6.0),
        ("cross_encoder", 0.60, 0.88, 3.0),
    ];
    let mut results = Results::new();
    for (split, offset) in [("valid", 0.0), ("test", -0.015)] {
        let by_model: BTreeMap<String, Vec<f64>> = models
            .iter()
            .map(|&(name, start, ceiling, tau)| {
                let curve = learning_curve(cli.epochs, start, ceiling + offset, tau, &mut rng);
                (name.to_string(), curve)
            })
            .collect();
        results.insert(split.to_string(), by_model);
    }
    let results_json = serde_json::to_string_pretty(&results).context("serialising results")?;
    write(dir, "results.json", &results_json)?;

    let per_class: BTreeMap<u8, f64> = [(0, 0.91), (1, 0.47), (2, 0.22), (3, 0.63)]
        .into_iter()
        .collect();
    let metrics = EvalMetrics::new(0.7421, 0.5512).with_per_class(per_class);
    let metrics_json = serde_json::to_string_pretty(&metrics).context("serialising metrics")?;
    write(dir, "metrics.json", &metrics_json)?;

    println!(
        "Wrote sample resources and {} epochs of curves to {}",
        cli.epochs,
        dir.display()
    );
    Ok(())
}
