mod script;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use rankset::{IntDoubleHash, RegistryConfig};
use script::{replay, Crew, Op, OpResult};

/// Replay disjoint-set operation scripts and print the results as JSON
#[derive(Parser)]
#[command(name = "rankset", version)]
struct Args {
    /// Script files: JSON arrays of operations
    #[arg(required = true)]
    scripts: Vec<String>,

    /// Initial registry capacity (rounded up to a prime)
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Load factor that triggers a registry resize
    #[arg(short, long)]
    load_factor: Option<f64>,

    /// TOML file with registry settings; flags override it
    #[arg(long)]
    config: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Serialize)]
struct OutputScript {
    file: String,
    results: Vec<OpResult>,
}

fn load_config(args: &Args) -> Result<RegistryConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {path}"))?;
            RegistryConfig::from_toml_str(&text)
                .with_context(|| format!("invalid config: {path}"))?
        }
        None => RegistryConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.initial_capacity = capacity;
    }
    if let Some(load_factor) = args.load_factor {
        config.max_load_factor = load_factor;
    }
    config.validate()?;
    Ok(config)
}

fn load_script(path: &str) -> Result<Vec<Op>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read script: {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("invalid script: {path}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    for path in &args.scripts {
        let ops = load_script(path)?;

        if !args.quiet {
            eprintln!("replaying {} ({} ops)", path, ops.len());
        }

        let mut crew = Crew::with_config(config.clone(), IntDoubleHash)?;
        let results = replay(&mut crew, &ops);

        if !args.quiet {
            let failed = results.iter().filter(|r| r.error.is_some()).count();
            eprintln!(
                "  {} elements in {} sets, {} failed ops",
                crew.len(),
                crew.set_count(),
                failed
            );
        }

        let output = OutputScript {
            file: path.clone(),
            results,
        };
        let json = if args.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{json}");
    }

    Ok(())
}
