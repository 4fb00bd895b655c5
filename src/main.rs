use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use renko_bricks::config::{Config, DEFAULT_CONFIG_PATH};
use renko_bricks::input::read_quotes;
use renko_bricks::model::brick::COLUMN_NAMES;
use renko_bricks::{RenkoEngine, SnapshotFormat};

const USAGE: &str = "usage: renko-bricks [--config PATH] [--format raw|labeled] [--score] [INPUT]";

#[derive(Debug)]
struct CliArgs {
    config: PathBuf,
    format: SnapshotFormat,
    score: bool,
    input: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs {
        config: PathBuf::from(DEFAULT_CONFIG_PATH),
        format: SnapshotFormat::Raw,
        score: false,
        input: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config requires a path")?;
                cli.config = PathBuf::from(path);
            }
            "--format" => {
                let value = iter.next().context("--format requires a value")?;
                cli.format = value.parse::<SnapshotFormat>()?;
            }
            "--score" => cli.score = true,
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with('-') && other != "-" => {
                bail!("unknown option '{}'\n{}", other, USAGE)
            }
            other => {
                if cli.input.is_some() {
                    bail!("only one input file may be given\n{}", USAGE);
                }
                if other != "-" {
                    cli.input = Some(PathBuf::from(other));
                }
            }
        }
    }
    Ok(cli)
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::try_new(&config.logging.level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    let config = Config::load(&cli.config)?;
    init_tracing(&config);

    let quotes = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_quotes(BufReader::new(file))?
        }
        None => read_quotes(io::stdin().lock())?,
    };

    let mut engine = RenkoEngine::new(&config.renko)?;
    let emitted = engine.ingest(&quotes.prices, quotes.dates(), quotes.volumes())?;
    tracing::info!(
        name = ?engine.name(),
        variant = %engine.variant(),
        quotes = quotes.len(),
        bricks = emitted,
        "Quotes converted"
    );

    let output = render(&engine, cli.format, cli.score);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Raw rows are emitted together with their column labels.
fn render(engine: &RenkoEngine, format: SnapshotFormat, score: bool) -> serde_json::Value {
    let mut output = serde_json::json!({ "bricks": engine.snapshot(format) });
    if format == SnapshotFormat::Raw {
        output["columns"] = serde_json::json!(COLUMN_NAMES);
    }
    if score {
        output["performance"] = serde_json::json!(engine.score());
    }
    output
}
