use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use search_cluster::{Pipeline, PipelineConfig, SearchResultBatch};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "search-cluster",
    about = "Cluster keyword search results into a topic graph (JSON on stdout)"
)]
struct Cli {
    /// JSON array of search result batches; `-` reads stdin
    #[arg(long, short, default_value = "-")]
    input: String,

    /// JSON config file; absent fields keep their defaults
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Emit the graph together with a per-cluster summary
    #[arg(long)]
    summary: bool,

    /// Override the layout seed
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.embedding = config.embedding.with_seed(seed);
    }

    let raw = read_input(&cli.input)?;
    let batches = match SearchResultBatch::from_json_str(&raw) {
        Ok(batches) => batches,
        Err(err) => {
            tracing::error!(error = %err, "rejected input");
            eprintln!("The search results could not be read.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let pipeline = Pipeline::new(config);
    let output = if cli.summary {
        pipeline.analyze(&batches).map(|a| to_json(&a, cli.pretty))
    } else {
        pipeline.run(&batches).map(|g| to_json(&g, cli.pretty))
    };
    match output {
        Ok(json) => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json?).context("failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            // already logged by the pipeline
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("failed to serialize output")
}
