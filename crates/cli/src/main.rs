mod interactive;
mod metrics;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidpipe_core::pipeline::NoProgress;
use vidpipe_core::{
    load_config, validate_config, Config, PipelineConfig, PipelineServices, SanitizedConfig,
    VideoPipeline,
};

/// Default configuration file, overridden by `--config` or `VIDPIPE_CONFIG`.
const DEFAULT_CONFIG: &str = "vidpipe.toml";

#[derive(Debug, Parser)]
#[command(name = "vidpipe", version, about = "Transcribe, translate and republish a video")]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full pipeline on one file
    Process {
        /// Source media file
        file: PathBuf,

        /// Print the result as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Print Prometheus metrics after the run
        #[arg(long)]
        metrics: bool,
    },
    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so stdout carries progress and results only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var("VIDPIPE_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    if let Some(Command::Config) = cli.command {
        let sanitized = SanitizedConfig::from(&config);
        println!("{}", serde_json::to_string_pretty(&sanitized)?);
        return Ok(ExitCode::SUCCESS);
    }

    validate_config(&config).context("Configuration validation failed")?;
    let pipeline = build_pipeline(&config)?;

    match cli.command {
        Some(Command::Process {
            file,
            json,
            metrics,
        }) => process_once(&pipeline, file, json, metrics).await,
        _ => {
            interactive::run(&pipeline).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_pipeline(config: &Config) -> Result<VideoPipeline> {
    let services = PipelineServices::from_config(config).context("Failed to create services")?;
    info!(
        llm = %config.llm.provider.as_str(),
        model = %config.llm.model,
        container = %config.storage.container,
        output_dir = %config.output.dir.display(),
        "Pipeline ready"
    );
    Ok(VideoPipeline::new(PipelineConfig::from(config), services))
}

async fn process_once(
    pipeline: &VideoPipeline,
    file: PathBuf,
    json: bool,
    metrics: bool,
) -> Result<ExitCode> {
    let result = if json {
        pipeline.run(&file, &NoProgress).await
    } else {
        pipeline.run(&file, &render::print_progress).await
    }
    .with_context(|| format!("Failed to process {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render::summary(&result));
    }

    if metrics {
        print!("{}", metrics::render());
    }

    // A run that stopped at transcription produced nothing usable
    if result.transcribe_error().is_some() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
