use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epg_series::{config::Config, process_guide, sources::InputSource};

#[derive(Parser)]
#[command(name = "epg-series")]
#[command(version)]
#[command(about = "Download/modify XMLTV to ensure category 'series' and xmltv_ns episode numbers on each programme")]
#[command(long_about = None)]
struct Cli {
    /// Source URL to download XMLTV
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Local XMLTV input file instead of URL
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output XML file path [default: open-epg_series.xml]
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (overrides config; RUST_LOG takes precedence over both)
    #[arg(short = 'v', long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging.level);
    debug!("Effective configuration: {:?}", config);

    let source = match InputSource::select(cli.url, cli.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            return ExitCode::FAILURE;
        }
    };
    let output = cli.output.unwrap_or_else(|| config.output.path_buf());

    match process_guide(&source, output, &config).await {
        Ok(report) => {
            println!("{}", report.summary_line());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

fn init_logging(level: &str) {
    let log_filter = format!("epg_series={level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
