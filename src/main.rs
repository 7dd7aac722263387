use anyhow::Result;
use chanstats::config::{Config, Overrides};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional JSON config file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel transcript to aggregate
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Newline-delimited list of nicks to exclude
    #[arg(short, long)]
    ignore_file: Option<PathBuf>,

    /// Directory the HTML pages are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Leaderboard size
    #[arg(long)]
    top_n: Option<usize>,

    /// IANA timezone the daily buckets are computed in
    #[arg(long)]
    timezone: Option<String>,

    /// Channel label shown in the page header
    #[arg(long)]
    channel: Option<String>,

    /// Network label shown in the page header
    #[arg(long)]
    network: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::resolve(
        args.config.as_deref(),
        Overrides {
            log_file: args.log_file,
            ignore_file: args.ignore_file,
            output_dir: args.output_dir,
            top_n: args.top_n,
            timezone: args.timezone,
            channel: args.channel,
            network: args.network,
        },
    )?;

    chanstats::generate(&config)?;
    Ok(())
}
