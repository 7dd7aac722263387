use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved run configuration. Built once at startup and passed by reference;
/// there is no global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Transcript to aggregate.
    pub log_file: PathBuf,
    /// Optional newline-delimited list of nicks to exclude.
    pub ignore_file: Option<PathBuf>,
    /// Where the three report pages are written.
    pub output_dir: PathBuf,
    /// Leaderboard size for the top list and the per-day tables.
    pub top_n: usize,
    /// IANA zone the UTC timestamps are bucketed in.
    pub timezone: String,
    /// Display labels for the page header.
    pub channel: String,
    pub network: String,
}

/// Values taken from the command line; each one beats the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub log_file: Option<PathBuf>,
    pub ignore_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub timezone: Option<String>,
    pub channel: Option<String>,
    pub network: Option<String>,
}

/// On-disk shape of the JSON config file. Everything is optional there; the
/// merge in [`Config::resolve`] fills in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    log_file: Option<PathBuf>,
    ignore_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    top_n: Option<usize>,
    timezone: Option<String>,
    channel: Option<String>,
    network: Option<String>,
}

impl RawConfig {
    fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

impl Config {
    pub fn resolve(config_file: Option<&Path>, cli: Overrides) -> Result<Self> {
        let raw = match config_file {
            Some(path) => RawConfig::from_file(path)?,
            None => RawConfig::default(),
        };

        let log_file = cli
            .log_file
            .or(raw.log_file)
            .context("no log file given (use --log-file or set log_file in the config file)")?;

        Ok(Self {
            log_file,
            ignore_file: cli.ignore_file.or(raw.ignore_file),
            output_dir: cli
                .output_dir
                .or(raw.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            top_n: cli.top_n.or(raw.top_n).unwrap_or(10),
            timezone: cli
                .timezone
                .or(raw.timezone)
                .unwrap_or_else(|| "Europe/Stockholm".to_string()),
            channel: cli.channel.or(raw.channel).unwrap_or_else(|| "#channel".to_string()),
            network: cli.network.or(raw.network).unwrap_or_else(|| "Network".to_string()),
        })
    }
}
