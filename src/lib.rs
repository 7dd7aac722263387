pub mod config;
pub mod ignore;
pub mod parser;
pub mod report;
pub mod stats;
pub mod timezone;

use anyhow::{Context, Result};
use memchr::memchr_iter;
use memmap2::Mmap;
use std::collections::HashSet;
use std::fs::File;
use std::io::ErrorKind;
use tracing::info;

use crate::config::Config;
use crate::parser::LineParser;
use crate::stats::Tallies;
use crate::timezone::TimezoneConverter;

const NOTICE_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Run the whole batch job: load the ignore list, aggregate the transcript,
/// render the three report pages.
///
/// Returns `false` when the transcript does not exist, which ends the run
/// cleanly with no output written; a scheduler re-invoking us later is the
/// retry mechanism.
pub fn generate(config: &Config) -> Result<bool> {
    let tz = TimezoneConverter::new(&config.timezone)?;
    let ignored = ignore::load(config.ignore_file.as_deref())?;

    let file = match File::open(&config.log_file) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "[{}] log file {} is missing, no reports written",
                tz.now_local().format(NOTICE_TIME_FMT),
                config.log_file.display()
            );
            return Ok(false);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to open log file {}", config.log_file.display()));
        }
    };

    // A zero-length file cannot be mmapped; it simply has no records.
    let tallies = if file.metadata()?.len() == 0 {
        Tallies::new()
    } else {
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("failed to mmap log file {}", config.log_file.display()))?;
        aggregate(&mmap, &LineParser::new(tz), &ignored)?
    };

    report::render_all(config, &tz, &tallies)?;
    info!(
        "[{}] stats updated, {} participants across {} days",
        tz.now_local().format(NOTICE_TIME_FMT),
        tallies.participant_count(),
        tallies.days_newest_first().count()
    );
    Ok(true)
}

/// Fold every transcript line into the tallies, in file order.
///
/// Lines are split on `\n` over the raw bytes and decoded individually with
/// lossy UTF-8 replacement, so one undecodable byte never aborts the run.
fn aggregate(bytes: &[u8], parser: &LineParser, ignored: &HashSet<String>) -> Result<Tallies> {
    let mut tallies = Tallies::new();
    let mut lines = 0usize;
    let mut records = 0usize;

    let mut start = 0;
    for nl in memchr_iter(b'\n', bytes) {
        fold_line(&bytes[start..nl], parser, ignored, &mut tallies, &mut records)?;
        lines += 1;
        start = nl + 1;
    }
    if start < bytes.len() {
        fold_line(&bytes[start..], parser, ignored, &mut tallies, &mut records)?;
        lines += 1;
    }

    info!(lines, records, "transcript aggregated");
    Ok(tallies)
}

fn fold_line(
    raw: &[u8],
    parser: &LineParser,
    ignored: &HashSet<String>,
    tallies: &mut Tallies,
    records: &mut usize,
) -> Result<()> {
    let line = String::from_utf8_lossy(raw);
    let Some(parsed) = parser.parse(&line) else {
        return Ok(());
    };
    if ignored.contains(&parsed.nick) {
        return Ok(());
    }
    *records += 1;
    tallies.fold(&parsed)
}
