use crate::parser::ParsedLine;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// The two word-count tallies built by one run.
///
/// `total` spans the whole transcript; `daily` is the same data bucketed by
/// local calendar date. For every participant the daily counts sum to the
/// total count.
#[derive(Debug, Default)]
pub struct Tallies {
    total: HashMap<String, u64>,
    daily: BTreeMap<NaiveDate, HashMap<String, u64>>,
}

impl Tallies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed, non-ignored line into both tallies.
    ///
    /// Counts are added with `checked_add`; wrapping around on absurd input
    /// would corrupt the report silently, so overflow aborts the run instead.
    pub fn fold(&mut self, line: &ParsedLine) -> Result<()> {
        checked_bump(&mut self.total, &line.nick, line.word_count)?;
        checked_bump(
            self.daily.entry(line.local_date).or_default(),
            &line.nick,
            line.word_count,
        )
    }

    pub fn total(&self) -> &HashMap<String, u64> {
        &self.total
    }

    /// Per-day tallies, most recent date first.
    pub fn days_newest_first(
        &self,
    ) -> impl Iterator<Item = (&NaiveDate, &HashMap<String, u64>)> {
        self.daily.iter().rev()
    }

    pub fn participant_count(&self) -> usize {
        self.total.len()
    }
}

fn checked_bump(counts: &mut HashMap<String, u64>, nick: &str, words: u64) -> Result<()> {
    let slot = counts.entry(nick.to_string()).or_insert(0);
    *slot = slot
        .checked_add(words)
        .ok_or_else(|| anyhow!("word count overflow for nick {nick}"))?;
    Ok(())
}

/// Rank a tally as (nick, count) pairs, highest count first.
///
/// Ties break on nick so the rendering order is deterministic across runs.
pub fn ranked(counts: &HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut rows: Vec<(&str, u64)> = counts.iter().map(|(n, c)| (n.as_str(), *c)).collect();
    rows.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}
