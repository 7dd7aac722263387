use crate::timezone::TimezoneConverter;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

// Limnoria ChannelLogger message line:
//   2026-02-09T03:06:16  <StrumpaN> Ska du ha kaffe?
// Join/part/notice lines have no bracketed nick and fall through.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})\s+<([^>]+)>(?:\s+(.*))?$")
        .unwrap()
});

/// One transcript line reduced to its aggregation key and metric.
///
/// The nick is already case-folded; mixed-case variants of one nickname on the
/// wire count as a single participant. `local_hour` is carried for hour-of-day
/// breakdowns even though the daily tally keys only on the date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub local_date: NaiveDate,
    pub local_hour: u32,
    pub nick: String,
    pub word_count: u64,
}

pub struct LineParser {
    tz: TimezoneConverter,
}

impl LineParser {
    pub fn new(tz: TimezoneConverter) -> Self {
        Self { tz }
    }

    /// Parse one raw transcript line.
    ///
    /// `None` means "not a message record" (system lines, blank lines,
    /// malformed or calendar-invalid timestamps) and is an expected outcome,
    /// not an error. An empty message is still a record, with word count 0.
    pub fn parse(&self, raw: &str) -> Option<ParsedLine> {
        let line = raw.trim_end_matches(['\r', '\n']);
        let caps = LINE_RE.captures(line)?;

        // The regex only checks digit shape; chrono rejects month 13, hour 25
        // and friends, which demotes the line to "not a record".
        let date = NaiveDate::from_ymd_opt(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?)?;
        let time = NaiveTime::from_hms_opt(field(&caps, 4)?, field(&caps, 5)?, field(&caps, 6)?)?;
        let (local_date, local_hour) = self.tz.to_local(NaiveDateTime::new(date, time));

        let nick = caps[7].to_lowercase();
        let word_count = caps
            .get(8)
            .map_or(0, |m| m.as_str().split_whitespace().count()) as u64;

        Some(ParsedLine {
            local_date,
            local_hour,
            nick,
            word_count,
        })
    }
}

fn field<T: FromStr>(caps: &regex::Captures<'_>, index: usize) -> Option<T> {
    caps[index].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LineParser {
        LineParser::new(TimezoneConverter::new("Europe/Stockholm").unwrap())
    }

    #[test]
    fn parses_a_message_line() {
        let line = parser()
            .parse("2026-02-09T10:00:00  <StrumpaN> Ska du ha kaffe?")
            .unwrap();
        assert_eq!(line.local_date, NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
        assert_eq!(line.local_hour, 11);
        assert_eq!(line.nick, "strumpan");
        assert_eq!(line.word_count, 4);
    }

    #[test]
    fn parse_is_pure() {
        let p = parser();
        let raw = "2026-02-09T10:00:00 <Ann> hi there";
        assert_eq!(p.parse(raw), p.parse(raw));
    }

    #[test]
    fn nick_is_case_folded() {
        let p = parser();
        let a = p.parse("2026-02-09T10:00:00 <Bob> hello").unwrap();
        let b = p.parse("2026-02-09T10:01:00 <BOB> hello").unwrap();
        assert_eq!(a.nick, "bob");
        assert_eq!(b.nick, "bob");
    }

    #[test]
    fn empty_message_is_a_record_with_zero_words() {
        let line = parser().parse("2026-02-09T10:00:00 <Ann>").unwrap();
        assert_eq!(line.word_count, 0);
        let line = parser().parse("2026-02-09T10:00:00 <Ann>   ").unwrap();
        assert_eq!(line.word_count, 0);
    }

    #[test]
    fn non_record_lines_are_skipped() {
        let p = parser();
        assert_eq!(p.parse("this is not a log line"), None);
        assert_eq!(p.parse(""), None);
        assert_eq!(p.parse("2026-02-09T10:00:00  *** Ann has joined #channel"), None);
    }

    #[test]
    fn calendar_invalid_timestamps_are_not_records() {
        let p = parser();
        assert_eq!(p.parse("2026-13-09T10:00:00 <Ann> hi"), None);
        assert_eq!(p.parse("2026-02-30T10:00:00 <Ann> hi"), None);
        assert_eq!(p.parse("2026-02-09T25:00:00 <Ann> hi"), None);
    }

    #[test]
    fn trailing_carriage_return_is_tolerated() {
        let line = parser().parse("2026-02-09T10:00:00 <Ann> hi there\r").unwrap();
        assert_eq!(line.word_count, 2);
    }

    #[test]
    fn utc_evening_buckets_to_next_local_day() {
        let line = parser().parse("2026-02-09T23:30:00 <Ann> god natt").unwrap();
        assert_eq!(line.local_date, NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert_eq!(line.local_hour, 0);
    }
}
