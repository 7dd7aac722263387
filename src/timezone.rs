use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Converts naive UTC timestamps into a fixed named civil timezone.
///
/// The transcript timestamps carry no offset and are treated as UTC. The
/// conversion goes through the zone's full IANA rule table, so daylight-saving
/// transitions shift both the calendar date and the hour bucket correctly
/// around midnight.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneConverter {
    tz: Tz,
}

impl TimezoneConverter {
    /// An unrecognised zone name is a configuration error, not something to
    /// silently fall back from.
    pub fn new(name: &str) -> Result<Self> {
        let tz = name
            .parse::<Tz>()
            .map_err(|_| anyhow!("unknown timezone: {name}"))?;
        Ok(Self { tz })
    }

    /// Reinterpret a naive UTC timestamp as a local (date, hour) pair.
    ///
    /// The hour is not consumed by the current aggregation but is kept for
    /// hour-of-day breakdowns.
    pub fn to_local(&self, naive_utc: NaiveDateTime) -> (NaiveDate, u32) {
        let local = Utc.from_utc_datetime(&naive_utc).with_timezone(&self.tz);
        (local.date_naive(), local.hour())
    }

    /// Current wall-clock time in the configured zone, for operator notices
    /// and the report footer.
    pub fn now_local(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}
