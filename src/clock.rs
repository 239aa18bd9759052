//! Instant normalization into the operative timezone.
//!
//! Every timestamp compared anywhere downstream goes through [`normalize`]:
//! minute-floored, tagged with the operative zone. Mixing normalized and raw
//! instants would break the overlap and gap arithmetic.

use anyhow::{bail, Context, Result};
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

/// Default operative timezone.
pub const DEFAULT_TZ: Tz = chrono_tz::America::New_York;

/// A raw calendar timestamp before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStamp {
    /// Bare calendar date; becomes local midnight.
    Date(NaiveDate),
    /// Zone-naive timestamp; interpreted as already being in the operative zone.
    Local(NaiveDateTime),
    /// Zone-aware timestamp; converted to the operative zone.
    Zoned(DateTime<FixedOffset>),
}

/// Parses RFC3339 first, then `%Y-%m-%dT%H:%M:%S`, then a bare `%Y-%m-%d`.
pub fn parse_stamp(raw: &str) -> Result<RawStamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(RawStamp::Zoned(dt));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(RawStamp::Local(naive));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date/datetime: {raw}"))?;
    Ok(RawStamp::Date(date))
}

/// Canonical zoned instant for a raw stamp: operative zone, whole minutes.
pub fn normalize(stamp: &RawStamp, tz: Tz) -> Result<DateTime<Tz>> {
    let zoned = match stamp {
        RawStamp::Date(d) => local_midnight(*d, tz)?,
        RawStamp::Local(naive) => resolve_local(*naive, tz)?,
        RawStamp::Zoned(dt) => dt.with_timezone(&tz),
    };
    Ok(floor_to_minute(zoned))
}

/// Drops seconds and sub-second components.
pub fn floor_to_minute(dt: DateTime<Tz>) -> DateTime<Tz> {
    let trim = Duration::seconds(i64::from(dt.second()))
        + Duration::nanoseconds(i64::from(dt.nanosecond()));
    dt - trim
}

/// Maps a naive local time into the zone. Ambiguous times (DST fall-back)
/// resolve to the earliest mapping; nonexistent times are an error the
/// builder treats as a malformed event.
fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => bail!("nonexistent local time {naive} in {tz}"),
    }
}

pub fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>> {
    resolve_local(date.and_time(NaiveTime::MIN), tz)
}

/// Start of the next calendar day (tomorrow 00:00) in the operative zone.
/// Only shifts starting on or after this instant are retained.
pub fn future_cutoff(now: DateTime<Utc>, tz: Tz) -> Result<DateTime<Tz>> {
    let today = now.with_timezone(&tz).date_naive();
    local_midnight(today + Duration::days(1), tz)
}

/// Most recent Monday at or before the given local date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
