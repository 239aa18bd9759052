//! Schedule builder: raw events in, validated future dataset out.
//!
//! Individual malformed events and entire failing sources are skipped with a
//! warning; the build always yields a partial result, never a hard failure
//! for one bad feed.

use crate::clock;
use crate::ingest::{EventSource, RawEvent};
use crate::model::{Dataset, PersonId, Shift};
use anyhow::Result;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use std::collections::BTreeSet;
use tracing::warn;

/// Builds the normalized dataset from every source.
///
/// Retains only shifts with a non-empty interval whose start is on or after
/// `cutoff`. Every source's person appears in `Dataset::people` even when
/// the fetch fails or yields nothing.
pub fn build<S: EventSource>(sources: &[S], cutoff: DateTime<Tz>, tz: Tz) -> Dataset {
    let mut names: BTreeSet<PersonId> = BTreeSet::new();
    let mut flat: Vec<Shift> = Vec::new();

    for source in sources {
        names.insert(PersonId::new(source.person()));
        let events = match source.fetch() {
            Ok(events) => events,
            Err(err) => {
                warn!(person = source.person(), error = %err, "source fetch failed, skipping");
                continue;
            }
        };
        for event in &events {
            match build_shift(source.person(), event, cutoff, tz) {
                Ok(Some(shift)) => flat.push(shift),
                Ok(None) => {} // filtered: no start, empty interval, or in the past
                Err(err) => {
                    warn!(person = source.person(), error = %err, "skipping malformed event");
                }
            }
        }
    }

    Dataset::from_shifts(names.into_iter().collect(), flat)
}

/// One event to one shift. `Ok(None)` is a silent filter, `Err` a malformed
/// event worth a warning.
fn build_shift(
    person: &str,
    event: &RawEvent,
    cutoff: DateTime<Tz>,
    tz: Tz,
) -> Result<Option<Shift>> {
    let Some(raw_start) = event.start.as_deref() else {
        return Ok(None);
    };
    let start = clock::normalize(&clock::parse_stamp(raw_start)?, tz)?;

    let end = match event.end.as_deref() {
        Some(raw_end) => clock::normalize(&clock::parse_stamp(raw_end)?, tz)?,
        None => {
            let span = event
                .duration_minutes
                .map(Duration::minutes)
                .unwrap_or_else(|| Duration::hours(1));
            clock::floor_to_minute(start + span)
        }
    };

    if end <= start {
        return Ok(None);
    }
    if start < cutoff {
        return Ok(None);
    }

    let shift = Shift::new(PersonId::new(person), event.title.clone(), start, end)
        .map_err(anyhow::Error::msg)?;
    Ok(Some(shift))
}
