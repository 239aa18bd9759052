use crate::model::{Shift, ShiftId};
use chrono::DateTime;
use chrono_tz::Tz;

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
pub(super) fn overlaps(
    a_start: DateTime<Tz>,
    a_end: DateTime<Tz>,
    b_start: DateTime<Tz>,
    b_end: DateTime<Tz>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// True iff no shift in the schedule overlaps the interval.
///
/// `exclude` names the shift being given away in a simulation; it must not
/// count as a conflict against the shift being received.
pub fn is_free_for_interval(
    schedule: &[Shift],
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    exclude: Option<&ShiftId>,
) -> bool {
    !schedule.iter().any(|s| {
        exclude != Some(&s.id) && overlaps(s.start, s.end, start, end)
    })
}
