use crate::model::Shift;

/// Localized, self-referential rest rule around one inserted shift.
///
/// Only the immediate neighbors are examined, so the check stays O(1) no
/// matter how long the schedule is:
/// - gap(prev end → inserted start) must cover prev's own duration,
/// - gap(inserted end → next start) must cover the inserted shift's duration.
///
/// A missing neighbor trivially satisfies its half. Must be recomputed
/// whenever the schedule around the insertion point changes.
pub fn local_rest_ok(sorted: &[Shift], idx: usize) -> bool {
    let cur = &sorted[idx];

    if idx > 0 {
        let prev = &sorted[idx - 1];
        if cur.start - prev.end < prev.duration() {
            return false;
        }
    }

    if let Some(next) = sorted.get(idx + 1) {
        if next.start - cur.end < cur.duration() {
            return false;
        }
    }

    true
}
