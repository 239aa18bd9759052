use crate::clock;
use crate::model::Shift;

/// Weekly-hour ceiling for the calendar week receiving the inserted shift.
///
/// The week is the Monday-anchored local week containing `inserted.start`.
/// Membership is by start instant only: a shift starting Sunday night and
/// ending Monday morning counts wholly toward the earlier week (known policy
/// quirk, kept as-is).
pub fn weekly_cap_ok(post_swap: &[Shift], inserted: &Shift, cap_hours: f64) -> bool {
    let week = clock::week_start(inserted.start.date_naive());
    let total: f64 = post_swap
        .iter()
        .filter(|s| clock::week_start(s.start.date_naive()) == week)
        .map(Shift::duration_hours)
        .sum();
    total <= cap_hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonId;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn shift(day: u32, h0: u32, h1: u32) -> Shift {
        let start = New_York.with_ymd_and_hms(2026, 1, day, h0, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2026, 1, day, h1, 0, 0).unwrap();
        Shift::new(PersonId::new("alice"), "Day 1".into(), start, end).unwrap()
    }

    #[test]
    fn under_cap_passes() {
        // Mon Jan 5 .. Fri Jan 9, 11h each: 55h
        let sched: Vec<Shift> = (5..=9).map(|d| shift(d, 7, 18)).collect();
        assert!(weekly_cap_ok(&sched, &sched[0], 60.0));
    }

    #[test]
    fn exceeding_cap_fails() {
        // 55h plus a received 12h Saturday shift: 67h > 60h
        let mut sched: Vec<Shift> = (5..=9).map(|d| shift(d, 7, 18)).collect();
        sched.push(shift(10, 7, 19));
        let inserted = sched[5].clone();
        assert!(!weekly_cap_ok(&sched, &inserted, 60.0));
    }

    #[test]
    fn only_the_receiving_week_counts() {
        // heavy previous week, inserted shift the following Monday
        let mut sched: Vec<Shift> = (5..=9).map(|d| shift(d, 6, 19)).collect();
        sched.push(shift(12, 7, 19));
        let inserted = sched[5].clone();
        assert!(weekly_cap_ok(&sched, &inserted, 60.0));
    }

    #[test]
    fn exactly_at_cap_passes() {
        // five 12h shifts: 60h, not over
        let sched: Vec<Shift> = (5..=9).map(|d| shift(d, 7, 19)).collect();
        assert!(weekly_cap_ok(&sched, &sched[4], 60.0));
    }
}
