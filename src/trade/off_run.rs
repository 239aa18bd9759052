use super::types::TradePolicy;
use crate::model::Shift;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Advisory detector for long stretches of consecutive off days.
///
/// A day is "off" when no shift *starts* on it. If `date` is itself a
/// start date it cannot be inside an off-run. Otherwise the maximal run of
/// off days around `date` is measured, bounded by the policy guardrails,
/// and compared against the threshold. Purely advisory: never blocks a swap.
pub fn is_in_long_off_run(schedule: &[Shift], date: NaiveDate, policy: &TradePolicy) -> bool {
    let start_dates: BTreeSet<NaiveDate> =
        schedule.iter().map(|s| s.start.date_naive()).collect();

    if start_dates.contains(&date) {
        return false;
    }

    let mut run_len: i64 = 1;

    let mut d = date;
    loop {
        d -= Duration::days(1);
        if start_dates.contains(&d) {
            break;
        }
        run_len += 1;
        if run_len >= policy.off_run_lookback {
            break;
        }
    }

    let mut d = date;
    loop {
        d += Duration::days(1);
        if start_dates.contains(&d) {
            break;
        }
        run_len += 1;
        if run_len >= policy.off_run_lookahead {
            break;
        }
    }

    run_len >= policy.off_run_threshold
}
