use super::simulate::{advisory_off_run_flags, simulate};
use super::types::{OffRunFlags, TradePolicy};
use crate::model::{Dataset, PersonId, Shift};
use tracing::debug;

/// One legal counter-shift for a proposed trade.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub counterparty: PersonId,
    pub shift: Shift,
    pub advisory: OffRunFlags,
}

/// Enumerates every legal counter-shift for `trader_shift`.
///
/// Iterates all future shifts not owned by the trader, keeps the pairs the
/// simulator accepts, and attaches the off-run advisory for each. The result
/// is ordered by candidate start, tie-broken by counterparty identity, so an
/// unchanged dataset always yields the identical list.
pub fn find_candidates(
    dataset: &Dataset,
    trader_shift: &Shift,
    policy: &TradePolicy,
) -> Vec<Candidate> {
    let mut out = Vec::new();

    for counter in &dataset.shifts {
        if counter.owner == trader_shift.owner {
            continue;
        }
        let verdict = simulate(&dataset.schedules, trader_shift, counter, policy);
        if !verdict.ok {
            debug!(
                candidate = counter.id.as_str(),
                reason = verdict.reason.as_str(),
                "candidate rejected"
            );
            continue;
        }
        let advisory = advisory_off_run_flags(&dataset.schedules, trader_shift, counter, policy);
        out.push(Candidate {
            counterparty: counter.owner.clone(),
            shift: counter.clone(),
            advisory,
        });
    }

    out.sort_by(|a, b| {
        a.shift
            .start
            .cmp(&b.shift.start)
            .then_with(|| a.counterparty.cmp(&b.counterparty))
    });
    out
}
