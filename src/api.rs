//! Downstream consumer contract over an explicit dataset snapshot.
//!
//! The engine holds no state: every operation is a pure function of the
//! dataset it is handed, so concurrent requests over the same snapshot need
//! no coordination.

use crate::model::{Dataset, PersonId, ShiftId, ShiftView};
use crate::trade::{self, OffRunFlags, Reason, TradeError, TradePolicy, Verdict};
use serde::Serialize;

/// Everything a consumer needs to render the future roster.
#[derive(Debug, Clone, Serialize)]
pub struct FutureShifts {
    pub people: Vec<PersonId>,
    pub shifts: Vec<ShiftView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub counterparty: PersonId,
    pub counterparty_shift: ShiftView,
    pub reason: Reason,
    pub advisory: OffRunFlags,
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeOptions {
    pub trader_shift: ShiftView,
    pub candidates: Vec<CandidateView>,
}

pub fn list_future_shifts(dataset: &Dataset) -> FutureShifts {
    FutureShifts {
        people: dataset.people.clone(),
        shifts: dataset.shifts.iter().map(ShiftView::from).collect(),
    }
}

/// Legal counter-shifts for a shift the trader wants to give away.
///
/// Fails with [`TradeError::UnknownPerson`] when `owner` is not on the
/// roster, [`TradeError::ShiftNotFound`] when the id does not resolve to a
/// future shift owned by `owner`, and [`TradeError::NotTradable`] when the
/// trader's own shift is ineligible; all are input-contract violations, not
/// rule verdicts.
pub fn find_trade_candidates(
    dataset: &Dataset,
    owner: &PersonId,
    shift_id: &ShiftId,
    policy: &TradePolicy,
) -> Result<TradeOptions, TradeError> {
    if !dataset.people.contains(owner) {
        return Err(TradeError::UnknownPerson(owner.as_str().to_string()));
    }
    let trader_shift = dataset
        .find_owned_shift(owner, shift_id)
        .ok_or_else(|| TradeError::ShiftNotFound(shift_id.as_str().to_string()))?;
    if !trader_shift.eligible {
        return Err(TradeError::NotTradable(trader_shift.title.clone()));
    }

    let candidates = trade::find_candidates(dataset, trader_shift, policy)
        .into_iter()
        .map(|c| CandidateView {
            counterparty: c.counterparty,
            counterparty_shift: ShiftView::from(&c.shift),
            reason: Reason::Ok,
            advisory: c.advisory,
        })
        .collect();

    Ok(TradeOptions {
        trader_shift: ShiftView::from(trader_shift),
        candidates,
    })
}

/// Final recheck of one pair, e.g. right before an offer is sent. Upstream
/// data may have changed since the search: either id failing to resolve is
/// [`TradeError::ShiftNotFound`].
pub fn recheck_swap(
    dataset: &Dataset,
    shift_id_a: &ShiftId,
    shift_id_b: &ShiftId,
    policy: &TradePolicy,
) -> Result<Verdict, TradeError> {
    let shift_a = dataset
        .find_shift(shift_id_a)
        .ok_or_else(|| TradeError::ShiftNotFound(shift_id_a.as_str().to_string()))?;
    let shift_b = dataset
        .find_shift(shift_id_b)
        .ok_or_else(|| TradeError::ShiftNotFound(shift_id_b.as_str().to_string()))?;
    Ok(trade::simulate(
        &dataset.schedules,
        shift_a,
        shift_b,
        policy,
    ))
}
