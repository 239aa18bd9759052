use super::availability::is_free_for_interval;
use super::types::{OffRunFlags, Reason, TradePolicy, Verdict};
use super::{off_run, rest, weekly};
use crate::model::{PersonId, Shift};
use std::collections::BTreeMap;

/// Hypothetical post-swap schedules. Built fresh for one simulation and
/// discarded; the real schedules are never touched.
struct Swapped {
    a_schedule: Vec<Shift>,
    b_schedule: Vec<Shift>,
    /// Position of the clone each side received.
    a_idx: usize,
    b_idx: usize,
}

impl Swapped {
    fn build(a_schedule: &[Shift], b_schedule: &[Shift], shift_a: &Shift, shift_b: &Shift) -> Self {
        let received_by_a = shift_b.reassigned(shift_a.owner.clone());
        let received_by_b = shift_a.reassigned(shift_b.owner.clone());
        let (a_schedule, a_idx) = insert_swapped(a_schedule, &shift_a.id, received_by_a);
        let (b_schedule, b_idx) = insert_swapped(b_schedule, &shift_b.id, received_by_b);
        Self {
            a_schedule,
            b_schedule,
            a_idx,
            b_idx,
        }
    }

    fn received_by_a(&self) -> &Shift {
        &self.a_schedule[self.a_idx]
    }

    fn received_by_b(&self) -> &Shift {
        &self.b_schedule[self.b_idx]
    }
}

fn insert_swapped(
    schedule: &[Shift],
    give_up: &crate::model::ShiftId,
    receive: Shift,
) -> (Vec<Shift>, usize) {
    let received_id = receive.id.clone();
    let mut out: Vec<Shift> = schedule
        .iter()
        .filter(|s| &s.id != give_up)
        .cloned()
        .collect();
    out.push(receive);
    out.sort_by(|a, b| a.start.cmp(&b.start));
    let idx = out
        .iter()
        .position(|s| s.id == received_id)
        .unwrap_or(out.len() - 1);
    (out, idx)
}

fn schedule_of<'a>(
    schedules: &'a BTreeMap<PersonId, Vec<Shift>>,
    person: &PersonId,
) -> &'a [Shift] {
    schedules.get(person).map(Vec::as_slice).unwrap_or(&[])
}

/// Atomic swap-legality decision for one pair of shifts.
///
/// `shift_a` belongs to the trader (side `A`), `shift_b` to the counterparty
/// (side `B`). Checks run in a fixed order and short-circuit on the first
/// failure; the input schedules are never mutated.
pub fn simulate(
    schedules: &BTreeMap<PersonId, Vec<Shift>>,
    shift_a: &Shift,
    shift_b: &Shift,
    policy: &TradePolicy,
) -> Verdict {
    if !(shift_a.eligible && shift_b.eligible) {
        return Verdict::fail(Reason::IneligibleTitle);
    }
    if shift_a.owner == shift_b.owner {
        return Verdict::fail(Reason::SamePerson);
    }

    let a_schedule = schedule_of(schedules, &shift_a.owner);
    let b_schedule = schedule_of(schedules, &shift_b.owner);

    // Availability before the swap, ignoring the shift each side gives up.
    if !is_free_for_interval(b_schedule, shift_a.start, shift_a.end, Some(&shift_b.id)) {
        return Verdict::fail(Reason::CounterpartyNotFree);
    }
    if !is_free_for_interval(a_schedule, shift_b.start, shift_b.end, Some(&shift_a.id)) {
        return Verdict::fail(Reason::TraderNotFree);
    }

    let swapped = Swapped::build(a_schedule, b_schedule, shift_a, shift_b);

    if !rest::local_rest_ok(&swapped.a_schedule, swapped.a_idx) {
        return Verdict::fail(Reason::TraderRestRule);
    }
    if !rest::local_rest_ok(&swapped.b_schedule, swapped.b_idx) {
        return Verdict::fail(Reason::CounterpartyRestRule);
    }

    if !weekly::weekly_cap_ok(&swapped.a_schedule, swapped.received_by_a(), policy.cap_hours) {
        return Verdict::fail(Reason::TraderWeeklyCap);
    }
    if !weekly::weekly_cap_ok(&swapped.b_schedule, swapped.received_by_b(), policy.cap_hours) {
        return Verdict::fail(Reason::CounterpartyWeeklyCap);
    }

    Verdict::pass()
}

/// Off-run advisory for an accepted pair: would either recipient receive
/// their new shift on a date that, without that shift, sits inside a long
/// off stretch of their post-swap schedule?
///
/// The received shift itself is left out of the start-date set; otherwise
/// its own start date would mask the stretch it lands in.
pub fn advisory_off_run_flags(
    schedules: &BTreeMap<PersonId, Vec<Shift>>,
    shift_a: &Shift,
    shift_b: &Shift,
    policy: &TradePolicy,
) -> OffRunFlags {
    let a_schedule = schedule_of(schedules, &shift_a.owner);
    let b_schedule = schedule_of(schedules, &shift_b.owner);
    let swapped = Swapped::build(a_schedule, b_schedule, shift_a, shift_b);

    let date_for_a = swapped.received_by_a().start.date_naive();
    let date_for_b = swapped.received_by_b().start.date_naive();

    let a_without = without_index(&swapped.a_schedule, swapped.a_idx);
    let b_without = without_index(&swapped.b_schedule, swapped.b_idx);

    OffRunFlags {
        giver_on_off_run: off_run::is_in_long_off_run(&a_without, date_for_a, policy),
        recipient_on_off_run: off_run::is_in_long_off_run(&b_without, date_for_b, policy),
    }
}

fn without_index(schedule: &[Shift], idx: usize) -> Vec<Shift> {
    schedule
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, s)| s.clone())
        .collect()
}
