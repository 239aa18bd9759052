#![forbid(unsafe_code)]
use chrono::TimeZone;
use chrono_tz::America::New_York;
use std::collections::BTreeSet;
use tradewatch::model::{Dataset, PersonId, Shift};
use tradewatch::trade::{advisory_off_run_flags, find_candidates, simulate, Reason, TradePolicy};

fn shift(owner: &str, title: &str, day: u32, h0: u32, h1: u32) -> Shift {
    let start = New_York.with_ymd_and_hms(2026, 1, day, h0, 0, 0).unwrap();
    let end = New_York.with_ymd_and_hms(2026, 1, day, h1, 0, 0).unwrap();
    Shift::new(PersonId::new(owner), title.to_string(), start, end).unwrap()
}

fn dataset(shifts: Vec<Shift>) -> Dataset {
    let people: BTreeSet<PersonId> = shifts.iter().map(|s| s.owner.clone()).collect();
    Dataset::from_shifts(people.into_iter().collect(), shifts)
}

#[test]
fn legal_swap_of_parallel_shifts() {
    // Mon Jan 5, identical 07:00-19:00 intervals, two people
    let x = shift("alice", "Day 1", 5, 7, 19);
    let y = shift("bob", "Day 2", 5, 7, 19);
    let ds = dataset(vec![x.clone(), y.clone()]);

    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(verdict.ok);
    assert_eq!(verdict.reason, Reason::Ok);
}

#[test]
fn same_shift_both_sides_is_same_person() {
    let x = shift("alice", "Day 1", 5, 7, 19);
    let ds = dataset(vec![x.clone()]);
    let verdict = simulate(&ds.schedules, &x, &x, &TradePolicy::default());
    assert!(!verdict.ok);
    assert_eq!(verdict.reason, Reason::SamePerson);
}

#[test]
fn excluded_title_blocks_the_pair() {
    let x = shift("alice", "Trauma Day 1", 5, 7, 19);
    let y = shift("bob", "Day 2", 6, 7, 19);
    let ds = dataset(vec![x.clone(), y.clone()]);
    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert_eq!(verdict.reason, Reason::IneligibleTitle);
}

#[test]
fn trader_conflict_fails_on_the_trader_side() {
    // Alice wants to give X away but already works during Y's slot
    let x = shift("alice", "Day 1", 5, 7, 19);
    let z = shift("alice", "E1", 6, 8, 12);
    let y = shift("bob", "Day 2", 6, 7, 19);
    let ds = dataset(vec![x.clone(), z, y.clone()]);

    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(!verdict.ok);
    assert_eq!(verdict.reason, Reason::TraderNotFree);
    assert_eq!(verdict.reason.as_str(), "A-not-free-for-B");
}

#[test]
fn swapping_argument_order_keeps_the_reason_category() {
    let x = shift("alice", "Day 1", 5, 7, 19);
    let z = shift("alice", "E1", 6, 8, 12);
    let y = shift("bob", "Day 2", 6, 7, 19);
    let ds = dataset(vec![x.clone(), z, y.clone()]);

    let ab = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    let ba = simulate(&ds.schedules, &y, &x, &TradePolicy::default());
    assert_eq!(ab.ok, ba.ok);
    assert_eq!(ab.reason.category(), ba.reason.category());
    // prefixes flip between the two directions
    assert_eq!(ab.reason, Reason::TraderNotFree);
    assert_eq!(ba.reason, Reason::CounterpartyNotFree);
}

#[test]
fn rest_rule_rejects_tight_insertion() {
    // Alice keeps a 12h Tuesday shift; the received shift starts one hour
    // after it ends, far less than the 12h the rest rule requires.
    let x = shift("alice", "Day 1", 5, 7, 19);
    let w = shift("alice", "Day 2", 6, 7, 19);
    let y = shift("bob", "Night 1", 6, 20, 23);
    let ds = dataset(vec![x.clone(), w, y.clone()]);

    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(!verdict.ok);
    assert_eq!(verdict.reason, Reason::TraderRestRule);
    assert_eq!(verdict.reason.as_str(), "A-break-rule");
}

#[test]
fn weekly_cap_rejects_overloaded_week() {
    // Alice already works 55h in the week of Mon Jan 5 (five 11h days) and
    // would receive a 12h Saturday shift in that same week: 67h > 60h.
    let mut shifts: Vec<Shift> = (5..=9)
        .map(|d| shift("alice", "Day 1", d, 7, 18))
        .collect();
    let x = shift("alice", "Day 1", 12, 7, 19); // following Monday, given away
    let y = shift("bob", "Day 2", 10, 7, 19);
    shifts.push(x.clone());
    shifts.push(y.clone());
    let ds = dataset(shifts);

    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(!verdict.ok);
    assert_eq!(verdict.reason, Reason::TraderWeeklyCap);
    assert_eq!(verdict.reason.as_str(), "A-weekly-cap");
}

#[test]
fn weekly_cap_allows_a_lighter_week() {
    // Same shape, but only four 11h days: 44h + 12h = 56h <= 60h
    let mut shifts: Vec<Shift> = (5..=8)
        .map(|d| shift("alice", "Day 1", d, 7, 18))
        .collect();
    let x = shift("alice", "Day 1", 12, 7, 19);
    let y = shift("bob", "Day 2", 10, 7, 19);
    shifts.push(x.clone());
    shifts.push(y.clone());
    let ds = dataset(shifts);

    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(verdict.ok, "unexpected reason: {}", verdict.reason);
}

#[test]
fn advisory_flags_received_shift_in_long_off_stretch() {
    // Alice's other shifts start Jan 10 and Jan 17; receiving Bob's Jan 14
    // shift lands mid-stretch (Jan 11..16 has no start for her).
    let x = shift("alice", "Day 1", 5, 7, 19);
    let a2 = shift("alice", "Day 1", 10, 7, 19);
    let a3 = shift("alice", "Day 1", 17, 7, 19);
    let y = shift("bob", "Day 2", 14, 7, 19);
    let ds = dataset(vec![x.clone(), a2, a3, y.clone()]);

    let verdict = simulate(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(verdict.ok, "unexpected reason: {}", verdict.reason);

    let flags = advisory_off_run_flags(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(flags.giver_on_off_run);
    // Bob has nothing else scheduled at all, which is its own long stretch
    assert!(flags.recipient_on_off_run);
    assert!(flags.any());
}

#[test]
fn advisory_stays_quiet_for_dense_schedules() {
    // Alice keeps starts on Jan 7 and Jan 11, so the received Jan 9 shift
    // sits in a run of only three off days
    let x = shift("alice", "Day 1", 5, 7, 19);
    let a2 = shift("alice", "Day 1", 7, 7, 19);
    let a3 = shift("alice", "Day 1", 11, 7, 19);
    let y = shift("bob", "Day 2", 9, 7, 19);
    let ds = dataset(vec![x.clone(), a2, a3, y.clone()]);

    let flags = advisory_off_run_flags(&ds.schedules, &x, &y, &TradePolicy::default());
    assert!(!flags.giver_on_off_run);
}

#[test]
fn candidate_search_is_ordered_and_idempotent() {
    let x = shift("alice", "Day 1", 5, 7, 19);
    let y1 = shift("bob", "Day 2", 6, 7, 19);
    let y2 = shift("bob", "Day 2", 7, 7, 19);
    let z = shift("carol", "Day 3", 6, 7, 19);
    let ds = dataset(vec![x.clone(), y1.clone(), y2.clone(), z.clone()]);

    let first = find_candidates(&ds, &x, &TradePolicy::default());
    let again = find_candidates(&ds, &x, &TradePolicy::default());

    let ids: Vec<_> = first.iter().map(|c| c.shift.id.clone()).collect();
    let ids_again: Vec<_> = again.iter().map(|c| c.shift.id.clone()).collect();
    assert_eq!(ids, ids_again);

    // ascending by start, ties broken by counterparty identity
    assert_eq!(ids, vec![y1.id, z.id, y2.id]);
    assert_eq!(first[0].counterparty, PersonId::new("bob"));
    assert_eq!(first[1].counterparty, PersonId::new("carol"));
}

#[test]
fn candidates_never_include_the_traders_own_shifts() {
    let x = shift("alice", "Day 1", 5, 7, 19);
    let a2 = shift("alice", "Day 2", 12, 7, 19);
    let y = shift("bob", "Day 2", 6, 7, 19);
    let ds = dataset(vec![x.clone(), a2, y]);

    let found = find_candidates(&ds, &x, &TradePolicy::default());
    assert!(found.iter().all(|c| c.counterparty != PersonId::new("alice")));
}
