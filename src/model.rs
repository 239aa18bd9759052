use crate::eligibility;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strong identifier for a roster member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strong identifier for a shift.
///
/// Derived deterministically from `(owner, start, end, title)`: identical
/// logical shifts always produce identical ids, and a re-owned clone always
/// produces a different id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }

    /// Stable structured key: `owner|start|end|title-hash`.
    pub fn derive(owner: &PersonId, start: &DateTime<Tz>, end: &DateTime<Tz>, title: &str) -> Self {
        Self(format!(
            "{}|{}|{}|{:016x}",
            owner.as_str(),
            start.to_rfc3339(),
            end.to_rfc3339(),
            fnv1a64(title)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// FNV-1a, 64 bit. Stable across platforms and releases, unlike the std hasher.
fn fnv1a64(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    s.bytes()
        .fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}

/// One scheduled work interval, minute precision, operative timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: ShiftId,
    pub owner: PersonId,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub eligible: bool,
}

impl Shift {
    /// Creates a shift, validating `end > start`. Eligibility is classified
    /// once from the title and never changes afterwards.
    pub fn new(
        owner: PersonId,
        title: String,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("end must be strictly after start".to_string());
        }
        let eligible = eligibility::classify(&title);
        let id = ShiftId::derive(&owner, &start, &end, &title);
        Ok(Self {
            id,
            owner,
            title,
            start,
            end,
            eligible,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }

    /// Virtual clone for a hypothetical swap: same interval and title, new
    /// owner, id recomputed under the new owner.
    pub fn reassigned(&self, new_owner: PersonId) -> Shift {
        let id = ShiftId::derive(&new_owner, &self.start, &self.end, &self.title);
        Shift {
            id,
            owner: new_owner,
            ..self.clone()
        }
    }
}

/// Normalized, future-filtered snapshot of every roster member's schedule.
///
/// Rebuilt fully on each pass; per-person lists are strictly ascending by
/// `start`. `people` keeps every configured roster identity, including those
/// with zero future shifts.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub people: Vec<PersonId>,
    pub shifts: Vec<Shift>,
    pub schedules: BTreeMap<PersonId, Vec<Shift>>,
}

impl Dataset {
    /// Assembles a dataset from a flat shift list: sorts by `(start, owner)`
    /// and groups into per-person schedules.
    pub fn from_shifts(people: Vec<PersonId>, mut shifts: Vec<Shift>) -> Self {
        shifts.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.owner.cmp(&b.owner)));
        let mut schedules: BTreeMap<PersonId, Vec<Shift>> = BTreeMap::new();
        for s in &shifts {
            schedules.entry(s.owner.clone()).or_default().push(s.clone());
        }
        Self {
            people,
            shifts,
            schedules,
        }
    }

    pub fn find_shift(&self, id: &ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    pub fn find_owned_shift(&self, owner: &PersonId, id: &ShiftId) -> Option<&Shift> {
        self.shifts
            .iter()
            .find(|s| &s.id == id && &s.owner == owner)
    }

    pub fn schedule_for(&self, person: &PersonId) -> &[Shift] {
        self.schedules.get(person).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Boundary view of a shift; timestamps are RFC3339 in the operative
/// timezone with explicit offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftView {
    pub id: ShiftId,
    pub owner: PersonId,
    pub title: String,
    pub start: String,
    pub end: String,
    pub eligible: bool,
}

impl From<&Shift> for ShiftView {
    fn from(s: &Shift) -> Self {
        Self {
            id: s.id.clone(),
            owner: s.owner.clone(),
            title: s.title.clone(),
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            eligible: s.eligible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn shift(owner: &str, title: &str, day: u32, h0: u32, h1: u32) -> Shift {
        let start = New_York.with_ymd_and_hms(2026, 1, day, h0, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2026, 1, day, h1, 0, 0).unwrap();
        Shift::new(PersonId::new(owner), title.to_string(), start, end).unwrap()
    }

    #[test]
    fn rejects_empty_interval() {
        let t = New_York.with_ymd_and_hms(2026, 1, 5, 7, 0, 0).unwrap();
        assert!(Shift::new(PersonId::new("alice"), "Day 1".into(), t, t).is_err());
    }

    #[test]
    fn id_is_deterministic() {
        let a = shift("alice", "Day 1", 5, 7, 19);
        let b = shift("alice", "Day 1", 5, 7, 19);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn reassigned_clone_gets_new_id() {
        let a = shift("alice", "Day 1", 5, 7, 19);
        let b = a.reassigned(PersonId::new("bob"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.start, b.start);
        assert_eq!(a.title, b.title);
        assert_eq!(b.owner, PersonId::new("bob"));
    }

    #[test]
    fn dataset_sorts_and_groups() {
        let late = shift("bob", "Day 2", 7, 7, 19);
        let early = shift("alice", "Day 1", 5, 7, 19);
        let ds = Dataset::from_shifts(
            vec![PersonId::new("alice"), PersonId::new("bob")],
            vec![late.clone(), early.clone()],
        );
        assert_eq!(ds.shifts[0].id, early.id);
        assert_eq!(ds.schedule_for(&PersonId::new("bob")).len(), 1);
        assert!(ds.schedule_for(&PersonId::new("carol")).is_empty());
        assert!(ds
            .find_owned_shift(&PersonId::new("bob"), &early.id)
            .is_none());
        assert!(ds
            .find_owned_shift(&PersonId::new("alice"), &early.id)
            .is_some());
    }
}
