use serde::Serialize;
use thiserror::Error;

/// Policy knobs for swap validation.
///
/// There is deliberately no fixed minimum-rest constant: the rest rule is
/// self-referential (gap must cover the adjacent shift's own duration).
#[derive(Debug, Clone, Copy)]
pub struct TradePolicy {
    /// Weekly hour ceiling (Monday-anchored week, fractional hours).
    pub cap_hours: f64,
    /// Minimum consecutive off days that trigger the advisory flag.
    pub off_run_threshold: i64,
    /// Guardrail when walking backward from the checked date.
    pub off_run_lookback: i64,
    /// Guardrail when walking forward from the checked date.
    pub off_run_lookahead: i64,
}

impl Default for TradePolicy {
    fn default() -> Self {
        Self {
            cap_hours: 60.0,
            off_run_threshold: 5,
            off_run_lookback: 12,
            off_run_lookahead: 24,
        }
    }
}

/// Outcome of one simulator check. The `A`/`B` prefix of the wire code names
/// the side that failed: `A` is the trader, `B` the counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reason {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "ineligible-title")]
    IneligibleTitle,
    #[serde(rename = "same-person")]
    SamePerson,
    #[serde(rename = "B-not-free-for-A")]
    CounterpartyNotFree,
    #[serde(rename = "A-not-free-for-B")]
    TraderNotFree,
    #[serde(rename = "A-break-rule")]
    TraderRestRule,
    #[serde(rename = "B-break-rule")]
    CounterpartyRestRule,
    #[serde(rename = "A-weekly-cap")]
    TraderWeeklyCap,
    #[serde(rename = "B-weekly-cap")]
    CounterpartyWeeklyCap,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Ok => "ok",
            Reason::IneligibleTitle => "ineligible-title",
            Reason::SamePerson => "same-person",
            Reason::CounterpartyNotFree => "B-not-free-for-A",
            Reason::TraderNotFree => "A-not-free-for-B",
            Reason::TraderRestRule => "A-break-rule",
            Reason::CounterpartyRestRule => "B-break-rule",
            Reason::TraderWeeklyCap => "A-weekly-cap",
            Reason::CounterpartyWeeklyCap => "B-weekly-cap",
        }
    }

    /// Side-independent category; swapping the argument order of a
    /// simulation flips the prefix but never the category.
    pub fn category(&self) -> &'static str {
        match self {
            Reason::Ok => "ok",
            Reason::IneligibleTitle => "ineligible-title",
            Reason::SamePerson => "same-person",
            Reason::CounterpartyNotFree | Reason::TraderNotFree => "not-free",
            Reason::TraderRestRule | Reason::CounterpartyRestRule => "break-rule",
            Reason::TraderWeeklyCap | Reason::CounterpartyWeeklyCap => "weekly-cap",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swap verdict. Business-rule rejection is a normal negative result, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub ok: bool,
    pub reason: Reason,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            ok: true,
            reason: Reason::Ok,
        }
    }
    pub fn fail(reason: Reason) -> Self {
        Self { ok: false, reason }
    }
}

/// Advisory flags for an accepted candidate pair. Never blocks a swap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OffRunFlags {
    /// The counterparty would receive the trader's shift inside a long off
    /// stretch of their post-swap schedule.
    pub recipient_on_off_run: bool,
    /// The trader would receive the counter-shift inside a long off stretch
    /// of their post-swap schedule.
    pub giver_on_off_run: bool,
}

impl OffRunFlags {
    pub fn any(&self) -> bool {
        self.recipient_on_off_run || self.giver_on_off_run
    }
}

/// Input-contract violations surfaced to the caller. Rule failures are never
/// errors; they travel as a [`Verdict`] with a [`Reason`].
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("shift not found: {0}")]
    ShiftNotFound(String),
    #[error("shift not tradable: {0}")]
    NotTradable(String),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
}
