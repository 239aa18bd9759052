#![forbid(unsafe_code)]
//! Tradewatch — shift-trade validation and counter-shift matching (no DB).
//!
//! - Raw calendar events in, validated future-only schedules out.
//! - Pure swap simulation: eligibility, availability, localized rest rule,
//!   weekly-hour cap, each with a typed reason code.
//! - Advisory long-off-stretch flags; deterministic candidate ordering.
//! - Every instant normalized into one operative timezone; RFC3339 with
//!   explicit offset at the boundary.

pub mod api;
pub mod builder;
pub mod cache;
pub mod clock;
pub mod eligibility;
pub mod ingest;
pub mod model;
pub mod trade;

pub use api::{
    find_trade_candidates, list_future_shifts, recheck_swap, CandidateView, FutureShifts,
    TradeOptions,
};
pub use cache::SnapshotCache;
pub use ingest::{EventSource, FileSource, MemorySource, RawEvent};
pub use model::{Dataset, PersonId, Shift, ShiftId, ShiftView};
pub use trade::{
    find_candidates, simulate, Candidate, OffRunFlags, Reason, TradeError, TradePolicy, Verdict,
};
