//! Swap legality: availability, localized rest rule, weekly cap, off-run
//! advisory, and the fixed-order simulator that composes them.

mod availability;
mod candidates;
mod off_run;
mod rest;
mod simulate;
mod types;
mod weekly;

pub use availability::is_free_for_interval;
pub use candidates::{find_candidates, Candidate};
pub use off_run::is_in_long_off_run;
pub use rest::local_rest_ok;
pub use simulate::{advisory_off_run_flags, simulate};
pub use types::{OffRunFlags, Reason, TradeError, TradePolicy, Verdict};
pub use weekly::weekly_cap_ok;
