//! Calling layer for `hibp-range`: turns breach check results into
//! user-facing verdicts under a fail-open or fail-closed policy, and logs the
//! timing and outcome of every check.
//!
//! The `hibp-range` binary reads passwords one per line from stdin (or a single
//! `--password`) and prints one verdict per password:
//!
//! ```sh
//! printf 'password123\ncorrecthorsebatterystaple\n' | hibp-range --json
//! ```

pub mod error;
pub mod observe;
pub mod policy;
pub mod telemetry;

pub use error::Error;
pub use observe::observe;
pub use policy::{EXPOSED_STATUS, FailurePolicy, Verdict};
