//! Breached password checker using the Have I Been Pwned range API.
//!
//! Passwords are checked with the k-anonymity model: the password is hashed
//! with SHA1 locally, only the first 5 hex characters of the digest are sent to
//! the remote service, and the remaining 35 characters are matched against
//! every breached digest the service returns for that prefix.
//!
//! Neither the password nor its full digest ever leaves the process, and
//! nothing is cached or persisted between calls.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use hibp_range::{BreachDecisionEngine, ExposureOutcome};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = BreachDecisionEngine::from_config(&Default::default())?;
//! match engine.check("password123", Duration::from_millis(500)).await? {
//!     ExposureOutcome::NotExposed => println!("not found"),
//!     ExposureOutcome::Exposed(count) => println!("seen {count} times"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod digest;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod parser;

pub use client::{
    ADD_PADDING_HEADER, RangeQueryClient, RangeRequest, RangeTransport, RawResponse,
    ReqwestTransport, TransportError,
};
pub use config::{DEFAULT_RANGE_URL, HIBP_RANGE_URL_ENV, RangeClientConfig, parse_base_url};
pub use digest::PasswordDigest;
pub use engine::{BreachDecisionEngine, CallResult};
pub use error::{CheckError, ConfigError, ErrorKind, MalformedLine, MatchError, ParseError};
pub use http::{HeaderMap, HeaderValue, StatusCode};
pub use matcher::{ExposureOutcome, match_suffix};
pub use parser::{RangeEntry, RangeQueryResult, parse};

/// The length of the digest prefix sent to the range API (5 hex characters).
pub const PREFIX_LEN: usize = 5;

/// The length of the digest suffix kept locally (35 hex characters).
pub const SUFFIX_LEN: usize = 35;

/// The length of a full SHA1 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = PREFIX_LEN + SUFFIX_LEN;

/// Hex lookup table for digest rendering.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";
