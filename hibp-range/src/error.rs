use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// Boxed error used for transport failures, which come from whatever client
/// the caller plugged in.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a breach check can fail.
///
/// Each failure is classified where it is detected and returned as-is; the
/// check never produces a decision from a partial or malformed response.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("no password provided")]
    EmptyInput,

    #[error("range query timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("range query failed before a response was received: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },

    #[error("range query returned HTTP {status}")]
    Status { status: StatusCode, headers: HeaderMap, body: Bytes },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Fieldless tag for [`CheckError`], for callers that only branch on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    Timeout,
    Transport,
    Status,
    Parse,
    Match,
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::EmptyInput => ErrorKind::EmptyInput,
            CheckError::Timeout { .. } => ErrorKind::Timeout,
            CheckError::Transport { .. } => ErrorKind::Transport,
            CheckError::Status { .. } => ErrorKind::Status,
            CheckError::Parse(_) => ErrorKind::Parse,
            CheckError::Match(_) => ErrorKind::Match,
        }
    }

    /// Whether a caller may reasonably retry the same check.
    ///
    /// Only timeouts and transport failures qualify; a bad status or a
    /// malformed body will not fix itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckError::Timeout { .. } | CheckError::Transport { .. })
    }

    /// The HTTP status returned by the range API, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CheckError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A range response body that does not follow the `SUFFIX:COUNT` line format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("range response is not valid UTF-8 (valid up to byte {valid_up_to})")]
    NotUtf8 { valid_up_to: usize },

    #[error("malformed range line {line_number} {line:?}: {reason}")]
    MalformedLine { line_number: usize, line: String, reason: MalformedLine },

    #[error("range line {line_number} repeats the suffix from line {first_line_number}")]
    DuplicateSuffix { line_number: usize, first_line_number: usize },
}

/// Why a single response line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedLine {
    #[error("missing ':' separator")]
    MissingSeparator,

    #[error("suffix has {0} characters, expected 35")]
    SuffixLength(usize),

    #[error("suffix is not uppercase hex")]
    SuffixNotHex,

    #[error("count is not a non-negative integer: {0}")]
    InvalidCount(#[from] std::num::ParseIntError),
}

/// The range response listed the local suffix more than once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("range response lists the local suffix {occurrences} times")]
pub struct MatchError {
    pub suffix: String,
    pub occurrences: usize,
}

/// Failures building a client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid range API base URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("invalid User-Agent {value:?}: {reason}")]
    InvalidUserAgent { value: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
