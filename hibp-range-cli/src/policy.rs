use std::collections::BTreeMap;

use hibp_range::{CallResult, CheckError, ExposureOutcome};
use serde::Serialize;

/// Status reported for an exposed password, and for failures under the
/// fail-closed policy when the range API gave no status of its own.
pub const EXPOSED_STATUS: u16 = 409;

const BAD_REQUEST_STATUS: u16 = 400;
const OK_STATUS: u16 = 200;

/// Longest slice of an upstream error body copied into a verdict.
const MAX_DEVELOPER_MESSAGE: usize = 512;

const NO_PASSWORD_MESSAGE: &str = "No password provided.";
const CHECK_FAILED_MESSAGE: &str = "Error checking password against haveibeenpwned.";

/// What to tell the user when the range API could not be consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Accept the password.
    Open,
    /// Reject the password.
    #[default]
    Closed,
}

/// User-facing result of one breach check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub version: &'static str,
    pub password_ok: bool,
    pub status: u16,
    pub user_message: Option<String>,
    pub code: Option<u16>,
    pub developer_message: Option<String>,
    pub more_info: Option<BTreeMap<String, String>>,
}

impl Verdict {
    fn new(password_ok: bool, status: u16, user_message: Option<String>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            password_ok,
            status,
            user_message,
            code: None,
            developer_message: None,
            more_info: None,
        }
    }

    pub fn from_result(result: &CallResult, policy: FailurePolicy) -> Self {
        match result {
            Ok(ExposureOutcome::NotExposed) => Self::new(true, OK_STATUS, None),
            Ok(ExposureOutcome::Exposed(count)) => Self::new(
                false,
                EXPOSED_STATUS,
                Some(format!("Your password has been exposed {count} times, choose another.")),
            ),
            Err(CheckError::EmptyInput) => {
                Self::new(false, BAD_REQUEST_STATUS, Some(NO_PASSWORD_MESSAGE.to_owned()))
            }
            Err(e) => Self::from_failure(e, policy),
        }
    }

    fn from_failure(error: &CheckError, policy: FailurePolicy) -> Self {
        let upstream = error.status().map(|s| s.as_u16());
        let mut verdict = match policy {
            FailurePolicy::Open => Self::new(true, OK_STATUS, None),
            FailurePolicy::Closed => Self::new(false, upstream.unwrap_or(EXPOSED_STATUS), None),
        };
        verdict.user_message = Some(CHECK_FAILED_MESSAGE.to_owned());
        verdict.code = upstream;

        if let CheckError::Status { headers, body, .. } = error {
            let body: String =
                String::from_utf8_lossy(body).chars().take(MAX_DEVELOPER_MESSAGE).collect();
            let message = if body.is_empty() { error.to_string() } else { body };
            verdict.developer_message = Some(message);
            verdict.more_info = Some(
                headers
                    .iter()
                    .filter_map(|(name, value)| {
                        Some((name.as_str().to_owned(), value.to_str().ok()?.to_owned()))
                    })
                    .collect(),
            );
        } else {
            verdict.developer_message = Some(error.to_string());
        }

        verdict
    }

    /// One-line text form for terminal output.
    pub fn summary(&self) -> String {
        let state = if self.password_ok { "ok" } else { "rejected" };
        match (&self.user_message, &self.developer_message) {
            (Some(user), Some(developer)) => format!("{state}: {user} ({developer})"),
            (Some(user), None) => format!("{state}: {user}"),
            _ => state.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hibp_range::{HeaderMap, HeaderValue, MatchError, StatusCode};

    use super::*;

    fn unavailable() -> CheckError {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("30"));
        CheckError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            headers,
            body: "upstream busy".into(),
        }
    }

    #[test]
    fn test_not_exposed() {
        let verdict = Verdict::from_result(&Ok(ExposureOutcome::NotExposed), FailurePolicy::Closed);
        assert!(verdict.password_ok);
        assert_eq!(verdict.status, 200);
        assert_eq!(verdict.user_message, None);
        assert_eq!(verdict.summary(), "ok");
    }

    #[test]
    fn test_exposed() {
        let verdict = Verdict::from_result(&Ok(ExposureOutcome::Exposed(37)), FailurePolicy::Open);
        assert!(!verdict.password_ok);
        assert_eq!(verdict.status, EXPOSED_STATUS);
        assert_eq!(
            verdict.user_message.as_deref(),
            Some("Your password has been exposed 37 times, choose another.")
        );
    }

    #[test]
    fn test_empty_input_ignores_policy() {
        for policy in [FailurePolicy::Open, FailurePolicy::Closed] {
            let verdict = Verdict::from_result(&Err(CheckError::EmptyInput), policy);
            assert!(!verdict.password_ok);
            assert_eq!(verdict.status, 400);
            assert_eq!(verdict.user_message.as_deref(), Some("No password provided."));
        }
    }

    #[test]
    fn test_fail_closed_forwards_upstream_status() {
        let verdict = Verdict::from_result(&Err(unavailable()), FailurePolicy::Closed);
        assert!(!verdict.password_ok);
        assert_eq!(verdict.status, 503);
        assert_eq!(verdict.code, Some(503));
        assert_eq!(verdict.developer_message.as_deref(), Some("upstream busy"));
        assert_eq!(verdict.more_info.unwrap().get("retry-after").map(String::as_str), Some("30"));
    }

    #[test]
    fn test_fail_closed_without_status_uses_conflict() {
        let timeout = CheckError::Timeout { timeout: Duration::from_millis(500) };
        let verdict = Verdict::from_result(&Err(timeout), FailurePolicy::Closed);
        assert!(!verdict.password_ok);
        assert_eq!(verdict.status, EXPOSED_STATUS);
        assert_eq!(verdict.code, None);
        assert_eq!(
            verdict.summary(),
            "rejected: Error checking password against haveibeenpwned. \
             (range query timed out after 500ms)"
        );
    }

    #[test]
    fn test_fail_open_accepts() {
        let ambiguous = CheckError::from(MatchError { suffix: "0".repeat(35), occurrences: 2 });
        let verdict = Verdict::from_result(&Err(ambiguous), FailurePolicy::Open);
        assert!(verdict.password_ok);
        assert_eq!(verdict.status, 200);
        assert_eq!(
            verdict.user_message.as_deref(),
            Some("Error checking password against haveibeenpwned.")
        );
    }

    #[test]
    fn test_json_shape() {
        let verdict = Verdict::from_result(&Ok(ExposureOutcome::Exposed(3)), FailurePolicy::Closed);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["passwordOk"], false);
        assert_eq!(json["status"], 409);
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["developerMessage"].is_null());
    }
}
