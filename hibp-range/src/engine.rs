use std::time::Duration;

use http::HeaderValue;
use tracing::debug;

use crate::client::{RangeQueryClient, RangeTransport, ReqwestTransport};
use crate::config::RangeClientConfig;
use crate::digest::PasswordDigest;
use crate::error::{CheckError, ConfigError};
use crate::matcher::{ExposureOutcome, match_suffix};
use crate::parser::parse;

/// The outcome of one breach check: a decision, or the failure that prevented one.
pub type CallResult = Result<ExposureOutcome, CheckError>;

/// Checks passwords against the range API.
///
/// Holds no per-check state, so one engine can serve any number of concurrent
/// checks; they share only the transport's connection pool.
pub struct BreachDecisionEngine<T = ReqwestTransport> {
    client: RangeQueryClient<T>,
}

impl BreachDecisionEngine<ReqwestTransport> {
    pub fn from_config(config: &RangeClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(RangeQueryClient::from_config(config)?))
    }
}

impl<T: RangeTransport> BreachDecisionEngine<T> {
    pub fn new(client: RangeQueryClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RangeQueryClient<T> {
        &self.client
    }

    /// Checks whether `password` has appeared in a breach.
    ///
    /// Only the 5-character digest prefix is sent. The whole check, network
    /// call included, is bounded by `timeout`.
    pub async fn check(&self, password: &str, timeout: Duration) -> CallResult {
        self.check_with_user_agent(password, timeout, None).await
    }

    /// Same as [`check`](Self::check), forwarding the caller's `User-Agent`.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(timeout_ms = timeout.as_millis() as u64)
    )]
    pub async fn check_with_user_agent(
        &self,
        password: &str,
        timeout: Duration,
        user_agent: Option<&HeaderValue>,
    ) -> CallResult {
        if password.is_empty() {
            return Err(CheckError::EmptyInput);
        }

        let digest = PasswordDigest::split(password);
        let raw = self.client.query(digest.prefix(), timeout, user_agent).await?;

        let entries = parse(&raw)?;
        debug!(entries = entries.len(), "parsed range response");

        let outcome = match_suffix(digest.suffix(), &entries)?;
        debug!(exposed = outcome.is_exposed(), "range check complete");

        Ok(outcome)
    }
}
