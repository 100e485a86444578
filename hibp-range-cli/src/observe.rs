use std::future::Future;
use std::time::Instant;

use hibp_range::CallResult;
use tracing::{info, warn};

/// Runs one breach check and logs how long it took and how it ended.
///
/// `line` identifies the check in the logs; the password never does.
pub async fn observe<F>(line: usize, check: F) -> CallResult
where
    F: Future<Output = CallResult>,
{
    let start = Instant::now();
    let result = check.await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(outcome) => {
            info!(line, elapsed_ms, exposed = outcome.is_exposed(), "breach check finished")
        }
        Err(e) => warn!(
            line,
            elapsed_ms,
            kind = ?e.kind(),
            retryable = e.is_retryable(),
            error = %e,
            "breach check failed"
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hibp_range::{CheckError, ExposureOutcome};

    use super::*;

    #[tokio::test]
    async fn test_passes_results_through() {
        let ok = observe(1, async { Ok(ExposureOutcome::Exposed(4)) }).await;
        assert_eq!(ok.unwrap(), ExposureOutcome::Exposed(4));

        let err = observe(2, async {
            Err(CheckError::Timeout { timeout: Duration::from_millis(500) })
        })
        .await;
        assert!(matches!(err, Err(CheckError::Timeout { .. })));
    }
}
