//! Throttle retry for gateway submissions

use crate::config::RetryPolicy;
use hermes_ports::{SubmitResult, Throttled};
use log::{debug, warn};
use std::future::Future;

/// Submit, retrying after the policy's backoff while the gateway throttles
///
/// Makes at most `policy.attempts` submissions. Returns the last throttle
/// once they are exhausted.
pub async fn submit_with_retry<F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut submit: F,
) -> SubmitResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SubmitResult>,
{
    let attempts = policy.attempts.max(1);
    let mut last = Throttled(0);

    for attempt in 1..=attempts {
        match submit().await {
            Ok(()) => return Ok(()),
            Err(throttled) => {
                last = throttled;
                if attempt < attempts {
                    debug!(
                        "{} throttled ({}), attempt {}/{}; retrying in {:?}",
                        what,
                        throttled.0,
                        attempt,
                        attempts,
                        policy.backoff()
                    );
                    tokio::time::sleep(policy.backoff()).await;
                }
            }
        }
    }

    warn!("{} still throttled after {} attempts", what, attempts);
    Err(last)
}
