//! Deadline and cancellation wrapper for remote provider calls.
//!
//! Every AI provider call goes through [`execute_remote_call`]. The
//! executor races the work against a deadline timer and an optional
//! external cancellation token, then classifies whatever came out:
//!
//! - a definitive provider verdict (timeout, auth failure, throttle and
//!   the like) passes through untouched
//! - an abort-shaped failure becomes `Timeout` when the deadline fired
//!   first, `Cancelled` otherwise
//!
//! There is no retry here. Callers that want retries layer them on top,
//! with their own idempotency reasoning.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::ports::{ProviderError, ProviderErrorKind};

/// Options for one remote call.
#[derive(Debug, Clone)]
pub struct RemoteCallOptions {
    /// Hard deadline for the whole call.
    pub deadline: Duration,
    /// External cancellation, e.g. from a dropped client connection.
    pub cancellation: Option<CancellationToken>,
}

impl RemoteCallOptions {
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            deadline,
            cancellation: None,
        }
    }

    pub fn cancelled_by(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Runs `work` under a deadline and optional external cancellation.
///
/// `work` receives a child token it must observe; a well-behaved provider
/// returns `Cancelled` promptly once that token fires. The executor
/// guarantees an outcome even for providers that ignore it, because the
/// race itself resolves when the internal token fires.
pub async fn execute_remote_call<T, F, Fut>(
    method: &str,
    options: RemoteCallOptions,
    work: F,
) -> Result<T, ProviderError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    // Pre-aborted external token: never start the work.
    if let Some(external) = &options.cancellation {
        if external.is_cancelled() {
            debug!(method, "remote call skipped, already cancelled");
            return Err(ProviderError::cancelled(method));
        }
    }

    let internal = CancellationToken::new();
    let timed_out = Arc::new(AtomicBool::new(false));
    let deadline_ms = options.deadline.as_millis() as u64;

    // A zero deadline means no deadline at all.
    let timer = (!options.deadline.is_zero()).then(|| {
        let internal = internal.clone();
        let timed_out = Arc::clone(&timed_out);
        let deadline = options.deadline;
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            timed_out.store(true, Ordering::SeqCst);
            internal.cancel();
        })
    });

    let forwarder = options.cancellation.as_ref().map(|external| {
        let external = external.clone();
        let internal = internal.clone();
        tokio::spawn(async move {
            external.cancelled().await;
            internal.cancel();
        })
    });

    let guard = internal.clone();
    let outcome = tokio::select! {
        result = work(internal.clone()) => result,
        _ = guard.cancelled() => Err(ProviderError::cancelled(method)),
    };

    if let Some(timer) = timer {
        timer.abort();
    }
    if let Some(forwarder) = forwarder {
        forwarder.abort();
    }

    match outcome {
        Ok(value) => Ok(value),
        Err(error) if error.kind.is_definitive() => Err(error),
        Err(error) => {
            // Abort-shaped failure: decide between timeout and cancellation
            // by who pulled the trigger.
            if timed_out.load(Ordering::SeqCst) {
                debug!(method, deadline_ms, "remote call timed out");
                Err(ProviderError::timeout(method, deadline_ms))
            } else if internal.is_cancelled() {
                debug!(method, "remote call cancelled");
                Err(ProviderError::cancelled(method))
            } else {
                Err(error)
            }
        }
    }
}
