//! Retry-until-ready polling primitive.
//!
//! Everything that waits on chain state (contract deployment, earnings
//! changes, bridge affirmations, transaction receipts) goes through
//! [`wait_for`]: probe a condition, sleep between probes, give up at the
//! deadline.

use std::{future::Future, time::Duration};
use thiserror::Error;
use tokio::time::{sleep, Instant};

/// Outcome of a failed [`wait_for`].
#[derive(Error, Debug)]
pub enum WaitError<E> {
    /// The condition did not become true before the deadline.
    ///
    /// This means "not yet", not "broken" — callers may poll again later.
    #[error("condition not met within {0:?}")]
    Timeout(Duration),

    /// The probe itself failed. Probe errors are never retried.
    #[error(transparent)]
    Inner(E),
}

impl<E> WaitError<E> {
    /// True if the wait ended by deadline rather than by probe failure.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Repeatedly invoke `probe` until it yields a value or `timeout` elapses.
///
/// `Ok(Some(v))` ends the wait with `v`. `Ok(None)` means "not yet": the
/// poller sleeps `interval` and probes again. `Err(e)` propagates
/// immediately — transient transport errors are not this layer's problem.
///
/// A `timeout` of zero probes exactly once, which is how one-shot
/// "is this already true" checks are implemented without duplicating the
/// probe logic.
///
/// The returned future is cancel-safe: dropping it (losing a
/// `tokio::select!` race, aborting the task) abandons the wait without
/// leaking anything.
pub async fn wait_for<T, E, F, Fut>(
    mut probe: F,
    interval: Duration,
    timeout: Duration,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(value) = probe().await.map_err(WaitError::Inner)? {
            return Ok(value);
        }

        if timeout.is_zero() || Instant::now() >= deadline {
            return Err(WaitError::Timeout(timeout));
        }

        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Error, Debug, PartialEq)]
    #[error("probe broke")]
    struct ProbeError;

    #[tokio::test(start_paused = true)]
    async fn returns_value_once_ready() {
        let probes = AtomicU32::new(0);

        let result = wait_for(
            || {
                let n = probes.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    Ok::<_, ProbeError>(if n >= 3 { Some(n) } else { None })
                }
            },
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(probes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_probes_exactly_once() {
        let probes = AtomicU32::new(0);

        let result = wait_for(
            || {
                probes.fetch_add(1, Ordering::SeqCst);
                async { Ok::<Option<u32>, ProbeError>(None) }
            },
            Duration::from_millis(100),
            Duration::ZERO,
        )
        .await;

        assert!(matches!(result, Err(WaitError::Timeout(_))));
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_timeout_still_reports_ready_condition() {
        let result = wait_for(
            || async { Ok::<_, ProbeError>(Some(7u32)) },
            Duration::from_millis(100),
            Duration::ZERO,
        )
        .await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn probe_errors_are_not_retried() {
        let probes = AtomicU32::new(0);

        let result: Result<u32, _> = wait_for(
            || {
                probes.fetch_add(1, Ordering::SeqCst);
                async { Err(ProbeError) }
            },
            Duration::from_millis(100),
            Duration::from_secs(60),
        )
        .await;

        match result {
            Err(WaitError::Inner(e)) => assert_eq!(e, ProbeError),
            other => panic!("expected probe error, got {:?}", other),
        }
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_never_ready() {
        let result: Result<u32, _> = wait_for(
            || async { Ok::<Option<u32>, ProbeError>(None) },
            Duration::from_millis(100),
            Duration::from_millis(350),
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
    }
}
