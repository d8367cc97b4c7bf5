//! Latest-wins query tokens for search-as-you-type.
//!
//! Every new query cancels the one before it, and a response is only accepted
//! if its token is still the latest. A slow response to an old query can
//! therefore never overwrite the results of a newer one.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Identifies one query issued by a [`LatestQuery`].
#[derive(Debug, Clone)]
pub struct QueryToken {
    seq: u64,
    cancel: CancellationToken,
}

impl QueryToken {
    /// Sequence number, increasing with each `begin`.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Waits `debounce`, then runs `fetch` unless this token is cancelled
    /// first. Returns `None` if cancelled.
    pub async fn run<F>(&self, debounce: Duration, fetch: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return None,
            _ = tokio::time::sleep(debounce) => {}
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            output = fetch => Some(output),
        }
    }
}

/// Issues query tokens and keeps only the latest one live.
#[derive(Debug, Default)]
pub struct LatestQuery {
    latest: u64,
    current: Option<CancellationToken>,
}

impl LatestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new query, cancelling the previous one.
    pub fn begin(&mut self) -> QueryToken {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        self.latest += 1;
        let cancel = CancellationToken::new();
        self.current = Some(cancel.clone());
        log::debug!("query {} started", self.latest);
        QueryToken {
            seq: self.latest,
            cancel,
        }
    }

    /// Returns `true` if `token` belongs to the latest live query.
    pub fn is_current(&self, token: &QueryToken) -> bool {
        token.seq == self.latest && !token.is_cancelled()
    }

    /// Returns `value` if `token` is still the latest query, otherwise drops it.
    pub fn accept<T>(&mut self, token: &QueryToken, value: T) -> Option<T> {
        if !self.is_current(token) {
            log::debug!("dropping stale response for query {} (latest {})", token.seq, self.latest);
            return None;
        }
        self.current = None;
        Some(value)
    }

    /// Cancels the live query, if any.
    pub fn cancel(&mut self) {
        if let Some(current) = self.current.take() {
            current.cancel();
        }
    }
}
