use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::SearchError;

/// Number of checkpoints between two deadline checks.
const DEADLINE_STRIDE: u32 = 64;

/// Shared flag used to abort running searches from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every search holding this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-invocation resources a search draws on: the random source for
/// randomized strategies, and the cancellation token and deadline that bound
/// how long any strategy may run.
///
/// Two searches run with contexts built from the same seed make identical
/// random choices.
pub struct SearchContext {
    rng: StdRng,
    cancel: CancelToken,
    deadline: Option<Instant>,
    ticks: u32,
}

impl SearchContext {
    /// Context whose random source is seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Context drawing from an existing random source.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            cancel: CancelToken::new(),
            deadline: None,
            ticks: 0,
        }
    }

    /// Observe `token` for cancellation.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Stop searching at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stop searching once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The random source randomized strategies draw from.
    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Called by searches once per expansion. Fails with
    /// [`SearchError::Cancelled`] after cancellation or past the deadline.
    pub fn checkpoint(&mut self) -> Result<(), SearchError> {
        if self.cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        let tick = self.ticks;
        self.ticks = self.ticks.wrapping_add(1);
        if tick % DEADLINE_STRIDE == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Err(SearchError::Cancelled);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::seeded(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    #[test]
    fn same_seed_same_draws() {
        let mut a = SearchContext::seeded(99);
        let mut b = SearchContext::seeded(99);
        let xs: Vec<u32> = (0..8).map(|_| a.rng().random_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng().random_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn cancel_token_stops_checkpoints() {
        let token = CancelToken::new();
        let mut ctx = SearchContext::seeded(1).with_cancel_token(token.clone());
        assert_eq!(ctx.checkpoint(), Ok(()));
        token.cancel();
        assert_eq!(ctx.checkpoint(), Err(SearchError::Cancelled));
    }

    #[test]
    fn expired_deadline_is_seen_on_first_checkpoint() {
        let mut ctx = SearchContext::seeded(1).with_deadline(Instant::now());
        assert_eq!(ctx.checkpoint(), Err(SearchError::Cancelled));
    }
}
