//! Debounced search input.
//!
//! Raw keystrokes are buffered and only promoted to the effective query
//! after a quiet period. A new keystroke supersedes the pending one, and
//! dropping the owner aborts the timer so nothing fires after disposal.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::search::QueryState;

/// Quiet period before buffered input becomes the effective query.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A single cancellable delayed action.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` after the quiet period, cancelling any pending action.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Abort the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(state: &Mutex<QueryState>) -> MutexGuard<'_, QueryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Search box state: raw input, effective query and pagination.
#[derive(Debug)]
pub struct DebouncedSearch {
    raw: String,
    state: Arc<Mutex<QueryState>>,
    debouncer: Debouncer,
}

impl DebouncedSearch {
    pub fn new(delay: Duration) -> Self {
        Self {
            raw: String::new(),
            state: Arc::new(Mutex::new(QueryState::default())),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Record a keystroke. The effective query updates after the quiet
    /// period unless another keystroke arrives first.
    pub fn input(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        let query = self.raw.clone();
        let state = Arc::clone(&self.state);
        self.debouncer.schedule(move || {
            lock(&state).set_query(query);
        });
    }

    /// Apply the buffered input immediately.
    pub fn flush(&mut self) {
        self.debouncer.cancel();
        lock(&self.state).set_query(self.raw.clone());
    }

    pub fn raw_input(&self) -> &str {
        &self.raw
    }

    /// Snapshot of the effective query and pagination.
    pub fn state(&self) -> QueryState {
        lock(&self.state).clone()
    }

    pub fn set_page(&self, page: usize) {
        lock(&self.state).set_page(page);
    }

    pub fn set_page_size(&self, page_size: usize) {
        lock(&self.state).set_page_size(page_size);
    }
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn query_applies_after_quiet_period() {
        let mut search = DebouncedSearch::default();
        search.input("madera");
        assert_eq!(search.raw_input(), "madera");

        advance(299).await;
        assert_eq!(search.state().query, "");

        advance(2).await;
        assert_eq!(search.state().query, "madera");
    }

    #[tokio::test(start_paused = true)]
    async fn new_keystroke_supersedes_pending_one() {
        let mut search = DebouncedSearch::default();
        search.input("ma");
        advance(100).await;
        search.input("mad");
        advance(250).await;
        assert_eq!(search.state().query, "");

        advance(60).await;
        assert_eq!(search.state().query, "mad");
    }

    #[tokio::test(start_paused = true)]
    async fn applied_query_resets_page() {
        let mut search = DebouncedSearch::default();
        search.set_page(5);
        search.input("caso");
        advance(301).await;
        let state = search.state();
        assert_eq!(state.query, "caso");
        assert_eq!(state.page, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_applies_immediately_and_cancels_timer() {
        let mut search = DebouncedSearch::default();
        search.input("vehiculo");
        search.flush();
        assert_eq!(search.state().query, "vehiculo");
        assert!(!search.debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_debouncer_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::default();
        let counter = Arc::clone(&fired);
        debouncer.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(debouncer);

        advance(1_000).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_actions_run_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        for _ in 0..5 {
            let counter = Arc::clone(&fired);
            debouncer.schedule(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            advance(10).await;
        }
        advance(100).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
