//! Transient per-row view state: the revealed secret and the copy badge.
//!
//! Reveal state is a plain value carried by the request. Copy feedback
//! outlives a single request because the badge clears itself after a
//! delay, so it owns a timer task. Marking a new id aborts the previous
//! timer, and dropping the feedback aborts the pending one, so a stale
//! clear can never blank a newer badge.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::route::Route;

/// How long the "copied" badge stays visible.
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// At most one revealed id at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealState {
    revealed: Option<String>,
}

impl RevealState {
    #[must_use]
    pub fn new(revealed: Option<String>) -> Self {
        Self {
            revealed: revealed.filter(|id| !id.is_empty()),
        }
    }

    /// Toggle `id`: reveal it, or hide it if it is already the revealed one.
    pub fn toggle(&mut self, id: &str) {
        if self.is_revealed(id) {
            self.revealed = None;
        } else {
            self.revealed = Some(id.to_owned());
        }
    }

    /// The state a toggle on `id` would produce. Used to build the link
    /// behind each eye button.
    #[must_use]
    pub fn toggled(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.as_deref() == Some(id)
    }

    #[must_use]
    pub fn revealed(&self) -> Option<&str> {
        self.revealed.as_deref()
    }
}

#[derive(Debug, Default)]
struct CopySlot {
    copied: Option<String>,
    generation: u64,
}

/// The single "copied" badge of a view scope.
pub struct CopyFeedback {
    slot: Arc<Mutex<CopySlot>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl std::fmt::Debug for CopyFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyFeedback")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(COPY_FEEDBACK_DELAY)
    }
}

impl CopyFeedback {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(CopySlot::default())),
            timer: Mutex::new(None),
            delay,
        }
    }

    /// Show the badge on `id` and schedule it to clear after the delay.
    ///
    /// Any timer from an earlier mark is aborted first. The spawned task
    /// also checks the generation before clearing, which covers the window
    /// where the old timer already woke but had not taken the lock yet.
    pub async fn mark(&self, id: &str) {
        let mut timer = self.timer.lock().await;
        if let Some(previous) = timer.take() {
            previous.abort();
        }

        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation = slot.generation.wrapping_add(1);
            slot.copied = Some(id.to_owned());
            slot.generation
        };
        tracing::debug!(id, generation, "copy badge set");

        let slot = Arc::clone(&self.slot);
        let delay = self.delay;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = slot.lock().await;
            if slot.generation == generation {
                slot.copied = None;
                tracing::debug!(generation, "copy badge cleared");
            }
        }));
    }

    /// The id currently showing the badge.
    pub async fn current(&self) -> Option<String> {
        self.slot.lock().await.copied.clone()
    }

    pub async fn is_copied(&self, id: &str) -> bool {
        self.slot.lock().await.copied.as_deref() == Some(id)
    }

    /// Abort the pending clear and hide the badge now.
    pub async fn cancel(&self) {
        if let Some(timer) = self.timer.lock().await.take() {
            timer.abort();
        }
        let mut slot = self.slot.lock().await;
        slot.copied = None;
        slot.generation = slot.generation.wrapping_add(1);
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().take() {
            timer.abort();
        }
    }
}

/// UI state owned by one visitor on one page.
///
/// Leaving the page replaces the scope, which drops its copy feedback and
/// cancels the pending timer.
#[derive(Debug)]
pub struct ViewScope {
    route: Route,
    copy: CopyFeedback,
}

impl ViewScope {
    #[must_use]
    pub fn new(route: Route, copy_delay: Duration) -> Self {
        Self {
            route,
            copy: CopyFeedback::new(copy_delay),
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn copy(&self) -> &CopyFeedback {
        &self.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_toggle_round_trips() {
        let mut state = RevealState::default();
        state.toggle("3");
        assert!(state.is_revealed("3"));
        state.toggle("3");
        assert_eq!(state.revealed(), None);
    }

    #[test]
    fn reveal_holds_a_single_id() {
        let mut state = RevealState::new(Some("1".to_owned()));
        state.toggle("2");
        assert!(state.is_revealed("2"));
        assert!(!state.is_revealed("1"));
    }

    #[test]
    fn toggled_leaves_original_untouched() {
        let state = RevealState::new(Some("3".to_owned()));
        assert_eq!(state.toggled("3").revealed(), None);
        assert_eq!(state.revealed(), Some("3"));
    }

    #[test]
    fn empty_reveal_param_means_none() {
        assert_eq!(RevealState::new(Some(String::new())).revealed(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn copy_sets_then_clears_after_delay() {
        let copy = CopyFeedback::default();
        copy.mark("1").await;
        assert!(copy.is_copied("1").await);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(copy.is_copied("1").await);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(copy.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn second_copy_survives_first_timer() {
        let copy = CopyFeedback::default();
        copy.mark("1").await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        copy.mark("2").await;

        // Past the first timer's deadline, inside the second one.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(copy.current().await.as_deref(), Some("2"));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(copy.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_hides_badge_immediately() {
        let copy = CopyFeedback::default();
        copy.mark("1").await;
        copy.cancel().await;
        assert_eq!(copy.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn scope_teardown_cancels_pending_clear() {
        let scope = ViewScope::new(Route::Environments, COPY_FEEDBACK_DELAY);
        scope.copy().mark("1").await;
        let slot = Arc::clone(&scope.copy.slot);
        drop(scope);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        // Timer was aborted, so nothing cleared the slot.
        assert_eq!(slot.lock().await.copied.as_deref(), Some("1"));
    }
}
