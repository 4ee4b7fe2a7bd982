//! Layout capability seam between the note core and a UI shell.
//!
//! # Responsibility
//! - Declare the sidebar layout operations the core may request.
//! - Provide the deferred, cancellable collapse used after note selection.
//!
//! # Invariants
//! - The core never touches rendering technology; it only calls this trait.
//! - A pending deferred collapse is invalidated by any later layout call.
//! - Deferred work shares no mutable state with the store.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Delay applied between note selection and the sidebar collapse request.
pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(250);

/// Sidebar layout operations a UI shell implements.
///
/// The controller decides whether a request has any effect; a desktop shell
/// typically ignores `collapse` while a narrow-screen shell honors it.
pub trait LayoutController: Send + Sync {
    /// Hides the note list pane.
    fn collapse(&self);
    /// Shows the note list pane.
    fn expand(&self);
    /// Flips the note list pane.
    fn toggle(&self);
}

/// Controller that ignores every layout request. Default for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLayout;

impl LayoutController for NoopLayout {
    fn collapse(&self) {}
    fn expand(&self) {}
    fn toggle(&self) {}
}

/// Decorator that turns `collapse` into a fixed-delay deferred request.
///
/// Selection collapses the sidebar only after a short pause, so rapid
/// re-selection does not flicker the pane. Each layout call bumps a
/// generation counter; a sleeping collapse whose ticket no longer matches
/// the counter does nothing. `expand` and `toggle` therefore also cancel
/// any pending collapse before delegating.
pub struct DeferredLayout {
    inner: Arc<dyn LayoutController>,
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl DeferredLayout {
    /// Wraps `inner` with the given collapse delay.
    pub fn new(inner: Arc<dyn LayoutController>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wraps `inner` with [`DEFAULT_COLLAPSE_DELAY`].
    pub fn with_default_delay(inner: Arc<dyn LayoutController>) -> Self {
        Self::new(inner, DEFAULT_COLLAPSE_DELAY)
    }

    /// Invalidates any collapse still waiting on its delay.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl LayoutController for DeferredLayout {
    fn collapse(&self) {
        let ticket = self.next_ticket();
        let generation = Arc::clone(&self.generation);
        let inner = Arc::clone(&self.inner);
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            if generation.load(Ordering::SeqCst) == ticket {
                inner.collapse();
            }
        });
    }

    fn expand(&self) {
        self.cancel_pending();
        self.inner.expand();
    }

    fn toggle(&self) {
        self.cancel_pending();
        self.inner.toggle();
    }
}

/// Recording controller for tests: counts every request it receives.
///
/// Clones share counters, so a test can hand one clone to the store and
/// read the counts from another.
#[derive(Debug, Clone, Default)]
pub struct CountingLayout {
    collapses: Arc<AtomicUsize>,
    expands: Arc<AtomicUsize>,
    toggles: Arc<AtomicUsize>,
}

impl CountingLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapse_count(&self) -> usize {
        self.collapses.load(Ordering::SeqCst)
    }

    pub fn expand_count(&self) -> usize {
        self.expands.load(Ordering::SeqCst)
    }

    pub fn toggle_count(&self) -> usize {
        self.toggles.load(Ordering::SeqCst)
    }
}

impl LayoutController for CountingLayout {
    fn collapse(&self) {
        self.collapses.fetch_add(1, Ordering::SeqCst);
    }

    fn expand(&self) {
        self.expands.fetch_add(1, Ordering::SeqCst);
    }

    fn toggle(&self) {
        self.toggles.fetch_add(1, Ordering::SeqCst);
    }
}
