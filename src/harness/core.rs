//! Scenario runner and process lifecycle coordinator.
//!
//! The [`Harness`] owns the browser pool and the teardown protocol. It
//! receives a scenario callback, grows the pool to the callback's declared
//! arity, invokes it with instances from the front of the pool, and
//! guarantees that every session is released at the end of the process
//! regardless of scenario outcome.
//!
//! # Teardown
//!
//! [`tear_down`](Harness::tear_down) runs exactly once, closes every pooled
//! session first, then invokes after-class callbacks in registration order.
//! A harness dropped without an explicit teardown performs the same sequence
//! best-effort from `Drop`.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::browser::Browser;
use crate::error::Result;
use crate::pool::BrowserPool;
use crate::scenario::Scenario;

use super::builder::HarnessBuilder;

// ============================================================================
// Globals
// ============================================================================

/// Process-wide toggle for automatic driver-server startup.
static AUTO_START_SERVER: AtomicBool = AtomicBool::new(true);

// ============================================================================
// Types
// ============================================================================

/// Zero-argument callback run after teardown.
type AfterClassCallback = Box<dyn FnOnce() + Send>;

/// Internal shared state for the harness.
pub(crate) struct HarnessInner {
    /// The shared browser instance pool.
    pub(crate) pool: BrowserPool,

    /// After-class callbacks in registration order.
    pub(crate) after_class: Mutex<Vec<AfterClassCallback>>,

    /// Set once teardown has run.
    pub(crate) torn_down: AtomicBool,
}

// ============================================================================
// Harness
// ============================================================================

/// Scenario runner and lifecycle coordinator.
///
/// The harness is responsible for:
/// - Growing the pool to each scenario's declared instance count
/// - Invoking scenario callbacks with pooled instances
/// - Tearing every session down exactly once at end of process
///
/// # Examples
///
/// ```ignore
/// use browser_pool::{Browser, Harness};
///
/// # async fn example(backend: std::sync::Arc<dyn browser_pool::SessionBackend>) -> browser_pool::Result<()> {
/// let harness = Harness::builder().backend(backend).build().await?;
///
/// harness
///     .run_scenario(|first: Browser, second: Browser| async move {
///         // two instances, taken from the front of the pool
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Harness {
    /// Shared inner state.
    pub(crate) inner: Arc<HarnessInner>,
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("torn_down", &self.inner.torn_down.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Harness - Construction
// ============================================================================

impl Harness {
    /// Creates a configuration builder for the harness.
    #[inline]
    #[must_use]
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    /// Creates a harness around a configured pool.
    pub(crate) fn new(pool: BrowserPool) -> Self {
        Self {
            inner: Arc::new(HarnessInner {
                pool,
                after_class: Mutex::new(Vec::new()),
                torn_down: AtomicBool::new(false),
            }),
        }
    }

    /// Disables automatic startup of the automation-driver server.
    ///
    /// Process-wide; affects every harness built afterwards. There is no
    /// re-enable: a process that manages its own driver server opts out once.
    pub fn disable_auto_start_server() {
        AUTO_START_SERVER.store(false, Ordering::SeqCst);
        info!("Automatic driver-server startup disabled");
    }

    /// Returns `true` if automatic driver-server startup is enabled.
    pub(crate) fn auto_start_server_enabled() -> bool {
        AUTO_START_SERVER.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Harness - Scenario Execution
// ============================================================================

impl Harness {
    /// Runs one scenario callback.
    ///
    /// Grows the pool to the callback's declared arity, then invokes the
    /// callback with exactly that many instances from the front of the pool,
    /// in pool order. A zero-arity callback is invoked with no arguments but
    /// still seeds the pool with its primary instance.
    ///
    /// The scenario's own output passes through untouched, success or
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionCreation`](crate::Error::SessionCreation) if
    /// the pool cannot obtain the required sessions; the callback is not
    /// invoked in that case.
    pub async fn run_scenario<Marker, S>(&self, scenario: S) -> Result<S::Output>
    where
        S: Scenario<Marker>,
    {
        let required = S::ARITY;
        debug!(required, "Running scenario");

        let mut entries = self.inner.pool.ensure_capacity(required).await?;
        entries.truncate(required);

        Ok(scenario.start(entries).await)
    }

    /// Returns the browser pool.
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &BrowserPool {
        &self.inner.pool
    }

    /// Closes every pooled session.
    ///
    /// Best-effort; the pool is empty afterwards. Scenarios run later will
    /// re-seed it.
    pub async fn close_all(&self) {
        self.inner.pool.close_all().await;
    }
}

// ============================================================================
// Harness - Teardown
// ============================================================================

impl Harness {
    /// Registers an after-class callback.
    ///
    /// Callbacks run during teardown, after every session has been closed,
    /// in registration order. Registration has no immediate effect.
    pub fn after_class(&self, callback: impl FnOnce() + Send + 'static) {
        self.inner.after_class.lock().push(Box::new(callback));
    }

    /// Tears the harness down.
    ///
    /// Closes every pooled session (best-effort, close failures are
    /// swallowed), then runs after-class callbacks in registration order.
    /// Idempotent: only the first call per harness does anything, so a
    /// manual teardown followed by drop runs the sequence once.
    pub async fn tear_down(&self) {
        if self.inner.torn_down.swap(true, Ordering::SeqCst) {
            debug!("Teardown already ran");
            return;
        }

        info!("Tearing down harness");
        self.inner.pool.close_all().await;

        let callbacks: Vec<AfterClassCallback> = {
            let mut list = self.inner.after_class.lock();
            list.drain(..).collect()
        };

        debug!(count = callbacks.len(), "Running after-class callbacks");
        for callback in callbacks {
            callback();
        }
    }
}

// ============================================================================
// HarnessInner - Drop
// ============================================================================

impl Drop for HarnessInner {
    fn drop(&mut self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }

        // Last-resort teardown for a harness dropped without tear_down().
        // Closes still run before the after-class callbacks, same as the
        // explicit path, so the whole sequence moves into one spawned task.
        let browsers: Vec<Browser> = self.pool.take_entries();
        let callbacks: Vec<AfterClassCallback> = self.after_class.get_mut().drain(..).collect();

        if !browsers.is_empty() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    debug!(count = browsers.len(), "Closing sessions from drop");
                    handle.spawn(async move {
                        for browser in browsers {
                            if let Err(e) = browser.quit().await {
                                warn!(error = %e, "Error closing session during drop");
                            }
                        }
                        for callback in callbacks {
                            callback();
                        }
                    });
                    return;
                }
                Err(_) => {
                    warn!(
                        count = browsers.len(),
                        "Harness dropped outside a runtime; remote sessions may leak"
                    );
                }
            }
        }

        for callback in callbacks {
            callback();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
