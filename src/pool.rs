//! The process-wide browser instance pool.
//!
//! An ordered collection of [`Browser`] entries shared by every scenario a
//! process runs. Index 0 is the primary instance, retained by partial-close
//! operations. The pool grows lazily as scenarios declare their needs and
//! only shrinks through explicit close operations.
//!
//! # Growth protocol
//!
//! ```text
//! ensure_capacity(required)
//!   ├── pool empty?        → seed exactly one entry (always)
//!   ├── required > 1?      → append required - 1 more entries
//!   └── return the full pool (never trimmed here)
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::browser::Browser;
use crate::error::Result;
use crate::session::SessionFactory;

// ============================================================================
// BrowserPool
// ============================================================================

/// Ordered pool of live browser instances.
///
/// All operations take the pool lock for their full duration; growth and
/// close-all never interleave. The design assumes one scenario runs at a
/// time (the test runner drives scenarios sequentially), the lock is what
/// keeps that assumption safe if callers misbehave.
pub struct BrowserPool {
    /// Session creation for new entries.
    factory: SessionFactory,

    /// Live entries in insertion order. Index 0 is the primary instance.
    entries: Mutex<Vec<Browser>>,
}

impl fmt::Debug for BrowserPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserPool")
            .field("factory", &self.factory)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BrowserPool - Construction
// ============================================================================

impl BrowserPool {
    /// Creates an empty pool backed by the given factory.
    #[must_use]
    pub fn new(factory: SessionFactory) -> Self {
        Self {
            factory,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Returns the current number of entries.
    pub async fn size(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns `true` if the pool holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Takes every entry out of the pool without closing it.
    ///
    /// Used by the harness drop path, where no lock can be awaited.
    pub(crate) fn take_entries(&mut self) -> Vec<Browser> {
        std::mem::take(self.entries.get_mut())
    }
}

// ============================================================================
// BrowserPool - Growth
// ============================================================================

impl BrowserPool {
    /// Grows the pool to serve a scenario needing `required` instances.
    ///
    /// An empty pool is seeded with exactly one entry regardless of
    /// `required`, so the pool always holds a primary instance after first
    /// use, even for scenarios taking no browser argument. Beyond the seed,
    /// `required - 1` further entries are appended. The full pool is
    /// returned; it may be larger than `required` if an earlier scenario in
    /// this process needed more, and this operation never trims it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionCreation`](crate::Error::SessionCreation) if
    /// any underlying creation fails. Entries created before the failure
    /// stay in the pool; partial growth is visible, not rolled back.
    pub async fn ensure_capacity(&self, required: usize) -> Result<Vec<Browser>> {
        let mut entries = self.entries.lock().await;

        if entries.is_empty() {
            debug!("Seeding empty pool with primary instance");
            entries.push(self.new_entry().await?);
        }

        let additional = required.saturating_sub(1);
        for _ in 0..additional {
            entries.push(self.new_entry().await?);
        }

        info!(
            required,
            pool_size = entries.len(),
            "Pool capacity ensured"
        );

        Ok(entries.clone())
    }

    /// Creates one pool entry through the factory.
    async fn new_entry(&self) -> Result<Browser> {
        let handle = self.factory.create_session().await?;
        Ok(Browser::new(handle, self.factory.backend()))
    }
}

// ============================================================================
// BrowserPool - Close Operations
// ============================================================================

impl BrowserPool {
    /// Closes every entry except the primary instance at index 0.
    ///
    /// Closes are best-effort; failures are logged and do not stop the
    /// remaining entries from being closed. Returns the remaining pool,
    /// which holds at most the primary instance.
    pub async fn close_all_but_primary(&self) -> Vec<Browser> {
        let mut entries = self.entries.lock().await;

        if entries.len() > 1 {
            let extras: Vec<Browser> = entries.drain(1..).collect();
            info!(closing = extras.len(), "Closing all but primary instance");
            close_each(&extras).await;
        }

        entries.clone()
    }

    /// Closes every entry and empties the pool.
    ///
    /// Closes are best-effort: a failed close is logged, never propagated,
    /// and never prevents the remaining entries from being closed or the
    /// pool from being emptied.
    pub async fn close_all(&self) {
        let mut entries = self.entries.lock().await;
        let closing: Vec<Browser> = entries.drain(..).collect();

        info!(closing = closing.len(), "Closing all pool entries");
        close_each(&closing).await;
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Attempts to close each entry in order, swallowing failures.
async fn close_each(entries: &[Browser]) {
    for browser in entries {
        if let Err(e) = browser.quit().await {
            warn!(handle = %browser.handle(), error = %e, "Error closing session");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
