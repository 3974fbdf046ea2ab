//! Pooled browser instances.
//!
//! Each [`Browser`] owns exactly one [`SessionHandle`] for its lifetime and
//! carries the close capability needed to release it. Cloning a `Browser`
//! clones the pool's reference to the instance, not the session: the handle
//! is closed once, no matter how many clones exist.
//!
//! # Example
//!
//! ```ignore
//! use browser_pool::{Browser, Harness};
//!
//! # async fn example(harness: &Harness) -> browser_pool::Result<()> {
//! harness
//!     .run_scenario(|browser: Browser| async move {
//!         println!("driving {}", browser.handle());
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::error::Result;
use crate::identifiers::{SessionHandle, SessionId};
use crate::session::SessionBackend;

// ============================================================================
// BrowserInner
// ============================================================================

/// Shared state behind a pooled browser instance.
struct BrowserInner {
    /// The session this instance owns.
    handle: SessionHandle,

    /// Close capability for the session.
    backend: Arc<dyn SessionBackend>,

    /// Set once the session has been closed.
    closed: AtomicBool,
}

// ============================================================================
// Browser
// ============================================================================

/// One pooled browser instance wrapping one live remote session.
///
/// Scenario callbacks receive `Browser` values positionally from the front
/// of the pool. The instance at pool index 0 is the primary one, retained by
/// partial-close operations.
#[derive(Clone)]
pub struct Browser {
    /// Shared inner state.
    inner: Arc<BrowserInner>,
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("handle", &self.inner.handle)
            .field("closed", &self.is_closed())
            .finish()
    }
}

// ============================================================================
// Browser - Public API
// ============================================================================

impl Browser {
    /// Wraps a freshly created session.
    #[must_use]
    pub fn new(handle: SessionHandle, backend: Arc<dyn SessionBackend>) -> Self {
        debug!(handle = %handle, "Browser instance created");
        Self {
            inner: Arc::new(BrowserInner {
                handle,
                backend,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the session handle this instance owns.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &SessionHandle {
        &self.inner.handle
    }

    /// Returns the local session ID.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.inner.handle.id()
    }

    /// Returns `true` if the session has been closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Closes the session.
    ///
    /// Idempotent: the first call releases the remote session, later calls
    /// are no-ops. Clones of this instance observe the closed state.
    ///
    /// # Errors
    ///
    /// Returns the backend's close error. Teardown paths ignore it.
    pub async fn quit(&self) -> Result<()> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            debug!(handle = %self.inner.handle, "Session already closed");
            return Ok(());
        }

        self.inner.backend.close(&self.inner.handle).await?;
        info!(handle = %self.inner.handle, "Session closed");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
