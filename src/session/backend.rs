//! External capability seams for session establishment.
//!
//! The pool never speaks the remote protocol itself. It consumes two
//! capabilities through [`SessionBackend`]: create a session from a
//! capabilities payload, and close a session by handle. Whatever client
//! implements the trait (an HTTP WebDriver client, a BiDi client, a test
//! double) stays opaque to the core.
//!
//! [`ServerLauncher`] is the second seam: starting the automation-driver
//! server before the first session, gated by the harness's process-wide
//! auto-start toggle.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::identifiers::SessionHandle;

// ============================================================================
// SessionBackend
// ============================================================================

/// Session create/close capability consumed by the pool.
///
/// Create errors are treated uniformly by the retry loop; the core never
/// discriminates error kinds when deciding to retry. Close is best-effort:
/// the pool logs and discards close errors during teardown.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Establishes a new remote session.
    ///
    /// # Arguments
    ///
    /// * `remote_url` - Automation endpoint to connect to
    /// * `capabilities` - W3C capabilities payload
    ///
    /// # Errors
    ///
    /// Any error is treated as transient by the caller's retry budget.
    async fn create(&self, remote_url: &Url, capabilities: &Value) -> Result<SessionHandle>;

    /// Closes a remote session.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote end rejects or cannot complete the
    /// close. Callers on the teardown path ignore it.
    async fn close(&self, handle: &SessionHandle) -> Result<()>;
}

// ============================================================================
// ServerLauncher
// ============================================================================

/// Automation-driver server startup capability.
///
/// Consumed once during harness construction when auto-start is enabled.
/// Implementations should make repeated calls harmless (already-running
/// servers are not an error).
#[async_trait]
pub trait ServerLauncher: Send + Sync {
    /// Ensures the driver server is running.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`](crate::Error::Server) if the server cannot
    /// be started.
    async fn ensure_started(&self) -> Result<()>;
}
