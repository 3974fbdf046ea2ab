//! Retried session creation.
//!
//! [`SessionFactory`] turns "the pool needs one more session" into a live
//! [`SessionHandle`]: it renders capabilities from the configured options,
//! then drives the backend's create capability through a fixed retry budget.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::SessionHandle;
use crate::retry::RetryBudget;

use super::backend::SessionBackend;
use super::options::SessionOptions;

// ============================================================================
// Constants
// ============================================================================

/// Attempts made per session creation.
const CREATE_ATTEMPTS: u32 = 5;

/// Delay between session-creation attempts.
const CREATE_RETRY_DELAY: Duration = Duration::from_millis(50);

// ============================================================================
// SessionFactory
// ============================================================================

/// Builds remote sessions through the backend with a fixed retry budget.
///
/// In a restricted environment (no display, no GPU) the configured options
/// are augmented so the browser runs UI-less; otherwise they are used as-is.
pub struct SessionFactory {
    /// External session create/close capability.
    backend: Arc<dyn SessionBackend>,

    /// Remote automation endpoint.
    remote_url: Url,

    /// Base launch options.
    options: SessionOptions,

    /// Whether the process runs in a restricted environment.
    restricted: bool,
}

impl fmt::Debug for SessionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionFactory")
            .field("remote_url", &self.remote_url.as_str())
            .field("restricted", &self.restricted)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SessionFactory - Construction
// ============================================================================

impl SessionFactory {
    /// Creates a session factory.
    ///
    /// # Arguments
    ///
    /// * `backend` - Session create/close capability
    /// * `remote_url` - Automation endpoint
    /// * `options` - Base launch options
    /// * `restricted` - Whether to force UI-less execution
    #[must_use]
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        remote_url: Url,
        options: SessionOptions,
        restricted: bool,
    ) -> Self {
        Self {
            backend,
            remote_url,
            options,
            restricted,
        }
    }

    /// Returns the remote automation endpoint.
    #[inline]
    #[must_use]
    pub fn remote_url(&self) -> &Url {
        &self.remote_url
    }

    /// Returns `true` if sessions are created for a restricted environment.
    #[inline]
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Returns the backend capability.
    #[inline]
    #[must_use]
    pub fn backend(&self) -> Arc<dyn SessionBackend> {
        Arc::clone(&self.backend)
    }
}

// ============================================================================
// SessionFactory - Creation
// ============================================================================

impl SessionFactory {
    /// Creates one remote session.
    ///
    /// Delegates to the backend wrapped in a budget of five attempts with a
    /// 50ms inter-attempt delay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionCreation`] carrying the failure from the final
    /// attempt once the budget is exhausted. This is the only error this
    /// method produces.
    pub async fn create_session(&self) -> Result<SessionHandle> {
        let capabilities = self.session_options().to_capabilities();
        let budget = RetryBudget::new(CREATE_ATTEMPTS, CREATE_RETRY_DELAY);

        debug!(url = %self.remote_url, restricted = self.restricted, "Creating session");

        let handle = budget
            .run(|| self.backend.create(&self.remote_url, &capabilities))
            .await
            .map_err(|e| match e {
                Error::ExhaustedRetries { attempts, source } => Error::SessionCreation {
                    attempts,
                    source,
                },
                other => Error::session_creation(CREATE_ATTEMPTS, other),
            })?;

        info!(handle = %handle, "Session created");
        Ok(handle)
    }

    /// Returns the launch options for the current environment.
    ///
    /// Restricted environments get headless, GPU-less execution forced on
    /// top of the configured base options.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        if self.restricted {
            self.options.clone().with_headless().with_disable_gpu()
        } else {
            self.options.clone()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    /// Backend that fails a fixed number of creates before succeeding.
    struct FlakyBackend {
        failures: AtomicU32,
        calls: AtomicU32,
    }

    impl FlakyBackend {
        fn new(failures: u32) -> Self {
            Self {
                failures: AtomicU32::new(failures),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl SessionBackend for FlakyBackend {
        async fn create(&self, _url: &Url, _caps: &Value) -> Result<SessionHandle> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failures.load(Ordering::SeqCst) >= call {
                Err(Error::backend(format!("connect refused (call {call})")))
            } else {
                Ok(SessionHandle::new(format!("wire-{call}")))
            }
        }

        async fn close(&self, _handle: &SessionHandle) -> Result<()> {
            Ok(())
        }
    }

    fn factory(backend: Arc<dyn SessionBackend>, restricted: bool) -> SessionFactory {
        SessionFactory::new(
            backend,
            Url::parse("http://localhost:9515").unwrap(),
            SessionOptions::new(),
            restricted,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_retries_transient_failures() {
        let backend = Arc::new(FlakyBackend::new(4));
        let handle = factory(backend.clone(), false).create_session().await.unwrap();

        assert_eq!(handle.wire_id(), "wire-5");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_exhaustion_is_session_creation() {
        let backend = Arc::new(FlakyBackend::new(u32::MAX));
        let err = factory(backend.clone(), false).create_session().await.unwrap_err();

        assert!(err.is_session_creation());
        assert_eq!(err.attempts(), Some(5));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 5);
        assert!(
            err.last_attempt_error()
                .is_some_and(|e| e.to_string().contains("call 5"))
        );
    }

    #[tokio::test]
    async fn test_create_first_attempt_success() {
        let backend = Arc::new(FlakyBackend::new(0));
        let handle = factory(backend.clone(), false).create_session().await.unwrap();

        assert_eq!(handle.wire_id(), "wire-1");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_restricted_forces_ui_less_options() {
        let backend = Arc::new(FlakyBackend::new(0));
        let options = factory(backend, true).session_options();

        assert!(options.headless);
        assert!(options.disable_gpu);
    }

    #[test]
    fn test_unrestricted_keeps_base_options() {
        let backend = Arc::new(FlakyBackend::new(0));
        let options = factory(backend, false).session_options();

        assert!(!options.headless);
        assert!(!options.disable_gpu);
    }
}
