//! Builder pattern for harness configuration.
//!
//! Provides a fluent API for configuring and creating [`Harness`] instances.
//!
//! # Example
//!
//! ```ignore
//! use browser_pool::{Harness, SessionOptions};
//!
//! # async fn example(backend: std::sync::Arc<dyn browser_pool::SessionBackend>) -> browser_pool::Result<()> {
//! let harness = Harness::builder()
//!     .backend(backend)
//!     .remote_url("http://localhost:9515")
//!     .options(SessionOptions::new().with_window_size(1920, 1080))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::environment;
use crate::error::{Error, Result};
use crate::pool::BrowserPool;
use crate::session::{ServerLauncher, SessionBackend, SessionFactory, SessionOptions};

use super::core::Harness;

// ============================================================================
// Constants
// ============================================================================

/// Default automation endpoint (local chromedriver).
const DEFAULT_REMOTE_URL: &str = "http://localhost:9515";

// ============================================================================
// HarnessBuilder
// ============================================================================

/// Builder for configuring a [`Harness`] instance.
///
/// Use [`Harness::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct HarnessBuilder {
    /// Session create/close capability.
    backend: Option<Arc<dyn SessionBackend>>,
    /// Remote automation endpoint.
    remote_url: Option<String>,
    /// Base launch options.
    options: Option<SessionOptions>,
    /// Restricted-environment override.
    restricted: Option<bool>,
    /// Automation-driver server launcher.
    launcher: Option<Arc<dyn ServerLauncher>>,
}

impl std::fmt::Debug for HarnessBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessBuilder")
            .field("remote_url", &self.remote_url)
            .field("options", &self.options)
            .field("restricted", &self.restricted)
            .field("has_backend", &self.backend.is_some())
            .field("has_launcher", &self.launcher.is_some())
            .finish()
    }
}

// ============================================================================
// HarnessBuilder Implementation
// ============================================================================

impl HarnessBuilder {
    /// Creates a new harness builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session backend.
    ///
    /// Required. The backend carries out session creation and close over
    /// the remote protocol.
    #[inline]
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn SessionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the remote automation endpoint.
    ///
    /// Defaults to a local chromedriver endpoint.
    #[inline]
    #[must_use]
    pub fn remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// Sets the base session launch options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Overrides restricted-environment detection.
    ///
    /// Without an override the environment probe decides whether sessions
    /// run UI-less.
    #[inline]
    #[must_use]
    pub fn restricted(mut self, restricted: bool) -> Self {
        self.restricted = Some(restricted);
        self
    }

    /// Sets the automation-driver server launcher.
    ///
    /// Invoked once during `build` unless
    /// [`Harness::disable_auto_start_server`] was called.
    #[inline]
    #[must_use]
    pub fn server_launcher(mut self, launcher: Arc<impl ServerLauncher + 'static>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Builds the harness with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no backend is set or the options are invalid
    /// - [`Error::Url`] if the remote endpoint does not parse
    /// - [`Error::Server`] if the driver server fails to start
    pub async fn build(self) -> Result<Harness> {
        let backend = self.backend.ok_or_else(|| {
            Error::config(
                "Session backend is required. Use .backend() to set it.\n\
                 Example: Harness::builder().backend(my_client)",
            )
        })?;

        let remote_url = Url::parse(
            self.remote_url
                .as_deref()
                .unwrap_or(DEFAULT_REMOTE_URL),
        )?;

        let options = self.options.unwrap_or_default();
        options.validate().map_err(Error::config)?;

        let restricted = self
            .restricted
            .unwrap_or_else(environment::is_restricted_environment);
        debug!(restricted, url = %remote_url, "Harness configuration resolved");

        if let Some(launcher) = self.launcher {
            if Harness::auto_start_server_enabled() {
                launcher.ensure_started().await?;
                debug!("Driver server started");
            } else {
                debug!("Driver-server auto-start disabled, skipping");
            }
        }

        let factory = SessionFactory::new(backend, remote_url, options, restricted);
        let harness = Harness::new(BrowserPool::new(factory));

        info!("Harness initialized");
        Ok(harness)
    }
}

// ============================================================================
// Tests
// ============================================================================
