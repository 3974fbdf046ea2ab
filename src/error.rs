//! Error types for the browser session pool.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use browser_pool::{Browser, Harness, Result};
//!
//! async fn example(harness: &Harness) -> Result<()> {
//!     harness
//!         .run_scenario(|browser: Browser| async move {
//!             // drive the browser
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Driver server | [`Error::Server`] |
//! | Session creation | [`Error::SessionCreation`], [`Error::ExhaustedRetries`], [`Error::Backend`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Url`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when harness or session configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Driver-server startup error.
    ///
    /// Returned when the automation-driver server fails to start.
    #[error("Driver server error: {message}")]
    Server {
        /// Description of the server failure.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Remote backend reported a failure.
    ///
    /// Wire-level error from the session-creation or session-close capability.
    #[error("Backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },

    /// A retried operation failed on every attempt.
    ///
    /// Carries the failure from the final attempt; earlier failures are
    /// discarded.
    #[error("Retries exhausted after {attempts} attempts: {source}")]
    ExhaustedRetries {
        /// Number of attempts made.
        attempts: u32,
        /// Failure from the final attempt.
        #[source]
        source: Box<Error>,
    },

    /// Session creation failed after exhausting its retry budget.
    ///
    /// Fatal to the scenario invocation that triggered it. Pool entries
    /// created before the failure remain in the pool.
    #[error("Session creation failed after {attempts} attempts: {source}")]
    SessionCreation {
        /// Number of creation attempts made.
        attempts: u32,
        /// Failure from the final attempt.
        #[source]
        source: Box<Error>,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a driver-server error.
    #[inline]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Creates a backend error.
    #[inline]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Creates a retry-exhaustion error wrapping the final failure.
    #[inline]
    pub fn exhausted_retries(attempts: u32, source: Error) -> Self {
        Self::ExhaustedRetries {
            attempts,
            source: Box::new(source),
        }
    }

    /// Creates a session-creation error wrapping the final failure.
    #[inline]
    pub fn session_creation(attempts: u32, source: Error) -> Self {
        Self::SessionCreation {
            attempts,
            source: Box::new(source),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a session-creation failure.
    #[inline]
    #[must_use]
    pub fn is_session_creation(&self) -> bool {
        matches!(self, Self::SessionCreation { .. })
    }

    /// Returns `true` if this is a retry-exhaustion failure.
    #[inline]
    #[must_use]
    pub fn is_retry_exhaustion(&self) -> bool {
        matches!(self, Self::ExhaustedRetries { .. })
    }

    /// Returns the attempt count for retried failures, if applicable.
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::ExhaustedRetries { attempts, .. } | Self::SessionCreation { attempts, .. } => {
                Some(*attempts)
            }
            _ => None,
        }
    }

    /// Returns the failure from the final attempt for retried failures.
    #[inline]
    #[must_use]
    pub fn last_attempt_error(&self) -> Option<&Error> {
        match self {
            Self::ExhaustedRetries { source, .. } | Self::SessionCreation { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
