//! Browser Pool - Session lifecycle management for browser-driven tests.
//!
//! This library manages the remote browser-automation sessions behind a
//! suite of end-to-end tests: it decides how many instances a scenario
//! needs, creates and pools them, retries transient creation failures, and
//! guarantees that every session is released when the process finishes.
//!
//! # Architecture
//!
//! The pool sits between the test runner and a remote-protocol client:
//!
//! - **Scenario side**: async callbacks declare their instance count through
//!   their parameter list; the pool grows lazily to match
//! - **Remote side**: session create/close goes through the
//!   [`SessionBackend`] seam, so any WebDriver/BiDi client plugs in
//!
//! Key design principles:
//!
//! - One [`Browser`] owns one session; index 0 of the pool is the primary
//!   instance, kept alive by partial-close operations
//! - The pool never shrinks on the scenario path; only explicit close
//!   operations release sessions
//! - Session creation runs inside a fixed retry budget (5 attempts, 50ms
//!   apart); teardown is best-effort and never fails the process
//!
//! # Quick Start
//!
//! ```ignore
//! use browser_pool::{Browser, Harness, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Bring your own remote-protocol client
//!     let harness = Harness::builder().backend(my_client).build().await?;
//!
//!     // Two declared parameters, two pooled instances
//!     harness
//!         .run_scenario(|first: Browser, second: Browser| async move {
//!             // drive both browsers
//!         })
//!         .await?;
//!
//!     harness.tear_down().await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Pooled browser instances |
//! | [`environment`] | Restricted-environment detection |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`harness`] | Scenario execution and process lifecycle |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`pool`] | The shared browser instance pool |
//! | [`retry`] | Bounded retry execution |
//! | [`scenario`] | Scenario callbacks and declared-arity inspection |
//! | [`session`] | Session options, backend seam, and retried creation |

// ============================================================================
// Modules
// ============================================================================

/// Pooled browser instances.
///
/// A [`Browser`] pairs one session handle with the capability to close it.
pub mod browser;

/// Restricted-environment detection.
///
/// Decides whether sessions must run UI-less (no display, no GPU).
pub mod environment;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Scenario execution and process lifecycle.
///
/// Use [`Harness::builder()`] to create a configured harness instance.
pub mod harness;

/// Type-safe identifiers for pooled sessions.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// The shared browser instance pool.
///
/// Ordered, lazily grown, explicitly closed.
pub mod pool;

/// Bounded retry execution.
///
/// Fixed attempt counts with a fixed inter-attempt delay.
pub mod retry;

/// Scenario callbacks and declared-arity inspection.
///
/// Async callbacks taking zero or more [`Browser`] parameters.
pub mod scenario;

/// Session establishment: options, backend seam, retried creation.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Browser and pool types
pub use browser::Browser;
pub use pool::BrowserPool;

// Harness types
pub use harness::{Harness, HarnessBuilder};

// Scenario types
pub use scenario::{Scenario, required_instances};

// Session types
pub use session::{ServerLauncher, SessionBackend, SessionFactory, SessionOptions};

// Retry types
pub use retry::RetryBudget;

// Environment probe
pub use environment::is_restricted_environment;

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{SessionHandle, SessionId};
