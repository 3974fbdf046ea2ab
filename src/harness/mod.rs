//! Harness module: scenario execution and process lifecycle.
//!
//! This module provides the main entry point for running browser scenarios.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Harness`] | Scenario runner and lifecycle coordinator |
//! | [`HarnessBuilder`] | Fluent configuration builder |
//!
//! # Example
//!
//! ```ignore
//! use browser_pool::{Browser, Harness};
//!
//! # async fn example(backend: std::sync::Arc<dyn browser_pool::SessionBackend>) -> browser_pool::Result<()> {
//! let harness = Harness::builder().backend(backend).build().await?;
//!
//! harness
//!     .run_scenario(|browser: Browser| async move {
//!         // drive the browser
//!     })
//!     .await?;
//!
//! harness.tear_down().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for harness configuration.
pub mod builder;

/// Core harness implementation.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::HarnessBuilder;
pub use core::Harness;
