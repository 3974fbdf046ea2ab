//! Session establishment for the pool.
//!
//! This module owns everything between "the pool wants one more browser" and
//! "a live remote session exists": capability construction, the external
//! backend seam, and the retried factory that ties them together.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SessionOptions`] | Browser launch options and W3C capabilities |
//! | [`SessionBackend`] | External session create/close capability |
//! | [`ServerLauncher`] | External automation-driver server startup |
//! | [`SessionFactory`] | Retried session creation |

// ============================================================================
// Submodules
// ============================================================================

/// External capability seams for session establishment.
pub mod backend;

/// Retried session creation.
pub mod factory;

/// Browser launch options and capability construction.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use backend::{ServerLauncher, SessionBackend};
pub use factory::SessionFactory;
pub use options::SessionOptions;
