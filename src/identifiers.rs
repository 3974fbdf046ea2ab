//! Type-safe identifiers for pooled sessions.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//! [`SessionId`] numbers sessions locally in creation order; the remote
//! end's own identifier travels alongside it in [`SessionHandle`].

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

// ============================================================================
// SessionId
// ============================================================================

/// Process-local session identifier, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u32);

impl SessionId {
    /// Returns the next session ID from the process-wide counter.
    ///
    /// IDs start at 1 and never repeat within a process.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU32 = AtomicU32::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a session ID from a raw value.
    ///
    /// Returns `None` for zero, which is never a valid ID.
    #[inline]
    #[must_use]
    pub fn from_u32(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

// ============================================================================
// SessionHandle
// ============================================================================

/// Opaque handle to one live remote browser-automation session.
///
/// Pairs the local [`SessionId`] with the identifier the remote end assigned
/// on the wire. Exactly one [`Browser`](crate::Browser) owns a handle for its
/// lifetime; it is created by the session factory and destroyed by an
/// explicit close call. Handles are never shared implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    /// Local creation-order identifier.
    id: SessionId,
    /// Identifier assigned by the remote end.
    wire_id: String,
}

impl SessionHandle {
    /// Creates a handle for a freshly established session.
    #[must_use]
    pub fn new(wire_id: impl Into<String>) -> Self {
        Self {
            id: SessionId::next(),
            wire_id: wire_id.into(),
        }
    }

    /// Returns the local session ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the identifier assigned by the remote end.
    #[inline]
    #[must_use]
    pub fn wire_id(&self) -> &str {
        &self.wire_id
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.wire_id)
    }
}

// ============================================================================
// Tests
// ============================================================================
