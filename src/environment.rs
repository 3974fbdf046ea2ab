//! Restricted-environment detection.
//!
//! A restricted environment is an execution context without a display or
//! GPU (CI hosts, production containers), where sessions must run UI-less.
//! Detection reads process environment variables; the harness builder can
//! override the probe either way.

// ============================================================================
// Imports
// ============================================================================

use std::env;

// ============================================================================
// Detection
// ============================================================================

/// Environment names that imply a restricted context.
const RESTRICTED_NAMES: &[&str] = &["production", "ci"];

/// Returns `true` if the process appears to run in a restricted environment.
///
/// Checks, in order:
///
/// 1. `BROWSER_ENV` or `APP_ENV` set to `production` or `ci`
/// 2. `CI` set to anything non-empty
/// 3. Neither `DISPLAY` nor `WAYLAND_DISPLAY` available (Linux only; macOS
///    has a display server without either variable)
#[must_use]
pub fn is_restricted_environment() -> bool {
    is_restricted_from(|name| env::var(name).ok())
}

/// Pure form of the probe, reading variables through `lookup`.
pub(crate) fn is_restricted_from(lookup: impl Fn(&str) -> Option<String>) -> bool {
    for var in ["BROWSER_ENV", "APP_ENV"] {
        if let Some(value) = lookup(var)
            && RESTRICTED_NAMES.contains(&value.to_ascii_lowercase().as_str())
        {
            return true;
        }
    }

    if lookup("CI").is_some_and(|v| !v.is_empty()) {
        return true;
    }

    if cfg!(target_os = "linux")
        && lookup("DISPLAY").is_none_or(|v| v.is_empty())
        && lookup("WAYLAND_DISPLAY").is_none_or(|v| v.is_empty())
    {
        return true;
    }

    false
}

// ============================================================================
// Tests
// ============================================================================
