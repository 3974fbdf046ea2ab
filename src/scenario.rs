//! Scenario callbacks and declared-arity inspection.
//!
//! A scenario is one unit of browser-driven test logic: an async callback
//! taking zero or more [`Browser`] parameters. The number of parameters the
//! callback declares is the number of pool instances it needs, so the
//! declared arity must be readable at the call site. Rust has no runtime
//! reflection for closure signatures; instead each supported signature gets
//! a blanket [`Scenario`] impl carrying the count as an associated constant,
//! disambiguated by a marker type parameter (fn-pointer markers, one per
//! arity).
//!
//! # Example
//!
//! ```ignore
//! use browser_pool::{Browser, Harness};
//!
//! # async fn example(harness: &Harness) -> browser_pool::Result<()> {
//! // Declares two parameters, so the pool provides two instances.
//! harness
//!     .run_scenario(|first: Browser, second: Browser| async move {
//!         println!("{} and {}", first.handle(), second.handle());
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;

use crate::browser::Browser;

// ============================================================================
// Scenario
// ============================================================================

/// An async callback driving zero or more pooled browser instances.
///
/// Implemented for async closures and functions taking up to four `Browser`
/// parameters. [`ARITY`](Self::ARITY) is the declared parameter count; the
/// harness hands the callback exactly that many instances from the front of
/// the pool, in pool order. The callback's output passes through the harness
/// untouched.
pub trait Scenario<Marker>: Send {
    /// Value produced by the scenario.
    type Output;

    /// Future returned by invoking the scenario.
    type Future: Future<Output = Self::Output> + Send;

    /// Number of browser parameters the scenario declares.
    const ARITY: usize;

    /// Invokes the scenario with instances taken from the front of
    /// `browsers`.
    ///
    /// # Panics
    ///
    /// Panics if `browsers` holds fewer than [`ARITY`](Self::ARITY) entries.
    /// The harness always provides enough.
    fn start(self, browsers: Vec<Browser>) -> Self::Future;
}

/// Returns the number of pool instances a scenario requires.
///
/// This is the scenario's declared parameter count.
#[inline]
#[must_use]
pub fn required_instances<Marker, S: Scenario<Marker>>(_scenario: &S) -> usize {
    S::ARITY
}

// ============================================================================
// Arity Impls
// ============================================================================

impl<F, Fut> Scenario<fn()> for F
where
    F: FnOnce() -> Fut + Send,
    Fut: Future + Send,
{
    type Output = Fut::Output;
    type Future = Fut;
    const ARITY: usize = 0;

    fn start(self, _browsers: Vec<Browser>) -> Fut {
        self()
    }
}

impl<F, Fut> Scenario<fn(Browser)> for F
where
    F: FnOnce(Browser) -> Fut + Send,
    Fut: Future + Send,
{
    type Output = Fut::Output;
    type Future = Fut;
    const ARITY: usize = 1;

    fn start(self, browsers: Vec<Browser>) -> Fut {
        let mut taken = browsers.into_iter();
        let first = taken.next().expect("pool shorter than declared arity");
        self(first)
    }
}

impl<F, Fut> Scenario<fn(Browser, Browser)> for F
where
    F: FnOnce(Browser, Browser) -> Fut + Send,
    Fut: Future + Send,
{
    type Output = Fut::Output;
    type Future = Fut;
    const ARITY: usize = 2;

    fn start(self, browsers: Vec<Browser>) -> Fut {
        let mut taken = browsers.into_iter();
        let first = taken.next().expect("pool shorter than declared arity");
        let second = taken.next().expect("pool shorter than declared arity");
        self(first, second)
    }
}

impl<F, Fut> Scenario<fn(Browser, Browser, Browser)> for F
where
    F: FnOnce(Browser, Browser, Browser) -> Fut + Send,
    Fut: Future + Send,
{
    type Output = Fut::Output;
    type Future = Fut;
    const ARITY: usize = 3;

    fn start(self, browsers: Vec<Browser>) -> Fut {
        let mut taken = browsers.into_iter();
        let first = taken.next().expect("pool shorter than declared arity");
        let second = taken.next().expect("pool shorter than declared arity");
        let third = taken.next().expect("pool shorter than declared arity");
        self(first, second, third)
    }
}

impl<F, Fut> Scenario<fn(Browser, Browser, Browser, Browser)> for F
where
    F: FnOnce(Browser, Browser, Browser, Browser) -> Fut + Send,
    Fut: Future + Send,
{
    type Output = Fut::Output;
    type Future = Fut;
    const ARITY: usize = 4;

    fn start(self, browsers: Vec<Browser>) -> Fut {
        let mut taken = browsers.into_iter();
        let first = taken.next().expect("pool shorter than declared arity");
        let second = taken.next().expect("pool shorter than declared arity");
        let third = taken.next().expect("pool shorter than declared arity");
        let fourth = taken.next().expect("pool shorter than declared arity");
        self(first, second, third, fourth)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::Value;
    use url::Url;

    use crate::error::Result;
    use crate::identifiers::SessionHandle;
    use crate::session::SessionBackend;

    struct NullBackend;

    #[async_trait]
    impl SessionBackend for NullBackend {
        async fn create(&self, _url: &Url, _caps: &Value) -> Result<SessionHandle> {
            Ok(SessionHandle::new("wire"))
        }

        async fn close(&self, _handle: &SessionHandle) -> Result<()> {
            Ok(())
        }
    }

    fn browsers(count: usize) -> Vec<Browser> {
        let backend: Arc<dyn SessionBackend> = Arc::new(NullBackend);
        (0..count)
            .map(|i| Browser::new(SessionHandle::new(format!("wire-{i}")), Arc::clone(&backend)))
            .collect()
    }

    #[test]
    fn test_declared_arity() {
        let zero = || async {};
        let one = |_: Browser| async {};
        let two = |_: Browser, _: Browser| async {};
        let four = |_: Browser, _: Browser, _: Browser, _: Browser| async {};

        assert_eq!(required_instances(&zero), 0);
        assert_eq!(required_instances(&one), 1);
        assert_eq!(required_instances(&two), 2);
        assert_eq!(required_instances(&four), 4);
    }

    #[tokio::test]
    async fn test_start_hands_instances_in_pool_order() {
        let scenario = |a: Browser, b: Browser| async move {
            (
                a.handle().wire_id().to_string(),
                b.handle().wire_id().to_string(),
            )
        };

        let (first, second) = scenario.start(browsers(2)).await;
        assert_eq!(first, "wire-0");
        assert_eq!(second, "wire-1");
    }

    #[tokio::test]
    async fn test_zero_arity_ignores_pool() {
        let scenario = || async { 7 };
        assert_eq!(scenario.start(browsers(1)).await, 7);
    }

    #[tokio::test]
    async fn test_extra_pool_entries_ignored() {
        let scenario = |a: Browser| async move { a.handle().wire_id().to_string() };
        assert_eq!(scenario.start(browsers(3)).await, "wire-0");
    }
}
