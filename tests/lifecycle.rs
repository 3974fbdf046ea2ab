//! End-to-end lifecycle tests against a scripted backend.
//!
//! These tests drive the public surface the way a test suite would: build a
//! harness, run scenarios of various arities, and tear down. The backend
//! records every create and close so ordering can be asserted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio_test::assert_ok;
use url::Url;

use browser_pool::{
    Browser, Error, Harness, Result, ServerLauncher, SessionBackend, SessionHandle,
};

// ============================================================================
// Test Backend
// ============================================================================

/// Shared event log: `create:<n>`, `close:<wire>`, `after:<name>`.
type EventLog = Arc<Mutex<Vec<String>>>;

/// Backend that scripts create failures and records every call.
struct RecordingBackend {
    log: EventLog,
    creates: AtomicU32,
    /// Succeed the first N create calls, fail every later one (each retry
    /// attempt counts as one call). `u32::MAX` means never fail.
    succeed_creates: u32,
    fail_closes: bool,
}

impl RecordingBackend {
    fn new(log: EventLog) -> Arc<Self> {
        Self::scripted(log, u32::MAX, false)
    }

    fn scripted(log: EventLog, succeed_creates: u32, fail_closes: bool) -> Arc<Self> {
        Arc::new(Self {
            log,
            creates: AtomicU32::new(0),
            succeed_creates,
            fail_closes,
        })
    }
}

#[async_trait]
impl SessionBackend for RecordingBackend {
    async fn create(&self, _url: &Url, _caps: &Value) -> Result<SessionHandle> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if n > self.succeed_creates {
            return Err(Error::backend(format!("create {n} refused")));
        }
        self.log.lock().push(format!("create:{n}"));
        Ok(SessionHandle::new(format!("wire-{n}")))
    }

    async fn close(&self, handle: &SessionHandle) -> Result<()> {
        self.log.lock().push(format!("close:{}", handle.wire_id()));
        if self.fail_closes {
            Err(Error::backend("close rejected"))
        } else {
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn harness_with(backend: Arc<RecordingBackend>) -> Harness {
    Harness::builder()
        .backend(backend)
        .restricted(false)
        .build()
        .await
        .expect("harness builds")
}

// ============================================================================
// Scenario Arity
// ============================================================================

#[tokio::test]
async fn scenario_receives_first_n_entries_in_pool_order() -> anyhow::Result<()> {
    init_tracing();
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(log)).await;

    let (first, second) = harness
        .run_scenario(|a: Browser, b: Browser| async move {
            (
                a.handle().wire_id().to_string(),
                b.handle().wire_id().to_string(),
            )
        })
        .await?;

    assert_eq!(first, "wire-1");
    assert_eq!(second, "wire-2");
    assert_eq!(harness.pool().size().await, 2);
    Ok(())
}

#[tokio::test]
async fn zero_arity_scenario_still_seeds_primary() -> anyhow::Result<()> {
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(log)).await;

    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    harness
        .run_scenario(move || async move {
            flag.store(true, Ordering::SeqCst);
        })
        .await?;

    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(harness.pool().size().await, 1);
    Ok(())
}

#[tokio::test]
async fn pool_never_shrinks_across_scenarios() -> anyhow::Result<()> {
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(log)).await;

    harness
        .run_scenario(|_: Browser, _: Browser| async {})
        .await?;
    assert_eq!(harness.pool().size().await, 2);

    harness.run_scenario(|_: Browser| async {}).await?;
    assert_eq!(harness.pool().size().await, 2);
    Ok(())
}

#[tokio::test]
async fn scenario_output_passes_through() -> anyhow::Result<()> {
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(log)).await;

    let out = harness
        .run_scenario(|_: Browser| async { Err::<u32, String>("scenario failed".to_string()) })
        .await?;

    assert_eq!(out.unwrap_err(), "scenario failed");
    // A failing scenario does not disturb the pool.
    assert_eq!(harness.pool().size().await, 1);
    Ok(())
}

// ============================================================================
// Creation Failure
// ============================================================================

#[tokio::test(start_paused = true)]
async fn creation_failure_aborts_before_callback() {
    let log = EventLog::default();
    // Every create attempt fails; the five-attempt budget runs dry.
    let backend = RecordingBackend::scripted(Arc::clone(&log), 0, false);
    let harness = harness_with(backend).await;

    let invoked = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&invoked);
    let err = harness
        .run_scenario(move |_: Browser| async move {
            flag.store(true, Ordering::SeqCst);
        })
        .await
        .unwrap_err();

    assert!(err.is_session_creation());
    assert_eq!(err.attempts(), Some(5));
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn partial_growth_survives_creation_failure() {
    let log = EventLog::default();
    // The seed entry succeeds; the second entry's five attempts all fail.
    let backend = RecordingBackend::scripted(Arc::clone(&log), 1, false);
    let harness = harness_with(backend).await;

    let err = harness
        .run_scenario(|_: Browser, _: Browser| async {})
        .await
        .unwrap_err();

    assert!(err.is_session_creation());
    // The seeded entry remains; growth is not rolled back.
    assert_eq!(harness.pool().size().await, 1);
}

// ============================================================================
// Teardown
// ============================================================================

#[tokio::test]
async fn teardown_closes_all_then_runs_callbacks_in_order() -> anyhow::Result<()> {
    init_tracing();
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(Arc::clone(&log))).await;

    harness
        .run_scenario(|_: Browser, _: Browser| async {})
        .await?;

    let after_log = Arc::clone(&log);
    harness.after_class(move || after_log.lock().push("after:first".to_string()));
    let after_log = Arc::clone(&log);
    harness.after_class(move || after_log.lock().push("after:second".to_string()));

    harness.tear_down().await;

    let events = log.lock().clone();
    assert_eq!(
        events,
        [
            "create:1",
            "create:2",
            "close:wire-1",
            "close:wire-2",
            "after:first",
            "after:second",
        ]
    );
    assert!(harness.pool().is_empty().await);
    Ok(())
}

#[tokio::test]
async fn teardown_is_idempotent() -> anyhow::Result<()> {
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(Arc::clone(&log))).await;

    harness.run_scenario(|_: Browser| async {}).await?;

    let count = Arc::new(AtomicU32::new(0));
    let calls = Arc::clone(&count);
    harness.after_class(move || {
        calls.fetch_add(1, Ordering::SeqCst);
    });

    harness.tear_down().await;
    harness.tear_down().await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
    let closes = log.lock().iter().filter(|e| e.starts_with("close:")).count();
    assert_eq!(closes, 1);
    Ok(())
}

#[tokio::test]
async fn close_failures_do_not_block_callbacks() -> anyhow::Result<()> {
    let log = EventLog::default();
    let backend = RecordingBackend::scripted(Arc::clone(&log), u32::MAX, true);
    let harness = harness_with(backend).await;

    harness
        .run_scenario(|_: Browser, _: Browser, _: Browser| async {})
        .await?;

    let after_log = Arc::clone(&log);
    harness.after_class(move || after_log.lock().push("after:ran".to_string()));

    harness.tear_down().await;

    let events = log.lock().clone();
    // Every close attempted despite each one failing, callback still ran.
    let closes = events.iter().filter(|e| e.starts_with("close:")).count();
    assert_eq!(closes, 3);
    assert_eq!(events.last().map(String::as_str), Some("after:ran"));
    assert!(harness.pool().is_empty().await);
    Ok(())
}

#[tokio::test]
async fn dropped_harness_closes_before_callbacks() -> anyhow::Result<()> {
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(Arc::clone(&log))).await;

    harness
        .run_scenario(|_: Browser, _: Browser| async {})
        .await?;

    let after_log = Arc::clone(&log);
    harness.after_class(move || after_log.lock().push("after:drop".to_string()));

    // No explicit tear_down; the drop path must keep the same ordering.
    drop(harness);
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    let events = log.lock().clone();
    assert_eq!(
        events,
        [
            "create:1",
            "create:2",
            "close:wire-1",
            "close:wire-2",
            "after:drop",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn close_all_then_reuse_creates_one_entry() -> anyhow::Result<()> {
    let log = EventLog::default();
    let harness = harness_with(RecordingBackend::new(Arc::clone(&log))).await;

    harness
        .run_scenario(|_: Browser, _: Browser| async {})
        .await?;
    harness.close_all().await;
    assert!(harness.pool().is_empty().await);

    harness.run_scenario(|_: Browser| async {}).await?;
    assert_eq!(harness.pool().size().await, 1);

    let creates = log.lock().iter().filter(|e| e.starts_with("create:")).count();
    assert_eq!(creates, 3);
    Ok(())
}

// ============================================================================
// Driver Server Auto-Start
// ============================================================================

struct RecordingLauncher {
    starts: AtomicU32,
}

#[async_trait]
impl ServerLauncher for RecordingLauncher {
    async fn ensure_started(&self) -> Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn auto_start_toggle_controls_launcher() {
    let log = EventLog::default();
    let launcher = Arc::new(RecordingLauncher {
        starts: AtomicU32::new(0),
    });

    // Enabled by default: building starts the server once.
    let harness = Harness::builder()
        .backend(RecordingBackend::new(Arc::clone(&log)))
        .server_launcher(Arc::clone(&launcher))
        .restricted(false)
        .build()
        .await;
    let _harness = assert_ok!(harness);
    assert_eq!(launcher.starts.load(Ordering::SeqCst), 1);

    // Disabled: the launcher must not be touched.
    Harness::disable_auto_start_server();
    let harness = Harness::builder()
        .backend(RecordingBackend::new(log))
        .server_launcher(Arc::clone(&launcher))
        .restricted(false)
        .build()
        .await;
    let _harness = assert_ok!(harness);
    assert_eq!(launcher.starts.load(Ordering::SeqCst), 1);
}
