//! Grain hosting behaviour: activation, turn-based delivery, timeouts,
//! activation failure and shutdown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hello_silo::config::SiloConfig;
use hello_silo::grains::{Grain, GrainError, GrainKey};
use hello_silo::silo::Silo;

static TRACKED_DEACTIVATIONS: AtomicUsize = AtomicUsize::new(0);

/// Records whether two turns ever overlapped.
struct Counter {
    count: u64,
    in_turn: Arc<AtomicUsize>,
}

#[async_trait]
impl Grain for Counter {
    type Request = ();
    type Response = u64;
    const TYPE_NAME: &'static str = "Counter";

    async fn activate(_key: GrainKey) -> Result<Self, GrainError> {
        Ok(Self {
            count: 0,
            in_turn: Arc::new(AtomicUsize::new(0)),
        })
    }

    async fn handle(&mut self, _request: ()) -> Result<u64, GrainError> {
        if self.in_turn.fetch_add(1, Ordering::SeqCst) != 0 {
            return Err(GrainError::Rejected("overlapping turn".into()));
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
        self.count += 1;
        self.in_turn.fetch_sub(1, Ordering::SeqCst);
        Ok(self.count)
    }
}

/// Counts its deactivations; only used by the shutdown test.
struct Tracked;

#[async_trait]
impl Grain for Tracked {
    type Request = ();
    type Response = ();
    const TYPE_NAME: &'static str = "Tracked";

    async fn activate(_key: GrainKey) -> Result<Self, GrainError> {
        Ok(Self)
    }

    async fn handle(&mut self, _request: ()) -> Result<(), GrainError> {
        Ok(())
    }

    async fn deactivate(&mut self) {
        TRACKED_DEACTIVATIONS.fetch_add(1, Ordering::SeqCst);
    }
}

/// Sleeps for the requested duration.
struct Sleeper;

#[async_trait]
impl Grain for Sleeper {
    type Request = Duration;
    type Response = ();
    const TYPE_NAME: &'static str = "Sleeper";

    async fn activate(_key: GrainKey) -> Result<Self, GrainError> {
        Ok(Self)
    }

    async fn handle(&mut self, request: Duration) -> Result<(), GrainError> {
        tokio::time::sleep(request).await;
        Ok(())
    }
}

/// Refuses to activate for negative keys.
struct Picky;

#[async_trait]
impl Grain for Picky {
    type Request = ();
    type Response = GrainKey;
    const TYPE_NAME: &'static str = "Picky";

    async fn activate(key: GrainKey) -> Result<Self, GrainError> {
        if key < 0 {
            return Err(GrainError::Rejected(format!("negative key {key}")));
        }
        Ok(Self)
    }

    async fn handle(&mut self, _request: ()) -> Result<GrainKey, GrainError> {
        Ok(0)
    }
}

fn config(call_timeout_ms: u64) -> SiloConfig {
    SiloConfig {
        call_timeout_ms,
        ..SiloConfig::default()
    }
}

#[tokio::test]
async fn test_turns_never_overlap() {
    let silo = Silo::new(config(5_000));
    let counter = silo.get_grain::<Counter>(7).unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let counter = counter.clone();
        handles.push(tokio::spawn(async move { counter.call(()).await }));
    }

    let mut seen = Vec::new();
    for handle in handles {
        seen.push(handle.await.unwrap().expect("turn overlapped or failed"));
    }
    seen.sort_unstable();
    assert_eq!(seen, (1..=20).collect::<Vec<u64>>());
}

#[tokio::test]
async fn test_state_survives_between_references() {
    let silo = Silo::new(config(5_000));
    assert_eq!(silo.get_grain::<Counter>(1).unwrap().call(()).await, Ok(1));
    assert_eq!(silo.get_grain::<Counter>(1).unwrap().call(()).await, Ok(2));
    assert_eq!(silo.get_grain::<Counter>(2).unwrap().call(()).await, Ok(1));
    assert_eq!(silo.activation_count(), 2);
}

#[tokio::test]
async fn test_slow_turn_times_out() {
    let silo = Silo::new(config(50));
    let sleeper = silo.get_grain::<Sleeper>(0).unwrap();

    assert_eq!(
        sleeper.call(Duration::from_millis(500)).await,
        Err(GrainError::Timeout { millis: 50 })
    );
    // Activation stays usable once the slow turn finishes.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(sleeper.call(Duration::ZERO).await, Ok(()));
}

#[tokio::test]
async fn test_failed_activation_is_reported_and_retried() {
    let silo = Silo::new(config(1_000));

    let picky = silo.get_grain::<Picky>(-1).unwrap();
    let err = picky.call(()).await.unwrap_err();
    assert!(
        matches!(err, GrainError::Rejected(_) | GrainError::MailboxClosed(_)),
        "{err:?}"
    );

    // The ended activation is replaced on the next lookup.
    let again = silo.get_grain::<Picky>(-1).unwrap();
    assert!(again.call(()).await.is_err());

    assert_eq!(silo.get_grain::<Picky>(3).unwrap().call(()).await, Ok(0));
}

#[tokio::test]
async fn test_failed_activation_is_not_counted() {
    let silo = Silo::new(config(1_000));

    let picky = silo.get_grain::<Picky>(-5).unwrap();
    assert!(picky.call(()).await.is_err());
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(picky.is_closed());
    assert_eq!(silo.activation_count(), 0);

    silo.get_grain::<Picky>(5).unwrap().call(()).await.unwrap();
    assert_eq!(silo.activation_count(), 1);
}

#[tokio::test]
async fn test_shutdown_deactivates_every_activation() {
    let silo = Silo::new(config(1_000));

    for key in 0..3 {
        silo.get_grain::<Tracked>(key).unwrap().call(()).await.unwrap();
    }
    let kept = silo.get_grain::<Tracked>(0).unwrap();
    assert_eq!(silo.activation_count(), 3);

    silo.shutdown().await;

    assert_eq!(TRACKED_DEACTIVATIONS.load(Ordering::SeqCst), 3);
    assert_eq!(silo.activation_count(), 0);
    assert_eq!(kept.call(()).await, Err(GrainError::SiloStopped));
    assert!(matches!(silo.get_grain::<Tracked>(0), Err(GrainError::SiloStopped)));
}
