//! The silo: activation directory and lifecycle.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::config::SiloConfig;
use crate::grains::{Grain, GrainError, GrainId, GrainKey};
use crate::silo::activation::run_activation;
use crate::silo::reference::GrainRef;

type DirectoryEntry = Box<dyn Any + Send + Sync>;
type Directory = DashMap<GrainId, DirectoryEntry>;

/// Hosts grain activations for this process.
pub struct Silo {
    config: SiloConfig,
    /// GrainId -> GrainRef<G> of the live activation.
    directory: Arc<Directory>,
    stopped: Arc<AtomicBool>,
    stop_tx: watch::Sender<bool>,
    tasks: Mutex<JoinSet<()>>,
}

impl Silo {
    /// Create a silo with an empty directory.
    pub fn new(config: SiloConfig) -> Self {
        tracing::info!(
            cluster_id = %config.cluster_id,
            service_id = %config.service_id,
            mailbox_capacity = config.mailbox_capacity,
            call_timeout_ms = config.call_timeout_ms,
            "Silo created"
        );
        let (stop_tx, _) = watch::channel(false);
        Self {
            config,
            directory: Arc::new(DashMap::new()),
            stopped: Arc::new(AtomicBool::new(false)),
            stop_tx,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    pub fn config(&self) -> &SiloConfig {
        &self.config
    }

    /// Get a reference to the activation of `G` for `key`, activating it
    /// if this is the first reference.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn get_grain<G: Grain>(&self, key: GrainKey) -> Result<GrainRef<G>, GrainError> {
        if self.is_stopped() {
            return Err(GrainError::SiloStopped);
        }

        let id = GrainId::new::<G>(key);
        let grain_ref = match self.directory.entry(id) {
            Entry::Occupied(mut entry) => {
                if let Some(existing) = entry.get().downcast_ref::<GrainRef<G>>() {
                    if !existing.is_closed() {
                        return Ok(existing.clone());
                    }
                }
                tracing::debug!(grain = %id, "Replacing ended activation");
                let grain_ref = self.spawn_activation::<G>(id);
                entry.insert(Box::new(grain_ref.clone()));
                grain_ref
            }
            Entry::Vacant(entry) => {
                let grain_ref = self.spawn_activation::<G>(id);
                entry.insert(Box::new(grain_ref.clone()));
                grain_ref
            }
        };

        // Shutdown may have cleared the directory while we were inserting.
        if self.is_stopped() {
            self.directory.remove(&id);
            return Err(GrainError::SiloStopped);
        }
        Ok(grain_ref)
    }

    fn spawn_activation<G: Grain>(&self, id: GrainId) -> GrainRef<G> {
        let (tx, rx) = mpsc::channel(self.config.mailbox_capacity.max(1));
        let stopped = self.stop_tx.subscribe();
        let directory = self.directory.clone();
        let release = move || release_entry::<G>(&directory, id);

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Activation task ended abnormally");
            }
        }
        tasks.spawn(run_activation::<G, _>(id, rx, stopped, release));

        GrainRef::new(
            id,
            tx,
            Duration::from_millis(self.config.call_timeout_ms),
            self.stopped.clone(),
        )
    }

    /// Number of live activations.
    pub fn activation_count(&self) -> usize {
        self.directory.len()
    }

    #[cfg(test)]
    fn task_count(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Stop every activation and wait for them to deactivate.
    ///
    /// Idempotent. Calls made through existing references afterwards fail
    /// with [`GrainError::SiloStopped`].
    pub async fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!(activations = self.directory.len(), "Silo stopping");
        self.stop_tx.send_replace(true);
        self.directory.clear();

        let mut tasks = std::mem::take(&mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner));
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Activation task ended abnormally");
            }
        }

        tracing::info!("Silo stopped");
    }
}

/// Drop the directory entry for an exited activation, unless it has already
/// been replaced by a live one.
fn release_entry<G: Grain>(directory: &Directory, id: GrainId) {
    directory.remove_if(&id, |_, entry| {
        entry
            .downcast_ref::<GrainRef<G>>()
            .map_or(true, GrainRef::is_closed)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grains::{format_greeting, HelloGrain, SayHello, HELLO_GRAIN_KEY};
    use async_trait::async_trait;

    fn silo() -> Silo {
        Silo::new(SiloConfig::default())
    }

    struct Stillborn;

    #[async_trait]
    impl Grain for Stillborn {
        type Request = ();
        type Response = ();
        const TYPE_NAME: &'static str = "Stillborn";

        async fn activate(_key: GrainKey) -> Result<Self, GrainError> {
            Err(GrainError::Rejected("no".into()))
        }

        async fn handle(&mut self, _request: ()) -> Result<(), GrainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn same_key_reuses_activation() {
        let silo = silo();
        let a = silo.get_grain::<HelloGrain>(HELLO_GRAIN_KEY).unwrap();
        let b = silo.get_grain::<HelloGrain>(HELLO_GRAIN_KEY).unwrap();

        assert_eq!(a.id(), b.id());
        assert_eq!(silo.activation_count(), 1);
        assert_eq!(a.call(SayHello("one".into())).await.unwrap(), format_greeting("one"));
        assert_eq!(b.call(SayHello("two".into())).await.unwrap(), format_greeting("two"));
        assert_eq!(silo.activation_count(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_get_distinct_activations() {
        let silo = silo();
        silo.get_grain::<HelloGrain>(1).unwrap();
        silo.get_grain::<HelloGrain>(2).unwrap();
        assert_eq!(silo.activation_count(), 2);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_and_existing_references() {
        let silo = silo();
        let grain = silo.get_grain::<HelloGrain>(HELLO_GRAIN_KEY).unwrap();
        grain.call(SayHello("warm".into())).await.unwrap();

        silo.shutdown().await;
        silo.shutdown().await;

        assert_eq!(silo.activation_count(), 0);
        assert!(matches!(
            silo.get_grain::<HelloGrain>(HELLO_GRAIN_KEY),
            Err(GrainError::SiloStopped)
        ));
        assert_eq!(
            grain.call(SayHello("late".into())).await,
            Err(GrainError::SiloStopped)
        );
    }

    #[tokio::test]
    async fn finished_tasks_are_reaped_on_next_activation() {
        let silo = silo();
        for key in 0..5 {
            let grain = silo.get_grain::<Stillborn>(key).unwrap();
            assert!(grain.call(()).await.is_err());
        }
        tokio::task::yield_now().await;

        silo.get_grain::<HelloGrain>(HELLO_GRAIN_KEY).unwrap();
        assert_eq!(silo.task_count(), 1);
        assert_eq!(silo.activation_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn activations_racing_shutdown_leave_nothing_behind() {
        let silo = Arc::new(silo());

        let mut lookups = Vec::new();
        for worker in 0..4i64 {
            let silo = silo.clone();
            lookups.push(tokio::spawn(async move {
                for key in 0..10_000 {
                    if silo.get_grain::<HelloGrain>(worker * 10_000 + key).is_err() {
                        break;
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        tokio::time::sleep(Duration::from_millis(5)).await;
        silo.shutdown().await;
        for lookup in lookups {
            lookup.await.unwrap();
        }

        assert_eq!(silo.activation_count(), 0);
    }
}
