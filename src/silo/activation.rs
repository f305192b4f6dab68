//! The per-activation message loop.

use std::time::Instant;

use tokio::sync::{mpsc, oneshot, watch};

use crate::grains::{Grain, GrainError, GrainId};
use crate::observability::metrics;

/// One queued call: the request and where to send the reply.
pub struct Envelope<G: Grain> {
    pub request: G::Request,
    pub reply: oneshot::Sender<Result<G::Response, GrainError>>,
}

/// Drive one activation until its mailbox closes or the silo stops.
///
/// `release` runs once the mailbox is closed, before pending callers are
/// answered and before `deactivate`.
pub(crate) async fn run_activation<G, F>(
    id: GrainId,
    mut mailbox: mpsc::Receiver<Envelope<G>>,
    mut stopped: watch::Receiver<bool>,
    release: F,
) where
    G: Grain,
    F: FnOnce() + Send + 'static,
{
    let mut grain = match G::activate(id.key).await {
        Ok(grain) => grain,
        Err(e) => {
            tracing::error!(grain = %id, error = %e, "Activation failed");
            mailbox.close();
            release();
            reject_pending(&mut mailbox, e);
            return;
        }
    };

    metrics::activation_started(id.type_name);
    tracing::debug!(grain = %id, "Activation started");

    let already_stopped = *stopped.borrow_and_update();
    if !already_stopped {
        loop {
            tokio::select! {
                changed = stopped.changed() => {
                    let stop = changed.is_err() || *stopped.borrow();
                    if stop {
                        break;
                    }
                }
                envelope = mailbox.recv() => {
                    let Some(envelope) = envelope else { break };
                    let start = Instant::now();
                    let result = grain.handle(envelope.request).await;
                    metrics::record_grain_call(id.type_name, result.is_ok(), start);
                    if let Err(e) = &result {
                        tracing::warn!(grain = %id, error = %e, "Grain call failed");
                    }
                    // Caller may have timed out and dropped the receiver.
                    let _ = envelope.reply.send(result);
                }
            }
        }
    }

    mailbox.close();
    release();
    reject_pending(&mut mailbox, GrainError::SiloStopped);
    grain.deactivate().await;
    metrics::activation_stopped(id.type_name);
    tracing::debug!(grain = %id, "Activation stopped");
}

fn reject_pending<G: Grain>(mailbox: &mut mpsc::Receiver<Envelope<G>>, error: GrainError) {
    mailbox.close();
    while let Ok(envelope) = mailbox.try_recv() {
        let _ = envelope.reply.send(Err(error.clone()));
    }
}
