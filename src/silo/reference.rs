//! Typed handles to grain activations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::grains::{Grain, GrainError, GrainId};
use crate::silo::activation::Envelope;

/// A cloneable reference to one grain activation.
pub struct GrainRef<G: Grain> {
    id: GrainId,
    mailbox: mpsc::Sender<Envelope<G>>,
    call_timeout: Duration,
    stopped: Arc<AtomicBool>,
}

impl<G: Grain> Clone for GrainRef<G> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            mailbox: self.mailbox.clone(),
            call_timeout: self.call_timeout,
            stopped: self.stopped.clone(),
        }
    }
}

impl<G: Grain> GrainRef<G> {
    pub(crate) fn new(
        id: GrainId,
        mailbox: mpsc::Sender<Envelope<G>>,
        call_timeout: Duration,
        stopped: Arc<AtomicBool>,
    ) -> Self {
        Self {
            id,
            mailbox,
            call_timeout,
            stopped,
        }
    }

    /// Identity of the activation this reference points at.
    pub fn id(&self) -> GrainId {
        self.id
    }

    /// True once the activation behind this reference has exited.
    pub fn is_closed(&self) -> bool {
        self.mailbox.is_closed()
    }

    /// Send a request and wait for the reply.
    ///
    /// The call timeout covers both waiting for mailbox space and waiting
    /// for the grain's turn to finish.
    pub async fn call(&self, request: G::Request) -> Result<G::Response, GrainError> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(GrainError::SiloStopped);
        }

        let (reply, response) = oneshot::channel();
        let exchange = async {
            self.mailbox
                .send(Envelope { request, reply })
                .await
                .map_err(|_| self.closed_error())?;
            response.await.map_err(|_| self.closed_error())?
        };

        match tokio::time::timeout(self.call_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(grain = %self.id, timeout = ?self.call_timeout, "Grain call timed out");
                Err(GrainError::Timeout {
                    millis: self.call_timeout.as_millis() as u64,
                })
            }
        }
    }

    fn closed_error(&self) -> GrainError {
        if self.stopped.load(Ordering::SeqCst) {
            GrainError::SiloStopped
        } else {
            GrainError::MailboxClosed(self.id.to_string())
        }
    }
}
