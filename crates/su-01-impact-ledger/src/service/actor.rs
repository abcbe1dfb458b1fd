//! Per-user ledger actor
//!
//! Each user's ledger is owned by one task that applies commands in arrival order.
//! Callers talk to it through a cloneable `LedgerHandle`; replies come back on a
//! oneshot channel, so concurrent callers never share mutable state.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::entities::LedgerState;
use crate::domain::errors::LedgerError;
use crate::domain::value_objects::{ActionKind, ChallengeId};
use crate::ports::{ActionOutcome, ChallengeOutcome, ImpactLedgerApi};

type Reply<T> = oneshot::Sender<Result<T, LedgerError>>;

/// Commands accepted by a ledger actor
#[derive(Debug)]
pub enum LedgerCommand {
    LogAction {
        kind: ActionKind,
        value: f64,
        reply: Reply<ActionOutcome>,
    },
    CompleteChallenge {
        id: ChallengeId,
        reply: Reply<ChallengeOutcome>,
    },
    RollPeriod {
        reply: Reply<bool>,
    },
    Flush {
        reply: Reply<()>,
    },
    Snapshot {
        reply: oneshot::Sender<LedgerState>,
    },
    Shutdown,
}

/// Task that owns a ledger and serializes every command against it
pub struct LedgerActor<L: ImpactLedgerApi> {
    user_id: String,
    ledger: L,
    receiver: mpsc::Receiver<LedgerCommand>,
}

impl<L: ImpactLedgerApi> LedgerActor<L> {
    pub fn new(user_id: impl Into<String>, ledger: L, receiver: mpsc::Receiver<LedgerCommand>) -> Self {
        Self {
            user_id: user_id.into(),
            ledger,
            receiver,
        }
    }

    /// Process commands until shutdown or until every handle is dropped.
    ///
    /// Returns the ledger so callers can inspect or reuse it.
    pub async fn run(mut self) -> L {
        debug!(user = %self.user_id, "Ledger actor started");

        while let Some(command) = self.receiver.recv().await {
            // A dropped reply receiver only means the caller stopped waiting
            match command {
                LedgerCommand::LogAction { kind, value, reply } => {
                    let _ = reply.send(self.ledger.log_action(kind, value).await);
                }
                LedgerCommand::CompleteChallenge { id, reply } => {
                    let _ = reply.send(self.ledger.complete_challenge(&id).await);
                }
                LedgerCommand::RollPeriod { reply } => {
                    let _ = reply.send(self.ledger.roll_period().await);
                }
                LedgerCommand::Flush { reply } => {
                    let _ = reply.send(self.ledger.flush().await);
                }
                LedgerCommand::Snapshot { reply } => {
                    let _ = reply.send(self.ledger.snapshot());
                }
                LedgerCommand::Shutdown => break,
            }
        }

        if self.ledger.pending_writes() > 0 {
            if let Err(e) = self.ledger.flush().await {
                tracing::warn!(user = %self.user_id, error = %e, "Final flush failed");
            }
        }

        debug!(user = %self.user_id, "Ledger actor stopped");
        self.ledger
    }
}

/// Cloneable sender side of a ledger actor
#[derive(Clone, Debug)]
pub struct LedgerHandle {
    user_id: String,
    sender: mpsc::Sender<LedgerCommand>,
}

impl LedgerHandle {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> LedgerCommand,
    ) -> Result<T, LedgerError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(build(tx))
            .await
            .map_err(|_| LedgerError::ActorUnavailable)?;
        rx.await.map_err(|_| LedgerError::ActorUnavailable)?
    }

    pub async fn log_action(&self, kind: ActionKind, value: f64) -> Result<ActionOutcome, LedgerError> {
        self.request(|reply| LedgerCommand::LogAction { kind, value, reply })
            .await
    }

    pub async fn complete_challenge(
        &self,
        id: impl Into<ChallengeId>,
    ) -> Result<ChallengeOutcome, LedgerError> {
        let id = id.into();
        self.request(|reply| LedgerCommand::CompleteChallenge { id, reply })
            .await
    }

    pub async fn roll_period(&self) -> Result<bool, LedgerError> {
        self.request(|reply| LedgerCommand::RollPeriod { reply }).await
    }

    pub async fn flush(&self) -> Result<(), LedgerError> {
        self.request(|reply| LedgerCommand::Flush { reply }).await
    }

    pub async fn snapshot(&self) -> Result<LedgerState, LedgerError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerCommand::Snapshot { reply: tx })
            .await
            .map_err(|_| LedgerError::ActorUnavailable)?;
        rx.await.map_err(|_| LedgerError::ActorUnavailable)
    }

    pub async fn shutdown(&self) -> Result<(), LedgerError> {
        self.sender
            .send(LedgerCommand::Shutdown)
            .await
            .map_err(|_| LedgerError::ActorUnavailable)
    }
}

/// Spawn an actor for `ledger` on the current runtime.
pub fn spawn_ledger<L>(
    user_id: impl Into<String>,
    ledger: L,
    buffer: usize,
) -> (LedgerHandle, JoinHandle<L>)
where
    L: ImpactLedgerApi + 'static,
{
    let user_id = user_id.into();
    let (sender, receiver) = mpsc::channel(buffer.max(1));
    let actor = LedgerActor::new(user_id.clone(), ledger, receiver);
    let join = tokio::spawn(actor.run());

    (LedgerHandle { user_id, sender }, join)
}

/// Builds the ledger for a user the first time they are seen
#[async_trait]
pub trait LedgerFactory: Send + Sync {
    type Ledger: ImpactLedgerApi + 'static;

    async fn create(&self, user_id: &str) -> Result<Self::Ledger, LedgerError>;
}

/// One actor per user, created lazily
pub struct LedgerRegistry<F: LedgerFactory> {
    factory: F,
    buffer: usize,
    handles: Mutex<HashMap<String, LedgerHandle>>,
}

impl<F: LedgerFactory> LedgerRegistry<F> {
    pub fn new(factory: F, buffer: usize) -> Self {
        Self {
            factory,
            buffer,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Handle for `user_id`, spawning its actor on first use.
    ///
    /// The registry lock is held while the ledger is built, so two concurrent
    /// first requests for the same user still produce a single actor.
    pub async fn handle(&self, user_id: &str) -> Result<LedgerHandle, LedgerError> {
        let mut handles = self.handles.lock().await;
        if let Some(handle) = handles.get(user_id) {
            if !handle.is_closed() {
                return Ok(handle.clone());
            }
        }

        let ledger = self.factory.create(user_id).await?;
        let (handle, _join) = spawn_ledger(user_id, ledger, self.buffer);
        handles.insert(user_id.to_string(), handle.clone());
        info!(user = %user_id, "Spawned ledger actor");
        Ok(handle)
    }

    pub async fn active_users(&self) -> usize {
        self.handles
            .lock()
            .await
            .values()
            .filter(|h| !h.is_closed())
            .count()
    }

    /// Ask every actor to stop. Pending writes are flushed on the way out.
    pub async fn shutdown_all(&self) {
        let mut handles = self.handles.lock().await;
        for (user, handle) in handles.drain() {
            if handle.shutdown().await.is_err() {
                debug!(user = %user, "Ledger actor already stopped");
            }
        }
    }
}
