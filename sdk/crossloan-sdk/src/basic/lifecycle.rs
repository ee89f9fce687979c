use crate::error::{CrossLoanError, Result};
use crate::types::{OperationKind, TxReceipt};
use alloy_primitives::{Address, B256};
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Distinguishes successive lifecycles of the same operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LifecycleId(u64);

impl From<u64> for LifecycleId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LifecycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Idle -> Pending -> (Confirmed | Failed). Nothing moves backward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Pending,
    Confirmed { receipt: TxReceipt },
    Failed { error: String },
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "Idle",
            LifecycleState::Pending => "Pending",
            LifecycleState::Confirmed { .. } => "Confirmed",
            LifecycleState::Failed { .. } => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecycleState::Confirmed { .. } | LifecycleState::Failed { .. }
        )
    }
}

/// One submitted operation and where it currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionLifecycle {
    id: LifecycleId,
    kind: OperationKind,
    /// Account that submitted, used to template explorer links
    account: Option<Address>,
    amount: String,
    state: LifecycleState,
}

impl TransactionLifecycle {
    pub fn new(
        id: LifecycleId,
        kind: OperationKind,
        account: Option<Address>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            account,
            amount: amount.into(),
            state: LifecycleState::Idle,
        }
    }

    pub fn id(&self) -> LifecycleId {
        self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == LifecycleState::Pending
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn receipt(&self) -> Option<&TxReceipt> {
        match &self.state {
            LifecycleState::Confirmed { receipt } => Some(receipt),
            _ => None,
        }
    }

    pub fn tx_hash(&self) -> Option<B256> {
        self.receipt().map(|r| r.tx_hash)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LifecycleState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Idle -> Pending
    pub fn mark_pending(&mut self) -> Result<()> {
        self.transition(LifecycleState::Pending)
    }

    /// Pending -> Confirmed
    pub fn confirm(&mut self, receipt: TxReceipt) -> Result<()> {
        self.transition(LifecycleState::Confirmed { receipt })
    }

    /// Pending -> Failed
    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(LifecycleState::Failed {
            error: error.into(),
        })
    }

    fn transition(&mut self, next: LifecycleState) -> Result<()> {
        let allowed = matches!(
            (&self.state, &next),
            (LifecycleState::Idle, LifecycleState::Pending)
                | (LifecycleState::Pending, LifecycleState::Confirmed { .. })
                | (LifecycleState::Pending, LifecycleState::Failed { .. })
        );
        if !allowed {
            return Err(CrossLoanError::IllegalTransition {
                from: self.state.name(),
                to: next.name(),
            });
        }

        debug!(
            kind = %self.kind,
            id = %self.id,
            from = self.state.name(),
            to = next.name(),
            "lifecycle transition"
        );
        self.state = next;
        Ok(())
    }
}

/// Tracks at most one lifecycle per operation kind for display.
///
/// Starting a lifecycle replaces whatever was tracked for that kind. Results
/// for a replaced lifecycle are dropped on [`commit`](Self::commit) so a slow
/// earlier submission can never overwrite a newer one.
#[derive(Debug, Clone)]
pub struct LifecycleTracker {
    tracked: Arc<DashMap<OperationKind, TransactionLifecycle>>,
    next_id: Arc<AtomicU64>,
    updates: broadcast::Sender<TransactionLifecycle>,
}

impl LifecycleTracker {
    const UPDATE_CAPACITY: usize = 64;

    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(Self::UPDATE_CAPACITY);
        Self {
            tracked: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            updates,
        }
    }

    /// Create a lifecycle for `kind`, move it to Pending and track it.
    pub fn start(
        &self,
        kind: OperationKind,
        account: Option<Address>,
        amount: &str,
    ) -> Result<TransactionLifecycle> {
        let id = LifecycleId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut lifecycle = TransactionLifecycle::new(id, kind, account, amount);
        lifecycle.mark_pending()?;

        if let Some(previous) = self.tracked.insert(kind, lifecycle.clone()) {
            if previous.is_pending() {
                info!(%kind, superseded = %previous.id(), by = %id, "superseding pending lifecycle");
            }
        }
        self.publish(&lifecycle);
        Ok(lifecycle)
    }

    /// Store a resolved lifecycle if it is still the one tracked for its kind.
    /// Returns false when it has been superseded.
    pub fn commit(&self, lifecycle: &TransactionLifecycle) -> bool {
        let kind = lifecycle.kind();
        {
            let Some(mut current) = self.tracked.get_mut(&kind) else {
                warn!(%kind, id = %lifecycle.id(), "result for an untracked lifecycle dropped");
                return false;
            };
            if current.id() != lifecycle.id() {
                debug!(
                    %kind,
                    id = %lifecycle.id(),
                    current = %current.id(),
                    "result for superseded lifecycle dropped"
                );
                return false;
            }
            *current = lifecycle.clone();
        }
        self.publish(lifecycle);
        true
    }

    pub fn current(&self, kind: OperationKind) -> Option<TransactionLifecycle> {
        self.tracked.get(&kind).map(|entry| entry.value().clone())
    }

    /// True while the tracked lifecycle of `kind` awaits confirmation.
    pub fn is_pending(&self, kind: OperationKind) -> bool {
        self.tracked
            .get(&kind)
            .map(|entry| entry.is_pending())
            .unwrap_or(false)
    }

    /// Stop tracking `kind`. A result arriving later is dropped.
    pub fn clear(&self, kind: OperationKind) {
        self.tracked.remove(&kind);
    }

    pub fn clear_all(&self) {
        self.tracked.clear();
    }

    /// Every start and accepted commit is published here.
    pub fn subscribe(&self) -> broadcast::Receiver<TransactionLifecycle> {
        self.updates.subscribe()
    }

    fn publish(&self, lifecycle: &TransactionLifecycle) {
        // no subscribers is fine
        let _ = self.updates.send(lifecycle.clone());
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}
