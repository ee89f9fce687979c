use crate::advanced::calls;
use crate::basic::lifecycle::{LifecycleTracker, TransactionLifecycle};
use crate::basic::reads;
use crate::basic::status::{self, DisplayMessage};
use crate::basic::validation::{self, ValidationOutcome};
use crate::config::DeploymentConfig;
use crate::core::connection::ChainConnection;
use crate::core::wallet::WalletContext;
use crate::error::{CrossLoanError, Result};
use crate::types::{BalanceSnapshot, LoanPosition, OperationKind, OperationRequest};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Validates, submits and tracks user operations for one deployment.
///
/// The guard owns the lifecycle tracker; clones of it handed to the UI
/// (via [`tracker`](Self::tracker)) observe the same state.
pub struct TransactionGuard<C, W>
where
    C: ChainConnection + 'static,
    W: WalletContext,
{
    config: Arc<DeploymentConfig>,
    connection: Arc<C>,
    wallet: Arc<W>,
    tracker: LifecycleTracker,
}

/// A submitted operation: its lifecycle as of submission plus the task
/// awaiting confirmation.
#[derive(Debug)]
pub struct Submission {
    lifecycle: TransactionLifecycle,
    task: JoinHandle<TransactionLifecycle>,
}

impl Submission {
    /// Lifecycle as returned by `submit`: Pending, or Failed when the call
    /// could not be built.
    pub fn lifecycle(&self) -> &TransactionLifecycle {
        &self.lifecycle
    }

    /// Wait for the terminal state. Resolves even if a newer submission of
    /// the same kind has replaced this one in the tracker.
    pub async fn wait(self) -> Result<TransactionLifecycle> {
        self.task
            .await
            .map_err(|e| CrossLoanError::Task(e.to_string()))
    }
}

impl<C, W> TransactionGuard<C, W>
where
    C: ChainConnection + 'static,
    W: WalletContext,
{
    pub fn new(config: DeploymentConfig, connection: Arc<C>, wallet: Arc<W>) -> Self {
        Self {
            config: Arc::new(config),
            connection,
            wallet,
            tracker: LifecycleTracker::new(),
        }
    }

    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    pub fn tracker(&self) -> &LifecycleTracker {
        &self.tracker
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Build a request for `kind` with the configured required chain.
    pub fn request(
        &self,
        kind: OperationKind,
        amount: impl Into<String>,
    ) -> Result<OperationRequest> {
        let op = self.config.operation(kind)?;
        Ok(OperationRequest::new(kind, amount, op.required_chain_id))
    }

    /// Mint requests always use the configured mint amount.
    pub fn mint_request(&self) -> Result<OperationRequest> {
        self.request(OperationKind::Mint, self.config.mint_amount.clone())
    }

    /// Validate against the wallet's current account and chain. `balance` is
    /// only consulted for operations configured with a balance check.
    pub fn validate(
        &self,
        request: &OperationRequest,
        balance: Option<&BalanceSnapshot>,
    ) -> ValidationOutcome {
        let check_balance = self
            .config
            .operation(request.kind)
            .map(|op| op.check_balance)
            .unwrap_or(false);
        let balance = balance.filter(|_| check_balance);

        let account = self.wallet.account();
        let outcome = validation::validate(
            request,
            account.as_ref(),
            self.wallet.chain_id(),
            balance,
        );
        if let ValidationOutcome::Invalid(reason) = outcome {
            info!(kind = %request.kind, ?reason, "request rejected by validation");
        }
        outcome
    }

    /// Validate, then fetch the relevant balance and apply the balance rule.
    ///
    /// The balance is only read once every other rule passes, so an earlier
    /// rule always wins over a failing balance read.
    pub async fn check(&self, request: &OperationRequest) -> Result<ValidationOutcome> {
        let outcome = self.validate(request, None);
        if !outcome.is_valid() {
            return Ok(outcome);
        }

        let op = self.config.operation(request.kind)?;
        let Some(owner) = self.wallet.account().filter(|_| op.check_balance) else {
            return Ok(outcome);
        };
        let balance =
            reads::fetch_operation_balance(&*self.connection, &self.config, request.kind, &owner)
                .await?;
        Ok(self.validate(request, Some(&balance)))
    }

    /// Start a lifecycle for a validated request and return immediately.
    ///
    /// The tracked lifecycle for the request's kind is Pending when this
    /// returns. The request is not re-validated. Must be called from within a
    /// tokio runtime.
    pub fn submit(&self, request: OperationRequest) -> Result<Submission> {
        let account = self.wallet.account();
        let mut lifecycle = self.tracker.start(request.kind, account, &request.amount)?;

        let call = match calls::prepare_call(&self.config, &request, account) {
            Ok(call) => call,
            Err(e) => {
                warn!(kind = %request.kind, error = %e, "failed to prepare call");
                lifecycle.fail(status::preparation_failure_text(request.kind))?;
                self.tracker.commit(&lifecycle);
                let resolved = lifecycle.clone();
                return Ok(Submission {
                    lifecycle,
                    task: tokio::spawn(async move { resolved }),
                });
            },
        };

        info!(
            kind = %request.kind,
            id = %lifecycle.id(),
            chain_id = call.chain_id,
            signature = %call.signature,
            "submitting transaction"
        );

        let connection = Arc::clone(&self.connection);
        let tracker = self.tracker.clone();
        let mut resolved = lifecycle.clone();
        let task = tokio::spawn(async move {
            let transition = match connection.send_and_confirm(&call).await {
                Ok(receipt) => {
                    info!(
                        kind = %resolved.kind(),
                        id = %resolved.id(),
                        tx_hash = %receipt.tx_hash,
                        "transaction confirmed"
                    );
                    resolved.confirm(receipt)
                },
                Err(failure) => {
                    warn!(
                        kind = %resolved.kind(),
                        id = %resolved.id(),
                        error = %failure,
                        "transaction failed"
                    );
                    resolved.fail(failure.describe())
                },
            };
            match transition {
                Ok(()) => {
                    tracker.commit(&resolved);
                },
                Err(e) => warn!(id = %resolved.id(), error = %e, "lifecycle left unresolved"),
            }
            resolved
        });

        Ok(Submission { lifecycle, task })
    }

    /// `check` followed by `submit`; a validation failure is returned as
    /// [`CrossLoanError::Validation`] and nothing is tracked.
    pub async fn execute(&self, request: OperationRequest) -> Result<Submission> {
        self.check(&request).await?.into_result()?;
        self.submit(request)
    }

    pub fn current(&self, kind: OperationKind) -> Option<TransactionLifecycle> {
        self.tracker.current(kind)
    }

    /// True while `kind` awaits confirmation; the UI disables its button.
    pub fn is_busy(&self, kind: OperationKind) -> bool {
        self.tracker.is_pending(kind)
    }

    /// Forget every tracked lifecycle, e.g. when the screen showing them is
    /// torn down. Results still in flight resolve their own `Submission`
    /// but are no longer tracked.
    pub fn reset(&self) {
        self.tracker.clear_all();
    }

    /// Banner for the tracked lifecycle of `kind`, if any.
    pub fn status(&self, kind: OperationKind) -> Result<Option<DisplayMessage>> {
        match self.tracker.current(kind) {
            Some(lifecycle) => status::derive_status_message(&lifecycle, &self.config),
            None => Ok(None),
        }
    }

    /// Warning banner for a validation outcome, `None` when valid.
    pub fn warning(
        &self,
        request: &OperationRequest,
        outcome: ValidationOutcome,
    ) -> Option<DisplayMessage> {
        match outcome {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => {
                Some(status::validation_message(request.kind, reason, &self.config))
            },
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TransactionLifecycle> {
        self.tracker.subscribe()
    }

    /// Balance for `kind` of the connected account, `None` while disconnected.
    pub async fn balance(&self, kind: OperationKind) -> Result<Option<BalanceSnapshot>> {
        match self.wallet.account() {
            Some(owner) => {
                reads::fetch_operation_balance(&*self.connection, &self.config, kind, &owner)
                    .await
                    .map(Some)
            },
            None => Ok(None),
        }
    }

    /// Collateral and loan of the connected account.
    pub async fn loan_position(&self) -> Result<LoanPosition> {
        let account = self.wallet.account().ok_or(CrossLoanError::MissingAccount)?;
        reads::read_loan_position(&*self.connection, &self.config, &account).await
    }
}
