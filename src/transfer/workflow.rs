//! Transfer Workflow Controller
//!
//! Drives one transfer screen from origin resolution to completion.
//!
//! Resolution is two-tier: an origin handed over by the previous screen is
//! used directly, otherwise the id is read from the screen location and
//! looked up in the directory. A failed resolution ends the workflow; the
//! operator is sent back to the listing.
//!
//! Submission is guarded by the `Submitting` state. It is the only guard and
//! is released on every exit path: success, rejection, transport failure,
//! timeout, and the submit future being dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::{ResolutionError, TransferError, ValidationError};
use super::form::TransferForm;
use super::host::{Notice, Route, ScreenHost};
use super::state::WorkflowState;
use super::types::{TransferRequest, TransferResult, WorkflowId};
use super::validator;
use super::violations::Violations;
use crate::benefit::{Benefit, Origin};
use crate::config::WorkflowConfig;
use crate::directory::{BenefitDirectory, DirectoryError};

/// What a submit request led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not in `Ready` (already submitting, finished, or never resolved)
    Ignored,
    /// Blocked locally, no network call was made
    Rejected(ValidationError),
    Succeeded,
    /// Transfer did not go through; the workflow is back in `Ready`
    Failed(TransferError),
}

/// Read-only view of the form for the host to render
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub destination: Option<i64>,
    pub destination_touched: bool,
    pub destination_violations: Violations,
    pub amount: Option<Decimal>,
    pub amount_touched: bool,
    pub amount_violations: Violations,
}

struct Inner {
    state: WorkflowState,
    origin: Option<Origin>,
    form: TransferForm,
}

pub struct TransferWorkflow {
    id: WorkflowId,
    directory: Arc<dyn BenefitDirectory>,
    host: Arc<dyn ScreenHost>,
    config: WorkflowConfig,
    inner: Mutex<Inner>,
}

/// Puts a workflow still marked `Submitting` back to `Ready` when dropped
struct InFlight<'a> {
    workflow: &'a TransferWorkflow,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.workflow.lock();
        if inner.state == WorkflowState::Submitting {
            warn!(workflow_id = %self.workflow.id, "Submit abandoned, releasing guard");
            inner.state = WorkflowState::Ready;
        }
    }
}

impl TransferWorkflow {
    /// Open a transfer screen
    ///
    /// `hint` is the origin benefit passed along by the previous screen.
    /// Without it, the origin id is taken from `location`: the segment
    /// following `config.listing_segment`, e.g. `/benefits/42/transfer`.
    pub async fn open(
        directory: Arc<dyn BenefitDirectory>,
        host: Arc<dyn ScreenHost>,
        config: WorkflowConfig,
        hint: Option<Benefit>,
        location: &str,
    ) -> Self {
        let workflow = Self {
            id: WorkflowId::new(),
            directory,
            host,
            config,
            inner: Mutex::new(Inner {
                state: WorkflowState::Resolving,
                origin: None,
                form: TransferForm::new(),
            }),
        };

        let resolved = match hint {
            Some(benefit) => {
                debug!(workflow_id = %workflow.id, "Origin supplied by caller");
                Origin::try_from(benefit)
                    .map_err(|e| ResolutionError::MalformedHint(e.to_string()))
            }
            None => workflow.resolve_from_location(location).await,
        };

        match resolved {
            Ok(origin) => workflow.initialize_form(origin),
            Err(e) => workflow.fail_resolution(e),
        }

        workflow
    }

    async fn resolve_from_location(&self, location: &str) -> Result<Origin, ResolutionError> {
        let id = parse_origin_id(location, &self.config.listing_segment)?;
        debug!(
            workflow_id = %self.id,
            origin_id = id,
            directory = self.directory.name(),
            "No origin supplied, looking it up"
        );

        match self.directory.lookup(id).await {
            Ok(benefit) => {
                Origin::try_from(benefit).map_err(|e| ResolutionError::MalformedRecord(e.to_string()))
            }
            Err(DirectoryError::NotFound(id)) => Err(ResolutionError::NotFound(id)),
            Err(e) => Err(ResolutionError::Unavailable(e.to_string())),
        }
    }

    fn initialize_form(&self, origin: Origin) {
        if !origin.is_active() {
            warn!(
                workflow_id = %self.id,
                origin_id = origin.id(),
                "Origin benefit is inactive, the directory is expected to reject transfers"
            );
        }

        let balance = origin.balance();
        let mut inner = self.lock();

        let mut form = TransferForm::new();
        form.amount.subscribe(Box::new(move |amount: Option<Decimal>, violations: &mut Violations| {
            validator::check_balance(balance, amount, violations);
        }));
        validator::check_balance(balance, form.amount.value(), form.amount.violations_mut());

        info!(
            workflow_id = %self.id,
            origin_id = origin.id(),
            balance = %balance,
            "Transfer form ready"
        );

        inner.form = form;
        inner.origin = Some(origin);
        inner.state = WorkflowState::Ready;
    }

    fn fail_resolution(&self, error: ResolutionError) {
        warn!(workflow_id = %self.id, code = error.code(), "Origin resolution failed: {}", error);

        self.lock().state = WorkflowState::Failed(error);
        self.host.notify(Notice::not_found());
        self.host.navigate(Route::Listing);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> WorkflowId {
        self.id
    }

    pub fn state(&self) -> WorkflowState {
        self.lock().state.clone()
    }

    pub fn origin(&self) -> Option<Origin> {
        self.lock().origin.clone()
    }

    pub fn form(&self) -> FormSnapshot {
        let inner = self.lock();
        let form = &inner.form;
        FormSnapshot {
            destination: form.destination.value(),
            destination_touched: form.destination.is_touched(),
            destination_violations: form.destination.violations().clone(),
            amount: form.amount.value(),
            amount_touched: form.amount.is_touched(),
            amount_violations: form.amount.violations().clone(),
        }
    }

    /// Whether the submit action should be offered
    pub fn can_submit(&self) -> bool {
        self.lock().state.can_submit()
    }

    /// Edit the destination id. Ignored outside `Ready`.
    pub fn set_destination(&self, destination: Option<i64>) -> bool {
        let mut inner = self.lock();
        if inner.state != WorkflowState::Ready {
            return false;
        }
        inner.form.destination.set_value(destination);
        true
    }

    /// Edit the amount; the balance check re-runs immediately. Ignored outside `Ready`.
    pub fn set_amount(&self, amount: Option<Decimal>) -> bool {
        let mut inner = self.lock();
        if inner.state != WorkflowState::Ready {
            return false;
        }
        inner.form.amount.set_value(amount);
        true
    }

    /// Validate the form and, if it holds, submit the transfer
    pub async fn submit(&self) -> SubmitOutcome {
        let request = match self.prepare_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        let guard = InFlight {
            workflow: self,
            armed: true,
        };

        info!(workflow_id = %self.id, %request, "Submitting transfer");

        let timeout = self.config.submit_timeout();
        let result = match tokio::time::timeout(timeout, self.directory.transfer(&request)).await {
            Ok(Ok(TransferResult::Success { message })) => Ok(message),
            Ok(Ok(TransferResult::Failed { reason })) => Err(TransferError::Rejected { reason }),
            Ok(Err(DirectoryError::Timeout(detail))) => {
                warn!(workflow_id = %self.id, %detail, "Directory request timed out");
                Err(TransferError::Timeout)
            }
            Ok(Err(e)) => Err(TransferError::Transport(e.to_string())),
            Err(_) => {
                warn!(
                    workflow_id = %self.id,
                    timeout_ms = self.config.submit_timeout_ms,
                    "Submit timeout elapsed"
                );
                Err(TransferError::Timeout)
            }
        };

        guard.disarm();
        self.complete(result)
    }

    /// Local checks and the Ready -> Submitting transition, under one lock
    fn prepare_submit(&self) -> Result<TransferRequest, SubmitOutcome> {
        let mut inner = self.lock();

        match inner.state {
            WorkflowState::Ready => {}
            WorkflowState::Submitting => {
                debug!(workflow_id = %self.id, "Transfer already in flight, ignoring submit");
                return Err(SubmitOutcome::Ignored);
            }
            ref state => {
                debug!(workflow_id = %self.id, state = %state, "Submit outside READY, ignoring");
                return Err(SubmitOutcome::Ignored);
            }
        }

        // Untouched fields never fired a change, so check everything again
        inner.form.revalidate_all();
        if let Some((field, violations)) = inner.form.first_invalid() {
            inner.form.mark_all_touched();
            drop(inner);

            debug!(workflow_id = %self.id, field, %violations, "Form invalid, submit blocked");
            self.host.notify(Notice::invalid_form());
            return Err(SubmitOutcome::Rejected(ValidationError::Violations {
                field,
                violations,
            }));
        }

        let (Some(origin_id), Some(destination_id), Some(amount)) = (
            inner.origin.as_ref().map(Origin::id),
            inner.form.destination.value(),
            inner.form.amount.value(),
        ) else {
            return Err(SubmitOutcome::Ignored);
        };

        if destination_id == origin_id {
            drop(inner);

            debug!(workflow_id = %self.id, origin_id, "Destination equals origin, submit blocked");
            self.host.notify(Notice::same_entity());
            return Err(SubmitOutcome::Rejected(ValidationError::SameEntity(origin_id)));
        }

        inner.state = WorkflowState::Submitting;
        Ok(TransferRequest::new(origin_id, destination_id, amount))
    }

    fn complete(&self, result: Result<Option<String>, TransferError>) -> SubmitOutcome {
        match result {
            Ok(message) => {
                self.lock().state = WorkflowState::Succeeded;
                info!(workflow_id = %self.id, message = ?message, "Transfer succeeded");

                self.host.notify(Notice::transfer_succeeded());
                self.host.navigate(Route::Listing);
                SubmitOutcome::Succeeded
            }
            Err(error) => {
                self.lock().state = WorkflowState::Ready;
                warn!(workflow_id = %self.id, code = error.code(), "Transfer failed: {}", error);

                let notice = match error {
                    TransferError::Timeout => Notice::transfer_timed_out(),
                    ref e => Notice::transfer_failed(e.reason()),
                };
                self.host.notify(notice);
                SubmitOutcome::Failed(error)
            }
        }
    }

    /// Leave the screen, discarding edits. Refused while a transfer is in flight.
    pub fn cancel(&self) -> bool {
        let mut inner = self.lock();
        if !inner.state.can_cancel() {
            debug!(workflow_id = %self.id, "Cancel refused while submitting");
            return false;
        }

        inner.form.reset();
        if !inner.state.is_terminal() {
            inner.state = WorkflowState::Cancelled;
        }
        drop(inner);

        info!(workflow_id = %self.id, "Transfer cancelled");
        self.host.navigate(Route::Listing);
        true
    }
}

/// Origin id from a screen location such as `/benefits/42/transfer`
///
/// The id is the segment right after `listing_segment` and must be a
/// positive integer. Query string and fragment are ignored.
pub fn parse_origin_id(location: &str, listing_segment: &str) -> Result<i64, ResolutionError> {
    let malformed = || ResolutionError::MalformedIdentifier(location.to_string());

    let path = location.split(['?', '#']).next().unwrap_or_default();
    let mut segments = path.split('/');

    segments.by_ref().find(|s| *s == listing_segment).ok_or_else(malformed)?;
    let raw = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origin_id() {
        assert_eq!(parse_origin_id("/benefits/42/transfer", "benefits"), Ok(42));
        assert_eq!(parse_origin_id("/benefits/7", "benefits"), Ok(7));
        assert_eq!(parse_origin_id("/app/benefits/3/transfer?x=1", "benefits"), Ok(3));
        assert_eq!(parse_origin_id("/beneficios/9/transferir", "beneficios"), Ok(9));
        assert_eq!(parse_origin_id("/benefits/5#top", "benefits"), Ok(5));
    }

    #[test]
    fn test_parse_origin_id_rejects_bad_locations() {
        for location in [
            "",
            "/",
            "/benefits",
            "/benefits/",
            "/benefits/abc/transfer",
            "/benefits/0/transfer",
            "/benefits/-3/transfer",
            "/benefits/4.5/transfer",
            "/other/42/transfer",
        ] {
            assert_eq!(
                parse_origin_id(location, "benefits"),
                Err(ResolutionError::MalformedIdentifier(location.to_string())),
                "location={location:?}"
            );
        }
    }
}
