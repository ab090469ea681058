//! Submission lifecycle: one request at a time, explicit loading and error
//! state, last good result kept across failures.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{AnalysisError, AnalysisResult, AnalysisService};
use crate::form::{FormStore, ParameterSet};

pub type SubmissionOutcome = Result<AnalysisResult, AnalysisError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub result: Option<AnalysisResult>,
    pub loading: bool,
    pub error: String,
    pub last_success_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Settled(Settlement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Failure,
}

#[derive(Debug)]
pub struct SubmissionController {
    state: UiState,
    phase: Phase,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            state: UiState::default(),
            phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The trigger is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.state.loading
    }

    /// Enter `Pending` and return the request body, or `None` if a request is
    /// already in flight. Clears the previous error but keeps the previous result.
    pub fn begin(&mut self, store: &FormStore) -> Option<ParameterSet> {
        if !self.can_submit() {
            debug!("submit ignored: request already in flight");
            return None;
        }
        self.state.loading = true;
        self.state.error.clear();
        self.phase = Phase::Pending;
        info!(fields = store.get().len(), "analysis submitted");
        Some(store.payload())
    }

    /// Record the outcome of the in-flight request and leave `Pending`.
    pub fn settle(&mut self, outcome: SubmissionOutcome) {
        match outcome {
            Ok(result) => {
                self.state.result = Some(result);
                self.state.last_success_at = Some(Local::now());
                self.phase = Phase::Settled(Settlement::Success);
                info!("analysis settled: success");
            }
            Err(err) => {
                warn!(kind = ?err.kind(), err = %err, "analysis settled: failure");
                self.state.error = err.user_message();
                self.phase = Phase::Settled(Settlement::Failure);
            }
        }
        self.state.loading = false;
    }

    /// Run one submission to completion on the current task. Returns `false`
    /// when the request was refused or failed.
    pub async fn submit<S>(&mut self, service: &S, store: &FormStore) -> bool
    where
        S: AnalysisService + ?Sized,
    {
        let Some(payload) = self.begin(store) else {
            return false;
        };
        let outcome = service.analyze(&payload).await;
        let ok = outcome.is_ok();
        self.settle(outcome);
        ok
    }
}

/// Run the request on the runtime and report the outcome through `tx`.
///
/// The request itself runs in its own task so that a panic inside it still
/// produces an outcome (`AnalysisError::Aborted`) and the UI leaves `Pending`.
pub fn dispatch(
    service: Arc<dyn AnalysisService>,
    payload: ParameterSet,
    tx: Sender<SubmissionOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let request = tokio::spawn(async move { service.analyze(&payload).await });
        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(join_err) => Err(AnalysisError::Aborted(join_err.to_string())),
        };
        if tx.send(outcome).is_err() {
            debug!("ui inbox closed before analysis settled");
        }
    })
}
