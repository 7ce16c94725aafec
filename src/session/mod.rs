use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{AnalyzeError, Analyzer};
use crate::model::{AnalysisRequest, AnalysisResult};

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while analyzing the text.";

/// What the screen is showing. Result and error are never both present,
/// and `Loading` carries neither.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl RequestState {
    pub fn name(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Loading => "loading",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed and nothing was sent.
    Ignored,
    Started(Uuid),
}

type CallOutcome = Result<AnalysisResult, AnalyzeError>;

struct InFlight {
    request_id: Uuid,
    started_at: DateTime<Utc>,
    handle: JoinHandle<CallOutcome>,
}

/// Request lifecycle for one screen: holds the typed input, the current
/// `RequestState`, and at most one pending analysis call.
///
/// `submit` spawns onto the current tokio runtime, so it must be called
/// from within one.
pub struct AnalysisSession {
    analyzer: Arc<dyn Analyzer>,
    request_timeout: Duration,
    input: String,
    state: RequestState,
    in_flight: Option<InFlight>,
    completed_at: Option<DateTime<Utc>>,
}

impl AnalysisSession {
    pub fn new(analyzer: Arc<dyn Analyzer>, request_timeout: Duration) -> Self {
        Self {
            analyzer,
            request_timeout,
            input: String::new(),
            state: RequestState::Idle,
            in_flight: None,
            completed_at: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Id of the call currently pending, if any.
    pub fn pending_request(&self) -> Option<Uuid> {
        self.in_flight.as_ref().map(|f| f.request_id)
    }

    /// When the shown result arrived. `None` unless `Succeeded`.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Starts analysing the current input. Blank input is a no-op. A call
    /// still pending from an earlier submit is aborted and its outcome is
    /// never applied.
    pub fn submit(&mut self) -> SubmitOutcome {
        let Some(request) = AnalysisRequest::new(self.input.clone()) else {
            debug!(state = self.state.name(), "blank input, submit ignored");
            return SubmitOutcome::Ignored;
        };

        self.abort_in_flight();

        let request_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            request_id = %request_id,
            chars = request.char_count(),
            previous_state = self.state.name(),
            "analysis submitted"
        );

        let analyzer = Arc::clone(&self.analyzer);
        let limit = self.request_timeout;
        let handle = tokio::spawn(async move {
            match timeout(limit, analyzer.analyze(&request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AnalyzeError::Timeout(limit)),
            }
        });

        self.state = RequestState::Loading;
        self.completed_at = None;
        self.in_flight = Some(InFlight {
            request_id,
            started_at,
            handle,
        });

        SubmitOutcome::Started(request_id)
    }

    /// Waits for the pending call (bounded by the request timeout) and
    /// applies its outcome. With nothing pending the state is returned as is.
    pub async fn settle(&mut self) -> &RequestState {
        if let Some(in_flight) = self.in_flight.as_mut() {
            let joined = (&mut in_flight.handle).await;
            let request_id = in_flight.request_id;
            let started_at = in_flight.started_at;
            self.in_flight = None;
            self.apply(request_id, started_at, joined);
        }
        &self.state
    }

    /// Applies the pending outcome only if the call has already finished.
    pub async fn refresh(&mut self) -> &RequestState {
        let finished = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.handle.is_finished());

        if finished {
            self.settle().await
        } else {
            &self.state
        }
    }

    /// Convenience for `set_input` + `submit` + `settle`.
    pub async fn analyze(&mut self, text: impl Into<String>) -> &RequestState {
        self.set_input(text);
        self.submit();
        self.settle().await
    }

    fn apply(
        &mut self,
        request_id: Uuid,
        started_at: DateTime<Utc>,
        joined: Result<CallOutcome, JoinError>,
    ) {
        let elapsed_ms = (Utc::now() - started_at).num_milliseconds();

        match joined {
            Ok(Ok(result)) => {
                info!(
                    request_id = %request_id,
                    elapsed_ms,
                    label = result.label.as_str(),
                    trust_score = result.trust_score,
                    "analysis succeeded"
                );
                self.completed_at = Some(Utc::now());
                self.state = RequestState::Succeeded(result);
            }
            Ok(Err(err)) => {
                warn!(
                    request_id = %request_id,
                    elapsed_ms,
                    kind = err.kind(),
                    error = ?err,
                    "analysis failed"
                );
                self.completed_at = None;
                self.state = RequestState::Failed(err.to_string());
            }
            Err(err) => {
                warn!(
                    request_id = %request_id,
                    elapsed_ms,
                    error = %err,
                    "analysis task did not complete"
                );
                self.completed_at = None;
                self.state = RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_string());
            }
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.handle.abort();
            info!(request_id = %previous.request_id, "pending analysis superseded");
        }
    }
}

impl Drop for AnalysisSession {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}
