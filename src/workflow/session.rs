//! One user's workflow: current state, the data needed to render it, and
//! the wiring between user intents and the generation orchestrator.
//!
//! The session is the sole recovery boundary: orchestrator failures are
//! caught here, the workflow leaves `Generating`, and the user sees a
//! generic message while the typed error is handed back for diagnostics.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::state::{Transition, WorkflowEvent, WorkflowState, transition};
use crate::compositing::CompositingBackend;
use crate::error::MatchshotError;
use crate::orchestrator::{
    GenerationOrchestrator, GenerationRecord, GenerationRequest, GenerationResult,
};
use crate::prompt::{PromptSpec, StyleSelection};
use crate::synthesis::SynthesisBackend;

/// User-facing message shown for any generation failure. The error
/// taxonomy stays internal.
const GENERIC_FAILURE_MESSAGE: &str = "Image generation failed. Please try again.";

/// What one call to [`WorkflowSession::generate`] produced.
#[derive(Debug)]
pub enum GenerateOutcome {
    Completed(GenerationRecord),
    /// The run started and failed; the session is back in Options with the
    /// generic message set. Carries the typed error for diagnostics.
    Failed(MatchshotError),
    /// The request was a no-op in the current state.
    NotStarted,
}

/// A single workflow instance. Exactly one state is live at a time.
pub struct WorkflowSession {
    id: Uuid,
    state: WorkflowState,
    history: Vec<WorkflowState>,
    source_face: Option<Vec<u8>>,
    selection: StyleSelection,
    prompt_spec: Option<PromptSpec>,
    result: Option<GenerationResult>,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    listeners: Vec<Box<dyn Fn(WorkflowState)>>,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: WorkflowState::Upload,
            history: Vec::new(),
            source_face: None,
            selection: StyleSelection::default(),
            prompt_spec: None,
            result: None,
            last_error: None,
            created_at: Utc::now(),
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn history(&self) -> &[WorkflowState] {
        &self.history
    }

    pub fn selection(&self) -> &StyleSelection {
        &self.selection
    }

    pub fn source_face(&self) -> Option<&[u8]> {
        self.source_face.as_deref()
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Pin the session to a fixed per-app template instead of the composed
    /// selection (the single-pick front end).
    pub fn use_prompt_spec(&mut self, spec: PromptSpec) {
        self.prompt_spec = Some(spec);
    }

    /// Register a callback invoked after every applied event.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(WorkflowState)>) {
        self.listeners.push(listener);
    }

    /// Apply one event: evaluate the transition, update session data, and
    /// notify listeners unless the event was ignored.
    pub fn apply(&mut self, event: WorkflowEvent) -> Transition {
        // Proceed needs a selected file; without one it is a no-op.
        if matches!(event, WorkflowEvent::Proceed) && self.source_face.is_none() {
            return Transition::Ignored;
        }

        let t = transition(self.state, &event);
        match t {
            Transition::Ignored => return t,
            Transition::Stay => {}
            Transition::Next(next) => {
                self.history.push(self.state);
                self.state = next;
            }
        }

        match event {
            WorkflowEvent::FileSelected(bytes) => self.source_face = Some(bytes),
            WorkflowEvent::SelectionChanged(selection) => self.selection = selection,
            WorkflowEvent::GenerateRequested => self.last_error = None,
            WorkflowEvent::GenerationSucceeded(result) => self.result = Some(result),
            WorkflowEvent::GenerationFailed(message) => {
                self.result = None;
                self.last_error = Some(message);
            }
            WorkflowEvent::TryAgain => self.result = None,
            WorkflowEvent::StartOver => {
                self.source_face = None;
                self.selection = StyleSelection::default();
                self.prompt_spec = None;
                self.result = None;
                self.last_error = None;
            }
            WorkflowEvent::Proceed => {}
        }

        for listener in &self.listeners {
            listener(self.state);
        }
        t
    }

    fn build_request(&self) -> Option<GenerationRequest> {
        let face = self.source_face.clone()?;
        let spec = self
            .prompt_spec
            .unwrap_or(PromptSpec::Styled(self.selection));
        Some(GenerationRequest {
            source_face: face,
            prompt_spec: spec,
        })
    }

    /// Enter `Generating` and run the orchestrator once.
    ///
    /// A request made outside `Options` (in particular while already
    /// generating) is a no-op. On failure the session transitions back to
    /// `Options` with the generic message set and returns the typed error.
    pub async fn generate<S, C>(
        &mut self,
        orchestrator: &GenerationOrchestrator<S, C>,
    ) -> GenerateOutcome
    where
        S: SynthesisBackend,
        C: CompositingBackend,
    {
        if self.apply(WorkflowEvent::GenerateRequested)
            != Transition::Next(WorkflowState::Generating)
        {
            return GenerateOutcome::NotStarted;
        }

        let request = match self.build_request() {
            Some(request) => request,
            None => {
                self.apply(WorkflowEvent::GenerationFailed(
                    GENERIC_FAILURE_MESSAGE.to_string(),
                ));
                return GenerateOutcome::Failed(MatchshotError::Config(
                    "no face image selected".to_string(),
                ));
            }
        };

        match orchestrator.run(request).await {
            Ok(record) => {
                self.apply(WorkflowEvent::GenerationSucceeded(record.result.clone()));
                GenerateOutcome::Completed(record)
            }
            Err(err) => {
                self.apply(WorkflowEvent::GenerationFailed(
                    GENERIC_FAILURE_MESSAGE.to_string(),
                ));
                GenerateOutcome::Failed(err)
            }
        }
    }
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}
