use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orchestrator::GenerationResult;
use crate::prompt::StyleSelection;

/// The client-visible workflow states. Exactly one is live at a time;
/// every session starts at `Upload` and nothing persists across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    Upload,
    Options,
    Generating,
    Result,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Upload => write!(f, "UPLOAD"),
            WorkflowState::Options => write!(f, "OPTIONS"),
            WorkflowState::Generating => write!(f, "GENERATING"),
            WorkflowState::Result => write!(f, "RESULT"),
        }
    }
}

/// User intents and orchestrator completion events that drive the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// A face photo was picked; populates the preview without leaving Upload.
    FileSelected(Vec<u8>),
    /// Move from Upload to the options screen.
    Proceed,
    /// The style parameters changed on the options screen.
    SelectionChanged(StyleSelection),
    GenerateRequested,
    GenerationSucceeded(GenerationResult),
    GenerationFailed(String),
    /// Retry with new settings; discards the current result.
    TryAgain,
    /// Full reset back to Upload.
    StartOver,
}

/// Outcome of applying an event in a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to a new state.
    Next(WorkflowState),
    /// Data update only; the state does not change.
    Stay,
    /// The event has no meaning in this state and is dropped.
    Ignored,
}

/// Total transition function over (state, event).
///
/// `GenerateRequested` is only honored in `Options`; in `Generating` it is
/// `Ignored`, which is the re-entrancy guard: at most one orchestrator
/// invocation per `Generating` entry.
pub fn transition(state: WorkflowState, event: &WorkflowEvent) -> Transition {
    use WorkflowEvent as E;
    use WorkflowState as S;

    match (state, event) {
        (S::Upload, E::FileSelected(_)) => Transition::Stay,
        (S::Upload, E::Proceed) => Transition::Next(S::Options),
        (S::Options, E::SelectionChanged(_)) => Transition::Stay,
        (S::Options, E::GenerateRequested) => Transition::Next(S::Generating),
        (S::Options, E::StartOver) => Transition::Next(S::Upload),
        (S::Generating, E::GenerationSucceeded(_)) => Transition::Next(S::Result),
        (S::Generating, E::GenerationFailed(_)) => Transition::Next(S::Options),
        (S::Result, E::TryAgain) => Transition::Next(S::Options),
        (S::Result, E::StartOver) => Transition::Next(S::Upload),
        _ => Transition::Ignored,
    }
}
