mod session;
mod state;

pub use session::{GenerateOutcome, WorkflowSession};
pub use state::{Transition, WorkflowEvent, WorkflowState, transition};
