//! Terminal feedback — spinner and colored output.
//!
//! [`GenerationProgress`] mirrors the workflow states on a spinner while a
//! run is in flight and prints the outcome when it completes. Clones share
//! the same underlying spinner, so a clone can live inside a workflow
//! listener.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::orchestrator::{GenerationRecord, GenerationResult};
use crate::workflow::WorkflowState;

#[derive(Clone)]
pub struct GenerationProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    cyan: Style,
}

impl GenerationProgress {
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message("UPLOAD: waiting for a face photo");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            cyan: Style::new().cyan(),
        }
    }

    /// Reflect the current workflow state on the spinner.
    pub fn update_state(&self, state: WorkflowState) {
        let message = match state {
            WorkflowState::Upload => "UPLOAD: waiting for a face photo",
            WorkflowState::Options => "OPTIONS: style parameters selected",
            WorkflowState::Generating => "GENERATING: synthesizing and compositing (1-2 minutes)",
            WorkflowState::Result => "RESULT: profile photo ready",
        };
        self.pb.set_message(message);
    }

    /// Finish the spinner and print both image references.
    pub fn complete_success(&self, result: &GenerationResult) {
        self.pb.finish_and_clear();
        println!(
            "  {} Profile photo generated",
            self.green.apply_to("✓")
        );
        println!("    original: {}", self.cyan.apply_to(&result.original_image));
        println!("    final:    {}", self.cyan.apply_to(&result.final_image));
    }

    /// Finish the spinner and print the user-facing failure message.
    pub fn complete_failure(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }

    /// Print the diagnostic record as pretty JSON.
    pub fn print_record(&self, record: &GenerationRecord) {
        println!();
        println!("{}", self.green.apply_to("─── Generation Record ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(record).unwrap_or_default()
        );
    }
}
