mod cli;
mod compositing;
mod config;
mod error;
mod mock;
mod orchestrator;
mod prompt;
mod synthesis;
mod ui;
mod workflow;

use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use cli::{Cli, Command};
use compositing::{CompositingBackend, FaceSwapClient};
use config::MatchshotConfig;
use mock::MockProvider;
use orchestrator::GenerationOrchestrator;
use prompt::{PromptSpec, StyleSelection};
use synthesis::{ReplicateClient, SynthesisBackend};
use ui::GenerationProgress;
use workflow::{GenerateOutcome, WorkflowEvent, WorkflowSession};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MatchshotConfig::load_with_env(path)?,
        None => MatchshotConfig::load()?,
    };
    let mock_mode = cli.mock || config.mock_mode;

    match cli.command {
        Command::Prompt { style } => {
            println!("{}", style.prompt_spec().resolve());
            Ok(())
        }
        Command::Generate { face, style } => {
            let face_bytes = std::fs::read(&face)?;
            let spec = style.prompt_spec();
            if mock_mode {
                let orchestrator = mock_orchestrator(&config);
                run_workflow(&orchestrator, face_bytes, spec, cli.verbose).await
            } else {
                config.validate_live()?;
                let orchestrator = GenerationOrchestrator::new(
                    ReplicateClient::with_base_url(
                        config.replicate_api_token.clone(),
                        config.synthesis_base_url.clone(),
                    ),
                    FaceSwapClient::new(config.faceswap_base_url.clone()),
                    Duration::from_millis(config.poll_interval_ms),
                    config.max_poll_attempts,
                );
                run_workflow(&orchestrator, face_bytes, spec, cli.verbose).await
            }
        }
        Command::Demo => {
            // Placeholder JPEG header stands in for a real face photo here.
            let face_bytes = vec![0xff, 0xd8, 0xff, 0xe0];
            let orchestrator = mock_orchestrator(&config);
            run_workflow(
                &orchestrator,
                face_bytes,
                PromptSpec::Styled(StyleSelection::default()),
                cli.verbose,
            )
            .await
        }
    }
}

fn mock_orchestrator(
    config: &MatchshotConfig,
) -> GenerationOrchestrator<MockProvider, MockProvider> {
    GenerationOrchestrator::new(
        MockProvider::new(),
        MockProvider::new(),
        Duration::from_millis(config.poll_interval_ms),
        config.max_poll_attempts,
    )
}

/// Drive one workflow session through upload, options and generation.
async fn run_workflow<S, C>(
    orchestrator: &GenerationOrchestrator<S, C>,
    face_bytes: Vec<u8>,
    spec: PromptSpec,
    verbose: bool,
) -> Result<()>
where
    S: SynthesisBackend,
    C: CompositingBackend,
{
    let mut session = WorkflowSession::new();
    session.use_prompt_spec(spec);

    let progress = GenerationProgress::start();
    let mirror = progress.clone();
    session.subscribe(Box::new(move |state| mirror.update_state(state)));

    session.apply(WorkflowEvent::FileSelected(face_bytes));
    session.apply(WorkflowEvent::Proceed);

    match session.generate(orchestrator).await {
        GenerateOutcome::Completed(record) => {
            progress.complete_success(&record.result);
            if verbose {
                progress.print_record(&record);
            }
            Ok(())
        }
        GenerateOutcome::Failed(err) => {
            progress.complete_failure(
                session
                    .last_error()
                    .unwrap_or("Image generation failed. Please try again."),
            );
            // Full taxonomy goes to stderr for diagnostics.
            eprintln!("  cause: {err}");
            bail!("generation failed");
        }
        GenerateOutcome::NotStarted => bail!("workflow was not ready to generate"),
    }
}
