//! Command-line interface, clap-based.
//!
//! Subcommands: `generate` (full pipeline), `prompt` (print the composed
//! prompt), `demo` (mock provider end to end). Global flags select mock
//! mode, a config file, and verbose output.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::prompt::{Atmosphere, DatingApp, Expression, Pose, PromptSpec, Situation, StyleSelection};

/// matchshot — dating-app profile photo generator.
#[derive(Debug, Parser)]
#[command(name = "matchshot", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Use the built-in mock provider instead of live services.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Path to a configuration file (default: ./matchshot.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the full generation record after a run.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Style parameters shared by `generate` and `prompt`.
#[derive(Debug, Clone, Copy, Args)]
pub struct StyleArgs {
    /// Dating app the photo is targeted at.
    #[arg(long, value_enum, default_value = "tinder")]
    pub app: DatingApp,

    /// Shooting location.
    #[arg(long, value_enum, default_value = "cafe")]
    pub situation: Situation,

    /// Framing of the subject.
    #[arg(long, value_enum, default_value = "upper-body")]
    pub pose: Pose,

    /// Facial expression.
    #[arg(long, value_enum, default_value = "smile")]
    pub expression: Expression,

    /// Overall mood of the photo.
    #[arg(long, value_enum, default_value = "bright")]
    pub atmosphere: Atmosphere,

    /// Use the fixed per-app template instead of composing from options.
    #[arg(long, default_value_t = false)]
    pub fixed: bool,
}

impl StyleArgs {
    pub fn selection(&self) -> StyleSelection {
        StyleSelection {
            app: self.app,
            situation: self.situation,
            pose: self.pose,
            expression: self.expression,
            atmosphere: self.atmosphere,
        }
    }

    pub fn prompt_spec(&self) -> PromptSpec {
        if self.fixed {
            PromptSpec::Fixed(self.app)
        } else {
            PromptSpec::Styled(self.selection())
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a profile photo from a face image.
    Generate {
        /// Path to the source face image (JPEG or PNG).
        #[arg(long)]
        face: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Print the synthesis prompt for a style selection.
    Prompt {
        #[command(flatten)]
        style: StyleArgs,
    },

    /// Run the full pipeline against the mock provider.
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_generate_subcommand() {
        let cli = Cli::parse_from([
            "matchshot",
            "generate",
            "--face",
            "me.jpg",
            "--app",
            "pairs",
            "--pose",
            "headshot",
        ]);
        match cli.command {
            Command::Generate { face, style } => {
                assert_eq!(face, PathBuf::from("me.jpg"));
                assert!(matches!(style.app, DatingApp::Pairs));
                assert!(matches!(style.pose, Pose::Headshot));
                // Unset options keep their defaults.
                assert!(matches!(style.situation, Situation::Cafe));
                assert!(!style.fixed);
            }
            _ => panic!("expected Generate command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["matchshot", "--mock", "--verbose", "demo"]);
        assert!(cli.mock);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn prompt_defaults_match_default_selection() {
        let cli = Cli::parse_from(["matchshot", "prompt"]);
        match cli.command {
            Command::Prompt { style } => {
                assert_eq!(style.selection(), StyleSelection::default());
            }
            _ => panic!("expected Prompt command"),
        }
    }

    #[test]
    fn fixed_flag_switches_prompt_spec() {
        let cli = Cli::parse_from(["matchshot", "prompt", "--app", "tokare", "--fixed"]);
        match cli.command {
            Command::Prompt { style } => {
                assert_eq!(style.prompt_spec(), PromptSpec::Fixed(DatingApp::Tokare));
            }
            _ => panic!("expected Prompt command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
