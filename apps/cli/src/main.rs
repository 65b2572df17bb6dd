mod error;
mod hooks;

use clap::{Parser, Subcommand};
use error::HookError;
use heat_lifecycle::{dispatch, DispatchConfig, FeatureFlags, Phase, ServiceSet, SubPhase};
use hooks::ShellHooks;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "heat-plugin")]
#[command(about = "DevStack lifecycle hook for the heat orchestration service", long_about = None)]
struct Cli {
    /// Base directory of the framework checkout; the function library is
    /// expected at <TOP_DIR>/lib/heat. Falls back to $TOP_DIR.
    #[arg(long)]
    top_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring the service up for the given stack sub-phase
    Stack {
        /// One of: install, post-config, extra
        sub_phase: String,
    },
    /// Stop the service during environment teardown
    Unstack {
        /// Ignored; accepted so the framework can pass its sub-phase through
        sub_phase: Option<String>,
    },
    /// Remove artifacts left behind by a previous run
    Clean {
        /// Ignored; accepted so the framework can pass its sub-phase through
        sub_phase: Option<String>,
    },
}

impl Commands {
    /// Map the CLI surface onto the dispatcher's signals. An unrecognized
    /// stack sub-phase has no dispatch entry and must no-op, so it maps to
    /// `None` rather than failing argument parsing.
    fn signals(&self) -> (Phase, Option<SubPhase>) {
        match self {
            Commands::Stack { sub_phase } => {
                let sub = SubPhase::from_str(sub_phase).ok();
                if sub.is_none() {
                    tracing::warn!(%sub_phase, "unrecognized stack sub-phase, nothing to do");
                }
                (Phase::Stack, sub)
            }
            Commands::Unstack { .. } => (Phase::Unstack, None),
            Commands::Clean { .. } => (Phase::Clean, None),
        }
    }
}

/// Build the dispatch configuration from the framework environment.
fn config_from_env() -> DispatchConfig {
    let services = std::env::var("ENABLED_SERVICES")
        .map(|spec| ServiceSet::from_enabled(&spec))
        .unwrap_or_default();
    let features =
        FeatureFlags::from_mirror_value(std::env::var("HEAT_BUILD_PIP_MIRROR").ok().as_deref());

    DispatchConfig { services, features }
}

fn resolve_top_dir(flag: Option<PathBuf>) -> Result<PathBuf, HookError> {
    flag.or_else(|| std::env::var_os("TOP_DIR").map(PathBuf::from))
        .ok_or_else(|| HookError::Config("TOP_DIR is not set and --top-dir was not given".into()))
}

async fn run() -> Result<(), HookError> {
    let cli = Cli::parse();

    let config = config_from_env();
    let (phase, sub_phase) = cli.command.signals();
    let top_dir = resolve_top_dir(cli.top_dir)?;
    let hooks = ShellHooks::new(&top_dir);

    let report = dispatch::run(phase, sub_phase, &config, &hooks).await?;

    if report.is_noop() {
        tracing::debug!(%phase, "no lifecycle actions matched this invocation");
    } else {
        tracing::info!(%phase, actions = report.executed.len(), "heat hook finished");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.render();
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stack_sub_phase_maps_to_dispatch_signals() {
        let (phase, sub) = Commands::Stack {
            sub_phase: "post-config".into(),
        }
        .signals();
        assert_eq!(phase, Phase::Stack);
        assert_eq!(sub, Some(SubPhase::PostConfig));
    }

    #[test]
    fn unknown_stack_sub_phase_maps_to_none() {
        let (phase, sub) = Commands::Stack {
            sub_phase: "test-config".into(),
        }
        .signals();
        assert_eq!(phase, Phase::Stack);
        assert_eq!(sub, None);
    }

    #[test]
    fn teardown_phases_ignore_the_sub_phase_argument() {
        let (phase, sub) = Commands::Unstack {
            sub_phase: Some("install".into()),
        }
        .signals();
        assert_eq!(phase, Phase::Unstack);
        assert_eq!(sub, None);

        let (phase, sub) = Commands::Clean { sub_phase: None }.signals();
        assert_eq!(phase, Phase::Clean);
        assert_eq!(sub, None);
    }

    // Mutates TOP_DIR; no other test in this binary reads it.
    #[test]
    fn top_dir_flag_wins_over_environment() {
        std::env::set_var("TOP_DIR", "/from/environment");

        let resolved = resolve_top_dir(Some(PathBuf::from("/opt/stack/devstack"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/opt/stack/devstack"));

        let fallback = resolve_top_dir(None).unwrap();
        assert_eq!(fallback, PathBuf::from("/from/environment"));

        std::env::remove_var("TOP_DIR");
    }
}
