use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PhaseParseError {
    #[error("unknown phase: {0}")]
    UnknownPhase(String),
    #[error("unknown sub-phase: {0}")]
    UnknownSubPhase(String),
}

/// Top-level lifecycle signal from the orchestrating framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Stack,
    Unstack,
    Clean,
}

impl FromStr for Phase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stack" => Ok(Phase::Stack),
            "unstack" => Ok(Phase::Unstack),
            "clean" => Ok(Phase::Clean),
            other => Err(PhaseParseError::UnknownPhase(other.to_string())),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Stack => "stack",
            Phase::Unstack => "unstack",
            Phase::Clean => "clean",
        };
        f.write_str(name)
    }
}

/// Finer-grained step within the `stack` phase. The framework only passes
/// this when the phase is `stack`; the other phases ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubPhase {
    Install,
    PostConfig,
    Extra,
}

impl FromStr for SubPhase {
    type Err = PhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install" => Ok(SubPhase::Install),
            "post-config" => Ok(SubPhase::PostConfig),
            "extra" => Ok(SubPhase::Extra),
            other => Err(PhaseParseError::UnknownSubPhase(other.to_string())),
        }
    }
}

impl fmt::Display for SubPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubPhase::Install => "install",
            SubPhase::PostConfig => "post-config",
            SubPhase::Extra => "extra",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn phase_parses_framework_spellings() {
        assert_eq!("stack".parse(), Ok(Phase::Stack));
        assert_eq!("unstack".parse(), Ok(Phase::Unstack));
        assert_eq!("clean".parse(), Ok(Phase::Clean));
    }

    #[test]
    fn phase_rejects_unknown_values() {
        assert_eq!(
            Phase::from_str("restack"),
            Err(PhaseParseError::UnknownPhase("restack".to_string()))
        );
    }

    #[test]
    fn sub_phase_round_trips_through_display() {
        for sub in [SubPhase::Install, SubPhase::PostConfig, SubPhase::Extra] {
            assert_eq!(sub.to_string().parse(), Ok(sub));
        }
    }

    #[test]
    fn sub_phase_is_case_sensitive() {
        assert!(SubPhase::from_str("Install").is_err());
        assert!(SubPhase::from_str("post_config").is_err());
    }
}
