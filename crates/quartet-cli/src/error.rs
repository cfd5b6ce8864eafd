//! CLI errors and exit codes.
//!
//! Exit codes:
//! - 0: Every word was placed in a confirmed group
//! - 1: Fatal error, or the oracle stopped answering
//! - 2: A round ran out of candidates (no solution found)

use std::process::ExitCode;

use quartet::{ConfigError, QuartetError, SolveStatus};
use thiserror::Error;

/// Exit codes for the `quartet` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    Failure = 1,
    NoSolution = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<SolveStatus> for CliExitCode {
    fn from(status: SolveStatus) -> Self {
        match status {
            SolveStatus::Solved => CliExitCode::Success,
            SolveStatus::Abandoned => CliExitCode::Failure,
            SolveStatus::Exhausted => CliExitCode::NoSolution,
        }
    }
}

/// Anything that ends a run before the solve loop reports a status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Quartet(#[from] QuartetError),

    #[error("Failed to read words from {path}: {source}")]
    Words {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<&CliError> for CliExitCode {
    fn from(_: &CliError) -> Self {
        CliExitCode::Failure
    }
}
