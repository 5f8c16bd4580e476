use plan_guard_shared::{ErrorEnvelope, ErrorKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Accepted = 0,
    Rejected = 1,
    InvalidInput = 2,
    Io = 3,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug)]
pub enum CliError {
    InvalidInput(ErrorEnvelope),
    Failure(ErrorEnvelope),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::Failure(_) | Self::Io(_) | Self::Serialization(_) => ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(envelope) => write!(
                formatter,
                "invalid input [{}]: {}",
                envelope.code, envelope.message
            ),
            Self::Failure(envelope) => {
                write!(formatter, "failed [{}]: {}", envelope.code, envelope.message)
            },
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Serialization(error) => write!(formatter, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ErrorEnvelope> for CliError {
    fn from(envelope: ErrorEnvelope) -> Self {
        match envelope.kind {
            ErrorKind::Expected => Self::InvalidInput(envelope),
            ErrorKind::Invariant | ErrorKind::Unexpected => Self::Failure(envelope),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}
