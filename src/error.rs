//! Error and exit-condition types.

use std::io;

use thiserror::Error;

/// Crate-wide error type.
///
/// `NormalExit` and `EarlyExit` are not failures: they are the unwinding
/// conditions that end a session, carried through `Result` so every layer
/// releases its resources on the way out.
#[derive(Debug, Error)]
pub enum Error {
    /// Orderly termination requested by the script or the operator.
    #[error("normal exit")]
    NormalExit,

    /// Signal-initiated or operator-requested abort.
    #[error("early exit")]
    EarlyExit,

    /// A POSIX or terminal operation failed.
    #[error("{0}")]
    Runtime(String),

    /// The script named a command that does not exist.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this condition.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NormalExit => 0,
            Error::EarlyExit => 1,
            Error::Runtime(_) | Error::UnknownCommand(_) | Error::Io(_) => 2,
        }
    }

    /// Whether this is an orderly exit rather than a reportable failure.
    pub fn is_exit(&self) -> bool {
        matches!(self, Error::NormalExit | Error::EarlyExit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::NormalExit.exit_code(), 0);
        assert_eq!(Error::EarlyExit.exit_code(), 1);
        assert_eq!(Error::Runtime("pty".into()).exit_code(), 2);
        assert_eq!(Error::UnknownCommand("zap".into()).exit_code(), 2);
        assert_eq!(
            Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone")).exit_code(),
            2
        );
    }

    #[test]
    fn test_is_exit() {
        assert!(Error::NormalExit.is_exit());
        assert!(Error::EarlyExit.is_exit());
        assert!(!Error::Runtime("pty".into()).is_exit());
        assert!(!Error::UnknownCommand("zap".into()).is_exit());
    }

    #[test]
    fn test_unknown_command_message() {
        assert_eq!(
            Error::UnknownCommand("zap".into()).to_string(),
            "unknown command: zap"
        );
    }
}
