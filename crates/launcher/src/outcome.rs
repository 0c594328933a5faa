use std::fmt;
use std::io;

use thiserror::Error;

/// Result of a launch that ended with exit code 0.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutionSuccess {
    code: i32,
    cmd: String,
}

impl ExecutionSuccess {
    pub(crate) const fn new(cmd: String) -> Self {
        Self { code: 0, cmd }
    }

    /// Exit code of the child; always 0.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// The exact command string that was executed.
    #[must_use]
    pub fn cmd(&self) -> &str {
        &self.cmd
    }
}

/// Child process that ran to completion with a non-zero exit code.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct ExitFailure {
    code: i32,
    cmd: String,
    message: String,
}

impl ExitFailure {
    pub(crate) fn new(code: i32, cmd: String) -> Self {
        Self {
            code,
            cmd,
            message: format!("rsync exited with code {code}"),
        }
    }

    /// Exit code reported by the child.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// The exact command string that was executed.
    #[must_use]
    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Human-readable description embedding the exit code.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Child stream a read error came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StreamKind {
    /// The child's standard output.
    Stdout,
    /// The child's standard error.
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

/// Failure outcome of a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The child exited with a non-zero code.
    #[error(transparent)]
    Exit(#[from] ExitFailure),
    /// The child could not be started; the OS error is passed through as-is.
    #[error(transparent)]
    Spawn(io::Error),
    /// Reading one of the child's output pipes failed.
    #[error("failed to read {stream} from rsync: {source}")]
    Stream {
        /// Stream that failed.
        stream: StreamKind,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Waiting for the child's exit status failed.
    #[error("failed to wait for rsync process: {0}")]
    Wait(#[source] io::Error),
}

impl LaunchError {
    /// Exit code, when the child ran to completion.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Exit(failure) => Some(failure.code),
            _ => None,
        }
    }

    /// Command string, when the child ran to completion.
    #[must_use]
    pub fn cmd(&self) -> Option<&str> {
        match self {
            Self::Exit(failure) => Some(failure.cmd()),
            _ => None,
        }
    }

    /// Reports whether the launch failed because a program was not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn(error) if error.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn success_always_reports_zero() {
        let success = ExecutionSuccess::new("rsync a b".to_owned());

        assert_eq!(success.code(), 0);
        assert_eq!(success.cmd(), "rsync a b");
    }

    #[test]
    fn exit_failure_embeds_code_in_message() {
        let error = LaunchError::from(ExitFailure::new(23, "rsync a b".to_owned()));

        assert_eq!(error.to_string(), "rsync exited with code 23");
        assert_eq!(error.code(), Some(23));
        assert_eq!(error.cmd(), Some("rsync a b"));
    }

    #[test]
    fn spawn_error_is_passed_through() {
        let error = LaunchError::Spawn(io::Error::new(io::ErrorKind::NotFound, "missing"));

        assert_eq!(error.to_string(), "missing");
        assert!(error.is_not_found());
        assert_eq!(error.code(), None);
        assert_eq!(error.cmd(), None);
    }

    #[test]
    fn stream_error_names_stream_and_keeps_source() {
        let error = LaunchError::Stream {
            stream: StreamKind::Stderr,
            source: io::Error::other("broken"),
        };

        assert_eq!(error.to_string(), "failed to read stderr from rsync: broken");
        assert!(error.source().is_some());
        assert!(!error.is_not_found());
    }
}
