use std::ffi::OsStr;
use std::process::ExitStatus;

#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;

use command::CommandLine;
use options::{Config, RsyncOptions, Sink};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::binary::executable_available;
use crate::outcome::{ExecutionSuccess, ExitFailure, LaunchError, StreamKind};
use crate::spawn::SpawnPlan;

/// Bytes requested per read from a child pipe.
const READ_CHUNK_SIZE: usize = 8192;

/// Largest exit code reported for a child that ended without one.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Launches rsync for one [`Config`].
///
/// Every call to [`execute`](Self::execute) renders the command line afresh,
/// spawns one child through a shell and resolves once that child exits.
#[derive(Clone, Debug)]
pub struct Launcher {
    config: Config,
}

impl Launcher {
    /// Wraps a normalized configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration being launched.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Rendered argument tokens.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        command::build_args(&self.config)
    }

    /// Rendered executable and tokens.
    #[must_use]
    pub fn command_line(&self) -> CommandLine {
        CommandLine::from_config(&self.config)
    }

    /// Full command string: the executable followed by every token.
    #[must_use]
    pub fn command(&self) -> String {
        command::command_line(&self.config)
    }

    /// Spawn strategy for the current command string.
    #[must_use]
    pub fn spawn_plan(&self) -> SpawnPlan {
        SpawnPlan::new(&self.config, &self.command())
    }

    /// Reports whether the configured executable resolves to a runnable file.
    #[must_use]
    pub fn executable_available(&self) -> bool {
        executable_available(OsStr::new(self.config.executable()))
    }

    /// Runs rsync and waits for it to exit.
    ///
    /// Sinks passed here replace the ones attached to the configuration.
    /// Output chunks reach the sinks in arrival order while the call is
    /// pending. Exit code 0 resolves to [`ExecutionSuccess`]; any other code
    /// to [`LaunchError::Exit`]. A failure to start the shell is returned as
    /// [`LaunchError::Spawn`] carrying the unmodified OS error.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip_all, name = "rsync_execute", fields(executable = %self.config.executable()))
    )]
    pub async fn execute(
        &self,
        stdout: Option<Sink>,
        stderr: Option<Sink>,
    ) -> Result<ExecutionSuccess, LaunchError> {
        let sinks = self.config.output().overridden_by(stdout, stderr);
        let cmd = self.command();
        #[cfg(feature = "tracing")]
        logging::trace_command!(command = %cmd, "rendered rsync command");

        let plan = SpawnPlan::new(&self.config, &cmd);
        #[cfg(feature = "tracing")]
        logging::trace_spawn!(
            program = %plan.program(),
            platform = %self.config.platform(),
            "spawning rsync"
        );

        let mut child = plan
            .to_command(&self.config)
            .spawn()
            .map_err(LaunchError::Spawn)?;

        let forwarded = tokio::try_join!(
            forward(child.stdout.take(), sinks.stdout(), StreamKind::Stdout),
            forward(child.stderr.take(), sinks.stderr(), StreamKind::Stderr),
        );
        if let Err(error) = forwarded {
            return Err(abort(&mut child, error).await);
        }

        let status = child.wait().await.map_err(LaunchError::Wait)?;
        let code = exit_code(status);
        #[cfg(feature = "tracing")]
        logging::trace_exit!(code, "rsync exited");

        if code == 0 {
            Ok(ExecutionSuccess::new(cmd))
        } else {
            Err(ExitFailure::new(code, cmd).into())
        }
    }
}

impl From<Config> for Launcher {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

impl From<RsyncOptions> for Launcher {
    fn from(options: RsyncOptions) -> Self {
        Self::new(Config::new(options))
    }
}

/// Copies every chunk from `reader` to `sink` until EOF.
///
/// The pipe is drained even without a sink so the child never blocks on a
/// full pipe.
async fn forward<R>(
    reader: Option<R>,
    sink: Option<&Sink>,
    stream: StreamKind,
) -> Result<(), LaunchError>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(());
    };

    let mut buffer = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let read = reader
            .read(&mut buffer)
            .await
            .map_err(|source| LaunchError::Stream { stream, source })?;
        if read == 0 {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        logging::trace_output!(%stream, bytes = read, "forwarded chunk");
        if let Some(sink) = sink {
            sink(&buffer[..read]);
        }
    }
}

/// Kills and reaps `child` after a pipe failure and hands back `error`.
///
/// A failed kill means the child already exited or cannot be signalled;
/// `error` still describes the run.
async fn abort(child: &mut Child, error: LaunchError) -> LaunchError {
    if let Err(kill_error) = child.kill().await {
        #[cfg(feature = "tracing")]
        logging::trace_exit!(error = %kill_error, "failed to kill rsync after a pipe error");
        #[cfg(not(feature = "tracing"))]
        let _ = kill_error;
    }
    error
}

/// Maps an exit status to a code, using `128 + signal` for signal deaths.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        if let Some(signal) = status.signal() {
            return (128 + signal).min(MAX_EXIT_CODE);
        }
    }

    MAX_EXIT_CODE
}
