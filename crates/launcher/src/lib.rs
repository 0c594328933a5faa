#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `launcher` executes a rendered rsync command line. The command string is
//! handed to a shell as a single argument (`<shell> -c` on Unix-like hosts,
//! `cmd.exe /s /c` on Windows), the child's stdout and stderr are piped, and
//! each chunk read from them is passed to the caller's sinks as it arrives.
//!
//! # Outcome
//!
//! Every call to [`Launcher::execute`] resolves exactly once:
//!
//! - [`ExecutionSuccess`] when the child exits with code 0;
//! - [`LaunchError::Exit`] carrying the code and command string otherwise;
//! - [`LaunchError::Spawn`] with the untouched OS error when the shell could
//!   not be started.
//!
//! Nothing is retried or logged as an error here; the caller decides.
//!
//! # Examples
//!
//! ```no_run
//! use launcher::Launcher;
//! use options::{RsyncOptions, sink};
//!
//! # async fn run() -> Result<(), launcher::LaunchError> {
//! let mut options = RsyncOptions::new();
//! options.archive().compress().source("src/").destination("backup:/srv/src");
//!
//! let launcher = Launcher::from(options);
//! let progress = sink(|chunk| print!("{}", String::from_utf8_lossy(chunk)));
//! let outcome = launcher.execute(Some(progress), None).await?;
//! assert_eq!(outcome.code(), 0);
//! # Ok(())
//! # }
//! ```

mod binary;
mod execute;
mod outcome;
mod spawn;

pub use crate::binary::{
    describe_missing_executable, executable_available, executable_candidates, resolve_executable,
};
pub use crate::execute::Launcher;
pub use crate::outcome::{ExecutionSuccess, ExitFailure, LaunchError, StreamKind};
pub use crate::spawn::{SpawnPlan, WINDOWS_COMMAND_INTERPRETER};
