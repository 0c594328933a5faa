#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` holds the tracing conventions shared by the launcher crates:
//! the event targets, target-specific macros, and a helper that installs a
//! filtered stderr subscriber.
//!
//! # Design
//!
//! Library crates only emit events through the macros in this crate; they
//! never install a subscriber. Applications embedding the launcher call
//! [`init_tracing`] or [`init_from_env`] once at startup, or install their own
//! subscriber and filter on the targets in [`targets`].
//!
//! # Examples
//!
//! ```
//! let filter = logging::build_filter("rsync_launcher::spawn=debug").unwrap();
//! assert!(filter.to_string().contains("rsync_launcher::spawn"));
//! ```

mod tracing_bridge;
mod tracing_macros;

pub use crate::tracing_bridge::{
    DEFAULT_DIRECTIVES, LOG_ENV, LoggingError, build_filter, directives_from_env, init_from_env,
    init_tracing,
};

/// Tracing targets used by the launcher crates.
pub mod targets {
    /// Rendering of the command line.
    pub const COMMAND: &str = "rsync_launcher::command";
    /// Spawning of the child process.
    pub const SPAWN: &str = "rsync_launcher::spawn";
    /// Forwarding of child output.
    pub const OUTPUT: &str = "rsync_launcher::output";
    /// Exit status of the child.
    pub const EXIT: &str = "rsync_launcher::exit";
}
