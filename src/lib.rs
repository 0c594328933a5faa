#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `rsync_launcher` builds rsync command lines from structured options and
//! runs the external `rsync` binary. It re-exports the workspace crates:
//!
//! - [`options`]: the option model, the typed builder and the JSON normalizer;
//! - [`command`]: argument rendering and shell escaping;
//! - [`launcher`]: spawning, output forwarding and the execution outcome;
//! - `logging` (with the `tracing` feature): tracing targets and subscriber
//!   setup.
//!
//! # Examples
//!
//! ```
//! use rsync_launcher::{HostPlatform, RsyncOptions};
//!
//! let mut options = RsyncOptions::new();
//! options
//!     .platform(HostPlatform::Posix)
//!     .archive()
//!     .compress()
//!     .shell("ssh")
//!     .source("/srv/www/")
//!     .destination("backup:/srv/www");
//!
//! let launcher = rsync_launcher::Launcher::from(options);
//! assert_eq!(launcher.command(), "rsync -az --rsh=ssh /srv/www/ backup:/srv/www");
//! ```
//!
//! Loose JSON goes through [`build`]:
//!
//! ```
//! let launcher = rsync_launcher::build(&serde_json::json!({
//!     "flags": "avz",
//!     "source": "src/",
//!     "destination": "dst/",
//! }))
//! .unwrap();
//! assert_eq!(launcher.args().last().map(String::as_str), Some("dst/"));
//! ```

pub use command;
pub use launcher;
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub use logging;
pub use options;

pub use command::{CommandLine, build_args, command_line, escape_option_value, escape_path};
pub use launcher::{ExecutionSuccess, ExitFailure, LaunchError, Launcher, SpawnPlan, StreamKind};
pub use options::{
    Config, ConfigError, Environment, HostPlatform, OptionMap, OptionValue, OutputSinks,
    RsyncOptions, Sink, sink,
};

/// Normalizes a loose JSON configuration and wraps it in a [`Launcher`].
///
/// # Errors
///
/// Returns [`ConfigError`] when `config` is not an object or a recognised
/// field has the wrong shape.
pub fn build(config: &serde_json::Value) -> Result<Launcher, ConfigError> {
    Config::from_value(config).map(Launcher::new)
}
