use std::path::{Path, PathBuf};

use crate::builder::RsyncOptions;
use crate::environment::Environment;
use crate::platform::HostPlatform;
use crate::sink::OutputSinks;
use crate::value::{OptionMap, OptionValue};

/// Executable launched when none is configured.
pub const DEFAULT_EXECUTABLE: &str = "rsync";

/// Shell used to run the command line on non-Windows hosts.
pub const DEFAULT_EXECUTABLE_SHELL: &str = "/bin/sh";

/// Canonical, read-only description of one rsync invocation.
///
/// A `Config` is produced once by normalizing [`RsyncOptions`] or a JSON
/// object and never changes afterwards. Anything derived from it, such as
/// the rendered command line, is recomputed on request.
#[derive(Clone, Debug)]
pub struct Config {
    sources: Vec<String>,
    destination: String,
    options: OptionMap,
    includes: Vec<String>,
    excludes: Vec<String>,
    executable: String,
    executable_shell: String,
    cwd: Option<PathBuf>,
    env: Option<Environment>,
    output: OutputSinks,
    platform: HostPlatform,
}

impl Config {
    /// Normalizes `options`, merging `set` entries over the shorthand ones.
    #[must_use]
    pub fn new(options: RsyncOptions) -> Self {
        let RsyncOptions {
            sources,
            destination,
            options: mut merged,
            overrides,
            includes,
            excludes,
            executable,
            executable_shell,
            cwd,
            env,
            output,
            platform,
        } = options;

        merged.merge(&overrides);

        Self {
            sources,
            destination,
            options: merged,
            includes,
            excludes,
            executable: executable.unwrap_or_else(|| DEFAULT_EXECUTABLE.to_owned()),
            executable_shell: executable_shell
                .unwrap_or_else(|| DEFAULT_EXECUTABLE_SHELL.to_owned()),
            cwd,
            env,
            output,
            platform: platform.unwrap_or_else(HostPlatform::current),
        }
    }

    /// Source paths in the order they were given.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Destination path; empty when unset.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// All options in insertion order.
    #[must_use]
    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    /// Returns the value stored for the option `name`.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Reports whether the option `name` is present.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    /// Include patterns in insertion order.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Exclude patterns in insertion order.
    #[must_use]
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// The rsync executable.
    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The shell interpreter used on non-Windows hosts.
    #[must_use]
    pub fn executable_shell(&self) -> &str {
        &self.executable_shell
    }

    /// Working directory for the child, when one was configured.
    #[must_use]
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Environment for the child; `None` inherits the parent's.
    #[must_use]
    pub fn env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// Output sinks attached at configuration time.
    #[must_use]
    pub fn output(&self) -> &OutputSinks {
        &self.output
    }

    /// Host platform resolved at construction.
    #[must_use]
    pub fn platform(&self) -> HostPlatform {
        self.platform
    }
}

impl From<RsyncOptions> for Config {
    fn from(options: RsyncOptions) -> Self {
        Self::new(options)
    }
}
