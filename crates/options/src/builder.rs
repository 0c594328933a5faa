use std::path::PathBuf;

use crate::config::Config;
use crate::environment::Environment;
use crate::platform::HostPlatform;
use crate::sink::{OutputSinks, Sink};
use crate::value::{OptionMap, OptionValue};

/// Option key used for the remote shell (`--rsh`).
pub const REMOTE_SHELL_KEY: &str = "rsh";

/// Option key collecting `--chmod` specifications.
pub const CHMOD_KEY: &str = "chmod";

/// Boolean shorthand fields and the option key each one enables.
///
/// The first name in each entry is the canonical spelling; the rest are
/// accepted aliases when reading loosely-typed configuration.
pub const CAPABILITIES: &[(&[&str], &str)] = &[
    (&["archive"], "a"),
    (&["compress"], "z"),
    (&["recursive"], "r"),
    (&["update"], "u"),
    (&["quiet"], "q"),
    (&["dirs"], "d"),
    (&["links"], "l"),
    (&["dry", "dryRun", "dry-run", "dry_run"], "n"),
    (&["hardLinks", "hard-links", "hard_links"], "H"),
    (&["perms"], "p"),
    (&["executability"], "E"),
    (&["group"], "g"),
    (&["owner"], "o"),
    (&["acls"], "A"),
    (&["xattrs"], "X"),
    (&["devices"], "devices"),
    (&["specials"], "specials"),
    (&["times"], "t"),
    (&["delete"], "delete"),
    (&["progress"], "progress"),
];

/// Returns the option key enabled by the boolean shorthand `field`.
#[must_use]
pub fn capability_key(field: &str) -> Option<&'static str> {
    CAPABILITIES
        .iter()
        .find(|(names, _)| names.contains(&field))
        .map(|(_, key)| *key)
}

macro_rules! capability_setters {
    ($($(#[$meta:meta])* $method:ident => $key:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $method(&mut self) -> &mut Self {
                self.flag($key)
            }
        )*
    };
}

/// Mutable description of an rsync invocation, normalized into a [`Config`].
///
/// Shorthand setters and [`flag`](Self::flag)/[`flags`](Self::flags) write
/// straight into the option map in call order. Entries given through
/// [`set`](Self::set) are held aside and merged last, so they override any
/// shorthand that produced the same option name.
#[derive(Clone, Debug, Default)]
pub struct RsyncOptions {
    pub(crate) sources: Vec<String>,
    pub(crate) destination: String,
    pub(crate) options: OptionMap,
    pub(crate) overrides: OptionMap,
    pub(crate) includes: Vec<String>,
    pub(crate) excludes: Vec<String>,
    pub(crate) executable: Option<String>,
    pub(crate) executable_shell: Option<String>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) env: Option<Environment>,
    pub(crate) output: OutputSinks,
    pub(crate) platform: Option<HostPlatform>,
}

impl RsyncOptions {
    /// Creates an empty description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source path.
    pub fn source(&mut self, path: impl Into<String>) -> &mut Self {
        self.sources.push(path.into());
        self
    }

    /// Appends several source paths in order.
    pub fn sources<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets the destination. An empty string leaves it unset.
    pub fn destination(&mut self, path: impl Into<String>) -> &mut Self {
        self.destination = path.into();
        self
    }

    /// Enables a valueless option.
    pub fn flag(&mut self, name: impl Into<String>) -> &mut Self {
        self.options.insert(name, OptionValue::Flag);
        self
    }

    /// Enables one valueless short option per character of `flags`.
    ///
    /// Repeated characters collapse into a single entry.
    pub fn flags(&mut self, flags: &str) -> &mut Self {
        for flag in flags.chars() {
            self.options.insert(flag.to_string(), OptionValue::Flag);
        }
        self
    }

    /// Sets an arbitrary option, overriding any shorthand with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.overrides.insert(name, value.into());
        self
    }

    /// Sets an arbitrary option that may or may not carry a value.
    pub fn set_value(&mut self, name: impl Into<String>, value: Option<String>) -> &mut Self {
        self.set(name, OptionValue::from(value))
    }

    /// Removes an option regardless of how it was added.
    pub fn unset(&mut self, name: &str) -> &mut Self {
        self.options.remove(name);
        self.overrides.remove(name);
        self
    }

    capability_setters! {
        /// Enables archive mode (`-a`).
        archive => "a";
        /// Enables compression (`-z`).
        compress => "z";
        /// Recurses into directories (`-r`).
        recursive => "r";
        /// Skips files that are newer on the receiver (`-u`).
        update => "u";
        /// Suppresses non-error messages (`-q`).
        quiet => "q";
        /// Transfers directories without recursing (`-d`).
        dirs => "d";
        /// Copies symlinks as symlinks (`-l`).
        links => "l";
        /// Performs a trial run (`-n`).
        dry_run => "n";
        /// Preserves hard links (`-H`).
        hard_links => "H";
        /// Preserves permissions (`-p`).
        perms => "p";
        /// Preserves executability (`-E`).
        executability => "E";
        /// Preserves group (`-g`).
        group => "g";
        /// Preserves owner (`-o`).
        owner => "o";
        /// Preserves ACLs (`-A`).
        acls => "A";
        /// Preserves extended attributes (`-X`).
        xattrs => "X";
        /// Preserves device files (`--devices`).
        devices => "devices";
        /// Preserves special files (`--specials`).
        specials => "specials";
        /// Preserves modification times (`-t`).
        times => "t";
        /// Deletes extraneous files on the receiver (`--delete`).
        delete => "delete";
        /// Shows progress during transfer (`--progress`).
        progress => "progress";
    }

    /// Appends a `--chmod` specification; each one renders as its own token.
    pub fn chmod(&mut self, spec: impl Into<String>) -> &mut Self {
        let spec = spec.into();
        let mut specs = match self.options.get(CHMOD_KEY) {
            Some(OptionValue::Repeated(existing)) => existing.clone(),
            Some(OptionValue::Scalar(existing)) => vec![existing.clone()],
            _ => Vec::new(),
        };
        specs.push(spec);
        self.options.insert(CHMOD_KEY, OptionValue::Repeated(specs));
        self
    }

    /// Sets the remote shell (`--rsh=<command>`).
    pub fn shell(&mut self, command: impl Into<String>) -> &mut Self {
        self.options
            .insert(REMOTE_SHELL_KEY, OptionValue::Scalar(command.into()));
        self
    }

    /// Appends an exclude pattern.
    pub fn exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Appends an include pattern.
    pub fn include(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.includes.push(pattern.into());
        self
    }

    /// Overrides the rsync executable (default `rsync`).
    pub fn executable(&mut self, path: impl Into<String>) -> &mut Self {
        self.executable = Some(path.into());
        self
    }

    /// Overrides the shell used to run the command (default `/bin/sh`).
    pub fn executable_shell(&mut self, path: impl Into<String>) -> &mut Self {
        self.executable_shell = Some(path.into());
        self
    }

    /// Sets the child's working directory.
    pub fn cwd(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.cwd = Some(path.into());
        self
    }

    /// Replaces the child's environment wholesale.
    pub fn env(&mut self, environment: Environment) -> &mut Self {
        self.env = Some(environment);
        self
    }

    /// Attaches both output sinks; `None` leaves a stream unobserved.
    pub fn output(&mut self, stdout: Option<Sink>, stderr: Option<Sink>) -> &mut Self {
        self.output = OutputSinks::new(stdout, stderr);
        self
    }

    /// Attaches the stdout sink.
    pub fn stdout(&mut self, sink: Sink) -> &mut Self {
        self.output.set_stdout(sink);
        self
    }

    /// Attaches the stderr sink.
    pub fn stderr(&mut self, sink: Sink) -> &mut Self {
        self.output.set_stderr(sink);
        self
    }

    /// Injects the host platform instead of detecting it.
    pub fn platform(&mut self, platform: HostPlatform) -> &mut Self {
        self.platform = Some(platform);
        self
    }

    /// Normalizes the description into an immutable [`Config`].
    #[must_use]
    pub fn build(&self) -> Config {
        Config::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(options: &RsyncOptions) -> Vec<&str> {
        options.options.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn capability_setters_record_in_call_order() {
        let mut options = RsyncOptions::new();
        options.archive().compress().delete().progress();

        assert_eq!(keys(&options), vec!["a", "z", "delete", "progress"]);
    }

    #[test]
    fn flags_collapse_duplicates() {
        let mut options = RsyncOptions::new();
        options.flags("avza");

        assert_eq!(keys(&options), vec!["a", "v", "z"]);
    }

    #[test]
    fn chmod_accumulates() {
        let mut options = RsyncOptions::new();
        options.chmod("og=uwx").chmod("rx=ogw");

        assert_eq!(
            options.options.get(CHMOD_KEY),
            Some(&OptionValue::Repeated(vec![
                "og=uwx".to_owned(),
                "rx=ogw".to_owned()
            ]))
        );
    }

    #[test]
    fn unset_clears_shorthand_and_overrides() {
        let mut options = RsyncOptions::new();
        options.archive().set("a", "x").set("inplace", OptionValue::Flag);
        options.unset("a");

        assert!(!options.options.contains("a"));
        assert!(!options.overrides.contains("a"));
        assert!(options.overrides.contains("inplace"));
    }

    #[test]
    fn capability_key_accepts_aliases() {
        assert_eq!(capability_key("archive"), Some("a"));
        assert_eq!(capability_key("dry-run"), Some("n"));
        assert_eq!(capability_key("hardLinks"), Some("H"));
        assert_eq!(capability_key("devices"), Some("devices"));
        assert_eq!(capability_key("verbose"), None);
    }
}
