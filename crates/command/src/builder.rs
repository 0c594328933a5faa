use std::fmt;

use options::{Config, HostPlatform, OptionValue};

use crate::escape::{escape_option_value, escape_path};

/// Rendered rsync command: the executable plus its ordered argument tokens.
///
/// Tokens are already shell-escaped and are meant to be joined with single
/// spaces and handed to a shell, not passed to `exec` one by one. A short
/// option with a value such as `-e ssh` is a single token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandLine {
    executable: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Renders `config` into a command line.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            executable: config.executable().to_owned(),
            args: build_args(config),
        }
    }

    /// The executable, unescaped.
    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// The rendered argument tokens.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Joins the executable and tokens with single spaces.
    #[must_use]
    pub fn to_command_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Renders the argument tokens for `config`.
///
/// Token order is fixed: the combined short-flag token, the remaining
/// options in insertion order, excludes, includes, sources, and finally the
/// destination when one is set.
#[must_use]
pub fn build_args(config: &Config) -> Vec<String> {
    let platform = config.platform();
    let mut short = String::new();
    let mut long = Vec::new();

    for (name, value) in config.options() {
        match value {
            OptionValue::Flag if is_short(name) => short.push_str(name),
            OptionValue::Flag => long.push(render_option(name, None)),
            OptionValue::Scalar(value) => long.push(render_option(name, Some(value.as_str()))),
            OptionValue::Repeated(values) => {
                long.extend(values.iter().map(|value| render_option(name, Some(value.as_str()))));
            }
        }
    }

    let mut args = Vec::with_capacity(
        1 + long.len()
            + config.excludes().len()
            + config.includes().len()
            + config.sources().len()
            + 1,
    );

    if !short.is_empty() {
        args.push(format!("-{short}"));
    }
    args.extend(long);
    args.extend(
        config
            .excludes()
            .iter()
            .map(|pattern| render_pattern("exclude", pattern, platform)),
    );
    args.extend(
        config
            .includes()
            .iter()
            .map(|pattern| render_pattern("include", pattern, platform)),
    );
    args.extend(config.sources().iter().map(|source| escape_path(source, platform)));
    if !config.destination().is_empty() {
        args.push(escape_path(config.destination(), platform));
    }

    args
}

/// Renders the full command string for `config`.
#[must_use]
pub fn command_line(config: &Config) -> String {
    CommandLine::from_config(config).to_command_string()
}

fn is_short(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Renders one option token.
///
/// Short names take a single dash and a space before the value, long names
/// two dashes and `=`. An empty value renders as no value at all.
fn render_option(name: &str, value: Option<&str>) -> String {
    let short = is_short(name);
    let prefix = if short { "-" } else { "--" };
    match value.filter(|value| !value.is_empty()) {
        Some(value) => {
            let glue = if short { ' ' } else { '=' };
            format!("{prefix}{name}{glue}{}", escape_option_value(value))
        }
        None => format!("{prefix}{name}"),
    }
}

fn render_pattern(name: &str, pattern: &str, platform: HostPlatform) -> String {
    format!("--{name}={}", escape_path(pattern, platform))
}
