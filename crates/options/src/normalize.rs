//! Normalization of loosely-typed JSON configuration.
//!
//! Object keys are applied in the order they appear, which is what makes the
//! order of shorthand options observable in the rendered command line. The
//! `set` mapping is held back until every other key has been applied so its
//! entries win over shorthand fields that produce the same option name.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::builder::{RsyncOptions, capability_key};
use crate::config::Config;
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::value::OptionValue;


const STRING: &str = "a string";
const STRINGS: &str = "a string or an array of strings";
const FLAGS: &str = "a string of flag characters or an array of flag names";
const OBJECT: &str = "an object";
const SET_VALUE: &str = "null, a string, a number, a boolean, or an array of those";

impl Config {
    /// Normalizes a JSON configuration object.
    ///
    /// Anything other than an object, arrays included, is rejected before
    /// any field is examined.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        RsyncOptions::from_value(value).map(Self::new)
    }

    /// Parses and normalizes a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }
}

impl TryFrom<Value> for Config {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(text)
    }
}

impl RsyncOptions {
    /// Builds a description from a JSON configuration object.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let Value::Object(fields) = value else {
            return Err(ConfigError::NotAnObject {
                found: json_kind(value),
            });
        };

        let mut options = Self::new();
        let mut deferred = None;

        for (field, value) in fields {
            match field.as_str() {
                "set" => deferred = Some(value),
                "source" => {
                    options.sources(one_or_many(field, value)?);
                }
                "destination" => {
                    options.destination(string(field, value)?);
                }
                "exclude" => {
                    for pattern in one_or_many(field, value)? {
                        options.exclude(pattern);
                    }
                }
                "include" => {
                    for pattern in one_or_many(field, value)? {
                        options.include(pattern);
                    }
                }
                "chmod" => {
                    for spec in one_or_many(field, value)? {
                        options.chmod(spec);
                    }
                }
                "flags" => apply_flags(&mut options, field, value)?,
                "shell" => {
                    options.shell(string(field, value)?);
                }
                "executable" => {
                    options.executable(string(field, value)?);
                }
                "executableShell" | "executable_shell" => {
                    options.executable_shell(string(field, value)?);
                }
                "cwd" => {
                    options.cwd(string(field, value)?);
                }
                "env" => {
                    options.env(environment(field, value)?);
                }
                // Callables cannot be expressed in JSON; sinks are attached
                // through `RsyncOptions::output` instead.
                "output" => {}
                other => {
                    if let Some(key) = capability_key(other) {
                        if is_truthy(value) {
                            options.flag(key);
                        }
                    }
                }
            }
        }

        if let Some(overrides) = deferred {
            apply_overrides(&mut options, overrides)?;
        }

        Ok(options)
    }
}

fn apply_flags(options: &mut RsyncOptions, field: &str, value: &Value) -> Result<(), ConfigError> {
    match value {
        Value::String(flags) => {
            options.flags(flags);
        }
        Value::Array(items) => {
            for item in items {
                let Value::String(flag) = item else {
                    return Err(ConfigError::invalid(field, FLAGS));
                };
                options.flags(flag);
            }
        }
        _ => return Err(ConfigError::invalid(field, FLAGS)),
    }
    Ok(())
}

fn apply_overrides(options: &mut RsyncOptions, value: &Value) -> Result<(), ConfigError> {
    let entries = match value {
        Value::Object(entries) => entries,
        Value::Null => return Ok(()),
        _ => return Err(ConfigError::invalid("set", OBJECT)),
    };

    for (name, value) in entries {
        options.set(name.as_str(), option_value(name, value)?);
    }
    Ok(())
}

fn option_value(name: &str, value: &Value) -> Result<OptionValue, ConfigError> {
    match value {
        Value::Null => Ok(OptionValue::Flag),
        Value::Array(items) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| ConfigError::invalid(format!("set.{name}"), SET_VALUE)))
            .collect::<Result<Vec<_>, _>>()
            .map(OptionValue::Repeated),
        // Falsy scalars keep the option but drop its value.
        other if !is_truthy(other) => Ok(OptionValue::Scalar(String::new())),
        other => scalar_text(other)
            .map(OptionValue::Scalar)
            .ok_or_else(|| ConfigError::invalid(format!("set.{name}"), SET_VALUE)),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn string(field: &str, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ConfigError::invalid(field, STRING))
}

fn one_or_many(field: &str, value: &Value) -> Result<Vec<String>, ConfigError> {
    match value {
        Value::String(text) => Ok(vec![text.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| ConfigError::invalid(field, STRINGS))
            })
            .collect(),
        _ => Err(ConfigError::invalid(field, STRINGS)),
    }
}

fn environment(field: &str, value: &Value) -> Result<Environment, ConfigError> {
    let Value::Object(vars) = value else {
        return Err(ConfigError::invalid(field, OBJECT));
    };
    collect_environment(field, vars)
}

fn collect_environment(field: &str, vars: &Map<String, Value>) -> Result<Environment, ConfigError> {
    vars.iter()
        .map(|(name, value)| {
            scalar_text(value)
                .map(|text| (name.clone(), text))
                .ok_or_else(|| ConfigError::invalid(format!("{field}.{name}"), STRING))
        })
        .collect()
}

/// Applies JavaScript-style truthiness to a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
