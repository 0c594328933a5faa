#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `options` turns a description of an rsync invocation into the canonical
//! [`Config`] consumed by the argument builder and the launcher. Two entry
//! points produce the same result:
//!
//! - [`RsyncOptions`], a typed builder whose setters mirror rsync's flags;
//! - [`Config::from_value`] / [`Config::from_json_str`], which accept a
//!   loosely-typed JSON object.
//!
//! # Invariants
//!
//! - Option entries keep the order in which they were first added. Setting an
//!   existing option again replaces its value without moving it.
//! - Entries supplied through `set` are merged after all shorthand fields, so
//!   they override anything the shorthands produced under the same name.
//! - A [`Config`] is immutable. Accessors hand out borrowed views only.
//!
//! # Errors
//!
//! Normalizing JSON fails with [`ConfigError`] when the root is not an object
//! or when a recognised field has the wrong shape. The typed builder cannot
//! fail.
//!
//! # Examples
//!
//! ```
//! use options::{Config, OptionValue, RsyncOptions};
//!
//! let mut options = RsyncOptions::new();
//! options
//!     .flags("avz")
//!     .source("src/")
//!     .destination("backup:/srv/src")
//!     .set("max-size", "1009");
//! let config = options.build();
//!
//! assert!(config.is_set("v"));
//! assert_eq!(config.option("max-size"), Some(&OptionValue::from("1009")));
//!
//! let from_json = Config::from_json_str(r#"{"flags": "avz", "source": "src/"}"#).unwrap();
//! assert_eq!(from_json.sources(), ["src/"]);
//! ```

mod builder;
mod config;
mod environment;
mod error;
mod normalize;
mod platform;
mod sink;
mod value;

pub use crate::builder::{CAPABILITIES, CHMOD_KEY, REMOTE_SHELL_KEY, RsyncOptions, capability_key};
pub use crate::config::{Config, DEFAULT_EXECUTABLE, DEFAULT_EXECUTABLE_SHELL};
pub use crate::environment::Environment;
pub use crate::error::ConfigError;
pub use crate::platform::HostPlatform;
pub use crate::sink::{OutputSinks, Sink, sink};
pub use crate::value::{OptionMap, OptionValue};
