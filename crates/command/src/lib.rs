#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `command` renders an [`options::Config`] into the argument tokens and the
//! single command string used to launch rsync through a shell. Rendering is
//! pure: no I/O happens here and the same configuration always yields the
//! same command line.
//!
//! # Token order
//!
//! 1. one combined `-xyz` token for every valueless single-character option;
//! 2. every other option in insertion order, one token per value;
//! 3. `--exclude=` patterns, then `--include=` patterns;
//! 4. source paths, then the destination when one is set.
//!
//! Option values go through [`escape_option_value`]; patterns, sources and
//! the destination go through [`escape_path`].
//!
//! # Examples
//!
//! ```
//! use command::command_line;
//! use options::{HostPlatform, RsyncOptions};
//!
//! let mut options = RsyncOptions::new();
//! options
//!     .platform(HostPlatform::Posix)
//!     .flags("avz")
//!     .exclude(".git")
//!     .source("some file.txt")
//!     .destination("backup/");
//!
//! assert_eq!(
//!     command_line(&options.build()),
//!     r"rsync -avz --exclude=.git some\ file.txt backup/"
//! );
//! ```

mod builder;
mod escape;

pub use crate::builder::{CommandLine, build_args, command_line};
pub use crate::escape::{escape_option_value, escape_path};
