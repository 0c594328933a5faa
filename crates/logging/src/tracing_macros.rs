//! crates/logging/src/tracing_macros.rs
//! Convenience macros for launcher-specific tracing.
//!
//! These macros wrap the standard tracing macros with the targets listed in
//! [`crate::targets`], so a filter such as `rsync_launcher::spawn=debug`
//! selects one subsystem. Callers need `tracing` in their own dependencies.

/// Emit a trace about the rendered command line.
///
/// # Example
/// ```ignore
/// trace_command!(command = %cmd, "rendered rsync command");
/// ```
#[macro_export]
macro_rules! trace_command {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "rsync_launcher::command", $($arg)*);
    };
}

/// Emit a trace about spawning the child process.
///
/// # Example
/// ```ignore
/// trace_spawn!(program = %program, "spawning rsync");
/// ```
#[macro_export]
macro_rules! trace_spawn {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "rsync_launcher::spawn", $($arg)*);
    };
}

/// Emit a trace about forwarded output.
///
/// # Example
/// ```ignore
/// trace_output!(bytes = n, "forwarded stdout chunk");
/// ```
#[macro_export]
macro_rules! trace_output {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "rsync_launcher::output", $($arg)*);
    };
}

/// Emit a trace about the child's exit.
///
/// # Example
/// ```ignore
/// trace_exit!(code, "rsync exited");
/// ```
#[macro_export]
macro_rules! trace_exit {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "rsync_launcher::exit", $($arg)*);
    };
}
