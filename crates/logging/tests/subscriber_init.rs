//! Global subscriber installation.
//!
//! Kept in its own test binary because the subscriber is process-global.

use logging::{DEFAULT_DIRECTIVES, LoggingError, init_tracing, targets};

#[test]
fn second_installation_is_rejected() {
    init_tracing("rsync_launcher=debug").expect("first installation succeeds");

    logging::trace_command!(command = "rsync -a a b", "rendered rsync command");
    logging::trace_exit!(code = 0, "rsync exited");

    let error = init_tracing(DEFAULT_DIRECTIVES).unwrap_err();
    assert!(matches!(error, LoggingError::Init(_)));
}

#[test]
fn invalid_directives_fail_before_installation() {
    let error = init_tracing("rsync_launcher=shouting").unwrap_err();

    assert!(matches!(error, LoggingError::Filter { .. }));
}

#[test]
fn targets_share_a_common_prefix() {
    for target in [targets::COMMAND, targets::SPAWN, targets::OUTPUT, targets::EXIT] {
        assert!(target.starts_with("rsync_launcher::"));
    }
}
