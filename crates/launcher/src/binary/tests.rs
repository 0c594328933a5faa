use super::{
    describe_missing_executable, executable_available, executable_candidates, resolve_executable,
};
use std::ffi::OsStr;
use tempfile::TempDir;

#[test]
fn describe_missing_executable_names_binary() {
    let message = describe_missing_executable(OsStr::new("/opt/rsync/bin/rsync"));

    assert!(message.contains("'/opt/rsync/bin/rsync'"));
    assert!(message.contains("install rsync"));
}

#[test]
fn explicit_path_is_the_only_candidate() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("rsync");

    let candidates = executable_candidates(path.as_os_str());

    assert_eq!(candidates.first(), Some(&path));
    #[cfg(not(windows))]
    assert_eq!(candidates.len(), 1);
}

#[test]
fn missing_explicit_path_is_unavailable() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("missing-rsync");

    assert!(!executable_available(path.as_os_str()));
    assert!(resolve_executable(path.as_os_str()).is_none());
}

#[test]
fn directory_is_not_executable() {
    let temp = TempDir::new().expect("tempdir");

    assert!(!executable_available(temp.path().as_os_str()));
}

#[cfg(unix)]
#[test]
fn mode_bits_decide_executability() {
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("rsync");
    File::create(&path).expect("create file");

    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).expect("chmod");
    assert!(!executable_available(path.as_os_str()));

    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    assert!(executable_available(path.as_os_str()));
    assert_eq!(resolve_executable(path.as_os_str()), Some(path));
}

#[cfg(unix)]
#[test]
fn bare_name_is_searched_on_path() {
    if std::env::var_os("PATH").is_none() {
        return;
    }

    let candidates = executable_candidates(OsStr::new("sh"));

    assert!(candidates.iter().all(|candidate| candidate.ends_with("sh")));
    assert!(executable_available(OsStr::new("sh")));
}
