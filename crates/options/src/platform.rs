use std::fmt;

/// Operating system class used to pick the spawn strategy and path rewriting.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum HostPlatform {
    /// Unix-like hosts: commands run through `<shell> -c`.
    #[default]
    Posix,
    /// Windows hosts: commands run through `cmd.exe` and drive-rooted paths
    /// are rewritten for the Unix-style shell that rsync ships with there.
    Windows,
}

impl HostPlatform {
    /// Returns the platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Reports whether this is the Windows platform.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => f.write_str("posix"),
            Self::Windows => f.write_str("windows"),
        }
    }
}
