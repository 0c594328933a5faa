use std::process::Stdio;

use options::{Config, HostPlatform};

/// Command interpreter used on Windows hosts.
pub const WINDOWS_COMMAND_INTERPRETER: &str = "cmd.exe";

/// How the rendered command line is handed to the operating system.
///
/// The command string is never split into separate arguments: it always
/// reaches a shell as one argument, because the tokens were escaped for a
/// shell to interpret.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpawnPlan {
    program: String,
    args: Vec<String>,
    verbatim: bool,
}

impl SpawnPlan {
    /// Chooses the spawn strategy for `command` on the configured platform.
    ///
    /// Windows runs `cmd.exe /s /c "<command>"` with the quoted command passed
    /// verbatim; every other platform runs `<executable_shell> -c <command>`.
    #[must_use]
    pub fn new(config: &Config, command: &str) -> Self {
        match config.platform() {
            HostPlatform::Windows => Self {
                program: WINDOWS_COMMAND_INTERPRETER.to_owned(),
                args: vec!["/s".to_owned(), "/c".to_owned(), format!("\"{command}\"")],
                verbatim: true,
            },
            HostPlatform::Posix => Self {
                program: config.executable_shell().to_owned(),
                args: vec!["-c".to_owned(), command.to_owned()],
                verbatim: false,
            },
        }
    }

    /// Program that is executed.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments handed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Reports whether arguments bypass the platform's argument quoting.
    #[must_use]
    pub const fn verbatim(&self) -> bool {
        self.verbatim
    }

    /// Builds the process command with piped output, cwd and environment.
    pub(crate) fn to_command(&self, config: &Config) -> tokio::process::Command {
        let mut command = std::process::Command::new(&self.program);
        self.push_args(&mut command);

        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = config.cwd() {
            command.current_dir(cwd);
        }
        if let Some(env) = config.env() {
            command.env_clear();
            command.envs(env.iter());
        }

        let mut command = tokio::process::Command::from(command);
        command.kill_on_drop(true);
        command
    }

    #[cfg(windows)]
    fn push_args(&self, command: &mut std::process::Command) {
        use std::os::windows::process::CommandExt;

        for arg in &self.args {
            if self.verbatim {
                command.raw_arg(arg);
            } else {
                command.arg(arg);
            }
        }
    }

    #[cfg(not(windows))]
    fn push_args(&self, command: &mut std::process::Command) {
        command.args(&self.args);
    }
}
