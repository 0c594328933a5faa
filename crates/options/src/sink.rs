use std::fmt;
use std::sync::Arc;

/// Callback receiving raw output chunks from the child process.
///
/// Chunks arrive exactly as the operating system delivered them; no line
/// splitting or decoding happens before the callback runs.
pub type Sink = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Wraps a closure into a [`Sink`].
pub fn sink<F>(callback: F) -> Sink
where
    F: Fn(&[u8]) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Optional stdout and stderr sinks attached to a configuration.
#[derive(Clone, Default)]
pub struct OutputSinks {
    stdout: Option<Sink>,
    stderr: Option<Sink>,
}

impl OutputSinks {
    /// Creates a sink pair.
    #[must_use]
    pub fn new(stdout: Option<Sink>, stderr: Option<Sink>) -> Self {
        Self { stdout, stderr }
    }

    /// Returns the stdout sink.
    #[must_use]
    pub fn stdout(&self) -> Option<&Sink> {
        self.stdout.as_ref()
    }

    /// Returns the stderr sink.
    #[must_use]
    pub fn stderr(&self) -> Option<&Sink> {
        self.stderr.as_ref()
    }

    /// Returns a pair where each supplied sink replaces the stored one.
    #[must_use]
    pub fn overridden_by(&self, stdout: Option<Sink>, stderr: Option<Sink>) -> Self {
        Self {
            stdout: stdout.or_else(|| self.stdout.clone()),
            stderr: stderr.or_else(|| self.stderr.clone()),
        }
    }

    pub(crate) fn set_stdout(&mut self, sink: Sink) {
        self.stdout = Some(sink);
    }

    pub(crate) fn set_stderr(&mut self, sink: Sink) {
        self.stderr = Some(sink);
    }
}

impl fmt::Debug for OutputSinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSinks")
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .finish()
    }
}
