//! Tracing setup for the deployment binaries.
//!
//! Logs go to the console and, once a path is set, to a per-run log file.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Default)]
struct LogFileState {
    path: Option<PathBuf>,
    file: Option<File>,
}

/// A log file whose path is chosen after startup.
///
/// Writes made before [`LogFile::set_path`] are dropped from the file
/// but still reach the console layer.
#[derive(Debug, Clone, Default)]
pub struct LogFile {
    state: Arc<Mutex<LogFileState>>,
}

impl LogFile {
    /// Creates a log file with no path yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the parent directories and opens `path` for appending.
    pub fn set_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut state = self.state.lock();
        state.path = Some(path.to_path_buf());
        state.file = Some(file);
        Ok(())
    }

    /// Returns the current path.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        self.state.lock().path.clone()
    }
}

/// Writer handed out to the file layer.
#[derive(Debug)]
pub struct LogFileWriter {
    state: Arc<Mutex<LogFileState>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.state.lock().file.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state.lock().file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            state: Arc::clone(&self.state),
        }
    }
}

/// Installs the global subscriber: an env filter, a console layer, and a
/// plain-text layer writing to `log_file`.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str, log_file: LogFile) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(log_file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}
