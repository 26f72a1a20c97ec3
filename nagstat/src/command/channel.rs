//! Append-only writer for the daemon's external command file.
//!
//! The daemon polls the command file (usually a named pipe) and may recreate
//! it between reads, so every write opens, appends one line and closes.

use std::ffi::CString;
use std::fs::OpenOptions;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{Error, Result};

use super::format::{format_command, CommandRequest};

/// Result of one entry in a batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub request: CommandRequest,
    /// The line written, when the entry succeeded.
    pub line: Option<String>,
    pub messages: Vec<String>,
}

impl CommandOutcome {
    pub fn succeeded(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Aggregate result of a batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// True only if every entry succeeded.
    pub success: bool,
    pub outcomes: Vec<CommandOutcome>,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &CommandOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

/// Handle on the external command file.
#[derive(Debug, Clone)]
pub struct CommandChannel {
    path: PathBuf,
}

impl CommandChannel {
    /// Open a channel after checking that the file's directory exists and
    /// is writable by this user.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "External command directory {} does not exist",
                dir.display()
            )));
        }
        if !is_writable(&dir) {
            return Err(Error::Config(format!(
                "External command directory holding file {} is not writable by this user",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format and append one command, returning the written line.
    pub fn write(&self, request: &CommandRequest) -> Result<String> {
        let line = format_command(request)?;
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;
        info!(path = %self.path.display(), command = %line, "sent external command");
        Ok(line)
    }

    /// Write each request independently. A failing entry is recorded in the
    /// report and does not stop the others.
    pub fn submit(&self, requests: impl IntoIterator<Item = CommandRequest>) -> BatchReport {
        let outcomes: Vec<CommandOutcome> = requests
            .into_iter()
            .map(|request| match self.write(&request) {
                Ok(line) => CommandOutcome {
                    request,
                    line: Some(line),
                    messages: Vec::new(),
                },
                Err(e) => {
                    warn!(action = %request.action, error = %e, "external command rejected");
                    CommandOutcome {
                        request,
                        line: None,
                        messages: vec![e.to_string()],
                    }
                }
            })
            .collect();

        BatchReport {
            success: outcomes.iter().all(CommandOutcome::succeeded),
            outcomes,
        }
    }
}

/// `access(2)` with W_OK, so permission bits and ownership are both honored.
fn is_writable(path: &Path) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}
