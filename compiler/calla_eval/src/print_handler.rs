//! Destination for `console.log` output.
//!
//! Every evaluated print appends one line, in program order:
//! - `Stdout`: written immediately (the CLI)
//! - `Buffer`: captured for tests and for callers that inspect the output
//! - `Silent`: discarded

use std::sync::Arc;

use parking_lot::Mutex;

/// Print handler, dispatched by enum rather than trait object.
pub enum PrintHandlerImpl {
    Stdout,
    Buffer(Mutex<Vec<String>>),
    Silent,
}

impl PrintHandlerImpl {
    /// Append one output line.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(lines) => lines.lock().push(line.to_owned()),
            Self::Silent => {}
        }
    }

    /// Captured lines so far. Empty for handlers that don't capture.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(lines) => lines.lock().clone(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }

    /// Captured output joined with trailing newlines.
    pub fn get_output(&self) -> String {
        self.lines().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    pub fn clear(&self) {
        if let Self::Buffer(lines) = self {
            lines.lock().clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Create a default stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(Vec::new())))
}

/// Create a print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
