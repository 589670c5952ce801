//! Test-author facing logger.
//!
//! Triggers and the verification engine report through [`LogManager`]:
//! scoped sections ("Starting ..." / "Finished ...") plus leveled messages.
//! [`TracingLog`] forwards everything to `tracing`; an in-memory recorder
//! lives in `crate::testing`.

use std::cell::RefCell;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Severity of a log message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Logger handed to triggers.
///
/// Methods take `&self`; implementations keep their section stack behind
/// interior mutability because the logger is shared with `Rc`.
pub trait LogManager {
    /// Open a nested section.
    fn start_section(&self, message: &str);

    /// Close the innermost open section. Does nothing if none is open.
    fn end_section(&self);

    /// Log a message at the given level.
    fn log(&self, level: LogLevel, message: &str);

    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// [`LogManager`] that emits `tracing` events.
///
/// Sections are reported as a pair of info events; the closing event
/// carries the elapsed time.
#[derive(Debug, Default)]
pub struct TracingLog {
    sections: RefCell<Vec<(String, Instant)>>,
}

impl TracingLog {
    /// Create a new logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open sections.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.sections.borrow().len()
    }
}

impl LogManager for TracingLog {
    fn start_section(&self, message: &str) {
        let depth = self.depth();
        tracing::info!(depth, "Starting: {message}");
        self.sections
            .borrow_mut()
            .push((message.to_string(), Instant::now()));
    }

    fn end_section(&self) {
        let closed = self.sections.borrow_mut().pop();
        if let Some((message, started)) = closed {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            tracing::info!(depth = self.depth(), elapsed_ms, "Finished: {message}");
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        let depth = self.depth();
        match level {
            LogLevel::Trace => tracing::trace!(depth, "{message}"),
            LogLevel::Debug => tracing::debug!(depth, "{message}"),
            LogLevel::Info => tracing::info!(depth, "{message}"),
            LogLevel::Warn => tracing::warn!(depth, "{message}"),
            LogLevel::Error => tracing::error!(depth, "{message}"),
        }
    }
}
