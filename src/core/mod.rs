//! Core types: lifecycle events, configuration, errors, logging, and the
//! browser session seam.
//!
//! Everything here is independent of the trigger engine's algorithms;
//! the rest of the crate builds on these types.

pub mod config;
pub mod driver;
pub mod environment;
pub mod error;
pub mod event;
pub mod log;

pub use config::{EngineConfig, FormatterConfig};
pub use driver::{BrowserDriver, ElementHandle, Locator, ScopeFinder};
pub use environment::Environment;
pub use error::{AssertionError, EngineError, Result};
pub use event::{EventMask, TriggerEvent};
pub use log::{LogLevel, LogManager, TracingLog};
