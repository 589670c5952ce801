//! Error types.
//!
//! Configuration defects (a component without a locator, binding metadata
//! twice, an unknown id) fail fast and are never retried. Assertion
//! failures carry the expected and actual text so they can fail the
//! current test. Nothing in the engine retries.

use thiserror::Error;

use crate::components::ComponentId;
use crate::metadata::ComponentTypeId;

/// Errors raised by the engine, its triggers, and its collaborators.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("element finder is missing for {component}")]
    ElementFinderMissing { component: String },

    #[error("unable to locate element: {component}")]
    NoSuchElement { component: String },

    #[error("metadata is already bound to {component}")]
    MetadataAlreadyBound { component: String },

    #[error("unknown component: {0}")]
    UnknownComponent(ComponentId),

    #[error("unknown component type: {0}")]
    UnknownComponentType(ComponentTypeId),

    #[error("no factory registered for trigger kind: {0}")]
    UnregisteredTriggerKind(String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Assertion(#[from] AssertionError),

    #[error("driver error: {message}")]
    Driver { message: String },

    #[error("trigger {kind} failed: {message}")]
    Trigger { kind: String, message: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Wrap a browser driver failure.
    pub fn driver(message: impl Into<String>) -> Self {
        EngineError::Driver {
            message: message.into(),
        }
    }

    /// Wrap a failure raised from a trigger body.
    pub fn trigger(kind: impl std::fmt::Display, message: impl Into<String>) -> Self {
        EngineError::Trigger {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    /// Check if this is an assertion failure.
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, EngineError::Assertion(_))
    }
}

/// A failed verification.
///
/// The message has the shape:
///
/// ```text
/// Invalid "Title" heading content
/// Expected: contain "Welcome"
/// But was: "Goodbye"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionError {
    /// The full, multi-line message.
    pub message: String,

    /// The rendered expectation.
    pub expected: String,

    /// The rendered actual value.
    pub actual: String,
}

impl AssertionError {
    /// Build an assertion error from its parts.
    pub fn new(
        primary: impl AsRef<str>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();

        let mut message = String::new();
        let primary = primary.as_ref();
        if !primary.trim().is_empty() {
            message.push_str(primary);
            message.push('\n');
        }
        message.push_str("Expected: ");
        message.push_str(&expected);
        message.push_str("\nBut was: ");
        message.push_str(&actual);

        Self {
            message,
            expected,
            actual,
        }
    }
}
