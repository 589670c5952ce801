//! Browser session seam.
//!
//! The engine never talks to a browser itself. Callers implement
//! [`BrowserDriver`] over whatever WebDriver client they use; the engine
//! only hands it opaque [`Locator`]s and [`ElementHandle`]s.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::error::Result;

/// How to find an element. The engine does not interpret it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    /// Search strategy, e.g. `id`, `css`, `xpath`.
    pub strategy: String,

    /// Strategy-specific search term.
    pub value: String,
}

impl Locator {
    /// Create a locator from a strategy and a value.
    pub fn new(strategy: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            value: value.into(),
        }
    }

    /// Locate by element id.
    pub fn id(value: impl Into<String>) -> Self {
        Self::new("id", value)
    }

    /// Locate by CSS selector.
    pub fn css(value: impl Into<String>) -> Self {
        Self::new("css", value)
    }

    /// Locate by XPath.
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new("xpath", value)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.strategy, self.value)
    }
}

/// Opaque reference to an element owned by the driver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub String);

impl ElementHandle {
    /// Create a handle from the driver's element reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The driver's element reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.0
    }
}

/// A browser session.
///
/// Any blocking or waiting happens inside the implementation; the engine
/// calls it synchronously and propagates its errors.
pub trait BrowserDriver {
    /// Find the first element matching `locator` inside `scope`
    /// (the document when `None`). A missing element is `Ok(None)`.
    fn find_element(
        &self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> Result<Option<ElementHandle>>;

    /// Visible text of an element.
    fn element_text(&self, element: &ElementHandle) -> Result<String>;

    /// Click an element.
    fn click(&self, element: &ElementHandle) -> Result<()>;

    /// Type text into an element.
    fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()>;

    /// Clear an element's value.
    fn clear(&self, element: &ElementHandle) -> Result<()>;
}

/// Locates a component's scope element.
///
/// The flag asks the finder to fail silently: when `true`, a missing
/// element is `Ok(None)`; when `false`, it is `EngineError::NoSuchElement`.
pub type ScopeFinder = Rc<dyn Fn(bool) -> Result<Option<ElementHandle>>>;
