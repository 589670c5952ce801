//! In-memory collaborators for tests.
//!
//! [`MemoryDriver`] stands in for a browser: elements are registered by
//! locator path and every interaction is recorded. [`MemoryLog`] records
//! sections and messages instead of emitting them.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::core::{BrowserDriver, ElementHandle, EngineError, Locator, LogLevel, LogManager, Result};

/// A browser made of a map from locator path to element text.
///
/// A locator path is the chain of locators from the document down, joined
/// with `" > "`, e.g. `css=form > id=email`. Element handles carry their
/// path as the reference.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    elements: RefCell<FxHashMap<String, String>>,
    actions: RefCell<Vec<String>>,
}

impl MemoryDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element and its ancestors (builder pattern).
    #[must_use]
    pub fn with_element(self, path: &[Locator], text: &str) -> Self {
        self.add_element(path, text);
        self
    }

    /// Register an element and its ancestors.
    pub fn add_element(&self, path: &[Locator], text: &str) {
        let mut elements = self.elements.borrow_mut();
        for end in 1..path.len() {
            elements.entry(Self::path(&path[..end])).or_default();
        }
        elements.insert(Self::path(path), text.to_string());
    }

    /// Replace an element's text.
    pub fn set_text(&self, path: &[Locator], text: &str) {
        self.elements
            .borrow_mut()
            .insert(Self::path(path), text.to_string());
    }

    /// Remove an element and everything inside it.
    pub fn remove_element(&self, path: &[Locator]) {
        let key = Self::path(path);
        let nested = format!("{key} > ");
        self.elements
            .borrow_mut()
            .retain(|k, _| *k != key && !k.starts_with(&nested));
    }

    /// Current text of an element, if present.
    #[must_use]
    pub fn text(&self, path: &[Locator]) -> Option<String> {
        self.elements.borrow().get(&Self::path(path)).cloned()
    }

    /// Interactions so far, e.g. `click css=form > id=save`.
    #[must_use]
    pub fn actions(&self) -> Vec<String> {
        self.actions.borrow().clone()
    }

    fn path(locators: &[Locator]) -> String {
        locators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    fn require(&self, element: &ElementHandle) -> Result<()> {
        if self.elements.borrow().contains_key(element.reference()) {
            Ok(())
        } else {
            Err(EngineError::driver(format!("stale element: {}", element.reference())))
        }
    }

    fn record(&self, action: String) {
        self.actions.borrow_mut().push(action);
    }
}

impl BrowserDriver for MemoryDriver {
    fn find_element(
        &self,
        scope: Option<&ElementHandle>,
        locator: &Locator,
    ) -> Result<Option<ElementHandle>> {
        let key = match scope {
            Some(scope) => format!("{} > {locator}", scope.reference()),
            None => locator.to_string(),
        };
        let found = self.elements.borrow().contains_key(&key);
        Ok(found.then(|| ElementHandle::new(key)))
    }

    fn element_text(&self, element: &ElementHandle) -> Result<String> {
        self.elements
            .borrow()
            .get(element.reference())
            .cloned()
            .ok_or_else(|| EngineError::driver(format!("stale element: {}", element.reference())))
    }

    fn click(&self, element: &ElementHandle) -> Result<()> {
        self.require(element)?;
        self.record(format!("click {}", element.reference()));
        Ok(())
    }

    fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()> {
        self.require(element)?;
        if let Some(value) = self.elements.borrow_mut().get_mut(element.reference()) {
            value.push_str(text);
        }
        self.record(format!("send_keys {} {text}", element.reference()));
        Ok(())
    }

    fn clear(&self, element: &ElementHandle) -> Result<()> {
        self.require(element)?;
        if let Some(value) = self.elements.borrow_mut().get_mut(element.reference()) {
            value.clear();
        }
        self.record(format!("clear {}", element.reference()));
        Ok(())
    }
}

/// One recorded log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,

    /// Number of sections open when the line was written.
    pub depth: usize,
}

/// [`LogManager`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: RefCell<Vec<LogEntry>>,
    sections: RefCell<Vec<String>>,
}

impl MemoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Messages in the order they were written.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.message.clone()).collect()
    }

    /// Messages at `level`.
    #[must_use]
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    #[must_use]
    pub fn open_sections(&self) -> usize {
        self.sections.borrow().len()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn push(&self, level: LogLevel, message: String) {
        let depth = self.sections.borrow().len();
        self.entries.borrow_mut().push(LogEntry {
            level,
            message,
            depth,
        });
    }
}

impl LogManager for MemoryLog {
    fn start_section(&self, message: &str) {
        self.push(LogLevel::Info, format!("Starting: {message}"));
        self.sections.borrow_mut().push(message.to_string());
    }

    fn end_section(&self) {
        let closed = self.sections.borrow_mut().pop();
        if let Some(message) = closed {
            self.push(LogLevel::Info, format!("Finished: {message}"));
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.push(level, message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_nested_element() {
        let driver = MemoryDriver::new().with_element(&[Locator::css("form"), Locator::id("email")], "a");

        let form = driver.find_element(None, &Locator::css("form")).unwrap().unwrap();
        let email = driver.find_element(Some(&form), &Locator::id("email")).unwrap().unwrap();
        assert_eq!(email.reference(), "css=form > id=email");
        assert_eq!(driver.element_text(&email).unwrap(), "a");

        assert!(driver.find_element(None, &Locator::id("email")).unwrap().is_none());
    }

    #[test]
    fn test_remove_element_removes_nested() {
        let path = [Locator::css("form"), Locator::id("email")];
        let driver = MemoryDriver::new().with_element(&path, "a");

        driver.remove_element(&path[..1]);
        assert!(driver.text(&path).is_none());
        assert!(driver.text(&path[..1]).is_none());
    }

    #[test]
    fn test_stale_element() {
        let driver = MemoryDriver::new();
        let err = driver.click(&ElementHandle::new("id=gone")).unwrap_err();
        assert!(matches!(err, EngineError::Driver { .. }));
    }

    #[test]
    fn test_memory_log_sections() {
        let log = MemoryLog::new();
        log.start_section("outer");
        log.info("inside");
        log.end_section();
        log.end_section();

        assert_eq!(log.messages(), vec!["Starting: outer", "inside", "Finished: outer"]);
        assert_eq!(log.entries()[1].depth, 1);
        assert_eq!(log.open_sections(), 0);
    }
}
