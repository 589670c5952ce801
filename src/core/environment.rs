//! Shared session environment: driver, logger, configuration.

use std::rc::Rc;

use super::config::EngineConfig;
use super::driver::BrowserDriver;
use super::log::LogManager;
use crate::verification::ValueFormatter;

/// Everything a trigger needs besides the component tree.
///
/// Cloning is cheap; all parts are reference counted. The environment is
/// `!Send`: one thread drives a component tree.
#[derive(Clone)]
pub struct Environment {
    driver: Rc<dyn BrowserDriver>,
    log: Rc<dyn LogManager>,
    config: Rc<EngineConfig>,
}

impl Environment {
    /// Create an environment with the default configuration.
    pub fn new(driver: Rc<dyn BrowserDriver>, log: Rc<dyn LogManager>) -> Self {
        Self {
            driver,
            log,
            config: Rc::new(EngineConfig::default()),
        }
    }

    /// Replace the configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    /// The browser session.
    #[must_use]
    pub fn driver(&self) -> &dyn BrowserDriver {
        self.driver.as_ref()
    }

    /// A shared handle to the browser session.
    #[must_use]
    pub fn driver_handle(&self) -> Rc<dyn BrowserDriver> {
        Rc::clone(&self.driver)
    }

    /// The logger.
    #[must_use]
    pub fn log(&self) -> &dyn LogManager {
        self.log.as_ref()
    }

    /// A shared handle to the logger.
    #[must_use]
    pub fn log_handle(&self) -> Rc<dyn LogManager> {
        Rc::clone(&self.log)
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A value formatter built from the configuration.
    #[must_use]
    pub fn formatter(&self) -> ValueFormatter {
        ValueFormatter::new(self.config.formatter.clone())
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
