//! The `satisfy` primitive every assertion is built on.

use std::rc::Rc;

use crate::core::{AssertionError, Environment, LogManager, Result};

use super::format::{ToValueRepr, ValueFormatter};

/// Source of the value under verification.
pub trait DataProvider {
    type Value: ToValueRepr;

    /// Display name of the component the value belongs to.
    fn component_full_name(&self) -> String;

    /// What the value is, e.g. `content`.
    fn provider_name(&self) -> &str;

    /// Fetch the current value.
    fn get(&mut self) -> Result<Self::Value>;
}

/// Verification builder over a [`DataProvider`].
///
/// Every assertion fetches the value once, logs a verification section,
/// and fails with `EngineError::Assertion` when the predicate result
/// disagrees with the expectation. Assertions return `&mut Self` so they
/// can be chained.
pub struct Should<P> {
    provider: P,
    negated: bool,
    log: Rc<dyn LogManager>,
    formatter: ValueFormatter,
}

impl<P: DataProvider> Should<P> {
    pub fn new(provider: P, env: &Environment) -> Self {
        Self {
            provider,
            negated: false,
            log: env.log_handle(),
            formatter: env.formatter(),
        }
    }

    /// Flip the expectation of every following assertion.
    #[must_use]
    pub fn should_not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    #[must_use]
    pub fn is_negation(&self) -> bool {
        self.negated
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Check `predicate` against the provider's value.
    ///
    /// `message` describes the expectation; `{0}`, `{1}`, ... are replaced
    /// with the quoted `args`. A failure reads:
    ///
    /// ```text
    /// Invalid "Count" value
    /// Expected: be greater than "5"
    /// But was: 3
    /// ```
    pub fn satisfy<F, A>(&mut self, predicate: F, message: &str, args: &[A]) -> Result<&mut Self>
    where
        F: FnOnce(&P::Value) -> bool,
        A: ToValueRepr,
    {
        let component = self.provider.component_full_name();
        let provider_name = self.provider.provider_name().to_string();

        let rendered: Vec<String> = args.iter().map(|arg| self.formatter.quote_arg(arg)).collect();
        let expectation = ValueFormatter::format_with(message, &rendered);
        let should = if self.negated { "should not" } else { "should" };

        let mut section = format!("{component} {provider_name}");
        if !expectation.is_empty() {
            section.push_str(&format!(" {should} {expectation}"));
        }

        self.log.start_section(&section);
        let outcome = self.check(predicate, &component, &provider_name, &expectation);
        self.log.end_section();

        outcome?;
        Ok(self)
    }

    fn check<F>(&mut self, predicate: F, component: &str, provider_name: &str, expectation: &str) -> Result<()>
    where
        F: FnOnce(&P::Value) -> bool,
    {
        let actual = self.provider.get()?;
        if predicate(&actual) != self.negated {
            return Ok(());
        }

        let expected = if self.negated {
            format!("not {expectation}")
        } else {
            expectation.to_string()
        };
        Err(AssertionError::new(
            format!("Invalid {component} {provider_name}"),
            expected,
            self.formatter.format(&actual),
        )
        .into())
    }
}

impl<P: DataProvider + std::fmt::Debug> std::fmt::Debug for Should<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Should")
            .field("provider", &self.provider)
            .field("negated", &self.negated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineError;
    use crate::testing::{MemoryDriver, MemoryLog};
    use crate::verification::ValueProvider;

    fn env(log: &Rc<MemoryLog>) -> Environment {
        Environment::new(Rc::new(MemoryDriver::new()), log.clone())
    }

    #[test]
    fn test_satisfy_failure_message() {
        let log = Rc::new(MemoryLog::new());
        let mut should = Should::new(ValueProvider::new("\"Count\"", "value", 3), &env(&log));

        let err = should
            .satisfy(|x| *x > 5, "be greater than {0}", &[5])
            .err()
            .unwrap();
        let assertion = match err {
            EngineError::Assertion(assertion) => assertion,
            other => panic!("expected an assertion failure, got {other:?}"),
        };

        assert!(assertion.message.contains("Expected: be greater than \"5\""));
        assert!(assertion.message.contains("But was: 3"));
        assert!(assertion.message.starts_with("Invalid \"Count\" value\n"));
        assert_eq!(log.open_sections(), 0);
    }

    #[test]
    fn test_satisfy_success() {
        let log = Rc::new(MemoryLog::new());
        let mut should = Should::new(ValueProvider::new("\"Count\"", "value", 10), &env(&log));

        assert!(should.satisfy(|x| *x > 5, "be greater than {0}", &[5]).is_ok());
        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Starting: \"Count\" value should be greater than \"5\"");
        assert_eq!(messages[1], "Finished: \"Count\" value should be greater than \"5\"");
    }

    #[test]
    fn test_negation() {
        let log = Rc::new(MemoryLog::new());
        let mut should = Should::new(ValueProvider::new("\"Count\"", "value", 10), &env(&log)).should_not();
        assert!(should.is_negation());

        assert!(should.satisfy(|x| *x < 5, "be less than {0}", &[5]).is_ok());

        let err = should.satisfy(|x| *x > 5, "be greater than {0}", &[5]).err().unwrap();
        assert!(err.to_string().contains("Expected: not be greater than \"5\""));
        assert!(log.messages()[0].contains("should not be less than"));
    }

    #[test]
    fn test_provider_error_propagates() {
        struct Broken;

        impl DataProvider for Broken {
            type Value = String;

            fn component_full_name(&self) -> String {
                "\"Broken\"".into()
            }

            fn provider_name(&self) -> &str {
                "content"
            }

            fn get(&mut self) -> Result<String> {
                Err(EngineError::driver("session closed"))
            }
        }

        let log = Rc::new(MemoryLog::new());
        let mut should = Should::new(Broken, &env(&log));
        let err = should.satisfy(|_| true, "exist", &[] as &[&str]).err().unwrap();

        assert!(matches!(err, EngineError::Driver { .. }));
        assert_eq!(log.open_sections(), 0);
    }
}
