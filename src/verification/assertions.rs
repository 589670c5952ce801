//! Assertion catalogue.
//!
//! Every assertion is a call to [`Should::satisfy`] with a fixed predicate
//! and message template. Which assertions are available depends on the
//! provider's value type, through the small traits below.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::core::Result;

use super::format::{ToValueRepr, ValueRepr};
use super::should::{DataProvider, Should};

/// Values that may be text.
pub trait TextValue {
    fn as_text(&self) -> Option<&str>;
}

impl TextValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl TextValue for &str {
    fn as_text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl TextValue for Option<String> {
    fn as_text(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Values that may be a boolean.
pub trait AsBool {
    fn as_bool(&self) -> Option<bool>;
}

impl AsBool for bool {
    fn as_bool(&self) -> Option<bool> {
        Some(*self)
    }
}

impl AsBool for Option<bool> {
    fn as_bool(&self) -> Option<bool> {
        *self
    }
}

/// Values that may be compared. Absent values fail every comparison.
pub trait OrderedValue {
    type Inner: PartialOrd + ToValueRepr;

    fn ordered(&self) -> Option<&Self::Inner>;
}

macro_rules! ordered_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OrderedValue for $ty {
                type Inner = $ty;

                fn ordered(&self) -> Option<&$ty> {
                    Some(self)
                }
            }
        )*
    };
}

ordered_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
ordered_value!(char, String, NaiveDate, NaiveDateTime);

impl<T: OrderedValue> OrderedValue for Option<T> {
    type Inner = T::Inner;

    fn ordered(&self) -> Option<&T::Inner> {
        self.as_ref().and_then(OrderedValue::ordered)
    }
}

/// Values that may carry a calendar date.
pub trait DateValue {
    fn date(&self) -> Option<NaiveDate>;
}

impl DateValue for NaiveDate {
    fn date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl DateValue for NaiveDateTime {
    fn date(&self) -> Option<NaiveDate> {
        Some(NaiveDateTime::date(self))
    }
}

impl<Tz: TimeZone> DateValue for DateTime<Tz> {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date_naive())
    }
}

impl<T: DateValue> DateValue for Option<T> {
    fn date(&self) -> Option<NaiveDate> {
        self.as_ref().and_then(DateValue::date)
    }
}

const NO_ARGS: &[&str] = &[];

impl<P> Should<P>
where
    P: DataProvider,
{
    /// The value is absent.
    pub fn be_null(&mut self) -> Result<&mut Self> {
        self.satisfy(
            |actual| matches!(actual.to_value_repr(), ValueRepr::Null),
            "be null",
            NO_ARGS,
        )
    }
}

impl<P> Should<P>
where
    P: DataProvider,
    P::Value: PartialEq,
{
    pub fn equal(&mut self, expected: P::Value) -> Result<&mut Self> {
        self.satisfy(
            |actual| *actual == expected,
            "equal {0}",
            std::slice::from_ref(&expected),
        )
    }
}

impl<P> Should<P>
where
    P: DataProvider,
    P::Value: AsBool,
{
    pub fn be_true(&mut self) -> Result<&mut Self> {
        self.satisfy(|actual| actual.as_bool() == Some(true), "be true", NO_ARGS)
    }

    pub fn be_false(&mut self) -> Result<&mut Self> {
        self.satisfy(|actual| actual.as_bool() == Some(false), "be false", NO_ARGS)
    }
}

impl<P> Should<P>
where
    P: DataProvider,
    P::Value: TextValue,
{
    pub fn be_null_or_empty(&mut self) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.as_text().map_or(true, str::is_empty),
            "be null or empty",
            NO_ARGS,
        )
    }

    pub fn be_null_or_white_space(&mut self) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.as_text().map_or(true, |text| text.trim().is_empty()),
            "be null or white-space",
            NO_ARGS,
        )
    }

    pub fn equal_ignoring_case(&mut self, expected: &str) -> Result<&mut Self> {
        let wanted = expected.to_lowercase();
        self.satisfy(
            |actual| actual.as_text().is_some_and(|text| text.to_lowercase() == wanted),
            "equal {0} ignoring case",
            &[expected],
        )
    }

    pub fn contain(&mut self, expected: &str) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.as_text().is_some_and(|text| text.contains(expected)),
            "contains {0}",
            &[expected],
        )
    }

    pub fn start_with(&mut self, expected: &str) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.as_text().is_some_and(|text| text.starts_with(expected)),
            "start with {0}",
            &[expected],
        )
    }

    pub fn start_with_ignoring_case(&mut self, expected: &str) -> Result<&mut Self> {
        let wanted = expected.to_lowercase();
        self.satisfy(
            |actual| {
                actual
                    .as_text()
                    .is_some_and(|text| text.to_lowercase().starts_with(&wanted))
            },
            "start with {0} ignoring case",
            &[expected],
        )
    }

    pub fn end_with(&mut self, expected: &str) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.as_text().is_some_and(|text| text.ends_with(expected)),
            "end with {0}",
            &[expected],
        )
    }

    pub fn end_with_ignoring_case(&mut self, expected: &str) -> Result<&mut Self> {
        let wanted = expected.to_lowercase();
        self.satisfy(
            |actual| {
                actual
                    .as_text()
                    .is_some_and(|text| text.to_lowercase().ends_with(&wanted))
            },
            "end with {0} ignoring case",
            &[expected],
        )
    }

    /// The text matches a regular expression. An invalid pattern is
    /// `EngineError::InvalidPattern`.
    pub fn match_pattern(&mut self, pattern: &str) -> Result<&mut Self> {
        let regex = Regex::new(pattern)?;
        self.satisfy(
            |actual| actual.as_text().is_some_and(|text| regex.is_match(text)),
            "match pattern {0}",
            &[pattern],
        )
    }
}

impl<P> Should<P>
where
    P: DataProvider,
    P::Value: OrderedValue,
{
    pub fn be_greater(&mut self, expected: <P::Value as OrderedValue>::Inner) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.ordered().is_some_and(|value| *value > expected),
            "be greater than {0}",
            std::slice::from_ref(&expected),
        )
    }

    pub fn be_greater_or_equal(
        &mut self,
        expected: <P::Value as OrderedValue>::Inner,
    ) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.ordered().is_some_and(|value| *value >= expected),
            "be greater than or equal to {0}",
            std::slice::from_ref(&expected),
        )
    }

    pub fn be_less(&mut self, expected: <P::Value as OrderedValue>::Inner) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.ordered().is_some_and(|value| *value < expected),
            "be less than {0}",
            std::slice::from_ref(&expected),
        )
    }

    pub fn be_less_or_equal(&mut self, expected: <P::Value as OrderedValue>::Inner) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.ordered().is_some_and(|value| *value <= expected),
            "be less than or equal to {0}",
            std::slice::from_ref(&expected),
        )
    }

    /// Passes when `actual >= from` or `actual <= to`, so any present
    /// value passes an ordered range. Only a null value fails.
    pub fn be_in_range(
        &mut self,
        from: <P::Value as OrderedValue>::Inner,
        to: <P::Value as OrderedValue>::Inner,
    ) -> Result<&mut Self> {
        let bounds = [from, to];
        self.satisfy(
            |actual| {
                actual
                    .ordered()
                    .is_some_and(|value| *value >= bounds[0] || *value <= bounds[1])
            },
            "be in range {0} - {1}",
            &bounds,
        )
    }
}

impl<P> Should<P>
where
    P: DataProvider,
    P::Value: DateValue,
{
    /// Same calendar date; the time of day is ignored.
    pub fn equal_date(&mut self, expected: NaiveDate) -> Result<&mut Self> {
        self.satisfy(
            |actual| actual.date() == Some(expected),
            "equal date {0}",
            &[expected],
        )
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::core::{EngineError, Environment};
    use crate::testing::{MemoryDriver, MemoryLog};
    use crate::verification::ValueProvider;

    fn env() -> Environment {
        Environment::new(Rc::new(MemoryDriver::new()), Rc::new(MemoryLog::new()))
    }

    fn should<T: ToValueRepr + Clone>(value: T) -> Should<ValueProvider<T>> {
        Should::new(ValueProvider::new("\"Field\"", "value", value), &env())
    }

    fn failure(result: Result<&mut Should<impl DataProvider>>) -> String {
        match result {
            Err(EngineError::Assertion(assertion)) => assertion.message,
            Err(other) => panic!("expected an assertion failure, got {other:?}"),
            Ok(_) => panic!("expected an assertion failure"),
        }
    }

    #[test]
    fn test_equal_and_chaining() {
        let mut s = should("Sign in".to_string());
        s.equal("Sign in".to_string())
            .unwrap()
            .start_with("Sign")
            .unwrap()
            .end_with("in")
            .unwrap();

        let message = failure(s.equal("Log in".to_string()));
        assert!(message.contains("Expected: equal \"Log in\""));
        assert!(message.contains("But was: \"Sign in\""));
    }

    #[test]
    fn test_booleans() {
        assert!(should(true).be_true().is_ok());
        assert!(should(Some(false)).be_false().is_ok());
        assert!(should(None::<bool>).be_true().is_err());
        assert!(should(None::<bool>).be_false().is_err());
    }

    #[test]
    fn test_null_checks() {
        assert!(should(None::<String>).be_null().is_ok());
        assert!(should(None::<String>).be_null_or_empty().is_ok());
        assert!(should(Some(String::new())).be_null_or_empty().is_ok());
        assert!(should(Some(" \t".to_string())).be_null_or_white_space().is_ok());

        let message = failure(should(Some("x".to_string())).be_null());
        assert!(message.contains("Expected: be null"));
        assert!(message.contains("But was: \"x\""));
    }

    #[test]
    fn test_text_assertions() {
        let mut s = should("Welcome back".to_string());
        assert!(s.contain("come").is_ok());
        assert!(s.equal_ignoring_case("WELCOME BACK").is_ok());
        assert!(s.start_with_ignoring_case("welcome").is_ok());
        assert!(s.end_with_ignoring_case("BACK").is_ok());

        let message = failure(s.contain("Goodbye"));
        assert!(message.contains("Expected: contains \"Goodbye\""));
    }

    #[test]
    fn test_absent_text_fails_text_assertions() {
        assert!(should(None::<String>).contain("").is_err());
        assert!(should(None::<String>).start_with("").is_err());
    }

    #[test]
    fn test_match_pattern() {
        assert!(should("order-1234".to_string()).match_pattern(r"^order-\d+$").is_ok());

        let message = failure(should("order".to_string()).match_pattern(r"\d+"));
        assert!(message.contains("Expected: match pattern \"\\d+\""));

        assert!(matches!(
            should("x".to_string()).match_pattern("("),
            Err(EngineError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(should(10).be_greater(5).is_ok());
        assert!(should(5).be_greater_or_equal(5).is_ok());
        assert!(should(3).be_less(5).is_ok());
        assert!(should(5).be_less_or_equal(5).is_ok());
        assert!(should(None::<i32>).be_less(5).is_err());

        let message = failure(should(3).be_greater(5));
        assert!(message.contains("Expected: be greater than \"5\""));
        assert!(message.contains("But was: 3"));
    }

    #[test]
    fn test_in_range_needs_either_bound() {
        assert!(should(5).be_in_range(1, 10).is_ok());
        assert!(should(0).be_in_range(1, 10).is_ok());
        assert!(should(11).be_in_range(1, 10).is_ok());
        assert!(should(None::<i32>).be_in_range(1, 10).is_err());

        let message = failure(should(11).should_not().be_in_range(1, 10));
        assert!(message.contains("Expected: not be in range \"1\" - \"10\""));
    }

    #[test]
    fn test_equal_date_ignores_time() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let evening = date.and_hms_opt(21, 30, 0).unwrap();

        assert!(should(evening).equal_date(date).is_ok());
        assert!(should(Some(date)).equal_date(date).is_ok());

        let other = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
        let message = failure(should(evening).equal_date(other));
        assert!(message.contains("Expected: equal date \"2024-05-18\""));
    }

    #[test]
    fn test_negated_assertions() {
        let mut s = should("Welcome".to_string()).should_not();
        assert!(s.contain("Goodbye").is_ok());

        let message = failure(s.contain("Wel"));
        assert!(message.contains("Expected: not contains \"Wel\""));
    }
}
