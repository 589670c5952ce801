//! Verification engine.
//!
//! A single primitive, [`Should::satisfy`], fetches a value once through a
//! [`DataProvider`], checks a predicate, and fails with a structured
//! [`AssertionError`](crate::core::AssertionError) when the (possibly
//! negated) result disagrees. The assertion catalogue (`equal`,
//! `contain`, `be_greater`, `equal_date`, ...) is a set of fixed calls to
//! `satisfy`.
//!
//! ## Example Usage
//!
//! ```
//! use std::rc::Rc;
//!
//! use rust_pom::core::Environment;
//! use rust_pom::testing::{MemoryDriver, MemoryLog};
//! use rust_pom::verification::{Should, ValueProvider};
//!
//! let env = Environment::new(Rc::new(MemoryDriver::new()), Rc::new(MemoryLog::new()));
//! let mut should = Should::new(ValueProvider::new("\"Count\"", "value", 3), &env);
//!
//! let err = should.be_greater(5).err().unwrap();
//! assert!(err.to_string().contains("Expected: be greater than \"5\""));
//! assert!(err.to_string().contains("But was: 3"));
//! ```

mod assertions;
mod format;
mod provider;
mod should;

pub use assertions::{AsBool, DateValue, OrderedValue, TextValue};
pub use format::{Displayed, ToValueRepr, ValueFormatter, ValueRepr};
pub use provider::{ContentProvider, ExistenceProvider, ValueProvider};
pub use should::{DataProvider, Should};
