//! Rendering values for verification messages.
//!
//! Values are first reduced to a [`ValueRepr`], then rendered by a
//! [`ValueFormatter`] built from [`FormatterConfig`]:
//!
//! | value      | rendered        |
//! |------------|-----------------|
//! | absent     | `null`          |
//! | text       | `"text"`        |
//! | primitive  | `42`            |
//! | collection | `< 1, 2 >`      |
//! | empty      | `<empty>`       |
//! | object     | `{Display}`     |

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::core::FormatterConfig;

/// Shape of a value, as far as message rendering cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueRepr {
    Null,
    Text(String),
    Primitive(String),
    Collection(Vec<ValueRepr>),
    Object(String),
}

/// Conversion into a [`ValueRepr`].
pub trait ToValueRepr {
    fn to_value_repr(&self) -> ValueRepr;
}

impl<T: ToValueRepr + ?Sized> ToValueRepr for &T {
    fn to_value_repr(&self) -> ValueRepr {
        (**self).to_value_repr()
    }
}

impl ToValueRepr for str {
    fn to_value_repr(&self) -> ValueRepr {
        ValueRepr::Text(self.to_string())
    }
}

impl ToValueRepr for String {
    fn to_value_repr(&self) -> ValueRepr {
        ValueRepr::Text(self.clone())
    }
}

macro_rules! primitive_repr {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValueRepr for $ty {
                fn to_value_repr(&self) -> ValueRepr {
                    ValueRepr::Primitive(self.to_string())
                }
            }
        )*
    };
}

primitive_repr!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
primitive_repr!(NaiveDate, NaiveDateTime);

impl<Tz: TimeZone> ToValueRepr for DateTime<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn to_value_repr(&self) -> ValueRepr {
        ValueRepr::Primitive(self.to_string())
    }
}

impl<T: ToValueRepr> ToValueRepr for Option<T> {
    fn to_value_repr(&self) -> ValueRepr {
        self.as_ref().map_or(ValueRepr::Null, ToValueRepr::to_value_repr)
    }
}

impl<T: ToValueRepr> ToValueRepr for [T] {
    fn to_value_repr(&self) -> ValueRepr {
        ValueRepr::Collection(self.iter().map(ToValueRepr::to_value_repr).collect())
    }
}

impl<T: ToValueRepr> ToValueRepr for Vec<T> {
    fn to_value_repr(&self) -> ValueRepr {
        self.as_slice().to_value_repr()
    }
}

/// Renders any `Display` value as an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

impl<T: std::fmt::Display> ToValueRepr for Displayed<T> {
    fn to_value_repr(&self) -> ValueRepr {
        ValueRepr::Object(self.0.to_string())
    }
}

/// Renders values for verification messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueFormatter {
    config: FormatterConfig,
}

impl ValueFormatter {
    #[must_use]
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Render a value the way an actual value is shown.
    pub fn format<T: ToValueRepr + ?Sized>(&self, value: &T) -> String {
        self.format_repr(&value.to_value_repr())
    }

    /// Render a [`ValueRepr`], recursing into collections.
    #[must_use]
    pub fn format_repr(&self, repr: &ValueRepr) -> String {
        match repr {
            ValueRepr::Null => self.config.null_text.clone(),
            ValueRepr::Text(text) => format!("\"{text}\""),
            ValueRepr::Primitive(text) => text.clone(),
            ValueRepr::Collection(items) if items.is_empty() => {
                self.config.empty_collection_text.clone()
            }
            ValueRepr::Collection(items) => {
                let rendered: Vec<String> = items.iter().map(|i| self.format_repr(i)).collect();
                format!("< {} >", rendered.join(&self.config.collection_separator))
            }
            ValueRepr::Object(text) => format!("{{{text}}}"),
        }
    }

    /// Render a value as plain text, without quotes or braces.
    pub fn format_value<T: ToValueRepr + ?Sized>(&self, value: &T) -> String {
        match value.to_value_repr() {
            ValueRepr::Null => self.config.null_text.clone(),
            ValueRepr::Text(text) | ValueRepr::Primitive(text) | ValueRepr::Object(text) => text,
            collection @ ValueRepr::Collection(_) => self.format_repr(&collection),
        }
    }

    /// Render an expected argument: plain text in double quotes.
    pub fn quote_arg<T: ToValueRepr + ?Sized>(&self, value: &T) -> String {
        format!("\"{}\"", self.format_value(value))
    }

    /// Substitute `{0}`, `{1}`, ... in `template` with `args`.
    ///
    /// Placeholders without a matching argument are kept as written.
    #[must_use]
    pub fn format_with(template: &str, args: &[String]) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            output.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let arg = after
                .find('}')
                .and_then(|end| after[..end].parse::<usize>().ok().map(|i| (i, end)))
                .and_then(|(i, end)| args.get(i).map(|arg| (arg, end)));

            match arg {
                Some((arg, end)) => {
                    output.push_str(arg);
                    rest = &after[end + 1..];
                }
                None => {
                    output.push('{');
                    rest = after;
                }
            }
        }

        output.push_str(rest);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> ValueFormatter {
        ValueFormatter::default()
    }

    #[test]
    fn test_format_cases() {
        let f = formatter();
        assert_eq!(f.format(&None::<String>), "null");
        assert_eq!(f.format("Sign in"), "\"Sign in\"");
        assert_eq!(f.format(&42), "42");
        assert_eq!(f.format(&vec![1, 2]), "< 1, 2 >");
        assert_eq!(f.format(&Vec::<i32>::new()), "<empty>");
        assert_eq!(f.format(&Displayed("point")), "{point}");
    }

    #[test]
    fn test_format_nested_collection() {
        let f = formatter();
        let nested = vec![vec!["a".to_string()], vec![]];
        assert_eq!(f.format(&nested), "< < \"a\" >, <empty> >");
    }

    #[test]
    fn test_configured_texts() {
        let f = ValueFormatter::new(FormatterConfig {
            null_text: "<null>".into(),
            empty_collection_text: "[]".into(),
            collection_separator: "; ".into(),
        });
        assert_eq!(f.format(&None::<i32>), "<null>");
        assert_eq!(f.format(&Vec::<i32>::new()), "[]");
        assert_eq!(f.format(&[1, 2][..]), "< 1; 2 >");
        assert_eq!(f.quote_arg(&None::<i32>), "\"<null>\"");
    }

    #[test]
    fn test_quote_arg() {
        let f = formatter();
        assert_eq!(f.quote_arg(&5), "\"5\"");
        assert_eq!(f.quote_arg("abc"), "\"abc\"");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(formatter().format(&date), "2024-03-01");
    }

    #[test]
    fn test_format_with() {
        let args = vec!["\"a\"".to_string(), "\"b\"".to_string()];
        assert_eq!(ValueFormatter::format_with("be in range {0} - {1}", &args), "be in range \"a\" - \"b\"");
        assert_eq!(ValueFormatter::format_with("{1}{0}", &args), "\"b\"\"a\"");
        assert_eq!(ValueFormatter::format_with("keep {2} and {x}", &args), "keep {2} and {x}");
        assert_eq!(ValueFormatter::format_with("no args", &[]), "no args");
    }
}
