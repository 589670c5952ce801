//! Built-in trigger behaviours.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::core::{EventMask, Result, TriggerEvent};
use crate::metadata::ComponentMetadata;

use super::context::TriggerContext;
use super::trigger::{Trigger, TriggerAction, TriggerKind};

/// How a term is compared with a component's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TermMatch {
    #[default]
    Contains,
    Equals,
    StartsWith,
    EndsWith,
}

impl TermMatch {
    /// Check `text` against `term`.
    #[must_use]
    pub fn is_match(self, text: &str, term: &str) -> bool {
        match self {
            TermMatch::Contains => text.contains(term),
            TermMatch::Equals => text == term,
            TermMatch::StartsWith => text.starts_with(term),
            TermMatch::EndsWith => text.ends_with(term),
        }
    }

    /// Verb used in verification messages.
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            TermMatch::Contains => "contain",
            TermMatch::Equals => "equal",
            TermMatch::StartsWith => "start with",
            TermMatch::EndsWith => "end with",
        }
    }
}

/// Verifies that the component's content matches every value.
///
/// Fires on `OnPageObjectInit` by default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyContent {
    pub matching: TermMatch,
    pub values: Vec<String>,
}

impl VerifyContent {
    pub fn new(matching: TermMatch, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            matching,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Wrap in a trigger with the default event.
    #[must_use]
    pub fn into_trigger(self) -> Trigger {
        Trigger::new(TriggerKind::VerifyContent, TriggerEvent::OnPageObjectInit, self)
    }
}

impl TriggerAction for VerifyContent {
    fn execute(&self, ctx: &mut TriggerContext<'_>) -> Result<()> {
        let placeholders: Vec<String> = (0..self.values.len()).map(|i| format!("{{{i}}}")).collect();
        let message = format!("{} {}", self.matching.verb(), placeholders.join(", "));
        let matching = self.matching;

        ctx.verify_content().satisfy(
            |actual| self.values.iter().all(|v| matching.is_match(actual, v)),
            &message,
            self.values.as_slice(),
        )?;
        Ok(())
    }
}

/// Verifies that the component is present (or, negated, missing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyPresence {
    pub expect_present: bool,
}

impl VerifyPresence {
    #[must_use]
    pub fn exists() -> Self {
        Self {
            expect_present: true,
        }
    }

    #[must_use]
    pub fn missing() -> Self {
        Self {
            expect_present: false,
        }
    }

    /// Wrap in a trigger firing on `on`.
    #[must_use]
    pub fn into_trigger(self, on: impl Into<EventMask>) -> Trigger {
        let kind = if self.expect_present {
            TriggerKind::VerifyExists
        } else {
            TriggerKind::VerifyMissing
        };
        Trigger::new(kind, on, self)
    }
}

impl TriggerAction for VerifyPresence {
    fn execute(&self, ctx: &mut TriggerContext<'_>) -> Result<()> {
        let expected = self.expect_present;
        let message = if expected { "exist" } else { "be missing" };
        ctx.verify_presence()
            .satisfy(|present| *present == expected, message, &[] as &[&str])?;
        Ok(())
    }
}

/// Writes a message to the test log.
///
/// `{component}` in the message is replaced with the component's name
/// once metadata is bound.
#[derive(Debug)]
pub struct LogInfo {
    message: String,
    resolved: RefCell<Option<String>>,
}

impl LogInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resolved: RefCell::new(None),
        }
    }

    /// Wrap in a trigger firing on `on`.
    #[must_use]
    pub fn into_trigger(self, on: impl Into<EventMask>) -> Trigger {
        Trigger::new(TriggerKind::LogInfo, on, self)
    }

    /// The message as it will be logged.
    #[must_use]
    pub fn message(&self) -> String {
        self.resolved
            .borrow()
            .clone()
            .unwrap_or_else(|| self.message.clone())
    }
}

impl TriggerAction for LogInfo {
    fn execute(&self, ctx: &mut TriggerContext<'_>) -> Result<()> {
        ctx.log().info(&self.message());
        Ok(())
    }

    fn apply_metadata(&self, metadata: &ComponentMetadata) {
        let resolved = self.message.replace("{component}", &metadata.name);
        *self.resolved.borrow_mut() = Some(resolved);
    }
}
