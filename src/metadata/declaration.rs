//! Trigger declarations: triggers described as data.

use serde::{Deserialize, Serialize};

use crate::core::EventMask;
use crate::triggers::{TermMatch, TriggerKind, TriggerScope};

/// Behaviour of a declared trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeclaredBehavior {
    VerifyContent {
        #[serde(default)]
        matching: TermMatch,
        values: Vec<String>,
    },
    VerifyExists,
    VerifyMissing,
    LogInfo {
        message: String,
    },
    /// A behaviour registered with the [`TriggerFactory`](super::TriggerFactory)
    /// under `name`.
    Custom {
        name: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl DeclaredBehavior {
    /// The kind of trigger this behaviour produces.
    #[must_use]
    pub fn kind(&self) -> TriggerKind {
        match self {
            DeclaredBehavior::VerifyContent { .. } => TriggerKind::VerifyContent,
            DeclaredBehavior::VerifyExists => TriggerKind::VerifyExists,
            DeclaredBehavior::VerifyMissing => TriggerKind::VerifyMissing,
            DeclaredBehavior::LogInfo { .. } => TriggerKind::LogInfo,
            DeclaredBehavior::Custom { name, .. } => TriggerKind::custom(name.as_str()),
        }
    }
}

/// A trigger declared on a component type, a property, or assembly-wide.
///
/// A declaration without a priority takes the configured default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDeclaration {
    pub behavior: DeclaredBehavior,
    pub on: EventMask,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub scope: TriggerScope,
}

impl TriggerDeclaration {
    pub fn new(behavior: DeclaredBehavior, on: impl Into<EventMask>) -> Self {
        Self {
            behavior,
            on: on.into(),
            priority: None,
            scope: TriggerScope::default(),
        }
    }

    /// Set priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set scope (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, scope: TriggerScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn cascades(&self) -> bool {
        self.scope == TriggerScope::Cascade
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TriggerEvent;

    #[test]
    fn test_declaration_from_json() {
        let declaration: TriggerDeclaration = serde_json::from_str(
            r#"{
                "behavior": { "type": "VerifyContent", "values": ["Welcome"] },
                "on": ["OnPageObjectInit"],
                "priority": 1
            }"#,
        )
        .unwrap();

        assert_eq!(declaration.behavior.kind(), TriggerKind::VerifyContent);
        assert_eq!(declaration.on, EventMask::from(TriggerEvent::OnPageObjectInit));
        assert_eq!(declaration.priority, Some(1));
        assert_eq!(declaration.scope, TriggerScope::SelfOnly);
        assert!(matches!(
            declaration.behavior,
            DeclaredBehavior::VerifyContent { matching: TermMatch::Contains, .. }
        ));
    }

    #[test]
    fn test_custom_kind() {
        let behavior = DeclaredBehavior::Custom {
            name: "WaitForScript".into(),
            args: Vec::new(),
        };
        assert_eq!(behavior.kind(), TriggerKind::custom("WaitForScript"));
    }

    #[test]
    fn test_cascades() {
        let declaration = TriggerDeclaration::new(DeclaredBehavior::VerifyExists, TriggerEvent::Init)
            .with_scope(TriggerScope::Cascade);
        assert!(declaration.cascades());
    }
}
