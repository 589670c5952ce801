//! Turning declarations into triggers.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::core::{EngineConfig, EngineError, Result};
use crate::triggers::{LogInfo, Trigger, TriggerAction, VerifyContent, VerifyPresence};

use super::declaration::{DeclaredBehavior, TriggerDeclaration};

/// Builds the behaviour of a custom declared trigger.
pub type ActionConstructor = Rc<dyn Fn(&TriggerDeclaration) -> Rc<dyn TriggerAction>>;

/// Creates [`Trigger`]s from [`TriggerDeclaration`]s.
///
/// Built-in behaviours are always available; custom ones must be
/// registered by name first.
#[derive(Clone)]
pub struct TriggerFactory {
    custom: FxHashMap<String, ActionConstructor>,
    default_priority: i32,
}

impl TriggerFactory {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            custom: FxHashMap::default(),
            default_priority: config.default_priority,
        }
    }

    /// Register a constructor for `DeclaredBehavior::Custom { name, .. }`.
    pub fn register_custom<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&TriggerDeclaration) -> Rc<dyn TriggerAction> + 'static,
    {
        self.custom.insert(name.into(), Rc::new(constructor));
    }

    #[must_use]
    pub fn has_custom(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Build a trigger.
    pub fn build(&self, declaration: &TriggerDeclaration) -> Result<Trigger> {
        let on = declaration.on.clone();
        let trigger = match &declaration.behavior {
            DeclaredBehavior::VerifyContent { matching, values } => {
                VerifyContent::new(*matching, values.iter().cloned())
                    .into_trigger()
                    .with_events(on)
            }
            DeclaredBehavior::VerifyExists => VerifyPresence::exists().into_trigger(on),
            DeclaredBehavior::VerifyMissing => VerifyPresence::missing().into_trigger(on),
            DeclaredBehavior::LogInfo { message } => LogInfo::new(message.as_str()).into_trigger(on),
            DeclaredBehavior::Custom { name, .. } => {
                let constructor = self
                    .custom
                    .get(name)
                    .ok_or_else(|| EngineError::UnregisteredTriggerKind(name.clone()))?;
                Trigger::from_action(declaration.behavior.kind(), on, constructor(declaration))
            }
        };

        Ok(trigger
            .with_priority(declaration.priority.unwrap_or(self.default_priority))
            .with_scope(declaration.scope))
    }

    /// Build every declaration, stopping at the first failure.
    pub fn build_all<'a>(
        &self,
        declarations: impl IntoIterator<Item = &'a TriggerDeclaration>,
    ) -> Result<Vec<Trigger>> {
        declarations.into_iter().map(|d| self.build(d)).collect()
    }
}

impl std::fmt::Debug for TriggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.custom.keys().collect();
        names.sort();
        f.debug_struct("TriggerFactory")
            .field("custom", &names)
            .field("default_priority", &self.default_priority)
            .finish()
    }
}
