//! Trigger definitions.
//!
//! A trigger couples a behaviour ([`TriggerAction`]) with the data the
//! engine orders and filters on: kind, event mask, priority, scope and
//! provenance.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{EventMask, Result, TriggerEvent};
use crate::metadata::ComponentMetadata;

use super::context::TriggerContext;

/// Named priority levels. Lower values run first.
pub struct TriggerPriority;

impl TriggerPriority {
    pub const HIGHEST: i32 = 0;
    pub const HIGHER: i32 = 1;
    pub const HIGH: i32 = 2;
    pub const MEDIUM: i32 = 3;
    pub const LOW: i32 = 4;
    pub const LOWER: i32 = 5;
    pub const LOWEST: i32 = 6;
}

/// Which components a trigger applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriggerScope {
    /// Only the component it is declared on.
    #[default]
    SelfOnly,
    /// The descendants of the component it is declared on.
    Cascade,
}

/// Where a trigger came from. Decided by the catalog, not by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerProvenance {
    /// Declared on the component's own type, or added before metadata
    /// binding.
    SelfDeclared,
    /// Declared on the property that references the component, or
    /// cascaded from an ancestor.
    ParentDeclared,
    /// Declared process-wide.
    Assembly,
    /// Added at runtime after metadata binding.
    InstanceDeclared,
}

/// Concrete kind of a trigger. Together with the event mask it forms the
/// deduplication key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    VerifyContent,
    VerifyExists,
    VerifyMissing,
    LogInfo,
    Custom(String),
}

impl TriggerKind {
    /// Create a custom kind.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            TriggerKind::VerifyContent => "VerifyContent",
            TriggerKind::VerifyExists => "VerifyExists",
            TriggerKind::VerifyMissing => "VerifyMissing",
            TriggerKind::LogInfo => "LogInfo",
            TriggerKind::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Behaviour run when a trigger fires.
///
/// Closures of the right shape implement this trait, so ad-hoc triggers
/// don't need a dedicated type.
pub trait TriggerAction {
    /// Run the behaviour.
    fn execute(&self, ctx: &mut TriggerContext<'_>) -> Result<()>;

    /// Capture configuration from the component's metadata. Called once,
    /// when metadata is bound (or when the trigger is added afterwards).
    fn apply_metadata(&self, _metadata: &ComponentMetadata) {}
}

impl<F> TriggerAction for F
where
    F: Fn(&mut TriggerContext<'_>) -> Result<()>,
{
    fn execute(&self, ctx: &mut TriggerContext<'_>) -> Result<()> {
        self(ctx)
    }
}

/// A trigger attached to a component.
///
/// Triggers are shared with `Rc` between the catalog's provenance lists
/// and the ordered snapshot, so the few fields the engine updates after
/// construction use interior mutability.
pub struct Trigger {
    kind: TriggerKind,
    on: EventMask,
    priority: i32,
    scope: TriggerScope,
    provenance: Option<TriggerProvenance>,
    action: Rc<dyn TriggerAction>,

    /// Set by the orderer for `SelfDeclared` triggers. Display only.
    component_level: Cell<bool>,

    metadata: RefCell<Option<Rc<ComponentMetadata>>>,
}

impl Trigger {
    /// Create a trigger with medium priority and `SelfOnly` scope.
    pub fn new(
        kind: TriggerKind,
        on: impl Into<EventMask>,
        action: impl TriggerAction + 'static,
    ) -> Self {
        Self::from_action(kind, on, Rc::new(action))
    }

    /// Create a trigger around a shared behaviour.
    pub fn from_action(
        kind: TriggerKind,
        on: impl Into<EventMask>,
        action: Rc<dyn TriggerAction>,
    ) -> Self {
        Self {
            kind,
            on: on.into(),
            priority: TriggerPriority::MEDIUM,
            scope: TriggerScope::default(),
            provenance: None,
            action,
            component_level: Cell::new(false),
            metadata: RefCell::new(None),
        }
    }

    /// Create a custom-kind trigger from a closure.
    ///
    /// ```
    /// use rust_pom::core::TriggerEvent;
    /// use rust_pom::triggers::{Trigger, TriggerKind};
    ///
    /// let trigger = Trigger::from_fn("Highlight", TriggerEvent::BeforeClick, |ctx| {
    ///     ctx.log().info("highlighting");
    ///     Ok(())
    /// })
    /// .with_priority(1);
    ///
    /// assert_eq!(trigger.kind(), &TriggerKind::custom("Highlight"));
    /// assert!(trigger.applies_to(rust_pom::core::TriggerEvent::BeforeClick));
    /// ```
    pub fn from_fn<F>(name: impl Into<String>, on: impl Into<EventMask>, f: F) -> Self
    where
        F: Fn(&mut TriggerContext<'_>) -> Result<()> + 'static,
    {
        Self::new(TriggerKind::Custom(name.into()), on, f)
    }

    /// Set priority (builder pattern). Lower priority fires first.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set scope (builder pattern).
    #[must_use]
    pub fn with_scope(mut self, scope: TriggerScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replace the event mask (builder pattern).
    #[must_use]
    pub fn with_events(mut self, on: impl Into<EventMask>) -> Self {
        self.on = on.into();
        self
    }

    pub(crate) fn with_provenance(mut self, provenance: TriggerProvenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &TriggerKind {
        &self.kind
    }

    #[must_use]
    pub fn on(&self) -> &EventMask {
        &self.on
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub fn scope(&self) -> TriggerScope {
        self.scope
    }

    /// Provenance, once the trigger has been added to a catalog.
    #[must_use]
    pub fn provenance(&self) -> Option<TriggerProvenance> {
        self.provenance
    }

    /// Whether the orderer resolved this trigger as declared at the
    /// component's own level.
    #[must_use]
    pub fn is_defined_at_component_level(&self) -> bool {
        self.component_level.get()
    }

    pub(crate) fn mark_component_level(&self) {
        self.component_level.set(true);
    }

    /// Check if the trigger fires on `event`.
    #[must_use]
    pub fn applies_to(&self, event: TriggerEvent) -> bool {
        self.on.contains(event)
    }

    /// Check if two triggers shadow each other during deduplication.
    #[must_use]
    pub fn is_same_kind_and_mask(&self, other: &Trigger) -> bool {
        self.kind == other.kind && self.on == other.on
    }

    /// Metadata captured when the component was bound.
    #[must_use]
    pub fn metadata(&self) -> Option<Rc<ComponentMetadata>> {
        self.metadata.borrow().clone()
    }

    pub(crate) fn apply_metadata(&self, metadata: &Rc<ComponentMetadata>) {
        *self.metadata.borrow_mut() = Some(Rc::clone(metadata));
        self.action.apply_metadata(metadata);
    }

    /// Run the behaviour.
    pub fn fire(&self, ctx: &mut TriggerContext<'_>) -> Result<()> {
        self.action.execute(ctx)
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("kind", &self.kind)
            .field("on", &self.on)
            .field("priority", &self.priority)
            .field("scope", &self.scope)
            .field("provenance", &self.provenance)
            .field("component_level", &self.component_level.get())
            .finish_non_exhaustive()
    }
}
