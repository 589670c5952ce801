//! Component nodes.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{ElementHandle, Locator};
use crate::metadata::{ComponentTypeId, TriggerDeclaration};
use crate::triggers::TriggerCatalog;

/// Index of a component in its [`ComponentTree`](super::ComponentTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Declaration of a component before it joins a tree.
///
/// `property_triggers` are the triggers declared on the property that
/// references the component; the binder files them as `ParentDeclared`.
/// With `cache_scope` set, the located element is reused by later accesses
/// until a presence check resolves it again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub type_id: ComponentTypeId,
    #[serde(default)]
    pub locator: Option<Locator>,
    #[serde(default)]
    pub property_triggers: Vec<TriggerDeclaration>,
    #[serde(default)]
    pub cache_scope: bool,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>, type_id: ComponentTypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            locator: None,
            property_triggers: Vec::new(),
            cache_scope: false,
        }
    }

    /// Set the locator (builder pattern).
    #[must_use]
    pub fn located_by(mut self, locator: Locator) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Reuse the located element across accesses (builder pattern).
    #[must_use]
    pub fn cached(mut self) -> Self {
        self.cache_scope = true;
        self
    }

    /// Add a property-level trigger declaration (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, declaration: TriggerDeclaration) -> Self {
        self.property_triggers.push(declaration);
        self
    }
}

/// A UI component in a tree.
///
/// The tree owns every node. `parent` and `owner` are keys into the same
/// tree; `owner` is the page object at the root of the component's tree.
#[derive(Debug)]
pub struct Component {
    id: ComponentId,
    name: String,
    type_id: ComponentTypeId,
    locator: Option<Locator>,
    property_triggers: Vec<TriggerDeclaration>,
    parent: Option<ComponentId>,
    owner: ComponentId,
    children: Vec<ComponentId>,
    triggers: TriggerCatalog,
    scope_cache: Option<Rc<RefCell<Option<ElementHandle>>>>,
}

impl Component {
    pub(crate) fn new(
        id: ComponentId,
        spec: ComponentSpec,
        parent: Option<ComponentId>,
        owner: ComponentId,
    ) -> Self {
        Self {
            id,
            name: spec.name,
            type_id: spec.type_id,
            locator: spec.locator,
            property_triggers: spec.property_triggers,
            parent,
            owner,
            children: Vec::new(),
            triggers: TriggerCatalog::new(),
            scope_cache: spec.cache_scope.then(Rc::default),
        }
    }

    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn type_id(&self) -> ComponentTypeId {
        self.type_id
    }

    #[must_use]
    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    #[must_use]
    pub fn caches_scope(&self) -> bool {
        self.scope_cache.is_some()
    }

    /// The element remembered by the last lookup, if caching is on.
    #[must_use]
    pub fn cached_scope(&self) -> Option<ElementHandle> {
        self.scope_cache.as_ref().and_then(|cache| cache.borrow().clone())
    }

    pub(crate) fn scope_cache(&self) -> Option<Rc<RefCell<Option<ElementHandle>>>> {
        self.scope_cache.clone()
    }

    #[must_use]
    pub fn property_triggers(&self) -> &[TriggerDeclaration] {
        &self.property_triggers
    }

    #[must_use]
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    #[must_use]
    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    /// Children in declared order.
    #[must_use]
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: ComponentId) {
        self.children.push(child);
    }

    #[must_use]
    pub fn triggers(&self) -> &TriggerCatalog {
        &self.triggers
    }

    pub fn triggers_mut(&mut self) -> &mut TriggerCatalog {
        &mut self.triggers
    }

    /// Name for messages: `"Save" button` once metadata is bound,
    /// `"Save"` before.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.triggers.metadata() {
            Some(metadata) => format!("\"{}\" {}", self.name, metadata.type_name),
            None => format!("\"{}\"", self.name),
        }
    }
}
