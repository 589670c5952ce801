//! Context handed to a firing trigger.

use std::rc::Rc;

use crate::components::{ComponentId, ComponentTree};
use crate::core::{
    BrowserDriver, EngineConfig, Environment, LogManager, Result, ScopeFinder, TriggerEvent,
};
use crate::metadata::ComponentMetadata;
use crate::verification::{ContentProvider, ExistenceProvider, Should};

/// What a trigger sees while it runs.
///
/// One context is built per dispatch and shared by every trigger in the
/// batch. It borrows the whole component tree mutably so that a trigger
/// can read values or fire events on any component; access events on the
/// firing component are suppressed while they are being dispatched.
pub struct TriggerContext<'a> {
    event: TriggerEvent,
    component: ComponentId,
    parent: Option<ComponentId>,
    tree: &'a mut ComponentTree,
    env: &'a Environment,
}

impl<'a> TriggerContext<'a> {
    pub(crate) fn new(
        event: TriggerEvent,
        component: ComponentId,
        parent: Option<ComponentId>,
        tree: &'a mut ComponentTree,
        env: &'a Environment,
    ) -> Self {
        Self {
            event,
            component,
            parent,
            tree,
            env,
        }
    }

    /// The event being dispatched.
    #[must_use]
    pub fn event(&self) -> TriggerEvent {
        self.event
    }

    /// The component whose triggers are firing.
    #[must_use]
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// The firing component's parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    #[must_use]
    pub fn env(&self) -> &Environment {
        self.env
    }

    #[must_use]
    pub fn driver(&self) -> &dyn BrowserDriver {
        self.env.driver()
    }

    #[must_use]
    pub fn log(&self) -> &dyn LogManager {
        self.env.log()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.env.config()
    }

    #[must_use]
    pub fn tree(&self) -> &ComponentTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut *self.tree
    }

    /// Display name of the firing component, e.g. `"Save" button`.
    #[must_use]
    pub fn component_name(&self) -> String {
        self.tree.full_name(self.component)
    }

    /// Metadata bound to the firing component.
    #[must_use]
    pub fn metadata(&self) -> Option<Rc<ComponentMetadata>> {
        self.tree
            .get(self.component)
            .ok()
            .and_then(|c| c.triggers().metadata().cloned())
    }

    /// Scope finder of the firing component.
    ///
    /// Fails with `ElementFinderMissing` if the component has no locator.
    pub fn component_finder(&self) -> Result<ScopeFinder> {
        self.tree.scope_finder(self.env, self.component)
    }

    /// Scope finder of the parent, or `None` if there is no parent or the
    /// parent has no locator of its own (a page).
    pub fn parent_finder(&self) -> Result<Option<ScopeFinder>> {
        let Some(parent) = self.parent else {
            return Ok(None);
        };
        if self.tree.get(parent)?.locator().is_none() {
            return Ok(None);
        }
        self.tree.scope_finder(self.env, parent).map(Some)
    }

    /// Read a component's content, firing its access and get events.
    pub fn content(&mut self, id: ComponentId) -> Result<String> {
        self.tree.content(self.env, id)
    }

    /// Check if a component's element is present. Fires no events.
    pub fn exists(&self, id: ComponentId) -> Result<bool> {
        self.tree.exists(self.env, id)
    }

    /// Dispatch an event on another component.
    pub fn execute(&mut self, id: ComponentId, event: TriggerEvent) -> Result<()> {
        self.tree.execute(self.env, id, event)
    }

    /// Verify the firing component's content.
    pub fn verify_content(&mut self) -> Should<ContentProvider<'_>> {
        let id = self.component;
        self.verify_content_of(id)
    }

    /// Verify a component's content.
    pub fn verify_content_of(&mut self, id: ComponentId) -> Should<ContentProvider<'_>> {
        Should::new(ContentProvider::new(self.tree, self.env, id), self.env)
    }

    /// Verify the firing component's presence.
    pub fn verify_presence(&mut self) -> Should<ExistenceProvider<'_>> {
        Should::new(
            ExistenceProvider::new(self.tree, self.env, self.component),
            self.env,
        )
    }
}
