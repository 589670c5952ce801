//! Arena-based component tree.
//!
//! Components live in a flat `Vec<Component>` and refer to each other by
//! [`ComponentId`] index. The tree owns every node; parent and owner links
//! are plain keys, so there are no reference cycles to manage.

use std::rc::Rc;

use crate::core::{ElementHandle, EngineError, Environment, Locator, Result, ScopeFinder, TriggerEvent};
use crate::triggers::TriggerDispatcher;

use super::component::{Component, ComponentId, ComponentSpec};

/// A forest of component trees, each rooted at a page object.
#[derive(Debug, Default)]
pub struct ComponentTree {
    nodes: Vec<Component>,
    roots: Vec<ComponentId>,
}

impl ComponentTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root component (a page object). It owns itself.
    pub fn add_root(&mut self, spec: ComponentSpec) -> ComponentId {
        let id = self.next_id();
        self.nodes.push(Component::new(id, spec, None, id));
        self.roots.push(id);
        id
    }

    /// Add a component as the last child of `parent`.
    pub fn add_child(&mut self, parent: ComponentId, spec: ComponentSpec) -> Result<ComponentId> {
        let owner = self.get(parent)?.owner();
        let id = self.next_id();
        self.nodes.push(Component::new(id, spec, Some(parent), owner));
        self.get_mut(parent)?.push_child(id);
        Ok(id)
    }

    fn next_id(&self) -> ComponentId {
        ComponentId::new(self.nodes.len() as u32)
    }

    /// Get a component.
    pub fn get(&self, id: ComponentId) -> Result<&Component> {
        self.nodes
            .get(id.index())
            .ok_or(EngineError::UnknownComponent(id))
    }

    /// Get a component mutably.
    pub fn get_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.nodes
            .get_mut(id.index())
            .ok_or(EngineError::UnknownComponent(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root components, in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    /// Children of a component, in declared order.
    pub fn children(&self, id: ComponentId) -> Result<&[ComponentId]> {
        Ok(self.get(id)?.children())
    }

    /// Ancestors of a component, nearest first.
    pub fn ancestors(&self, id: ComponentId) -> Result<Vec<ComponentId>> {
        let mut ancestors = Vec::new();
        let mut current = self.get(id)?.parent();
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.get(parent)?.parent();
        }
        Ok(ancestors)
    }

    /// A component and all its descendants, parent first, depth first.
    pub fn depth_first(&self, id: ComponentId) -> Result<Vec<ComponentId>> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.get(next)?.children().iter().rev());
        }
        Ok(order)
    }

    /// Display name, or the id if the component is unknown.
    #[must_use]
    pub fn full_name(&self, id: ComponentId) -> String {
        self.get(id)
            .map(Component::full_name)
            .unwrap_or_else(|_| id.to_string())
    }

    /// Locators from the outermost located ancestor down to the component.
    ///
    /// Ancestors without a locator (pages, logical groups) are skipped.
    /// Fails with `ElementFinderMissing` if the component has no locator.
    pub fn locator_chain(&self, id: ComponentId) -> Result<Vec<Locator>> {
        let component = self.get(id)?;
        let Some(own) = component.locator() else {
            return Err(EngineError::ElementFinderMissing {
                component: component.full_name(),
            });
        };

        let mut chain = vec![own.clone()];
        for ancestor in self.ancestors(id)? {
            if let Some(locator) = self.get(ancestor)?.locator() {
                chain.push(locator.clone());
            }
        }
        chain.reverse();
        Ok(chain)
    }

    /// Build a scope finder for a component.
    ///
    /// The finder resolves the locator chain through the driver each time
    /// it is called. For a caching component it also records the outcome,
    /// including an absent element found with `fail_silently`.
    pub fn scope_finder(&self, env: &Environment, id: ComponentId) -> Result<ScopeFinder> {
        let chain = self.locator_chain(id)?;
        let name = self.full_name(id);
        let driver = env.driver_handle();
        let cache = self.get(id)?.scope_cache();

        Ok(Rc::new(move |fail_silently: bool| {
            let mut scope: Option<ElementHandle> = None;
            for locator in &chain {
                match driver.find_element(scope.as_ref(), locator)? {
                    Some(found) => scope = Some(found),
                    None if fail_silently => {
                        scope = None;
                        break;
                    }
                    None => {
                        return Err(EngineError::NoSuchElement {
                            component: name.clone(),
                        })
                    }
                }
            }
            if let Some(cache) = &cache {
                *cache.borrow_mut() = scope.clone();
            }
            Ok(scope)
        }))
    }

    /// Locate a component's element without firing any events.
    pub fn scope_element(
        &self,
        env: &Environment,
        id: ComponentId,
        fail_silently: bool,
    ) -> Result<Option<ElementHandle>> {
        let finder = self.scope_finder(env, id)?;
        finder(fail_silently)
    }

    /// Check if a component's element is present. Fires no events.
    pub fn exists(&self, env: &Environment, id: ComponentId) -> Result<bool> {
        Ok(self.scope_element(env, id, true)?.is_some())
    }

    /// Check if a component's element is absent. Fires no events.
    pub fn missing(&self, env: &Environment, id: ComponentId) -> Result<bool> {
        Ok(!self.exists(env, id)?)
    }

    /// Fire `event` on a component.
    pub fn execute(&mut self, env: &Environment, id: ComponentId, event: TriggerEvent) -> Result<()> {
        TriggerDispatcher::execute(self, env, id, event)
    }

    /// Locate a component's element, wrapped in `BeforeAccess`/`AfterAccess`.
    pub fn access(&mut self, env: &Environment, id: ComponentId) -> Result<ElementHandle> {
        self.execute(env, id, TriggerEvent::BeforeAccess)?;
        let element = match self.get(id)?.cached_scope() {
            Some(cached) => cached,
            None => self.scope_element(env, id, false)?.ok_or_else(|| {
                EngineError::NoSuchElement {
                    component: self.full_name(id),
                }
            })?,
        };
        self.execute(env, id, TriggerEvent::AfterAccess)?;
        Ok(element)
    }

    /// Read a component's text, wrapped in `BeforeGet`/`AfterGet`.
    pub fn content(&mut self, env: &Environment, id: ComponentId) -> Result<String> {
        self.execute(env, id, TriggerEvent::BeforeGet)?;
        let element = self.access(env, id)?;
        let text = env.driver().element_text(&element)?;
        self.execute(env, id, TriggerEvent::AfterGet)?;
        Ok(text)
    }

    /// Click a component, wrapped in `BeforeClick`/`AfterClick`.
    pub fn click(&mut self, env: &Environment, id: ComponentId) -> Result<()> {
        self.execute(env, id, TriggerEvent::BeforeClick)?;
        let element = self.access(env, id)?;
        env.driver().click(&element)?;
        self.execute(env, id, TriggerEvent::AfterClick)
    }

    /// Replace a component's value, wrapped in `BeforeSet`/`AfterSet`.
    pub fn set(&mut self, env: &Environment, id: ComponentId, value: &str) -> Result<()> {
        self.execute(env, id, TriggerEvent::BeforeSet)?;
        let element = self.access(env, id)?;
        env.driver().clear(&element)?;
        env.driver().send_keys(&element, value)?;
        self.execute(env, id, TriggerEvent::AfterSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ComponentTypeId;
    use crate::testing::{MemoryDriver, MemoryLog};

    const PAGE: ComponentTypeId = ComponentTypeId::new(0);
    const FIELD: ComponentTypeId = ComponentTypeId::new(1);

    fn env(driver: MemoryDriver) -> Environment {
        Environment::new(Rc::new(driver), Rc::new(MemoryLog::new()))
    }

    fn form_tree() -> (ComponentTree, ComponentId, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Login", PAGE));
        let form = tree
            .add_child(page, ComponentSpec::new("Form", FIELD).located_by(Locator::css("form")))
            .unwrap();
        let email = tree
            .add_child(form, ComponentSpec::new("Email", FIELD).located_by(Locator::id("email")))
            .unwrap();
        (tree, page, form, email)
    }

    #[test]
    fn test_links() {
        let (tree, page, form, email) = form_tree();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), &[page]);
        assert_eq!(tree.get(email).unwrap().parent(), Some(form));
        assert_eq!(tree.get(email).unwrap().owner(), page);
        assert_eq!(tree.children(page).unwrap(), &[form]);
        assert_eq!(tree.ancestors(email).unwrap(), vec![form, page]);
    }

    #[test]
    fn test_depth_first_is_parent_first_in_declared_order() {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Page", PAGE));
        let a = tree.add_child(page, ComponentSpec::new("A", FIELD)).unwrap();
        let a1 = tree.add_child(a, ComponentSpec::new("A1", FIELD)).unwrap();
        let b = tree.add_child(page, ComponentSpec::new("B", FIELD)).unwrap();

        assert_eq!(tree.depth_first(page).unwrap(), vec![page, a, a1, b]);
    }

    #[test]
    fn test_unknown_component() {
        let (mut tree, page, _, _) = form_tree();
        assert!(matches!(
            tree.add_child(ComponentId::new(42), ComponentSpec::new("X", FIELD)),
            Err(EngineError::UnknownComponent(_))
        ));
        assert_eq!(tree.full_name(ComponentId::new(42)), "Component(42)");
        assert!(tree.get(page).is_ok());
    }

    #[test]
    fn test_locator_chain_skips_unlocated_ancestors() {
        let (tree, page, _, email) = form_tree();

        assert_eq!(
            tree.locator_chain(email).unwrap(),
            vec![Locator::css("form"), Locator::id("email")]
        );
        assert!(matches!(
            tree.locator_chain(page),
            Err(EngineError::ElementFinderMissing { .. })
        ));
    }

    #[test]
    fn test_scope_finder_fail_silently() {
        let (tree, _, _, email) = form_tree();
        let env = env(MemoryDriver::new().with_element(&[Locator::css("form")], ""));

        let finder = tree.scope_finder(&env, email).unwrap();
        assert_eq!(finder(true).unwrap(), None);
        assert!(matches!(finder(false), Err(EngineError::NoSuchElement { .. })));
        assert!(tree.missing(&env, email).unwrap());
    }

    #[test]
    fn test_cached_scope_is_reused_until_rechecked() {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Login", PAGE));
        let save = tree
            .add_child(page, ComponentSpec::new("Save", FIELD).located_by(Locator::id("save")).cached())
            .unwrap();
        let driver = Rc::new(MemoryDriver::new().with_element(&[Locator::id("save")], "Save"));
        let env = Environment::new(driver.clone(), Rc::new(MemoryLog::new()));

        assert!(tree.get(save).unwrap().caches_scope());
        assert_eq!(tree.content(&env, save).unwrap(), "Save");
        assert_eq!(tree.get(save).unwrap().cached_scope(), Some(ElementHandle::new("id=save")));

        // The stale handle is used as is, so the driver reports it.
        driver.remove_element(&[Locator::id("save")]);
        assert!(matches!(tree.click(&env, save), Err(EngineError::Driver { .. })));

        // A presence check looks the element up again.
        assert!(tree.missing(&env, save).unwrap());
        assert_eq!(tree.get(save).unwrap().cached_scope(), None);
        assert!(matches!(tree.click(&env, save), Err(EngineError::NoSuchElement { .. })));
    }

    #[test]
    fn test_content_click_and_set() {
        let (mut tree, _, _, email) = form_tree();
        let driver = Rc::new(
            MemoryDriver::new().with_element(&[Locator::css("form"), Locator::id("email")], "old"),
        );
        let env = Environment::new(driver.clone(), Rc::new(MemoryLog::new()));

        assert!(tree.exists(&env, email).unwrap());
        assert_eq!(tree.content(&env, email).unwrap(), "old");

        tree.set(&env, email, "new@example.com").unwrap();
        assert_eq!(tree.content(&env, email).unwrap(), "new@example.com");

        tree.click(&env, email).unwrap();
        assert_eq!(
            driver.actions().last().map(String::as_str),
            Some("click css=form > id=email")
        );
    }
}
