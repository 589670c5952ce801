//! Data providers for component values.

use crate::components::{ComponentId, ComponentTree};
use crate::core::{Environment, Result};

use super::format::ToValueRepr;
use super::should::DataProvider;

/// A component's text content. Reading it fires the component's get and
/// access events.
pub struct ContentProvider<'a> {
    tree: &'a mut ComponentTree,
    env: &'a Environment,
    id: ComponentId,
}

impl<'a> ContentProvider<'a> {
    pub fn new(tree: &'a mut ComponentTree, env: &'a Environment, id: ComponentId) -> Self {
        Self { tree, env, id }
    }
}

impl DataProvider for ContentProvider<'_> {
    type Value = String;

    fn component_full_name(&self) -> String {
        self.tree.full_name(self.id)
    }

    fn provider_name(&self) -> &str {
        "content"
    }

    fn get(&mut self) -> Result<String> {
        self.tree.content(self.env, self.id)
    }
}

/// Whether a component's element is present. Fires no events.
pub struct ExistenceProvider<'a> {
    tree: &'a ComponentTree,
    env: &'a Environment,
    id: ComponentId,
}

impl<'a> ExistenceProvider<'a> {
    pub fn new(tree: &'a ComponentTree, env: &'a Environment, id: ComponentId) -> Self {
        Self { tree, env, id }
    }
}

impl DataProvider for ExistenceProvider<'_> {
    type Value = bool;

    fn component_full_name(&self) -> String {
        self.tree.full_name(self.id)
    }

    fn provider_name(&self) -> &str {
        "presence"
    }

    fn get(&mut self) -> Result<bool> {
        self.tree.exists(self.env, self.id)
    }
}

/// A fixed value, for verifying data that doesn't come from the page.
#[derive(Clone, Debug)]
pub struct ValueProvider<T> {
    component: String,
    name: String,
    value: T,
}

impl<T> ValueProvider<T> {
    pub fn new(component: impl Into<String>, name: impl Into<String>, value: T) -> Self {
        Self {
            component: component.into(),
            name: name.into(),
            value,
        }
    }
}

impl<T: ToValueRepr + Clone> DataProvider for ValueProvider<T> {
    type Value = T;

    fn component_full_name(&self) -> String {
        self.component.clone()
    }

    fn provider_name(&self) -> &str {
        &self.name
    }

    fn get(&mut self) -> Result<T> {
        Ok(self.value.clone())
    }
}
