//! Page objects: a component tree root bound to a session.

use crate::core::{Environment, Result, TriggerEvent};
use crate::metadata::MetadataBinder;
use crate::verification::{ContentProvider, ExistenceProvider, Should};

use super::component::{ComponentId, ComponentSpec};
use super::tree::ComponentTree;

/// A page and its components, plus the session they run against.
///
/// `init` and `deinit` drive the page lifecycle; everything else forwards
/// to the [`ComponentTree`] with the page's environment.
#[derive(Debug)]
pub struct PageObject {
    tree: ComponentTree,
    env: Environment,
    root: ComponentId,
}

impl PageObject {
    /// Create a page with an empty tree.
    pub fn new(spec: ComponentSpec, env: Environment) -> Self {
        let mut tree = ComponentTree::new();
        let root = tree.add_root(spec);
        Self { tree, env, root }
    }

    /// Wrap an existing tree. `root` must be one of its roots.
    pub fn from_tree(tree: ComponentTree, root: ComponentId, env: Environment) -> Result<Self> {
        tree.get(root)?;
        Ok(Self { tree, env, root })
    }

    #[must_use]
    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[must_use]
    pub fn root(&self) -> ComponentId {
        self.root
    }

    /// Add a component under `parent`.
    pub fn add(&mut self, parent: ComponentId, spec: ComponentSpec) -> Result<ComponentId> {
        self.tree.add_child(parent, spec)
    }

    /// Bind metadata to every component of the page.
    pub fn bind(&mut self, binder: &MetadataBinder) -> Result<()> {
        binder.bind_tree(&mut self.tree, self.root)
    }

    /// Initialize the page: `Init` on every component, parents first, then
    /// `OnPageObjectInit` on the page.
    pub fn init(&mut self) -> Result<()> {
        self.in_section("Init", |page| {
            page.execute(page.root, TriggerEvent::Init)?;
            page.execute(page.root, TriggerEvent::OnPageObjectInit)
        })
    }

    /// Leave the page: `OnPageObjectLeave` on the page, then `DeInit` on
    /// every component, parents first.
    pub fn deinit(&mut self) -> Result<()> {
        self.in_section("DeInit", |page| {
            page.execute(page.root, TriggerEvent::OnPageObjectLeave)?;
            page.execute(page.root, TriggerEvent::DeInit)
        })
    }

    fn in_section<T>(&mut self, action: &str, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let log = self.env.log_handle();
        log.start_section(&format!("{action} {}", self.tree.full_name(self.root)));
        let outcome = f(self);
        log.end_section();
        outcome
    }

    /// Fire `event` on a component.
    pub fn execute(&mut self, id: ComponentId, event: TriggerEvent) -> Result<()> {
        self.tree.execute(&self.env, id, event)
    }

    /// Read a component's text.
    pub fn content(&mut self, id: ComponentId) -> Result<String> {
        self.tree.content(&self.env, id)
    }

    /// Click a component.
    pub fn click(&mut self, id: ComponentId) -> Result<()> {
        let log = self.env.log_handle();
        log.start_section(&format!("Click {}", self.tree.full_name(id)));
        let outcome = self.tree.click(&self.env, id);
        log.end_section();
        outcome
    }

    /// Replace a component's value.
    pub fn set(&mut self, id: ComponentId, value: &str) -> Result<()> {
        let log = self.env.log_handle();
        log.start_section(&format!("Set \"{value}\" to {}", self.tree.full_name(id)));
        let outcome = self.tree.set(&self.env, id, value);
        log.end_section();
        outcome
    }

    pub fn exists(&self, id: ComponentId) -> Result<bool> {
        self.tree.exists(&self.env, id)
    }

    pub fn missing(&self, id: ComponentId) -> Result<bool> {
        self.tree.missing(&self.env, id)
    }

    /// Verify a component's content.
    pub fn verify_content(&mut self, id: ComponentId) -> Should<ContentProvider<'_>> {
        Should::new(ContentProvider::new(&mut self.tree, &self.env, id), &self.env)
    }

    /// Verify a component's presence.
    pub fn verify_presence(&mut self, id: ComponentId) -> Should<ExistenceProvider<'_>> {
        Should::new(ExistenceProvider::new(&mut self.tree, &self.env, id), &self.env)
    }
}
