//! UI components and page objects.
//!
//! ## Key Components
//!
//! - [`ComponentSpec`]: declaration of a component (name, type, locator,
//!   property-level triggers)
//! - [`Component`]: a node in the tree, owning its [`TriggerCatalog`](crate::triggers::TriggerCatalog)
//! - [`ComponentTree`]: arena of components with the access operations
//!   that fire lifecycle events
//! - [`PageObject`]: a tree root bound to an [`Environment`](crate::core::Environment)

mod component;
mod page;
mod tree;

pub use component::{Component, ComponentId, ComponentSpec};
pub use page::PageObject;
pub use tree::ComponentTree;
