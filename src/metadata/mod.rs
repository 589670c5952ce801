//! Component metadata and declarative triggers.
//!
//! Component types declare their triggers as data. The
//! [`DeclarationRegistry`] keeps those declarations per
//! [`ComponentTypeId`], the [`TriggerFactory`] turns a declaration into a
//! live [`Trigger`](crate::triggers::Trigger), and the [`MetadataBinder`]
//! fills a component's catalog from them and binds its metadata.
//!
//! ## Key Components
//!
//! - [`ComponentMetadata`]: what a bound component looks like to triggers
//! - [`TriggerDeclaration`]: behaviour, event mask, priority, scope
//! - [`ComponentTypeDescriptor`]: a component type and its declarations
//! - [`DeclarationRegistry`]: type-keyed descriptors plus assembly-wide
//!   declarations
//! - [`MetadataBinder`]: populates catalogs, once per component
//!
//! ## Example Usage
//!
//! ```
//! use rust_pom::components::{ComponentSpec, ComponentTree};
//! use rust_pom::core::{EngineConfig, TriggerEvent};
//! use rust_pom::metadata::{
//!     ComponentTypeDescriptor, ComponentTypeId, DeclarationRegistry, DeclaredBehavior,
//!     MetadataBinder, TriggerDeclaration, TriggerFactory,
//! };
//!
//! let button = ComponentTypeId::new(1);
//! let mut registry = DeclarationRegistry::new();
//! registry.register(
//!     ComponentTypeDescriptor::new(button, "button").with_trigger(TriggerDeclaration::new(
//!         DeclaredBehavior::LogInfo { message: "clicking {component}".into() },
//!         TriggerEvent::BeforeClick,
//!     )),
//! );
//!
//! let mut tree = ComponentTree::new();
//! let save = tree.add_root(ComponentSpec::new("Save", button));
//!
//! let binder = MetadataBinder::new(registry, TriggerFactory::new(&EngineConfig::default()));
//! let metadata = binder.bind(&mut tree, save).unwrap();
//!
//! assert_eq!(metadata.type_name, "button");
//! assert_eq!(tree.get(save).unwrap().triggers().self_declared().len(), 1);
//! ```

mod binder;
mod declaration;
mod factory;
mod registry;

use serde::{Deserialize, Serialize};

pub use binder::MetadataBinder;
pub use declaration::{DeclaredBehavior, TriggerDeclaration};
pub use factory::{ActionConstructor, TriggerFactory};
pub use registry::{ComponentTypeDescriptor, DeclarationRegistry};

/// Unique identifier for a component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentTypeId(pub u32);

impl ComponentTypeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentType({})", self.0)
    }
}

/// Metadata bound to a component. Shared by the component's triggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    /// Component name, e.g. `Save`.
    pub name: String,

    pub type_id: ComponentTypeId,

    /// Human-readable type name, e.g. `button`.
    pub type_name: String,

    /// Name of the parent component, if any.
    pub parent_name: Option<String>,
}

impl ComponentMetadata {
    pub fn new(
        name: impl Into<String>,
        type_id: ComponentTypeId,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_id,
            type_name: type_name.into(),
            parent_name: None,
        }
    }

    /// Set the parent's name (builder pattern).
    #[must_use]
    pub fn with_parent_name(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_name = Some(parent_name.into());
        self
    }
}
