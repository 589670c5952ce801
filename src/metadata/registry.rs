//! Type-keyed trigger declarations.
//!
//! The `DeclarationRegistry` stores one [`ComponentTypeDescriptor`] per
//! component type plus the assembly-wide declarations that apply to every
//! component.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};

use super::declaration::TriggerDeclaration;
use super::ComponentTypeId;

/// A component type and the triggers declared on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTypeDescriptor {
    pub id: ComponentTypeId,

    /// Human-readable type name, e.g. `button`.
    pub name: String,

    /// Type this one derives from. Its declarations are inherited.
    #[serde(default)]
    pub base: Option<ComponentTypeId>,

    #[serde(default)]
    pub triggers: Vec<TriggerDeclaration>,
}

impl ComponentTypeDescriptor {
    pub fn new(id: ComponentTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base: None,
            triggers: Vec::new(),
        }
    }

    /// Set the base type (builder pattern).
    #[must_use]
    pub fn with_base(mut self, base: ComponentTypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a declaration (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, declaration: TriggerDeclaration) -> Self {
        self.triggers.push(declaration);
        self
    }
}

/// Registry of component type declarations.
///
/// ## Example
///
/// ```
/// use rust_pom::core::TriggerEvent;
/// use rust_pom::metadata::{
///     ComponentTypeDescriptor, ComponentTypeId, DeclarationRegistry, DeclaredBehavior,
///     TriggerDeclaration,
/// };
///
/// let control = ComponentTypeId::new(0);
/// let button = ComponentTypeId::new(1);
///
/// let mut registry = DeclarationRegistry::new();
/// registry.register(
///     ComponentTypeDescriptor::new(control, "control")
///         .with_trigger(TriggerDeclaration::new(DeclaredBehavior::VerifyExists, TriggerEvent::Init)),
/// );
/// registry.register(ComponentTypeDescriptor::new(button, "button").with_base(control));
///
/// assert_eq!(registry.type_triggers(button).unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeclarationRegistry {
    types: FxHashMap<ComponentTypeId, ComponentTypeDescriptor>,
    assembly: Vec<TriggerDeclaration>,
}

/// On-disk shape of a registry.
#[derive(Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    types: Vec<ComponentTypeDescriptor>,
    #[serde(default)]
    assembly: Vec<TriggerDeclaration>,
}

impl DeclarationRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from JSON of the form
    /// `{ "types": [...], "assembly": [...] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RegistryDocument = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for descriptor in document.types {
            registry.register(descriptor);
        }
        registry.assembly = document.assembly;
        Ok(registry)
    }

    /// Register a component type. Returns the descriptor it replaced.
    pub fn register(&mut self, descriptor: ComponentTypeDescriptor) -> Option<ComponentTypeDescriptor> {
        self.types.insert(descriptor.id, descriptor)
    }

    #[must_use]
    pub fn get(&self, id: ComponentTypeId) -> Option<&ComponentTypeDescriptor> {
        self.types.get(&id)
    }

    /// Get a descriptor, failing with `UnknownComponentType`.
    pub fn descriptor(&self, id: ComponentTypeId) -> Result<&ComponentTypeDescriptor> {
        self.get(id).ok_or(EngineError::UnknownComponentType(id))
    }

    #[must_use]
    pub fn contains(&self, id: ComponentTypeId) -> bool {
        self.types.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Add a declaration that applies to every component.
    pub fn add_assembly_trigger(&mut self, declaration: TriggerDeclaration) {
        self.assembly.push(declaration);
    }

    #[must_use]
    pub fn assembly_triggers(&self) -> &[TriggerDeclaration] {
        &self.assembly
    }

    /// Declarations of a type, including inherited ones.
    ///
    /// The type's own declarations come first, then its base's, and so on.
    /// A base chain that loops back on itself stops at the repeat.
    pub fn type_triggers(&self, id: ComponentTypeId) -> Result<Vec<&TriggerDeclaration>> {
        let mut declarations = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = Some(id);

        while let Some(type_id) = current {
            if !visited.insert(type_id) {
                break;
            }
            let descriptor = self.descriptor(type_id)?;
            declarations.extend(descriptor.triggers.iter());
            current = descriptor.base;
        }

        Ok(declarations)
    }
}
