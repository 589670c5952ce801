//! Populating component catalogs from declarations.

use std::rc::Rc;

use tracing::debug;

use crate::components::{ComponentId, ComponentTree};
use crate::core::{EngineError, Result};
use crate::triggers::{Trigger, TriggerProvenance};

use super::declaration::TriggerDeclaration;
use super::factory::TriggerFactory;
use super::registry::DeclarationRegistry;
use super::ComponentMetadata;

/// Fills component catalogs and binds their metadata.
///
/// For a component of type `T`, `bind` files:
///
/// - `SelfDeclared`: the declarations of `T` and its base types
/// - `ParentDeclared`: the component's own `SelfOnly` property
///   declarations, then the `Cascade` declarations of each ancestor
///   (type and property), nearest ancestor first
/// - `Assembly`: the registry's assembly-wide declarations
///
/// and then binds the metadata, which hands it to every trigger. Binding
/// a component twice is `MetadataAlreadyBound`.
#[derive(Debug)]
pub struct MetadataBinder {
    registry: DeclarationRegistry,
    factory: TriggerFactory,
}

impl MetadataBinder {
    #[must_use]
    pub fn new(registry: DeclarationRegistry, factory: TriggerFactory) -> Self {
        Self { registry, factory }
    }

    #[must_use]
    pub fn registry(&self) -> &DeclarationRegistry {
        &self.registry
    }

    #[must_use]
    pub fn factory(&self) -> &TriggerFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut TriggerFactory {
        &mut self.factory
    }

    /// Bind one component.
    pub fn bind(&self, tree: &mut ComponentTree, id: ComponentId) -> Result<Rc<ComponentMetadata>> {
        let component = tree.get(id)?;
        if component.triggers().is_bound() {
            return Err(EngineError::MetadataAlreadyBound {
                component: component.full_name(),
            });
        }

        let descriptor = self.registry.descriptor(component.type_id())?;
        let self_declared = self
            .factory
            .build_all(self.registry.type_triggers(component.type_id())?)?;

        let own_properties = component.property_triggers().iter().filter(|d| !d.cascades());
        let mut parent_declared = self.factory.build_all(own_properties)?;
        for ancestor in tree.ancestors(id)? {
            parent_declared.extend(self.cascading_from(tree, ancestor)?);
        }

        let assembly = self.factory.build_all(self.registry.assembly_triggers())?;

        let mut metadata =
            ComponentMetadata::new(component.name(), component.type_id(), descriptor.name.as_str());
        if let Some(parent) = component.parent() {
            metadata = metadata.with_parent_name(tree.get(parent)?.name());
        }
        let metadata = Rc::new(metadata);

        debug!(
            component = %id,
            self_declared = self_declared.len(),
            parent_declared = parent_declared.len(),
            assembly = assembly.len(),
            "binding component metadata"
        );

        let catalog = tree.get_mut(id)?.triggers_mut();
        catalog.push(TriggerProvenance::SelfDeclared, self_declared);
        catalog.push(TriggerProvenance::ParentDeclared, parent_declared);
        catalog.push(TriggerProvenance::Assembly, assembly);
        catalog.apply_metadata(Rc::clone(&metadata))?;

        Ok(metadata)
    }

    /// Bind a component and all its descendants, parents first.
    pub fn bind_tree(&self, tree: &mut ComponentTree, root: ComponentId) -> Result<()> {
        for id in tree.depth_first(root)? {
            self.bind(tree, id)?;
        }
        Ok(())
    }

    /// Triggers an ancestor hands down to its descendants.
    fn cascading_from(&self, tree: &ComponentTree, ancestor: ComponentId) -> Result<Vec<Trigger>> {
        let component = tree.get(ancestor)?;
        let type_declarations = self.registry.type_triggers(component.type_id())?;
        let cascading = component
            .property_triggers()
            .iter()
            .chain(type_declarations)
            .filter(|d: &&TriggerDeclaration| d.cascades());
        self.factory.build_all(cascading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentSpec;
    use crate::core::{EngineConfig, TriggerEvent};
    use crate::metadata::{ComponentTypeDescriptor, ComponentTypeId, DeclaredBehavior};
    use crate::triggers::{TriggerKind, TriggerScope};

    const PAGE: ComponentTypeId = ComponentTypeId::new(0);
    const BUTTON: ComponentTypeId = ComponentTypeId::new(1);

    fn log(message: &str) -> TriggerDeclaration {
        TriggerDeclaration::new(
            DeclaredBehavior::LogInfo {
                message: message.into(),
            },
            TriggerEvent::Init,
        )
    }

    fn binder() -> MetadataBinder {
        let mut registry = DeclarationRegistry::new();
        registry.register(
            ComponentTypeDescriptor::new(PAGE, "page").with_trigger(
                TriggerDeclaration::new(DeclaredBehavior::VerifyExists, TriggerEvent::Init)
                    .with_scope(TriggerScope::Cascade),
            ),
        );
        registry.register(ComponentTypeDescriptor::new(BUTTON, "button").with_trigger(log("type")));
        registry.add_assembly_trigger(log("assembly").with_priority(0));
        MetadataBinder::new(registry, TriggerFactory::new(&EngineConfig::default()))
    }

    #[test]
    fn test_bind_files_by_provenance() {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Login", PAGE));
        let save = tree
            .add_child(page, ComponentSpec::new("Save", BUTTON).with_trigger(log("property")))
            .unwrap();

        let metadata = binder().bind(&mut tree, save).unwrap();
        assert_eq!(metadata.type_name, "button");
        assert_eq!(metadata.parent_name.as_deref(), Some("Login"));

        let catalog = tree.get(save).unwrap().triggers();
        assert!(catalog.is_bound());
        assert_eq!(catalog.self_declared().len(), 1);
        assert_eq!(catalog.assembly().len(), 1);

        let parent_kinds: Vec<_> = catalog.parent_declared().iter().map(|t| t.kind().clone()).collect();
        assert_eq!(parent_kinds, vec![TriggerKind::LogInfo, TriggerKind::VerifyExists]);
    }

    #[test]
    fn test_cascading_type_trigger_skips_its_own_component() {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Login", PAGE));

        binder().bind(&mut tree, page).unwrap();

        let catalog = tree.get(page).unwrap().triggers();
        assert_eq!(catalog.self_declared().len(), 1);
        assert!(catalog
            .ordered()
            .iter()
            .all(|t| t.kind() != &TriggerKind::VerifyExists));
    }

    #[test]
    fn test_bind_twice_fails() {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Login", PAGE));
        let binder = binder();

        binder.bind(&mut tree, page).unwrap();
        assert!(matches!(
            binder.bind(&mut tree, page),
            Err(EngineError::MetadataAlreadyBound { .. })
        ));
        assert_eq!(tree.get(page).unwrap().triggers().self_declared().len(), 1);
    }

    #[test]
    fn test_unknown_type() {
        let mut tree = ComponentTree::new();
        let root = tree.add_root(ComponentSpec::new("Mystery", ComponentTypeId::new(99)));
        assert!(matches!(
            binder().bind(&mut tree, root),
            Err(EngineError::UnknownComponentType(_))
        ));
    }

    #[test]
    fn test_bind_tree() {
        let mut tree = ComponentTree::new();
        let page = tree.add_root(ComponentSpec::new("Login", PAGE));
        let save = tree.add_child(page, ComponentSpec::new("Save", BUTTON)).unwrap();

        binder().bind_tree(&mut tree, page).unwrap();
        assert!(tree.get(page).unwrap().triggers().is_bound());
        assert!(tree.get(save).unwrap().triggers().is_bound());
        assert_eq!(tree.full_name(save), "\"Save\" button");
    }
}
