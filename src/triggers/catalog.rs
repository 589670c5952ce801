//! Per-component trigger storage.
//!
//! A [`TriggerCatalog`] keeps four lists, one per [`TriggerProvenance`],
//! and the [`OrderedTriggerSet`] derived from them. Every mutation
//! reorders, so the ordered set is never stale.

use std::rc::Rc;

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{EngineError, Result, TriggerEvent};
use crate::metadata::ComponentMetadata;

use super::orderer::{OrderedTriggerSet, TriggerOrderer};
use super::trigger::{Trigger, TriggerProvenance};

/// Events suppressed on a component during an access dispatch.
///
/// Empty except while one `execute` call is running on the component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DenyList(SmallVec<[TriggerEvent; 4]>);

impl DenyList {
    #[must_use]
    pub fn contains(&self, event: TriggerEvent) -> bool {
        self.0.contains(&event)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn deny(&mut self, events: &[TriggerEvent]) {
        self.0.extend_from_slice(events);
    }

    pub(crate) fn allow(&mut self, events: &[TriggerEvent]) {
        self.0.retain(|e| !events.contains(e));
    }
}

/// Triggers attached to one component.
#[derive(Debug, Default)]
pub struct TriggerCatalog {
    self_declared: Vec<Rc<Trigger>>,
    parent_declared: Vec<Rc<Trigger>>,
    assembly: Vec<Rc<Trigger>>,
    instance_declared: Vec<Rc<Trigger>>,
    ordered: OrderedTriggerSet,
    denied: DenyList,
    metadata: Option<Rc<ComponentMetadata>>,
}

impl TriggerCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add triggers.
    ///
    /// Before metadata is bound they are `SelfDeclared`; afterwards they
    /// are `InstanceDeclared` and receive the bound metadata immediately.
    pub fn add(&mut self, triggers: impl IntoIterator<Item = Trigger>) {
        let provenance = if self.metadata.is_some() {
            TriggerProvenance::InstanceDeclared
        } else {
            TriggerProvenance::SelfDeclared
        };

        let added: Vec<Rc<Trigger>> = triggers
            .into_iter()
            .map(|t| Rc::new(t.with_provenance(provenance)))
            .collect();

        if let Some(metadata) = &self.metadata {
            for trigger in &added {
                trigger.apply_metadata(metadata);
            }
        }

        self.list_mut(provenance).extend(added);
        self.reorder();
    }

    /// Append triggers to a specific list. Used by the metadata binder.
    pub(crate) fn push(
        &mut self,
        provenance: TriggerProvenance,
        triggers: impl IntoIterator<Item = Trigger>,
    ) {
        let added = triggers
            .into_iter()
            .map(|t| Rc::new(t.with_provenance(provenance)));
        self.list_mut(provenance).extend(added);
        self.reorder();
    }

    /// Bind metadata and hand it to every trigger in every list.
    ///
    /// Binding twice is a configuration defect.
    pub fn apply_metadata(&mut self, metadata: Rc<ComponentMetadata>) -> Result<()> {
        if let Some(bound) = &self.metadata {
            return Err(EngineError::MetadataAlreadyBound {
                component: bound.name.clone(),
            });
        }

        for trigger in self
            .self_declared
            .iter()
            .chain(&self.parent_declared)
            .chain(&self.assembly)
            .chain(&self.instance_declared)
        {
            trigger.apply_metadata(&metadata);
        }

        self.metadata = Some(metadata);
        Ok(())
    }

    /// Recompute the ordered set.
    pub fn reorder(&mut self) {
        self.ordered = TriggerOrderer::order(self);
        trace!(
            total = self.len(),
            resolved = self.ordered.len(),
            "reordered trigger catalog"
        );
    }

    #[must_use]
    pub fn self_declared(&self) -> &[Rc<Trigger>] {
        &self.self_declared
    }

    #[must_use]
    pub fn parent_declared(&self) -> &[Rc<Trigger>] {
        &self.parent_declared
    }

    #[must_use]
    pub fn assembly(&self) -> &[Rc<Trigger>] {
        &self.assembly
    }

    #[must_use]
    pub fn instance_declared(&self) -> &[Rc<Trigger>] {
        &self.instance_declared
    }

    /// The list for a provenance.
    #[must_use]
    pub fn list(&self, provenance: TriggerProvenance) -> &[Rc<Trigger>] {
        match provenance {
            TriggerProvenance::SelfDeclared => &self.self_declared,
            TriggerProvenance::ParentDeclared => &self.parent_declared,
            TriggerProvenance::Assembly => &self.assembly,
            TriggerProvenance::InstanceDeclared => &self.instance_declared,
        }
    }

    fn list_mut(&mut self, provenance: TriggerProvenance) -> &mut Vec<Rc<Trigger>> {
        match provenance {
            TriggerProvenance::SelfDeclared => &mut self.self_declared,
            TriggerProvenance::ParentDeclared => &mut self.parent_declared,
            TriggerProvenance::Assembly => &mut self.assembly,
            TriggerProvenance::InstanceDeclared => &mut self.instance_declared,
        }
    }

    /// The resolved execution list.
    #[must_use]
    pub fn ordered(&self) -> &OrderedTriggerSet {
        &self.ordered
    }

    #[must_use]
    pub fn denied(&self) -> &DenyList {
        &self.denied
    }

    pub(crate) fn denied_mut(&mut self) -> &mut DenyList {
        &mut self.denied
    }

    /// Check if `event` is currently suppressed.
    #[must_use]
    pub fn is_denied(&self, event: TriggerEvent) -> bool {
        self.denied.contains(event)
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.metadata.is_some()
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&Rc<ComponentMetadata>> {
        self.metadata.as_ref()
    }

    /// Total triggers across all four lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.self_declared.len()
            + self.parent_declared.len()
            + self.assembly.len()
            + self.instance_declared.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
