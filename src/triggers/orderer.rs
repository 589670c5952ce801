//! Resolution of a catalog into one ordered execution list.
//!
//! ## Algorithm
//!
//! 1. Take the `SelfDeclared` triggers scoped `SelfOnly`, sort them by
//!    priority, and mark them as defined at component level.
//! 2. Build a pool: `InstanceDeclared`, then `ParentDeclared`, then
//!    `Assembly`, each sorted by priority. Earlier provenance shadows later.
//! 3. Deduplicate the pool. Take the head, remove every pool member with
//!    the same kind and mask. Keep the head only if its mask is non-empty.
//! 4. Append the survivors to step 1 and stable-sort by priority.
//!
//! `SelfDeclared` triggers never take part in deduplication.

use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;

use crate::core::TriggerEvent;

use super::catalog::TriggerCatalog;
use super::trigger::{Trigger, TriggerScope};

/// Immutable snapshot of a catalog's resolved triggers.
///
/// Backed by a persistent vector, so the dispatcher can clone it in O(1)
/// and iterate it while triggers mutate the catalog.
#[derive(Clone, Debug, Default)]
pub struct OrderedTriggerSet {
    triggers: im::Vector<Rc<Trigger>>,
}

impl OrderedTriggerSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Iterate in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Trigger>> {
        self.triggers.iter()
    }

    /// Iterate the triggers that fire on `event`, in firing order.
    pub fn matching(&self, event: TriggerEvent) -> impl Iterator<Item = &Rc<Trigger>> {
        self.triggers.iter().filter(move |t| t.applies_to(event))
    }

    /// Get a trigger by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rc<Trigger>> {
        self.triggers.get(index)
    }
}

impl From<Vec<Rc<Trigger>>> for OrderedTriggerSet {
    fn from(triggers: Vec<Rc<Trigger>>) -> Self {
        Self {
            triggers: triggers.into_iter().collect(),
        }
    }
}

/// Two snapshots are equal when they hold the same trigger instances in
/// the same order.
impl PartialEq for OrderedTriggerSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| Rc::ptr_eq(a, b))
    }
}

impl Eq for OrderedTriggerSet {}

/// Computes [`OrderedTriggerSet`]s.
pub struct TriggerOrderer;

impl TriggerOrderer {
    /// Resolve a catalog's four lists into an ordered set.
    ///
    /// Repeated calls with unchanged lists produce equal sets.
    pub fn order(catalog: &TriggerCatalog) -> OrderedTriggerSet {
        let mut resolved: Vec<Rc<Trigger>> = catalog
            .self_declared()
            .iter()
            .filter(|t| t.scope() == TriggerScope::SelfOnly)
            .cloned()
            .collect();
        resolved.sort_by_key(|t| t.priority());

        for trigger in &resolved {
            trigger.mark_component_level();
        }

        let pool: VecDeque<Rc<Trigger>> = Self::sorted(catalog.instance_declared())
            .chain(Self::sorted(catalog.parent_declared()))
            .chain(Self::sorted(catalog.assembly()))
            .collect();

        resolved.extend(Self::deduplicate(pool));
        resolved.sort_by_key(|t| t.priority());

        OrderedTriggerSet::from(resolved)
    }

    /// Remove shadowed triggers from a pool, keeping pool order.
    ///
    /// For each head, every other member with the same kind and mask is
    /// dropped. A head with an empty mask is dropped as well.
    pub fn deduplicate(mut pool: VecDeque<Rc<Trigger>>) -> Vec<Rc<Trigger>> {
        let mut survivors = Vec::with_capacity(pool.len());

        while let Some(head) = pool.pop_front() {
            let before = pool.len();
            pool.retain(|t| !t.is_same_kind_and_mask(&head));
            let shadowed = before - pool.len();

            if head.on().is_empty() {
                trace!(kind = %head.kind(), shadowed, "discarding maskless trigger");
            } else {
                if shadowed > 0 {
                    trace!(kind = %head.kind(), on = %head.on(), shadowed, "shadowed duplicate triggers");
                }
                survivors.push(head);
            }
        }

        survivors
    }

    fn sorted(triggers: &[Rc<Trigger>]) -> impl Iterator<Item = Rc<Trigger>> {
        let mut sorted = triggers.to_vec();
        sorted.sort_by_key(|t| t.priority());
        sorted.into_iter()
    }
}
