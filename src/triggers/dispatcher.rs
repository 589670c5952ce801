//! Firing a component's triggers for a lifecycle event.

use tracing::{debug, trace};

use crate::components::{ComponentId, ComponentTree};
use crate::core::{Environment, Result, TriggerEvent};

use super::context::TriggerContext;
use super::orderer::OrderedTriggerSet;

/// Dispatches lifecycle events to component triggers.
///
/// ## Execution
///
/// 1. Nothing happens if the component's ordered set is empty, the event
///    is `None`, or the event is on the component's deny list.
/// 2. Events the dispatched event suppresses are added to the deny list;
///    they are removed again on every exit path.
/// 3. Matching triggers run in ordered-set order with one shared context.
///    The first error stops the batch and is returned.
/// 4. `Init` and `DeInit` then recurse into the children, in declared
///    order.
pub struct TriggerDispatcher;

impl TriggerDispatcher {
    /// Fire `event` on a component.
    pub fn execute(
        tree: &mut ComponentTree,
        env: &Environment,
        id: ComponentId,
        event: TriggerEvent,
    ) -> Result<()> {
        let component = tree.get(id)?;
        let catalog = component.triggers();

        if event.is_none() || catalog.ordered().is_empty() {
            return Ok(());
        }
        if catalog.is_denied(event) {
            trace!(component = %id, %event, "event suppressed");
            return Ok(());
        }

        let triggers = catalog.ordered().clone();
        let parent = component.parent();
        let suppressed = event.suppressed_during();

        tree.get_mut(id)?.triggers_mut().denied_mut().deny(suppressed);
        let outcome = Self::fire_batch(tree, env, id, parent, event, &triggers);
        tree.get_mut(id)?.triggers_mut().denied_mut().allow(suppressed);
        outcome?;

        if event.propagates_to_children() {
            let children = tree.children(id)?.to_vec();
            for child in children {
                Self::execute(tree, env, child, event)?;
            }
        }

        Ok(())
    }

    fn fire_batch(
        tree: &mut ComponentTree,
        env: &Environment,
        id: ComponentId,
        parent: Option<ComponentId>,
        event: TriggerEvent,
        triggers: &OrderedTriggerSet,
    ) -> Result<()> {
        let mut ctx = TriggerContext::new(event, id, parent, tree, env);
        let mut fired = 0usize;

        for trigger in triggers.matching(event) {
            trace!(component = %id, %event, kind = %trigger.kind(), "firing trigger");
            if let Err(err) = trigger.fire(&mut ctx) {
                debug!(component = %id, %event, kind = %trigger.kind(), error = %err, "trigger failed");
                return Err(err);
            }
            fired += 1;
        }

        if fired > 0 {
            debug!(component = %id, %event, fired, "executed triggers");
        }
        Ok(())
    }
}
