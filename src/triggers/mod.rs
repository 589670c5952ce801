//! Trigger engine: catalog, ordering, and dispatch.
//!
//! Triggers are lifecycle hooks attached to a UI component. Each component
//! owns a [`TriggerCatalog`] that sorts its triggers by provenance; the
//! [`TriggerOrderer`] resolves the catalog into one deduplicated,
//! priority-ordered list, and the [`TriggerDispatcher`] fires that list
//! when a lifecycle event happens.
//!
//! ## Key Components
//!
//! - [`Trigger`]: kind, event mask, priority, scope, behaviour
//! - [`TriggerCatalog`]: per-component storage and reentrancy deny list
//! - [`TriggerOrderer`]: catalog -> [`OrderedTriggerSet`]
//! - [`TriggerDispatcher`]: fires an event, recursing for `Init`/`DeInit`
//! - [`TriggerContext`]: what a trigger sees while it runs
//!
//! ## Provenance
//!
//! More specific provenance shadows broader provenance without any
//! override syntax: a trigger added at runtime hides a parent-declared one
//! of the same kind and mask, which hides an assembly-wide one. Triggers
//! declared on the component itself are never shadowed. Priority decides
//! the final order across all of them.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use rust_pom::components::{ComponentSpec, ComponentTree};
//! use rust_pom::core::{Environment, TriggerEvent};
//! use rust_pom::metadata::ComponentTypeId;
//! use rust_pom::testing::{MemoryDriver, MemoryLog};
//! use rust_pom::triggers::{Trigger, TriggerDispatcher};
//!
//! let env = Environment::new(Rc::new(MemoryDriver::new()), Rc::new(MemoryLog::new()));
//! let mut tree = ComponentTree::new();
//! let page = tree.add_root(ComponentSpec::new("Home", ComponentTypeId::new(1)));
//!
//! let fired = Rc::new(RefCell::new(Vec::new()));
//! let (late, early) = (Rc::clone(&fired), Rc::clone(&fired));
//!
//! tree.get_mut(page).unwrap().triggers_mut().add([
//!     Trigger::from_fn("Late", TriggerEvent::Init, move |_| {
//!         late.borrow_mut().push("late");
//!         Ok(())
//!     })
//!     .with_priority(5),
//!     Trigger::from_fn("Early", TriggerEvent::Init, move |_| {
//!         early.borrow_mut().push("early");
//!         Ok(())
//!     })
//!     .with_priority(1),
//! ]);
//!
//! TriggerDispatcher::execute(&mut tree, &env, page, TriggerEvent::Init).unwrap();
//! assert_eq!(*fired.borrow(), vec!["early", "late"]);
//! ```

mod builtin;
mod catalog;
mod context;
mod dispatcher;
mod orderer;
mod trigger;

pub use builtin::{LogInfo, TermMatch, VerifyContent, VerifyPresence};
pub use catalog::{DenyList, TriggerCatalog};
pub use context::TriggerContext;
pub use dispatcher::TriggerDispatcher;
pub use orderer::{OrderedTriggerSet, TriggerOrderer};
pub use trigger::{
    Trigger, TriggerAction, TriggerKind, TriggerPriority, TriggerProvenance, TriggerScope,
};
