//! # rust-pom
//!
//! A page object engine for browser tests, built around lifecycle
//! triggers.
//!
//! ## Design Principles
//!
//! 1. **Declarative Hooks**: Behaviour is attached to components as
//!    triggers, declared on component types, on the properties that
//!    reference them, process-wide, or at runtime.
//!
//! 2. **Deterministic Firing**: Every component resolves its triggers
//!    into one deduplicated, priority-ordered list. The same catalog
//!    always fires in the same order.
//!
//! 3. **Configuration Over Ambient State**: Formatting and default
//!    priorities come from an injected `EngineConfig`.
//!
//! ## Architecture
//!
//! - **Arena Tree**: Components live in a `ComponentTree` and refer to
//!   each other by `ComponentId`; triggers get mutable access to the tree
//!   while they run.
//!
//! - **Persistent Snapshots**: The ordered trigger set is an `im::Vector`,
//!   so a dispatch clones it in O(1) before firing.
//!
//! - **Single Threaded**: Triggers and metadata are shared with `Rc`; one
//!   thread drives one tree.
//!
//! ## Modules
//!
//! - `core`: Events, configuration, errors, logging, the browser seam
//! - `triggers`: Trigger model, catalog, ordering, dispatch, built-ins
//! - `components`: Component tree and page objects
//! - `metadata`: Declarations, registry, metadata binding
//! - `verification`: `Should::satisfy` and the assertion catalogue
//! - `testing`: In-memory driver and logger

pub mod components;
pub mod core;
pub mod metadata;
pub mod testing;
pub mod triggers;
pub mod verification;

// Re-export commonly used types
pub use crate::core::{
    AssertionError, BrowserDriver, ElementHandle, EngineConfig, EngineError, Environment,
    EventMask, FormatterConfig, Locator, LogLevel, LogManager, Result, ScopeFinder, TracingLog,
    TriggerEvent,
};

pub use crate::components::{Component, ComponentId, ComponentSpec, ComponentTree, PageObject};

pub use crate::metadata::{
    ComponentMetadata, ComponentTypeDescriptor, ComponentTypeId, DeclarationRegistry,
    DeclaredBehavior, MetadataBinder, TriggerDeclaration, TriggerFactory,
};

pub use crate::triggers::{
    OrderedTriggerSet, Trigger, TriggerAction, TriggerCatalog, TriggerContext, TriggerDispatcher,
    TriggerKind, TriggerPriority, TriggerProvenance, TriggerScope,
};

pub use crate::verification::{DataProvider, Should, ValueFormatter};
