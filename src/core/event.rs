//! Lifecycle events and event masks.
//!
//! Every trigger declares the set of lifecycle events it fires on. The set
//! is stored as an [`EventMask`]: a small, sorted, duplicate-free list of
//! [`TriggerEvent`] values. Keeping the representation normalised makes
//! two masks with the same members compare equal, which the trigger
//! orderer relies on when it deduplicates.
//!
//! ## Usage
//!
//! ```
//! use rust_pom::core::{EventMask, TriggerEvent};
//!
//! let mask = EventMask::of([TriggerEvent::AfterAccess, TriggerEvent::BeforeAccess]);
//! let same = EventMask::of([TriggerEvent::BeforeAccess, TriggerEvent::AfterAccess]);
//!
//! assert_eq!(mask, same);
//! assert!(mask.contains(TriggerEvent::BeforeAccess));
//! assert!(!mask.contains(TriggerEvent::Init));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A lifecycle event of a UI component.
///
/// `None` is the null sentinel: dispatching it is a no-op and it is never
/// stored in an [`EventMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// No event.
    None,
    /// The component is initialized. Propagates to children.
    Init,
    /// The component is de-initialized. Propagates to children.
    DeInit,
    /// The owning page object finished initialization.
    OnPageObjectInit,
    /// The owning page object is being left.
    OnPageObjectLeave,
    /// Before the component's scope element is located.
    BeforeAccess,
    /// After the component's scope element is located.
    AfterAccess,
    /// Before the component's value is read.
    BeforeGet,
    /// After the component's value is read.
    AfterGet,
    /// Before the component's value is written.
    BeforeSet,
    /// After the component's value is written.
    AfterSet,
    /// Before the component is clicked.
    BeforeClick,
    /// After the component is clicked.
    AfterClick,
}

impl TriggerEvent {
    /// Every real event, in declaration order.
    pub const ALL: [TriggerEvent; 12] = [
        TriggerEvent::Init,
        TriggerEvent::DeInit,
        TriggerEvent::OnPageObjectInit,
        TriggerEvent::OnPageObjectLeave,
        TriggerEvent::BeforeAccess,
        TriggerEvent::AfterAccess,
        TriggerEvent::BeforeGet,
        TriggerEvent::AfterGet,
        TriggerEvent::BeforeSet,
        TriggerEvent::AfterSet,
        TriggerEvent::BeforeClick,
        TriggerEvent::AfterClick,
    ];

    /// Check if this is the null sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, TriggerEvent::None)
    }

    /// Events that are dispatched down the component tree after the
    /// component's own triggers ran.
    #[must_use]
    pub const fn propagates_to_children(self) -> bool {
        matches!(self, TriggerEvent::Init | TriggerEvent::DeInit)
    }

    /// Events suppressed on a component while this event is being
    /// dispatched on it.
    ///
    /// Access events suppress each other so that a trigger reading the
    /// component's value cannot re-enter the access dispatch.
    #[must_use]
    pub const fn suppressed_during(self) -> &'static [TriggerEvent] {
        match self {
            TriggerEvent::BeforeAccess | TriggerEvent::AfterAccess => {
                &[TriggerEvent::BeforeAccess, TriggerEvent::AfterAccess]
            }
            _ => &[],
        }
    }
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// The set of lifecycle events a trigger fires on.
///
/// An empty mask is valid but such a trigger never fires; see the trigger
/// orderer for how maskless triggers are treated during deduplication.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<TriggerEvent>", into = "Vec<TriggerEvent>")]
pub struct EventMask(SmallVec<[TriggerEvent; 4]>);

impl EventMask {
    /// Create an empty mask.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a mask from a list of events.
    pub fn of(events: impl IntoIterator<Item = TriggerEvent>) -> Self {
        let mut mask = Self::empty();
        for event in events {
            mask.insert(event);
        }
        mask
    }

    /// Add an event. Adding `None` or an existing member does nothing.
    pub fn insert(&mut self, event: TriggerEvent) {
        if event.is_none() {
            return;
        }
        if let Err(pos) = self.0.binary_search(&event) {
            self.0.insert(pos, event);
        }
    }

    /// Add an event (builder pattern).
    #[must_use]
    pub fn with(mut self, event: TriggerEvent) -> Self {
        self.insert(event);
        self
    }

    /// Remove an event. Returns `true` if it was a member.
    pub fn remove(&mut self, event: TriggerEvent) -> bool {
        match self.0.binary_search(&event) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, event: TriggerEvent) -> bool {
        self.0.binary_search(&event).is_ok()
    }

    /// Check if the mask has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of events in the mask.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate events in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = TriggerEvent> + '_ {
        self.0.iter().copied()
    }
}

impl From<TriggerEvent> for EventMask {
    fn from(event: TriggerEvent) -> Self {
        Self::of([event])
    }
}

impl<const N: usize> From<[TriggerEvent; N]> for EventMask {
    fn from(events: [TriggerEvent; N]) -> Self {
        Self::of(events)
    }
}

impl From<Vec<TriggerEvent>> for EventMask {
    fn from(events: Vec<TriggerEvent>) -> Self {
        Self::of(events)
    }
}

impl From<EventMask> for Vec<TriggerEvent> {
    fn from(mask: EventMask) -> Self {
        mask.0.into_vec()
    }
}

impl FromIterator<TriggerEvent> for EventMask {
    fn from_iter<I: IntoIterator<Item = TriggerEvent>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl std::fmt::Display for EventMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }
        for (i, event) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{event}")?;
        }
        Ok(())
    }
}
