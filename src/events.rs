//! Event bus for diagram state changes.
//!
//! Embedding code can subscribe to what the user does on the diagram via
//! [`EventController`]. Each event carries a set of [`EventKind`] flags
//! (bitflags-style) so that one transition can match several categories
//! (e.g. switching standard *and* clearing a stale selection).
//!
//! The subscriber passes an [`EventFilter`] to receive only the events it
//! cares about. The filter is a simple OR mask: an event is delivered when
//! `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::geometry::Coord;
use crate::data::mirror::EarSide;
use crate::data::selection::SelectionState;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the *categories* an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    /// No change.
    pub const NONE: Self = Self(0);

    // ── View ────────────────────────────────────────────────────────────
    /// Switched between points and areas.
    pub const MODE_CHANGED: Self = Self(1 << 0);
    /// Switched point standard.
    pub const STANDARD_CHANGED: Self = Self(1 << 1);
    /// Switched display language.
    pub const LANGUAGE_CHANGED: Self = Self(1 << 2);
    /// Search text changed.
    pub const SEARCH_CHANGED: Self = Self(1 << 3);

    // ── Selection ───────────────────────────────────────────────────────
    /// A point became the current selection.
    pub const POINT_SELECTED: Self = Self(1 << 4);
    /// An area became the current selection.
    pub const AREA_SELECTED: Self = Self(1 << 5);
    /// The previous selection was dropped.
    pub const SELECTION_CLEARED: Self = Self(1 << 6);

    // ── Admin ───────────────────────────────────────────────────────────
    /// Admin mode was switched on or off.
    pub const ADMIN_TOGGLED: Self = Self(1 << 7);
    /// A diagram click was recorded as an admin coordinate.
    pub const ADMIN_PICK: Self = Self(1 << 8);
    /// A click or selection request was ignored (unknown id, no transform, ...).
    pub const PICK_IGNORED: Self = Self(1 << 9);

    /// Wildcard: matches *every* event kind.
    pub const ALL: Self = Self(u64::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` intersects with `other` (at least one bit in common).
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::MODE_CHANGED, "MODE_CHANGED"),
            (EventKind::STANDARD_CHANGED, "STANDARD_CHANGED"),
            (EventKind::LANGUAGE_CHANGED, "LANGUAGE_CHANGED"),
            (EventKind::SEARCH_CHANGED, "SEARCH_CHANGED"),
            (EventKind::POINT_SELECTED, "POINT_SELECTED"),
            (EventKind::AREA_SELECTED, "AREA_SELECTED"),
            (EventKind::SELECTION_CLEARED, "SELECTION_CLEARED"),
            (EventKind::ADMIN_TOGGLED, "ADMIN_TOGGLED"),
            (EventKind::ADMIN_PICK, "ADMIN_PICK"),
            (EventKind::PICK_IGNORED, "PICK_IGNORED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MapEvent
// ─────────────────────────────────────────────────────────────────────────────

/// Where an admin pick landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickMeta {
    pub side: EarSide,
    /// Pointer position in screen pixels.
    pub screen: Coord,
    /// Canonical (left-ear) intrinsic coordinate.
    pub diagram: Coord,
}

/// An event emitted by the diagram UI.
#[derive(Debug, Clone)]
pub struct MapEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,
    /// Selection state right after the transition.
    pub state: Option<SelectionState>,
    pub pick: Option<PickMeta>,
    /// Human-readable reason for `PICK_IGNORED`.
    pub reason: Option<String>,
}

impl MapEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            state: None,
            pick: None,
            reason: None,
        }
    }

    pub fn with_state(mut self, state: &SelectionState) -> Self {
        self.state = Some(state.clone());
        self
    }

    pub fn with_pick(mut self, pick: PickMeta) -> Self {
        self.pick = Some(pick);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask selecting which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &MapEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<MapEvent>,
}

/// Collects and distributes diagram events to subscribers.
///
/// Attach it to [`EarMapConfig`](crate::config::EarMapConfig) before
/// launching the UI, then call [`subscribe`](Self::subscribe) to receive
/// events on an `mpsc` channel.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching `filter`.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<MapEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        if let Ok(mut inner) = self.inner.lock() {
            inner.subscribers.push(Subscriber { filter, sender: tx });
        }
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<MapEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to every matching subscriber. Subscribers whose
    /// receiver was dropped are pruned when a send to them fails.
    pub fn emit(&self, mut event: MapEvent) {
        if event.kinds.is_empty() {
            return;
        }
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|i| i.subscribers.len()).unwrap_or(0)
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
