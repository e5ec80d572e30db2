//! The scenario event queue: totally ordered events dispatched by a
//! `BinaryHeap`-backed min-priority queue (§4.2).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// The kind of work an [`Event`] represents.
///
/// Ordering among same-time events follows `EventCompare` (§4.2):
/// `END < SAVE < SPREAD < NEW_FIRE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventType {
    End,
    Save,
    Spread,
    NewFire,
}

/// One scheduled unit of work in a scenario's event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Simulated seconds since scenario start.
    pub time: f64,
    pub event_type: EventType,
    pub cell_hash: u32,
}

impl Event {
    #[must_use]
    pub fn new(time: f64, event_type: EventType, cell_hash: u32) -> Self {
        Self {
            time,
            event_type,
            cell_hash,
        }
    }
}

impl Eq for Event {}

/// `Ord`/`PartialOrd` implement `EventCompare`: time ascending, then event
/// type priority, then `cell_hash` ascending — but inverted, because
/// `BinaryHeap` is a max-heap and the scenario loop wants the *earliest*
/// event popped first.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.event_type.cmp(&self.event_type))
            .then_with(|| other.cell_hash.cmp(&self.cell_hash))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A min-priority queue of [`Event`]s ordered by `EventCompare`.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.heap.push(event);
    }

    /// Pop the earliest event by `EventCompare` ordering.
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
