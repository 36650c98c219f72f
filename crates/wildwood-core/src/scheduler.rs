//! Time-ordered action queue with per-entity cancellation.

use crate::entity::EntityId;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work item delivered to an entity when its event comes due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    /// Advance the owner's animation frame. A repeat count of zero loops
    /// forever; a count of one stops after this delivery.
    Animation { repeat_count: u32 },
    /// Run the owner's behavior step.
    Behavior,
}

/// A due action paired with its owner and fire time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueEvent {
    pub entity: EntityId,
    pub action: Action,
    pub time: f64,
}

#[derive(Debug, Clone, Copy)]
struct QueuedEvent {
    time: OrderedFloat<f64>,
    sequence: u64,
    entity: EntityId,
    action: Action,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the earliest event surfaces
        // first, with the sequence number keeping equal times in submission
        // order.
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of entity actions ordered by simulation time.
///
/// Cancellation is indexed per entity: [`EventScheduler::unschedule_all`]
/// drops the owner's pending set in one step, and orphaned heap entries are
/// discarded lazily when they surface.
#[derive(Debug, Default)]
pub struct EventScheduler {
    queue: BinaryHeap<QueuedEvent>,
    pending: SecondaryMap<EntityId, Vec<u64>>,
    current_time: f64,
    next_sequence: u64,
}

impl EventScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation clock in seconds.
    #[must_use]
    pub const fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Queue `action` for `entity` after `delay` seconds. Negative delays are
    /// clamped to zero.
    pub fn schedule(&mut self, entity: EntityId, action: Action, delay: f64) {
        debug_assert!(delay >= 0.0, "scheduling delay must not be negative");
        let delay = delay.max(0.0);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(QueuedEvent {
            time: OrderedFloat(self.current_time + delay),
            sequence,
            entity,
            action,
        });
        if let Some(sequences) = self.pending.get_mut(entity) {
            sequences.push(sequence);
        } else {
            self.pending.insert(entity, vec![sequence]);
        }
    }

    /// Drop every pending event owned by `entity`.
    pub fn unschedule_all(&mut self, entity: EntityId) {
        self.pending.remove(entity);
    }

    /// Pop the earliest live event with `time <= boundary`, advancing the
    /// clock to its timestamp. Returns `None` once nothing is due.
    pub fn pop_due(&mut self, boundary: f64) -> Option<DueEvent> {
        while self
            .queue
            .peek()
            .is_some_and(|head| head.time.into_inner() <= boundary)
        {
            let Some(event) = self.queue.pop() else { break };
            if !self.discard_pending(event.entity, event.sequence) {
                continue;
            }
            self.current_time = event.time.into_inner();
            return Some(DueEvent {
                entity: event.entity,
                action: event.action,
                time: self.current_time,
            });
        }
        None
    }

    /// Advance the clock to the end of a drained interval.
    pub fn finish_interval(&mut self, boundary: f64) {
        debug_assert!(
            boundary >= self.current_time,
            "scheduler clock may not move backwards"
        );
        if boundary > self.current_time {
            self.current_time = boundary;
        }
    }

    /// Number of live events owned by `entity`.
    #[must_use]
    pub fn pending_for(&self, entity: EntityId) -> usize {
        self.pending.get(entity).map_or(0, Vec::len)
    }

    /// Number of live events across all owners.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.iter().map(|(_, sequences)| sequences.len()).sum()
    }

    /// Remove `sequence` from the owner's pending set, reporting whether the
    /// event was still live.
    fn discard_pending(&mut self, entity: EntityId, sequence: u64) -> bool {
        let Some(sequences) = self.pending.get_mut(entity) else {
            return false;
        };
        match sequences.iter().position(|&s| s == sequence) {
            Some(index) => {
                sequences.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys(count: usize) -> Vec<EntityId> {
        let mut slots: SlotMap<EntityId, ()> = SlotMap::with_key();
        (0..count).map(|_| slots.insert(())).collect()
    }

    #[test]
    fn events_pop_in_time_order() {
        let ids = keys(1);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 3.0);
        scheduler.schedule(ids[0], Action::Behavior, 1.0);
        scheduler.schedule(ids[0], Action::Behavior, 2.0);

        let mut times = Vec::new();
        while let Some(event) = scheduler.pop_due(10.0) {
            times.push(event.time);
        }
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn equal_times_fire_in_submission_order() {
        let ids = keys(2);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 1.0);
        scheduler.schedule(ids[1], Action::Animation { repeat_count: 0 }, 1.0);
        scheduler.schedule(ids[0], Action::Animation { repeat_count: 0 }, 1.0);

        let first = scheduler.pop_due(1.0).expect("first event");
        let second = scheduler.pop_due(1.0).expect("second event");
        let third = scheduler.pop_due(1.0).expect("third event");
        assert_eq!((first.entity, first.action), (ids[0], Action::Behavior));
        assert_eq!(
            (second.entity, second.action),
            (ids[1], Action::Animation { repeat_count: 0 })
        );
        assert_eq!(
            (third.entity, third.action),
            (ids[0], Action::Animation { repeat_count: 0 })
        );
    }

    #[test]
    fn boundary_time_events_fire() {
        let ids = keys(1);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 5.0);
        let event = scheduler.pop_due(5.0).expect("event due exactly at boundary");
        assert_eq!(event.time, 5.0);
        assert_eq!(scheduler.current_time(), 5.0);
    }

    #[test]
    fn future_events_wait_past_the_boundary() {
        let ids = keys(1);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 5.0);
        assert!(scheduler.pop_due(4.9).is_none());
        assert_eq!(scheduler.current_time(), 0.0);
        scheduler.finish_interval(4.9);
        assert_eq!(scheduler.current_time(), 4.9);
        let event = scheduler.pop_due(10.0).expect("event still queued");
        assert_eq!(event.time, 5.0);
    }

    #[test]
    fn clock_tracks_event_times_then_snaps_to_boundary() {
        let ids = keys(1);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 1.5);
        let event = scheduler.pop_due(4.0).expect("due event");
        assert_eq!(event.time, 1.5);
        assert_eq!(scheduler.current_time(), 1.5);
        assert!(scheduler.pop_due(4.0).is_none());
        scheduler.finish_interval(4.0);
        assert_eq!(scheduler.current_time(), 4.0);
        // Later delays are measured from the new clock.
        scheduler.schedule(ids[0], Action::Behavior, 1.0);
        let event = scheduler.pop_due(10.0).expect("due event");
        assert_eq!(event.time, 5.0);
    }

    #[test]
    fn unschedule_drops_only_that_entitys_events() {
        let ids = keys(2);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 1.0);
        scheduler.schedule(ids[0], Action::Animation { repeat_count: 0 }, 1.0);
        scheduler.schedule(ids[1], Action::Behavior, 2.0);
        assert_eq!(scheduler.pending_len(), 3);

        scheduler.unschedule_all(ids[0]);
        assert_eq!(scheduler.pending_for(ids[0]), 0);
        assert_eq!(scheduler.pending_for(ids[1]), 1);

        let event = scheduler.pop_due(10.0).expect("survivor fires");
        assert_eq!(event.entity, ids[1]);
        assert!(scheduler.pop_due(10.0).is_none());
        assert_eq!(scheduler.pending_len(), 0);
    }

    #[test]
    fn rescheduling_after_cancel_keeps_new_events_live() {
        let ids = keys(1);
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(ids[0], Action::Behavior, 1.0);
        scheduler.unschedule_all(ids[0]);
        scheduler.schedule(ids[0], Action::Behavior, 2.0);

        let event = scheduler.pop_due(10.0).expect("replacement event fires");
        assert_eq!(event.time, 2.0);
        assert!(scheduler.pop_due(10.0).is_none());
    }
}
