use std::sync::Arc;

use crate::ability::{Ability, TargetingResult};

/// An effect chain that resolved successfully and waits for its delay.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingExecution {
    pub slot: usize,
    pub ability: Arc<Ability>,
    pub targets: TargetingResult,
    /// Manager clock time, in seconds, at which the chain runs.
    pub fire_at: f64,
}

/// Timer queue for delayed effect chains.
///
/// Entries fire once the manager clock reaches `fire_at`, earliest first and
/// in scheduling order among equal times.
#[derive(Clone, Debug, Default)]
pub struct EffectScheduler {
    entries: Vec<PendingExecution>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, entry: PendingExecution) {
        let index = self
            .entries
            .partition_point(|queued| queued.fire_at <= entry.fire_at);
        self.entries.insert(index, entry);
    }

    /// Removes and returns every entry due at `now`.
    pub fn take_due(&mut self, now: f64) -> Vec<PendingExecution> {
        let due = self.entries.partition_point(|entry| entry.fire_at <= now);
        self.entries.drain(..due).collect()
    }

    /// Discards every pending entry and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn next_fire_at(&self) -> Option<f64> {
        self.entries.first().map(|entry| entry.fire_at)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingExecution> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::TargetingType;
    use crate::state::UnitId;

    fn pending(name: &str, fire_at: f64) -> PendingExecution {
        PendingExecution {
            slot: 0,
            ability: Arc::new(Ability::new(name, TargetingType::PointAndClick)),
            targets: TargetingResult::SingleTarget(UnitId(1)),
            fire_at,
        }
    }

    #[test]
    fn due_entries_come_out_in_time_order() {
        let mut scheduler = EffectScheduler::new();
        scheduler.schedule(pending("late", 3.0));
        scheduler.schedule(pending("early", 1.0));
        scheduler.schedule(pending("tie", 1.0));

        let due: Vec<String> = scheduler
            .take_due(2.0)
            .into_iter()
            .map(|entry| entry.ability.name.clone())
            .collect();

        assert_eq!(due, vec!["early", "tie"]);
        assert_eq!(scheduler.next_fire_at(), Some(3.0));
    }

    #[test]
    fn nothing_fires_before_its_time() {
        let mut scheduler = EffectScheduler::new();
        scheduler.schedule(pending("bolt", 1.0));

        assert!(scheduler.take_due(0.99).is_empty());
        assert_eq!(scheduler.take_due(1.0).len(), 1);
        assert!(scheduler.is_empty());
    }
}
