use std::collections::BTreeMap;
use std::time::Instant;

use crate::camera::CameraIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKey {
    StreamRetry(CameraIndex),
    HighlightExpiry(CameraIndex),
    StatusPoll,
    ShuffleArm,
}

#[derive(Debug, Default)]
pub struct Timers {
    pending: BTreeMap<TimerKey, Instant>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` at `at`, replacing any pending deadline for the same key.
    /// Returns true when an earlier schedule was superseded.
    pub fn schedule(&mut self, key: TimerKey, at: Instant) -> bool {
        self.pending.insert(key, at).is_some()
    }

    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn deadline(&self, key: TimerKey) -> Option<Instant> {
        self.pending.get(&key).copied()
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerKey, Instant)> {
        let mut due: Vec<(TimerKey, Instant)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(key, at)| (*key, *at))
            .collect();
        for (key, _) in &due {
            self.pending.remove(key);
        }
        due.sort_by_key(|(key, at)| (*at, *key));
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rescheduling_a_key_supersedes_the_old_deadline() {
        let t0 = Instant::now();
        let cam = CameraIndex::new(1).expect("index");
        let mut timers = Timers::new();

        assert!(!timers.schedule(TimerKey::HighlightExpiry(cam), t0 + Duration::from_secs(5)));
        assert!(timers.schedule(TimerKey::HighlightExpiry(cam), t0 + Duration::from_secs(8)));

        assert_eq!(timers.len(), 1);
        assert!(timers.take_due(t0 + Duration::from_secs(6)).is_empty());
        assert_eq!(
            timers.take_due(t0 + Duration::from_secs(8)),
            vec![(TimerKey::HighlightExpiry(cam), t0 + Duration::from_secs(8))]
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let t0 = Instant::now();
        let cam = CameraIndex::new(2).expect("index");
        let mut timers = Timers::new();
        timers.schedule(TimerKey::StatusPoll, t0 + Duration::from_millis(300));
        timers.schedule(TimerKey::StreamRetry(cam), t0 + Duration::from_millis(100));
        timers.schedule(TimerKey::ShuffleArm, t0 + Duration::from_millis(900));

        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_millis(100)));

        let due = timers.take_due(t0 + Duration::from_millis(500));
        let keys: Vec<TimerKey> = due.into_iter().map(|(key, _)| key).collect();

        assert_eq!(keys, vec![TimerKey::StreamRetry(cam), TimerKey::StatusPoll]);
        assert!(timers.is_pending(TimerKey::ShuffleArm));
    }
}
