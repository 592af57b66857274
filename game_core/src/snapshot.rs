use std::sync::{Arc, Mutex, PoisonError};

use crate::{MatchState, Rect, Score};

/// Read-only view of one tick, handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub left_paddle: Rect,
    pub right_paddle: Rect,
    pub ball: Rect,
    pub score: Score,
    pub state: MatchState,
    /// Ball is parked at center waiting to be served
    pub serving: bool,
}

/// Copy-on-tick handoff between the simulation thread and a renderer on
/// another thread.
///
/// The simulation is the only writer and publishes a full copy every tick;
/// the reader always sees a whole snapshot, never a half-updated one.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuffer {
    slot: Arc<Mutex<Option<(u64, Snapshot)>>>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot and bump the generation
    pub fn publish(&self, snapshot: Snapshot) {
        // A poisoned slot still holds a complete snapshot, so keep going
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = slot.as_ref().map_or(1, |(g, _)| g + 1);
        *slot = Some((generation, snapshot));
    }

    /// Newest snapshot and its generation, if anything was published yet
    pub fn latest(&self) -> Option<(u64, Snapshot)> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Newest snapshot only if it is newer than `seen`
    pub fn newer_than(&self, seen: u64) -> Option<(u64, Snapshot)> {
        self.latest().filter(|(generation, _)| *generation > seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;
    use glam::Vec2;
    use std::thread;

    fn snapshot(tick: u64) -> Snapshot {
        let rect = Rect::new(Vec2::ZERO, Vec2::ONE);
        Snapshot {
            tick,
            left_paddle: rect,
            right_paddle: rect,
            ball: rect,
            score: Score::new(),
            state: MatchState::Playing,
            serving: false,
        }
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = SnapshotBuffer::new();
        assert_eq!(buffer.latest(), None);
        assert_eq!(buffer.newer_than(0), None);
    }

    #[test]
    fn test_publish_replaces_and_bumps_generation() {
        let buffer = SnapshotBuffer::new();
        buffer.publish(snapshot(1));
        buffer.publish(snapshot(2));

        let (generation, latest) = buffer.latest().unwrap();
        assert_eq!(generation, 2);
        assert_eq!(latest.tick, 2);

        assert!(buffer.newer_than(2).is_none(), "Nothing new since generation 2");
        assert!(buffer.newer_than(1).is_some());
    }

    #[test]
    fn test_reader_on_other_thread_sees_whole_snapshots() {
        let buffer = SnapshotBuffer::new();
        let reader = buffer.clone();

        let handle = thread::spawn(move || {
            let mut seen = 0;
            let mut last_tick = 0;
            while last_tick < 500 {
                if let Some((generation, snap)) = reader.newer_than(seen) {
                    assert!(generation > seen);
                    assert!(snap.tick >= last_tick, "Ticks never go backwards");
                    // Score and tick are written together
                    assert_eq!(snap.score.left as u64, snap.tick % 10);
                    seen = generation;
                    last_tick = snap.tick;
                }
                thread::yield_now();
            }
        });

        for tick in 1..=500u64 {
            let mut snap = snapshot(tick);
            snap.score.left = (tick % 10) as u8;
            if tick == 500 {
                snap.state = MatchState::Won(Side::Left);
            }
            buffer.publish(snap);
        }

        handle.join().unwrap();
        assert_eq!(
            buffer.latest().map(|(_, s)| s.state),
            Some(MatchState::Won(Side::Left))
        );
    }
}
