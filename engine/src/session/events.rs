//! Outbound game events
//!
//! The session pushes events as they happen during a frame; presentation
//! drains the queue once per frame. Events serialize to tagged JSON objects,
//! e.g. `{"type":"driftScored","points":412,"totalScore":1530}`.

use glam::Vec3;
use serde::Serialize;
use static_assertions::assert_impl_all;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// A drift ended and its bucket was committed
    DriftScored { points: u64, total_score: u64 },
    /// A spin ended long enough to earn a bonus
    SpinoutBonus {
        /// Base bonus before the chain multiplier
        score: u64,
        /// Points actually credited
        awarded: u64,
        duration_seconds: f32,
    },
    /// The car struck an obstacle
    Collision { impact_speed: f32, normal: Vec3 },
    /// The crash timer ran out and the car is drivable again
    Recovered,
    /// The clock ran out
    GameOver { final_score: u64, high_score: u64 },
}

/// FIFO of events produced since the last drain.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every queued event in emission order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

assert_impl_all!(GameEvent: Send, Sync, Clone);
assert_impl_all!(EventQueue: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::Recovered);
        queue.push(GameEvent::DriftScored { points: 10, total_score: 10 });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], GameEvent::Recovered);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let event = GameEvent::DriftScored { points: 412, total_score: 1530 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "driftScored");
        assert_eq!(json["points"], 412);
        assert_eq!(json["totalScore"], 1530);

        let json = serde_json::to_value(GameEvent::GameOver { final_score: 5, high_score: 9 }).unwrap();
        assert_eq!(json["type"], "gameOver");
        assert_eq!(json["finalScore"], 5);
        assert_eq!(json["highScore"], 9);

        let json = serde_json::to_value(GameEvent::Recovered).unwrap();
        assert_eq!(json["type"], "recovered");
    }
}
