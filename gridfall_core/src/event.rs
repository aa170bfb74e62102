//! Session events.
//!
//! The session queues events as it mutates state; the frontend drains them
//! once per frame to update the score display and surface notifications.

use serde::{Deserialize, Serialize};

use crate::piece::PieceKind;

/// Something the UI collaborator may want to report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new piece started falling.
    PieceSpawned { kind: PieceKind },
    /// The active piece froze into the container.
    PieceLocked { kind: PieceKind, score: u32 },
    /// Full layers were removed after a lock.
    LayersCleared { count: u32 },
    /// The spawn location was blocked; the session is over. Emitted once.
    GameOver { score: u32 },
}

/// FIFO queue of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    /// Removes and returns all queued events in order.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue_in_order() {
        let mut q = EventQueue::default();
        q.push(GameEvent::PieceSpawned {
            kind: PieceKind::Line,
        });
        q.push(GameEvent::LayersCleared { count: 2 });

        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            GameEvent::PieceSpawned {
                kind: PieceKind::Line
            }
        );
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }
}
