use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Point;
use crate::error::{ChartError, ChartResult};

/// Gesture or programmatic request delivered by the host.
///
/// Points are in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    TouchDown { point: Point },
    TouchMove { point: Point },
    TouchUp,
    Click { point: Point },
    Pinch { centroid: Point, scale: f64 },
    /// Horizontal drag delta in pixels. Positive moves towards the end.
    ScrollBy { delta: f64 },
    ScrollTo { value: f64 },
    DismissMarker,
}

/// Sending half of the input queue. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    pub fn send(&self, event: InputEvent) -> ChartResult<()> {
        self.sender
            .send(event)
            .map_err(|_| ChartError::InputQueueClosed)
    }
}

/// Serialization point for host input: events accumulate between draw
/// passes and are drained once at the start of the next pass.
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }
}

impl InputQueue {
    #[must_use]
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    pub fn push(&self, event: InputEvent) {
        if let Err(err) = self.sender.send(event) {
            warn!(event = ?err.0, "input queue rejected event");
        }
    }

    /// Takes every event queued so far, in arrival order.
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{InputEvent, InputQueue};
    use crate::core::Point;

    #[test]
    fn drain_preserves_arrival_order_across_threads() {
        let queue = InputQueue::default();
        let sender = queue.sender();
        thread::spawn(move || {
            sender
                .send(InputEvent::TouchDown {
                    point: Point::new(1.0, 2.0),
                })
                .expect("send");
            sender.send(InputEvent::TouchUp).expect("send");
        })
        .join()
        .expect("join");
        queue.push(InputEvent::ScrollBy { delta: 4.0 });

        let events = queue.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], InputEvent::TouchUp);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = InputEvent::Pinch {
            centroid: Point::new(10.0, 20.0),
            scale: 1.5,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert!(json.contains("\"kind\":\"pinch\""));
        let back: InputEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
