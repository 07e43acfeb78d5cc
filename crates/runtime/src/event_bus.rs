use crate::frame::Frame;

/// An event together with the frame it was emitted in.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    pub frame_index: u64,
    pub event: E,
}

/// Append-only event log, drained by whoever presents the events (UI, logs,
/// tests).
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Stamped<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, event: E) {
        self.events.push(Stamped {
            frame_index: frame.index,
            event,
        });
    }

    pub fn events(&self) -> &[Stamped<E>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        std::mem::take(&mut self.events)
    }
}
