//! Pointer event queue between a platform integration and its elements.
//!
//! Platform callbacks push raw events as they arrive; the host loop drains
//! them in arrival order between timer advances, which keeps every press,
//! release and tick on the same thread and in a single total order.

use super::types::PointerEvent;
use smallvec::SmallVec;

#[derive(Default)]
pub struct PointerDispatcher {
    queue: SmallVec<[PointerEvent; 4]>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self {
            queue: SmallVec::new(),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hands every queued event to `handler`, oldest first. Returns how many
    /// events were delivered.
    pub fn drain<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(PointerEvent),
    {
        let mut delivered = 0;
        for event in self.queue.drain(..) {
            handler(event);
            delivered += 1;
        }
        delivered
    }
}
