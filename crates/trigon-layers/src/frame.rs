//! Frame requests: "run this layer again right before the next repaint".

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique layer identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Host primitive for scheduling a layer's next frame.
pub trait FrameScheduler {
    /// Asks for `layer` to be rendered again before the next repaint.
    /// Repeated requests before that repaint collapse into one.
    fn request_frame(&mut self, layer: LayerId);
}

/// Pending frame requests, delivered one repaint later.
///
/// Requests made while a frame is being processed land in the queue and are
/// only handed out by the next [`take`](Self::take), so an animated layer
/// renders exactly once per repaint.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<LayerId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, layer: LayerId) -> bool {
        self.pending.contains(&layer)
    }

    /// Drains the requests in the order they were first made.
    pub fn take(&mut self) -> Vec<LayerId> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, layer: LayerId) {
        // A handful of layers at most; a linear scan beats hashing here.
        if !self.pending.contains(&layer) {
            self.pending.push(layer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = LayerId::next();
        let b = LayerId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn take_preserves_request_order() {
        let (a, b, c) = (LayerId::next(), LayerId::next(), LayerId::next());
        let mut q = FrameQueue::new();
        q.request_frame(c);
        q.request_frame(a);
        q.request_frame(b);
        assert_eq!(q.take(), vec![c, a, b]);
        assert!(q.is_empty());
    }

    #[test]
    fn duplicate_requests_collapse() {
        let a = LayerId::next();
        let mut q = FrameQueue::new();
        q.request_frame(a);
        q.request_frame(a);
        assert_eq!(q.len(), 1);
        assert!(q.contains(a));
    }

    #[test]
    fn requests_during_a_frame_wait_for_the_next() {
        let a = LayerId::next();
        let mut q = FrameQueue::new();
        q.request_frame(a);

        let due = q.take();
        assert_eq!(due, vec![a]);
        // Rendering `a` schedules it again.
        q.request_frame(a);
        assert_eq!(q.len(), 1);
        assert_eq!(q.take(), vec![a]);
    }
}
