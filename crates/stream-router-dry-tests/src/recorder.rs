// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stream recorder for asserting on emissions.

use std::cell::RefCell;
use std::rc::Rc;

use stream_router_core::{Stream, SubscriptionId};

/// Subscribes to a stream and keeps every value it emits, in order.
///
/// # Example
///
/// ```
/// use stream_router_core::Emitter;
/// use stream_router_dry_tests::Recorder;
///
/// let emitter = Emitter::new();
/// let rec = Recorder::attach(&emitter.stream());
/// emitter.emit(7u8);
/// assert_eq!(rec.values(), vec![7]);
/// ```
pub struct Recorder<T> {
    stream: Stream<T>,
    id: SubscriptionId,
    seen: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> Recorder<T> {
    /// Start recording `stream`.
    pub fn attach(stream: &Stream<T>) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = stream.subscribe(move |value: &T| sink.borrow_mut().push(value.clone()));
        Self {
            stream: stream.clone(),
            id,
            seen,
        }
    }

    /// Everything recorded so far.
    pub fn values(&self) -> Vec<T> {
        self.seen.borrow().clone()
    }

    /// Most recent value.
    pub fn last(&self) -> Option<T> {
        self.seen.borrow().last().cloned()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }

    /// Forget recorded values; keep recording.
    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }

    /// Stop recording. Returns `false` if already detached.
    pub fn detach(&self) -> bool {
        self.stream.unsubscribe(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stream_router_core::Emitter;

    #[test]
    fn records_in_order_until_detached() {
        let emitter = Emitter::new();
        let rec = Recorder::attach(&emitter.stream());
        emitter.emit(1u8);
        emitter.emit(2);
        assert_eq!(rec.values(), vec![1, 2]);
        assert!(rec.detach());
        emitter.emit(3);
        assert_eq!(rec.len(), 2);
        assert!(!rec.detach());
    }

    #[test]
    fn clear_keeps_subscription() {
        let emitter = Emitter::new();
        let rec = Recorder::attach(&emitter.stream());
        emitter.emit("a");
        rec.clear();
        assert!(rec.is_empty());
        emitter.emit("b");
        assert_eq!(rec.last(), Some("b"));
    }
}
