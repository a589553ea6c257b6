// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Synchronous push-based signals.
//!
//! An [`Emitter`] owns a channel; a [`Stream`] is a read-only handle onto the
//! same channel. Emitting delivers the value to every subscriber, in
//! subscription order, before `emit` returns. Derived streams (`map`,
//! `filter_map`, `sampled_by`) subscribe to their upstream eagerly and forward
//! within the same call stack.
//!
//! Re-entrancy: a value emitted on a channel that is already dispatching is
//! queued and delivered after the in-flight value has reached every
//! subscriber (FIFO per channel). Subscribing or unsubscribing from inside a
//! callback is allowed; a subscriber added mid-dispatch first sees the next
//! value.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Identifier returned by [`Stream::subscribe`]; unique per channel.
pub type SubscriptionId = u64;

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Subscriber<T> {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    callback: Callback<T>,
}

struct Channel<T> {
    subscribers: RefCell<Vec<Subscriber<T>>>,
    latest: RefCell<Option<T>>,
    pending: RefCell<VecDeque<T>>,
    dispatching: Cell<bool>,
    next_id: Cell<SubscriptionId>,
}

/// Clears the dispatch flag even if a subscriber panics.
struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<T: Clone + 'static> Channel<T> {
    fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
            latest: RefCell::new(None),
            pending: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            next_id: Cell::new(1),
        }
    }

    fn emit(&self, value: T) {
        self.latest.replace(Some(value.clone()));
        self.pending.borrow_mut().push_back(value);
        if self.dispatching.replace(true) {
            return;
        }
        let _guard = DispatchGuard(&self.dispatching);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };
            let snapshot: Vec<(Rc<Cell<bool>>, Callback<T>)> = self
                .subscribers
                .borrow()
                .iter()
                .map(|s| (Rc::clone(&s.active), Rc::clone(&s.callback)))
                .collect();
            for (active, callback) in snapshot {
                if active.get() {
                    (&mut *callback.borrow_mut())(&value);
                }
            }
        }
    }

    fn subscribe(&self, callback: Callback<T>) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            active: Rc::new(Cell::new(true)),
            callback,
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let Some(pos) = subscribers.iter().position(|s| s.id == id) else {
            return false;
        };
        let removed = subscribers.remove(pos);
        removed.active.set(false);
        true
    }
}

/// Write side of a channel.
pub struct Emitter<T> {
    channel: Rc<Channel<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: Rc::clone(&self.channel),
        }
    }
}

impl<T: Clone + 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("subscribers", &self.channel.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Emitter<T> {
    /// Create a channel with no subscribers and no latest value.
    pub fn new() -> Self {
        Self {
            channel: Rc::new(Channel::new()),
        }
    }

    /// Push `value` to every subscriber.
    pub fn emit(&self, value: T) {
        self.channel.emit(value);
    }

    /// Read-only handle onto this channel.
    pub fn stream(&self) -> Stream<T> {
        Stream {
            channel: Rc::clone(&self.channel),
        }
    }
}

/// Read side of a channel.
pub struct Stream<T> {
    channel: Rc<Channel<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            channel: Rc::clone(&self.channel),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("subscribers", &self.channel.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Register `callback` for every future value.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        self.channel.subscribe(Rc::new(RefCell::new(callback)))
    }

    /// Remove a subscriber. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    /// Most recently emitted value, if any.
    pub fn latest(&self) -> Option<T> {
        self.channel.latest.borrow().clone()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.channel.subscribers.borrow().len()
    }

    /// True when both handles refer to the same channel.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.channel, &other.channel)
    }

    /// Derived stream that forwards `f(value)` when it returns `Some`.
    pub fn filter_map<U, F>(&self, mut f: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: FnMut(&T) -> Option<U> + 'static,
    {
        let out = Emitter::new();
        let sink = out.clone();
        self.subscribe(move |value| {
            if let Some(mapped) = f(value) {
                sink.emit(mapped);
            }
        });
        out.stream()
    }

    /// Derived stream of `f(value)`.
    pub fn map<U, F>(&self, mut f: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: FnMut(&T) -> U + 'static,
    {
        self.filter_map(move |value| Some(f(value)))
    }

    /// Derived stream driven by `sampler`: each time `sampler` emits, pair
    /// its value with this stream's latest value and forward
    /// `combine(latest, sampled)` when it returns `Some`.
    ///
    /// Nothing is forwarded until this stream has emitted at least once.
    pub fn sampled_by<S, U, F>(&self, sampler: &Stream<S>, mut combine: F) -> Stream<U>
    where
        S: Clone + 'static,
        U: Clone + 'static,
        F: FnMut(&T, &S) -> Option<U> + 'static,
    {
        let out = Emitter::new();
        let sink = out.clone();
        let source = self.clone();
        sampler.subscribe(move |sampled| {
            let Some(latest) = source.latest() else {
                return;
            };
            if let Some(combined) = combine(&latest, sampled) {
                sink.emit(combined);
            }
        });
        out.stream()
    }
}
