// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Manually driven hash-change source for testing without a browser.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use stream_router_core::{HashChangeEvent, HashChangeHandler, HashSource, LifecycleError};

/// URL prefix used for synthesized `new_url`/`old_url` values.
pub const BASE_URL: &str = "http://localhost/app";

type SharedHandler = Rc<RefCell<HashChangeHandler>>;

/// In-memory implementation of [`HashSource`] for testing.
///
/// Clones share state, so a test can keep one handle while the element owns
/// another. Tracks subscribe/release call counts and can be told to fail.
///
/// # Example
///
/// ```
/// use stream_router_core::{RouterConfig, StreamRouterElement};
/// use stream_router_dry_tests::{ManualHashSource, Recorder};
///
/// let source = ManualHashSource::new();
/// let element = StreamRouterElement::created(source.clone(), RouterConfig::default()).unwrap();
/// let user = Recorder::attach(&element.on_route("/user/:id"));
///
/// source.navigate("#user/42");
/// assert_eq!(user.last().unwrap().get("id"), Some("42"));
/// ```
#[derive(Clone, Default)]
pub struct ManualHashSource {
    inner: Rc<RefCell<ManualHashSourceInner>>,
}

#[derive(Default)]
struct ManualHashSourceInner {
    hash: String,
    handlers: Vec<(u64, SharedHandler)>,
    next_listener: u64,
    subscribe_count: usize,
    release_count: usize,
    dispatch_count: usize,
    pending: VecDeque<HashChangeEvent>,
    dispatching: bool,
    fail_on_subscribe: bool,
    fail_on_release: bool,
}

/// Subscription token handed out by [`ManualHashSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualListener(u64);

impl ManualHashSource {
    /// Create a source with an empty hash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source whose current hash is `hash` (e.g. `"#user/1"`).
    pub fn with_hash(hash: impl Into<String>) -> Self {
        let source = Self::new();
        source.inner.borrow_mut().hash = hash.into();
        source
    }

    /// Change the current hash and notify every listener, like a browser
    /// navigation would.
    ///
    /// Navigating from inside a handler queues the nested event; it is
    /// delivered once the current one has reached every listener.
    pub fn navigate(&self, hash: impl Into<String>) {
        {
            let mut inner = self.inner.borrow_mut();
            let old_url = format!("{BASE_URL}{}", inner.hash);
            inner.hash = hash.into();
            inner.dispatch_count += 1;
            let event =
                HashChangeEvent::new(format!("{BASE_URL}{}", inner.hash)).with_old_url(old_url);
            inner.pending.push_back(event);
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let event = inner.pending.pop_front();
                if event.is_none() {
                    inner.dispatching = false;
                }
                event.map(|event| {
                    let handlers: Vec<SharedHandler> =
                        inner.handlers.iter().map(|(_, h)| Rc::clone(h)).collect();
                    (event, handlers)
                })
            };
            let Some((event, handlers)) = next else {
                break;
            };
            for handler in handlers {
                (&mut *handler.borrow_mut())(&event);
            }
        }
    }

    /// Change the current hash without notifying anyone.
    pub fn set_hash(&self, hash: impl Into<String>) {
        self.inner.borrow_mut().hash = hash.into();
    }

    /// Configure the source to fail on subscribe.
    pub fn set_fail_on_subscribe(&self, fail: bool) {
        self.inner.borrow_mut().fail_on_subscribe = fail;
    }

    /// Configure the source to fail on release.
    pub fn set_fail_on_release(&self, fail: bool) {
        self.inner.borrow_mut().fail_on_release = fail;
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Number of `subscribe` calls (attempted, not successful).
    pub fn subscribe_count(&self) -> usize {
        self.inner.borrow().subscribe_count
    }

    /// Number of `release` calls (attempted, not successful).
    pub fn release_count(&self) -> usize {
        self.inner.borrow().release_count
    }

    /// Number of `navigate` calls.
    pub fn dispatch_count(&self) -> usize {
        self.inner.borrow().dispatch_count
    }
}

impl HashSource for ManualHashSource {
    type Listener = ManualListener;

    fn current_hash(&self) -> String {
        self.inner.borrow().hash.clone()
    }

    fn subscribe(&self, handler: HashChangeHandler) -> Result<ManualListener, LifecycleError> {
        let mut inner = self.inner.borrow_mut();
        inner.subscribe_count += 1;
        if inner.fail_on_subscribe {
            return Err(LifecycleError::Source("simulated subscribe failure".into()));
        }
        inner.next_listener += 1;
        let id = inner.next_listener;
        inner.handlers.push((id, Rc::new(RefCell::new(handler))));
        Ok(ManualListener(id))
    }

    fn release(&self, listener: ManualListener) -> Result<(), LifecycleError> {
        let mut inner = self.inner.borrow_mut();
        inner.release_count += 1;
        if inner.fail_on_release {
            return Err(LifecycleError::Source("simulated release failure".into()));
        }
        inner.handlers.retain(|(id, _)| *id != listener.0);
        Ok(())
    }
}
