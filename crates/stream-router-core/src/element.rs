// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Custom-element lifecycle delegate.
//!
//! The host element (a browser custom element, or a test harness) forwards
//! its lifecycle callbacks here. The delegate owns one [`Router`] and one
//! subscription on a [`HashSource`]:
//!
//! - creation builds the router and subscribes to hash changes,
//! - `attached` optionally starts the router,
//! - `detached` (and drop) releases the subscription.

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::RouterConfig;
use crate::hash::HashChangeEvent;
use crate::pattern::PatternError;
use crate::router::{CurrentRouteStream, RouteStream, Router};

/// Callback a [`HashSource`] invokes for every hash change.
pub type HashChangeHandler = Box<dyn FnMut(&HashChangeEvent)>;

/// Failure to subscribe to or release a hash source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The environment has no hash-change source (e.g. no `window`).
    #[error("hash source unavailable: {0}")]
    Unavailable(String),
    /// The source refused the subscribe/release call.
    #[error("hash source error: {0}")]
    Source(String),
}

/// Process-wide hash-change notification source.
pub trait HashSource {
    /// Token that identifies one subscription.
    type Listener;

    /// Current fragment including the leading `#` (may be empty).
    fn current_hash(&self) -> String;

    /// Start delivering hash changes to `handler`.
    fn subscribe(&self, handler: HashChangeHandler) -> Result<Self::Listener, LifecycleError>;

    /// Stop delivering to the subscription identified by `listener`.
    fn release(&self, listener: Self::Listener) -> Result<(), LifecycleError>;
}

/// State-holding delegate behind a `<stream-router>` element.
pub struct StreamRouterElement<S: HashSource> {
    source: S,
    router: Rc<Router>,
    listener: Option<S::Listener>,
}

impl<S: HashSource> StreamRouterElement<S> {
    /// The element's `created` hook: build the router and subscribe.
    #[instrument(skip(source))]
    pub fn created(source: S, config: RouterConfig) -> Result<Self, LifecycleError> {
        let router = Rc::new(Router::with_config(config));
        let weak = Rc::downgrade(&router);
        let listener = source.subscribe(Box::new(move |event: &HashChangeEvent| {
            if let Some(router) = weak.upgrade() {
                router.handle_hash_change(event);
            }
        }))?;
        debug!("stream router created");
        Ok(Self {
            source,
            router,
            listener: Some(listener),
        })
    }

    /// The element's `attached` hook.
    pub fn attached(&self) {
        if self.router.config().start_on_attach {
            self.start();
        }
    }

    /// The element's `detached` hook: release the hash-source subscription.
    ///
    /// A failed release is logged and otherwise ignored. Calling this twice
    /// is harmless.
    #[instrument(skip(self))]
    pub fn detached(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        match self.source.release(listener) {
            Ok(()) => debug!("hash listener released"),
            Err(err) => warn!(error = %err, "hash listener cleanup failed"),
        }
    }

    /// True while subscribed to the hash source.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// See [`Router::on_route`].
    pub fn on_route(&self, pattern: &str) -> RouteStream {
        self.router.on_route(pattern)
    }

    /// See [`Router::try_on_route`].
    pub fn try_on_route(&self, pattern: &str) -> Result<RouteStream, PatternError> {
        self.router.try_on_route(pattern)
    }

    /// Start routing from the source's current hash (once).
    pub fn start(&self) {
        self.router.start(&self.source.current_hash());
    }

    /// See [`Router::current_route`].
    pub fn current_route(&self) -> CurrentRouteStream {
        self.router.current_route()
    }

    /// Shared handle to the underlying router.
    pub fn router(&self) -> Rc<Router> {
        Rc::clone(&self.router)
    }

    /// The hash source this element listens to.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: HashSource> Drop for StreamRouterElement<S> {
    fn drop(&mut self) {
        self.detached();
    }
}
