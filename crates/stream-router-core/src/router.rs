// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hash router: pattern registration and hash-change dispatch.
//!
//! # Dispatch order
//!
//! Every hash change is stamped with a fresh [`NavigationId`] and published
//! once, on a single internal channel, together with the trie node it
//! resolved to. The current-route stream and every pattern stream are derived
//! from that one channel:
//!
//! 1. current-route subscribers see every navigation,
//! 2. a pattern stream forwards only navigations whose node is its own.
//!
//! A navigation started from inside a subscriber is queued behind the one in
//! flight, so both consumers observe navigations in the same order and no
//! match is dropped.

use std::cell::RefCell;

use tracing::{debug, instrument, trace, warn};

use crate::config::RouterConfig;
use crate::hash::HashChangeEvent;
use crate::params::RouteParams;
use crate::pattern::{Pattern, PatternError};
use crate::signal::{Emitter, Stream};
use crate::trie::{NodeId, RouteTrie};

/// Monotonic stamp of one handled hash change (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationId(u64);

impl NavigationId {
    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Per-pattern stream: one value per matching navigation.
pub type RouteStream = Stream<RouteParams>;

/// Current-route stream: one value per navigation, `None` when unmatched.
pub type CurrentRouteStream = Stream<Option<RouteParams>>;

/// Router lifecycle. `Uninitialized → Started` happens once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPhase {
    /// `start()` has not run.
    Uninitialized,
    /// The initial synthetic navigation has been dispatched.
    Started,
}

#[derive(Debug, Clone)]
struct Navigation {
    navigation: NavigationId,
    node: Option<NodeId>,
    params: Option<RouteParams>,
}

#[derive(Debug)]
struct RouterState {
    trie: RouteTrie<RouteStream>,
    phase: RouterPhase,
    navigations: u64,
}

/// Owns one route trie and one current-route signal.
///
/// Registration and dispatch take `&self`; state lives behind a `RefCell`
/// that is never held across an emission, so subscribers may call back into
/// the router.
#[derive(Debug)]
pub struct Router {
    state: RefCell<RouterState>,
    current: Emitter<Navigation>,
    current_route: CurrentRouteStream,
    config: RouterConfig,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with default config.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Router with the given config.
    pub fn with_config(config: RouterConfig) -> Self {
        let current = Emitter::new();
        let current_route = current
            .stream()
            .map(|nav: &Navigation| nav.params.clone());
        Self {
            state: RefCell::new(RouterState {
                trie: RouteTrie::new(),
                phase: RouterPhase::Uninitialized,
                navigations: 0,
            }),
            current,
            current_route,
            config,
        }
    }

    /// Active config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register `pattern` (lenient) and return its stream.
    ///
    /// Registering the same pattern again returns the same stream.
    pub fn on_route(&self, pattern: &str) -> RouteStream {
        self.register(pattern, &Pattern::lenient(pattern))
    }

    /// Like [`Router::on_route`] but rejects malformed patterns.
    pub fn try_on_route(&self, pattern: &str) -> Result<RouteStream, PatternError> {
        let parsed = Pattern::parse(pattern)?;
        Ok(self.register(pattern, &parsed))
    }

    /// Stream of matched params (or `None`) for every navigation.
    pub fn current_route(&self) -> CurrentRouteStream {
        self.current_route.clone()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> RouterPhase {
        self.state.borrow().phase
    }

    /// Number of hash changes handled so far.
    pub fn navigation_count(&self) -> u64 {
        self.state.borrow().navigations
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.state.borrow().trie.len()
    }

    /// Dispatch a synthetic hash change for `current_hash` the first time it
    /// is called; later calls do nothing.
    #[instrument(skip(self))]
    pub fn start(&self, current_hash: &str) {
        {
            let mut state = self.state.borrow_mut();
            if state.phase == RouterPhase::Started {
                trace!("router already started");
                return;
            }
            state.phase = RouterPhase::Started;
        }
        debug!("router started");
        self.handle_hash_change(&HashChangeEvent::new(current_hash));
    }

    /// Match the event's path and publish the result.
    pub fn handle_hash_change(&self, event: &HashChangeEvent) {
        let path = event.path();
        let navigation = {
            let mut state = self.state.borrow_mut();
            state.navigations += 1;
            let id = NavigationId(state.navigations);
            let hit = state
                .trie
                .resolve(path)
                .filter(|(node, _)| state.trie.node(*node).handle().is_some());
            match hit {
                Some((node, params)) => {
                    trace!(path, navigation = id.get(), "route matched");
                    Navigation {
                        navigation: id,
                        node: Some(node),
                        params: Some(params),
                    }
                }
                None => {
                    if self.config.log_unmatched {
                        debug!(path, navigation = id.get(), "no route matched");
                    }
                    Navigation {
                        navigation: id,
                        node: None,
                        params: None,
                    }
                }
            }
        };
        self.current.emit(navigation);
    }

    fn register(&self, raw: &str, pattern: &Pattern) -> RouteStream {
        let mut state = self.state.borrow_mut();
        let registration = state.trie.register_pattern(pattern);
        let names = pattern.param_names();
        if self.config.warn_on_param_collision && registration.renamed_params(&names) {
            warn!(
                pattern = raw,
                previous = ?registration.previous_names,
                current = ?names,
                "pattern shares a wildcard slot; parameter names overwritten"
            );
        }
        if let Some(stream) = state.trie.node(registration.node).handle() {
            return stream.clone();
        }
        let stream = self.open_stream(registration.node);
        state
            .trie
            .node_mut(registration.node)
            .set_handle(stream.clone());
        debug!(pattern = raw, node = registration.node.index(), "route registered");
        stream
    }

    fn open_stream(&self, node: NodeId) -> RouteStream {
        self.current.stream().filter_map(move |nav: &Navigation| {
            if nav.node == Some(node) {
                trace!(navigation = nav.navigation.get(), node = node.index(), "pattern hit");
                nav.params.clone()
            } else {
                None
            }
        })
    }
}
