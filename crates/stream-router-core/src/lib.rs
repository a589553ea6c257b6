// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hash-fragment router core.
//!
//! Maps the URL hash fragment onto application-registered route patterns and
//! exposes every pattern as a synchronous stream of matched parameters.
//!
//! # Modules
//!
//! - [`pattern`] - Pattern segmentation (lenient) and validation (strict)
//! - [`trie`] - Route trie: literal children, one wildcard slot per node
//! - [`params`] - Ordered name → value mapping produced by a match
//! - [`signal`] - Push-based emitters and derived streams (FIFO, synchronous)
//! - [`router`] - Pattern registration and hash-change dispatch
//! - [`hash`] - Hash-change events and fragment extraction
//! - [`element`] - Custom-element lifecycle delegate over a hash source
//! - [`config`] - JSON-backed router configuration
//!
//! Everything here is single-threaded by construction (`Rc`/`RefCell`); a
//! router and its streams cannot cross threads.

pub mod config;
pub mod element;
pub mod hash;
pub mod params;
pub mod pattern;
pub mod router;
pub mod signal;
pub mod trie;

pub use config::{ConfigError, RouterConfig};
pub use element::{HashChangeHandler, HashSource, LifecycleError, StreamRouterElement};
pub use hash::{hash_path, HashChangeEvent};
pub use params::RouteParams;
pub use pattern::{Pattern, PatternError, Segment};
pub use router::{CurrentRouteStream, NavigationId, RouteStream, Router, RouterPhase};
pub use signal::{Emitter, Stream, SubscriptionId};
pub use trie::{NodeId, Registration, RouteNode, RouteTrie, TrieMatch};
