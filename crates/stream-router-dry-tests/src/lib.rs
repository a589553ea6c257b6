// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for stream-router crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`hash_source`] - Manually driven hash-change source with call counters
//! - [`recorder`] - Collects every value a stream emits

pub mod hash_source;
pub mod recorder;

pub use hash_source::{ManualHashSource, ManualListener, BASE_URL};
pub use recorder::Recorder;
