// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! wasm-bindgen delegate for the `<stream-router>` custom element.
//!
//! The JS element class owns a [`StreamRouter`] and forwards its lifecycle
//! callbacks (`attachedCallback`, `detachedCallback`); construction plays the
//! role of `createdCallback`. Element registration itself stays on the JS
//! side.
//!
//! ```js
//! class StreamRouterElement extends HTMLElement {
//!   constructor() { super(); this.router = new StreamRouter(this.getAttribute("config")); }
//!   connectedCallback() { this.router.attachedCallback(); }
//!   disconnectedCallback() { this.router.detachedCallback(); }
//! }
//! ```
#![deny(missing_docs)]

pub mod source;
pub mod stream;

use std::fmt::Display;

use stream_router_core::{RouterConfig, StreamRouterElement};
use wasm_bindgen::prelude::*;

pub use source::{WindowHashSource, WindowListener};
pub use stream::{params_to_js, ParamStream};

#[cfg(feature = "console-panic")]
#[wasm_bindgen(start)]
/// Initialize console panic hook for better error messages in browser.
pub fn init_console_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Router state behind one `<stream-router>` element.
#[wasm_bindgen]
pub struct StreamRouter {
    element: StreamRouterElement<WindowHashSource>,
}

#[wasm_bindgen]
impl StreamRouter {
    /// Create the router and subscribe to `window` hash changes.
    ///
    /// `config` is an optional JSON object (see `RouterConfig`); a missing or
    /// blank value uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<StreamRouter, JsValue> {
        let config = RouterConfig::from_json(config.as_deref().unwrap_or_default())
            .map_err(js_error)?;
        let source = WindowHashSource::new().map_err(js_error)?;
        let element = StreamRouterElement::created(source, config).map_err(js_error)?;
        Ok(StreamRouter { element })
    }

    /// Forwarded from the element's attach callback.
    #[wasm_bindgen(js_name = attachedCallback)]
    pub fn attached_callback(&self) {
        self.element.attached();
    }

    /// Forwarded from the element's detach callback; stops listening.
    #[wasm_bindgen(js_name = detachedCallback)]
    pub fn detached_callback(&mut self) {
        self.element.detached();
    }

    /// Register `pattern` and return its stream. Same pattern, same stream.
    #[wasm_bindgen(js_name = onRoute)]
    pub fn on_route(&self, pattern: &str) -> ParamStream {
        ParamStream::route(self.element.on_route(pattern))
    }

    /// Like `onRoute`, but throws on empty segments or unnamed parameters.
    #[wasm_bindgen(js_name = tryOnRoute)]
    pub fn try_on_route(&self, pattern: &str) -> Result<ParamStream, JsValue> {
        self.element
            .try_on_route(pattern)
            .map(ParamStream::route)
            .map_err(js_error)
    }

    /// Route the current `location.hash` once.
    pub fn start(&self) {
        self.element.start();
    }

    /// Stream of params (or `null`) for every hash change.
    #[wasm_bindgen(getter, js_name = currentRoute)]
    pub fn current_route(&self) -> ParamStream {
        ParamStream::current(self.element.current_route())
    }

    /// True while subscribed to `hashchange`.
    #[wasm_bindgen(getter, js_name = isListening)]
    pub fn is_listening(&self) -> bool {
        self.element.is_listening()
    }
}
