// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `window` `hashchange` listener as a [`HashSource`].

use stream_router_core::{HashChangeEvent, HashChangeHandler, HashSource, LifecycleError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

const HASHCHANGE: &str = "hashchange";

/// Hash source backed by the browser window.
pub struct WindowHashSource {
    window: Window,
}

/// A registered `hashchange` listener. Owns the JS closure; dropping it
/// without [`HashSource::release`] leaves a dangling listener in the page.
pub struct WindowListener {
    closure: Closure<dyn FnMut(web_sys::HashChangeEvent)>,
}

impl WindowHashSource {
    /// Bind to the global `window`.
    pub fn new() -> Result<Self, LifecycleError> {
        web_sys::window()
            .map(|window| Self { window })
            .ok_or_else(|| LifecycleError::Unavailable("no global `window`".into()))
    }
}

impl HashSource for WindowHashSource {
    type Listener = WindowListener;

    fn current_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn subscribe(&self, mut handler: HashChangeHandler) -> Result<WindowListener, LifecycleError> {
        let closure = Closure::<dyn FnMut(web_sys::HashChangeEvent)>::new(
            move |event: web_sys::HashChangeEvent| {
                handler(&HashChangeEvent::new(event.new_url()).with_old_url(event.old_url()));
            },
        );
        self.window
            .add_event_listener_with_callback(HASHCHANGE, closure.as_ref().unchecked_ref())
            .map_err(source_error)?;
        Ok(WindowListener { closure })
    }

    fn release(&self, listener: WindowListener) -> Result<(), LifecycleError> {
        self.window
            .remove_event_listener_with_callback(
                HASHCHANGE,
                listener.closure.as_ref().unchecked_ref(),
            )
            .map_err(|err| {
                web_sys::console::warn_2(&"stream-router: hashchange cleanup failed".into(), &err);
                source_error(err)
            })
    }
}

fn source_error(err: JsValue) -> LifecycleError {
    LifecycleError::Source(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
