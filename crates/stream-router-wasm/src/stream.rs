// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JS-facing wrapper over route streams.

use js_sys::Function;
use serde::Serialize;
use stream_router_core::{CurrentRouteStream, RouteParams, RouteStream, SubscriptionId};
use wasm_bindgen::prelude::*;

enum Inner {
    Route(RouteStream),
    Current(CurrentRouteStream),
}

/// A route or current-route stream handed to JS.
///
/// Callbacks receive a plain `{name: value}` object, or `null` on the
/// current-route stream when nothing matched.
#[wasm_bindgen]
pub struct ParamStream {
    inner: Inner,
}

impl ParamStream {
    fn unsubscribe_raw(&self, id: SubscriptionId) -> bool {
        match &self.inner {
            Inner::Route(stream) => stream.unsubscribe(id),
            Inner::Current(stream) => stream.unsubscribe(id),
        }
    }

    pub(crate) fn route(stream: RouteStream) -> Self {
        Self {
            inner: Inner::Route(stream),
        }
    }

    pub(crate) fn current(stream: CurrentRouteStream) -> Self {
        Self {
            inner: Inner::Current(stream),
        }
    }
}

#[wasm_bindgen]
impl ParamStream {
    /// Call `callback(params)` for every future value. Returns an id for
    /// `unsubscribe`; ids are plain JS numbers.
    pub fn subscribe(&self, callback: Function) -> Result<u32, JsValue> {
        let id = match &self.inner {
            Inner::Route(stream) => {
                stream.subscribe(move |params: &RouteParams| deliver(&callback, Some(params)))
            }
            Inner::Current(stream) => stream
                .subscribe(move |params: &Option<RouteParams>| deliver(&callback, params.as_ref())),
        };
        u32::try_from(id).map_err(|_| {
            self.unsubscribe_raw(id);
            js_sys::RangeError::new("stream-router: subscription ids exhausted").into()
        })
    }

    /// Remove a callback. Returns `false` for unknown ids.
    pub fn unsubscribe(&self, id: u32) -> bool {
        self.unsubscribe_raw(SubscriptionId::from(id))
    }

    /// Most recent value, `undefined` before the first emission.
    #[wasm_bindgen(getter)]
    pub fn latest(&self) -> JsValue {
        match &self.inner {
            Inner::Route(stream) => stream
                .latest()
                .map_or(JsValue::UNDEFINED, |p| params_to_js(Some(&p))),
            Inner::Current(stream) => stream
                .latest()
                .map_or(JsValue::UNDEFINED, |p| params_to_js(p.as_ref())),
        }
    }
}

fn deliver(callback: &Function, params: Option<&RouteParams>) {
    if let Err(err) = callback.call1(&JsValue::NULL, &params_to_js(params)) {
        web_sys::console::error_2(&"stream-router: route callback threw".into(), &err);
    }
}

/// Convert params to a plain JS object (`null` for `None`).
pub fn params_to_js(params: Option<&RouteParams>) -> JsValue {
    let Some(params) = params else {
        return JsValue::NULL;
    };
    params
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or_else(|err| {
            web_sys::console::warn_1(&format!("stream-router: params conversion failed: {err}").into());
            JsValue::NULL
        })
}
