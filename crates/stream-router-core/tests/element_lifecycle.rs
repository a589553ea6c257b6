// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lifecycle tests for the router element delegate.
#![allow(clippy::unwrap_used)]

use stream_router_core::{
    LifecycleError, RouteParams, RouterConfig, RouterPhase, StreamRouterElement,
};
use stream_router_dry_tests::{ManualHashSource, Recorder};

fn element(source: &ManualHashSource) -> StreamRouterElement<ManualHashSource> {
    StreamRouterElement::created(source.clone(), RouterConfig::default()).unwrap()
}

#[test]
fn created_subscribes_once() {
    let source = ManualHashSource::new();
    let el = element(&source);
    assert!(el.is_listening());
    assert_eq!(source.subscribe_count(), 1);
    assert_eq!(source.listener_count(), 1);
}

#[test]
fn navigation_reaches_routes() {
    let source = ManualHashSource::new();
    let el = element(&source);
    let user = Recorder::attach(&el.on_route("/user/:id"));
    let current = Recorder::attach(&el.current_route());

    source.navigate("#user/42");
    source.navigate("#settings");

    let expected: RouteParams = [("id", "42")].into_iter().collect();
    assert_eq!(user.values(), vec![expected.clone()]);
    assert_eq!(current.values(), vec![Some(expected), None]);
}

#[test]
fn start_uses_current_hash_once() {
    let source = ManualHashSource::with_hash("#user/7");
    let el = element(&source);
    let user = Recorder::attach(&el.on_route("/user/:id"));

    el.start();
    el.start();

    assert_eq!(user.len(), 1);
    assert_eq!(user.last().unwrap().get("id"), Some("7"));
    assert_eq!(el.router().phase(), RouterPhase::Started);
    assert_eq!(source.dispatch_count(), 0);
}

#[test]
fn attached_starts_only_when_configured() {
    let source = ManualHashSource::with_hash("#home");
    let passive = element(&source);
    passive.attached();
    assert_eq!(passive.router().navigation_count(), 0);

    let eager = StreamRouterElement::created(
        source.clone(),
        RouterConfig {
            start_on_attach: true,
            ..RouterConfig::default()
        },
    )
    .unwrap();
    let home = Recorder::attach(&eager.on_route("/home"));
    eager.attached();
    eager.attached();
    assert_eq!(home.len(), 1);
}

#[test]
fn detached_releases_subscription() {
    let source = ManualHashSource::new();
    let mut el = element(&source);
    let current = Recorder::attach(&el.current_route());

    el.detached();
    el.detached();
    source.navigate("#anything");

    assert!(!el.is_listening());
    assert_eq!(source.release_count(), 1);
    assert_eq!(source.listener_count(), 0);
    assert!(current.is_empty());
}

#[test]
fn drop_releases_subscription() {
    let source = ManualHashSource::new();
    {
        let _el = element(&source);
        assert_eq!(source.listener_count(), 1);
    }
    assert_eq!(source.listener_count(), 0);
    assert_eq!(source.release_count(), 1);
    source.navigate("#after-drop");
}

#[test]
fn failed_release_is_not_fatal() {
    let source = ManualHashSource::new();
    let mut el = element(&source);
    source.set_fail_on_release(true);
    el.detached();
    assert!(!el.is_listening());
    assert_eq!(source.release_count(), 1);
    drop(el);
    assert_eq!(source.release_count(), 1);
}

#[test]
fn failed_subscribe_surfaces_error() {
    let source = ManualHashSource::new();
    source.set_fail_on_subscribe(true);
    let result = StreamRouterElement::created(source.clone(), RouterConfig::default());
    assert!(matches!(result, Err(LifecycleError::Source(_))));
}

#[test]
fn two_elements_route_independently() {
    let source = ManualHashSource::new();
    let a = element(&source);
    let b = element(&source);
    let in_a = Recorder::attach(&a.on_route("/a"));
    let in_b = Recorder::attach(&b.on_route("/b"));

    source.navigate("#a");

    assert_eq!(in_a.len(), 1);
    assert!(in_b.is_empty());
    assert_eq!(b.router().navigation_count(), 1);
}

#[test]
fn strict_registration_through_element() {
    let source = ManualHashSource::new();
    let el = element(&source);
    assert!(el.try_on_route("/ok/:id").is_ok());
    assert!(el.try_on_route("/bad/:").is_err());
}
