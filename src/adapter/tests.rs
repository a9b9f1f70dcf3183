use http::{Method, Request};
use serde_json::{json, Value};
use std::cell::RefCell;
use treebridge_stack::{Params, StackError, StackMatch, StackRequest};

use super::{route_config, RouteStack, TreeRouter, METHOD_NOT_ALLOWED_ROUTE};
use crate::route::{HttpMethods, Route, RouteOptions};

/// Stack double that records registrations and replays a canned match
#[derive(Default)]
struct RecordingStack {
    added: Vec<(String, Value)>,
    next_match: Option<StackMatch>,
    seen_requests: RefCell<Vec<StackRequest>>,
    assembled: RefCell<Vec<(Params, String)>>,
}

impl RouteStack for RecordingStack {
    fn add_route(&mut self, name: &str, config: Value) -> Result<(), StackError> {
        self.added.push((name.to_string(), config));
        Ok(())
    }

    fn match_request(&self, request: &StackRequest) -> Option<StackMatch> {
        self.seen_requests.borrow_mut().push(request.clone());
        self.next_match.clone()
    }

    fn assemble(&self, params: &Params, name: &str) -> Result<String, StackError> {
        self.assembled
            .borrow_mut()
            .push((params.clone(), name.to_string()));
        Ok("/assembled".to_string())
    }
}

fn foo_request() -> Request<()> {
    Request::builder()
        .method(Method::GET)
        .uri("http://www.example.com/foo?page=2")
        .header("accept", "application/json")
        .body(())
        .unwrap()
}

#[test]
fn test_adding_route_proxies_to_stack() {
    let mut router = TreeRouter::with_stack(RecordingStack::default());
    router
        .add_route(&Route::new("/foo", "foo", Method::GET))
        .unwrap();

    let added = &router.stack().added;
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].0, "/foo^GET");
    assert_eq!(
        added[0].1,
        json!({
            "type": "segment",
            "options": { "route": "/foo" },
            "may_terminate": false,
            "child_routes": {
                "GET": {
                    "type": "method",
                    "options": {
                        "verb": "GET",
                        "defaults": { "middleware": "foo" },
                    },
                },
                METHOD_NOT_ALLOWED_ROUTE: {
                    "type": "regex",
                    "priority": -1,
                    "options": {
                        "regex": "/*$",
                        "defaults": { METHOD_NOT_ALLOWED_ROUTE: "/foo" },
                        "spec": "",
                    },
                },
            },
        })
    );
}

#[test]
fn test_route_options_are_passed_through() {
    let route = Route::new("/foo/:id", "foo", Method::GET).with_options(
        RouteOptions::default()
            .with_constraint("id", r"\d+")
            .with_default("bar", "baz"),
    );
    let mut router = TreeRouter::with_stack(RecordingStack::default());
    router.add_route(&route).unwrap();

    let (name, config) = &router.stack().added[0];
    assert_eq!(name, "/foo/:id^GET");
    assert_eq!(
        config["options"],
        json!({
            "route": "/foo/:id",
            "constraints": { "id": r"\d+" },
            "defaults": { "bar": "baz" },
        })
    );
    assert_eq!(
        config["child_routes"][METHOD_NOT_ALLOWED_ROUTE]["options"]["defaults"],
        json!({ METHOD_NOT_ALLOWED_ROUTE: "/foo/:id" })
    );
}

#[test]
fn test_one_branch_per_method_plus_one_fallback() {
    for methods in [
        vec![Method::GET],
        vec![Method::POST, Method::DELETE],
        vec![Method::GET, Method::PUT, Method::PATCH, Method::DELETE],
    ] {
        let count = methods.len();
        let config = route_config(&Route::new("/r", "r", HttpMethods::only(methods)));
        let children = config["child_routes"].as_object().unwrap();

        let method_branches = children
            .values()
            .filter(|c| c["type"] == "method")
            .count();
        let fallbacks = children
            .values()
            .filter(|c| c["priority"] == -1 && c["type"] == "regex")
            .count();
        assert_eq!(method_branches, count);
        assert_eq!(fallbacks, 1);
        assert_eq!(children.len(), count + 1);
    }
}

#[test]
fn test_any_method_route_is_a_plain_segment() {
    let route = Route::new("/bar/:baz", "bar", HttpMethods::Any)
        .with_options(RouteOptions::default().with_default("page", 1));
    assert_eq!(
        route_config(&route),
        json!({
            "type": "segment",
            "options": {
                "route": "/bar/:baz",
                "defaults": { "page": 1, "middleware": "bar" },
            },
        })
    );
}

#[test]
fn test_second_registration_of_a_path_shares_the_fallback() {
    let mut router = TreeRouter::with_stack(RecordingStack::default());
    router
        .add_route(&Route::new("/foo", "foo", Method::POST).with_name("foo-create"))
        .unwrap();
    router
        .add_route(&Route::new("/foo", "foo", Method::GET).with_name("foo-list"))
        .unwrap();

    let added = &router.stack().added;
    assert!(added[0].1["child_routes"]
        .get(METHOD_NOT_ALLOWED_ROUTE)
        .is_some());
    assert!(added[1].1["child_routes"]
        .get(METHOD_NOT_ALLOWED_ROUTE)
        .is_none());
    assert_eq!(
        router.allowed_methods("/foo"),
        Some(&[Method::POST, Method::GET][..])
    );
}

#[test]
fn test_replaced_fallback_owner_hands_the_fallback_on() {
    let mut router = TreeRouter::with_stack(RecordingStack::default());
    router
        .add_route(&Route::new("/foo", "foo", Method::POST).with_name("foo-create"))
        .unwrap();
    router
        .add_route(&Route::new("/foo", "foo", Method::GET).with_name("foo-list"))
        .unwrap();
    router
        .add_route(&Route::new("/elsewhere", "foo", Method::POST).with_name("foo-create"))
        .unwrap();

    let added = &router.stack().added;
    assert_eq!(added.len(), 4);
    assert_eq!(added[2].0, "foo-create");
    assert!(added[2].1["child_routes"]
        .get(METHOD_NOT_ALLOWED_ROUTE)
        .is_some());
    assert_eq!(added[3].0, "foo-list");
    assert_eq!(
        added[3].1["child_routes"][METHOD_NOT_ALLOWED_ROUTE]["options"]["defaults"]
            [METHOD_NOT_ALLOWED_ROUTE],
        "/foo"
    );
    assert_eq!(router.allowed_methods("/foo"), Some(&[Method::GET][..]));
    assert_eq!(
        router.allowed_methods("/elsewhere"),
        Some(&[Method::POST][..])
    );
}

#[test]
fn test_successful_match_is_possible() {
    let mut params = Params::new();
    params.insert("middleware".to_string(), json!("bar"));
    let stack = RecordingStack {
        next_match: Some(StackMatch::new("/foo", params)),
        ..Default::default()
    };
    let router = TreeRouter::with_stack(stack);

    let result = router.match_request(&foo_request());
    assert!(result.is_success());
    assert_eq!(result.matched_route_name(), Some("/foo"));
    assert_eq!(result.matched_middleware(), Some("bar"));

    let seen = router.stack().seen_requests.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method(), &Method::GET);
    assert_eq!(seen[0].path(), "/foo");
    assert_eq!(seen[0].query_param("page"), Some("2"));
    assert_eq!(seen[0].headers()["accept"], "application/json");
}

#[test]
fn test_non_successful_match_not_due_to_http_method() {
    let router = TreeRouter::with_stack(RecordingStack::default());
    let result = router.match_request(&foo_request());
    assert!(result.is_failure());
    assert!(!result.is_method_failure());
}

#[test]
fn test_match_without_middleware_falls_back_to_registered_middleware() {
    let mut stack = RecordingStack::default();
    stack.next_match = Some(StackMatch::new("/foo^GET/GET", Params::new()));
    let mut router = TreeRouter::with_stack(stack);
    router
        .add_route(&Route::new("/foo", "foo", Method::GET))
        .unwrap();

    let result = router.match_request(&foo_request());
    assert_eq!(result.matched_route_name(), Some("/foo^GET"));
    assert_eq!(result.matched_middleware(), Some("foo"));
}

#[test]
fn test_match_without_any_middleware_is_a_failure() {
    let stack = RecordingStack {
        next_match: Some(StackMatch::new("unknown", Params::new())),
        ..Default::default()
    };
    let router = TreeRouter::with_stack(stack);
    let result = router.match_request(&foo_request());
    assert!(result.is_failure());
    assert!(!result.is_method_failure());
}

#[test]
fn test_generate_uri_uses_method_child_name() {
    let mut router = TreeRouter::with_stack(RecordingStack::default());
    router
        .add_route(&Route::new("/foo/:id", "foo", Method::GET).with_name("foo"))
        .unwrap();

    let mut params = Params::new();
    params.insert("id".to_string(), json!("bar"));
    assert_eq!(router.generate_uri("foo", &params).unwrap(), "/assembled");
    assert_eq!(router.generate_uri("other", &Params::new()).unwrap(), "/assembled");

    let assembled = router.stack().assembled.borrow();
    assert_eq!(assembled[0].1, "foo/GET");
    assert_eq!(assembled[0].0["id"], "bar");
    assert_eq!(assembled[1].1, "other");
}
