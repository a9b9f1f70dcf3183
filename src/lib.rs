//! # treebridge
//!
//! **treebridge** maps router-agnostic route declarations onto a tree router
//! that is configured with JSON dictionaries, and maps the router's answers
//! back.
//!
//! ## Overview
//!
//! The crate does no path matching of its own. It:
//!
//! - turns a [`Route`] (path, allowed methods, middleware name, optional name
//!   and options) into the router's config dictionary and registers it,
//! - turns the router's match for an `http::Request` into a [`RouteResult`],
//!   telling "no such path" apart from "path exists, wrong method",
//! - turns a route name plus substitutions into a path.
//!
//! The router itself lives in the `treebridge_stack` crate and is reached
//! only through the [`RouteStack`] trait.
//!
//! ## Modules
//!
//! - **[`route`]** - [`Route`], [`HttpMethods`], [`RouteOptions`]
//! - **[`result`]** - [`RouteResult`]
//! - **[`adapter`]** - [`TreeRouter`], the config mapping and [`RouteStack`]
//! - **[`routes_file`]** - YAML/JSON route tables
//! - **[`telemetry`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `treebridge` command line
//!
//! ## Quick Start
//!
//! ```rust
//! use http::{Method, Request};
//! use serde_json::json;
//! use treebridge::{HttpMethods, Route, TreeRouter};
//!
//! let mut router = TreeRouter::new();
//! router
//!     .add_route(&Route::new("/pets/:id", "get_pet", Method::GET).with_name("pet"))
//!     .unwrap();
//! router
//!     .add_route(&Route::new("/pets", "pets", HttpMethods::only([Method::GET, Method::POST])))
//!     .unwrap();
//!
//! let result = router.match_request(&Request::get("/pets/42").body(()).unwrap());
//! assert_eq!(result.matched_route_name(), Some("pet"));
//! assert_eq!(result.matched_middleware(), Some("get_pet"));
//! assert_eq!(result.matched_params().unwrap()["id"], "42");
//!
//! let result = router.match_request(&Request::delete("/pets").body(()).unwrap());
//! assert!(result.is_method_failure());
//! assert_eq!(result.allowed_methods(), &[Method::GET, Method::POST]);
//!
//! let mut params = serde_json::Map::new();
//! params.insert("id".into(), json!("7"));
//! assert_eq!(router.generate_uri("pet", &params).unwrap(), "/pets/7");
//! ```

pub mod adapter;
pub mod cli;
pub mod result;
pub mod route;
pub mod routes_file;
pub mod telemetry;

pub use adapter::{RouteStack, TreeRouter};
pub use result::RouteResult;
pub use route::{HttpMethods, Route, RouteOptions, HTTP_METHOD_SEPARATOR};
pub use treebridge_stack::{Params, StackError, StackMatch, StackRequest, TreeRouteStack};
