//! # treebridge_stack
//!
//! A tree router configured with plain JSON dictionaries.
//!
//! Routes are registered by name with a config object naming the route
//! `type`, its `options`, an optional `priority` and optional `child_routes`.
//! Children are matched after their parent has consumed its share of the
//! path, which lets one path fan out into per-method branches:
//!
//! ```json
//! {
//!   "type": "segment",
//!   "options": { "route": "/pets/:id" },
//!   "may_terminate": false,
//!   "child_routes": {
//!     "GET":  { "type": "method", "options": { "verb": "GET" } },
//!     "rest": { "type": "regex", "priority": -1, "options": { "regex": "/*$", "spec": "" } }
//!   }
//! }
//! ```
//!
//! Matching returns the full route name (`pet/GET`) and the merged
//! parameters. Assembly walks the same name back down to a path.

mod error;
mod priority;
mod request;
mod route_match;
mod routes;
mod tree;

pub use error::StackError;
pub use request::StackRequest;
pub use route_match::{Params, StackMatch};
pub use tree::TreeRouteStack;
