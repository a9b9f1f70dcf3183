//! # Adapter Module
//!
//! Bridges [`Route`](crate::Route) declarations to a tree router configured
//! with JSON dictionaries.
//!
//! ## Registration
//!
//! A route restricted to methods `{M1..Mn}` becomes one segment route with
//! `may_terminate: false` and n + 1 children: a `method` child per allowed
//! method carrying the middleware, and a `method_not_allowed` regex child at
//! priority -1 that swallows any other method on the same path. A route that
//! accepts any method becomes a single terminating segment route.
//!
//! ## Matching
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Adapter as TreeRouter
//!     participant Stack as RouteStack
//!
//!     Caller->>Adapter: match_request(http::Request)
//!     Adapter->>Adapter: to_stack_request()
//!     Adapter->>Stack: match_request(StackRequest)
//!     alt no match
//!         Adapter-->>Caller: Failure (not a method failure)
//!     else method_not_allowed child matched
//!         Adapter-->>Caller: Failure (allowed methods for the path)
//!     else method child matched
//!         Adapter-->>Caller: Success (route name, middleware, params)
//!     end
//! ```
//!
//! ## URI generation
//!
//! Route names are mapped to the stack name of their first method child
//! (`/foo^GET` → `/foo^GET/GET`) and assembled by the stack.

mod config;
mod core;
mod request;
mod stack;
#[cfg(test)]
mod tests;

pub use self::config::{
    method_not_allowed_config, method_route_config, route_config, METHOD_NOT_ALLOWED_ROUTE,
    MIDDLEWARE_PARAM,
};
pub use self::core::TreeRouter;
pub use self::request::to_stack_request;
pub use self::stack::RouteStack;
