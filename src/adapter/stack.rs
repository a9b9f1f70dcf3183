use serde_json::Value;
use treebridge_stack::{Params, StackError, StackMatch, StackRequest, TreeRouteStack};

/// The operations the adapter needs from a tree router
///
/// Implemented for [`TreeRouteStack`]; tests substitute recording doubles.
pub trait RouteStack {
    /// Register `config` under `name`
    fn add_route(&mut self, name: &str, config: Value) -> Result<(), StackError>;

    /// Match a request, `None` when nothing matches
    fn match_request(&self, request: &StackRequest) -> Option<StackMatch>;

    /// Assemble the path of the route called `name`
    fn assemble(&self, params: &Params, name: &str) -> Result<String, StackError>;
}

impl RouteStack for TreeRouteStack {
    fn add_route(&mut self, name: &str, config: Value) -> Result<(), StackError> {
        TreeRouteStack::add_route(self, name, &config)
    }

    fn match_request(&self, request: &StackRequest) -> Option<StackMatch> {
        TreeRouteStack::match_request(self, request)
    }

    fn assemble(&self, params: &Params, name: &str) -> Result<String, StackError> {
        TreeRouteStack::assemble(self, params, name)
    }
}
