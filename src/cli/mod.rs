//! # CLI Module
//!
//! Command-line access to a route table, mainly for checking what the
//! adapter registers and how requests resolve.
//!
//! ## Commands
//!
//! ```bash
//! # Print the router config generated for every route
//! treebridge routes --file routes.yaml
//!
//! # Resolve a request and print the RouteResult as JSON
//! treebridge match --file routes.yaml --method POST --path '/foo?x=1'
//!
//! # Generate a URI for a named route
//! treebridge uri --file routes.yaml --name foo --param id=bar
//! ```
//!
//! Logging goes to stderr and is configured through the environment, see
//! [`telemetry`](crate::telemetry).

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
