use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::{Method, Request};
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::adapter::route_config;
use crate::routes_file::{load_router, RouteTable};
use treebridge_stack::Params;

/// Command-line interface for treebridge
#[derive(Parser)]
#[command(name = "treebridge")]
#[command(about = "Inspect and exercise treebridge route tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the router config generated for each route
    Routes {
        /// Route table (YAML, or JSON by extension)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Match a request and print the result
    Match {
        /// Route table (YAML, or JSON by extension)
        #[arg(short, long)]
        file: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, optionally with a query string
        #[arg(short, long)]
        path: String,
    },
    /// Generate the URI of a named route
    Uri {
        /// Route table (YAML, or JSON by extension)
        #[arg(short, long)]
        file: PathBuf,

        /// Route name
        #[arg(short, long)]
        name: String,

        /// Substitution as key=value; repeatable
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

/// Run a command and return what it prints
pub fn execute(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Routes { file } => {
            let routes = RouteTable::from_path(file)?.to_routes()?;
            let entries: Vec<Value> = routes
                .iter()
                .map(|route| json!({ "name": route.name(), "config": route_config(route) }))
                .collect();
            Ok(serde_json::to_string_pretty(&entries)?)
        }
        Commands::Match { file, method, path } => {
            let router = load_router(file)?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid HTTP method '{method}'"))?;
            let request = Request::builder()
                .method(method)
                .uri(path.as_str())
                .body(())
                .with_context(|| format!("invalid request path '{path}'"))?;
            let result = router.match_request(&request);
            Ok(serde_json::to_string_pretty(&result)?)
        }
        Commands::Uri { file, name, params } => {
            let router = load_router(file)?;
            let substitutions: Params = params
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            router
                .generate_uri(name, &substitutions)
                .with_context(|| format!("failed to generate URI for route '{name}'"))
        }
    }
}

/// Run a command and print its output to stdout
pub fn run_cli(cli: Cli) -> Result<()> {
    let output = execute(&cli)?;
    println!("{output}");
    Ok(())
}
