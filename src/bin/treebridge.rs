use clap::Parser;
use treebridge::cli::{run_cli, Cli};
use treebridge::telemetry::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
