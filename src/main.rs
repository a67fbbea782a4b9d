use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use fridgetrack::cli::Cli;

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.run()
}
