use anyhow::Result;
use clap::Parser;
use items_stack::cli::{describe, synth, Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean template.
    let default_filter = if cli.global.is_verbose() {
        "items_stack=debug,items_stack_core=debug"
    } else {
        "items_stack=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Synth(synth_cmd) => {
            synth::run(synth_cmd, &cli.stack, &cli.global)?;
        }
        Commands::Describe(describe_cmd) => {
            describe::run(describe_cmd, &cli.stack, &cli.global)?;
        }
    }

    Ok(())
}
