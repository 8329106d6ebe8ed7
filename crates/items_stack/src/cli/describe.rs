use items_stack_core::{format_topology, Topology};

use super::{Global, OutputFormat, StackArgs};
use crate::error::Result;
use crate::output::json::{describe_report, format_json};
use crate::output::pretty::{aprintln, colorize_plan, p_c};

/// Print the declared resources as a plan.
#[derive(Debug, clap::Parser)]
pub struct DescribeCommand {
    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,
}

/// Renders `topology` in the requested format.
pub fn render(topology: &Topology, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(&describe_report(topology)),
        OutputFormat::Pretty => Ok(colorize_plan(&format_topology(topology)).join("\n")),
    }
}

/// Main entry point for the describe command.
pub fn run(command: DescribeCommand, stack: &StackArgs, global: &Global) -> Result<()> {
    let topology = stack.declare()?;
    tracing::info!(stack = %topology.stack_name, "Describing stack");

    let rendered = render(&topology, command.format)?;
    match command.format {
        OutputFormat::Json => println!("{}", rendered),
        OutputFormat::Pretty => {
            if !global.is_silent() {
                aprintln!("{} {}", p_c("Stack:"), topology.stack_name);
                aprintln!();
            }
            aprintln!("{}", rendered);
        }
    }

    Ok(())
}
