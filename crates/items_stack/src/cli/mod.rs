//! CLI command definitions.

pub mod describe;
pub mod synth;

use clap::{Parser, Subcommand, ValueEnum};
use items_stack_core::{StackConfig, Topology};

use crate::error::Result;

/// Synthesize the items REST API stack.
#[derive(Debug, Parser)]
#[command(name = "items-stack")]
#[command(version, about = "Synthesize the items REST API stack", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: Global,

    #[command(flatten)]
    pub stack: StackArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Literals the stack is declared from.
#[derive(Debug, Clone, clap::Args)]
pub struct StackArgs {
    /// Name of the stack.
    #[arg(long, global = true, env = "STACK_NAME", default_value = "ItemsStack")]
    pub stack_name: String,

    /// Name of the items table.
    #[arg(long, global = true, env = "ITEMS_TABLE_NAME", default_value = "items")]
    pub table_name: String,

    /// Partition key attribute of the items table.
    #[arg(long, global = true, env = "ITEMS_PARTITION_KEY", default_value = "itemId")]
    pub partition_key: String,

    /// Display name of the REST API.
    #[arg(long, global = true, env = "ITEMS_API_NAME", default_value = "Items Service")]
    pub api_name: String,

    /// Deployment stage of the REST API.
    #[arg(long, global = true, env = "ITEMS_STAGE", default_value = "prod")]
    pub stage: String,
}

impl StackArgs {
    /// Maps the arguments onto a stack configuration.
    pub fn to_config(&self) -> StackConfig {
        StackConfig::default()
            .with_stack_name(&self.stack_name)
            .with_table_name(&self.table_name)
            .with_partition_key(&self.partition_key)
            .with_api_name(&self.api_name)
            .with_stage_name(&self.stage)
    }

    /// Checks the configuration, builds the topology and validates it.
    pub fn declare(&self) -> Result<Topology> {
        let topology = Topology::declare(&self.to_config())?;
        tracing::debug!(
            stack = %topology.stack_name,
            functions = topology.functions.len(),
            grants = topology.grants.len(),
            methods = topology.api.method_count(),
            "Declared topology"
        );
        Ok(topology)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the stack as a deployable JSON template.
    Synth(synth::SynthCommand),
    /// Print the declared resources as a plan.
    Describe(describe::DescribeCommand),
}
