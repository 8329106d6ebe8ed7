use std::path::{Path, PathBuf};

use items_stack_core::{synthesize, Topology};

use super::{Global, StackArgs};
use crate::error::{Result, StackError};
use crate::output::pretty::{aprintln, p_b, p_g};

/// Render the stack as a JSON template.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Render the stack as a deployable JSON template.

The template declares the items table, the five CRUD functions with their
roles and table grants, and the REST API with its routes and preflight
responses. Hand it to the provisioning engine to create or update the
live resources.

The template is written to stdout unless --out is given.")]
pub struct SynthCommand {
    /// Write the template to this file instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Synthesizes the template for `topology` as a JSON string.
pub fn render(topology: &Topology, compact: bool) -> Result<String> {
    let template = synthesize(topology)?;
    tracing::debug!(
        resources = template.resources.len(),
        outputs = template.outputs.len(),
        "Synthesized template"
    );
    let json = if compact {
        template.to_json()?
    } else {
        template.to_json_pretty()?
    };
    Ok(json)
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub fn write_template(path: &Path, contents: &str) -> Result<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, format!("{}\n", contents))
    };
    write().map_err(|source| StackError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Main entry point for the synth command.
pub fn run(command: SynthCommand, stack: &StackArgs, global: &Global) -> Result<()> {
    let topology = stack.declare()?;
    let json = render(&topology, command.compact)?;

    match &command.out {
        Some(path) => {
            write_template(path, &json)?;
            tracing::info!(stack = %topology.stack_name, path = %path.display(), "Wrote template");
            if !global.is_silent() {
                aprintln!("{} {}", p_g("Template written to"), p_b(&path.display().to_string()));
            }
        }
        None => {
            tracing::info!(stack = %topology.stack_name, "Writing template to stdout");
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use items_stack_core::StackConfig;

    fn topology() -> Topology {
        Topology::declare(&StackConfig::default()).expect("valid")
    }

    #[test]
    fn test_render_compact_is_single_line() {
        let json = render(&topology(), true).expect("renders");
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_render_pretty_parses_back() {
        let json = render(&topology(), false).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
    }

    #[test]
    fn test_write_template_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("items.template.json");

        write_template(&path, "{}").expect("writes");

        assert_eq!(std::fs::read_to_string(&path).expect("reads"), "{}\n");
    }

    #[test]
    fn test_write_template_reports_path_on_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory cannot be overwritten as a file.
        let error = write_template(dir.path(), "{}").unwrap_err();

        match error {
            StackError::Write { path, .. } => {
                assert_eq!(path, dir.path().display().to_string())
            }
            other => panic!("expected write error, got {other:?}"),
        }
    }
}
