//! Build pipeline orchestration.
//!
//! After configuration the app must be made runnable: dependencies
//! installed, database migrations applied, the database client generated,
//! and the production build produced. The steps run in strict order in the
//! install directory with stdio streamed to the operator; the first non-zero
//! exit aborts the remainder.

use crate::error::{InstallerError, Result};
use crate::exec::CommandExecutor;
use crate::output::write_stderr_line;
use camino::Utf8Path;
use std::io::Write;

/// One external step of the build pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineStep {
    /// Human-readable name used in progress lines and diagnostics.
    pub name: &'static str,
    /// Program to invoke.
    pub cmd: &'static str,
    /// Arguments to pass.
    pub args: &'static [&'static str],
}

/// The pipeline steps, in execution order. Success of each step is a
/// precondition for the next.
pub const PIPELINE_STEPS: [PipelineStep; 4] = [
    PipelineStep {
        name: "dependency installation",
        cmd: "npm",
        args: &["i", "--force"],
    },
    PipelineStep {
        name: "database migration",
        cmd: "npx",
        args: &["prisma", "migrate", "deploy"],
    },
    PipelineStep {
        name: "client generation",
        cmd: "npx",
        args: &["prisma", "generate"],
    },
    PipelineStep {
        name: "application build",
        cmd: "npm",
        args: &["run", "build"],
    },
];

/// Runs the full pipeline in `install_path`, streaming each step's output.
///
/// # Errors
///
/// Returns [`InstallerError::PipelineStep`] naming the first failing step;
/// later steps are not attempted.
pub fn run_pipeline(
    executor: &dyn CommandExecutor,
    install_path: &Utf8Path,
    stderr: &mut dyn Write,
) -> Result<()> {
    for step in PIPELINE_STEPS {
        write_stderr_line(stderr, format!("Running {}...", step.name));
        let status = executor.run_streaming(step.cmd, step.args, Some(install_path))?;
        if !status.success() {
            return Err(InstallerError::PipelineStep {
                step: step.name,
                message: format!("{} exited with {status}", step.cmd),
            });
        }
    }
    Ok(())
}
