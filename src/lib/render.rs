//! Turns DOT text into images by handing it to an external program.
//!
//! The automaton types only ever produce DOT text (see
//! [Automaton::to_graphviz]), spawning processes is left to a
//! [GraphRenderer].

use std::{
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

use crate::{automaton::Automaton, config::RenderConfig, error::RenderError};

pub trait GraphRenderer {
    /// Renders `dot` into the file at `output`.
    fn render(&self, dot: &str, output: &Path) -> Result<(), RenderError>;
}

/// Pipes DOT text into Graphviz (or any program with the same command line
/// interface), running `<command> -T<format> -o <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizRenderer {
    command: String,
    format: String,
}

impl GraphvizRenderer {
    pub fn new(command: impl Into<String>, format: impl Into<String>) -> Self {
        GraphvizRenderer {
            command: command.into(),
            format: format.into(),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        GraphvizRenderer::new(config.get_command(), config.get_format())
    }

    fn command(&self, output: &Path) -> Command {
        let mut command = Command::new(&self.command);
        command
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        command
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        GraphvizRenderer::from_config(&RenderConfig::default())
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, dot: &str, output: &Path) -> Result<(), RenderError> {
        let mut child = self.command(output).spawn()?;

        // dropping stdin closes the pipe, so the renderer sees the end of input
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let result = child.wait_with_output()?;

        if !result.status.success() {
            return Err(RenderError::CommandFailed {
                command: self.command.clone(),
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        tracing::debug!("rendered graph to {}", output.display());

        Ok(())
    }
}

/// Renders the DOT representation of `automaton` into `output`.
pub fn render_automaton<A: Automaton>(
    automaton: &A,
    renderer: &impl GraphRenderer,
    output: impl AsRef<Path>,
) -> Result<(), RenderError> {
    renderer.render(&automaton.to_graphviz(), output.as_ref())
}
