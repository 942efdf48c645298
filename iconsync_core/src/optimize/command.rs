use super::Optimizer;
use crate::error::OptimizeError;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};

/// Pipes each icon through an external optimizer, e.g. `npx svgo --input - --output -`.
///
/// The program reads the SVG on stdin and writes the optimized markup to
/// stdout. A spawn failure or non-zero exit fails only the current icon.
#[derive(Debug, Clone)]
pub struct CommandOptimizer {
    command: String,
    args: Vec<String>,
}

impl CommandOptimizer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    fn display_command(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Optimizer for CommandOptimizer {
    fn optimize(&self, svg: &str, path: &Path) -> Result<String, OptimizeError> {
        debug!("Running `{}` for {:?}", self.display_command(), path);

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is fed from its own thread while stdout is drained here.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = svg.as_bytes().to_vec();
            thread::spawn(move || stdin.write_all(&input))
        });

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The program may exit without reading all of its input.
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    return Err(io::Error::other("stdin writer thread panicked").into());
                }
            }
        }

        if !output.status.success() {
            return Err(OptimizeError::CommandFailed {
                command: self.display_command(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        trace!("Optimizer wrote {} bytes", output.stdout.len());
        Ok(String::from_utf8(output.stdout)?)
    }
}
