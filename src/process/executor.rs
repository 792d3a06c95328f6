use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use super::ProcessError;

#[derive(Debug, Default)]
pub enum Input {
    #[default]
    Null,
    Inherit,
    Buffer(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub error: Option<ProcessError>,
}

impl Captured {
    fn failed(error: ProcessError) -> Self {
        Self {
            stdout: Vec::new(),
            error: Some(error),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Runs `program` to completion with `args`, capturing stdout and stderr separately.
    ///
    /// A run fails when the program cannot be spawned (stdout is then empty) or when it
    /// writes anything to stderr. In the latter case stdout is still returned and the
    /// error carries the stderr text unchanged. The exit status is logged and otherwise
    /// ignored.
    pub fn exec(&self, program: &str, args: &[String], input: Input) -> Captured {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let payload = match input {
            Input::Null => {
                command.stdin(Stdio::null());
                None
            }
            Input::Inherit => {
                command.stdin(Stdio::inherit());
                None
            }
            Input::Buffer(bytes) => {
                command.stdin(Stdio::piped());
                Some(bytes)
            }
        };

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(program, error = %e, "spawn failed");
                return Captured::failed(ProcessError::Spawn(e));
            }
        };
        debug!(program, pid = child.id(), "spawned");

        // stdin is written on its own thread while stdout and stderr are drained here.
        let feeder = match (payload, child.stdin.take()) {
            (Some(bytes), Some(stdin)) => Some(thread::spawn(move || feed(stdin, &bytes))),
            _ => None,
        };

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => return Captured::failed(ProcessError::Io(e)),
        };
        debug!(program, status = %output.status, "exited");

        if let Some(handle) = feeder {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Captured::failed(ProcessError::Io(e)),
                Err(_) => warn!(program, "stdin writer panicked"),
            }
        }

        let error = if output.stderr.is_empty() {
            None
        } else {
            Some(ProcessError::Stderr(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ))
        };

        Captured {
            stdout: output.stdout,
            error,
        }
    }
}

fn feed(mut stdin: ChildStdin, bytes: &[u8]) -> io::Result<()> {
    match stdin.write_all(bytes) {
        // A child may exit without reading its input.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
