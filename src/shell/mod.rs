use std::io::{self, BufRead, BufWriter, Write};

use tracing::{debug, info};

mod executor;
pub mod pipeline;

use crate::{
    core::commands::{CommandExecutor, ExecutionResult},
    error::ShellError,
    highlight::SyntaxHighlighter,
    process::{HostSystem, Input, SystemOps},
};

use executor::LineHandler;
pub use pipeline::{Pipeline, PipelineStage, STAGE_DELIMITER};

pub const QUIT_SENTINEL: &str = "\\quit";

pub struct Shell<S = HostSystem> {
    pub(crate) executor: CommandExecutor<S>,
    inherit_stdin: bool,
    prompt: Option<SyntaxHighlighter>,
}

impl Shell<HostSystem> {
    pub fn host() -> Self {
        Self::new(HostSystem::new())
    }
}

impl<S: SystemOps> Shell<S> {
    pub fn new(system: S) -> Self {
        Shell {
            executor: CommandExecutor::new(system),
            inherit_stdin: false,
            prompt: None,
        }
    }

    pub fn inherit_stdin(mut self, inherit: bool) -> Self {
        self.inherit_stdin = inherit;
        self
    }

    pub fn with_prompt(mut self, highlighter: SyntaxHighlighter) -> Self {
        self.prompt = Some(highlighter);
        self
    }

    pub(crate) fn command_input(&self) -> Input {
        if self.inherit_stdin {
            Input::Inherit
        } else {
            Input::Null
        }
    }

    /// Runs lines from `input` until `\quit` or end of input.
    ///
    /// Unless [`Shell::inherit_stdin`] is set, single external commands read an empty
    /// stream rather than the rest of `input`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: W) -> Result<(), ShellError> {
        let mut writer = BufWriter::new(output);
        let mut raw = Vec::new();

        loop {
            self.show_prompt();

            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                info!("end of input");
                return Ok(());
            }

            let text = String::from_utf8_lossy(&raw);
            let line = strip_line_ending(&text);
            if line == QUIT_SENTINEL {
                info!("quit requested");
                return Ok(());
            }

            let result = self.execute_line(line);
            if let Some(e) = &result.error {
                debug!(error = %e, "line failed");
            }
            if write_result(&mut writer, &result)? {
                writer.flush()?;
            }
        }
    }

    fn show_prompt(&self) {
        let Some(highlighter) = &self.prompt else {
            return;
        };
        let cwd = self
            .executor
            .system()
            .current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "?".to_string());

        let mut stderr = io::stderr().lock();
        // A prompt that cannot be shown is not worth ending the session over.
        let _ = write!(stderr, "{}", highlighter.highlight_prompt(&cwd));
        let _ = stderr.flush();
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn write_result<W: Write>(writer: &mut W, result: &ExecutionResult) -> io::Result<bool> {
    let mut wrote = false;
    if let Some(error) = &result.error {
        writeln!(writer, "error: {}", error)?;
        wrote = true;
    }
    if !result.output.is_empty() {
        writeln!(writer, "{}", result.output)?;
        wrote = true;
    }
    Ok(wrote)
}
