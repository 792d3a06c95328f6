use std::mem;

use tracing::debug;

use crate::core::commands::{CommandError, ExecutionResult};
use crate::process::{Input, ProcessExecutor};

pub const STAGE_DELIMITER: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<PipelineStage>,
}

impl Pipeline {
    pub fn is_pipeline(line: &str) -> bool {
        line.contains(STAGE_DELIMITER)
    }

    pub fn parse(line: &str) -> Result<Self, CommandError> {
        if line.trim().ends_with('|') {
            return Err(CommandError::NotEnoughCommands);
        }

        let stages = line
            .split(STAGE_DELIMITER)
            .map(Self::parse_stage)
            .collect::<Result<Vec<_>, _>>()?;

        if stages.len() < 2 {
            return Err(CommandError::NotEnoughCommands);
        }

        Ok(Self { stages })
    }

    fn parse_stage(stage: &str) -> Result<PipelineStage, CommandError> {
        let mut parts = stage.split_whitespace().map(String::from);
        let command = parts.next().ok_or(CommandError::NotEnoughCommands)?;
        Ok(PipelineStage {
            command,
            args: parts.collect(),
        })
    }

    #[cfg(test)]
    pub(crate) fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Runs the stages in order through one buffer: each stage drains the buffer as
    /// its stdin, then its stdout is appended. The first failing stage aborts the
    /// pipeline and its partial output is dropped.
    pub fn execute(&self, executor: &ProcessExecutor) -> ExecutionResult {
        let mut buffer: Vec<u8> = Vec::new();

        for (index, stage) in self.stages.iter().enumerate() {
            debug!(stage = index, command = stage.command.as_str(), "running pipeline stage");

            let input = Input::Buffer(mem::take(&mut buffer));
            let captured = executor.exec(&stage.command, &stage.args, input);
            if let Some(error) = captured.error {
                debug!(stage = index, "pipeline aborted");
                return ExecutionResult::failure(error.into());
            }
            buffer.extend_from_slice(&captured.stdout);
        }

        ExecutionResult::success(String::from_utf8_lossy(&buffer).into_owned()).trimmed()
    }
}
