use tracing::debug;

use super::pipeline::Pipeline;
use crate::core::commands::ExecutionResult;
use crate::process::SystemOps;

pub(crate) trait LineHandler {
    fn execute_line(&self, line: &str) -> ExecutionResult;
}

impl<S: SystemOps> LineHandler for super::Shell<S> {
    fn execute_line(&self, line: &str) -> ExecutionResult {
        if Pipeline::is_pipeline(line) {
            debug!(line, "dispatching pipeline");
            return match Pipeline::parse(line) {
                Ok(pipeline) => pipeline.execute(self.executor.process_executor()),
                Err(e) => ExecutionResult::failure(e),
            };
        }

        let args: Vec<String> = line.split_whitespace().map(String::from).collect();
        if args.is_empty() {
            return ExecutionResult::default();
        }

        debug!(command = args[0].as_str(), "dispatching command");
        self.executor.execute(&args, self.command_input())
    }
}
