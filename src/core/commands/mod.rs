use std::fmt;
use std::num::ParseIntError;

use tracing::debug;

mod cd;
mod echo;
mod kill;
mod ps;
mod pwd;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use kill::KillCommand;
pub use ps::PsCommand;
pub use pwd::PwdCommand;

use crate::process::{Captured, HostSystem, Input, ProcessError, ProcessExecutor, SystemOps};

pub const ESCAPE_KEYWORD: &str = "unix";

#[derive(Debug)]
pub enum CommandError {
    NotEnoughCommands,
    NotEnoughArguments,
    InvalidPid(ParseIntError),
    HomeDirNotFound,
    Os(std::io::Error),
    Process(ProcessError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotEnoughCommands => write!(f, "not enough commands in pipe"),
            CommandError::NotEnoughArguments => write!(f, "not enough arguments"),
            CommandError::InvalidPid(e) => write!(f, "{}", e),
            CommandError::HomeDirNotFound => write!(f, "home directory not found"),
            CommandError::Os(e) => write!(f, "{}", e),
            CommandError::Process(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Os(err)
    }
}

impl From<ParseIntError> for CommandError {
    fn from(err: ParseIntError) -> Self {
        CommandError::InvalidPid(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

#[derive(Debug, Default)]
pub struct ExecutionResult {
    pub output: String,
    pub error: Option<CommandError>,
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(error: CommandError) -> Self {
        Self {
            output: String::new(),
            error: Some(error),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub(crate) fn trimmed(mut self) -> Self {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self
    }
}

impl From<Result<String, CommandError>> for ExecutionResult {
    fn from(result: Result<String, CommandError>) -> Self {
        match result {
            Ok(output) => Self::success(output),
            Err(e) => Self::failure(e),
        }
    }
}

impl From<Captured> for ExecutionResult {
    fn from(captured: Captured) -> Self {
        Self {
            output: String::from_utf8_lossy(&captured.stdout).into_owned(),
            error: captured.error.map(CommandError::Process),
        }
    }
}

pub trait Command {
    fn execute(&self, system: &dyn SystemOps, args: &[String]) -> Result<String, CommandError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinCommand {
    Cd(CdCommand),
    Pwd(PwdCommand),
    Ps(PsCommand),
    Kill(KillCommand),
    Echo(EchoCommand),
}

impl BuiltinCommand {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(BuiltinCommand::Cd(CdCommand)),
            "pwd" => Some(BuiltinCommand::Pwd(PwdCommand)),
            "ps" => Some(BuiltinCommand::Ps(PsCommand)),
            "kill" => Some(BuiltinCommand::Kill(KillCommand)),
            "echo" => Some(BuiltinCommand::Echo(EchoCommand)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinCommand::Cd(_) => "cd",
            BuiltinCommand::Pwd(_) => "pwd",
            BuiltinCommand::Ps(_) => "ps",
            BuiltinCommand::Kill(_) => "kill",
            BuiltinCommand::Echo(_) => "echo",
        }
    }
}

impl Command for BuiltinCommand {
    fn execute(&self, system: &dyn SystemOps, args: &[String]) -> Result<String, CommandError> {
        match self {
            BuiltinCommand::Cd(cmd) => cmd.execute(system, args),
            BuiltinCommand::Pwd(cmd) => cmd.execute(system, args),
            BuiltinCommand::Ps(cmd) => cmd.execute(system, args),
            BuiltinCommand::Kill(cmd) => cmd.execute(system, args),
            BuiltinCommand::Echo(cmd) => cmd.execute(system, args),
        }
    }
}

pub struct CommandExecutor<S = HostSystem> {
    system: S,
    process_executor: ProcessExecutor,
}

impl<S: SystemOps> CommandExecutor<S> {
    pub fn new(system: S) -> Self {
        Self {
            system,
            process_executor: ProcessExecutor::new(),
        }
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn process_executor(&self) -> &ProcessExecutor {
        &self.process_executor
    }

    pub fn execute(&self, args: &[String], input: Input) -> ExecutionResult {
        let Some((name, rest)) = args.split_first() else {
            return ExecutionResult::default();
        };

        let result = if name == ESCAPE_KEYWORD {
            match rest.split_first() {
                Some((program, program_args)) => self.spawn(program, program_args, input),
                None => ExecutionResult::failure(CommandError::NotEnoughArguments),
            }
        } else if let Some(builtin) = BuiltinCommand::lookup(name) {
            debug!(builtin = builtin.name(), "running builtin");
            builtin.execute(&self.system, rest).into()
        } else {
            self.spawn(name, rest, input)
        };

        result.trimmed()
    }

    fn spawn(&self, program: &str, args: &[String], input: Input) -> ExecutionResult {
        self.process_executor.exec(program, args, input).into()
    }
}
