use super::{Command, CommandError};
use crate::process::SystemOps;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, system: &dyn SystemOps, _args: &[String]) -> Result<String, CommandError> {
        let cwd = system.current_dir()?;
        Ok(cwd.to_string_lossy().into_owned())
    }
}
