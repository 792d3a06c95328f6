use super::{Command, CommandError};
use crate::process::SystemOps;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(&self, _system: &dyn SystemOps, args: &[String]) -> Result<String, CommandError> {
        Ok(args.join(" "))
    }
}
