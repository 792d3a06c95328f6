use tracing::debug;

use super::{Command, CommandError};
use crate::process::SystemOps;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KillCommand;

impl Command for KillCommand {
    fn execute(&self, system: &dyn SystemOps, args: &[String]) -> Result<String, CommandError> {
        for arg in args {
            let pid: u32 = arg.parse()?;
            system.find_process(pid)?;
            system.terminate(pid)?;
            debug!(pid, "killed");
        }
        Ok(String::new())
    }
}
