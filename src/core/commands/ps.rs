use super::{Command, CommandError};
use crate::process::SystemOps;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PsCommand;

impl Command for PsCommand {
    fn execute(&self, system: &dyn SystemOps, _args: &[String]) -> Result<String, CommandError> {
        let listing = system
            .processes()?
            .into_iter()
            .map(|p| format!("{} {} {}\n", p.pid, p.ppid, p.executable))
            .collect();
        Ok(listing)
    }
}
