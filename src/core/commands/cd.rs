use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Command, CommandError};
use crate::process::SystemOps;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, system: &dyn SystemOps, args: &[String]) -> Result<String, CommandError> {
        let target: PathBuf = match args.first().map(String::as_str) {
            None | Some("") => system.home_dir().ok_or(CommandError::HomeDirNotFound)?,
            Some(dir) => Path::new(dir).to_path_buf(),
        };

        debug!(target = %target.display(), "changing directory");
        system.set_current_dir(&target)?;
        Ok(String::new())
    }
}
