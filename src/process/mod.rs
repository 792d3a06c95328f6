use std::fmt;

pub mod executor;
pub mod signal;
pub mod system;

#[cfg(test)]
pub(crate) mod fake;

pub use executor::{Captured, Input, ProcessExecutor};
pub use system::{HostSystem, ProcessInfo, SystemOps};

#[derive(Debug)]
pub enum ProcessError {
    Spawn(std::io::Error),
    Stderr(String),
    Io(std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(e) => write!(f, "{}", e),
            ProcessError::Stderr(text) => f.write_str(text),
            ProcessError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
