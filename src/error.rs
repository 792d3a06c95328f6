use std::fmt;
use std::io;

use crate::core::config::ConfigError;

#[derive(Debug)]
pub enum ShellError {
    Io(io::Error),
    Config(ConfigError),
    Flag(String),
    Interrupt(ctrlc::Error),
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ConfigError> for ShellError {
    fn from(err: ConfigError) -> Self {
        ShellError::Config(err)
    }
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::Interrupt(err)
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Io(e) => write!(f, "session i/o failed: {}", e),
            ShellError::Config(e) => write!(f, "rc file: {}", e),
            ShellError::Flag(msg) => f.write_str(msg),
            ShellError::Interrupt(e) => write!(f, "cannot install interrupt handler: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Io(e) => Some(e),
            ShellError::Config(e) => Some(e),
            ShellError::Interrupt(e) => Some(e),
            ShellError::Flag(_) => None,
        }
    }
}
