use std::path::PathBuf;
use std::{env, fmt, fs, io};

use tracing::{debug, info};

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::{ConfigPaths, RC_FILE_NAME};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    source: Option<PathBuf>,
    vars: Vec<(String, String)>,
}

impl Config {
    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let Some(path) = &paths.rc_path else {
            debug!("no home directory, skipping rc file");
            return Ok(Config::default());
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !paths.required => {
                debug!(path = %path.display(), "no rc file");
                return Ok(Config::default());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::ConfigFileNotFound(path.clone()));
            }
            Err(e) => return Err(ConfigError::IoError(e)),
        };

        let vars = ConfigLoader::new().parse(&content)?;
        info!(path = %path.display(), count = vars.len(), "loaded rc file");

        Ok(Config {
            source: Some(path.clone()),
            vars,
        })
    }

    pub fn apply(&self) {
        for (name, value) in &self.vars {
            debug!(name = name.as_str(), "setting environment variable");
            env::set_var(name, value);
        }
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigFileNotFound(PathBuf),
    InvalidLine { line: usize, reason: &'static str },
    IoError(io::Error),
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ConfigFileNotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::InvalidLine { line, reason } => {
                write!(f, "Invalid config line {}: {}", line, reason)
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
