use std::path::PathBuf;

pub const RC_FILE_NAME: &str = ".venulerc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: Option<PathBuf>,
    pub required: bool,
}

impl ConfigPaths {
    pub fn new(explicit: Option<&str>) -> Self {
        match explicit {
            Some(path) => ConfigPaths {
                rc_path: Some(PathBuf::from(path)),
                required: true,
            },
            None => ConfigPaths {
                rc_path: dirs::home_dir().map(|home| home.join(RC_FILE_NAME)),
                required: false,
            },
        }
    }
}
