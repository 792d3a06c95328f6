use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::{ProcessInfo, SystemOps};

pub(crate) struct FakeSystem {
    cwd: RefCell<PathBuf>,
    home: Option<PathBuf>,
    dirs: BTreeSet<PathBuf>,
    processes: Vec<ProcessInfo>,
    refused: BTreeSet<u32>,
    pub(crate) lookups: RefCell<Vec<u32>>,
    pub(crate) killed: RefCell<Vec<u32>>,
}

impl FakeSystem {
    pub(crate) fn new() -> Self {
        let dirs = ["/", "/home", "/home/user", "/home/user/src", "/tmp"]
            .into_iter()
            .map(PathBuf::from)
            .collect();

        Self {
            cwd: RefCell::new(PathBuf::from("/home/user/src")),
            home: Some(PathBuf::from("/home/user")),
            dirs,
            processes: Vec::new(),
            refused: BTreeSet::new(),
            lookups: RefCell::new(Vec::new()),
            killed: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn without_home(mut self) -> Self {
        self.home = None;
        self
    }

    pub(crate) fn with_process(mut self, pid: u32, ppid: u32, executable: &str) -> Self {
        self.processes.push(ProcessInfo {
            pid,
            ppid,
            executable: executable.to_string(),
        });
        self
    }

    pub(crate) fn refusing(mut self, pid: u32) -> Self {
        self.refused.insert(pid);
        self
    }

    pub(crate) fn cwd(&self) -> PathBuf {
        self.cwd.borrow().clone()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let mut resolved = if path.is_absolute() {
            PathBuf::from("/")
        } else {
            self.cwd()
        };
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::Normal(part) => resolved.push(part),
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
            }
        }
        resolved
    }

    fn exists(&self, pid: u32) -> bool {
        self.processes.iter().any(|p| p.pid == pid)
    }
}

impl SystemOps for FakeSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd())
    }

    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        let target = self.resolve(path);
        if !self.dirs.contains(&target) {
            return Err(io::Error::from_raw_os_error(libc::ENOENT));
        }
        *self.cwd.borrow_mut() = target;
        Ok(())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn processes(&self) -> io::Result<Vec<ProcessInfo>> {
        Ok(self.processes.clone())
    }

    fn find_process(&self, pid: u32) -> io::Result<()> {
        self.lookups.borrow_mut().push(pid);
        if self.exists(pid) {
            Ok(())
        } else {
            Err(io::Error::from_raw_os_error(libc::ESRCH))
        }
    }

    fn terminate(&self, pid: u32) -> io::Result<()> {
        if self.refused.contains(&pid) {
            return Err(io::Error::from_raw_os_error(libc::EPERM));
        }
        self.killed.borrow_mut().push(pid);
        Ok(())
    }
}
