use std::env;
use std::io;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub ppid: u32,
    pub executable: String,
}

pub trait SystemOps {
    fn current_dir(&self) -> io::Result<PathBuf>;

    fn set_current_dir(&self, path: &Path) -> io::Result<()>;

    fn home_dir(&self) -> Option<PathBuf>;

    fn processes(&self) -> io::Result<Vec<ProcessInfo>>;

    fn find_process(&self, pid: u32) -> io::Result<()>;

    fn terminate(&self, pid: u32) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HostSystem;

impl HostSystem {
    pub fn new() -> Self {
        Self
    }
}

impl SystemOps for HostSystem {
    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn processes(&self) -> io::Result<Vec<ProcessInfo>> {
        list_processes()
    }

    fn find_process(&self, pid: u32) -> io::Result<()> {
        send_signal(pid, None)
    }

    fn terminate(&self, pid: u32) -> io::Result<()> {
        debug!(pid, "sending SIGKILL");
        send_signal(pid, Some(Signal::SIGKILL))
    }
}

fn send_signal(pid: u32, signal: Option<Signal>) -> io::Result<()> {
    // 0 and values past pid_t::MAX would address process groups once cast.
    let pid = match i32::try_from(pid) {
        Ok(pid) if pid > 0 => Pid::from_raw(pid),
        _ => return Err(Errno::ESRCH.into()),
    };

    kill(pid, signal).map_err(io::Error::from)
}

#[cfg(target_os = "linux")]
fn list_processes() -> io::Result<Vec<ProcessInfo>> {
    let all = procfs::process::all_processes().map_err(io::Error::other)?;

    let processes = all
        // The process may exit between listing and reading.
        .filter_map(|process| process.ok()?.stat().ok())
        .filter_map(|stat| {
            Some(ProcessInfo {
                pid: u32::try_from(stat.pid).ok()?,
                ppid: u32::try_from(stat.ppid).ok()?,
                executable: stat.comm,
            })
        })
        .collect();

    Ok(processes)
}

#[cfg(not(target_os = "linux"))]
fn list_processes() -> io::Result<Vec<ProcessInfo>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "process listing needs /proc",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_host_processes_include_self() {
        let processes = HostSystem::new().processes().unwrap();
        let me = processes
            .iter()
            .find(|p| p.pid == std::process::id())
            .unwrap();
        assert_eq!(me.ppid, std::os::unix::process::parent_id());
        assert!(!me.executable.is_empty());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_host_processes_see_child_name() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        let processes = HostSystem::new().processes();
        child.kill().unwrap();
        child.wait().unwrap();

        let row = processes
            .unwrap()
            .into_iter()
            .find(|p| p.pid == child.id())
            .unwrap();
        assert_eq!(row.ppid, std::process::id());
        assert_eq!(row.executable, "sleep");
    }

    #[test]
    fn test_host_find_missing_process() {
        let err = HostSystem::new().find_process(999_999_999).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(Errno::ESRCH as i32));
    }

    #[test]
    fn test_host_refuses_pid_zero_and_group_range() {
        let host = HostSystem::new();
        for pid in [0, u32::MAX] {
            let err = host.terminate(pid).unwrap_err();
            assert_eq!(err.raw_os_error(), Some(Errno::ESRCH as i32));
        }
    }

    #[test]
    fn test_host_terminates_child() {
        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        let host = HostSystem::new();

        host.find_process(child.id()).unwrap();
        host.terminate(child.id()).unwrap();

        let status = child.wait().unwrap();
        assert!(!status.success());
    }
}
