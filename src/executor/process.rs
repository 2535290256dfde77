use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use nix::errno::Errno;
use nix::fcntl::OFlag;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};
use tracing::{debug, trace};
use super::argv::ArgVector;
use super::executor::ExecError;

/// Exit status of a child whose `execvp` failed.
pub const EXEC_FAILURE_STATUS: i32 = 127;
/// Exit status of a child that could not set up its standard streams.
pub const REDIRECT_FAILURE_STATUS: i32 = 1;

const REPORT_LEN: usize = 5;
const STDIN: RawFd = libc::STDIN_FILENO;

pub(crate) fn errno_to_io(errno: Errno) -> io::Error {
    io::Error::from_raw_os_error(errno as i32)
}

/// Which setup step a child reported as failed on its status pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ChildFailure {
    Redirect = 1,
    Exec = 2,
}

/// Descriptors a child installs as its standard streams before `execvp`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StageIo {
    pub stdin: Option<RawFd>,
    pub stdout: Option<RawFd>,
}

/// Caller-supplied replacements for the pipeline's outer streams: the
/// source stage's stdin and the sink stage's stdout. `None` inherits the
/// interpreter's own stream.
#[derive(Debug, Default)]
pub struct PipelineIo {
    pub stdin: Option<OwnedFd>,
    pub stdout: Option<OwnedFd>,
}

impl PipelineIo {
    pub fn inherit() -> Self {
        PipelineIo::default()
    }

    pub fn with_stdout(stdout: impl Into<OwnedFd>) -> Self {
        PipelineIo { stdin: None, stdout: Some(stdout.into()) }
    }

    /// The outer streams as seen by a pipeline that is a single stage.
    pub fn stage_io(&self) -> StageIo {
        StageIo {
            stdin: self.stdin.as_ref().map(|fd| fd.as_raw_fd()),
            stdout: self.stdout.as_ref().map(|fd| fd.as_raw_fd()),
        }
    }

    pub fn raw_fds(&self) -> Vec<RawFd> {
        self.stdin
            .iter()
            .chain(self.stdout.iter())
            .map(|fd| fd.as_raw_fd())
            .collect()
    }
}

/// A forked child that has not been reaped yet.
#[derive(Debug)]
pub struct SpawnedStage {
    pid: Pid,
    program: String,
    status: File,
}

impl SpawnedStage {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Block until the child has either replaced its image or reported why
    /// it could not.
    pub fn startup_result(&mut self) -> Result<(), ExecError> {
        let mut report = Vec::with_capacity(REPORT_LEN);
        self.status.read_to_end(&mut report)?;
        if report.is_empty() {
            return Ok(());
        }
        if report.len() != REPORT_LEN {
            return Err(ExecError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("truncated status report from pid {}", self.pid),
            )));
        }

        let mut errno = [0u8; 4];
        errno.copy_from_slice(&report[1..]);
        let source = io::Error::from_raw_os_error(i32::from_ne_bytes(errno));
        let program = self.program.clone();
        if report[0] == ChildFailure::Redirect as u8 {
            Err(ExecError::RedirectFailed { program, source })
        } else {
            Err(ExecError::ExecFailed { program, source })
        }
    }

    /// Block until this child terminates and return its exit status.
    pub fn reap(self) -> Result<i32, ExecError> {
        let code = wait_for(self.pid)?;
        trace!(pid = %self.pid, program = %self.program, code, "reaped stage");
        Ok(code)
    }
}

/// Fork a child that wires `io` onto its standard streams, closes every
/// descriptor in `close_fds`, and execs `argv`.
pub fn spawn_stage(
    argv: &ArgVector,
    io: StageIo,
    close_fds: &[RawFd],
) -> Result<SpawnedStage, ExecError> {
    let (status_read, status_write) = unistd::pipe2(OFlag::O_CLOEXEC)
        .map_err(|e| ExecError::PipeFailed(errno_to_io(e)))?;

    // SAFETY: the child only calls async-signal-safe functions before exec/_exit.
    match unsafe { unistd::fork() } {
        Err(e) => Err(ExecError::ForkFailed(errno_to_io(e))),
        Ok(ForkResult::Child) => run_child(argv, io, close_fds, status_write.as_raw_fd()),
        Ok(ForkResult::Parent { child }) => {
            drop(status_write);
            let program = argv.program().to_string_lossy().into_owned();
            debug!(pid = %child, %program, "spawned stage");
            Ok(SpawnedStage {
                pid: child,
                program,
                status: File::from(status_read),
            })
        }
    }
}

fn run_child(argv: &ArgVector, io: StageIo, close_fds: &[RawFd], status: RawFd) -> ! {
    // The interpreter ignores SIGPIPE and an ignored disposition survives exec.
    unsafe { libc::signal(libc::SIGPIPE, libc::SIG_DFL) };

    if install_stdio(io).is_err() {
        child_exit(status, ChildFailure::Redirect, REDIRECT_FAILURE_STATUS);
    }

    for &fd in close_fds {
        if fd > libc::STDERR_FILENO {
            unsafe { libc::close(fd) };
        }
    }

    unsafe { libc::execvp(argv.program().as_ptr(), argv.as_ptr()) };
    child_exit(status, ChildFailure::Exec, EXEC_FAILURE_STATUS)
}

/// Place `io` in the stdin/stdout slots. Runs in the forked child, so only
/// raw syscalls; errno is left set on failure.
fn install_stdio(io: StageIo) -> Result<(), ()> {
    let mut stdout = io.stdout;
    // A stdout source sitting in slot 0 would be clobbered by the stdin dup.
    if let (Some(input), Some(STDIN)) = (io.stdin, stdout) {
        if input != STDIN {
            let moved = unsafe { libc::fcntl(STDIN, libc::F_DUPFD_CLOEXEC, 3) };
            if moved == -1 {
                return Err(());
            }
            stdout = Some(moved);
        }
    }

    for (fd, target) in [(io.stdin, STDIN), (stdout, libc::STDOUT_FILENO)] {
        let Some(fd) = fd else { continue };
        let rc = if fd == target {
            // dup2 onto itself keeps FD_CLOEXEC; clear it by hand.
            unsafe { libc::fcntl(fd, libc::F_SETFD, 0) }
        } else {
            unsafe { libc::dup2(fd, target) }
        };
        if rc == -1 {
            return Err(());
        }
    }
    Ok(())
}

fn child_exit(status: RawFd, failure: ChildFailure, code: i32) -> ! {
    let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
    let mut report = [0u8; REPORT_LEN];
    report[0] = failure as u8;
    report[1..].copy_from_slice(&errno.to_ne_bytes());
    unsafe {
        libc::write(status, report.as_ptr().cast(), REPORT_LEN);
        libc::_exit(code)
    }
}

fn wait_for(pid: Pid) -> Result<i32, ExecError> {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(code),
            Ok(WaitStatus::Signaled(_, signal, _)) => return Ok(128 + signal as i32),
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ExecError::WaitFailed(errno_to_io(e))),
        }
    }
}
