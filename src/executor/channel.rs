use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use nix::fcntl::OFlag;
use nix::unistd;
use super::executor::ExecError;
use super::process::errno_to_io;

/// One OS pipe joining stage `i` (writer) to stage `i + 1` (reader).
///
/// Both ends are close-on-exec; `dup2` clears the flag on the copies placed
/// in the standard-stream slots, so only those survive `execvp`.
#[derive(Debug)]
pub struct Channel {
    read: OwnedFd,
    write: OwnedFd,
}

impl Channel {
    pub fn open() -> Result<Self, ExecError> {
        let (read, write) = unistd::pipe2(OFlag::O_CLOEXEC)
            .map_err(|e| ExecError::PipeFailed(errno_to_io(e)))?;
        Ok(Channel { read, write })
    }

    pub fn read_end(&self) -> RawFd {
        self.read.as_raw_fd()
    }

    pub fn write_end(&self) -> RawFd {
        self.write.as_raw_fd()
    }
}

/// The N-1 channels of an N-stage pipeline. Dropping the set closes every
/// endpoint the current process still holds.
#[derive(Debug, Default)]
pub struct ChannelSet {
    channels: Vec<Channel>,
}

impl ChannelSet {
    /// Allocate all channels up front. On failure the channels opened so far
    /// are closed again before the error is returned.
    pub fn allocate(count: usize) -> Result<Self, ExecError> {
        let mut channels = Vec::with_capacity(count);
        for _ in 0..count {
            channels.push(Channel::open()?);
        }
        Ok(ChannelSet { channels })
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    /// Every endpoint, read and write, in allocation order.
    pub fn raw_fds(&self) -> Vec<RawFd> {
        self.channels
            .iter()
            .flat_map(|c| [c.read_end(), c.write_end()])
            .collect()
    }
}
