//! The real transport: `ioctl` on a datagram socket.

use super::Transport;
use crate::codec::record::IwReq;
use crate::codec::{Op, Payload};
use crate::interface::InterfaceName;
use log::debug;
use std::fs;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};

/// Where the kernel lists network interfaces.
pub const PROC_NET_DEV: &str = "/proc/net/dev";

/// A control socket for Wireless Extensions requests.
///
/// The socket is opened on first use and closed when this value is dropped.
#[derive(Debug, Default)]
pub struct Socket {
    fd: Option<OwnedFd>,
}

impl Socket {
    pub fn new() -> Self {
        Self { fd: None }
    }

    pub fn is_open(&self) -> bool {
        self.fd.is_some()
    }

    fn fd(&mut self) -> io::Result<RawFd> {
        if let Some(fd) = &self.fd {
            return Ok(fd.as_raw_fd());
        }

        // SAFETY: plain socket(2) call; the result is checked below.
        let raw = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM | libc::SOCK_CLOEXEC, 0) };
        if raw < 0 {
            return Err(io::Error::last_os_error());
        }
        debug!("opened control socket (fd {})", raw);

        // SAFETY: `raw` is a freshly created descriptor nothing else owns.
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };
        let raw = fd.as_raw_fd();
        self.fd = Some(fd);
        Ok(raw)
    }
}

impl Transport for Socket {
    fn open(&mut self) -> io::Result<()> {
        self.fd().map(drop)
    }

    fn request(&mut self, name: &InterfaceName, op: Op, payload: &mut Payload) -> io::Result<()> {
        let fd = self.fd()?;
        let mut req = IwReq::new(name, payload);

        // SAFETY: `req` is a correctly laid out `struct iwreq`. Any buffer it
        // points to is owned by `payload`, which outlives the call, and
        // `IwReq::new` clamps the advertised length to that buffer.
        let ret = unsafe { libc::ioctl(fd, op.code() as _, &mut req as *mut IwReq) };
        let result = if ret < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        };

        req.read_back(payload);
        result
    }

    fn interface_names(&mut self) -> io::Result<Vec<String>> {
        let text = fs::read_to_string(PROC_NET_DEV)?;
        Ok(crate::enumerate::parse_proc_net_dev(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_opens_lazily() {
        let mut socket = Socket::new();
        assert!(!socket.is_open());
        // Creating a datagram socket needs no privileges.
        socket.open().unwrap();
        assert!(socket.is_open());
        socket.open().unwrap();
    }
}
