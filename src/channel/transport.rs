//! The kernel seam.

use crate::codec::{Op, Payload};
use crate::interface::InterfaceName;
use std::io;

/// Something that can carry Wireless Extensions requests to a kernel.
///
/// [`Socket`](super::Socket) talks to the running kernel; tests use an
/// in-memory implementation. Implementations report failures as
/// [`io::Error`]s carrying the raw errno, and leave interpretation to the
/// control channel.
pub trait Transport {
    /// Make sure the transport can issue requests (e.g. open its socket).
    fn open(&mut self) -> io::Result<()>;

    /// Issue one request. On return `payload` holds whatever the kernel
    /// wrote back, on failure as well as on success.
    fn request(&mut self, name: &InterfaceName, op: Op, payload: &mut Payload) -> io::Result<()>;

    /// Names of all network interfaces, wireless or not, in kernel order.
    fn interface_names(&mut self) -> io::Result<Vec<String>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn request(&mut self, name: &InterfaceName, op: Op, payload: &mut Payload) -> io::Result<()> {
        (**self).request(name, op, payload)
    }

    fn interface_names(&mut self) -> io::Result<Vec<String>> {
        (**self).interface_names()
    }
}
