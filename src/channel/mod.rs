//! The control channel: one request in, one classified result out.
//!
//! [`ControlChannel`] owns a [`Transport`] and adds what every request
//! needs on top of it:
//!
//! 1. Payload kind is checked against the operation before anything is sent
//! 2. Kernel errnos are mapped onto [`ErrorKind`](crate::ErrorKind), probing
//!    the device with `SIOCGIWNAME` when the errno alone is ambiguous
//! 3. Variable-length ("bulk") responses grow their buffer on `E2BIG` and
//!    wait out `EAGAIN`, both bounded by [`ChannelConfig`]
//!
//! The channel is not synchronized; every call takes `&mut self`.

mod socket;
mod transport;

pub use socket::{Socket, PROC_NET_DEV};
pub use transport::Transport;

use crate::codec::{Op, Payload, PayloadKind, Point};
use crate::config::ChannelConfig;
use crate::error::{classify, Diagnosis, Probe, Result, WextError};
use crate::interface::InterfaceName;
use log::{debug, trace, warn};
use std::io;
use std::thread;
use std::time::Duration;

/// What to do after a bulk request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStep {
    /// Retry at once with a buffer of this many bytes.
    Grow { capacity: usize },
    /// Retry with the same buffer after waiting.
    Wait { interval: Duration },
    /// The response does not fit in the largest allowed buffer.
    TooLarge,
    /// The device stayed busy through every retry.
    GiveUp,
}

/// Buffer-growth and retry state for one bulk request.
///
/// Pure bookkeeping; [`ControlChannel::perform_bulk`] does the I/O.
#[derive(Debug, Clone)]
pub struct BulkState {
    capacity: usize,
    max_capacity: usize,
    retries: u32,
    max_retries: u32,
    retry_interval: Duration,
}

impl BulkState {
    pub fn new(config: &ChannelConfig) -> Self {
        Self {
            capacity: config.initial_buffer_size.min(config.max_buffer_size),
            max_capacity: config.max_buffer_size,
            retries: 0,
            max_retries: config.max_retries,
            retry_interval: config.retry_interval,
        }
    }

    /// Buffer size for the next attempt.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Attempts made so far, counting the first.
    pub fn attempts(&self) -> u32 {
        self.retries + 1
    }

    /// The kernel said the buffer is too small, optionally reporting the
    /// size it needs.
    pub fn on_too_big(&mut self, reported: usize) -> BulkStep {
        if self.capacity >= self.max_capacity {
            return BulkStep::TooLarge;
        }
        self.capacity = self
            .capacity
            .saturating_mul(2)
            .max(reported)
            .min(self.max_capacity);
        BulkStep::Grow {
            capacity: self.capacity,
        }
    }

    /// The kernel said "try again".
    pub fn on_busy(&mut self) -> BulkStep {
        if self.retries >= self.max_retries {
            return BulkStep::GiveUp;
        }
        self.retries += 1;
        BulkStep::Wait {
            interval: self.retry_interval,
        }
    }
}

/// Issues Wireless Extensions requests through a [`Transport`].
#[derive(Debug)]
pub struct ControlChannel<T: Transport = Socket> {
    transport: T,
    config: ChannelConfig,
}

impl ControlChannel<Socket> {
    /// A channel over a real control socket, opened on first use.
    pub fn new(config: ChannelConfig) -> Self {
        Self::with_transport(Socket::new(), config)
    }
}

impl<T: Transport> ControlChannel<T> {
    pub fn with_transport(transport: T, config: ChannelConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Make sure the transport is usable.
    pub fn open(&mut self) -> Result<()> {
        self.transport.open().map_err(|e| WextError::io(None, e))
    }

    /// Issue one request and return the payload as the kernel left it.
    pub fn perform(&mut self, name: &InterfaceName, op: Op, mut payload: Payload) -> Result<Payload> {
        self.perform_mut(name, op, &mut payload)?;
        Ok(payload)
    }

    /// Like [`perform`](Self::perform), but the payload stays with the
    /// caller whatever the outcome, e.g. to wipe a key buffer afterwards.
    pub fn perform_mut(&mut self, name: &InterfaceName, op: Op, payload: &mut Payload) -> Result<()> {
        payload.check(op)?;
        debug!("{}: {}", name, op);

        match self.transport.request(name, op, payload) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.failure(name, op, err, 1)),
        }
    }

    /// Issue a request whose response size the driver decides.
    ///
    /// `flags` travel in the point's flag word. Returns the response point,
    /// whose [`Point::written`] bytes are the response.
    pub fn perform_bulk(&mut self, name: &InterfaceName, op: Op, flags: u16) -> Result<Point> {
        Payload::empty(PayloadKind::Point).check(op)?;
        let mut state = BulkState::new(&self.config);

        loop {
            debug!("{}: {} ({} byte buffer)", name, op, state.capacity());
            let mut payload = Payload::Point(Point::output(state.capacity(), flags));
            let err = match self.transport.request(name, op, &mut payload) {
                Ok(()) => {
                    return payload.into_point().ok_or_else(|| {
                        WextError::malformed(format!("{} response lost its buffer", op))
                    })
                }
                Err(err) => err,
            };

            let step = match err.raw_os_error() {
                Some(libc::E2BIG) => {
                    let reported = match &payload {
                        Payload::Point(point) => usize::from(point.length),
                        _ => 0,
                    };
                    state.on_too_big(reported)
                }
                Some(libc::EAGAIN) => state.on_busy(),
                _ => return Err(self.failure(name, op, err, state.attempts())),
            };

            match step {
                BulkStep::Grow { capacity } => {
                    trace!("{}: {} growing buffer to {} bytes", name, op, capacity);
                }
                BulkStep::Wait { interval } => {
                    warn!(
                        "{}: {} busy, retrying in {:?} (attempt {})",
                        name,
                        op,
                        interval,
                        state.attempts()
                    );
                    thread::sleep(interval);
                }
                BulkStep::TooLarge => {
                    warn!(
                        "{}: {} response does not fit in {} bytes",
                        name,
                        op,
                        state.capacity()
                    );
                    return Err(WextError::io(Some(op), err));
                }
                BulkStep::GiveUp => {
                    return Err(WextError::TransientBusy {
                        op,
                        attempts: state.attempts(),
                    });
                }
            }
        }
    }

    /// Ask the device for its protocol name, to learn whether it exists and
    /// is wireless.
    pub fn probe(&mut self, name: &InterfaceName) -> io::Result<()> {
        let mut payload = Payload::empty(PayloadKind::Name);
        let result = self.transport.request(name, Op::GetName, &mut payload);
        debug!("{}: probe {}", name, if result.is_ok() { "answered" } else { "failed" });
        result
    }

    fn failure(&mut self, name: &InterfaceName, op: Op, err: io::Error, attempts: u32) -> WextError {
        let Some(errno) = err.raw_os_error() else {
            return WextError::io(Some(op), err);
        };

        let probe = if Diagnosis::is_ambiguous(errno) && op != Op::GetName {
            match self.probe(name) {
                Ok(()) => Probe::Answered,
                Err(e) => Probe::Failed(e.raw_os_error().unwrap_or(libc::EIO)),
            }
        } else {
            Probe::Skipped
        };

        let kind = classify(Diagnosis::from_errno(errno, probe), errno);
        debug!("{}: {} failed with errno {}: {:?}", name, op, errno, kind);
        WextError::from_kernel(kind, name.as_str(), op, err, attempts)
    }
}
