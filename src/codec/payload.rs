//! The request payload carried in the `iwreq` union slot.
//!
//! [`Payload`] is the typed face of `union iwreq_data`. Inline variants fit
//! in the 16-byte slot; [`Point`] owns an external buffer whose address and
//! capacity the transport places in the slot.

use super::consts::IFNAMSIZ;
use super::Op;
use crate::error::{Result, WextError};
use crate::values::MacAddr;

/// Which union member an operation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Nothing is read or written.
    None,
    /// `char name[IFNAMSIZ]`.
    Name,
    /// `struct iw_param`.
    Param,
    /// `struct iw_freq`.
    Freq,
    /// `struct sockaddr` carrying a hardware address.
    Addr,
    /// `__u32 mode`.
    Mode,
    /// `struct iw_quality`.
    Quality,
    /// `struct iw_point`: pointer + length + flags.
    Point,
}

/// `struct iw_param`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Param {
    pub value: i32,
    pub fixed: bool,
    pub disabled: bool,
    pub flags: u16,
}

impl Param {
    /// A fixed, enabled value.
    pub fn fixed(value: i32) -> Self {
        Self {
            value,
            fixed: true,
            ..Default::default()
        }
    }

    /// A disabled parameter ("off").
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Default::default()
        }
    }
}

/// `struct iw_freq`: `m * 10^e`, or a channel when `e == 0 && m <= 1000`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreqRecord {
    pub m: i32,
    pub e: i16,
    pub index: u8,
    pub flags: u8,
}

/// `struct iw_quality`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityRecord {
    pub qual: u8,
    pub level: u8,
    pub noise: u8,
    pub updated: u8,
}

/// `struct iw_point` with an owned buffer.
///
/// `length` is the number of valid bytes on input and the number of bytes the
/// kernel reports on output. On `E2BIG` the kernel may report a length larger
/// than the buffer, so readers go through [`Point::written`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Point {
    pub data: Vec<u8>,
    pub length: u16,
    pub flags: u16,
}

impl Point {
    /// A buffer handed to the kernel for reading.
    pub fn input(data: Vec<u8>, flags: u16) -> Self {
        let length = data.len().min(u16::MAX as usize) as u16;
        Self {
            data,
            length,
            flags,
        }
    }

    /// A zeroed buffer of `capacity` bytes for the kernel to fill.
    pub fn output(capacity: usize, flags: u16) -> Self {
        let capacity = capacity.min(u16::MAX as usize);
        Self {
            data: vec![0; capacity],
            length: capacity as u16,
            flags,
        }
    }

    /// No buffer at all: a null pointer with length 0, only flags travel.
    pub fn empty(flags: u16) -> Self {
        Self {
            data: Vec::new(),
            length: 0,
            flags,
        }
    }

    /// Capacity of the buffer handed to the kernel.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The bytes the kernel reported as written, clamped to the buffer.
    pub fn written(&self) -> &[u8] {
        let len = (self.length as usize).min(self.data.len());
        &self.data[..len]
    }
}

/// A typed request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Name([u8; IFNAMSIZ]),
    Param(Param),
    Freq(FreqRecord),
    Addr(MacAddr),
    Mode(u32),
    Quality(QualityRecord),
    Point(Point),
}

impl Payload {
    /// The union member this payload occupies.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::None => PayloadKind::None,
            Self::Name(_) => PayloadKind::Name,
            Self::Param(_) => PayloadKind::Param,
            Self::Freq(_) => PayloadKind::Freq,
            Self::Addr(_) => PayloadKind::Addr,
            Self::Mode(_) => PayloadKind::Mode,
            Self::Quality(_) => PayloadKind::Quality,
            Self::Point(_) => PayloadKind::Point,
        }
    }

    /// An empty payload of the given kind, ready to receive a "get" response.
    pub fn empty(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::None => Self::None,
            PayloadKind::Name => Self::Name([0; IFNAMSIZ]),
            PayloadKind::Param => Self::Param(Param::default()),
            PayloadKind::Freq => Self::Freq(FreqRecord::default()),
            PayloadKind::Addr => Self::Addr(MacAddr::default()),
            PayloadKind::Mode => Self::Mode(0),
            PayloadKind::Quality => Self::Quality(QualityRecord::default()),
            PayloadKind::Point => Self::Point(Point::default()),
        }
    }

    /// Reject a payload whose kind does not match what `op` expects.
    pub fn check(&self, op: Op) -> Result<()> {
        let expected = op.payload_kind();
        if let Op::Unknown(code) = op {
            return Err(WextError::invalid_argument(format!(
                "refusing to issue unknown operation 0x{:04X}",
                code
            )));
        }
        if self.kind() != expected {
            return Err(WextError::invalid_argument(format!(
                "{} expects a {:?} payload, got {:?}",
                op,
                expected,
                self.kind()
            )));
        }
        Ok(())
    }

    pub fn into_param(self) -> Option<Param> {
        match self {
            Self::Param(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_freq(self) -> Option<FreqRecord> {
        match self {
            Self::Freq(f) => Some(f),
            _ => None,
        }
    }

    pub fn into_addr(self) -> Option<MacAddr> {
        match self {
            Self::Addr(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_mode(self) -> Option<u32> {
        match self {
            Self::Mode(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_name(self) -> Option<[u8; IFNAMSIZ]> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_point(self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }
}
