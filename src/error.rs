//! Error taxonomy.
//!
//! Every failure surfaced by this crate is a [`WextError`]. Kernel errno
//! values are mapped onto it in one place, [`classify`], which is a pure
//! function of what is known about the device and the errno.

use crate::codec::Op;
use std::fmt;
use std::io;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, WextError>;

/// The six failure categories callers distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The named device does not exist.
    InvalidInterface,
    /// The device exists but has no wireless extensions.
    InterfaceNotWireless,
    /// The device is wireless but its driver does not implement the request.
    Unsupported,
    /// Malformed input, rejected before any request was issued.
    InvalidArgument,
    /// The device stayed busy through every retry.
    TransientBusy,
    /// Any other I/O or kernel failure.
    IoFailure,
}

/// What is known about the target device when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnosis {
    pub exists: bool,
    pub wireless: bool,
    pub supported: bool,
}

/// Outcome of the `SIOCGIWNAME` probe used to disambiguate an errno.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// No probe was made (the failing request was the probe itself).
    Skipped,
    /// The device answered `SIOCGIWNAME`.
    Answered,
    /// The probe failed with this errno.
    Failed(i32),
}

impl Diagnosis {
    /// A wireless device whose driver implements the request.
    pub const HEALTHY: Self = Self {
        exists: true,
        wireless: true,
        supported: true,
    };

    const ABSENT: Self = Self {
        exists: false,
        wireless: false,
        supported: false,
    };

    const WIRED: Self = Self {
        exists: true,
        wireless: false,
        supported: false,
    };

    /// Whether `errno` alone cannot tell a wired device from an unsupported
    /// request, so a probe is needed.
    pub fn is_ambiguous(errno: i32) -> bool {
        matches!(errno, libc::EINVAL | libc::EOPNOTSUPP | libc::ENOTTY)
    }

    /// Derive a diagnosis from a request's errno and, for ambiguous errnos,
    /// the probe outcome.
    pub fn from_errno(errno: i32, probe: Probe) -> Self {
        if errno == libc::ENODEV {
            return Self::ABSENT;
        }
        if !Self::is_ambiguous(errno) {
            return Self::HEALTHY;
        }

        match probe {
            Probe::Answered => Self {
                supported: !matches!(errno, libc::EOPNOTSUPP | libc::ENOTTY),
                ..Self::HEALTHY
            },
            Probe::Failed(libc::ENODEV) => Self::ABSENT,
            Probe::Failed(_) | Probe::Skipped => Self::WIRED,
        }
    }
}

/// Map a failure onto the taxonomy.
///
/// Device facts take priority over the errno: an absent device is reported
/// as such whatever the errno was, then a wired one, then an unsupported
/// request. Only a healthy device reports busy or generic failures.
pub fn classify(diagnosis: Diagnosis, errno: i32) -> ErrorKind {
    if !diagnosis.exists {
        ErrorKind::InvalidInterface
    } else if !diagnosis.wireless {
        ErrorKind::InterfaceNotWireless
    } else if !diagnosis.supported {
        ErrorKind::Unsupported
    } else if errno == libc::EAGAIN || errno == libc::EBUSY {
        ErrorKind::TransientBusy
    } else {
        ErrorKind::IoFailure
    }
}

/// Errors returned by this crate.
#[derive(Debug)]
pub enum WextError {
    /// The named device does not exist.
    InvalidInterface { name: String },
    /// The device exists but has no wireless extensions.
    InterfaceNotWireless { name: String },
    /// The driver does not implement `op`.
    Unsupported { name: String, op: Op },
    /// Malformed input.
    InvalidArgument(String),
    /// `op` kept failing with "try again".
    TransientBusy { op: Op, attempts: u32 },
    /// Any other failure, with the underlying OS error when there is one.
    IoFailure { op: Option<Op>, source: io::Error },
}

impl WextError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn io(op: Option<Op>, source: io::Error) -> Self {
        Self::IoFailure { op, source }
    }

    /// A kernel response that does not decode.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::IoFailure {
            op: None,
            source: io::Error::new(io::ErrorKind::InvalidData, msg.into()),
        }
    }

    /// Build the error for a failed kernel request.
    pub fn from_kernel(
        kind: ErrorKind,
        name: &str,
        op: Op,
        source: io::Error,
        attempts: u32,
    ) -> Self {
        match kind {
            ErrorKind::InvalidInterface => Self::InvalidInterface {
                name: name.to_string(),
            },
            ErrorKind::InterfaceNotWireless => Self::InterfaceNotWireless {
                name: name.to_string(),
            },
            ErrorKind::Unsupported => Self::Unsupported {
                name: name.to_string(),
                op,
            },
            ErrorKind::TransientBusy => Self::TransientBusy { op, attempts },
            ErrorKind::InvalidArgument => Self::InvalidArgument(format!("{}: {}", op, source)),
            ErrorKind::IoFailure => Self::IoFailure {
                op: Some(op),
                source,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInterface { .. } => ErrorKind::InvalidInterface,
            Self::InterfaceNotWireless { .. } => ErrorKind::InterfaceNotWireless,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::TransientBusy { .. } => ErrorKind::TransientBusy,
            Self::IoFailure { .. } => ErrorKind::IoFailure,
        }
    }

    /// The OS error code behind an [`IoFailure`](Self::IoFailure), if any.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::IoFailure { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

impl fmt::Display for WextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterface { name } => write!(f, "no such device: {}", name),
            Self::InterfaceNotWireless { name } => {
                write!(f, "{} has no wireless extensions", name)
            }
            Self::Unsupported { name, op } => {
                write!(f, "{} does not support {}", name, op)
            }
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::TransientBusy { op, attempts } => {
                write!(f, "{} still busy after {} attempts", op, attempts)
            }
            Self::IoFailure { op: Some(op), source } => write!(f, "{} failed: {}", op, source),
            Self::IoFailure { op: None, source } => write!(f, "I/O error: {}", source),
        }
    }
}

impl std::error::Error for WextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<crate::config::ConfigError> for WextError {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
