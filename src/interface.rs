//! Interface names.

use crate::codec::consts::IFNAMSIZ;
use crate::error::WextError;
use std::fmt;
use std::str::FromStr;

/// A validated network interface name such as `wlan0`.
///
/// Only the syntax is checked; whether the device exists is learned from
/// the kernel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Longest name the kernel accepts (IFNAMSIZ minus the trailing NUL).
    pub const MAX_LEN: usize = IFNAMSIZ - 1;

    pub fn new(name: impl Into<String>) -> Result<Self, WextError> {
        let name = name.into();
        if name.is_empty() {
            return Err(WextError::invalid_argument("interface name is empty"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(WextError::invalid_argument(format!(
                "interface name {:?} is {} bytes (max {})",
                name,
                name.len(),
                Self::MAX_LEN
            )));
        }
        if name
            .chars()
            .any(|c| c == '\0' || c == '/' || c == ':' || c.is_whitespace())
        {
            return Err(WextError::invalid_argument(format!(
                "interface name {:?} contains an invalid character",
                name
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The NUL-padded form used in `ifr_name`.
    pub fn to_raw(&self) -> [u8; IFNAMSIZ] {
        let mut raw = [0u8; IFNAMSIZ];
        raw[..self.0.len()].copy_from_slice(self.0.as_bytes());
        raw
    }
}

impl FromStr for InterfaceName {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for InterfaceName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for InterfaceName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
