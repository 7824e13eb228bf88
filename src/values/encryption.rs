//! Encryption state and key material.

use crate::codec::consts::*;
use crate::codec::Point;
use crate::error::WextError;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The symbolic encryption mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionMode {
    /// Encryption disabled.
    Off,
    /// Enabled without an explicit security mode.
    On,
    /// Accept non-encrypted sessions.
    Open,
    /// Refuse non-encrypted sessions.
    Restricted,
    /// Mode bits this crate does not understand.
    Unknown(u16),
}

impl EncryptionMode {
    /// Decode the mode bits of an encoding flag word.
    pub fn from_flags(flags: u16) -> Self {
        if flags & IW_ENCODE_DISABLED != 0 {
            return Self::Off;
        }
        match flags & IW_ENCODE_MODE {
            IW_ENCODE_ENABLED => Self::On,
            IW_ENCODE_OPEN => Self::Open,
            IW_ENCODE_RESTRICTED => Self::Restricted,
            other => Self::Unknown(other),
        }
    }

    /// The mode bits to send in a set request.
    pub fn flags(self) -> u16 {
        match self {
            Self::Off => IW_ENCODE_DISABLED,
            Self::On => IW_ENCODE_ENABLED,
            Self::Open => IW_ENCODE_OPEN,
            Self::Restricted => IW_ENCODE_RESTRICTED,
            Self::Unknown(bits) => bits & IW_ENCODE_MODE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Open => "open",
            Self::Restricted => "restricted",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for EncryptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncryptionMode {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            "open" => Ok(Self::Open),
            "restricted" => Ok(Self::Restricted),
            _ => Err(WextError::invalid_argument(format!(
                "unknown encryption mode: {:?}",
                s
            ))),
        }
    }
}

/// Encryption key material. Wiped from memory on drop.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key(Vec<u8>);

impl Key {
    pub fn new(bytes: Vec<u8>) -> Result<Self, WextError> {
        if bytes.len() > IW_ENCODING_TOKEN_MAX {
            let len = bytes.len();
            let mut bytes = bytes;
            bytes.zeroize();
            return Err(WextError::invalid_argument(format!(
                "key of {} bytes exceeds the {}-byte limit",
                len, IW_ENCODING_TOKEN_MAX
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hex digits grouped by two bytes, `1234-5678-90`, as wireless tools
    /// print keys.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 3);
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 && i % 2 == 0 {
                out.push('-');
            }
            out.push_str(&format!("{:02X}", byte));
        }
        out
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key([REDACTED; {}])", self.0.len())
    }
}

impl FromStr for Key {
    type Err = WextError;

    /// Parse `s:ascii-text` or hex digits with optional `-`/`:` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(text) = s.strip_prefix("s:") {
            return Self::new(text.as_bytes().to_vec());
        }

        let invalid = || WextError::invalid_argument("key is neither s:<text> nor hex digits");
        let digits: Vec<u8> = s.bytes().filter(|b| *b != b'-' && *b != b':').collect();
        if digits.is_empty() || digits.len() % 2 != 0 {
            return Err(invalid());
        }
        let mut bytes = Vec::with_capacity(digits.len() / 2);
        for pair in digits.chunks(2) {
            let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
            match u8::from_str_radix(pair, 16) {
                Ok(byte) => bytes.push(byte),
                Err(_) => {
                    bytes.zeroize();
                    return Err(invalid());
                }
            }
        }
        Self::new(bytes)
    }
}

/// Decoded `SIOCGIWENCODE` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionState {
    pub enabled: bool,
    /// 1-based key slot, when the driver reports one.
    pub key_index: Option<u8>,
    pub mode: EncryptionMode,
    /// Key material, empty when the driver withholds it.
    pub key: Key,
    /// The driver has no key or declines to return it.
    pub no_key: bool,
    /// Temporary (driver-managed) key.
    pub temporary: bool,
    flags: u16,
}

impl EncryptionState {
    /// Decode from the flag word and the returned key bytes.
    pub fn from_flags(flags: u16, key: &[u8]) -> Self {
        let mode = EncryptionMode::from_flags(flags);
        let index = (flags & IW_ENCODE_INDEX) as u8;

        Self {
            enabled: mode != EncryptionMode::Off,
            key_index: (index != 0).then_some(index),
            mode,
            key: Key(key.to_vec()),
            no_key: flags & IW_ENCODE_NOKEY != 0,
            temporary: flags & IW_ENCODE_TEMP != 0,
            flags,
        }
    }

    /// Decode a `SIOCGIWENCODE` point response.
    pub fn from_point(point: &Point) -> Self {
        Self::from_flags(point.flags, point.written())
    }

    /// The mode and key-index bits, e.g. `IW_ENCODE_RESTRICTED + 1` for a
    /// restricted link on key 1.
    pub fn numeric(&self) -> u16 {
        self.flags & (IW_ENCODE_MODE | IW_ENCODE_INDEX)
    }

    /// The raw flag word as reported.
    pub fn flags(&self) -> u16 {
        self.flags
    }
}

impl fmt::Display for EncryptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return f.write_str("off");
        }
        if self.key.is_empty() {
            f.write_str("on")?;
        } else {
            f.write_str(&self.key.to_hex())?;
        }
        if let Some(index) = self.key_index {
            write!(f, " [{}]", index)?;
        }
        match self.mode {
            EncryptionMode::Open | EncryptionMode::Restricted => {
                write!(f, " Security mode:{}", self.mode)
            }
            _ => Ok(()),
        }
    }
}
