//! Bit rates.

use super::{format_trimmed, parse_scaled, split_unit};
use crate::codec::Param;
use crate::error::{Result, WextError};
use std::fmt;
use std::str::FromStr;

const GBPS: u64 = 1_000_000_000;
const MBPS: u64 = 1_000_000;
const KBPS: u64 = 1_000;

/// A transmit bit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitrate {
    /// The driver picks the rate.
    Auto,
    /// A fixed rate in bits per second.
    Fixed(u64),
}

impl Bitrate {
    /// Decode a kernel `iw_param`. A negative value means automatic.
    pub fn from_param(param: Param) -> Self {
        if param.value < 0 {
            Self::Auto
        } else {
            Self::Fixed(param.value as u64)
        }
    }

    /// Encode for `SIOCSIWRATE`. The kernel carries rates as `i32`.
    pub fn to_param(self) -> Result<Param> {
        match self {
            Self::Auto => Ok(Param {
                value: -1,
                ..Default::default()
            }),
            Self::Fixed(rate) => {
                let value = i32::try_from(rate).map_err(|_| {
                    WextError::invalid_argument(format!("bit rate {} b/s is out of range", rate))
                })?;
                Ok(Param::fixed(value))
            }
        }
    }

    /// The rate in bits per second, if fixed.
    pub fn bits_per_second(&self) -> Option<u64> {
        match self {
            Self::Fixed(rate) => Some(*rate),
            Self::Auto => None,
        }
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(rate) if rate >= GBPS => write!(f, "{}Gb/s", format_trimmed(rate, GBPS)),
            Self::Fixed(rate) if rate >= MBPS => write!(f, "{}Mb/s", format_trimmed(rate, MBPS)),
            Self::Fixed(rate) if rate >= KBPS => write!(f, "{}kb/s", format_trimmed(rate, KBPS)),
            Self::Fixed(rate) => write!(f, "{}b/s", rate),
        }
    }
}

impl FromStr for Bitrate {
    type Err = WextError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || WextError::invalid_argument(format!("invalid bit rate: {:?}", s));

        let (number, unit) = split_unit(s);
        if number.is_empty() && unit == "auto" {
            return Ok(Self::Auto);
        }

        let scale = match unit.as_str() {
            "gb/s" | "g" => GBPS,
            "mb/s" | "m" | "mbps" | "mbit/s" => MBPS,
            "kb/s" | "k" | "kbps" | "kbit/s" => KBPS,
            "b/s" | "" => 1,
            _ => return Err(invalid()),
        };
        let rate = parse_scaled(number, scale).ok_or_else(invalid)?;
        if rate > i32::MAX as u64 {
            return Err(invalid());
        }
        Ok(Self::Fixed(rate))
    }
}
