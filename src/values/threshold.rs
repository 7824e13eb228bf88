//! RTS and fragmentation thresholds, and retry limits.

use crate::codec::consts::*;
use crate::codec::Param;
use crate::error::WextError;
use std::fmt;
use std::str::FromStr;

/// An RTS or fragmentation threshold in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Threshold {
    Off,
    Auto,
    Fixed(i32),
}

impl Threshold {
    pub fn from_param(param: Param) -> Self {
        if param.disabled {
            Self::Off
        } else if !param.fixed && param.value == -1 {
            Self::Auto
        } else {
            Self::Fixed(param.value)
        }
    }

    pub fn to_param(self) -> Param {
        match self {
            Self::Off => Param::disabled(),
            Self::Auto => Param {
                value: -1,
                ..Default::default()
            },
            Self::Fixed(value) => Param::fixed(value),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::Auto => f.write_str("auto"),
            Self::Fixed(value) => write!(f, "{} B", value),
        }
    }
}

impl FromStr for Threshold {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "off" => Ok(Self::Off),
            "auto" | "fixed" => Ok(Self::Auto),
            other => other
                .trim_end_matches('b')
                .trim()
                .parse::<u16>()
                .map(|value| Self::Fixed(i32::from(value)))
                .map_err(|_| WextError::invalid_argument(format!("invalid threshold: {:?}", s))),
        }
    }
}

/// MAC retransmission limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryLimit {
    pub disabled: bool,
    /// The value is a lifetime in microseconds rather than a count.
    pub lifetime: bool,
    pub value: i32,
    /// `IW_RETRY_MIN`, `IW_RETRY_MAX`, `IW_RETRY_RELATIVE`, `IW_RETRY_SHORT`
    /// and `IW_RETRY_LONG` bits.
    pub modifier: u16,
}

impl RetryLimit {
    pub const OFF: Self = Self {
        disabled: true,
        lifetime: false,
        value: 0,
        modifier: 0,
    };

    /// A retry count.
    pub const fn limit(count: i32) -> Self {
        Self {
            disabled: false,
            lifetime: false,
            value: count,
            modifier: 0,
        }
    }

    /// A retry lifetime in microseconds.
    pub const fn lifetime(micros: i32) -> Self {
        Self {
            disabled: false,
            lifetime: true,
            value: micros,
            modifier: 0,
        }
    }

    pub fn from_param(param: Param) -> Self {
        if param.disabled {
            return Self::OFF;
        }
        Self {
            disabled: false,
            lifetime: param.flags & IW_RETRY_TYPE == IW_RETRY_LIFETIME,
            value: param.value,
            modifier: param.flags & IW_RETRY_MODIFIER,
        }
    }

    pub fn to_param(self) -> Param {
        if self.disabled {
            return Param::disabled();
        }
        let kind = if self.lifetime {
            IW_RETRY_LIFETIME
        } else {
            IW_RETRY_LIMIT
        };
        Param {
            value: self.value,
            fixed: false,
            disabled: false,
            flags: kind | (self.modifier & IW_RETRY_MODIFIER),
        }
    }
}

impl fmt::Display for RetryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            return f.write_str("off");
        }
        let prefix = if self.modifier & IW_RETRY_MIN != 0 {
            "min "
        } else if self.modifier & IW_RETRY_MAX != 0 {
            "max "
        } else {
            ""
        };
        if self.lifetime {
            write!(f, "{}lifetime:{}us", prefix, self.value)
        } else {
            write!(f, "{}limit:{}", prefix, self.value)
        }
    }
}

impl FromStr for RetryLimit {
    type Err = WextError;

    /// Accepts `off`, `<count>`, `limit <count>` and `lifetime <micros>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let invalid = || WextError::invalid_argument(format!("invalid retry limit: {:?}", s));
        if lower == "off" {
            return Ok(Self::OFF);
        }

        let (lifetime, number) = match lower.split_once(char::is_whitespace) {
            Some(("limit", number)) => (false, number.trim()),
            Some(("lifetime", number)) => (true, number.trim()),
            Some(_) => return Err(invalid()),
            None => (false, lower.as_str()),
        };
        let value: i32 = number.parse().map_err(|_| invalid())?;
        if value < 0 {
            return Err(invalid());
        }
        Ok(if lifetime {
            Self::lifetime(value)
        } else {
            Self::limit(value)
        })
    }
}
