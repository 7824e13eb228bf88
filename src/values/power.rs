//! Transmit power and power management.

use super::split_unit;
use crate::codec::consts::*;
use crate::codec::Param;
use crate::error::WextError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Transmit power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxPower {
    Dbm(i32),
    MilliWatt(i32),
    /// Driver-relative units with no absolute meaning.
    Relative(i32),
    /// Radio transmitter off.
    Off,
    /// The driver picks the power.
    Auto,
}

/// Convert dBm to mW, rounding down.
pub fn dbm_to_mw(dbm: i32) -> i32 {
    10f64.powf(f64::from(dbm) / 10.0).floor() as i32
}

/// Convert mW to dBm, rounding up.
pub fn mw_to_dbm(mw: i32) -> i32 {
    if mw <= 0 {
        return i32::MIN;
    }
    (10.0 * f64::from(mw).log10()).ceil() as i32
}

impl TxPower {
    pub fn from_param(param: Param) -> Self {
        if param.disabled {
            return Self::Off;
        }
        if !param.fixed && param.value == -1 {
            return Self::Auto;
        }
        match param.flags & IW_TXPOW_TYPE {
            IW_TXPOW_MWATT => Self::MilliWatt(param.value),
            IW_TXPOW_RELATIVE => Self::Relative(param.value),
            _ => Self::Dbm(param.value),
        }
    }

    pub fn to_param(self) -> Param {
        match self {
            Self::Off => Param::disabled(),
            Self::Auto => Param {
                value: -1,
                ..Default::default()
            },
            Self::Dbm(dbm) => Param {
                flags: IW_TXPOW_DBM,
                ..Param::fixed(dbm)
            },
            Self::MilliWatt(mw) => Param {
                flags: IW_TXPOW_MWATT,
                ..Param::fixed(mw)
            },
            Self::Relative(value) => Param {
                flags: IW_TXPOW_RELATIVE,
                ..Param::fixed(value)
            },
        }
    }

    /// The power in dBm, converting from milliwatts when needed.
    pub fn to_dbm(&self) -> Option<i32> {
        match *self {
            Self::Dbm(dbm) => Some(dbm),
            Self::MilliWatt(mw) => Some(mw_to_dbm(mw)),
            _ => None,
        }
    }

    /// The power in milliwatts, converting from dBm when needed.
    pub fn to_mw(&self) -> Option<i32> {
        match *self {
            Self::Dbm(dbm) => Some(dbm_to_mw(dbm)),
            Self::MilliWatt(mw) => Some(mw),
            _ => None,
        }
    }
}

impl fmt::Display for TxPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dbm(dbm) => write!(f, "{} dBm", dbm),
            Self::MilliWatt(mw) => write!(f, "{} mW", mw),
            Self::Relative(value) => write!(f, "{}", value),
            Self::Off => f.write_str("off"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for TxPower {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "off" => return Ok(Self::Off),
            "auto" | "on" => return Ok(Self::Auto),
            _ => {}
        }

        let invalid = || WextError::invalid_argument(format!("invalid transmit power: {:?}", s));
        let (body, negative) = match lower.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (lower.as_str(), false),
        };
        let (number, unit) = split_unit(body);
        let value: i32 = number.parse().map_err(|_| invalid())?;
        let value = if negative { -value } else { value };

        match unit.as_str() {
            "" | "dbm" => Ok(Self::Dbm(value)),
            "mw" if !negative => Ok(Self::MilliWatt(value)),
            _ => Err(invalid()),
        }
    }
}

/// Which power-management parameter a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerKind {
    /// No specific parameter; just on.
    Any,
    /// Sleep period between wakeups.
    Period,
    /// Inactivity timeout before sleeping.
    Timeout,
    Unknown(u16),
}

/// Which frames a power-managed interface still receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerMode {
    Default,
    Unicast,
    Multicast,
    All,
    Force,
    Repeater,
    Unknown(u16),
}

/// Power management settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerManagement {
    pub enabled: bool,
    pub kind: PowerKind,
    pub mode: PowerMode,
    /// Period or timeout in microseconds.
    pub value: i32,
    /// `IW_POWER_MIN`, `IW_POWER_MAX` and `IW_POWER_RELATIVE` bits.
    pub modifier: u16,
}

impl PowerManagement {
    pub const OFF: Self = Self {
        enabled: false,
        kind: PowerKind::Any,
        mode: PowerMode::Default,
        value: 0,
        modifier: 0,
    };

    pub const ON: Self = Self {
        enabled: true,
        ..Self::OFF
    };

    /// Power saving with the given sleep period.
    pub fn period(period: Duration) -> Self {
        Self {
            kind: PowerKind::Period,
            value: micros(period),
            ..Self::ON
        }
    }

    /// Power saving after the given inactivity timeout.
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            kind: PowerKind::Timeout,
            value: micros(timeout),
            ..Self::ON
        }
    }

    pub fn from_param(param: Param) -> Self {
        if param.disabled {
            return Self::OFF;
        }

        let kind = match param.flags & IW_POWER_TYPE {
            0 => PowerKind::Any,
            IW_POWER_PERIOD => PowerKind::Period,
            IW_POWER_TIMEOUT => PowerKind::Timeout,
            other => PowerKind::Unknown(other),
        };
        let mode = match param.flags & IW_POWER_MODE {
            0 => PowerMode::Default,
            IW_POWER_UNICAST_R => PowerMode::Unicast,
            IW_POWER_MULTICAST_R => PowerMode::Multicast,
            IW_POWER_ALL_R => PowerMode::All,
            IW_POWER_FORCE_S => PowerMode::Force,
            IW_POWER_REPEATER => PowerMode::Repeater,
            other => PowerMode::Unknown(other),
        };

        Self {
            enabled: true,
            kind,
            mode,
            value: param.value,
            modifier: param.flags & IW_POWER_MODIFIER,
        }
    }

    pub fn to_param(self) -> Param {
        if !self.enabled {
            return Param::disabled();
        }

        let kind = match self.kind {
            PowerKind::Any => IW_POWER_ON,
            PowerKind::Period => IW_POWER_PERIOD,
            PowerKind::Timeout => IW_POWER_TIMEOUT,
            PowerKind::Unknown(bits) => bits & IW_POWER_TYPE,
        };
        let mode = match self.mode {
            PowerMode::Default => 0,
            PowerMode::Unicast => IW_POWER_UNICAST_R,
            PowerMode::Multicast => IW_POWER_MULTICAST_R,
            PowerMode::All => IW_POWER_ALL_R,
            PowerMode::Force => IW_POWER_FORCE_S,
            PowerMode::Repeater => IW_POWER_REPEATER,
            PowerMode::Unknown(bits) => bits & IW_POWER_MODE,
        };

        Param {
            value: self.value,
            fixed: false,
            disabled: false,
            flags: kind | mode | (self.modifier & IW_POWER_MODIFIER),
        }
    }
}

fn micros(duration: Duration) -> i32 {
    i32::try_from(duration.as_micros()).unwrap_or(i32::MAX)
}

impl fmt::Display for PowerManagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return f.write_str("off");
        }
        match self.kind {
            PowerKind::Period => write!(f, "period:{}us", self.value)?,
            PowerKind::Timeout => write!(f, "timeout:{}us", self.value)?,
            _ => f.write_str("on")?,
        }
        match self.mode {
            PowerMode::Unicast => f.write_str(" mode:Unicast only received"),
            PowerMode::Multicast => f.write_str(" mode:Multicast only received"),
            PowerMode::All => f.write_str(" mode:All packets received"),
            PowerMode::Force => f.write_str(" mode:Force sending"),
            PowerMode::Repeater => f.write_str(" mode:Repeat multicasts"),
            _ => Ok(()),
        }
    }
}

impl FromStr for PowerManagement {
    type Err = WextError;

    /// Accepts `off`, `on`, `period <time>` and `timeout <time>`, where
    /// `<time>` is a number of seconds or carries an `s`, `ms` or `us`
    /// suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let invalid = || WextError::invalid_argument(format!("invalid power management: {:?}", s));

        match lower.as_str() {
            "off" => return Ok(Self::OFF),
            "on" => return Ok(Self::ON),
            _ => {}
        }

        let (word, rest) = lower.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let duration = parse_duration(rest).ok_or_else(invalid)?;
        match word {
            "period" => Ok(Self::period(duration)),
            "timeout" => Ok(Self::timeout(duration)),
            _ => Err(invalid()),
        }
    }
}

fn parse_duration(text: &str) -> Option<Duration> {
    let (number, unit) = split_unit(text);
    let scale = match unit.as_str() {
        "" | "s" => 1_000_000,
        "ms" => 1_000,
        "us" | "u" => 1,
        _ => return None,
    };
    super::parse_scaled(number, scale).map(Duration::from_micros)
}
