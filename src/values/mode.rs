//! Operating modes.

use crate::codec::consts::*;
use crate::error::WextError;
use std::fmt;
use std::str::FromStr;

/// The operating mode of a wireless interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Auto,
    AdHoc,
    Managed,
    Master,
    Repeater,
    Secondary,
    Monitor,
    Mesh,
    /// A mode code newer than this crate.
    Unknown(u32),
}

impl Mode {
    /// Every named mode, in code order.
    pub const ALL: [Mode; 8] = [
        Mode::Auto,
        Mode::AdHoc,
        Mode::Managed,
        Mode::Master,
        Mode::Repeater,
        Mode::Secondary,
        Mode::Monitor,
        Mode::Mesh,
    ];

    pub const fn from_code(code: u32) -> Self {
        match code {
            IW_MODE_AUTO => Self::Auto,
            IW_MODE_ADHOC => Self::AdHoc,
            IW_MODE_INFRA => Self::Managed,
            IW_MODE_MASTER => Self::Master,
            IW_MODE_REPEAT => Self::Repeater,
            IW_MODE_SECOND => Self::Secondary,
            IW_MODE_MONITOR => Self::Monitor,
            IW_MODE_MESH => Self::Mesh,
            other => Self::Unknown(other),
        }
    }

    pub const fn code(self) -> u32 {
        match self {
            Self::Auto => IW_MODE_AUTO,
            Self::AdHoc => IW_MODE_ADHOC,
            Self::Managed => IW_MODE_INFRA,
            Self::Master => IW_MODE_MASTER,
            Self::Repeater => IW_MODE_REPEAT,
            Self::Secondary => IW_MODE_SECOND,
            Self::Monitor => IW_MODE_MONITOR,
            Self::Mesh => IW_MODE_MESH,
            Self::Unknown(code) => code,
        }
    }

    /// The conventional display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::AdHoc => "Ad-Hoc",
            Self::Managed => "Managed",
            Self::Master => "Master",
            Self::Repeater => "Repeater",
            Self::Secondary => "Secondary",
            Self::Monitor => "Monitor",
            Self::Mesh => "Mesh",
            Self::Unknown(_) => "Unknown/bug",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown/bug ({})", code),
            mode => f.write_str(mode.name()),
        }
    }
}

impl FromStr for Mode {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "ad-hoc" | "adhoc" => Ok(Self::AdHoc),
            "managed" => Ok(Self::Managed),
            "master" => Ok(Self::Master),
            "repeater" | "repeat" => Ok(Self::Repeater),
            "secondary" | "second" => Ok(Self::Secondary),
            "monitor" => Ok(Self::Monitor),
            "mesh" => Ok(Self::Mesh),
            _ => Err(WextError::invalid_argument(format!("unknown mode: {:?}", s))),
        }
    }
}
