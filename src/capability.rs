//! Attributes by name.
//!
//! [`Capability`] lists every attribute [`Wireless`] exposes, so callers can
//! walk them (e.g. to dump an interface's configuration) or address one by
//! its name. Values come back as an [`Attribute`] and are written from text
//! through the value types' `FromStr`.

use crate::channel::Transport;
use crate::error::{Result, WextError};
use crate::values::{
    Bitrate, ChannelEntry, EncryptionMode, EncryptionState, Frequency, Key, MacAddr, Mode,
    PowerManagement, Quality, RetryLimit, Statistics, Threshold, TxPower,
};
use crate::wireless::Wireless;
use std::fmt;
use std::str::FromStr;

/// A named interface attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ProtocolName,
    Mode,
    Essid,
    Nickname,
    Nwid,
    Frequency,
    Channels,
    Bitrate,
    Bitrates,
    AccessPoint,
    Encryption,
    TxPower,
    RetryLimit,
    Rts,
    Sensitivity,
    PowerManagement,
    Fragmentation,
    Statistics,
    QualityMax,
    QualityAvg,
}

/// The value of a [`Capability`].
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Text(String),
    Mode(Mode),
    Nwid(Option<u32>),
    Frequency(Frequency),
    Channels(Vec<ChannelEntry>),
    Bitrate(Bitrate),
    Bitrates(Vec<Bitrate>),
    Address(MacAddr),
    Encryption(EncryptionState),
    TxPower(TxPower),
    RetryLimit(RetryLimit),
    Threshold(Threshold),
    Sensitivity(i32),
    PowerManagement(PowerManagement),
    Statistics(Statistics),
    Quality(Quality),
}

impl Capability {
    pub const ALL: [Capability; 20] = [
        Capability::ProtocolName,
        Capability::Mode,
        Capability::Essid,
        Capability::Nickname,
        Capability::Nwid,
        Capability::Frequency,
        Capability::Channels,
        Capability::Bitrate,
        Capability::Bitrates,
        Capability::AccessPoint,
        Capability::Encryption,
        Capability::TxPower,
        Capability::RetryLimit,
        Capability::Rts,
        Capability::Sensitivity,
        Capability::PowerManagement,
        Capability::Fragmentation,
        Capability::Statistics,
        Capability::QualityMax,
        Capability::QualityAvg,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ProtocolName => "name",
            Self::Mode => "mode",
            Self::Essid => "essid",
            Self::Nickname => "nickname",
            Self::Nwid => "nwid",
            Self::Frequency => "freq",
            Self::Channels => "channels",
            Self::Bitrate => "rate",
            Self::Bitrates => "rates",
            Self::AccessPoint => "ap",
            Self::Encryption => "key",
            Self::TxPower => "txpower",
            Self::RetryLimit => "retry",
            Self::Rts => "rts",
            Self::Sensitivity => "sens",
            Self::PowerManagement => "power",
            Self::Fragmentation => "frag",
            Self::Statistics => "stats",
            Self::QualityMax => "quality-max",
            Self::QualityAvg => "quality-avg",
        }
    }

    /// Whether [`write`](Self::write) is accepted.
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Self::Mode
                | Self::Essid
                | Self::Nickname
                | Self::Frequency
                | Self::Bitrate
                | Self::AccessPoint
                | Self::Encryption
                | Self::TxPower
                | Self::RetryLimit
                | Self::Rts
                | Self::Sensitivity
                | Self::PowerManagement
                | Self::Fragmentation
        )
    }

    /// Read the attribute from `wifi`.
    pub fn read<T: Transport>(self, wifi: &mut Wireless<T>) -> Result<Attribute> {
        Ok(match self {
            Self::ProtocolName => Attribute::Text(wifi.protocol_name()?),
            Self::Mode => Attribute::Mode(wifi.mode()?),
            Self::Essid => Attribute::Text(wifi.essid()?),
            Self::Nickname => Attribute::Text(wifi.nickname()?),
            Self::Nwid => Attribute::Nwid(wifi.nwid()?),
            Self::Frequency => Attribute::Frequency(wifi.frequency()?),
            Self::Channels => Attribute::Channels(wifi.channel_info()?),
            Self::Bitrate => Attribute::Bitrate(wifi.bitrate()?),
            Self::Bitrates => Attribute::Bitrates(wifi.bitrates()?),
            Self::AccessPoint => Attribute::Address(wifi.ap_addr()?),
            Self::Encryption => Attribute::Encryption(wifi.encryption()?),
            Self::TxPower => Attribute::TxPower(wifi.txpower()?),
            Self::RetryLimit => Attribute::RetryLimit(wifi.retry_limit()?),
            Self::Rts => Attribute::Threshold(wifi.rts()?),
            Self::Sensitivity => Attribute::Sensitivity(wifi.sensitivity()?),
            Self::PowerManagement => Attribute::PowerManagement(wifi.power_management()?),
            Self::Fragmentation => Attribute::Threshold(wifi.fragmentation()?),
            Self::Statistics => Attribute::Statistics(wifi.statistics()?),
            Self::QualityMax => Attribute::Quality(wifi.quality_max()?),
            Self::QualityAvg => Attribute::Quality(wifi.quality_avg()?),
        })
    }

    /// Parse `value` and write it to `wifi`.
    ///
    /// The value is parsed before anything is sent, so malformed text never
    /// reaches the kernel. For [`Capability::Encryption`] a mode name
    /// (`off`, `on`, `open`, `restricted`) changes the mode and anything else
    /// is taken as key material for the current slot.
    pub fn write<T: Transport>(self, wifi: &mut Wireless<T>, value: &str) -> Result<()> {
        match self {
            Self::Mode => wifi.set_mode(value.parse()?),
            Self::Essid => wifi.set_essid(value),
            Self::Nickname => wifi.set_nickname(value),
            Self::Frequency => wifi.set_frequency(value.parse()?),
            Self::Bitrate => wifi.set_bitrate(value.parse()?),
            Self::AccessPoint => wifi.set_ap_addr(value.parse()?),
            Self::Encryption => match value.parse::<EncryptionMode>() {
                Ok(mode) => wifi.set_encryption(mode),
                Err(_) => {
                    let key: Key = value.parse()?;
                    wifi.set_key(None, &key)
                }
            },
            Self::TxPower => wifi.set_txpower(value.parse()?),
            Self::RetryLimit => wifi.set_retry_limit(value.parse()?),
            Self::Rts => wifi.set_rts(value.parse()?),
            Self::Sensitivity => {
                let sensitivity = value.trim().parse().map_err(|_| {
                    WextError::invalid_argument(format!("invalid sensitivity: {:?}", value))
                })?;
                wifi.set_sensitivity(sensitivity)
            }
            Self::PowerManagement => wifi.set_power_management(value.parse()?),
            Self::Fragmentation => wifi.set_fragmentation(value.parse()?),
            read_only => Err(WextError::invalid_argument(format!(
                "{} is read-only",
                read_only
            ))),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = WextError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|cap| cap.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WextError::invalid_argument(format!("unknown attribute: {:?}", s)))
    }
}

fn join<I: IntoIterator<Item = D>, D: fmt::Display>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "\"{}\"", text),
            Self::Mode(mode) => write!(f, "{}", mode),
            Self::Nwid(None) => f.write_str("off"),
            Self::Nwid(Some(id)) => write!(f, "{:04X}", id),
            Self::Frequency(freq) => write!(f, "{}", freq),
            Self::Channels(channels) => {
                write!(f, "{} channels", channels.len())?;
                if !channels.is_empty() {
                    f.write_str(": ")?;
                    join(f, channels)?;
                }
                Ok(())
            }
            Self::Bitrate(rate) => write!(f, "{}", rate),
            Self::Bitrates(rates) => {
                write!(f, "{} bit rates", rates.len())?;
                if !rates.is_empty() {
                    f.write_str(": ")?;
                    join(f, rates)?;
                }
                Ok(())
            }
            Self::Address(mac) if mac.is_off() => f.write_str("Not-Associated"),
            Self::Address(mac) => write!(f, "{}", mac),
            Self::Encryption(state) => write!(f, "{}", state),
            Self::TxPower(power) => write!(f, "{}", power),
            Self::RetryLimit(limit) => write!(f, "{}", limit),
            Self::Threshold(threshold) => write!(f, "{}", threshold),
            Self::Sensitivity(value) => write!(f, "{}", value),
            Self::PowerManagement(power) => write!(f, "{}", power),
            Self::Statistics(stats) => write!(
                f,
                "{}  Rx invalid nwid:{}  Rx invalid crypt:{}  Rx invalid frag:{}  \
                 Tx excessive retries:{}  Invalid misc:{}  Missed beacon:{}",
                stats.quality,
                stats.discarded_nwid,
                stats.discarded_code,
                stats.discarded_fragment,
                stats.discarded_retries,
                stats.discarded_misc,
                stats.missed_beacon
            ),
            Self::Quality(quality) => write!(f, "{}", quality),
        }
    }
}
