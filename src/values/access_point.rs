//! Scan results.

use super::{Bitrate, EncryptionState, Frequency, MacAddr, Mode, Quality};
use std::fmt;

/// One cell of a scan result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub bssid: MacAddr,
    /// Network name, empty for hidden networks.
    pub essid: String,
    /// The ESSID is hidden (not broadcast).
    pub hidden: bool,
    pub mode: Option<Mode>,
    pub frequency: Option<Frequency>,
    /// Channel number, when the driver reports one alongside the frequency.
    pub channel: Option<u16>,
    pub quality: Option<Quality>,
    pub rates: Vec<Bitrate>,
    pub encryption: Option<EncryptionState>,
    /// Protocol name (e.g. `IEEE 802.11bgn`).
    pub protocol: Option<String>,
    /// Driver-specific text events.
    pub extra: Vec<String>,
    /// Raw information elements.
    pub ie: Vec<u8>,
}

impl AccessPoint {
    pub fn new(bssid: MacAddr) -> Self {
        Self {
            bssid,
            essid: String::new(),
            hidden: false,
            mode: None,
            frequency: None,
            channel: None,
            quality: None,
            rates: Vec::new(),
            encryption: None,
            protocol: None,
            extra: Vec::new(),
            ie: Vec::new(),
        }
    }
}

impl fmt::Display for AccessPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bssid)?;
        if self.hidden {
            f.write_str(" <hidden>")?;
        } else {
            write!(f, " {:?}", self.essid)?;
        }
        if let Some(freq) = self.frequency {
            write!(f, " {}", freq)?;
        }
        if let Some(quality) = self.quality {
            write!(f, " {}", quality)?;
        }
        Ok(())
    }
}
