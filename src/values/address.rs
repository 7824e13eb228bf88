//! Hardware (MAC) addresses.

use crate::error::WextError;
use std::fmt;
use std::str::FromStr;

/// A 6-byte hardware address, used for BSSIDs and the associated AP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// The broadcast address, which drivers read as "any AP".
    pub const ANY: Self = Self([0xFF; 6]);

    /// The null address, which drivers read as "not associated".
    pub const OFF: Self = Self([0; 6]);

    /// Create a new address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the address.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Whether this is the null address.
    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "any" => return Ok(Self::ANY),
            "off" => return Ok(Self::OFF),
            _ => {}
        }

        let invalid = || WextError::invalid_argument(format!("invalid hardware address: {:?}", s));

        let mut bytes = [0u8; 6];
        let mut parts = s.split(|c| c == ':' || c == '-');
        for byte in bytes.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_display_is_uppercase_colon_separated() {
        let mac = MacAddr::new([0x61, 0x62, 0x63, 0x64, 0x65, 0x0a]);
        assert_eq!(mac.to_string(), "61:62:63:64:65:0A");
    }

    #[test]
    fn test_parse() {
        let mac: MacAddr = "61:62:63:64:65:66".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0x61, 0x62, 0x63, 0x64, 0x65, 0x66]);

        let mac: MacAddr = "aa-bb-cc-dd-ee-ff".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("any".parse::<MacAddr>().unwrap(), MacAddr::ANY);
        assert_eq!("OFF".parse::<MacAddr>().unwrap(), MacAddr::OFF);
        assert!(MacAddr::OFF.is_off());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "61:62:63:64:65", "61:62:63:64:65:66:67", "6:62:63:64:65:66", "zz:62:63:64:65:66"] {
            let err = text.parse::<MacAddr>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{:?}", text);
        }
    }
}
