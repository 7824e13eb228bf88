//! Link quality.
//!
//! The kernel reports signal and noise either as dBm, as RCPI, or on a
//! driver-relative scale. Each response carries flags saying which; those
//! flags alone decide the interpretation.

use crate::codec::consts::*;
use crate::codec::QualityRecord;
use std::fmt;

/// A signal or noise level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Absolute level in dBm.
    Dbm(i16),
    /// Driver-relative level; compare against the range's maximum.
    Relative(u8),
    /// The driver marked this level invalid.
    Invalid,
}

impl Level {
    fn decode(raw: u8, updated: u8, invalid_flag: u8) -> Self {
        if updated & invalid_flag != 0 {
            Self::Invalid
        } else if updated & IW_QUAL_RCPI != 0 {
            // RCPI: 0..=220 in half-dB steps from -110 dBm. Half steps round
            // up, so 141 (-39.5 dBm) reads as -39.
            Self::Dbm((i16::from(raw) + 1) / 2 - 110)
        } else if updated & IW_QUAL_DBM != 0 {
            // Levels from 64 up wrap to negative dBm.
            let raw = i16::from(raw);
            Self::Dbm(if raw >= 64 { raw - 0x100 } else { raw })
        } else {
            Self::Relative(raw)
        }
    }

    /// The raw byte a driver reports for this level under `updated` flags.
    ///
    /// `None` for [`Level::Invalid`], for an absolute level when the flags
    /// say relative (or the reverse), and for dBm values the encoding
    /// cannot carry: -192..=63 for plain dBm, -110..=0 for RCPI.
    pub fn to_raw(&self, updated: u8) -> Option<u8> {
        let absolute = updated & (IW_QUAL_DBM | IW_QUAL_RCPI) != 0;
        match *self {
            Self::Invalid => None,
            Self::Relative(raw) => (!absolute).then_some(raw),
            Self::Dbm(dbm) if updated & IW_QUAL_RCPI != 0 => {
                u8::try_from((i32::from(dbm) + 110) * 2).ok().filter(|raw| *raw <= 220)
            }
            Self::Dbm(dbm) if absolute => {
                if (-192..=63).contains(&dbm) {
                    Some(dbm.rem_euclid(0x100) as u8)
                } else {
                    None
                }
            }
            Self::Dbm(_) => None,
        }
    }

    /// The level in dBm, if absolute.
    pub fn dbm(&self) -> Option<i16> {
        match self {
            Self::Dbm(dbm) => Some(*dbm),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dbm(dbm) => write!(f, "{} dBm", dbm),
            Self::Relative(level) => write!(f, "{}", level),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Decoded link quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quality {
    /// Link quality on the driver's scale, `None` when marked invalid.
    pub quality: Option<u8>,
    pub signal: Level,
    pub noise: Level,
    /// Raw `updated` flags as reported.
    pub updated: u8,
}

impl Quality {
    pub fn from_record(rec: QualityRecord) -> Self {
        let quality = if rec.updated & IW_QUAL_QUAL_INVALID != 0 {
            None
        } else {
            Some(rec.qual)
        };

        Self {
            quality,
            signal: Level::decode(rec.level, rec.updated, IW_QUAL_LEVEL_INVALID),
            noise: Level::decode(rec.noise, rec.updated, IW_QUAL_NOISE_INVALID),
            updated: rec.updated,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quality {
            Some(quality) => write!(f, "Quality={}", quality)?,
            None => f.write_str("Quality=invalid")?,
        }
        write!(f, "  Signal level={}  Noise level={}", self.signal, self.noise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: u8, noise: u8, updated: u8) -> QualityRecord {
        QualityRecord {
            qual: 70,
            level,
            noise,
            updated,
        }
    }

    #[test]
    fn test_dbm_levels_wrap_negative() {
        let q = Quality::from_record(record(0xD8, 0xA1, IW_QUAL_DBM | IW_QUAL_ALL_UPDATED));
        assert_eq!(q.quality, Some(70));
        assert_eq!(q.signal, Level::Dbm(-40));
        assert_eq!(q.noise, Level::Dbm(-95));
    }

    #[test]
    fn test_small_dbm_levels_stay_positive() {
        let q = Quality::from_record(record(10, 0, IW_QUAL_DBM));
        assert_eq!(q.signal, Level::Dbm(10));
    }

    #[test]
    fn test_rcpi() {
        let q = Quality::from_record(record(140, 30, IW_QUAL_RCPI));
        assert_eq!(q.signal, Level::Dbm(-40));
        assert_eq!(q.noise, Level::Dbm(-95));
    }

    #[test]
    fn test_rcpi_half_steps_round_up() {
        let q = Quality::from_record(record(141, 0, IW_QUAL_RCPI));
        assert_eq!(q.signal, Level::Dbm(-39));
        assert_eq!(q.noise, Level::Dbm(-110));
    }

    #[test]
    fn test_to_raw() {
        assert_eq!(Level::Dbm(-40).to_raw(IW_QUAL_DBM), Some(0xD8));
        assert_eq!(Level::Dbm(-95).to_raw(IW_QUAL_DBM), Some(0xA1));
        assert_eq!(Level::Dbm(10).to_raw(IW_QUAL_DBM), Some(10));
        assert_eq!(Level::Dbm(-200).to_raw(IW_QUAL_DBM), None);
        assert_eq!(Level::Dbm(64).to_raw(IW_QUAL_DBM), None);

        assert_eq!(Level::Dbm(-40).to_raw(IW_QUAL_RCPI), Some(140));
        assert_eq!(Level::Dbm(-111).to_raw(IW_QUAL_RCPI), None);
        assert_eq!(Level::Dbm(1).to_raw(IW_QUAL_RCPI), None);

        assert_eq!(Level::Relative(60).to_raw(0), Some(60));
        assert_eq!(Level::Relative(60).to_raw(IW_QUAL_DBM), None);
        assert_eq!(Level::Dbm(-40).to_raw(0), None);
        assert_eq!(Level::Invalid.to_raw(IW_QUAL_DBM), None);
    }

    #[test]
    fn test_to_raw_inverts_decode() {
        for raw in 0..=u8::MAX {
            let level = Level::decode(raw, IW_QUAL_DBM, IW_QUAL_LEVEL_INVALID);
            assert_eq!(level.to_raw(IW_QUAL_DBM), Some(raw));
        }
        for raw in (0..=220u8).step_by(2) {
            let level = Level::decode(raw, IW_QUAL_RCPI, IW_QUAL_LEVEL_INVALID);
            assert_eq!(level.to_raw(IW_QUAL_RCPI), Some(raw));
        }
    }

    #[test]
    fn test_relative_without_flags() {
        let q = Quality::from_record(record(60, 5, 0));
        assert_eq!(q.signal, Level::Relative(60));
        assert_eq!(q.noise, Level::Relative(5));
    }

    #[test]
    fn test_invalid_flags() {
        let q = Quality::from_record(record(
            0xD8,
            0,
            IW_QUAL_DBM | IW_QUAL_QUAL_INVALID | IW_QUAL_NOISE_INVALID,
        ));
        assert_eq!(q.quality, None);
        assert_eq!(q.signal, Level::Dbm(-40));
        assert_eq!(q.noise, Level::Invalid);
    }

    #[test]
    fn test_display() {
        let q = Quality::from_record(record(0xD8, 0xA1, IW_QUAL_DBM));
        assert_eq!(q.to_string(), "Quality=70  Signal level=-40 dBm  Noise level=-95 dBm");
    }
}
