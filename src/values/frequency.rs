//! Frequencies and channels.

use super::{parse_scaled, split_unit};
use crate::codec::consts::IW_FREQ_FIXED;
use crate::codec::FreqRecord;
use crate::error::WextError;
use std::fmt;
use std::str::FromStr;

/// Largest `m` the kernel treats as a channel number when `e == 0`.
const MAX_CHANNEL: i32 = 1000;

/// Mantissas at or above this are shifted into the exponent.
const MANTISSA_LIMIT: u64 = 1_000_000_000;

const GHZ: u64 = 1_000_000_000;
const MHZ: u64 = 1_000_000;
const KHZ: u64 = 1_000;

/// A radio frequency, or a channel number when the driver reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// A channel number (0..=1000).
    Channel(u16),
    /// A frequency in hertz. Values at or below 1000 Hz cannot be carried
    /// by the kernel record and are rejected by the parser.
    Hz(u64),
}

impl Frequency {
    /// Decode a kernel `iw_freq`.
    pub fn from_record(rec: FreqRecord) -> Self {
        if rec.e == 0 && (0..=MAX_CHANNEL).contains(&rec.m) {
            return Self::Channel(rec.m as u16);
        }

        let m = rec.m.max(0) as u64;
        let hz = if rec.e >= 0 {
            10u64
                .checked_pow(rec.e as u32)
                .and_then(|scale| m.checked_mul(scale))
                .unwrap_or(u64::MAX)
        } else {
            10u64
                .checked_pow(rec.e.unsigned_abs() as u32)
                .map_or(0, |scale| m / scale)
        };
        Self::Hz(hz)
    }

    /// Encode as a kernel `iw_freq`, marked fixed.
    ///
    /// The mantissa is kept below 10^9 by moving decades into the exponent;
    /// digits shifted out are truncated.
    pub fn to_record(self) -> FreqRecord {
        let (m, e) = match self {
            Self::Channel(channel) => (i64::from(channel), 0),
            Self::Hz(hz) => {
                let mut m = hz;
                let mut e = 0i16;
                while m >= MANTISSA_LIMIT {
                    m /= 10;
                    e += 1;
                }
                if e == 0 && m <= MAX_CHANNEL as u64 {
                    // Would read back as a channel.
                    m /= 10;
                    e = 1;
                }
                (m as i64, e)
            }
        };

        FreqRecord {
            m: m as i32,
            e,
            index: 0,
            flags: IW_FREQ_FIXED,
        }
    }

    /// The frequency in hertz, if this is not a bare channel number.
    pub fn as_hz(&self) -> Option<u64> {
        match self {
            Self::Hz(hz) => Some(*hz),
            Self::Channel(_) => None,
        }
    }

    /// The channel number, if this is a bare channel number.
    pub fn channel(&self) -> Option<u16> {
        match self {
            Self::Channel(channel) => Some(*channel),
            Self::Hz(_) => None,
        }
    }
}

fn write_scaled(f: &mut fmt::Formatter<'_>, hz: u64, unit: u64, suffix: &str) -> fmt::Result {
    let thousandths = (u128::from(hz) * 1000 + u128::from(unit) / 2) / u128::from(unit);
    write!(f, "{}.{:03}{}", thousandths / 1000, thousandths % 1000, suffix)
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Channel(channel) => write!(f, "Channel {}", channel),
            Self::Hz(hz) if hz >= GHZ => write_scaled(f, hz, GHZ, "GHz"),
            Self::Hz(hz) if hz >= MHZ => write_scaled(f, hz, MHZ, "MHz"),
            Self::Hz(hz) if hz >= KHZ => write_scaled(f, hz, KHZ, "kHz"),
            Self::Hz(hz) => write!(f, "{}Hz", hz),
        }
    }
}

impl FromStr for Frequency {
    type Err = WextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WextError::invalid_argument(format!("invalid frequency: {:?}", s));

        let lower = s.trim().to_ascii_lowercase();
        if let Some(channel) = lower.strip_prefix("channel") {
            let channel: u16 = channel.trim().parse().map_err(|_| invalid())?;
            if i32::from(channel) > MAX_CHANNEL {
                return Err(invalid());
            }
            return Ok(Self::Channel(channel));
        }

        let (number, unit) = split_unit(&lower);
        let scale = match unit.as_str() {
            "ghz" | "g" => GHZ,
            "mhz" | "m" => MHZ,
            "khz" | "k" => KHZ,
            "hz" => 1,
            "" => {
                // Bare integers: small ones are channels, the rest hertz.
                let value: u64 = number.parse().map_err(|_| invalid())?;
                return if value <= MAX_CHANNEL as u64 {
                    Ok(Self::Channel(value as u16))
                } else {
                    Ok(Self::Hz(value))
                };
            }
            _ => return Err(invalid()),
        };

        let hz = parse_scaled(number, scale).ok_or_else(invalid)?;
        if hz <= MAX_CHANNEL as u64 {
            return Err(WextError::invalid_argument(format!(
                "frequency {:?} is below the smallest representable value",
                s
            )));
        }
        Ok(Self::Hz(hz))
    }
}

/// One entry of a driver's channel table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEntry {
    pub channel: u8,
    pub frequency: Frequency,
}

impl fmt::Display for ChannelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel {:02} : {}", self.channel, self.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_encode_2462_mhz() {
        let rec = Frequency::Hz(2_462_000_000).to_record();
        assert_eq!(rec.m, 246_200_000);
        assert_eq!(rec.e, 1);
        assert_eq!(rec.flags, IW_FREQ_FIXED);
    }

    #[test]
    fn test_encode_keeps_small_mantissa_exact() {
        let rec = Frequency::Hz(5_180_000_000).to_record();
        assert_eq!((rec.m, rec.e), (518_000_000, 1));
        let rec = Frequency::Hz(868_100_000).to_record();
        assert_eq!((rec.m, rec.e), (868_100_000, 0));
    }

    #[test]
    fn test_decode_channel() {
        let rec = FreqRecord {
            m: 11,
            e: 0,
            ..Default::default()
        };
        assert_eq!(Frequency::from_record(rec), Frequency::Channel(11));
        let rec = FreqRecord {
            m: 1000,
            e: 0,
            ..Default::default()
        };
        assert_eq!(Frequency::from_record(rec), Frequency::Channel(1000));
    }

    #[test]
    fn test_decode_hz() {
        let rec = FreqRecord {
            m: 2412,
            e: 6,
            ..Default::default()
        };
        assert_eq!(Frequency::from_record(rec), Frequency::Hz(2_412_000_000));
        let rec = FreqRecord {
            m: 1001,
            e: 0,
            ..Default::default()
        };
        assert_eq!(Frequency::from_record(rec), Frequency::Hz(1001));
    }

    #[test]
    fn test_decode_saturates_on_absurd_exponent() {
        let rec = FreqRecord {
            m: 5,
            e: 40,
            ..Default::default()
        };
        assert_eq!(Frequency::from_record(rec), Frequency::Hz(u64::MAX));
    }

    #[test]
    fn test_record_round_trip() {
        for hz in [2_412_000_000u64, 2_462_000_000, 5_745_000_000, 433_920_000, 1_001] {
            let freq = Frequency::Hz(hz);
            assert_eq!(Frequency::from_record(freq.to_record()), freq, "{}", hz);
        }
        for channel in [0u16, 1, 14, 165, 1000] {
            let freq = Frequency::Channel(channel);
            assert_eq!(Frequency::from_record(freq.to_record()), freq);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Frequency::Hz(2_462_000_000).to_string(), "2.462GHz");
        assert_eq!(Frequency::Hz(5_180_000_000).to_string(), "5.180GHz");
        assert_eq!(Frequency::Hz(868_100_000).to_string(), "868.100MHz");
        assert_eq!(Frequency::Hz(13_560).to_string(), "13.560kHz");
        assert_eq!(Frequency::Hz(2_462_000_400).to_string(), "2.462GHz");
        assert_eq!(Frequency::Channel(6).to_string(), "Channel 6");
    }

    #[test]
    fn test_parse_units() {
        let cases = [
            ("2.462GHz", Frequency::Hz(2_462_000_000)),
            ("2.462 ghz", Frequency::Hz(2_462_000_000)),
            ("2462MHz", Frequency::Hz(2_462_000_000)),
            ("2462M", Frequency::Hz(2_462_000_000)),
            ("13.56kHz", Frequency::Hz(13_560)),
            ("2462000000Hz", Frequency::Hz(2_462_000_000)),
            ("2462000000", Frequency::Hz(2_462_000_000)),
            ("11", Frequency::Channel(11)),
            ("Channel 6", Frequency::Channel(6)),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<Frequency>().unwrap(), expected, "{}", text);
        }
    }

    #[test]
    fn test_parse_rejects() {
        for text in ["", "fast", "2.4.6GHz", "12THz", "500Hz", "channel 1001", "-5"] {
            let err = text.parse::<Frequency>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{:?}", text);
        }
    }

    #[test]
    fn test_display_parse_round_trip_to_three_decimals() {
        for hz in [2_412_000_000u64, 2_484_000_000, 5_825_000_000, 915_000_000] {
            let freq = Frequency::Hz(hz);
            assert_eq!(freq.to_string().parse::<Frequency>().unwrap(), freq);
        }
        // Sub-kilohertz detail beyond three decimals of GHz is not kept.
        let freq = Frequency::Hz(2_462_000_400);
        assert_eq!(
            freq.to_string().parse::<Frequency>().unwrap(),
            Frequency::Hz(2_462_000_000)
        );
    }
}
