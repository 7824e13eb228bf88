//! Domain values and their human-oriented representations.
//!
//! Every type here is a plain value with pure conversions to and from its
//! wire record and its textual form. Text that does not parse fails with
//! [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument), so a
//! malformed value never reaches the kernel.
//!
//! # Example
//!
//! ```
//! use wext::values::{Bitrate, Frequency, Mode};
//!
//! let freq: Frequency = "2.462GHz".parse().unwrap();
//! assert_eq!(freq.as_hz(), Some(2_462_000_000));
//! assert_eq!(freq.to_string(), "2.462GHz");
//!
//! let rate: Bitrate = "5.5Mb/s".parse().unwrap();
//! assert_eq!(rate, Bitrate::Fixed(5_500_000));
//!
//! let mode: Mode = "ad-hoc".parse().unwrap();
//! assert_eq!(mode.to_string(), "Ad-Hoc");
//! ```

mod access_point;
mod address;
mod bitrate;
mod encryption;
mod frequency;
mod mode;
mod power;
mod quality;
mod statistics;
mod threshold;

pub use access_point::AccessPoint;
pub use address::MacAddr;
pub use bitrate::Bitrate;
pub use encryption::{EncryptionMode, EncryptionState, Key};
pub use frequency::{ChannelEntry, Frequency};
pub use mode::Mode;
pub use power::{PowerKind, PowerManagement, PowerMode, TxPower};
pub use quality::{Level, Quality};
pub use statistics::Statistics;
pub use threshold::{RetryLimit, Threshold};

/// Split `"2.462 GHz"` into `("2.462", "ghz")`.
///
/// The unit is lowercased and may be empty.
pub(crate) fn split_unit(text: &str) -> (&str, String) {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(end);
    (number, unit.trim().to_ascii_lowercase())
}

/// Parse a non-negative decimal number and multiply it by `scale`, exactly.
///
/// Digits below one unit of the result are truncated. Returns `None` for
/// anything that is not `digits[.digits]` or that overflows.
pub(crate) fn parse_scaled(number: &str, scale: u64) -> Option<u64> {
    let (whole, frac) = match number.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (number, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().ok()?
    };
    let mut value = whole.checked_mul(scale)?;

    // Accumulate fractional digits while they still contribute whole units.
    let mut unit = scale;
    for digit in frac.bytes() {
        unit /= 10;
        if unit == 0 {
            break;
        }
        value = value.checked_add(u64::from(digit - b'0') * unit)?;
    }

    Some(value)
}

/// Render `value / unit` with trailing zeros removed, e.g. `5.5` or `54`.
pub(crate) fn format_trimmed(value: u64, unit: u64) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let width = unit.to_string().len() - 1;
    let frac = format!("{:0width$}", rem, width = width);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
