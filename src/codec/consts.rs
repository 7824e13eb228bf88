//! Constants from the Linux `wireless.h` ABI (Wireless Extensions 22).
//!
//! Values are reproduced as the kernel defines them; none of them are
//! tunable. Event stream offsets depend on the host's pointer width and
//! are derived from the record layouts.

use super::record::{IwPoint, IwReqData};
use std::mem::{align_of, size_of};

/// Length of an interface name buffer, including the trailing NUL.
pub const IFNAMSIZ: usize = 16;

/// Maximum ESSID length (without trailing NUL).
pub const IW_ESSID_MAX_SIZE: usize = 32;

/// Maximum length of an encoding token (key material).
pub const IW_ENCODING_TOKEN_MAX: usize = 64;

/// Default scan buffer size used by `iwlist`.
pub const IW_SCAN_MAX_DATA: usize = 4096;

pub const IW_MAX_FREQUENCIES: usize = 32;
pub const IW_MAX_BITRATES: usize = 32;
pub const IW_MAX_TXPOWER: usize = 8;
pub const IW_MAX_ENCODING_SIZES: usize = 8;

/// `ARPHRD_ETHER`, the address family used for hardware addresses.
pub const ARPHRD_ETHER: u16 = 1;

// ==================== Modes ====================

pub const IW_MODE_AUTO: u32 = 0;
pub const IW_MODE_ADHOC: u32 = 1;
pub const IW_MODE_INFRA: u32 = 2;
pub const IW_MODE_MASTER: u32 = 3;
pub const IW_MODE_REPEAT: u32 = 4;
pub const IW_MODE_SECOND: u32 = 5;
pub const IW_MODE_MONITOR: u32 = 6;
pub const IW_MODE_MESH: u32 = 7;

// ==================== Frequency flags ====================

pub const IW_FREQ_AUTO: u8 = 0x00;
pub const IW_FREQ_FIXED: u8 = 0x01;

// ==================== Quality flags ====================

pub const IW_QUAL_QUAL_UPDATED: u8 = 0x01;
pub const IW_QUAL_LEVEL_UPDATED: u8 = 0x02;
pub const IW_QUAL_NOISE_UPDATED: u8 = 0x04;
pub const IW_QUAL_ALL_UPDATED: u8 = 0x07;
pub const IW_QUAL_DBM: u8 = 0x08;
pub const IW_QUAL_QUAL_INVALID: u8 = 0x10;
pub const IW_QUAL_LEVEL_INVALID: u8 = 0x20;
pub const IW_QUAL_NOISE_INVALID: u8 = 0x40;
pub const IW_QUAL_RCPI: u8 = 0x80;

// ==================== Encoding flags ====================

pub const IW_ENCODE_INDEX: u16 = 0x00FF;
pub const IW_ENCODE_FLAGS: u16 = 0xFF00;
pub const IW_ENCODE_MODE: u16 = 0xF000;
pub const IW_ENCODE_DISABLED: u16 = 0x8000;
pub const IW_ENCODE_ENABLED: u16 = 0x0000;
pub const IW_ENCODE_RESTRICTED: u16 = 0x4000;
pub const IW_ENCODE_OPEN: u16 = 0x2000;
pub const IW_ENCODE_NOKEY: u16 = 0x0800;
pub const IW_ENCODE_TEMP: u16 = 0x0400;

// ==================== Power management flags ====================

pub const IW_POWER_ON: u16 = 0x0000;
pub const IW_POWER_TYPE: u16 = 0xF000;
pub const IW_POWER_PERIOD: u16 = 0x1000;
pub const IW_POWER_TIMEOUT: u16 = 0x2000;
pub const IW_POWER_MODE: u16 = 0x0F00;
pub const IW_POWER_UNICAST_R: u16 = 0x0100;
pub const IW_POWER_MULTICAST_R: u16 = 0x0200;
pub const IW_POWER_ALL_R: u16 = 0x0300;
pub const IW_POWER_FORCE_S: u16 = 0x0400;
pub const IW_POWER_REPEATER: u16 = 0x0800;
pub const IW_POWER_MODIFIER: u16 = 0x000F;
pub const IW_POWER_MIN: u16 = 0x0001;
pub const IW_POWER_MAX: u16 = 0x0002;
pub const IW_POWER_RELATIVE: u16 = 0x0004;

// ==================== Transmit power flags ====================

pub const IW_TXPOW_TYPE: u16 = 0x00FF;
pub const IW_TXPOW_DBM: u16 = 0x0000;
pub const IW_TXPOW_MWATT: u16 = 0x0001;
pub const IW_TXPOW_RELATIVE: u16 = 0x0002;
pub const IW_TXPOW_RANGE: u16 = 0x1000;

// ==================== Retry flags ====================

pub const IW_RETRY_ON: u16 = 0x0000;
pub const IW_RETRY_TYPE: u16 = 0xF000;
pub const IW_RETRY_LIMIT: u16 = 0x1000;
pub const IW_RETRY_LIFETIME: u16 = 0x2000;
pub const IW_RETRY_MODIFIER: u16 = 0x00FF;
pub const IW_RETRY_MIN: u16 = 0x0001;
pub const IW_RETRY_MAX: u16 = 0x0002;
pub const IW_RETRY_RELATIVE: u16 = 0x0004;
pub const IW_RETRY_SHORT: u16 = 0x0010;
pub const IW_RETRY_LONG: u16 = 0x0020;

// ==================== Scan flags ====================

pub const IW_SCAN_DEFAULT: u16 = 0x0000;
pub const IW_SCAN_ALL_ESSID: u16 = 0x0001;
pub const IW_SCAN_THIS_ESSID: u16 = 0x0002;

/// `iw_scan_req.scan_type` for an active scan.
pub const IW_SCAN_TYPE_ACTIVE: u8 = 0;

// ==================== Event stream ====================

/// `u16 len` and `u16 cmd`, the meaningful part of an event header.
pub const IW_EV_LCP_PK_LEN: usize = 4;

/// Event header as the kernel writes it: `len` and `cmd` padded to the
/// alignment of `iwreq_data`, i.e. 8 bytes on 64-bit hosts and 4 on 32-bit.
pub const IW_EV_LCP_LEN: usize = {
    let align = align_of::<IwReqData>();
    IW_EV_LCP_PK_LEN.div_ceil(align) * align
};

/// Offset of `length` in `struct iw_point`, past the user pointer.
pub const IW_EV_POINT_OFF: usize = size_of::<*mut u8>();

/// Point event header: the event header, then `u16 length` and `u16 flags`
/// padded like the rest of `struct iw_point`. Point data starts here.
pub const IW_EV_POINT_LEN: usize = IW_EV_LCP_LEN + size_of::<IwPoint>() - IW_EV_POINT_OFF;

/// Size of a `struct iw_param` on the wire.
pub const IW_PARAM_LEN: usize = 8;

/// Size of a `struct iw_freq` on the wire.
pub const IW_FREQ_LEN: usize = 8;

/// Size of a `struct iw_quality` on the wire.
pub const IW_QUALITY_LEN: usize = 4;

/// Size of a `struct sockaddr` on the wire.
pub const SOCKADDR_LEN: usize = 16;

/// Size of a `struct iw_statistics` on the wire.
pub const IW_STATISTICS_LEN: usize = 32;
