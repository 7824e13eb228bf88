//! Encoder for `struct iw_scan_req`, the optional argument of
//! `SIOCSIWSCAN` that restricts a scan to one ESSID.

use super::consts::*;
use super::Writer;
use crate::error::{Result, WextError};

const SCAN_TYPE: usize = 0;
const ESSID_LEN: usize = 1;
const BSSID: usize = 4;
const ESSID: usize = 20;

/// Size of `struct iw_scan_req`.
pub const IW_SCAN_REQ_LEN: usize = 316;

/// Build a request for an active scan for `essid`, on all channels and
/// from any BSSID.
pub fn encode(essid: &str) -> Result<Vec<u8>> {
    let essid = essid.as_bytes();
    if essid.is_empty() || essid.len() > IW_ESSID_MAX_SIZE {
        return Err(WextError::invalid_argument(format!(
            "scan ESSID must be 1..={} bytes, got {}",
            IW_ESSID_MAX_SIZE,
            essid.len()
        )));
    }

    let mut w = Writer::new(IW_SCAN_REQ_LEN);
    w.u8(SCAN_TYPE, IW_SCAN_TYPE_ACTIVE);
    w.u8(ESSID_LEN, essid.len() as u8);
    w.u16(BSSID, ARPHRD_ETHER);
    w.put(BSSID + 2, &[0xFF; 6]);
    w.put(ESSID, essid);
    Ok(w.into_inner())
}
