//! Interface statistics (`struct iw_statistics`).

use super::Quality;
use crate::codec::consts::IW_STATISTICS_LEN;
use crate::codec::QualityRecord;
use crate::error::{Result, WextError};

/// Wireless statistics of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Driver-specific status word.
    pub status: u16,
    pub quality: Quality,
    /// Packets discarded for a wrong network id.
    pub discarded_nwid: u32,
    /// Packets discarded because they could not be decrypted.
    pub discarded_code: u32,
    /// Packets discarded because they could not be reassembled.
    pub discarded_fragment: u32,
    /// Transmissions abandoned after too many retries.
    pub discarded_retries: u32,
    pub discarded_misc: u32,
    pub missed_beacon: u32,
}

impl Statistics {
    /// Decode the 32-byte kernel record.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < IW_STATISTICS_LEN {
            return Err(WextError::malformed(format!(
                "statistics record is {} bytes, expected {}",
                buf.len(),
                IW_STATISTICS_LEN
            )));
        }

        let u32_at = |offset: usize| {
            u32::from_ne_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
        };

        Ok(Self {
            status: u16::from_ne_bytes([buf[0], buf[1]]),
            quality: Quality::from_record(QualityRecord {
                qual: buf[2],
                level: buf[3],
                noise: buf[4],
                updated: buf[5],
            }),
            discarded_nwid: u32_at(8),
            discarded_code: u32_at(12),
            discarded_fragment: u32_at(16),
            discarded_retries: u32_at(20),
            discarded_misc: u32_at(24),
            missed_beacon: u32_at(28),
        })
    }

    /// Encode the kernel record.
    #[cfg(any(test, feature = "testing"))]
    pub fn encode(status: u16, quality: QualityRecord, counters: [u32; 6]) -> Vec<u8> {
        let mut buf = vec![0u8; IW_STATISTICS_LEN];
        buf[0..2].copy_from_slice(&status.to_ne_bytes());
        buf[2] = quality.qual;
        buf[3] = quality.level;
        buf[4] = quality.noise;
        buf[5] = quality.updated;
        for (i, counter) in counters.iter().enumerate() {
            let offset = 8 + i * 4;
            buf[offset..offset + 4].copy_from_slice(&counter.to_ne_bytes());
        }
        buf
    }
}
