//! Decoder for `struct iw_range` (Wireless Extensions 16 and later).
//!
//! The block is returned by `SIOCGIWRANGE` and describes what the driver
//! supports. Drivers built against older headers return shorter blocks, so
//! every field is read with a bounds check and left at its default when the
//! buffer ends first.

use super::consts::*;
use super::{QualityRecord, Reader};
use crate::values::{Bitrate, ChannelEntry, Frequency, TxPower};
use log::warn;

// Field offsets of the WE-22 layout.
const THROUGHPUT: usize = 0;
const MIN_NWID: usize = 4;
const MAX_NWID: usize = 8;
const OLD_NUM_CHANNELS: usize = 12;
const SCAN_CAPA: usize = 15;
const EVENT_CAPA: usize = 16;
const SENSITIVITY: usize = 40;
const MAX_QUAL: usize = 44;
const AVG_QUAL: usize = 48;
const NUM_BITRATES: usize = 52;
const BITRATE: usize = 56;
const MIN_RTS: usize = 184;
const MAX_RTS: usize = 188;
const MIN_FRAG: usize = 192;
const MAX_FRAG: usize = 196;
const MIN_PMP: usize = 200;
const MAX_PMP: usize = 204;
const MIN_PMT: usize = 208;
const MAX_PMT: usize = 212;
const PMP_FLAGS: usize = 216;
const PMT_FLAGS: usize = 218;
const PM_CAPA: usize = 220;
const ENCODING_SIZE: usize = 222;
const NUM_ENCODING_SIZES: usize = 238;
const MAX_ENCODING_TOKENS: usize = 239;
const TXPOWER_CAPA: usize = 242;
const NUM_TXPOWER: usize = 244;
const TXPOWER: usize = 248;
const WE_VERSION_COMPILED: usize = 280;
const WE_VERSION_SOURCE: usize = 281;
const RETRY_CAPA: usize = 282;
const RETRY_FLAGS: usize = 284;
const R_TIME_FLAGS: usize = 286;
const MIN_RETRY: usize = 288;
const MAX_RETRY: usize = 292;
const MIN_R_TIME: usize = 296;
const MAX_R_TIME: usize = 300;
const NUM_CHANNELS: usize = 304;
const NUM_FREQUENCY: usize = 306;
const FREQ: usize = 308;
const ENC_CAPA: usize = 564;

/// Size of `struct iw_range` in WE-22: `enc_capa` is the last field.
pub const IW_RANGE_LEN: usize = ENC_CAPA + 4;

/// Below this the block predates WE-16 and the offsets above do not apply.
const MIN_MODERN_LEN: usize = 300;

/// Number of 32-bit words in `event_capa`.
const EVENT_CAPA_WORDS: usize = 6;

/// Decoded driver capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeInfo {
    /// Nominal throughput in bits per second.
    pub throughput: u32,
    pub min_nwid: u32,
    pub max_nwid: u32,
    pub old_num_channels: u16,
    /// `IW_SCAN_CAPA_*` bits.
    pub scan_capa: u8,
    /// Bitmask of the events the driver generates.
    pub event_capa: [u32; EVENT_CAPA_WORDS],
    /// Sensitivity upper bound.
    pub sensitivity: i32,
    /// Best link quality values. Relative levels are scaled against these.
    pub max_qual: QualityRecord,
    /// Typical link quality values.
    pub avg_qual: QualityRecord,
    pub bitrates: Vec<Bitrate>,
    pub min_rts: i32,
    pub max_rts: i32,
    pub min_frag: i32,
    pub max_frag: i32,
    pub min_pmp: i32,
    pub max_pmp: i32,
    pub min_pmt: i32,
    pub max_pmt: i32,
    pub pmp_flags: u16,
    pub pmt_flags: u16,
    pub pm_capa: u16,
    /// Supported key sizes in bytes.
    pub encoding_sizes: Vec<u16>,
    pub max_encoding_tokens: u8,
    pub txpower_capa: u16,
    /// Supported transmit power levels, in the unit given by `txpower_capa`.
    pub txpower: Vec<i32>,
    pub we_version_compiled: u8,
    pub we_version_source: u8,
    pub retry_capa: u16,
    pub retry_flags: u16,
    pub r_time_flags: u16,
    pub min_retry: i32,
    pub max_retry: i32,
    pub min_r_time: i32,
    pub max_r_time: i32,
    /// Total number of channels, which may exceed `channels.len()`.
    pub num_channels: u16,
    pub channels: Vec<ChannelEntry>,
    /// `IW_ENC_CAPA_*` bits.
    pub enc_capa: u32,
}

impl RangeInfo {
    /// Decode a `SIOCGIWRANGE` response.
    pub fn decode(buf: &[u8]) -> Self {
        let r = Reader::new(buf);
        if r.len() < MIN_MODERN_LEN {
            warn!(
                "range block is {} bytes, expected at least {}; missing fields use defaults",
                r.len(),
                MIN_MODERN_LEN
            );
        }

        let mut event_capa = [0u32; EVENT_CAPA_WORDS];
        for (i, word) in event_capa.iter_mut().enumerate() {
            *word = r.u32(EVENT_CAPA + i * 4).unwrap_or_default();
        }

        let num_bitrates = usize::from(r.u8(NUM_BITRATES).unwrap_or_default()).min(IW_MAX_BITRATES);
        let bitrates = (0..num_bitrates)
            .map_while(|i| r.i32(BITRATE + i * 4))
            .map(|rate| {
                if rate < 0 {
                    Bitrate::Auto
                } else {
                    Bitrate::Fixed(rate as u64)
                }
            })
            .collect();

        let num_encoding_sizes =
            usize::from(r.u8(NUM_ENCODING_SIZES).unwrap_or_default()).min(IW_MAX_ENCODING_SIZES);
        let encoding_sizes = (0..num_encoding_sizes)
            .map_while(|i| r.u16(ENCODING_SIZE + i * 2))
            .collect();

        let num_txpower = usize::from(r.u8(NUM_TXPOWER).unwrap_or_default()).min(IW_MAX_TXPOWER);
        let txpower = (0..num_txpower)
            .map_while(|i| r.i32(TXPOWER + i * 4))
            .collect();

        let num_frequency =
            usize::from(r.u8(NUM_FREQUENCY).unwrap_or_default()).min(IW_MAX_FREQUENCIES);
        let channels = (0..num_frequency)
            .map_while(|i| r.freq(FREQ + i * IW_FREQ_LEN))
            .map(|rec| ChannelEntry {
                channel: rec.index,
                frequency: Frequency::from_record(rec),
            })
            .collect();

        let info = Self {
            throughput: r.u32(THROUGHPUT).unwrap_or_default(),
            min_nwid: r.u32(MIN_NWID).unwrap_or_default(),
            max_nwid: r.u32(MAX_NWID).unwrap_or_default(),
            old_num_channels: r.u16(OLD_NUM_CHANNELS).unwrap_or_default(),
            scan_capa: r.u8(SCAN_CAPA).unwrap_or_default(),
            event_capa,
            sensitivity: r.i32(SENSITIVITY).unwrap_or_default(),
            max_qual: r.quality(MAX_QUAL).unwrap_or_default(),
            avg_qual: r.quality(AVG_QUAL).unwrap_or_default(),
            bitrates,
            min_rts: r.i32(MIN_RTS).unwrap_or_default(),
            max_rts: r.i32(MAX_RTS).unwrap_or_default(),
            min_frag: r.i32(MIN_FRAG).unwrap_or_default(),
            max_frag: r.i32(MAX_FRAG).unwrap_or_default(),
            min_pmp: r.i32(MIN_PMP).unwrap_or_default(),
            max_pmp: r.i32(MAX_PMP).unwrap_or_default(),
            min_pmt: r.i32(MIN_PMT).unwrap_or_default(),
            max_pmt: r.i32(MAX_PMT).unwrap_or_default(),
            pmp_flags: r.u16(PMP_FLAGS).unwrap_or_default(),
            pmt_flags: r.u16(PMT_FLAGS).unwrap_or_default(),
            pm_capa: r.u16(PM_CAPA).unwrap_or_default(),
            encoding_sizes,
            max_encoding_tokens: r.u8(MAX_ENCODING_TOKENS).unwrap_or_default(),
            txpower_capa: r.u16(TXPOWER_CAPA).unwrap_or_default(),
            txpower,
            we_version_compiled: r.u8(WE_VERSION_COMPILED).unwrap_or_default(),
            we_version_source: r.u8(WE_VERSION_SOURCE).unwrap_or_default(),
            retry_capa: r.u16(RETRY_CAPA).unwrap_or_default(),
            retry_flags: r.u16(RETRY_FLAGS).unwrap_or_default(),
            r_time_flags: r.u16(R_TIME_FLAGS).unwrap_or_default(),
            min_retry: r.i32(MIN_RETRY).unwrap_or_default(),
            max_retry: r.i32(MAX_RETRY).unwrap_or_default(),
            min_r_time: r.i32(MIN_R_TIME).unwrap_or_default(),
            max_r_time: r.i32(MAX_R_TIME).unwrap_or_default(),
            num_channels: r.u16(NUM_CHANNELS).unwrap_or_default(),
            channels,
            enc_capa: r.u32(ENC_CAPA).unwrap_or_default(),
        };

        if r.len() >= MIN_MODERN_LEN && info.we_version_compiled < 16 {
            warn!(
                "driver reports wireless extensions v{}; range layout may be misread",
                info.we_version_compiled
            );
        }

        info
    }

    /// Supported transmit power levels as typed values.
    pub fn txpower_levels(&self) -> Vec<TxPower> {
        self.txpower
            .iter()
            .map(|&value| match self.txpower_capa & IW_TXPOW_TYPE {
                IW_TXPOW_MWATT => TxPower::MilliWatt(value),
                IW_TXPOW_RELATIVE => TxPower::Relative(value),
                _ => TxPower::Dbm(value),
            })
            .collect()
    }

    /// Encode back into the kernel layout.
    #[cfg(any(test, feature = "testing"))]
    pub fn encode(&self) -> Vec<u8> {
        use super::{Param, Writer};

        let mut w = Writer::new(IW_RANGE_LEN);
        w.u32(THROUGHPUT, self.throughput);
        w.u32(MIN_NWID, self.min_nwid);
        w.u32(MAX_NWID, self.max_nwid);
        w.u16(OLD_NUM_CHANNELS, self.old_num_channels);
        w.u8(SCAN_CAPA, self.scan_capa);
        for (i, word) in self.event_capa.iter().enumerate() {
            w.u32(EVENT_CAPA + i * 4, *word);
        }
        w.i32(SENSITIVITY, self.sensitivity);
        w.quality(MAX_QUAL, self.max_qual);
        w.quality(AVG_QUAL, self.avg_qual);

        let bitrates = &self.bitrates[..self.bitrates.len().min(IW_MAX_BITRATES)];
        w.u8(NUM_BITRATES, bitrates.len() as u8);
        for (i, rate) in bitrates.iter().enumerate() {
            let value = rate
                .to_param()
                .unwrap_or_else(|_| Param::fixed(i32::MAX))
                .value;
            w.i32(BITRATE + i * 4, value);
        }

        w.i32(MIN_RTS, self.min_rts);
        w.i32(MAX_RTS, self.max_rts);
        w.i32(MIN_FRAG, self.min_frag);
        w.i32(MAX_FRAG, self.max_frag);
        w.i32(MIN_PMP, self.min_pmp);
        w.i32(MAX_PMP, self.max_pmp);
        w.i32(MIN_PMT, self.min_pmt);
        w.i32(MAX_PMT, self.max_pmt);
        w.u16(PMP_FLAGS, self.pmp_flags);
        w.u16(PMT_FLAGS, self.pmt_flags);
        w.u16(PM_CAPA, self.pm_capa);

        let sizes = &self.encoding_sizes[..self.encoding_sizes.len().min(IW_MAX_ENCODING_SIZES)];
        for (i, size) in sizes.iter().enumerate() {
            w.u16(ENCODING_SIZE + i * 2, *size);
        }
        w.u8(NUM_ENCODING_SIZES, sizes.len() as u8);
        w.u8(MAX_ENCODING_TOKENS, self.max_encoding_tokens);

        w.u16(TXPOWER_CAPA, self.txpower_capa);
        let powers = &self.txpower[..self.txpower.len().min(IW_MAX_TXPOWER)];
        w.u8(NUM_TXPOWER, powers.len() as u8);
        for (i, power) in powers.iter().enumerate() {
            w.i32(TXPOWER + i * 4, *power);
        }

        w.u8(WE_VERSION_COMPILED, self.we_version_compiled);
        w.u8(WE_VERSION_SOURCE, self.we_version_source);
        w.u16(RETRY_CAPA, self.retry_capa);
        w.u16(RETRY_FLAGS, self.retry_flags);
        w.u16(R_TIME_FLAGS, self.r_time_flags);
        w.i32(MIN_RETRY, self.min_retry);
        w.i32(MAX_RETRY, self.max_retry);
        w.i32(MIN_R_TIME, self.min_r_time);
        w.i32(MAX_R_TIME, self.max_r_time);

        w.u16(NUM_CHANNELS, self.num_channels);
        let channels = &self.channels[..self.channels.len().min(IW_MAX_FREQUENCIES)];
        w.u8(NUM_FREQUENCY, channels.len() as u8);
        for (i, entry) in channels.iter().enumerate() {
            let mut rec = entry.frequency.to_record();
            rec.index = entry.channel;
            rec.flags = 0;
            w.freq(FREQ + i * IW_FREQ_LEN, rec);
        }
        w.u32(ENC_CAPA, self.enc_capa);

        w.into_inner()
    }
}
