//! Decoder for the packed event stream returned by `SIOCGIWSCAN`.
//!
//! Each record starts with `u16 len` (the whole record) and `u16 cmd`,
//! padded to [`IW_EV_LCP_LEN`] bytes, followed by a body typed by `cmd`.
//! Point records start their body with `u16 length` and `u16 flags`, padded
//! to [`IW_EV_POINT_LEN`] from the record start, then the data (the WE-19+
//! layout, without a pointer slot). The padding follows the host's native
//! alignment: 4 and 8 bytes on 64-bit hosts, none on 32-bit ones.
//!
//! A scan result is a flat list of records; each `SIOCGIWAP` record starts
//! the description of a new cell.

use super::consts::*;
use super::payload::PayloadKind;
use super::{c_string, FreqRecord, Op, Param, QualityRecord, Reader};
use crate::values::{AccessPoint, Bitrate, EncryptionState, Frequency, MacAddr, Mode, Quality};
use log::{trace, warn};

/// Body of one stream record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// A code without a known body layout; the raw body is kept.
    Raw(Vec<u8>),
    Name([u8; IFNAMSIZ]),
    /// One or more parameters (bit-rate records carry several).
    Params(Vec<Param>),
    Freq(FreqRecord),
    Addr(MacAddr),
    Mode(u32),
    Quality(QualityRecord),
    Point { flags: u16, data: Vec<u8> },
}

/// One decoded stream record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub op: Op,
    pub payload: EventPayload,
}

/// Decode a packed event stream.
///
/// A record whose header claims more bytes than remain ends the decode with
/// a warning; the records before it are returned. A record whose body does
/// not fit its type is skipped with a warning.
pub fn decode(buf: &[u8]) -> Vec<Event> {
    let mut events = Vec::new();
    let mut offset = 0;

    while offset < buf.len() {
        let rest = &buf[offset..];
        let header = Reader::new(rest);
        let (Some(len), Some(cmd)) = (header.u16(0), header.u16(2)) else {
            warn!("dropping {} trailing bytes of event stream", rest.len());
            break;
        };
        let len = usize::from(len);
        if len < IW_EV_LCP_LEN || len > rest.len() {
            warn!(
                "dropping truncated event 0x{:04X}: claims {} bytes, {} remain",
                cmd,
                len,
                rest.len()
            );
            break;
        }

        let op = Op::from_code(cmd);
        match decode_body(op, &rest[IW_EV_LCP_LEN..len]) {
            Some(payload) => events.push(Event { op, payload }),
            None => warn!("skipping malformed {} event of {} bytes", op, len),
        }
        offset += len;
    }

    events
}

fn decode_body(op: Op, body: &[u8]) -> Option<EventPayload> {
    let r = Reader::new(body);
    let payload = match op.payload_kind() {
        PayloadKind::None => EventPayload::Raw(body.to_vec()),
        PayloadKind::Name => EventPayload::Name(r.bytes(0)?),
        PayloadKind::Param => {
            let count = body.len() / IW_PARAM_LEN;
            if count == 0 {
                return None;
            }
            EventPayload::Params(
                (0..count)
                    .map_while(|i| r.param(i * IW_PARAM_LEN))
                    .collect(),
            )
        }
        PayloadKind::Freq => EventPayload::Freq(r.freq(0)?),
        PayloadKind::Addr => {
            // struct sockaddr: family, then the hardware address.
            if body.len() < SOCKADDR_LEN {
                return None;
            }
            EventPayload::Addr(MacAddr::new(r.bytes(2)?))
        }
        PayloadKind::Mode => EventPayload::Mode(r.u32(0)?),
        PayloadKind::Quality => EventPayload::Quality(r.quality(0)?),
        PayloadKind::Point => {
            let length = usize::from(r.u16(0)?);
            let flags = r.u16(2)?;
            let start = IW_EV_POINT_LEN - IW_EV_LCP_LEN;
            let data = body.get(start..start + length)?.to_vec();
            EventPayload::Point { flags, data }
        }
    };
    Some(payload)
}

/// Group decoded records into access points.
///
/// Records before the first `SIOCGIWAP` belong to no cell and are ignored,
/// as are record types that carry nothing an [`AccessPoint`] describes.
pub fn access_points(events: &[Event]) -> Vec<AccessPoint> {
    let mut cells = Vec::new();
    let mut current: Option<AccessPoint> = None;

    for event in events {
        if let (Op::GetAp, EventPayload::Addr(bssid)) = (event.op, &event.payload) {
            cells.extend(current.take());
            current = Some(AccessPoint::new(*bssid));
            continue;
        }

        let Some(cell) = current.as_mut() else {
            trace!("ignoring {} before the first cell", event.op);
            continue;
        };

        match (event.op, &event.payload) {
            (Op::GetEssid, EventPayload::Point { flags, data }) => {
                cell.essid = c_string(data);
                cell.hidden = *flags == 0 || cell.essid.is_empty();
            }
            (Op::GetMode, EventPayload::Mode(code)) => cell.mode = Some(Mode::from_code(*code)),
            (Op::GetFreq, EventPayload::Freq(rec)) => match Frequency::from_record(*rec) {
                Frequency::Channel(channel) => {
                    cell.channel = Some(channel);
                    cell.frequency.get_or_insert(Frequency::Channel(channel));
                }
                hz => cell.frequency = Some(hz),
            },
            (Op::EvQuality, EventPayload::Quality(rec)) => {
                cell.quality = Some(Quality::from_record(*rec))
            }
            (Op::GetRate, EventPayload::Params(params)) => {
                cell.rates
                    .extend(params.iter().map(|p| Bitrate::from_param(*p)));
            }
            (Op::GetEncode, EventPayload::Point { flags, data }) => {
                cell.encryption = Some(EncryptionState::from_flags(*flags, data))
            }
            (Op::GetName, EventPayload::Name(name)) => cell.protocol = Some(c_string(name)),
            (Op::EvCustom, EventPayload::Point { data, .. }) => cell.extra.push(c_string(data)),
            (Op::EvGenIe, EventPayload::Point { data, .. }) => cell.ie.extend_from_slice(data),
            (op, _) => trace!("ignoring {} in cell {}", op, cell.bssid),
        }
    }

    cells.extend(current);
    cells
}

impl Event {
    /// Encode this record in the host's native stream layout.
    #[cfg(any(test, feature = "testing"))]
    pub fn encode(&self) -> Vec<u8> {
        use super::Writer;

        let body: Vec<u8> = match &self.payload {
            EventPayload::Raw(raw) => raw.clone(),
            EventPayload::Name(name) => name.to_vec(),
            EventPayload::Params(params) => {
                let mut w = Writer::new(params.len() * IW_PARAM_LEN);
                for (i, param) in params.iter().enumerate() {
                    w.param(i * IW_PARAM_LEN, *param);
                }
                w.into_inner()
            }
            EventPayload::Freq(freq) => {
                let mut w = Writer::new(IW_FREQ_LEN);
                w.freq(0, *freq);
                w.into_inner()
            }
            EventPayload::Addr(mac) => {
                let mut w = Writer::new(SOCKADDR_LEN);
                w.u16(0, ARPHRD_ETHER);
                w.put(2, mac.as_bytes());
                w.into_inner()
            }
            EventPayload::Mode(mode) => mode.to_ne_bytes().to_vec(),
            EventPayload::Quality(q) => {
                let mut w = Writer::new(IW_QUALITY_LEN);
                w.quality(0, *q);
                w.into_inner()
            }
            EventPayload::Point { flags, data } => {
                let start = IW_EV_POINT_LEN - IW_EV_LCP_LEN;
                let mut w = Writer::new(start + data.len());
                w.u16(0, data.len() as u16);
                w.u16(2, *flags);
                w.put(start, data);
                w.into_inner()
            }
        };

        let len = IW_EV_LCP_LEN + body.len();
        let mut out = vec![0; IW_EV_LCP_LEN];
        out[..2].copy_from_slice(&(len as u16).to_ne_bytes());
        out[2..4].copy_from_slice(&self.op.code().to_ne_bytes());
        out.extend_from_slice(&body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StreamBuilder;
    use crate::values::{EncryptionMode, Level};

    const AP1: MacAddr = MacAddr::new([0x61, 0x62, 0x63, 0x64, 0x65, 0x66]);
    const AP2: MacAddr = MacAddr::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

    fn two_cells() -> Vec<u8> {
        StreamBuilder::new()
            .cell(AP1)
            .essid("homenet")
            .mode(Mode::Master)
            .frequency(Frequency::Hz(2_462_000_000))
            .quality(QualityRecord {
                qual: 60,
                level: 0xD8,
                noise: 0xA1,
                updated: IW_QUAL_DBM | IW_QUAL_ALL_UPDATED,
            })
            .rates(&[1_000_000, 5_500_000, 54_000_000])
            .encryption(IW_ENCODE_RESTRICTED | IW_ENCODE_NOKEY | 1)
            .custom("tsf=0000000000000000")
            .cell(AP2)
            .essid("")
            .frequency(Frequency::Channel(6))
            .build()
    }

    #[test]
    fn test_decode_two_cells() {
        let cells = access_points(&decode(&two_cells()));
        assert_eq!(cells.len(), 2);

        let first = &cells[0];
        assert_eq!(first.bssid, AP1);
        assert_eq!(first.essid, "homenet");
        assert!(!first.hidden);
        assert_eq!(first.mode, Some(Mode::Master));
        assert_eq!(first.frequency, Some(Frequency::Hz(2_462_000_000)));
        let quality = first.quality.unwrap();
        assert_eq!(quality.quality, Some(60));
        assert_eq!(quality.signal, Level::Dbm(-40));
        assert_eq!(
            first.rates,
            vec![
                Bitrate::Fixed(1_000_000),
                Bitrate::Fixed(5_500_000),
                Bitrate::Fixed(54_000_000)
            ]
        );
        let encryption = first.encryption.as_ref().unwrap();
        assert_eq!(encryption.mode, EncryptionMode::Restricted);
        assert_eq!(first.extra, vec!["tsf=0000000000000000".to_string()]);

        let second = &cells[1];
        assert_eq!(second.bssid, AP2);
        assert!(second.hidden);
        assert_eq!(second.channel, Some(6));
        assert_eq!(second.frequency, Some(Frequency::Channel(6)));
        assert!(second.rates.is_empty());
    }

    #[test]
    fn test_empty_stream() {
        assert!(decode(&[]).is_empty());
        assert!(access_points(&[]).is_empty());
    }

    #[test]
    fn test_truncated_trailing_record_is_dropped() {
        let stream = two_cells();
        let full = decode(&stream);

        // Cut inside the last record: everything before it survives.
        let cut = decode(&stream[..stream.len() - 3]);
        assert_eq!(cut.len(), full.len() - 1);
        assert_eq!(cut[..], full[..full.len() - 1]);

        // A lone partial header is dropped too.
        assert!(decode(&stream[..2]).is_empty());
    }

    #[test]
    fn test_zero_length_header_stops_decode() {
        let mut stream = StreamBuilder::new().cell(AP1).build();
        stream.extend_from_slice(&[0, 0, 0x15, 0x8B, 1, 2, 3, 4]);
        let events = decode(&stream);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        // A frequency record with a 2-byte body, followed by a valid mode.
        let mut stream = StreamBuilder::new().cell(AP1).build();
        let start = stream.len();
        stream.resize(start + IW_EV_LCP_LEN + 2, 0);
        stream[start..start + 2].copy_from_slice(&((IW_EV_LCP_LEN + 2) as u16).to_ne_bytes());
        stream[start + 2..start + 4].copy_from_slice(&Op::GetFreq.code().to_ne_bytes());
        stream.extend(StreamBuilder::new().mode(Mode::Managed).build());

        let cells = access_points(&decode(&stream));
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].frequency, None);
        assert_eq!(cells[0].mode, Some(Mode::Managed));
    }

    #[test]
    fn test_unknown_events_are_kept_and_ignored() {
        let stream = StreamBuilder::new()
            .cell(AP1)
            .raw(0x8CFF, &[9, 9, 9, 9])
            .essid("x")
            .build();
        let events = decode(&stream);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].op, Op::Unknown(0x8CFF));
        assert_eq!(events[1].payload, EventPayload::Raw(vec![9, 9, 9, 9]));

        let cells = access_points(&events);
        assert_eq!(cells[0].essid, "x");
    }

    #[test]
    fn test_records_before_first_cell_are_ignored() {
        let stream = StreamBuilder::new().essid("orphan").cell(AP1).build();
        let cells = access_points(&decode(&stream));
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].essid, "");
    }

    #[test]
    fn test_encode_decode_agree() {
        let events = vec![
            Event {
                op: Op::GetAp,
                payload: EventPayload::Addr(AP1),
            },
            Event {
                op: Op::GetName,
                payload: EventPayload::Name(*b"IEEE 802.11bgn\0\0"),
            },
            Event {
                op: Op::EvGenIe,
                payload: EventPayload::Point {
                    flags: 0,
                    data: vec![0xDD, 0x01, 0x00],
                },
            },
        ];
        let stream: Vec<u8> = events.iter().flat_map(Event::encode).collect();
        assert_eq!(decode(&stream), events);

        let cells = access_points(&events);
        assert_eq!(cells[0].protocol.as_deref(), Some("IEEE 802.11bgn"));
        assert_eq!(cells[0].ie, vec![0xDD, 0x01, 0x00]);
    }

    /// A stream laid out byte by byte the way a 64-bit kernel writes it.
    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_decode_native_64_bit_stream() {
        assert_eq!((IW_EV_LCP_LEN, IW_EV_POINT_LEN), (8, 16));

        let mut stream = Vec::new();
        // SIOCGIWAP: len 24, cmd, 4 bytes padding, struct sockaddr.
        stream.extend_from_slice(&24u16.to_ne_bytes());
        stream.extend_from_slice(&0x8B15u16.to_ne_bytes());
        stream.extend_from_slice(&[0; 4]);
        stream.extend_from_slice(&ARPHRD_ETHER.to_ne_bytes());
        stream.extend_from_slice(&[0x61, 0x62, 0x63, 0x64, 0x65, 0x66]);
        stream.extend_from_slice(&[0; 8]);
        // SIOCGIWESSID: len 23, cmd, padding, length 7, flags 1, padding, data.
        stream.extend_from_slice(&23u16.to_ne_bytes());
        stream.extend_from_slice(&0x8B1Bu16.to_ne_bytes());
        stream.extend_from_slice(&[0; 4]);
        stream.extend_from_slice(&7u16.to_ne_bytes());
        stream.extend_from_slice(&1u16.to_ne_bytes());
        stream.extend_from_slice(&[0; 4]);
        stream.extend_from_slice(b"homenet");
        // SIOCGIWMODE: len 12, cmd, padding, u32 mode.
        stream.extend_from_slice(&12u16.to_ne_bytes());
        stream.extend_from_slice(&0x8B07u16.to_ne_bytes());
        stream.extend_from_slice(&[0; 4]);
        stream.extend_from_slice(&IW_MODE_MASTER.to_ne_bytes());

        let cells = access_points(&decode(&stream));
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].bssid, AP1);
        assert_eq!(cells[0].essid, "homenet");
        assert!(!cells[0].hidden);
        assert_eq!(cells[0].mode, Some(Mode::Master));

        let builder = StreamBuilder::new().cell(AP1).essid("homenet").mode(Mode::Master);
        assert_eq!(builder.build(), stream);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_native_32_bit_headers_are_unpadded() {
        assert_eq!((IW_EV_LCP_LEN, IW_EV_POINT_LEN), (4, 8));
    }
}
