//! In-memory kernel for exercising the crate without wireless hardware.
//!
//! [`FakeKernel`] implements [`Transport`] over a table of simulated
//! devices. It answers requests the way a Wireless Extensions driver would:
//! absent devices fail with `ENODEV`, wired ones reject every request, and
//! wireless ones keep per-device state that "set" requests change and "get"
//! requests report.
//!
//! **Note:** This module is only available in unit tests or with the
//! `testing` feature enabled.
//!
//! # Usage
//!
//! ```ignore
//! use wext::testing::FakeKernel;
//! use wext::{ChannelConfig, Mode, Wireless};
//!
//! let kernel = FakeKernel::new().with_wireless("wlan0").with_wired("eth0");
//! let mut wifi = Wireless::with_transport("wlan0", kernel.clone(), ChannelConfig::default())?;
//!
//! wifi.set_mode(Mode::Monitor)?;
//! assert_eq!(kernel.state("wlan0").unwrap().mode, Mode::Monitor.code());
//! ```
//!
//! The kernel is cheap to clone and clones share state, so a test keeps one
//! handle to script failures and inspect requests while the code under test
//! owns another.
//!
//! [`StreamBuilder`] assembles the packed event streams returned by
//! `SIOCGIWSCAN`.

use crate::channel::Transport;
use crate::codec::consts::*;
use crate::codec::range::RangeInfo;
use crate::codec::stream::{Event, EventPayload};
use crate::codec::{FreqRecord, Op, Param, Payload, Point, QualityRecord};
use crate::interface::InterfaceName;
use crate::values::{Bitrate, ChannelEntry, Frequency, Level, MacAddr, Mode, Statistics};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::rc::Rc;

/// Number of key slots a simulated device has.
pub const KEY_SLOTS: u8 = 4;

/// Scripted answer to a bulk request, overriding device state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkBehavior {
    /// Every attempt fails with `E2BIG`, whatever the buffer size.
    AlwaysTooBig,
    /// Fail with `EAGAIN` this many times, then answer with `data`.
    BusyThen { remaining: u32, data: Vec<u8> },
    /// Answer with `data`, or `E2BIG` plus the needed size if it does not fit.
    Data(Vec<u8>),
}

/// What a simulated wireless device knows about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    pub protocol: String,
    pub mode: u32,
    pub essid: Vec<u8>,
    pub essid_flags: u16,
    pub nickname: Vec<u8>,
    pub nwid: Param,
    pub freq: FreqRecord,
    pub sensitivity: Param,
    pub rate: Param,
    pub rts: Param,
    pub frag: Param,
    pub txpower: Param,
    pub retry: Param,
    pub power: Param,
    pub ap: MacAddr,
    /// `IW_ENCODE_DISABLED`, `IW_ENCODE_ENABLED`, `IW_ENCODE_OPEN` or
    /// `IW_ENCODE_RESTRICTED`.
    pub encode_mode: u16,
    /// Current key slot, 1-based.
    pub key_index: u8,
    pub keys: Vec<Vec<u8>>,
    pub range: Vec<u8>,
    pub stats: Vec<u8>,
    pub scan: Vec<u8>,
    /// Flags and argument of every `SIOCSIWSCAN` received.
    pub scan_requests: Vec<(u16, Vec<u8>)>,
    pub commits: u32,
    pub unsupported: HashSet<Op>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            protocol: "IEEE 802.11bgn".to_string(),
            mode: IW_MODE_INFRA,
            essid: Vec::new(),
            essid_flags: 0,
            nickname: Vec::new(),
            nwid: Param::disabled(),
            freq: Frequency::Hz(2_412_000_000).to_record(),
            sensitivity: Param::fixed(0),
            rate: Param::fixed(54_000_000),
            rts: Param::disabled(),
            frag: Param::disabled(),
            txpower: Param::fixed(20),
            retry: Param {
                value: 7,
                fixed: false,
                disabled: false,
                flags: IW_RETRY_LIMIT,
            },
            power: Param::disabled(),
            ap: MacAddr::OFF,
            encode_mode: IW_ENCODE_DISABLED,
            key_index: 1,
            keys: vec![Vec::new(); KEY_SLOTS as usize],
            range: default_range().encode(),
            stats: Statistics::encode(
                0,
                QualityRecord {
                    qual: 60,
                    level: Level::Dbm(-40).to_raw(IW_QUAL_DBM).unwrap_or_default(),
                    noise: Level::Dbm(-95).to_raw(IW_QUAL_DBM).unwrap_or_default(),
                    updated: IW_QUAL_DBM | IW_QUAL_ALL_UPDATED,
                },
                [0, 0, 0, 3, 1, 2],
            ),
            scan: Vec::new(),
            scan_requests: Vec::new(),
            commits: 0,
            unsupported: HashSet::new(),
        }
    }
}

/// The capability block a simulated 802.11bg card reports.
pub fn default_range() -> RangeInfo {
    let rates: [u64; 12] = [
        1_000, 2_000, 5_500, 11_000, 6_000, 9_000, 12_000, 18_000, 24_000, 36_000, 48_000, 54_000,
    ];
    RangeInfo {
        throughput: 5_500_000,
        max_qual: QualityRecord {
            qual: 70,
            level: 0,
            noise: 0,
            updated: IW_QUAL_DBM | IW_QUAL_ALL_UPDATED,
        },
        avg_qual: QualityRecord {
            qual: 35,
            level: 0,
            noise: 0,
            updated: IW_QUAL_DBM | IW_QUAL_ALL_UPDATED,
        },
        bitrates: rates.iter().map(|kb| Bitrate::Fixed(kb * 1_000)).collect(),
        min_rts: 0,
        max_rts: 2347,
        min_frag: 256,
        max_frag: 2346,
        encoding_sizes: vec![5, 13],
        max_encoding_tokens: KEY_SLOTS,
        txpower_capa: IW_TXPOW_DBM,
        txpower: vec![0, 10, 20],
        we_version_compiled: 22,
        we_version_source: 21,
        retry_capa: IW_RETRY_LIMIT,
        retry_flags: IW_RETRY_LIMIT,
        max_retry: 255,
        num_channels: 13,
        channels: (1..=13u8)
            .map(|channel| ChannelEntry {
                channel,
                frequency: Frequency::Hz(2_407_000_000 + 5_000_000 * u64::from(channel)),
            })
            .collect(),
        ..Default::default()
    }
}

#[derive(Debug)]
enum Device {
    Wired,
    Wireless(DeviceState),
}

#[derive(Debug)]
struct KernelState {
    devices: Vec<(String, Device)>,
    bulk: HashMap<Op, BulkBehavior>,
    bulk_sizes: HashMap<Op, Vec<usize>>,
    requests: Vec<(String, Op)>,
    failures: Vec<(String, Op, i32)>,
    open_errno: Option<i32>,
    listing_errno: Option<i32>,
    wired_errno: i32,
}

impl Default for KernelState {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
            bulk: HashMap::new(),
            bulk_sizes: HashMap::new(),
            requests: Vec::new(),
            failures: Vec::new(),
            open_errno: None,
            listing_errno: None,
            wired_errno: libc::EOPNOTSUPP,
        }
    }
}

/// A scripted, in-memory [`Transport`].
#[derive(Debug, Clone, Default)]
pub struct FakeKernel {
    inner: Rc<RefCell<KernelState>>,
}

fn errno(code: i32) -> io::Error {
    io::Error::from_raw_os_error(code)
}

/// Copy `data` into a point buffer the way the kernel does: all of it, or
/// `E2BIG` with the needed length.
fn write_point(point: &mut Point, data: &[u8]) -> io::Result<()> {
    if data.len() > point.capacity() {
        point.length = data.len().min(u16::MAX as usize) as u16;
        return Err(errno(libc::E2BIG));
    }
    point.data[..data.len()].copy_from_slice(data);
    point.length = data.len() as u16;
    Ok(())
}

impl FakeKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wireless device with default state.
    pub fn with_wireless(self, name: &str) -> Self {
        self.with_device(name, DeviceState::default())
    }

    /// Add a wireless device with the given state.
    pub fn with_device(self, name: &str, state: DeviceState) -> Self {
        self.inner
            .borrow_mut()
            .devices
            .push((name.to_string(), Device::Wireless(state)));
        self
    }

    /// Add a device without wireless extensions.
    pub fn with_wired(self, name: &str) -> Self {
        self.inner
            .borrow_mut()
            .devices
            .push((name.to_string(), Device::Wired));
        self
    }

    /// Errno wired devices answer with (`EOPNOTSUPP` unless changed; older
    /// kernels use `EINVAL`).
    pub fn set_wired_errno(&self, code: i32) {
        self.inner.borrow_mut().wired_errno = code;
    }

    /// Script every device's answer to a bulk request.
    pub fn set_bulk(&self, op: Op, behavior: BulkBehavior) {
        self.inner.borrow_mut().bulk.insert(op, behavior);
    }

    /// Buffer sizes offered for `op`, one per attempt.
    pub fn bulk_sizes(&self, op: Op) -> Vec<usize> {
        self.inner
            .borrow()
            .bulk_sizes
            .get(&op)
            .cloned()
            .unwrap_or_default()
    }

    /// Every request received, probes included, in order.
    pub fn requests(&self) -> Vec<(String, Op)> {
        self.inner.borrow().requests.clone()
    }

    /// Make the driver of `name` reject `op` with `EOPNOTSUPP`.
    pub fn unsupport(&self, name: &str, op: Op) {
        self.update(name, |state| {
            state.unsupported.insert(op);
        });
    }

    /// Fail the next `op` on `name` with `code`.
    pub fn fail_next(&self, name: &str, op: Op, code: i32) {
        self.inner
            .borrow_mut()
            .failures
            .push((name.to_string(), op, code));
    }

    /// Fail every [`Transport::open`] with `code`.
    pub fn fail_open(&self, code: i32) {
        self.inner.borrow_mut().open_errno = Some(code);
    }

    /// Fail every [`Transport::interface_names`] with `code`.
    pub fn fail_listing(&self, code: i32) {
        self.inner.borrow_mut().listing_errno = Some(code);
    }

    /// Snapshot of a wireless device's state.
    pub fn state(&self, name: &str) -> Option<DeviceState> {
        self.inner
            .borrow()
            .devices
            .iter()
            .find_map(|(n, device)| match device {
                Device::Wireless(state) if n == name => Some(state.clone()),
                _ => None,
            })
    }

    /// Change a wireless device's state. Panics if there is no such device.
    pub fn update(&self, name: &str, f: impl FnOnce(&mut DeviceState)) {
        let mut inner = self.inner.borrow_mut();
        let state = inner
            .devices
            .iter_mut()
            .find_map(|(n, device)| match device {
                Device::Wireless(state) if n == name => Some(state),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no wireless device {}", name));
        f(state);
    }
}

impl KernelState {
    fn scripted_bulk(&mut self, op: Op, point: &mut Point) -> Option<io::Result<()>> {
        let behavior = self.bulk.get_mut(&op)?;
        let result = match behavior {
            BulkBehavior::AlwaysTooBig => {
                point.length = 0;
                Err(errno(libc::E2BIG))
            }
            BulkBehavior::BusyThen { remaining, data } => {
                if *remaining > 0 {
                    *remaining -= 1;
                    Err(errno(libc::EAGAIN))
                } else {
                    write_point(point, data)
                }
            }
            BulkBehavior::Data(data) => write_point(point, data),
        };
        Some(result)
    }
}

impl Transport for FakeKernel {
    fn open(&mut self) -> io::Result<()> {
        match self.inner.borrow().open_errno {
            Some(code) => Err(errno(code)),
            None => Ok(()),
        }
    }

    fn request(&mut self, name: &InterfaceName, op: Op, payload: &mut Payload) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        inner.requests.push((name.to_string(), op));

        if let Some(pos) = inner
            .failures
            .iter()
            .position(|(n, o, _)| name == n.as_str() && *o == op)
        {
            let (_, _, code) = inner.failures.remove(pos);
            return Err(errno(code));
        }

        let wired_errno = inner.wired_errno;
        match inner.devices.iter().find(|(n, _)| name == n.as_str()) {
            None => return Err(errno(libc::ENODEV)),
            Some((_, Device::Wired)) => return Err(errno(wired_errno)),
            Some((_, Device::Wireless(state))) if state.unsupported.contains(&op) => {
                return Err(errno(libc::EOPNOTSUPP));
            }
            Some(_) => {}
        }

        if op.is_bulk() {
            if let Payload::Point(point) = payload {
                inner
                    .bulk_sizes
                    .entry(op)
                    .or_default()
                    .push(point.capacity());
                if let Some(result) = inner.scripted_bulk(op, point) {
                    return result;
                }
            }
        }

        let state = match inner.devices.iter_mut().find(|(n, _)| name == n.as_str()) {
            Some((_, Device::Wireless(state))) => state,
            _ => return Err(errno(libc::ENODEV)),
        };
        answer(state, op, payload)
    }

    fn interface_names(&mut self) -> io::Result<Vec<String>> {
        let inner = self.inner.borrow();
        if let Some(code) = inner.listing_errno {
            return Err(errno(code));
        }
        Ok(inner.devices.iter().map(|(n, _)| n.clone()).collect())
    }
}

/// Answer a request from device state.
fn answer(state: &mut DeviceState, op: Op, payload: &mut Payload) -> io::Result<()> {
    match (op, payload) {
        (Op::Commit, Payload::None) => state.commits += 1,
        (Op::GetName, Payload::Name(name)) => {
            *name = [0; IFNAMSIZ];
            let bytes = state.protocol.as_bytes();
            let len = bytes.len().min(IFNAMSIZ - 1);
            name[..len].copy_from_slice(&bytes[..len]);
        }
        (Op::GetNwid, Payload::Param(p)) => *p = state.nwid,
        (Op::SetNwid, Payload::Param(p)) => state.nwid = *p,
        (Op::GetFreq, Payload::Freq(f)) => *f = state.freq,
        (Op::SetFreq, Payload::Freq(f)) => state.freq = *f,
        (Op::GetMode, Payload::Mode(m)) => *m = state.mode,
        (Op::SetMode, Payload::Mode(m)) => {
            if *m > IW_MODE_MESH {
                return Err(errno(libc::EINVAL));
            }
            state.mode = *m;
        }
        (Op::GetSens, Payload::Param(p)) => *p = state.sensitivity,
        (Op::SetSens, Payload::Param(p)) => state.sensitivity = *p,
        (Op::GetRange, Payload::Point(point)) => write_point(point, &state.range)?,
        (Op::GetStats, Payload::Point(point)) => write_point(point, &state.stats)?,
        (Op::GetAp, Payload::Addr(mac)) => *mac = state.ap,
        (Op::SetAp, Payload::Addr(mac)) => state.ap = *mac,
        (Op::SetScan, Payload::Point(point)) => {
            state
                .scan_requests
                .push((point.flags, point.written().to_vec()));
        }
        (Op::GetScan, Payload::Point(point)) => write_point(point, &state.scan)?,
        (Op::GetEssid, Payload::Point(point)) => {
            write_point(point, &state.essid)?;
            point.flags = state.essid_flags;
        }
        (Op::SetEssid, Payload::Point(point)) => {
            if point.written().len() > IW_ESSID_MAX_SIZE {
                return Err(errno(libc::E2BIG));
            }
            state.essid = point.written().to_vec();
            state.essid_flags = point.flags;
        }
        (Op::GetNickname, Payload::Point(point)) => write_point(point, &state.nickname)?,
        (Op::SetNickname, Payload::Point(point)) => state.nickname = point.written().to_vec(),
        (Op::GetRate, Payload::Param(p)) => *p = state.rate,
        (Op::SetRate, Payload::Param(p)) => state.rate = *p,
        (Op::GetRts, Payload::Param(p)) => *p = state.rts,
        (Op::SetRts, Payload::Param(p)) => state.rts = *p,
        (Op::GetFrag, Payload::Param(p)) => *p = state.frag,
        (Op::SetFrag, Payload::Param(p)) => state.frag = *p,
        (Op::GetTxPower, Payload::Param(p)) => *p = state.txpower,
        (Op::SetTxPower, Payload::Param(p)) => state.txpower = *p,
        (Op::GetRetry, Payload::Param(p)) => *p = state.retry,
        (Op::SetRetry, Payload::Param(p)) => state.retry = *p,
        (Op::GetPower, Payload::Param(p)) => *p = state.power,
        (Op::SetPower, Payload::Param(p)) => state.power = *p,
        (Op::SetEncode, Payload::Point(point)) => set_encode(state, point)?,
        (Op::GetEncode, Payload::Point(point)) => get_encode(state, point)?,
        (op, payload) if payload.kind() != op.payload_kind() => {
            return Err(errno(libc::EINVAL));
        }
        _ => return Err(errno(libc::EOPNOTSUPP)),
    }
    Ok(())
}

fn key_slot(state: &DeviceState, flags: u16) -> io::Result<u8> {
    let index = (flags & IW_ENCODE_INDEX) as u8;
    if index > KEY_SLOTS {
        return Err(errno(libc::EINVAL));
    }
    Ok(if index == 0 { state.key_index } else { index })
}

fn set_encode(state: &mut DeviceState, point: &Point) -> io::Result<()> {
    let slot = key_slot(state, point.flags)?;
    if point.flags & IW_ENCODE_DISABLED != 0 {
        state.encode_mode = IW_ENCODE_DISABLED;
        return Ok(());
    }

    let key = point.written();
    if !key.is_empty() {
        state.keys[usize::from(slot - 1)] = key.to_vec();
    } else if point.flags & IW_ENCODE_INDEX != 0 {
        state.key_index = slot;
    }

    let mode = point.flags & (IW_ENCODE_OPEN | IW_ENCODE_RESTRICTED);
    if mode != 0 {
        state.encode_mode = mode;
    } else if state.encode_mode == IW_ENCODE_DISABLED {
        state.encode_mode = IW_ENCODE_ENABLED;
    }
    Ok(())
}

fn get_encode(state: &DeviceState, point: &mut Point) -> io::Result<()> {
    let slot = key_slot(state, point.flags)?;
    let key = &state.keys[usize::from(slot - 1)];

    if state.encode_mode == IW_ENCODE_DISABLED {
        point.length = 0;
        point.flags = IW_ENCODE_DISABLED | u16::from(slot);
        return Ok(());
    }

    write_point(point, key)?;
    point.flags = state.encode_mode | u16::from(slot);
    if key.is_empty() {
        point.flags |= IW_ENCODE_NOKEY;
    }
    Ok(())
}

/// Builds a packed `SIOCGIWSCAN` event stream.
#[derive(Debug, Clone, Default)]
pub struct StreamBuilder {
    events: Vec<Event>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, op: Op, payload: EventPayload) -> Self {
        self.events.push(Event { op, payload });
        self
    }

    /// Start a new cell.
    pub fn cell(self, bssid: MacAddr) -> Self {
        self.event(Op::GetAp, EventPayload::Addr(bssid))
    }

    /// An ESSID record; an empty ESSID is reported hidden (flags 0).
    pub fn essid(self, essid: &str) -> Self {
        let flags = u16::from(!essid.is_empty());
        self.point(Op::GetEssid, flags, essid.as_bytes())
    }

    pub fn mode(self, mode: Mode) -> Self {
        self.event(Op::GetMode, EventPayload::Mode(mode.code()))
    }

    pub fn frequency(self, frequency: Frequency) -> Self {
        self.event(Op::GetFreq, EventPayload::Freq(frequency.to_record()))
    }

    pub fn quality(self, quality: QualityRecord) -> Self {
        self.event(Op::EvQuality, EventPayload::Quality(quality))
    }

    /// One bit-rate record carrying every rate, as drivers emit them.
    pub fn rates(self, rates: &[u64]) -> Self {
        let params = rates
            .iter()
            .map(|&rate| Param::fixed(rate.min(i32::MAX as u64) as i32))
            .collect();
        self.event(Op::GetRate, EventPayload::Params(params))
    }

    pub fn encryption(self, flags: u16) -> Self {
        self.point(Op::GetEncode, flags, &[])
    }

    pub fn protocol(self, protocol: &str) -> Self {
        let mut name = [0u8; IFNAMSIZ];
        let len = protocol.len().min(IFNAMSIZ - 1);
        name[..len].copy_from_slice(&protocol.as_bytes()[..len]);
        self.event(Op::GetName, EventPayload::Name(name))
    }

    pub fn custom(self, text: &str) -> Self {
        self.point(Op::EvCustom, 0, text.as_bytes())
    }

    pub fn genie(self, ie: &[u8]) -> Self {
        self.point(Op::EvGenIe, 0, ie)
    }

    /// A record with an arbitrary code and body.
    pub fn raw(self, code: u16, body: &[u8]) -> Self {
        self.event(Op::from_code(code), EventPayload::Raw(body.to_vec()))
    }

    fn point(self, op: Op, flags: u16, data: &[u8]) -> Self {
        self.event(
            op,
            EventPayload::Point {
                flags,
                data: data.to_vec(),
            },
        )
    }

    pub fn build(&self) -> Vec<u8> {
        self.events.iter().flat_map(Event::encode).collect()
    }
}

/// Install `env_logger` for a test, once per process.
#[cfg(test)]
pub(crate) fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wlan0() -> InterfaceName {
        "wlan0".parse().unwrap()
    }

    #[test]
    fn test_devices_are_listed_in_insertion_order() {
        let mut kernel = FakeKernel::new()
            .with_wired("lo")
            .with_wireless("wlan0")
            .with_wired("eth0");
        assert_eq!(kernel.interface_names().unwrap(), vec!["lo", "wlan0", "eth0"]);
    }

    #[test]
    fn test_clones_share_state() {
        let kernel = FakeKernel::new().with_wireless("wlan0");
        let mut other = kernel.clone();
        other
            .request(&wlan0(), Op::SetMode, &mut Payload::Mode(IW_MODE_MONITOR))
            .unwrap();
        assert_eq!(kernel.state("wlan0").unwrap().mode, IW_MODE_MONITOR);
        assert_eq!(kernel.requests(), vec![("wlan0".to_string(), Op::SetMode)]);
    }

    #[test]
    fn test_point_too_small_reports_needed_length() {
        let mut kernel = FakeKernel::new().with_wireless("wlan0");
        let mut payload = Payload::Point(Point::output(16, 0));
        let err = kernel.request(&wlan0(), Op::GetRange, &mut payload).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::E2BIG));
        assert_eq!(
            payload.into_point().unwrap().length as usize,
            crate::codec::range::IW_RANGE_LEN
        );
    }

    #[test]
    fn test_scripted_failure_fires_once() {
        let mut kernel = FakeKernel::new().with_wireless("wlan0");
        kernel.fail_next("wlan0", Op::GetMode, libc::EIO);
        let err = kernel
            .request(&wlan0(), Op::GetMode, &mut Payload::Mode(0))
            .unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EIO));
        assert!(kernel.request(&wlan0(), Op::GetMode, &mut Payload::Mode(0)).is_ok());
    }

    #[test]
    fn test_restricted_without_key_uses_current_slot() {
        let mut kernel = FakeKernel::new().with_wireless("wlan0");
        let mut set = Payload::Point(Point::empty(IW_ENCODE_RESTRICTED));
        kernel.request(&wlan0(), Op::SetEncode, &mut set).unwrap();

        let mut get = Payload::Point(Point::output(IW_ENCODING_TOKEN_MAX, 0));
        kernel.request(&wlan0(), Op::GetEncode, &mut get).unwrap();
        let point = get.into_point().unwrap();
        assert_eq!(point.flags, IW_ENCODE_RESTRICTED | IW_ENCODE_NOKEY | 1);
        assert!(point.written().is_empty());
    }

    #[test]
    fn test_stream_builder_concatenates_records() {
        let one = StreamBuilder::new().cell(MacAddr::ANY).build();
        let two = StreamBuilder::new().cell(MacAddr::ANY).essid("a").build();
        assert_eq!(one.len(), IW_EV_LCP_LEN + SOCKADDR_LEN);
        assert_eq!(two.len(), one.len() + IW_EV_POINT_LEN + 1);
    }
}
