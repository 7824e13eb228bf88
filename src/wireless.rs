//! The per-interface facade.
//!
//! [`Wireless`] wraps a [`ControlChannel`] bound to one interface and turns
//! each attribute into a typed getter and setter. Every call is one kernel
//! round-trip (scans and capability queries may take a few) and errors are
//! passed through exactly as the channel classified them.
//!
//! Setters do not read back. Drivers may apply a change asynchronously, so a
//! getter right after a setter can still report the old value; use
//! [`Wireless::await_value`] when the new value must be observed.

use crate::channel::{ControlChannel, Socket, Transport};
use crate::codec::consts::*;
use crate::codec::range::RangeInfo;
use crate::codec::{c_string, scan_req, stream, Op, Param, Payload, PayloadKind, Point};
use crate::config::ChannelConfig;
use crate::enumerate;
use crate::error::{Result, WextError};
use crate::interface::InterfaceName;
use crate::values::{
    AccessPoint, Bitrate, ChannelEntry, EncryptionMode, EncryptionState, Frequency, Key, MacAddr,
    Mode, PowerManagement, Quality, RetryLimit, Statistics, Threshold, TxPower,
};
use log::{debug, info, warn};
use std::thread;
use zeroize::Zeroize;

/// Wireless Extensions access to one network interface.
#[derive(Debug)]
pub struct Wireless<T: Transport = Socket> {
    name: InterfaceName,
    channel: ControlChannel<T>,
}

impl Wireless<Socket> {
    /// Open `name` with the default configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `name` is not a valid interface name
    /// - `InvalidInterface` if there is no such device
    /// - `InterfaceNotWireless` if the device has no wireless extensions
    /// - `IoFailure` if the control socket cannot be created
    pub fn open(name: &str) -> Result<Self> {
        Self::open_with_config(name, ChannelConfig::default())
    }

    pub fn open_with_config(name: &str, config: ChannelConfig) -> Result<Self> {
        Self::with_transport(name, Socket::new(), config)
    }
}

impl<T: Transport> Wireless<T> {
    /// Open `name` over `transport`, checking that it is a wireless device.
    pub fn with_transport(name: &str, transport: T, config: ChannelConfig) -> Result<Self> {
        config.validate()?;
        let name = InterfaceName::new(name)?;
        let mut channel = ControlChannel::with_transport(transport, config);
        enumerate::check_interface(&mut channel, &name)?;
        debug!("{}: opened", name);
        Ok(Self { name, channel })
    }

    /// Bind to `name` without asking the kernel about it.
    ///
    /// Problems with the device surface on the first request instead.
    pub fn unchecked(name: InterfaceName, transport: T, config: ChannelConfig) -> Self {
        Self {
            name,
            channel: ControlChannel::with_transport(transport, config),
        }
    }

    pub fn name(&self) -> &InterfaceName {
        &self.name
    }

    pub fn config(&self) -> &ChannelConfig {
        self.channel.config()
    }

    pub fn channel_mut(&mut self) -> &mut ControlChannel<T> {
        &mut self.channel
    }

    fn get(&mut self, op: Op) -> Result<Payload> {
        self.channel
            .perform(&self.name, op, Payload::empty(op.payload_kind()))
    }

    fn set(&mut self, op: Op, payload: Payload) -> Result<()> {
        self.channel.perform(&self.name, op, payload).map(drop)
    }

    fn get_param(&mut self, op: Op) -> Result<Param> {
        self.get(op)?
            .into_param()
            .ok_or_else(|| WextError::malformed(format!("{} returned no parameter", op)))
    }

    fn get_point(&mut self, op: Op, capacity: usize, flags: u16) -> Result<Point> {
        self.channel
            .perform(&self.name, op, Payload::Point(Point::output(capacity, flags)))?
            .into_point()
            .ok_or_else(|| WextError::malformed(format!("{} returned no buffer", op)))
    }

    fn set_text(&mut self, op: Op, text: &str) -> Result<()> {
        let bytes = text.as_bytes();
        if bytes.len() > IW_ESSID_MAX_SIZE {
            return Err(WextError::invalid_argument(format!(
                "{:?} is {} bytes (max {})",
                text,
                bytes.len(),
                IW_ESSID_MAX_SIZE
            )));
        }
        let flags = u16::from(!bytes.is_empty());
        self.set(op, Payload::Point(Point::input(bytes.to_vec(), flags)))
    }

    /// The protocol name, e.g. `"IEEE 802.11bgn"`.
    pub fn protocol_name(&mut self) -> Result<String> {
        let name = self
            .get(Op::GetName)?
            .into_name()
            .ok_or_else(|| WextError::malformed("SIOCGIWNAME returned no name"))?;
        Ok(c_string(&name))
    }

    pub fn mode(&mut self) -> Result<Mode> {
        let code = self
            .get(Op::GetMode)?
            .into_mode()
            .ok_or_else(|| WextError::malformed("SIOCGIWMODE returned no mode"))?;
        Ok(Mode::from_code(code))
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.set(Op::SetMode, Payload::Mode(mode.code()))
    }

    /// The network name; empty when the device is not associated.
    pub fn essid(&mut self) -> Result<String> {
        let point = self.get_point(Op::GetEssid, IW_ESSID_MAX_SIZE + 1, 0)?;
        Ok(c_string(point.written()))
    }

    /// Set the network name; an empty name means "any".
    pub fn set_essid(&mut self, essid: &str) -> Result<()> {
        self.set_text(Op::SetEssid, essid)
    }

    pub fn nickname(&mut self) -> Result<String> {
        let point = self.get_point(Op::GetNickname, IW_ESSID_MAX_SIZE + 1, 0)?;
        Ok(c_string(point.written()))
    }

    pub fn set_nickname(&mut self, nickname: &str) -> Result<()> {
        self.set_text(Op::SetNickname, nickname)
    }

    /// The pre-802.11 network id, `None` when disabled.
    pub fn nwid(&mut self) -> Result<Option<u32>> {
        let param = self.get_param(Op::GetNwid)?;
        Ok((!param.disabled).then_some(param.value as u32))
    }

    pub fn frequency(&mut self) -> Result<Frequency> {
        let rec = self
            .get(Op::GetFreq)?
            .into_freq()
            .ok_or_else(|| WextError::malformed("SIOCGIWFREQ returned no frequency"))?;
        Ok(Frequency::from_record(rec))
    }

    pub fn set_frequency(&mut self, frequency: Frequency) -> Result<()> {
        self.set(Op::SetFreq, Payload::Freq(frequency.to_record()))
    }

    /// Channels the device can use.
    pub fn channel_info(&mut self) -> Result<Vec<ChannelEntry>> {
        Ok(self.range()?.channels)
    }

    pub fn bitrate(&mut self) -> Result<Bitrate> {
        Ok(Bitrate::from_param(self.get_param(Op::GetRate)?))
    }

    pub fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<()> {
        self.set(Op::SetRate, Payload::Param(bitrate.to_param()?))
    }

    /// Rates the device supports; empty when the driver lists none.
    pub fn bitrates(&mut self) -> Result<Vec<Bitrate>> {
        Ok(self.range()?.bitrates)
    }

    /// Address of the associated access point ([`MacAddr::OFF`] when not
    /// associated).
    pub fn ap_addr(&mut self) -> Result<MacAddr> {
        self.get(Op::GetAp)?
            .into_addr()
            .ok_or_else(|| WextError::malformed("SIOCGIWAP returned no address"))
    }

    pub fn set_ap_addr(&mut self, addr: MacAddr) -> Result<()> {
        self.set(Op::SetAp, Payload::Addr(addr))
    }

    /// Encryption state of the current key.
    pub fn encryption(&mut self) -> Result<EncryptionState> {
        let point = self.channel.perform_bulk(&self.name, Op::GetEncode, 0)?;
        Ok(EncryptionState::from_point(&point))
    }

    /// Switch encryption on or off or change the security mode, keeping the
    /// current key.
    pub fn set_encryption(&mut self, mode: EncryptionMode) -> Result<()> {
        self.set(Op::SetEncode, Payload::Point(Point::empty(mode.flags())))
    }

    /// State and material of key slot `index` (1-based).
    pub fn key(&mut self, index: u8) -> Result<EncryptionState> {
        let index = key_index(index)?;
        let point = self.channel.perform_bulk(&self.name, Op::GetEncode, index)?;
        Ok(EncryptionState::from_point(&point))
    }

    /// Install `key` in slot `index`, or in the current slot when `None`.
    ///
    /// The copy of the key handed to the kernel is wiped afterwards.
    pub fn set_key(&mut self, index: Option<u8>, key: &Key) -> Result<()> {
        let flags = index.map(key_index).transpose()?.unwrap_or(0);
        let mut payload = Payload::Point(Point::input(key.as_bytes().to_vec(), flags));
        let result = self.channel.perform_mut(&self.name, Op::SetEncode, &mut payload);
        if let Payload::Point(point) = &mut payload {
            point.data.zeroize();
        }
        result
    }

    pub fn txpower(&mut self) -> Result<TxPower> {
        Ok(TxPower::from_param(self.get_param(Op::GetTxPower)?))
    }

    pub fn set_txpower(&mut self, power: TxPower) -> Result<()> {
        self.set(Op::SetTxPower, Payload::Param(power.to_param()))
    }

    pub fn retry_limit(&mut self) -> Result<RetryLimit> {
        Ok(RetryLimit::from_param(self.get_param(Op::GetRetry)?))
    }

    pub fn set_retry_limit(&mut self, limit: RetryLimit) -> Result<()> {
        self.set(Op::SetRetry, Payload::Param(limit.to_param()))
    }

    /// RTS/CTS handshake threshold.
    pub fn rts(&mut self) -> Result<Threshold> {
        Ok(Threshold::from_param(self.get_param(Op::GetRts)?))
    }

    pub fn set_rts(&mut self, threshold: Threshold) -> Result<()> {
        self.set(Op::SetRts, Payload::Param(threshold.to_param()))
    }

    /// Receive sensitivity, in driver units (dBm when negative).
    pub fn sensitivity(&mut self) -> Result<i32> {
        Ok(self.get_param(Op::GetSens)?.value)
    }

    pub fn set_sensitivity(&mut self, sensitivity: i32) -> Result<()> {
        self.set(Op::SetSens, Payload::Param(Param::fixed(sensitivity)))
    }

    pub fn power_management(&mut self) -> Result<PowerManagement> {
        Ok(PowerManagement::from_param(self.get_param(Op::GetPower)?))
    }

    pub fn set_power_management(&mut self, power: PowerManagement) -> Result<()> {
        self.set(Op::SetPower, Payload::Param(power.to_param()))
    }

    /// Fragmentation threshold.
    pub fn fragmentation(&mut self) -> Result<Threshold> {
        Ok(Threshold::from_param(self.get_param(Op::GetFrag)?))
    }

    pub fn set_fragmentation(&mut self, threshold: Threshold) -> Result<()> {
        self.set(Op::SetFrag, Payload::Param(threshold.to_param()))
    }

    /// Link statistics. Reading them clears the driver's "updated" flags.
    pub fn statistics(&mut self) -> Result<Statistics> {
        let point = self.get_point(Op::GetStats, IW_STATISTICS_LEN, 1)?;
        Statistics::decode(point.written())
    }

    /// Best link quality the driver can report.
    pub fn quality_max(&mut self) -> Result<Quality> {
        Ok(Quality::from_record(self.range()?.max_qual))
    }

    /// Typical link quality.
    pub fn quality_avg(&mut self) -> Result<Quality> {
        Ok(Quality::from_record(self.range()?.avg_qual))
    }

    /// The driver's capability block.
    pub fn range(&mut self) -> Result<RangeInfo> {
        let point = self.channel.perform_bulk(&self.name, Op::GetRange, 0)?;
        Ok(RangeInfo::decode(point.written()))
    }

    /// Apply pending settings, for drivers that defer them.
    pub fn commit(&mut self) -> Result<()> {
        self.set(Op::Commit, Payload::empty(PayloadKind::None))
    }

    /// Scan all channels and return the cells found.
    ///
    /// Blocks until the driver has results, retrying while it reports the
    /// scan still running (bounded by the configured retries). Triggering a
    /// scan needs `CAP_NET_ADMIN`; without it the results of the last scan
    /// are returned.
    pub fn scan(&mut self) -> Result<Vec<AccessPoint>> {
        self.trigger_scan(Point::empty(IW_SCAN_DEFAULT))?;
        self.scan_results()
    }

    /// Scan for one network, which also finds hidden cells using it.
    pub fn scan_essid(&mut self, essid: &str) -> Result<Vec<AccessPoint>> {
        let req = scan_req::encode(essid)?;
        self.trigger_scan(Point::input(req, IW_SCAN_THIS_ESSID))?;
        self.scan_results()
    }

    fn trigger_scan(&mut self, point: Point) -> Result<()> {
        info!("{}: starting scan", self.name);
        match self.set(Op::SetScan, Payload::Point(point)) {
            Err(e) if e.raw_os_error() == Some(libc::EPERM) => {
                warn!("{}: not permitted to start a scan, reading cached results", self.name);
                Ok(())
            }
            other => other,
        }
    }

    fn scan_results(&mut self) -> Result<Vec<AccessPoint>> {
        let point = self.channel.perform_bulk(&self.name, Op::GetScan, 0)?;
        let cells = stream::access_points(&stream::decode(point.written()));
        info!("{}: scan found {} cell(s)", self.name, cells.len());
        Ok(cells)
    }

    /// Poll `get` until it returns `expected`, waiting the configured retry
    /// interval between reads, at most the configured number of retries.
    ///
    /// Returns the last value read, which differs from `expected` only if
    /// the retries ran out. Errors from `get` end the wait.
    pub fn await_value<V, F>(&mut self, expected: &V, mut get: F) -> Result<V>
    where
        V: PartialEq,
        F: FnMut(&mut Self) -> Result<V>,
    {
        let interval = self.config().retry_interval;
        let retries = self.config().max_retries;

        let mut value = get(self)?;
        for _ in 0..retries {
            if value == *expected {
                break;
            }
            thread::sleep(interval);
            value = get(self)?;
        }
        Ok(value)
    }
}

/// Validate a 1-based key slot number for the flag word.
fn key_index(index: u8) -> Result<u16> {
    if index == 0 || u16::from(index) > IW_ENCODE_INDEX {
        return Err(WextError::invalid_argument(format!(
            "key index {} is out of range",
            index
        )));
    }
    Ok(u16::from(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::QualityRecord;
    use crate::error::ErrorKind;
    use crate::testing::{init_logging, BulkBehavior, FakeKernel, StreamBuilder};
    use crate::values::Level;
    use std::time::Duration;

    fn config() -> ChannelConfig {
        ChannelConfig {
            retry_interval: Duration::from_millis(1),
            max_retries: 3,
            ..ChannelConfig::default()
        }
    }

    fn kernel() -> FakeKernel {
        FakeKernel::new()
            .with_wired("lo")
            .with_wired("eth0")
            .with_wireless("wlan0")
    }

    fn open(kernel: &FakeKernel) -> Wireless<FakeKernel> {
        init_logging();
        Wireless::with_transport("wlan0", kernel.clone(), config()).unwrap()
    }

    fn unchecked(kernel: &FakeKernel, name: &str) -> Wireless<FakeKernel> {
        Wireless::unchecked(name.parse().unwrap(), kernel.clone(), config())
    }

    #[test]
    fn test_open_validates_interface() {
        let kernel = kernel();
        let err = Wireless::with_transport("eth0", kernel.clone(), config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InterfaceNotWireless);
        let err = Wireless::with_transport("eth5", kernel.clone(), config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInterface);
        let err = Wireless::with_transport("", kernel.clone(), config()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(Wireless::with_transport("wlan0", kernel, config()).is_ok());
    }

    #[test]
    fn test_open_rejects_bad_config() {
        let bad = ChannelConfig {
            max_retries: 0,
            ..config()
        };
        let err = Wireless::with_transport("wlan0", kernel(), bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_getters_on_healthy_device() {
        let kernel = kernel();
        let mut wifi = open(&kernel);

        assert_eq!(wifi.protocol_name().unwrap(), "IEEE 802.11bgn");
        assert_eq!(wifi.mode().unwrap(), Mode::Managed);
        assert_eq!(wifi.essid().unwrap(), "");
        assert_eq!(wifi.nwid().unwrap(), None);
        assert_eq!(wifi.frequency().unwrap().to_string(), "2.412GHz");
        assert_eq!(wifi.bitrate().unwrap(), Bitrate::Fixed(54_000_000));
        assert_eq!(wifi.ap_addr().unwrap(), MacAddr::OFF);
        assert_eq!(wifi.txpower().unwrap(), TxPower::Dbm(20));
        assert_eq!(wifi.retry_limit().unwrap(), RetryLimit::limit(7));
        assert_eq!(wifi.rts().unwrap(), Threshold::Off);
        assert_eq!(wifi.fragmentation().unwrap(), Threshold::Off);
        assert_eq!(wifi.sensitivity().unwrap(), 0);
        assert_eq!(wifi.power_management().unwrap(), PowerManagement::OFF);
        assert!(!wifi.encryption().unwrap().enabled);

        let stats = wifi.statistics().unwrap();
        assert_eq!(stats.quality.signal, Level::Dbm(-40));
        assert_eq!(stats.discarded_retries, 3);
        assert_eq!(stats.missed_beacon, 2);

        assert_eq!(wifi.quality_max().unwrap().quality, Some(70));
        assert_eq!(wifi.quality_avg().unwrap().quality, Some(35));
        assert_eq!(wifi.bitrates().unwrap().len(), 12);
        let channels = wifi.channel_info().unwrap();
        assert_eq!(channels.len(), 13);
        assert_eq!(channels[10].frequency, Frequency::Hz(2_462_000_000));
        assert_eq!(wifi.range().unwrap().we_version_compiled, 22);
    }

    #[test]
    fn test_set_mode() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        let old = wifi.mode().unwrap();

        wifi.set_mode(Mode::Monitor).unwrap();
        assert_eq!(wifi.mode().unwrap(), Mode::Monitor);
        wifi.set_mode(old).unwrap();
        assert_eq!(wifi.mode().unwrap(), Mode::Managed);
    }

    #[test]
    fn test_set_essid() {
        let kernel = kernel();
        let mut wifi = open(&kernel);

        wifi.set_essid("Joost").unwrap();
        assert_eq!(wifi.essid().unwrap(), "Joost");
        assert_eq!(kernel.state("wlan0").unwrap().essid_flags, 1);

        wifi.set_essid("").unwrap();
        assert_eq!(wifi.essid().unwrap(), "");
        assert_eq!(kernel.state("wlan0").unwrap().essid_flags, 0);
    }

    #[test]
    fn test_set_essid_too_long_never_reaches_kernel() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        let before = kernel.requests().len();

        let err = wifi.set_essid(&"x".repeat(IW_ESSID_MAX_SIZE + 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(kernel.requests().len(), before);
        assert!(wifi.set_essid(&"x".repeat(IW_ESSID_MAX_SIZE)).is_ok());
    }

    #[test]
    fn test_set_nickname() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        wifi.set_nickname("laptop").unwrap();
        assert_eq!(wifi.nickname().unwrap(), "laptop");
    }

    #[test]
    fn test_set_frequency() {
        let kernel = kernel();
        let mut wifi = open(&kernel);

        wifi.set_frequency("2.462GHz".parse().unwrap()).unwrap();
        assert_eq!(wifi.frequency().unwrap().to_string(), "2.462GHz");
        let rec = kernel.state("wlan0").unwrap().freq;
        assert_eq!((rec.m, rec.e), (246_200_000, 1));

        wifi.set_frequency(Frequency::Channel(11)).unwrap();
        assert_eq!(wifi.frequency().unwrap(), Frequency::Channel(11));
    }

    #[test]
    fn test_set_params() {
        let kernel = kernel();
        let mut wifi = open(&kernel);

        wifi.set_bitrate(Bitrate::Auto).unwrap();
        assert_eq!(wifi.bitrate().unwrap(), Bitrate::Auto);
        wifi.set_txpower(TxPower::Dbm(15)).unwrap();
        assert_eq!(wifi.txpower().unwrap(), TxPower::Dbm(15));
        wifi.set_txpower(TxPower::Off).unwrap();
        assert_eq!(wifi.txpower().unwrap(), TxPower::Off);
        wifi.set_retry_limit(RetryLimit::lifetime(500)).unwrap();
        assert_eq!(wifi.retry_limit().unwrap(), RetryLimit::lifetime(500));
        wifi.set_rts(Threshold::Fixed(512)).unwrap();
        assert_eq!(wifi.rts().unwrap(), Threshold::Fixed(512));
        wifi.set_fragmentation(Threshold::Fixed(1024)).unwrap();
        assert_eq!(wifi.fragmentation().unwrap(), Threshold::Fixed(1024));
        wifi.set_sensitivity(-80).unwrap();
        assert_eq!(wifi.sensitivity().unwrap(), -80);
        let power = PowerManagement::period(Duration::from_millis(100));
        wifi.set_power_management(power).unwrap();
        assert_eq!(wifi.power_management().unwrap(), power);
        let ap = MacAddr::new([0x61, 0x62, 0x63, 0x64, 0x65, 0x66]);
        wifi.set_ap_addr(ap).unwrap();
        assert_eq!(wifi.ap_addr().unwrap(), ap);
    }

    #[test]
    fn test_out_of_range_bitrate_never_reaches_kernel() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        let before = kernel.requests().len();
        let err = wifi.set_bitrate(Bitrate::Fixed(u64::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(kernel.requests().len(), before);
    }

    #[test]
    fn test_restricted_encryption_reads_back() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        let old = wifi.encryption().unwrap().mode;

        wifi.set_encryption(EncryptionMode::Restricted).unwrap();
        let state = wifi.encryption().unwrap();
        assert_eq!(state.mode.to_string(), "restricted");
        assert_eq!(state.numeric(), IW_ENCODE_RESTRICTED + 1);
        assert!(state.no_key);

        wifi.set_encryption(old).unwrap();
        assert!(!wifi.encryption().unwrap().enabled);
    }

    #[test]
    fn test_keys() {
        let kernel = kernel();
        let mut wifi = open(&kernel);

        let key: Key = "1234-5678-9A".parse().unwrap();
        wifi.set_key(Some(2), &key).unwrap();
        wifi.set_encryption(EncryptionMode::Open).unwrap();

        let slot = wifi.key(2).unwrap();
        assert_eq!(slot.key, key);
        assert_eq!(slot.key_index, Some(2));
        assert_eq!(slot.mode, EncryptionMode::Open);
        // Slot 1 is still current and empty.
        assert!(wifi.encryption().unwrap().no_key);

        assert_eq!(wifi.key(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
        // The driver has four slots and rejects the rest with EINVAL.
        assert_eq!(wifi.key(9).unwrap_err().raw_os_error(), Some(libc::EINVAL));
    }

    #[test]
    fn test_commit() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        wifi.commit().unwrap();
        assert_eq!(kernel.state("wlan0").unwrap().commits, 1);
    }

    #[test]
    fn test_scan() {
        let kernel = kernel();
        let stream = StreamBuilder::new()
            .cell(MacAddr::new([0, 0x11, 0x22, 0x33, 0x44, 0x55]))
            .essid("homenet")
            .mode(Mode::Master)
            .frequency(Frequency::Hz(2_437_000_000))
            .quality(QualityRecord {
                qual: 50,
                level: 0xC4,
                noise: 0xA1,
                updated: IW_QUAL_DBM | IW_QUAL_ALL_UPDATED,
            })
            .cell(MacAddr::new([0, 0x11, 0x22, 0x33, 0x44, 0x66]))
            .essid("")
            .build();
        kernel.update("wlan0", |state| state.scan = stream);
        let mut wifi = open(&kernel);

        let cells = wifi.scan().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].essid, "homenet");
        assert_eq!(cells[0].quality.unwrap().signal, Level::Dbm(-60));
        assert!(cells[1].hidden);

        let requests = kernel.state("wlan0").unwrap().scan_requests;
        assert_eq!(requests, vec![(IW_SCAN_DEFAULT, Vec::new())]);
    }

    #[test]
    fn test_empty_scan_is_empty() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        assert!(wifi.scan().unwrap().is_empty());
    }

    #[test]
    fn test_empty_bitrate_list() {
        let kernel = kernel();
        kernel.update("wlan0", |state| {
            let mut range = crate::testing::default_range();
            range.bitrates.clear();
            state.range = range.encode();
        });
        let mut wifi = open(&kernel);
        assert_eq!(wifi.bitrates().unwrap().len(), 0);
    }

    #[test]
    fn test_scan_essid_sends_filter() {
        let kernel = kernel();
        let mut wifi = open(&kernel);
        wifi.scan_essid("homenet").unwrap();

        let requests = kernel.state("wlan0").unwrap().scan_requests;
        assert_eq!(requests.len(), 1);
        let (flags, req) = &requests[0];
        assert_eq!(*flags, IW_SCAN_THIS_ESSID);
        assert_eq!(req.len(), scan_req::IW_SCAN_REQ_LEN);
        assert_eq!(&req[20..27], b"homenet");
    }

    #[test]
    fn test_scan_without_permission_reads_cached_results() {
        let kernel = kernel();
        kernel.update("wlan0", |state| {
            state.scan = StreamBuilder::new().cell(MacAddr::ANY).build();
        });
        kernel.fail_next("wlan0", Op::SetScan, libc::EPERM);
        let mut wifi = open(&kernel);
        assert_eq!(wifi.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_scan_busy_until_ready() {
        let kernel = kernel();
        kernel.set_bulk(
            Op::GetScan,
            BulkBehavior::BusyThen {
                remaining: 2,
                data: StreamBuilder::new().cell(MacAddr::ANY).build(),
            },
        );
        let mut wifi = open(&kernel);
        assert_eq!(wifi.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_scan_busy_forever() {
        let kernel = kernel();
        kernel.set_bulk(
            Op::GetScan,
            BulkBehavior::BusyThen {
                remaining: u32::MAX,
                data: Vec::new(),
            },
        );
        let mut wifi = open(&kernel);
        let err = wifi.scan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransientBusy);
    }

    #[test]
    fn test_unsupported_attribute() {
        let kernel = kernel();
        kernel.unsupport("wlan0", Op::GetNickname);
        let mut wifi = open(&kernel);
        let err = wifi.nickname().unwrap_err();
        assert!(matches!(err, WextError::Unsupported { op: Op::GetNickname, .. }));
        // Other attributes still work.
        assert!(wifi.essid().is_ok());
    }

    fn every_getter_fails_with(wifi: &mut Wireless<FakeKernel>, kind: ErrorKind) {
        let results: Vec<(&str, Result<()>)> = vec![
            ("protocol_name", wifi.protocol_name().map(drop)),
            ("mode", wifi.mode().map(drop)),
            ("essid", wifi.essid().map(drop)),
            ("nwid", wifi.nwid().map(drop)),
            ("frequency", wifi.frequency().map(drop)),
            ("channel_info", wifi.channel_info().map(drop)),
            ("bitrate", wifi.bitrate().map(drop)),
            ("bitrates", wifi.bitrates().map(drop)),
            ("ap_addr", wifi.ap_addr().map(drop)),
            ("encryption", wifi.encryption().map(drop)),
            ("txpower", wifi.txpower().map(drop)),
            ("retry_limit", wifi.retry_limit().map(drop)),
            ("rts", wifi.rts().map(drop)),
            ("sensitivity", wifi.sensitivity().map(drop)),
            ("power_management", wifi.power_management().map(drop)),
            ("fragmentation", wifi.fragmentation().map(drop)),
            ("statistics", wifi.statistics().map(drop)),
            ("quality_max", wifi.quality_max().map(drop)),
            ("quality_avg", wifi.quality_avg().map(drop)),
            ("commit", wifi.commit()),
            ("set_mode", wifi.set_mode(Mode::Monitor)),
            ("set_essid", wifi.set_essid("Joost")),
            ("set_frequency", wifi.set_frequency(Frequency::Hz(2_462_000_000))),
            ("set_encryption", wifi.set_encryption(EncryptionMode::Restricted)),
        ];
        for (name, result) in results {
            let err = result.expect_err(name);
            assert_eq!(err.kind(), kind, "{}: {}", name, err);
        }
    }

    #[test]
    fn test_wired_device_is_not_wireless() {
        let kernel = kernel();
        let mut wifi = unchecked(&kernel, "eth0");
        every_getter_fails_with(&mut wifi, ErrorKind::InterfaceNotWireless);
    }

    #[test]
    fn test_wired_device_answering_einval_is_not_wireless() {
        let kernel = kernel();
        kernel.set_wired_errno(libc::EINVAL);
        let mut wifi = unchecked(&kernel, "eth0");
        every_getter_fails_with(&mut wifi, ErrorKind::InterfaceNotWireless);
    }

    #[test]
    fn test_absent_device_is_invalid_interface() {
        let kernel = kernel();
        let mut wifi = unchecked(&kernel, "eth5");
        every_getter_fails_with(&mut wifi, ErrorKind::InvalidInterface);
    }

    #[test]
    fn test_await_value() {
        let kernel = kernel();
        let mut wifi = open(&kernel);

        wifi.set_mode(Mode::AdHoc).unwrap();
        let mode = wifi.await_value(&Mode::AdHoc, |w| w.mode()).unwrap();
        assert_eq!(mode, Mode::AdHoc);

        // Never reached: gives up after the configured retries.
        let before = kernel.requests().len();
        let mode = wifi.await_value(&Mode::Mesh, |w| w.mode()).unwrap();
        assert_eq!(mode, Mode::AdHoc);
        assert_eq!(kernel.requests().len() - before, 4);
    }
}
