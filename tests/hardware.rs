//! Tests against the host's first wireless interface.
//!
//! Each test skips when the host has no wireless device. Mutating tests
//! also skip when the driver refuses the change (no `CAP_NET_ADMIN`, or a
//! busy link), and restore whatever they change.

use wext::{EncryptionMode, ErrorKind, Frequency, Mode, Wireless, WextError};
use wext_macros::hardware_test;

/// Whether a setter was refused, noting why.
fn refused(what: &str, result: &Result<(), WextError>) -> bool {
    match result {
        Ok(()) => false,
        Err(e) => {
            eprintln!("skipping {}: {}", what, e);
            true
        }
    }
}

/// Driver support varies, and some getters fail while the link is down.
/// None may claim the device vanished or lost its wireless extensions.
fn tolerate<T>(name: &str, result: wext::Result<T>) {
    if let Err(e) = result {
        assert!(
            matches!(e.kind(), ErrorKind::Unsupported | ErrorKind::IoFailure),
            "{}: {}",
            name,
            e
        );
    }
}

#[hardware_test]
fn reports_protocol_name(wifi: &mut Wireless) {
    let name = wifi.protocol_name().unwrap();
    assert!(!name.is_empty());
}

#[hardware_test]
fn every_getter_answers(wifi: &mut Wireless) {
    tolerate("ap_addr", wifi.ap_addr());
    tolerate("bitrate", wifi.bitrate());
    tolerate("bitrates", wifi.bitrates());
    tolerate("channel_info", wifi.channel_info());
    tolerate("essid", wifi.essid());
    tolerate("fragmentation", wifi.fragmentation());
    tolerate("frequency", wifi.frequency());
    tolerate("mode", wifi.mode());
    tolerate("nwid", wifi.nwid());
    tolerate("power_management", wifi.power_management());
    tolerate("quality_max", wifi.quality_max());
    tolerate("quality_avg", wifi.quality_avg());
    tolerate("retry_limit", wifi.retry_limit());
    tolerate("rts", wifi.rts());
    tolerate("sensitivity", wifi.sensitivity());
    tolerate("txpower", wifi.txpower());
    tolerate("statistics", wifi.statistics());
    tolerate("commit", wifi.commit());
}

#[hardware_test]
fn capabilities_read_or_are_unsupported(wifi: &mut Wireless) {
    for cap in wext::Capability::ALL {
        tolerate(cap.name(), cap.read(wifi));
    }
}

#[hardware_test]
fn set_mode_round_trip(wifi: &mut Wireless) -> wext::Result<()> {
    let old = wifi.mode()?;
    let result = wifi.set_mode(Mode::Monitor);
    if refused("set_mode", &result) {
        return Ok(());
    }
    let mode = wifi.await_value(&Mode::Monitor, |w| w.mode())?;
    wifi.set_mode(old)?;
    assert_eq!(mode, Mode::Monitor);
    Ok(())
}

#[hardware_test]
fn set_frequency_round_trip(wifi: &mut Wireless) -> wext::Result<()> {
    let old = wifi.frequency()?;
    let wanted: Frequency = "2.462GHz".parse()?;
    let result = wifi.set_frequency(wanted);
    if refused("set_frequency", &result) {
        return Ok(());
    }
    let freq = wifi.await_value(&wanted, |w| w.frequency())?;
    wifi.set_frequency(old)?;
    assert!(
        freq == wanted || freq.channel() == Some(11),
        "tuned to {}",
        freq
    );
    Ok(())
}

#[hardware_test]
fn restricted_encryption_round_trip(wifi: &mut Wireless) -> wext::Result<()> {
    let old = wifi.encryption()?.mode;
    let result = wifi.set_encryption(EncryptionMode::Restricted);
    if refused("set_encryption", &result) {
        return Ok(());
    }
    let state = wifi.encryption()?;
    wifi.set_encryption(old)?;
    assert_eq!(state.mode.to_string(), "restricted");
    assert_eq!(state.numeric() & 0xF000, wext::codec::consts::IW_ENCODE_RESTRICTED);
    Ok(())
}

#[hardware_test]
fn wired_interface_is_not_wireless(_wifi: &mut Wireless) {
    let err = Wireless::open("lo").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InterfaceNotWireless);
}

#[hardware_test]
fn absent_interface_is_invalid(_wifi: &mut Wireless) {
    let err = Wireless::open("wext-absent0").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInterface);
}
