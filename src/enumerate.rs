//! Wireless interface discovery.
//!
//! The kernel has no "list wireless devices" request. Every network
//! interface is listed from `/proc/net/dev` and asked for its protocol name
//! with `SIOCGIWNAME`; the ones that answer are wireless.

use crate::channel::{ControlChannel, Transport};
use crate::config::ChannelConfig;
use crate::error::{Result, WextError};
use crate::interface::InterfaceName;
use log::{debug, warn};

/// Names of all wireless interfaces on this host, in kernel order.
///
/// The list is rebuilt on every call. A host without wireless devices
/// yields an empty list.
///
/// # Errors
///
/// [`IoFailure`](crate::ErrorKind::IoFailure) when the control socket cannot
/// be created or `/proc/net/dev` cannot be read.
pub fn list_wireless_interfaces() -> Result<Vec<InterfaceName>> {
    let mut channel = ControlChannel::new(ChannelConfig::default());
    wireless_interfaces(&mut channel)
}

/// [`list_wireless_interfaces`] over any transport.
pub fn wireless_interfaces<T: Transport>(channel: &mut ControlChannel<T>) -> Result<Vec<InterfaceName>> {
    channel.open()?;
    let names = channel
        .transport_mut()
        .interface_names()
        .map_err(|e| WextError::io(None, e))?;

    let mut wireless = Vec::new();
    for raw in names {
        let name = match InterfaceName::new(raw.as_str()) {
            Ok(name) => name,
            Err(e) => {
                warn!("skipping interface {:?}: {}", raw, e);
                continue;
            }
        };

        match channel.probe(&name) {
            Ok(()) => wireless.push(name),
            Err(e) => debug!("{}: not wireless ({})", name, e),
        }
    }

    debug!("found {} wireless interface(s)", wireless.len());
    Ok(wireless)
}

/// Confirm that `name` is a wireless interface.
///
/// # Errors
///
/// [`InvalidInterface`](crate::ErrorKind::InvalidInterface) when the kernel
/// does not list the device,
/// [`InterfaceNotWireless`](crate::ErrorKind::InterfaceNotWireless) when it
/// does but the device ignores `SIOCGIWNAME`, and
/// [`IoFailure`](crate::ErrorKind::IoFailure) when the list cannot be read.
pub fn check_interface<T: Transport>(channel: &mut ControlChannel<T>, name: &InterfaceName) -> Result<()> {
    channel.open()?;
    let listed = channel
        .transport_mut()
        .interface_names()
        .map_err(|e| WextError::io(None, e))?;
    if !listed.iter().any(|n| name == n.as_str()) {
        return Err(WextError::InvalidInterface {
            name: name.to_string(),
        });
    }

    match channel.probe(name) {
        Ok(()) => Ok(()),
        Err(e) if e.raw_os_error() == Some(libc::ENODEV) => Err(WextError::InvalidInterface {
            name: name.to_string(),
        }),
        Err(e) => {
            debug!("{}: not wireless ({})", name, e);
            Err(WextError::InterfaceNotWireless {
                name: name.to_string(),
            })
        }
    }
}

/// Interface names from the text of `/proc/net/dev`.
///
/// The first two lines are column headers; every other line starts with the
/// name followed by a colon.
pub fn parse_proc_net_dev(text: &str) -> Vec<String> {
    text.lines()
        .skip(2)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
