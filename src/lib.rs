//! Linux Wireless Extensions control-plane client.
//!
//! Query and configure 802.11 interfaces through the legacy `SIOCGIW*` /
//! `SIOCSIW*` ioctls: identity, frequency, bitrate, encryption, power,
//! statistics, capability ranges and scan results.
//!
//! The codec and value layers are pure and can be tested on any host. Only
//! [`channel::Socket`] talks to the kernel, and the unit tests swap it for an
//! in-memory kernel (the `testing` feature exposes it to other crates).
//!
//! # Example
//!
//! ```no_run
//! use wext::{list_wireless_interfaces, Wireless};
//!
//! for name in list_wireless_interfaces()? {
//!     let mut wifi = Wireless::open(name.as_str())?;
//!     println!("{}: {} on {}", name, wifi.essid()?, wifi.frequency()?);
//! }
//! # Ok::<(), wext::WextError>(())
//! ```

pub mod capability;
pub mod channel;
pub mod codec;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod interface;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod values;
pub mod wireless;

// Re-export commonly used items
pub use capability::{Attribute, Capability};
pub use channel::{ControlChannel, Socket, Transport};
pub use codec::Op;
pub use config::{ChannelConfig, ConfigError};
pub use enumerate::list_wireless_interfaces;
pub use error::{ErrorKind, Result, WextError};
pub use interface::InterfaceName;
pub use values::{
    AccessPoint, Bitrate, EncryptionMode, EncryptionState, Frequency, Key, MacAddr, Mode,
    PowerManagement, Quality, Statistics, Threshold, TxPower,
};
pub use wireless::Wireless;
