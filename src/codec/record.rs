//! `#[repr(C)]` mirrors of the kernel-facing records.
//!
//! Only the socket transport touches these; everything above it works with
//! [`Payload`]. `struct iwreq` is 32 bytes on every Linux target: a 16-byte
//! interface name followed by the 16-byte `iwreq_data` union.

use super::consts::{ARPHRD_ETHER, IFNAMSIZ};
use super::payload::{FreqRecord, Param, Payload, QualityRecord};
use crate::interface::InterfaceName;
use crate::values::MacAddr;
use std::ptr;

/// `struct iw_param`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct IwParam {
    pub value: i32,
    pub fixed: u8,
    pub disabled: u8,
    pub flags: u16,
}

/// `struct iw_freq`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct IwFreq {
    pub m: i32,
    pub e: i16,
    pub i: u8,
    pub flags: u8,
}

/// `struct iw_quality`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct IwQuality {
    pub qual: u8,
    pub level: u8,
    pub noise: u8,
    pub updated: u8,
}

/// `struct iw_point`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct IwPoint {
    pub pointer: *mut u8,
    pub length: u16,
    pub flags: u16,
}

/// `struct sockaddr`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SockAddr {
    pub family: u16,
    pub data: [u8; 14],
}

/// `union iwreq_data`.
#[repr(C)]
#[derive(Clone, Copy)]
pub union IwReqData {
    pub name: [u8; IFNAMSIZ],
    pub data: IwPoint,
    pub param: IwParam,
    pub freq: IwFreq,
    pub addr: SockAddr,
    pub qual: IwQuality,
    pub mode: u32,
}

/// `struct iwreq`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct IwReq {
    pub ifr_name: [u8; IFNAMSIZ],
    pub u: IwReqData,
}

impl From<Param> for IwParam {
    fn from(p: Param) -> Self {
        Self {
            value: p.value,
            fixed: p.fixed as u8,
            disabled: p.disabled as u8,
            flags: p.flags,
        }
    }
}

impl From<IwParam> for Param {
    fn from(p: IwParam) -> Self {
        Self {
            value: p.value,
            fixed: p.fixed != 0,
            disabled: p.disabled != 0,
            flags: p.flags,
        }
    }
}

impl From<FreqRecord> for IwFreq {
    fn from(f: FreqRecord) -> Self {
        Self {
            m: f.m,
            e: f.e,
            i: f.index,
            flags: f.flags,
        }
    }
}

impl From<IwFreq> for FreqRecord {
    fn from(f: IwFreq) -> Self {
        Self {
            m: f.m,
            e: f.e,
            index: f.i,
            flags: f.flags,
        }
    }
}

impl From<QualityRecord> for IwQuality {
    fn from(q: QualityRecord) -> Self {
        Self {
            qual: q.qual,
            level: q.level,
            noise: q.noise,
            updated: q.updated,
        }
    }
}

impl From<IwQuality> for QualityRecord {
    fn from(q: IwQuality) -> Self {
        Self {
            qual: q.qual,
            level: q.level,
            noise: q.noise,
            updated: q.updated,
        }
    }
}

impl From<MacAddr> for SockAddr {
    fn from(mac: MacAddr) -> Self {
        let mut data = [0u8; 14];
        data[..6].copy_from_slice(mac.as_bytes());
        Self {
            family: ARPHRD_ETHER,
            data,
        }
    }
}

impl From<SockAddr> for MacAddr {
    fn from(addr: SockAddr) -> Self {
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&addr.data[..6]);
        MacAddr::new(bytes)
    }
}

impl IwReq {
    /// Build the record for a request.
    ///
    /// A [`Payload::Point`] is referenced by raw pointer, so the record must
    /// not outlive `payload` nor be used after `payload` is moved. Its length
    /// is clamped to the buffer, whatever `Point::length` claims.
    pub fn new(name: &InterfaceName, payload: &mut Payload) -> Self {
        let mut req = Self {
            ifr_name: name.to_raw(),
            u: IwReqData { name: [0; IFNAMSIZ] },
        };

        match payload {
            Payload::None => {}
            Payload::Name(name) => req.u.name = *name,
            Payload::Param(p) => req.u.param = IwParam::from(*p),
            Payload::Freq(f) => req.u.freq = IwFreq::from(*f),
            Payload::Addr(mac) => req.u.addr = SockAddr::from(*mac),
            Payload::Mode(mode) => req.u.mode = *mode,
            Payload::Quality(q) => req.u.qual = IwQuality::from(*q),
            Payload::Point(point) => {
                let pointer = if point.data.is_empty() {
                    ptr::null_mut()
                } else {
                    point.data.as_mut_ptr()
                };
                // The kernel trusts this length for writes into the buffer.
                let capacity = u16::try_from(point.data.len()).unwrap_or(u16::MAX);
                req.u.data = IwPoint {
                    pointer,
                    length: point.length.min(capacity),
                    flags: point.flags,
                };
            }
        }

        req
    }

    /// Copy what the kernel wrote into the union back into `payload`.
    ///
    /// Point buffers were written in place; only their length and flags are
    /// read from the record.
    pub fn read_back(&self, payload: &mut Payload) {
        // SAFETY: every union member is plain data valid for any bit pattern,
        // and the member read matches the payload kind the record was built from.
        unsafe {
            match payload {
                Payload::None => {}
                Payload::Name(name) => *name = self.u.name,
                Payload::Param(p) => *p = Param::from(self.u.param),
                Payload::Freq(f) => *f = FreqRecord::from(self.u.freq),
                Payload::Addr(mac) => *mac = MacAddr::from(self.u.addr),
                Payload::Mode(mode) => *mode = self.u.mode,
                Payload::Quality(q) => *q = QualityRecord::from(self.u.qual),
                Payload::Point(point) => {
                    point.length = self.u.data.length;
                    point.flags = self.u.data.flags;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::payload::Point;
    use std::mem::size_of;

    fn wlan0() -> InterfaceName {
        "wlan0".parse().unwrap()
    }

    #[test]
    fn test_record_sizes_match_kernel_abi() {
        assert_eq!(size_of::<IwParam>(), 8);
        assert_eq!(size_of::<IwFreq>(), 8);
        assert_eq!(size_of::<IwQuality>(), 4);
        assert_eq!(size_of::<SockAddr>(), 16);
        assert_eq!(size_of::<IwReqData>(), 16);
        assert_eq!(size_of::<IwReq>(), 32);
    }

    #[test]
    fn test_interface_name_is_nul_padded() {
        let req = IwReq::new(&wlan0(), &mut Payload::None);
        assert_eq!(&req.ifr_name[..5], b"wlan0");
        assert!(req.ifr_name[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_param_layout() {
        let mut payload = Payload::Param(Param {
            value: -1,
            fixed: false,
            disabled: true,
            flags: 0x1000,
        });
        let req = IwReq::new(&wlan0(), &mut payload);
        let raw = unsafe { req.u.param };
        assert_eq!(raw.value, -1);
        assert_eq!(raw.fixed, 0);
        assert_eq!(raw.disabled, 1);
        assert_eq!(raw.flags, 0x1000);
    }

    #[test]
    fn test_addr_uses_ether_family() {
        let mac = MacAddr::new([0x61, 0x62, 0x63, 0x64, 0x65, 0x66]);
        let req = IwReq::new(&wlan0(), &mut Payload::Addr(mac));
        let raw = unsafe { req.u.addr };
        assert_eq!(raw.family, ARPHRD_ETHER);
        assert_eq!(&raw.data[..6], mac.as_bytes());
    }

    #[test]
    fn test_point_references_payload_buffer() {
        let mut payload = Payload::Point(Point::output(64, 7));
        let req = IwReq::new(&wlan0(), &mut payload);
        let raw = unsafe { req.u.data };
        let Payload::Point(point) = &payload else {
            unreachable!()
        };
        assert_eq!(raw.pointer as *const u8, point.data.as_ptr());
        assert_eq!(raw.length, 64);
        assert_eq!(raw.flags, 7);
    }

    #[test]
    fn test_point_length_never_exceeds_buffer() {
        let mut payload = Payload::Point(Point {
            data: vec![0; 4],
            length: 4096,
            flags: 0,
        });
        let req = IwReq::new(&wlan0(), &mut payload);
        assert_eq!(unsafe { req.u.data }.length, 4);

        let mut payload = Payload::Point(Point {
            data: Vec::new(),
            length: 512,
            flags: 0,
        });
        let req = IwReq::new(&wlan0(), &mut payload);
        let raw = unsafe { req.u.data };
        assert!(raw.pointer.is_null());
        assert_eq!(raw.length, 0);

        // A shorter input than the buffer is passed through unchanged.
        let mut payload = Payload::Point(Point {
            data: vec![0; 16],
            length: 3,
            flags: 0,
        });
        let req = IwReq::new(&wlan0(), &mut payload);
        assert_eq!(unsafe { req.u.data }.length, 3);
    }

    #[test]
    fn test_empty_point_is_null() {
        let mut payload = Payload::Point(Point::empty(0x4800));
        let req = IwReq::new(&wlan0(), &mut payload);
        let raw = unsafe { req.u.data };
        assert!(raw.pointer.is_null());
        assert_eq!(raw.length, 0);
        assert_eq!(raw.flags, 0x4800);
    }

    #[test]
    fn test_read_back_updates_point_length_and_flags() {
        let mut payload = Payload::Point(Point::output(32, 0));
        let mut req = IwReq::new(&wlan0(), &mut payload);
        req.u.data.length = 5;
        req.u.data.flags = 1;
        req.read_back(&mut payload);
        let point = payload.into_point().unwrap();
        assert_eq!(point.length, 5);
        assert_eq!(point.flags, 1);
    }

    #[test]
    fn test_read_back_freq() {
        let mut payload = Payload::Freq(FreqRecord::default());
        let mut req = IwReq::new(&wlan0(), &mut payload);
        req.u.freq = IwFreq {
            m: 246_200_000,
            e: 1,
            i: 0,
            flags: 1,
        };
        req.read_back(&mut payload);
        assert_eq!(
            payload.into_freq(),
            Some(FreqRecord {
                m: 246_200_000,
                e: 1,
                index: 0,
                flags: 1
            })
        );
    }
}
