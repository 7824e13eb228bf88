//! Binary codec for the Wireless Extensions kernel ABI.
//!
//! # Layers
//!
//! - [`Op`] names every request and event code and the payload it carries
//! - [`Payload`] is the typed content of the 16-byte `iwreq` union slot
//! - [`record`] holds the `#[repr(C)]` mirrors handed to `ioctl`
//! - [`range`] decodes the `iw_range` capability block
//! - [`stream`] decodes the packed event stream returned by a scan
//! - [`scan_req`] encodes the optional `iw_scan_req` scan filter
//!
//! Everything here is pure: no I/O, no global state.

pub mod consts;
mod op;
mod payload;
pub mod range;
pub mod record;
pub mod scan_req;
pub mod stream;

pub use op::Op;
pub use payload::{FreqRecord, Param, Payload, PayloadKind, Point, QualityRecord};
pub use range::RangeInfo;
pub use stream::Event;

/// Text from a kernel buffer: up to the first NUL, lossily decoded.
pub(crate) fn c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Native-endian reads at fixed offsets, `None` past the end.
#[derive(Clone, Copy)]
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn bytes<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        let end = offset.checked_add(N)?;
        let slice = self.buf.get(offset..end)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Some(out)
    }

    pub(crate) fn u8(&self, offset: usize) -> Option<u8> {
        self.buf.get(offset).copied()
    }

    pub(crate) fn u16(&self, offset: usize) -> Option<u16> {
        self.bytes(offset).map(u16::from_ne_bytes)
    }

    pub(crate) fn i16(&self, offset: usize) -> Option<i16> {
        self.bytes(offset).map(i16::from_ne_bytes)
    }

    pub(crate) fn u32(&self, offset: usize) -> Option<u32> {
        self.bytes(offset).map(u32::from_ne_bytes)
    }

    pub(crate) fn i32(&self, offset: usize) -> Option<i32> {
        self.bytes(offset).map(i32::from_ne_bytes)
    }

    pub(crate) fn param(&self, offset: usize) -> Option<Param> {
        Some(Param {
            value: self.i32(offset)?,
            fixed: self.u8(offset + 4)? != 0,
            disabled: self.u8(offset + 5)? != 0,
            flags: self.u16(offset + 6)?,
        })
    }

    pub(crate) fn freq(&self, offset: usize) -> Option<FreqRecord> {
        Some(FreqRecord {
            m: self.i32(offset)?,
            e: self.i16(offset + 4)?,
            index: self.u8(offset + 6)?,
            flags: self.u8(offset + 7)?,
        })
    }

    pub(crate) fn quality(&self, offset: usize) -> Option<QualityRecord> {
        Some(QualityRecord {
            qual: self.u8(offset)?,
            level: self.u8(offset + 1)?,
            noise: self.u8(offset + 2)?,
            updated: self.u8(offset + 3)?,
        })
    }
}

/// Native-endian writer mirroring [`Reader`], for building kernel buffers.
pub(crate) struct Writer {
    buf: Vec<u8>,
}

#[cfg_attr(not(any(test, feature = "testing")), allow(dead_code))]
impl Writer {
    pub(crate) fn new(len: usize) -> Self {
        Self { buf: vec![0; len] }
    }

    pub(crate) fn put(&mut self, offset: usize, bytes: &[u8]) {
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub(crate) fn u8(&mut self, offset: usize, value: u8) {
        self.buf[offset] = value;
    }

    pub(crate) fn u16(&mut self, offset: usize, value: u16) {
        self.put(offset, &value.to_ne_bytes());
    }

    pub(crate) fn u32(&mut self, offset: usize, value: u32) {
        self.put(offset, &value.to_ne_bytes());
    }

    pub(crate) fn i32(&mut self, offset: usize, value: i32) {
        self.put(offset, &value.to_ne_bytes());
    }

    pub(crate) fn param(&mut self, offset: usize, param: Param) {
        self.i32(offset, param.value);
        self.u8(offset + 4, param.fixed as u8);
        self.u8(offset + 5, param.disabled as u8);
        self.u16(offset + 6, param.flags);
    }

    pub(crate) fn freq(&mut self, offset: usize, freq: FreqRecord) {
        self.i32(offset, freq.m);
        self.put(offset + 4, &freq.e.to_ne_bytes());
        self.u8(offset + 6, freq.index);
        self.u8(offset + 7, freq.flags);
    }

    pub(crate) fn quality(&mut self, offset: usize, quality: QualityRecord) {
        self.put(
            offset,
            &[quality.qual, quality.level, quality.noise, quality.updated],
        );
    }

    pub(crate) fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_string() {
        assert_eq!(c_string(b"IEEE 802.11bgn\0\0"), "IEEE 802.11bgn");
        assert_eq!(c_string(b"no nul"), "no nul");
        assert_eq!(c_string(b"\0junk"), "");
        assert_eq!(c_string(&[0x66, 0xFF, 0x6F]), "f\u{FFFD}o");
    }

    #[test]
    fn test_reader_bounds() {
        let reader = Reader::new(&[1, 2, 3]);
        assert_eq!(reader.u8(2), Some(3));
        assert_eq!(reader.u8(3), None);
        assert_eq!(reader.u16(1), Some(u16::from_ne_bytes([2, 3])));
        assert_eq!(reader.u16(2), None);
        assert_eq!(reader.u32(0), None);
        assert_eq!(reader.u32(usize::MAX), None);
    }

    #[test]
    fn test_writer_reader_agree() {
        let param = Param {
            value: -7,
            fixed: true,
            disabled: false,
            flags: 0x1234,
        };
        let freq = FreqRecord {
            m: 246_200_000,
            e: 1,
            index: 11,
            flags: 1,
        };
        let mut writer = Writer::new(16);
        writer.param(0, param);
        writer.freq(8, freq);
        let buf = writer.into_inner();

        let reader = Reader::new(&buf);
        assert_eq!(reader.param(0), Some(param));
        assert_eq!(reader.freq(8), Some(freq));
    }
}
