//! Append-only byte buffer with the binary format's primitive encodings.
//!
//! LEB128 and string encodings go through [`wasm_encoder::Encode`], which
//! writes minimal-length unsigned/signed LEB128 and length-prefixed strings.

use wasm_encoder::Encode;
use wasmrender_types::ValueType;

use crate::error::{to_u32, RenderError, RenderResult};

/// Growable output buffer. Bytes can only be appended.
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed-width 32-bit little-endian integer.
    pub fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Unsigned LEB128.
    pub fn write_leb(&mut self, value: u32) {
        value.encode(&mut self.data);
    }

    /// Unsigned LEB128 of a host-sized count or length.
    ///
    /// Fails when the value does not fit the format's 32-bit domain.
    pub fn write_len(&mut self, value: usize) -> RenderResult<()> {
        self.write_leb(to_u32("length", value)?);
        Ok(())
    }

    /// Signed LEB128, used by 32-bit constant immediates.
    pub fn write_sleb32(&mut self, value: i32) {
        value.encode(&mut self.data);
    }

    /// Signed LEB128, used by 64-bit constant immediates.
    pub fn write_sleb64(&mut self, value: i64) {
        value.encode(&mut self.data);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.data.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.data.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// LEB128 byte count followed by the raw bytes. No escaping is applied,
    /// so anything outside ASCII is rejected.
    pub fn write_ascii_string(&mut self, value: &str) -> RenderResult<()> {
        if !value.is_ascii() {
            return Err(RenderError::NonAsciiString(value.to_string()));
        }
        to_u32("string length", value.len())?;
        value.encode(&mut self.data);
        Ok(())
    }

    pub fn write_type(&mut self, ty: ValueType) {
        self.data.push(ty.tag());
    }

    /// Everything written so far.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leb(value: u32) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_leb(value);
        w.into_inner()
    }

    #[test]
    fn test_leb_minimal_encoding() {
        assert_eq!(leb(0), vec![0x00]);
        assert_eq!(leb(127), vec![0x7f]);
        assert_eq!(leb(128), vec![0x80, 0x01]);
        assert_eq!(leb(624_485), vec![0xe5, 0x8e, 0x26]);
        assert_eq!(leb(u32::MAX), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn test_signed_leb() {
        let mut w = BinaryWriter::new();
        w.write_sleb32(-1);
        w.write_sleb32(64);
        w.write_sleb64(-129);
        assert_eq!(w.data(), &[0x7f, 0xc0, 0x00, 0xff, 0x7e]);
    }

    #[test]
    fn test_fixed_u32_is_little_endian() {
        let mut w = BinaryWriter::new();
        w.write_u32(0x6d73_6100);
        assert_eq!(w.data(), b"\0asm");
    }

    #[test]
    fn test_ascii_string() {
        let mut w = BinaryWriter::new();
        w.write_ascii_string("env").unwrap();
        w.write_ascii_string("").unwrap();
        assert_eq!(w.data(), &[3, b'e', b'n', b'v', 0]);
    }

    #[test]
    fn test_non_ascii_string_rejected() {
        let mut w = BinaryWriter::new();
        let err = w.write_ascii_string("caf\u{e9}").unwrap_err();
        assert!(matches!(err, RenderError::NonAsciiString(_)));
        assert!(w.is_empty());
    }

    #[test]
    fn test_type_tags() {
        let mut w = BinaryWriter::new();
        w.write_type(ValueType::I32);
        w.write_type(ValueType::I64);
        w.write_type(ValueType::F32);
        w.write_type(ValueType::F64);
        assert_eq!(w.data(), &[1, 2, 3, 4]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_len_out_of_range() {
        let mut w = BinaryWriter::new();
        let err = w.write_len(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, RenderError::ValueOutOfRange { .. }));
    }
}
