//! Little-endian primitive readers and raw-string extraction.
//!
//! All multi-byte integers in the SDICT format are little-endian and unsigned.
//! Strings embedded in fixed-length header fields are raw bytes with trailing
//! NULs trimmed.

use byteorder::{ByteOrder, LittleEndian};

/// Read a little-endian `u16` out of a byte slice.
pub fn read_u16(bytes: &[u8]) -> u16 {
    LittleEndian::read_u16(bytes)
}

/// Read a little-endian `u32` out of a byte slice.
pub fn read_u32(bytes: &[u8]) -> u32 {
    LittleEndian::read_u32(bytes)
}

/// Trim trailing NUL bytes from a fixed-length header field and decode it as UTF-8,
/// replacing invalid sequences rather than failing -- header language tags are
/// cosmetic metadata, not structural fields.
pub fn trim_nul_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
