//! Reads a length-prefixed, compressed blob at an absolute file offset.
//!
//! This is the sole path by which title, copyright, version, the short-index
//! table, and article payloads are materialized from an SDICT file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::compression::Compression;
use crate::error::SdictError;

/// Seek to `offset`, read a `u32` length `n`, read `n` bytes, and decompress them
/// with `compression`.
pub fn read_unit(file: &mut File, compression: Compression, offset: u64) -> Result<Vec<u8>, SdictError> {
    file.seek(SeekFrom::Start(offset))?;
    let len = file.read_u32::<LittleEndian>()?;
    let mut buf = vec![0u8; len as usize];
    file.read_exact(&mut buf)?;
    compression.decompress(&buf)
}
