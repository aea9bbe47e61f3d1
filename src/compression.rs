//! Codec dispatch over the three compression variants an SDICT file can declare.

use std::io::{Cursor, Read};

use bzip2::read::BzDecoder;
use flate2::read::ZlibDecoder;

use crate::error::SdictError;

/// The compression codec a dictionary declares in the low nibble of its header's
/// `comp_and_depth` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Identity,
    Zlib,
    Bzip2,
}

impl Compression {
    /// Resolve a codec id to a `Compression`. Unknown ids are a `FormatError`.
    pub fn from_id(id: u8) -> Result<Self, SdictError> {
        match id {
            0 => Ok(Compression::Identity),
            1 => Ok(Compression::Zlib),
            2 => Ok(Compression::Bzip2),
            other => Err(SdictError::FormatError(format!(
                "unknown compression codec id {}",
                other
            ))),
        }
    }

    /// Decompress a unit's payload. A failure here is a `CorruptionError`; it is
    /// fatal for the unit being read, not for the dictionary handle.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, SdictError> {
        match self {
            Compression::Identity => Ok(data.to_vec()),
            Compression::Zlib => {
                let mut out = Vec::new();
                ZlibDecoder::new(Cursor::new(data))
                    .read_to_end(&mut out)
                    .map_err(|e| SdictError::CorruptionError(format!("zlib inflate failed: {}", e)))?;
                Ok(out)
            }
            Compression::Bzip2 => {
                let mut out = Vec::new();
                BzDecoder::new(Cursor::new(data))
                    .read_to_end(&mut out)
                    .map_err(|e| {
                        SdictError::CorruptionError(format!("bzip2 decompress failed: {}", e))
                    })?;
                Ok(out)
            }
        }
    }
}
