//! The fixed-offset 43-byte descriptor at the start of every SDICT file.

use rassert_rs::rassert;

use crate::codec;
use crate::compression::Compression;
use crate::error::SdictError;

/// Size in bytes of the header block.
pub const HEADER_LEN: usize = 43;

/// Immutable metadata parsed from the first 43 bytes of an SDICT file.
#[derive(Debug, Clone)]
pub struct Header {
    pub word_lang: String,
    pub article_lang: String,
    pub codec_id: u8,
    pub short_index_depth: u8,
    pub num_of_words: u32,
    pub short_index_length: u32,
    pub title_off: u32,
    pub copyright_off: u32,
    pub version_off: u32,
    pub short_index_off: u32,
    pub full_index_off: u32,
    pub articles_off: u32,
}

impl Header {
    /// Parse a header from the first [`HEADER_LEN`] bytes of the file.
    ///
    /// Signature must equal `sdct`. All other fields are accepted as declared;
    /// semantic range checks (monotone offsets, codec id) are applied here too,
    /// before any unit is ever read.
    pub fn parse(bytes: &[u8]) -> Result<Self, SdictError> {
        rassert!(
            bytes.len() >= HEADER_LEN,
            SdictError::FormatError(format!(
                "header is truncated: expected {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            ))
        );
        rassert!(
            &bytes[0x00..0x04] == b"sdct",
            SdictError::FormatError("not a valid sdict dictionary".into())
        );

        let word_lang = codec::trim_nul_string(&bytes[0x04..0x07]);
        let article_lang = codec::trim_nul_string(&bytes[0x07..0x0A]);

        let comp_and_depth = bytes[0x0A];
        let codec_id = comp_and_depth & 0x0F;
        let short_index_depth = comp_and_depth >> 4;

        let num_of_words = codec::read_u32(&bytes[0x0B..0x0F]);
        let short_index_length = codec::read_u32(&bytes[0x0F..0x13]);
        let title_off = codec::read_u32(&bytes[0x13..0x17]);
        let copyright_off = codec::read_u32(&bytes[0x17..0x1B]);
        let version_off = codec::read_u32(&bytes[0x1B..0x1F]);
        let short_index_off = codec::read_u32(&bytes[0x1F..0x23]);
        let full_index_off = codec::read_u32(&bytes[0x23..0x27]);
        let articles_off = codec::read_u32(&bytes[0x27..0x2B]);

        // Range checks, applied before any unit read is attempted.
        Compression::from_id(codec_id)?;
        rassert!(
            short_index_off < full_index_off && full_index_off < articles_off,
            SdictError::FormatError(format!(
                "header offsets are not monotone: short_index_off={}, full_index_off={}, articles_off={}",
                short_index_off, full_index_off, articles_off
            ))
        );

        Ok(Header {
            word_lang,
            article_lang,
            codec_id,
            short_index_depth,
            num_of_words,
            short_index_length,
            title_off,
            copyright_off,
            version_off,
            short_index_off,
            full_index_off,
            articles_off,
        })
    }

    pub fn compression(&self) -> Result<Compression, SdictError> {
        Compression::from_id(self.codec_id)
    }
}
