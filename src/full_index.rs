//! Linear cursor over the ordered, variable-length word records of the full index.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::SdictError;

/// One decoded full-index record: `u16` record_length, 2 reserved bytes
/// (read and discarded, kept for forward compatibility), `u32` article pointer,
/// and `record_length - 8` bytes of word. `record_length == 0` is end-of-list.
pub struct RawEntry {
    pub record_length: u16,
    pub word: Vec<u8>,
    pub article_pointer: u32,
}

/// Read one entry at `absolute_offset`. Returns `Ok(None)` at a `record_length`
/// of 0, or when `absolute_offset` has reached or passed `articles_off` -- a
/// defensive bound against a cursor that overran the full index block.
pub fn read_entry(
    file: &mut File,
    absolute_offset: u64,
    articles_off: u64,
) -> Result<Option<RawEntry>, SdictError> {
    if absolute_offset >= articles_off {
        log::warn!(
            "full index cursor reached articles offset at {}, treating as end-of-list",
            absolute_offset
        );
        return Ok(None);
    }

    file.seek(SeekFrom::Start(absolute_offset))?;
    let record_length = file.read_u16::<LittleEndian>()?;
    let mut reserved = [0u8; 2];
    file.read_exact(&mut reserved)?;
    let article_pointer = file.read_u32::<LittleEndian>()?;

    if record_length == 0 {
        return Ok(None);
    }

    let word_len = (record_length as usize)
        .checked_sub(8)
        .ok_or_else(|| SdictError::CorruptionError(format!("record_length {} is shorter than the 8-byte entry head", record_length)))?;
    let mut word = vec![0u8; word_len];
    file.read_exact(&mut word)?;

    Ok(Some(RawEntry { record_length, word, article_pointer }))
}

/// An item emitted while walking the full index from a short-index starting
/// pointer, per `Dictionary::lookup_from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupItem {
    /// The entry's word begins with both the short-index starting prefix and
    /// the full requested prefix.
    Matched { word: String, article_pointer: u32 },
    /// The entry's word begins with the starting prefix but not the full
    /// requested prefix; a candidate split point for later densification.
    Skipped { word: String, offset: u32 },
}
