//! Level-addressed prefix -> file-pointer tables, densified on demand.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::compression::Compression;
use crate::error::SdictError;
use crate::header::Header;

/// A short-index entry: either a real pointer into the full index, or the
/// sentinel that records a previously-failed prefix lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pointer {
    Offset(u32),
    NegativeCache,
}

/// A snapshot of one `densify` progress step, suitable for displaying an
/// indexing progress bar.
#[derive(Debug, Clone, Copy)]
pub struct DensifyProgress {
    pub length: usize,
    pub index: usize,
    pub total: usize,
}

/// An ordered sequence of per-level mappings `level[0..L]`, where `level[k]`
/// only ever stores prefixes of exactly length `k`. Level 0 is an unused,
/// empty-prefix entry. Densification grows `L` upward; it never shrinks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortIndex {
    levels: Vec<HashMap<String, Pointer>>,
}

impl ShortIndex {
    /// Grow the level array, if needed, so that `level[depth]` exists.
    pub fn ensure_depth(&mut self, depth: usize) {
        while self.levels.len() <= depth {
            self.levels.push(HashMap::new());
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Load the on-disk short-index table: `short_index_length` rows of
    /// `(depth + 1) * 4` bytes each, where `depth = header.short_index_depth`.
    /// The table is read and decompressed once, then each row is decoded into
    /// `depth` code points (0-terminated) followed by a trailing pointer.
    ///
    /// A row whose code point cannot be represented as a Unicode scalar value
    /// is skipped with a warning; the rest of the table remains usable.
    pub fn load_from_disk(
        file: &mut File,
        header: &Header,
        compression: Compression,
    ) -> Result<Self, SdictError> {
        file.seek(SeekFrom::Start(header.short_index_off as u64))?;

        let depth = header.short_index_depth as usize;
        let row_len = (depth + 1) * 4;
        let table_len = row_len
            .checked_mul(header.short_index_length as usize)
            .ok_or_else(|| SdictError::FormatError("short index table length overflows".into()))?;

        let mut raw = vec![0u8; table_len];
        file.read_exact(&mut raw)?;
        let raw = compression.decompress(&raw)?;

        let mut index = ShortIndex {
            levels: (0..depth + 2).map(|_| HashMap::new()).collect(),
        };

        for row in 0..header.short_index_length as usize {
            let start = row * row_len;
            let row_bytes = match raw.get(start..start + row_len) {
                Some(b) => b,
                None => {
                    log::warn!("short index row {} is truncated, ignoring rest of table", row);
                    break;
                }
            };

            let mut code_points = Vec::with_capacity(depth);
            let mut decode_failed = false;
            for slot in 0..depth {
                let cp = codec::read_u32(&row_bytes[slot * 4..slot * 4 + 4]);
                if cp == 0 {
                    break;
                }
                match char::from_u32(cp) {
                    Some(c) => code_points.push(c),
                    None => {
                        decode_failed = true;
                        break;
                    }
                }
            }
            if decode_failed {
                log::warn!(
                    "failed to decode short index item {}, will ignore: code point is not a valid Unicode scalar value",
                    row
                );
                continue;
            }

            let word: String = code_points.into_iter().collect();
            let pointer_start = depth * 4;
            let pointer = codec::read_u32(&row_bytes[pointer_start..pointer_start + 4]);
            let word_len = word.chars().count();
            index.ensure_depth(word_len);
            index.levels[word_len].insert(word, Pointer::Offset(pointer));
        }

        Ok(index)
    }

    /// Find the deepest-matching prefix of `prefix` stored in the index, per
    /// the "pick a starting pointer" step of `lookup_from`: for `i` from 1 up
    /// to the deepest level, if `prefix`'s first `i` characters are a key at
    /// `level[i]`, remember it. The deepest hit -- positive or negative -- wins.
    pub fn get_start(&self, prefix: &str) -> Option<(Pointer, String)> {
        let mut found = None;
        for i in 1..self.levels.len() {
            let sub: String = prefix.chars().take(i).collect();
            if let Some(p) = self.levels[i].get(&sub) {
                found = Some((*p, sub));
            }
        }
        found
    }

    /// Record that `prefix` was searched and no such word exists.
    pub fn negative_cache(&mut self, prefix: &str) {
        let len = prefix.chars().count();
        self.ensure_depth(len);
        self.levels[len].insert(prefix.to_string(), Pointer::NegativeCache);
    }

    /// Densify the index: convert a batch of observed `(word, full_index_pointer)`
    /// items into deeper short-index levels, starting at `start_length`, so that
    /// future lookups jump further ahead. Returns a log of progress steps, since
    /// Rust has no generators to yield them lazily.
    ///
    /// For every new key at `level[d]`, the stored pointer references the first
    /// item in its slice of `items` whose word starts with that key.
    pub fn densify(
        &mut self,
        items: &[(String, u32)],
        start_length: usize,
        max_distance: usize,
    ) -> Vec<DensifyProgress> {
        let mut progress = Vec::new();
        self.densify_level(items, start_length, max_distance, &mut progress);
        progress
    }

    fn densify_level(
        &mut self,
        items: &[(String, u32)],
        length: usize,
        max_distance: usize,
        progress: &mut Vec<DensifyProgress>,
    ) {
        self.ensure_depth(length);
        let total = items.len();
        let mut prev_head: Option<String> = None;
        let mut last_split = 0usize;

        for (i, (word, pos)) in items.iter().enumerate() {
            let head: String = word.chars().take(length).collect();
            progress.push(DensifyProgress { length, index: i, total });

            if prev_head.as_deref() != Some(head.as_str()) {
                self.levels[length].insert(head.clone(), Pointer::Offset(*pos));
                if i - last_split > max_distance {
                    self.densify_level(&items[last_split..i], length + 1, max_distance, progress);
                }
                last_split = i;
            }
            prev_head = Some(head);
        }

        if total > 0 && total - 1 - last_split > max_distance {
            self.densify_level(&items[last_split..], length + 1, max_distance, progress);
        }
    }
}
