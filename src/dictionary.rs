//! Composes the header, compression, short index, and full index into one
//! open handle over an SDICT file.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cache::IndexCache;
use crate::compression::Compression;
use crate::error::SdictError;
use crate::full_index::{self, LookupItem};
use crate::header::{Header, HEADER_LEN};
use crate::short_index::{DensifyProgress, Pointer, ShortIndex};
use crate::unit;

/// Number of `Skipped` items a scan must accumulate before densification runs.
pub const INDEXING_THRESHOLD: usize = 1000;

/// An open handle to one SDICT file.
///
/// Single-threaded and cooperative: the underlying file handle and the mutable
/// short index back every method, so a `Dictionary` must not be touched from
/// more than one thread at a time. Concurrent reads across *distinct*
/// dictionaries are independent and safe.
pub struct Dictionary {
    path: PathBuf,
    file: File,
    header: Header,
    compression: Compression,
    title: String,
    version: String,
    copyright: String,
    short_index: ShortIndex,
    cache: IndexCache,
}

impl Dictionary {
    /// Open `path`, using the default cache directory (`~/.sdictviewer/index_cache`).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SdictError> {
        Self::open_with_cache_dir(path, IndexCache::default_dir())
    }

    /// Open `path`, resolving the index cache sidecar under `cache_dir` instead
    /// of the default. Reads the header, resolves the codec, reads title,
    /// version, and copyright, then attempts an `IndexCache` load before
    /// falling back to an on-disk short-index load.
    pub fn open_with_cache_dir<P: AsRef<Path>>(path: P, cache_dir: PathBuf) -> Result<Self, SdictError> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;

        let mut header_bytes = [0u8; HEADER_LEN];
        file.read_exact(&mut header_bytes)?;
        let header = Header::parse(&header_bytes)?;
        let compression = header.compression()?;

        let title = read_unit_as_string(&mut file, compression, header.title_off as u64, "title")?;
        let version = read_unit_as_string(&mut file, compression, header.version_off as u64, "version")?;
        let copyright =
            read_unit_as_string(&mut file, compression, header.copyright_off as u64, "copyright")?;

        let cache = IndexCache::new(cache_dir, &path, &version);
        let short_index = match cache.load(&title, &version) {
            Some(idx) => idx,
            None => {
                log::debug!("loading short index for {:?} from disk", path);
                ShortIndex::load_from_disk(&mut file, &header, compression)?
            }
        };

        Ok(Dictionary {
            path,
            file,
            header,
            compression,
            title,
            version,
            copyright,
            short_index,
            cache,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn word_language(&self) -> &str {
        &self.header.word_lang
    }

    pub fn article_language(&self) -> &str {
        &self.header.article_lang
    }

    pub fn file_name(&self) -> &Path {
        &self.path
    }

    /// Fetch and decompress the article body at `article_pointer`, as returned
    /// by a `Matched` lookup item.
    pub fn read_article(&mut self, article_pointer: u32) -> Result<Vec<u8>, SdictError> {
        let offset = self.header.articles_off as u64 + article_pointer as u64;
        unit::read_unit(&mut self.file, self.compression, offset)
    }

    /// Iterate word entries starting at `prefix`. The deepest short-index level
    /// whose stored prefix of `prefix` is known picks the starting point; the
    /// full index is then walked linearly from there. The sequence is lazy,
    /// finite, and single-pass. If it runs to completion (or is dropped) having
    /// produced zero `Matched` items, and a starting pointer was actually found,
    /// the prefix is negative-cached so repeat misses short-circuit.
    pub fn lookup_from<'a>(&'a mut self, prefix: &str) -> LookupIter<'a> {
        match self.short_index.get_start(prefix) {
            Some((Pointer::Offset(offset), starts_with)) => LookupIter {
                current_pos: self.header.full_index_off as u64 + offset as u64,
                dict: self,
                prefix: prefix.to_string(),
                starts_with,
                matched_count: 0,
                active: true,
                done: false,
            },
            _ => LookupIter {
                dict: self,
                prefix: prefix.to_string(),
                starts_with: String::new(),
                current_pos: 0,
                matched_count: 0,
                active: false,
                done: true,
            },
        }
    }

    /// Feed a batch of observed `(word, full_index_pointer)` items -- typically
    /// the `Skipped` items collected by a caller while scanning -- into the
    /// short-index densification algorithm. Runs only once the batch exceeds
    /// [`INDEXING_THRESHOLD`]; returns the progress log from `ShortIndex::densify`.
    pub fn index(&mut self, items: &[(String, u32)]) -> Vec<DensifyProgress> {
        if items.len() <= INDEXING_THRESHOLD {
            return Vec::new();
        }
        let t0 = std::time::Instant::now();
        let progress =
            self.short_index
                .densify(items, self.header.short_index_depth as usize + 1, INDEXING_THRESHOLD);
        log::info!("indexing {} items took {:?}", items.len(), t0.elapsed());
        progress
    }

    /// Close the dictionary, optionally persisting the short index to the
    /// sidecar cache first. Consumes the handle, so double-close cannot happen.
    pub fn close(self, persist: bool) -> Result<ClosedDictionary, SdictError> {
        if persist {
            self.cache.save(&self.title, &self.version, &self.short_index)?;
        }
        Ok(ClosedDictionary { cache: self.cache })
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.version == other.version && self.path == other.path
    }
}

impl Eq for Dictionary {}

impl std::hash::Hash for Dictionary {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.version.hash(state);
        self.path.hash(state);
    }
}

/// A dictionary handle after `close`. The only operation remaining on it is
/// removing its cache sidecar, which must happen after the file handle it
/// backed has already been released.
pub struct ClosedDictionary {
    cache: IndexCache,
}

impl ClosedDictionary {
    pub fn remove_index_cache_file(&self) -> Result<(), SdictError> {
        self.cache.remove()
    }
}

fn read_unit_as_string(
    file: &mut File,
    compression: Compression,
    offset: u64,
    field: &str,
) -> Result<String, SdictError> {
    let bytes = unit::read_unit(file, compression, offset)?;
    String::from_utf8(bytes)
        .map_err(|e| SdictError::CorruptionError(format!("{} is not valid utf-8: {}", field, e)))
}

/// Lazy, single-pass iterator over the full index starting at a chosen
/// short-index pointer. See [`Dictionary::lookup_from`].
pub struct LookupIter<'a> {
    dict: &'a mut Dictionary,
    prefix: String,
    starts_with: String,
    current_pos: u64,
    matched_count: usize,
    active: bool,
    done: bool,
}

impl<'a> Iterator for LookupIter<'a> {
    type Item = Result<LookupItem, SdictError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let articles_off = self.dict.header.articles_off as u64;
        let full_index_off = self.dict.header.full_index_off as u64;

        let entry = match full_index::read_entry(&mut self.dict.file, self.current_pos, articles_off) {
            Ok(Some(e)) => e,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let word = match String::from_utf8(entry.word) {
            Ok(w) => w,
            Err(e) => {
                self.done = true;
                return Some(Err(SdictError::CorruptionError(format!(
                    "word is not valid utf-8: {}",
                    e
                ))));
            }
        };

        if !word.starts_with(self.starts_with.as_str()) {
            self.done = true;
            return None;
        }

        let relative_offset = (self.current_pos - full_index_off) as u32;
        self.current_pos += entry.record_length as u64;

        if word.starts_with(self.prefix.as_str()) {
            self.matched_count += 1;
            Some(Ok(LookupItem::Matched {
                word,
                article_pointer: entry.article_pointer,
            }))
        } else {
            Some(Ok(LookupItem::Skipped {
                word,
                offset: relative_offset,
            }))
        }
    }
}

impl<'a> Drop for LookupIter<'a> {
    fn drop(&mut self) {
        if self.active && self.matched_count == 0 {
            self.dict.short_index.negative_cache(&self.prefix);
        }
    }
}
