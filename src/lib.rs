//! A reader and indexer for the SDICT binary dictionary format.
//!
//! SDICT dictionaries are made up of a fixed-size header, a hierarchical
//! "short index" used to accelerate prefix lookups, a "full index" of ordered
//! word entries, and a pool of compressed article payloads. This crate opens
//! an SDICT file, walks word entries from an arbitrary prefix, fetches and
//! decompresses article bodies, and progressively densifies the short index
//! as it observes lookups, persisting it to a sidecar cache.
//!
//! # Examples
//!
//! ```no_run
//! use sdict::Dictionary;
//!
//! fn main() -> Result<(), sdict::SdictError> {
//!     let mut dict = Dictionary::open("/usr/share/sdict/eng-deu.dict")?;
//!     let matches: Vec<_> = dict
//!         .lookup_from("ferrugo")
//!         .filter_map(|item| match item {
//!             Ok(sdict::LookupItem::Matched { word, article_pointer }) => Some((word, article_pointer)),
//!             _ => None,
//!         })
//!         .collect();
//!     for (word, article_pointer) in matches {
//!         println!("{}: {:?}", word, dict.read_article(article_pointer)?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod codec;
pub mod collection;
pub mod compression;
pub mod dictionary;
pub mod error;
pub mod full_index;
pub mod header;
pub mod short_index;
pub mod unit;

pub use cache::IndexCache;
pub use collection::DictionaryCollection;
pub use compression::Compression;
pub use dictionary::{ClosedDictionary, Dictionary, INDEXING_THRESHOLD};
pub use error::SdictError;
pub use full_index::LookupItem;
pub use header::Header;
pub use short_index::{DensifyProgress, Pointer, ShortIndex};
