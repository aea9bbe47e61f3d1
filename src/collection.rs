//! The thin edge of the core that the multi-dictionary collection façade talks
//! to: grouping dictionaries by word language and fanning out `lookup_from`
//! across a group, capping matches per dictionary. Everything past this --
//! the UI shell, auxiliary conversion pipelines -- is an external collaborator.

use std::collections::HashMap;

use crate::dictionary::Dictionary;
use crate::error::SdictError;
use crate::full_index::LookupItem;

/// Default cap on `Matched` items returned from a single dictionary during a
/// fanned-out lookup.
pub const DEFAULT_MAX_PER_DICT: usize = 20;

/// Dictionaries grouped by `word_language`.
#[derive(Default)]
pub struct DictionaryCollection {
    by_language: HashMap<String, Vec<Dictionary>>,
}

impl DictionaryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dict: Dictionary) {
        self.by_language
            .entry(dict.word_language().to_string())
            .or_default()
            .push(dict);
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.by_language.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }

    /// Fan out `lookup_from(prefix)` across every dictionary in `lang`'s group,
    /// stopping each dictionary's contribution once it has produced
    /// `max_from_one_dict` matches.
    pub fn lookup_from(
        &mut self,
        lang: &str,
        prefix: &str,
        max_from_one_dict: usize,
    ) -> Result<Vec<LookupItem>, SdictError> {
        let mut results = Vec::new();
        let Some(dicts) = self.by_language.get_mut(lang) else {
            return Ok(results);
        };

        for dict in dicts.iter_mut() {
            let mut matched = 0;
            for item in dict.lookup_from(prefix) {
                let item = item?;
                let is_matched = matches!(item, LookupItem::Matched { .. });
                results.push(item);
                if is_matched {
                    matched += 1;
                    if matched >= max_from_one_dict {
                        break;
                    }
                }
            }
        }

        Ok(results)
    }
}
