//! End-to-end coverage over a synthetic SDICT file assembled byte-for-byte,
//! matching the three-word ("car", "cat", "dog") fixture used throughout the
//! design notes: short-index depth 1, identity compression.

use std::io::Write;

use sdict::{Dictionary, LookupItem};
use tempfile::NamedTempFile;

const HEADER_LEN: usize = 43;

struct Fixture {
    full_index_off: u32,
    articles_off: u32,
}

/// Lay out header + title/copyright/version units + a depth-1 short index
/// table + a three-entry full index + three articles, by hand, exactly as an
/// SDICT file stores them on disk.
fn build_sdict_file() -> (NamedTempFile, Fixture) {
    // --- header (filled in once offsets below are known) ---
    let mut buf = vec![0u8; HEADER_LEN];
    buf[0x00..0x04].copy_from_slice(b"sdct");
    buf[0x04..0x07].copy_from_slice(b"eng");
    buf[0x07..0x0A].copy_from_slice(b"xx\0");
    buf[0x0A] = 0x10; // depth 1, codec 0 (identity)
    buf[0x0B..0x0F].copy_from_slice(&3u32.to_le_bytes()); // num_of_words

    let title_off = buf.len() as u32;
    write_unit(&mut buf, b"Test Dict");
    let copyright_off = buf.len() as u32;
    write_unit(&mut buf, b"CC0");
    let version_off = buf.len() as u32;
    write_unit(&mut buf, b"1.0");

    let short_index_off = buf.len() as u32;
    // row: code point (u32 LE) + pointer (u32 LE), one row per first-letter.
    write_short_index_row(&mut buf, 'c', 0); // -> first "c" word ("car") at rel offset 0
    write_short_index_row(&mut buf, 'd', 22); // -> "dog" at rel offset 22
    let short_index_length = 2u32;

    let full_index_off = buf.len() as u32;
    write_full_index_entry(&mut buf, "car", 37);
    write_full_index_entry(&mut buf, "cat", 0);
    write_full_index_entry(&mut buf, "dog", 74);

    let articles_off = buf.len() as u32;
    write_unit_at(&mut buf, articles_off as usize, b"feline animal");
    write_unit_at(&mut buf, articles_off as usize + 37, b"automobile");
    write_unit_at(&mut buf, articles_off as usize + 74, b"canine");

    buf[0x0F..0x13].copy_from_slice(&short_index_length.to_le_bytes());
    buf[0x13..0x17].copy_from_slice(&title_off.to_le_bytes());
    buf[0x17..0x1B].copy_from_slice(&copyright_off.to_le_bytes());
    buf[0x1B..0x1F].copy_from_slice(&version_off.to_le_bytes());
    buf[0x1F..0x23].copy_from_slice(&short_index_off.to_le_bytes());
    buf[0x23..0x27].copy_from_slice(&full_index_off.to_le_bytes());
    buf[0x27..0x2B].copy_from_slice(&articles_off.to_le_bytes());

    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&buf).unwrap();
    tmp.flush().unwrap();

    (
        tmp,
        Fixture {
            full_index_off,
            articles_off,
        },
    )
}

fn write_unit(buf: &mut Vec<u8>, payload: &[u8]) {
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(payload);
}

/// Write a length-prefixed unit at an absolute offset, zero-padding the file
/// up to that offset first. Article pointers in this fixture are spaced 37
/// bytes apart, wider than any one article, so writes never overlap.
fn write_unit_at(buf: &mut Vec<u8>, offset: usize, payload: &[u8]) {
    if buf.len() < offset {
        buf.resize(offset, 0);
    }
    assert_eq!(buf.len(), offset);
    write_unit(buf, payload);
}

fn write_short_index_row(buf: &mut Vec<u8>, head: char, pointer: u32) {
    buf.extend_from_slice(&(head as u32).to_le_bytes());
    buf.extend_from_slice(&pointer.to_le_bytes());
}

fn write_full_index_entry(buf: &mut Vec<u8>, word: &str, article_pointer: u32) {
    let record_length = (8 + word.len()) as u16;
    buf.extend_from_slice(&record_length.to_le_bytes());
    buf.extend_from_slice(&[0, 0]); // reserved
    buf.extend_from_slice(&article_pointer.to_le_bytes());
    buf.extend_from_slice(word.as_bytes());
}

fn open(tmp: &NamedTempFile, cache_dir: &std::path::Path) -> Dictionary {
    Dictionary::open_with_cache_dir(tmp.path(), cache_dir.to_path_buf()).unwrap()
}

#[test]
fn opens_and_reads_header_metadata() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let dict = open(&tmp, cache_dir.path());

    assert_eq!(dict.title(), "Test Dict");
    assert_eq!(dict.copyright(), "CC0");
    assert_eq!(dict.version(), "1.0");
    assert_eq!(dict.word_language(), "eng");
}

#[test]
fn lookup_from_a_two_character_prefix_matches_both_c_words_in_full_index_order() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    let items: Vec<_> = dict.lookup_from("ca").collect::<Result<_, _>>().unwrap();
    assert_eq!(
        items,
        vec![
            LookupItem::Matched { word: "car".into(), article_pointer: 37 },
            LookupItem::Matched { word: "cat".into(), article_pointer: 0 },
        ]
    );
}

#[test]
fn lookup_from_a_full_word_skips_the_sibling_that_shares_its_short_index_bucket() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    let items: Vec<_> = dict.lookup_from("car").collect::<Result<_, _>>().unwrap();
    assert_eq!(
        items,
        vec![
            LookupItem::Matched { word: "car".into(), article_pointer: 37 },
            LookupItem::Skipped { word: "cat".into(), offset: 11 },
        ]
    );
}

#[test]
fn lookup_from_a_word_in_its_own_short_index_bucket_finds_it_directly() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    let items: Vec<_> = dict.lookup_from("dog").collect::<Result<_, _>>().unwrap();
    assert_eq!(
        items,
        vec![LookupItem::Matched { word: "dog".into(), article_pointer: 74 }]
    );
}

#[test]
fn lookup_from_a_prefix_absent_from_the_short_index_yields_nothing() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    let items: Vec<_> = dict.lookup_from("zz").collect::<Result<_, _>>().unwrap();
    assert!(items.is_empty());
}

#[test]
fn read_article_decompresses_the_unit_at_the_articles_offset_plus_pointer() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    assert_eq!(dict.read_article(0).unwrap(), b"feline animal");
    assert_eq!(dict.read_article(37).unwrap(), b"automobile");
    assert_eq!(dict.read_article(74).unwrap(), b"canine");
}

#[test]
fn lookup_then_read_article_resolves_the_article_for_each_match() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    let matches: Vec<(String, u32)> = dict
        .lookup_from("ca")
        .filter_map(|item| match item.unwrap() {
            LookupItem::Matched { word, article_pointer } => Some((word, article_pointer)),
            LookupItem::Skipped { .. } => None,
        })
        .collect();

    let mut articles = Vec::new();
    for (word, pointer) in matches {
        articles.push((word, dict.read_article(pointer).unwrap()));
    }

    assert_eq!(
        articles,
        vec![
            ("car".to_string(), b"automobile".to_vec()),
            ("cat".to_string(), b"feline animal".to_vec()),
        ]
    );
}

#[test]
fn closing_and_persisting_the_cache_writes_a_sidecar_file() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let dict = open(&tmp, cache_dir.path());

    let closed = dict.close(true).unwrap();
    let entries: Vec<_> = std::fs::read_dir(cache_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);

    closed.remove_index_cache_file().unwrap();
    assert!(std::fs::read_dir(cache_dir.path()).unwrap().next().is_none());
}

#[test]
fn reopening_with_a_persisted_cache_produces_the_same_lookups_as_a_fresh_disk_load() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();

    let mut dict = open(&tmp, cache_dir.path());
    let before: Vec<_> = dict.lookup_from("ca").collect::<Result<_, _>>().unwrap();
    dict.close(true).unwrap();

    let mut reopened = open(&tmp, cache_dir.path());
    let after: Vec<_> = reopened.lookup_from("ca").collect::<Result<_, _>>().unwrap();
    assert_eq!(before, after);
}

#[test]
fn a_lookup_that_matches_nothing_negative_caches_the_prefix() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    // "cx" shares the "c" short-index bucket with car/cat but matches neither;
    // both are yielded as Skipped, with zero Matched items triggering negative caching.
    let items: Vec<_> = dict.lookup_from("cx").collect::<Result<_, _>>().unwrap();
    assert!(items.iter().all(|i| matches!(i, LookupItem::Skipped { .. })));
    assert!(!items.is_empty());

    // A second lookup of the same dead prefix must still terminate cleanly,
    // now served from the negative-cache sentinel rather than a fresh scan.
    let items_again: Vec<_> = dict.lookup_from("cx").collect::<Result<_, _>>().unwrap();
    assert!(items_again.is_empty());
}

#[test]
fn indexing_below_the_threshold_is_a_no_op() {
    let (tmp, _) = build_sdict_file();
    let cache_dir = tempfile::tempdir().unwrap();
    let mut dict = open(&tmp, cache_dir.path());

    let items = vec![("car".to_string(), 0u32), ("cat".to_string(), 11), ("dog".to_string(), 22)];
    let progress = dict.index(&items);
    assert!(progress.is_empty());
}

#[test]
fn fixture_offsets_are_internally_consistent() {
    let (_tmp, fixture) = build_sdict_file();
    // three 11-byte entries
    assert_eq!(fixture.articles_off - fixture.full_index_off, 33);
}
