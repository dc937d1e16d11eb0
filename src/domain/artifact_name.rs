//! Object naming for stored snapshots and artifacts.
//!
//! Names are `<prefix>/<stem>-<YYYYMMDD-HHMMSS-ffffff>-<digest8>.<ext>`. The
//! digest is taken over the object body, so two runs landing on the same
//! microsecond only collide when they also write identical content.
//! Quarantine names also carry the failure kind ahead of the digest.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

pub const RAW_STEM: &str = "weather";
pub const PROCESSED_STEM: &str = "processed";
pub const QUARANTINE_STEM: &str = "invalid-json";

/// UTC timestamp tag with microsecond resolution.
pub fn timestamp_tag(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H%M%S-%6f").to_string()
}

/// First eight hex digits of the SHA-256 of `content`.
pub fn disambiguator(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let digest = hasher.finalize();
    digest[..4].iter().map(|byte| format!("{:02x}", byte)).collect()
}

fn object_name(prefix: &str, stem: &str, at: DateTime<Utc>, content: &[u8], ext: &str) -> String {
    format!(
        "{}/{}-{}-{}.{}",
        prefix.trim_end_matches('/'),
        stem,
        timestamp_tag(at),
        disambiguator(content),
        ext
    )
}

pub fn raw_object(prefix: &str, at: DateTime<Utc>, content: &[u8]) -> String {
    object_name(prefix, RAW_STEM, at, content, "json")
}

pub fn processed_object(prefix: &str, at: DateTime<Utc>, content: &[u8]) -> String {
    object_name(prefix, PROCESSED_STEM, at, content, "json")
}

/// `<prefix>/invalid-json-<ts>-<kind>-<digest8>.txt`.
pub fn quarantine_object(prefix: &str, at: DateTime<Utc>, kind: &str, content: &[u8]) -> String {
    format!(
        "{}/{}-{}-{}-{}.txt",
        prefix.trim_end_matches('/'),
        QUARANTINE_STEM,
        timestamp_tag(at),
        kind,
        disambiguator(content)
    )
}

/// Whether `object` names a processed artifact directly under `prefix`, with
/// the full `processed-<ts>-<digest8>.json` shape.
pub fn is_processed_object(prefix: &str, object: &str) -> bool {
    file_under(prefix, object)
        .and_then(|file| file.strip_prefix(PROCESSED_STEM)?.strip_prefix('-'))
        .and_then(|rest| rest.strip_suffix(".json"))
        .is_some_and(is_stamped)
}

fn is_stamped(tag: &str) -> bool {
    let parts: Vec<&str> = tag.split('-').collect();
    match parts.as_slice() {
        &[date, time, micros, digest] => {
            digits(date, 8)
                && digits(time, 6)
                && digits(micros, 6)
                && digest.len() == 8
                && digest.bytes().all(|b| b.is_ascii_hexdigit())
        }
        _ => false,
    }
}

fn digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `object` lives under `prefix` and names a file.
pub fn is_under_prefix(prefix: &str, object: &str) -> bool {
    file_under(prefix, object).is_some()
}

fn file_under<'a>(prefix: &str, object: &'a str) -> Option<&'a str> {
    let rest = object.strip_prefix(prefix.trim_end_matches('/'))?.strip_prefix('/')?;
    (!rest.is_empty()).then_some(rest)
}
