// src/tags.rs
//! Tag-pair decoding for the metadata tables.
//!
//! Tags are pulled one at a time by (category, index); the wire level
//! has no name lookup and enumeration stays lazy, so nothing here
//! builds a map.

use crate::error::{Adv2Error, Result};
use crate::utils::nul_trimmed;

/// Upper bound on a tag name or value on the wire.
pub const MAX_TAG_BYTES: usize = 256;

/// A single name/value metadata entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub name: String,
    pub value: String,
}

impl TagPair {
    /// Decode a tag pair from the two NUL-terminated wire buffers the
    /// native call filled.
    pub fn decode(name_buf: &[u8], value_buf: &[u8]) -> Result<Self> {
        Ok(TagPair {
            name: decode_tag_string(name_buf)?,
            value: decode_tag_string(value_buf)?,
        })
    }
}

fn decode_tag_string(buf: &[u8]) -> Result<String> {
    let trimmed = nul_trimmed(buf);
    String::from_utf8(trimmed.to_vec()).map_err(|_| Adv2Error::InvalidUtf8)
}
