//! Container framing.
//!
//! ```text
//! [ u64 LE : token stream length ]
//! [ u64 LE : backreference count ]
//! [ count x u32 LE : offset table ]
//! [ token stream ]
//! ```
//!
//! The count is 8 bytes wide even though each table entry is 4.

use crate::config::{Config, HEADER_LEN, OFFSET_ENTRY_LEN};
use crate::error::{Error, Malformed, Resource, Result};
use alloc::vec::Vec;

/// A parsed container. The token stream borrows from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    pub offsets: Vec<u32>,
    pub tokens: &'a [u8],
}

impl<'a> Container<'a> {
    /// Parses and validates the framing of a container.
    ///
    /// Only framing is checked here; whether the offsets line up with the
    /// tokens is discovered during reconstruction.
    ///
    /// # Errors
    /// * [`Error::MalformedContainer`] if the header or table is cut short, the
    ///   declared token length disagrees with the bytes present, or the table
    ///   is not strictly increasing.
    /// * [`Error::CapacityExceeded`] if the count exceeds `max_backrefs`.
    pub fn parse(input: &'a [u8], config: &Config) -> Result<Self> {
        if input.len() < HEADER_LEN {
            return Err(Error::MalformedContainer(Malformed::TruncatedHeader));
        }

        let token_len = read_u64_le(input, 0);
        let count = read_u64_le(input, 8);

        if count > config.max_backrefs as u64 {
            return Err(Error::CapacityExceeded {
                resource: Resource::Backrefs,
                limit: config.max_backrefs,
            });
        }

        let table_len = usize::try_from(count)
            .ok()
            .and_then(|c| c.checked_mul(OFFSET_ENTRY_LEN))
            .ok_or(Error::MalformedContainer(Malformed::TableOverflow))?;

        let body = &input[HEADER_LEN..];
        if table_len > body.len() {
            return Err(Error::MalformedContainer(Malformed::TruncatedTable));
        }
        let (table, tokens) = body.split_at(table_len);

        if tokens.len() as u64 != token_len {
            return Err(Error::MalformedContainer(Malformed::LengthMismatch {
                declared: token_len,
                actual: tokens.len(),
            }));
        }

        let mut offsets = Vec::with_capacity(table_len / OFFSET_ENTRY_LEN);
        for (index, entry) in table.chunks_exact(OFFSET_ENTRY_LEN).enumerate() {
            let offset = u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]);
            if offsets.last().is_some_and(|&prev| offset <= prev) {
                return Err(Error::MalformedContainer(Malformed::TableNotIncreasing {
                    index,
                }));
            }
            offsets.push(offset);
        }

        Ok(Self { offsets, tokens })
    }

    /// Serializes this container, appending to `output`.
    pub fn write_to(&self, output: &mut Vec<u8>) {
        write_container(&self.offsets, self.tokens, output);
    }
}

/// Total serialized size of a container.
#[inline]
#[must_use]
pub const fn encoded_len(backref_count: usize, token_len: usize) -> usize {
    HEADER_LEN + backref_count * OFFSET_ENTRY_LEN + token_len
}

/// Appends a container built from an offset table and a token stream.
pub fn write_container(offsets: &[u32], tokens: &[u8], output: &mut Vec<u8>) {
    output.reserve(encoded_len(offsets.len(), tokens.len()));
    output.extend_from_slice(&(tokens.len() as u64).to_le_bytes());
    output.extend_from_slice(&(offsets.len() as u64).to_le_bytes());
    for offset in offsets {
        output.extend_from_slice(&offset.to_le_bytes());
    }
    output.extend_from_slice(tokens);
}

#[inline]
fn read_u64_le(input: &[u8], pos: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&input[pos..pos + 8]);
    u64::from_le_bytes(buf)
}
