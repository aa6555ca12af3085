//! Sliding-window longest-match search.
//!
//! The search is a plain linear scan of every window position, so encoding is
//! `O(window_size * input_len)` in the worst case. Two shortcuts keep common
//! inputs fast without changing which match is chosen:
//!
//! * a candidate whose distance cannot exceed the incumbent length is never
//!   extended (and, because distances shrink as the scan advances, ends it);
//! * the scan stops once the incumbent reaches the longest length still
//!   encodable at this cursor.

use crate::config::{MAX_MATCH_LEN, MIN_USEFUL_LENGTH, TOKEN_LEN};

/// A candidate or committed backreference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backref {
    pub found: bool,
    /// Distance from the cursor back to the start of the match.
    pub displacement: usize,
    /// Number of bytes covered by the match.
    pub length: usize,
}

impl Backref {
    pub const NONE: Self = Self {
        found: false,
        displacement: 0,
        length: 0,
    };

    /// Packs a committed match into its wire form.
    ///
    /// The displacement is split high byte first; the length is stored as
    /// `length - 1` so that 256 fits in a byte.
    #[inline]
    #[must_use]
    pub const fn to_token(&self) -> [u8; TOKEN_LEN] {
        [
            (self.displacement >> 8) as u8,
            self.displacement as u8,
            (self.length - 1) as u8,
        ]
    }

    /// Unpacks a token into `(displacement, length)`.
    #[inline]
    #[must_use]
    pub const fn from_token(token: [u8; TOKEN_LEN]) -> (usize, usize) {
        let displacement = ((token[0] as usize) << 8) | token[1] as usize;
        let length = token[2] as usize + 1;
        (displacement, length)
    }
}

/// Finds the longest earlier occurrence of the bytes starting at `cursor`.
///
/// Every position in `[cursor - window_size, cursor)` is considered, oldest
/// first. A match never reads past its own start (`length <= displacement`),
/// never exceeds [`MAX_MATCH_LEN`] and never runs off the end of `input`.
/// Only a strictly longer candidate replaces the incumbent, so among equal
/// lengths the oldest position wins. Anything not longer than
/// [`MIN_USEFUL_LENGTH`] is reported as not found.
#[must_use]
pub fn find_longest_match(input: &[u8], cursor: usize, window_size: usize) -> Backref {
    if cursor >= input.len() {
        return Backref::NONE;
    }

    let target = &input[cursor..];
    let reachable = target.len().min(MAX_MATCH_LEN);
    if reachable <= MIN_USEFUL_LENGTH {
        return Backref::NONE;
    }

    let mut best = Backref {
        found: false,
        displacement: 0,
        length: MIN_USEFUL_LENGTH,
    };

    for w_idx in cursor.saturating_sub(window_size)..cursor {
        let dist = cursor - w_idx;
        if dist <= best.length {
            break; // No later candidate can be long enough to win
        }

        // Fail fast: the first byte and the byte that would make it longer than `best`.
        if input[w_idx] != target[0] || input[w_idx + best.length] != target[best.length] {
            continue;
        }

        let match_len = common_prefix_len(&input[w_idx..], target, dist.min(reachable));
        if match_len > best.length {
            best = Backref {
                found: true,
                displacement: dist,
                length: match_len,
            };
            if match_len == reachable {
                break;
            }
        }
    }

    if best.found { best } else { Backref::NONE }
}

/// Finds the length of the common prefix between two slices, up to `max`.
#[inline]
fn common_prefix_len(a: &[u8], b: &[u8], max: usize) -> usize {
    let limit = a.len().min(b.len()).min(max);
    let mut len = 0;
    while len < limit && a[len] == b[len] {
        len += 1;
    }
    len
}
