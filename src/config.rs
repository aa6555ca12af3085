use crate::error::{Error, Result};

// --- Constants ---

/// Largest displacement the split `disp_hi`/`disp_lo` token field can carry.
///
/// This is also the largest permitted window: a window of 65536 would allow a
/// displacement that does not fit in 16 bits.
pub const MAX_WINDOW_SIZE: usize = 0xFFFF;

/// A candidate must be strictly longer than this to be committed.
pub const MIN_USEFUL_LENGTH: usize = 7;

/// Shortest length a committed backreference may have.
pub const MIN_MATCH_LEN: usize = MIN_USEFUL_LENGTH + 1;

/// Longest encodable match. Stored on the wire as `length - 1`.
pub const MAX_MATCH_LEN: usize = 256;

/// Size of a backreference token: `disp_hi`, `disp_lo`, `length - 1`.
pub const TOKEN_LEN: usize = 3;

/// Size of the fixed container header (two `u64` fields).
pub const HEADER_LEN: usize = 16;

/// Size of one offset table entry.
pub const OFFSET_ENTRY_LEN: usize = 4;

/// Default ceiling on the uncompressed size (16 MiB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1 << 24;

/// Default ceiling on the number of backreferences in one container.
pub const DEFAULT_MAX_BACKREFS: usize = 1 << 24;

/// Offset table entries are `u32`, so no stream may be longer than this.
const ADDRESSABLE_SIZE: u64 = 1 << 32;

/// Limits shared by the encoder and the decoder.
///
/// Both sides must agree on `window_size` for the decoder's window check to
/// accept everything the encoder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of already-processed bytes eligible as match sources.
    pub window_size: usize,
    /// Largest uncompressed stream accepted by `compress` or produced by `decompress`.
    pub max_input_size: usize,
    /// Largest number of backreferences a single container may hold.
    pub max_backrefs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window_size: MAX_WINDOW_SIZE,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_backrefs: DEFAULT_MAX_BACKREFS,
        }
    }

    #[must_use]
    pub const fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    #[must_use]
    pub const fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    #[must_use]
    pub const fn with_max_backrefs(mut self, max_backrefs: usize) -> Self {
        self.max_backrefs = max_backrefs;
        self
    }

    /// Checks that the limits are representable in the container format.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if the window is empty or wider than
    /// [`MAX_WINDOW_SIZE`], if `max_input_size` exceeds what a `u32` offset can
    /// address, or if `max_backrefs` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::InvalidConfig("window size must be at least 1"));
        }
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(Error::InvalidConfig(
                "window size must not exceed 65535 (16-bit displacement)",
            ));
        }
        if self.max_input_size as u64 > ADDRESSABLE_SIZE {
            return Err(Error::InvalidConfig(
                "max input size must not exceed 2^32 (32-bit offset table)",
            ));
        }
        if self.max_backrefs == 0 {
            return Err(Error::InvalidConfig("max backrefs must be at least 1"));
        }
        Ok(())
    }
}
