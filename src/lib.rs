//! # Minimal LZ77 Compression
//!
//! `lzmin` replaces repeated byte runs with fixed 3-byte backreference tokens
//! and rebuilds the original stream from them. Tokens carry no tag of their
//! own: the container stores an offset table listing the uncompressed position
//! of every token, and the decoder uses it to tell tokens from literals.
//!
//! ## Example
//!
//! ```rust
//! extern crate alloc;
//! use alloc::vec::Vec;
//! use lzmin::{compress, decompress};
//!
//! let original = b"to be or not to be, to be or not to be";
//!
//! let mut compressed = Vec::new();
//! compress(original, &mut compressed).expect("Compression failed");
//!
//! let mut buffer = Vec::new();
//! decompress(&compressed, &mut buffer).expect("Decompression failed");
//! assert_eq!(buffer, original);
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod compress;
pub mod config;
pub mod container;
pub mod decompress;
pub mod error;
pub mod matcher;
pub mod stage;

pub use compress::{Encoded, compress, compress_with, encode};
pub use config::Config;
pub use container::Container;
pub use decompress::{decompress, decompress_with, reconstruct};
pub use error::{Corruption, Error, Malformed, Resource, Result};
pub use matcher::{Backref, find_longest_match};
pub use stage::{Codec, EntropyStage, Passthrough, Recoded};

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::config::{HEADER_LEN, MAX_MATCH_LEN, MAX_WINDOW_SIZE};

    #[test]
    fn test_round_trip() {
        let original = b"Hello world repeated Hello world repeated Hello world repeated";
        let mut compressed = Vec::new();
        let mut decompressed = Vec::new();

        compress(original, &mut compressed).unwrap();
        decompress(&compressed, &mut decompressed).unwrap();

        assert_eq!(original.to_vec(), decompressed);
    }

    #[test]
    fn test_compress_run() {
        let original = vec![b'A'; 1000];
        let mut compressed = Vec::new();
        compress(&original, &mut compressed).unwrap();

        assert!(compressed.len() < original.len() / 4);

        let mut decompressed = Vec::new();
        decompress(&compressed, &mut decompressed).unwrap();
        assert_eq!(original, decompressed);
    }

    #[test]
    fn test_incompressible() {
        // No repeat of 8 bytes or more: everything stays literal.
        let original: Vec<u8> = (0..200).map(|i| (i * 7) as u8).collect();
        let mut compressed = Vec::new();
        compress(&original, &mut compressed).unwrap();

        assert_eq!(compressed.len(), HEADER_LEN + 200);
        assert_eq!(&compressed[..8], &200u64.to_le_bytes());
        assert_eq!(&compressed[8..16], &0u64.to_le_bytes());
        assert_eq!(&compressed[HEADER_LEN..], &original[..]);
    }

    #[test]
    fn test_token_layout() {
        let r = Backref {
            found: true,
            displacement: 0x1234,
            length: MAX_MATCH_LEN,
        };
        assert_eq!(r.to_token(), [0x12, 0x34, 0xFF]);
        assert_eq!(Backref::from_token([0x12, 0x34, 0xFF]), (0x1234, 256));
        assert_eq!(Backref::from_token([0x00, 0x01, 0x07]), (1, 8));
    }

    #[test]
    fn test_matcher_prefers_oldest_on_tie() {
        let input = b"ABCDEFGHABCDEFGHABCDEFGH";
        // Both 0 and 8 give an 8-byte match from 16; the scan reaches 0 first.
        let r = find_longest_match(input, 16, MAX_WINDOW_SIZE);
        assert!(r.found);
        assert_eq!(r.displacement, 16);
        assert_eq!(r.length, 8);
    }

    #[test]
    fn test_matcher_longer_replaces_older() {
        // Offset 0 matches 8 bytes, offset 10 matches 9.
        let input = b"ABCDEFGHx.ABCDEFGHIABCDEFGHI";
        let r = find_longest_match(input, 19, MAX_WINDOW_SIZE);
        assert!(r.found);
        assert_eq!(r.displacement, 9);
        assert_eq!(r.length, 9);
    }

    #[test]
    fn test_matcher_never_overlaps_cursor() {
        let input = vec![b'z'; 40];
        let r = find_longest_match(&input, 10, MAX_WINDOW_SIZE);
        assert_eq!(r.displacement, 10);
        assert_eq!(r.length, 10);
    }

    #[test]
    fn test_matcher_below_threshold() {
        let input = b"ABCDEFGxABCDEFGy";
        assert_eq!(find_longest_match(input, 8, MAX_WINDOW_SIZE), Backref::NONE);
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::new().validate().is_ok());
        assert!(matches!(
            Config::new().with_window_size(0).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::new().with_window_size(MAX_WINDOW_SIZE + 1).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::new().with_max_backrefs(0).validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_container_write_parse() {
        let tokens = [b'a', 0x00, 0x01, 0x07, b'b'];
        let container = Container {
            offsets: vec![1],
            tokens: &tokens,
        };
        let mut bytes = Vec::new();
        container.write_to(&mut bytes);
        assert_eq!(bytes.len(), container::encoded_len(1, tokens.len()));

        let parsed = Container::parse(&bytes, &Config::new()).unwrap();
        assert_eq!(parsed, container);
    }

    /// Doubles every byte of the stream; metadata records the original length.
    struct Doubler;

    impl EntropyStage for Doubler {
        fn encode(&mut self, tokens: Vec<u8>) -> Result<Recoded> {
            let metadata = (tokens.len() as u32).to_le_bytes().to_vec();
            let stream = tokens.iter().flat_map(|&b| [b, b]).collect();
            Ok(Recoded { stream, metadata })
        }

        fn decode<'a>(&mut self, stream: &'a [u8], metadata: &[u8]) -> Result<Cow<'a, [u8]>> {
            let len = u32::from_le_bytes(
                metadata
                    .try_into()
                    .map_err(|_| Error::Stage("bad metadata"))?,
            ) as usize;
            let tokens: Vec<u8> = stream.iter().step_by(2).copied().collect();
            if tokens.len() != len {
                return Err(Error::Stage("length mismatch"));
            }
            Ok(Cow::Owned(tokens))
        }
    }

    #[test]
    fn test_custom_stage_round_trip() {
        let original = b"abcdefghijabcdefghijabcdefghij";
        let mut codec = Codec::with_stage(Config::new(), Doubler);

        let mut compressed = Vec::new();
        let metadata = codec.compress(original, &mut compressed).unwrap();
        assert_eq!(metadata.len(), 4);

        let mut decompressed = Vec::new();
        codec
            .decompress(&compressed, &metadata, &mut decompressed)
            .unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_passthrough_rejects_metadata() {
        let mut compressed = Vec::new();
        let mut codec = Codec::new(Config::new());
        let metadata = codec.compress(b"abc", &mut compressed).unwrap();
        assert!(metadata.is_empty());

        let mut out = Vec::new();
        assert!(matches!(
            codec.decompress(&compressed, &[1], &mut out),
            Err(Error::Stage(_))
        ));
    }
}
