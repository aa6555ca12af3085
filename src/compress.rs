use crate::config::Config;
use crate::error::{Error, Resource, Result};
use crate::matcher::find_longest_match;
use crate::stage::Codec;
use alloc::vec::Vec;

/// The encoder's raw output, before framing.
///
/// `tokens` interleaves literal bytes and 3-byte backreference tokens with no
/// tag between them; `offsets` holds the uncompressed position at which each
/// token starts and is the only way to tell the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub tokens: Vec<u8>,
    pub offsets: Vec<u32>,
}

impl Encoded {
    #[inline]
    #[must_use]
    pub fn backref_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Compresses the entire input into the output vector using the default [`Config`].
///
/// The container (header, offset table and token stream) is appended to `output`.
///
/// # Errors
/// Returns [`Error::CapacityExceeded`] if the input or its backreference count
/// exceeds the default limits. `output` is left untouched on error.
pub fn compress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    compress_with(input, output, &Config::new())
}

/// Compresses `input` into `output` under the given limits.
///
/// # Errors
/// See [`encode`].
pub fn compress_with(input: &[u8], output: &mut Vec<u8>, config: &Config) -> Result<()> {
    Codec::new(*config).compress(input, output).map(drop)
}

/// Runs the match-finding loop over the whole input.
///
/// At each cursor the longest usable match is committed as a token and the
/// cursor jumps past it; otherwise one literal byte is copied.
///
/// # Errors
/// * [`Error::InvalidConfig`] if `config` fails validation.
/// * [`Error::CapacityExceeded`] if `input` is longer than `max_input_size` or
///   more than `max_backrefs` matches would be committed. Encoding aborts
///   instead of falling back to literals.
pub fn encode(input: &[u8], config: &Config) -> Result<Encoded> {
    config.validate()?;
    if input.len() > config.max_input_size {
        return Err(Error::CapacityExceeded {
            resource: Resource::InputSize,
            limit: config.max_input_size,
        });
    }

    let mut encoded = Encoded {
        tokens: Vec::with_capacity(input.len()),
        offsets: Vec::new(),
    };

    let mut u_idx = 0;
    while u_idx < input.len() {
        let found = find_longest_match(input, u_idx, config.window_size);

        if found.found {
            if encoded.offsets.len() == config.max_backrefs {
                return Err(Error::CapacityExceeded {
                    resource: Resource::Backrefs,
                    limit: config.max_backrefs,
                });
            }
            encoded.tokens.extend_from_slice(&found.to_token());
            // Fits: validate() caps max_input_size at 2^32
            encoded.offsets.push(u_idx as u32);
            u_idx += found.length;
        } else {
            encoded.tokens.push(input[u_idx]);
            u_idx += 1;
        }
    }

    Ok(encoded)
}
