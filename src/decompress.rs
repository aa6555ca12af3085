use crate::config::{Config, MIN_MATCH_LEN, TOKEN_LEN};
use crate::error::{Corruption, Error, Malformed, Resource, Result};
use crate::matcher::Backref;
use crate::stage::Codec;
use alloc::vec::Vec;

/// Decompresses an entire container using the default [`Config`].
///
/// The reconstructed bytes are appended to `output`. On error `output` is
/// restored to its original length; no partial result is kept.
///
/// # Errors
/// * [`Error::MalformedContainer`] if the framing is inconsistent.
/// * [`Error::CorruptBackreference`] if a token or table entry is invalid.
/// * [`Error::CapacityExceeded`] if the output would exceed the size limit.
pub fn decompress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    decompress_with(input, output, &Config::new())
}

/// Decompresses `input` into `output` under the given limits.
///
/// # Errors
/// See [`decompress`].
pub fn decompress_with(input: &[u8], output: &mut Vec<u8>, config: &Config) -> Result<()> {
    Codec::new(*config).decompress(input, &[], output)
}

/// Rebuilds the original bytes from a token stream and its offset table.
///
/// Whenever the output cursor lands on the next table entry, three bytes are
/// read as a token and expanded from already-reconstructed output; every other
/// position is a literal.
///
/// # Errors
/// See [`decompress`].
pub fn reconstruct(
    tokens: &[u8],
    offsets: &[u32],
    config: &Config,
    output: &mut Vec<u8>,
) -> Result<()> {
    config.validate()?;

    let start_out_len = output.len();
    let result = replay(tokens, offsets, config, output, start_out_len);
    if result.is_err() {
        output.truncate(start_out_len);
    }
    result
}

fn replay(
    tokens: &[u8],
    offsets: &[u32],
    config: &Config,
    output: &mut Vec<u8>,
    start_out_len: usize,
) -> Result<()> {
    output.reserve(tokens.len());

    let mut l_idx = 0;
    let mut b_idx = 0;

    while l_idx < tokens.len() {
        let u_idx = output.len() - start_out_len;

        match offsets.get(b_idx).map(|&b| b as usize) {
            Some(boundary) if boundary == u_idx => {
                if l_idx + TOKEN_LEN > tokens.len() {
                    return Err(Error::MalformedContainer(Malformed::TruncatedToken {
                        position: l_idx,
                    }));
                }

                let (displacement, length) =
                    Backref::from_token([tokens[l_idx], tokens[l_idx + 1], tokens[l_idx + 2]]);
                check_backref(displacement, length, u_idx, config)?;
                check_capacity(u_idx + length, config)?;

                apply_match(output, length, displacement);
                l_idx += TOKEN_LEN;
                b_idx += 1;
            }
            Some(boundary) if boundary < u_idx => {
                // A previous match ran over this boundary.
                return Err(Error::CorruptBackreference {
                    position: boundary,
                    reason: Corruption::Misaligned,
                });
            }
            _ => {
                check_capacity(u_idx + 1, config)?;
                output.push(tokens[l_idx]);
                l_idx += 1;
            }
        }
    }

    if let Some(&boundary) = offsets.get(b_idx) {
        return Err(Error::CorruptBackreference {
            position: boundary as usize,
            reason: Corruption::Misaligned,
        });
    }

    Ok(())
}

/// Validates a decoded token against the current output cursor.
#[inline]
fn check_backref(displacement: usize, length: usize, u_idx: usize, config: &Config) -> Result<()> {
    let reason = if displacement == 0 {
        Corruption::ZeroDisplacement
    } else if displacement > u_idx {
        Corruption::DisplacementPastStart
    } else if displacement > config.window_size {
        Corruption::DisplacementBeyondWindow
    } else if length < MIN_MATCH_LEN {
        Corruption::LengthOutOfRange
    } else {
        return Ok(());
    };

    Err(Error::CorruptBackreference {
        position: u_idx,
        reason,
    })
}

#[inline]
fn check_capacity(required: usize, config: &Config) -> Result<()> {
    if required > config.max_input_size {
        return Err(Error::CapacityExceeded {
            resource: Resource::OutputSize,
            limit: config.max_input_size,
        });
    }
    Ok(())
}

/// Applies a backreference to the output buffer.
///
/// Bytes are copied one at a time so that a displacement shorter than the
/// length repeats the bytes it has just written. Offset 1 is a plain run.
#[inline]
fn apply_match(output: &mut Vec<u8>, length: usize, displacement: usize) {
    output.reserve(length);

    if displacement == 1 {
        let last_byte = output[output.len() - 1];
        output.resize(output.len() + length, last_byte);
    } else {
        let src_pos = output.len() - displacement;
        for k in 0..length {
            let val = output[src_pos + k];
            output.push(val);
        }
    }
}
