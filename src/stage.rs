//! Post-processing of the token stream and the encode/decode pipeline.
//!
//! An [`EntropyStage`] sits between the encoder loop and the container writer
//! (and, mirrored, between the container reader and the reconstructor). It
//! may recode the literal/token stream however it likes; the offset table is
//! never passed through it, so the container layout is the same either way.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::compress::encode;
use crate::config::Config;
use crate::container::{Container, write_container};
use crate::decompress::reconstruct;
use crate::error::{Error, Result};

/// Output of [`EntropyStage::encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recoded {
    /// Stream stored in the container in place of the raw tokens.
    pub stream: Vec<u8>,
    /// Side information the stage needs to invert itself, returned to the caller.
    pub metadata: Vec<u8>,
}

pub trait EntropyStage {
    /// Recodes the raw literal/token stream.
    ///
    /// # Errors
    /// Implementations return [`Error::Stage`] if they cannot recode the stream.
    fn encode(&mut self, tokens: Vec<u8>) -> Result<Recoded>;

    /// Inverts [`EntropyStage::encode`].
    ///
    /// # Errors
    /// Implementations return [`Error::Stage`] if the stream or metadata is invalid.
    fn decode<'a>(&mut self, stream: &'a [u8], metadata: &[u8]) -> Result<Cow<'a, [u8]>>;
}

/// Leaves the token stream as it is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Passthrough;

impl EntropyStage for Passthrough {
    fn encode(&mut self, tokens: Vec<u8>) -> Result<Recoded> {
        Ok(Recoded {
            stream: tokens,
            metadata: Vec::new(),
        })
    }

    fn decode<'a>(&mut self, stream: &'a [u8], metadata: &[u8]) -> Result<Cow<'a, [u8]>> {
        if !metadata.is_empty() {
            return Err(Error::Stage("passthrough stage takes no metadata"));
        }
        Ok(Cow::Borrowed(stream))
    }
}

/// An encoder/decoder pair bound to one set of limits and one stage.
#[derive(Debug, Clone)]
pub struct Codec<S = Passthrough> {
    config: Config,
    stage: S,
}

impl Codec<Passthrough> {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            stage: Passthrough,
        }
    }
}

impl<S: EntropyStage> Codec<S> {
    #[must_use]
    pub const fn with_stage(config: Config, stage: S) -> Self {
        Self { config, stage }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Compresses `input`, appending the container to `output`.
    ///
    /// Returns the stage's metadata, which must be handed back to
    /// [`Codec::decompress`]. It is always empty for [`Passthrough`].
    ///
    /// # Errors
    /// Any error from [`encode`] or from the stage. Nothing is written to
    /// `output` on error.
    pub fn compress(&mut self, input: &[u8], output: &mut Vec<u8>) -> Result<Vec<u8>> {
        let encoded = encode(input, &self.config)?;
        let recoded = self.stage.encode(encoded.tokens)?;
        write_container(&encoded.offsets, &recoded.stream, output);
        Ok(recoded.metadata)
    }

    /// Decompresses a container produced by [`Codec::compress`], appending to `output`.
    ///
    /// # Errors
    /// Any error from [`Container::parse`], the stage or [`reconstruct`].
    /// `output` is left at its original length on error.
    pub fn decompress(&mut self, input: &[u8], metadata: &[u8], output: &mut Vec<u8>) -> Result<()> {
        let container = Container::parse(input, &self.config)?;
        let tokens = self.stage.decode(container.tokens, metadata)?;
        reconstruct(&tokens, &container.offsets, &self.config, output)
    }
}
