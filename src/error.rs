use core::fmt;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{resource} exceeds the configured limit of {limit}")]
    CapacityExceeded { resource: Resource, limit: usize },

    #[error("Malformed container: {0}")]
    MalformedContainer(Malformed),

    #[error("Corrupt backreference at output position {position}: {reason}")]
    CorruptBackreference { position: usize, reason: Corruption },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Post-processing stage failed: {0}")]
    Stage(&'static str),
}

/// The bounded resource behind a [`Error::CapacityExceeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    InputSize,
    OutputSize,
    Backrefs,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InputSize => "Input size",
            Self::OutputSize => "Reconstructed size",
            Self::Backrefs => "Backreference count",
        })
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    #[error("header shorter than 16 bytes")]
    TruncatedHeader,

    #[error("offset table extends past the end of the container")]
    TruncatedTable,

    #[error("backreference count cannot be addressed on this platform")]
    TableOverflow,

    #[error("token stream declares {declared} bytes but {actual} follow the table")]
    LengthMismatch { declared: u64, actual: usize },

    #[error("offset table entry {index} is not strictly increasing")]
    TableNotIncreasing { index: usize },

    #[error("token at stream position {position} is cut short")]
    TruncatedToken { position: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    #[error("displacement is zero")]
    ZeroDisplacement,

    #[error("displacement reaches before the start of the stream")]
    DisplacementPastStart,

    #[error("displacement exceeds the window size")]
    DisplacementBeyondWindow,

    #[error("length is outside the encodable range")]
    LengthOutOfRange,

    #[error("offset table entry does not fall on a token boundary")]
    Misaligned,
}
