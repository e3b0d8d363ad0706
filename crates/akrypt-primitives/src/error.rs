/// Unified error type for all primitives operations.
///
/// Covers errors from key management, masking, block cipher modes,
/// message authentication and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("null argument: {0}")]
    NullArgument(&'static str),

    #[error("invalid length: {0}")]
    InvalidLength(&'static str),

    #[error("wrong length: expected {expected}, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("data length {size} is not a multiple of the block length {block_size}")]
    UnalignedLength { size: usize, block_size: usize },

    #[error("unsupported block size: {0} bytes")]
    UnsupportedBlockSize(usize),

    #[error("incorrect integrity code of secret key value")]
    KeyIntegrityViolation,

    #[error("low key resource: requested {requested}, available {available}")]
    LowResource { requested: u64, available: i64 },

    #[error("invalid initial value length: expected at least {expected}, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    #[error("no initial value was supplied and no prior stream state exists")]
    NoPriorState,

    #[error("stream cannot be resumed after a partial block; supply a fresh initial value")]
    ContinuationBlocked,

    #[error("random generator failure: {0}")]
    Random(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<rand::Error> for PrimitivesError {
    fn from(e: rand::Error) -> Self {
        PrimitivesError::Random(e.to_string())
    }
}

impl From<serde_json::Error> for PrimitivesError {
    fn from(e: serde_json::Error) -> Self {
        PrimitivesError::Config(e.to_string())
    }
}
