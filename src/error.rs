use core::fmt;

/// A structured error code identifying why an encode or decode call stopped.
///
/// The first five codes mirror the classic `errc` values used by compact binary formats:
/// callers that already branch on `message_size` / `value_too_large` / `invalid_argument` /
/// `bad_message` can map them one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Fewer bytes remain than a fixed-width read requires.
    MessageSize,
    /// A decoded length prefix exceeds the remaining input, or a bitset body is truncated.
    ValueTooLarge,
    /// Structural mismatch: version fingerprint, bitset width, variant index, or a tagged
    /// integer representation that does not fit the target; also a checksummed input too short
    /// to hold its trailer.
    InvalidArgument,
    /// Checksum verification failed.
    BadMessage,
    /// A byte that must be a flag (`0`/`1`), a varint, a `char`, or UTF-8 text was malformed.
    IllegalByteSequence,

    /// Nesting depth limit exceeded.
    DepthLimitExceeded,
    /// Input is larger than the configured decode limit.
    InputLimitExceeded,
    /// A fixed-capacity sink ran out of room.
    BufferFull,
    /// Arithmetic overflow while computing a length or offset.
    LengthOverflow,
    /// Memory allocation failed while decoding into owned structures.
    AllocationFailed,

    /// The underlying reader or writer failed.
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

impl ErrorCode {
    /// Short, static description of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MessageSize => "not enough bytes for fixed-width value",
            Self::ValueTooLarge => "declared size exceeds remaining input",
            Self::InvalidArgument => "structural mismatch",
            Self::BadMessage => "checksum mismatch",
            Self::IllegalByteSequence => "illegal byte sequence",

            Self::DepthLimitExceeded => "nesting depth limit exceeded",
            Self::InputLimitExceeded => "input exceeds decode limits",
            Self::BufferFull => "output buffer full",
            Self::LengthOverflow => "length overflow",
            Self::AllocationFailed => "allocation failed",

            #[cfg(feature = "std")]
            Self::Io(_) => "i/o failure",
        }
    }
}

/// An encode or decode failure with a stable code and the byte offset where it was detected.
///
/// For decode errors `offset` indexes the input slice. For encode errors it is the number of
/// bytes already written when the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset where the error was detected.
    pub offset: usize,
}

impl WireError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }

    /// Returns true iff the input ended before a value was complete.
    #[inline]
    #[must_use]
    pub const fn is_truncation(self) -> bool {
        matches!(self.code, ErrorCode::MessageSize | ErrorCode::ValueTooLarge)
    }

    #[cfg(feature = "std")]
    pub(crate) fn io(err: &std::io::Error, offset: usize) -> Self {
        Self::new(ErrorCode::Io(err.kind()), offset)
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            #[cfg(feature = "std")]
            ErrorCode::Io(kind) => write!(f, "fieldwire i/o failed at {}: {kind}", self.offset),
            code => write!(f, "fieldwire failed at {}: {}", self.offset, code.as_str()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WireError {}
