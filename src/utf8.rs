#[cfg(feature = "simdutf8")]
use simdutf8::basic as simd_utf8;

use crate::{ErrorCode, WireError};

/// Validates UTF-8 bytes read at `offset` and returns a borrowed `&str` on success.
#[inline]
pub fn validate(bytes: &[u8], offset: usize) -> Result<&str, WireError> {
    #[cfg(feature = "simdutf8")]
    {
        simd_utf8::from_utf8(bytes)
            .map_err(|_| WireError::new(ErrorCode::IllegalByteSequence, offset))
    }

    #[cfg(not(feature = "simdutf8"))]
    {
        core::str::from_utf8(bytes)
            .map_err(|_| WireError::new(ErrorCode::IllegalByteSequence, offset))
    }
}
