//! CRC-32 (ISO-HDLC, reflected polynomial `0xEDB88320`) trailer handling.

use core::fmt;

use crate::endian::FixedWidth;
use crate::{ByteOrder, ErrorCode, WireError};

/// Size of the checksum trailer in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// CRC-32 of `data`.
#[inline]
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Incremental CRC-32 fed while the payload is being written.
#[derive(Clone)]
pub(crate) struct RunningChecksum(crc32fast::Hasher);

impl RunningChecksum {
    pub(crate) fn new() -> Self {
        Self(crc32fast::Hasher::new())
    }

    #[inline]
    pub(crate) fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    pub(crate) fn finish(self) -> u32 {
        self.0.finalize()
    }
}

impl fmt::Debug for RunningChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RunningChecksum").finish()
    }
}

/// Verify the trailer of `message` and return the covered payload length.
///
/// # Errors
///
/// Returns `InvalidArgument` if `message` is shorter than the trailer and `BadMessage` if the
/// stored checksum does not match the payload.
pub fn verify(message: &[u8], order: ByteOrder) -> Result<usize, WireError> {
    let payload_len = message
        .len()
        .checked_sub(CHECKSUM_LEN)
        .ok_or_else(|| WireError::new(ErrorCode::InvalidArgument, message.len()))?;
    let (payload, trailer) = message.split_at(payload_len);
    let mut stored = [0u8; CHECKSUM_LEN];
    stored.copy_from_slice(trailer);
    if u32::from_wire(stored, order) != crc32(payload) {
        return Err(WireError::new(ErrorCode::BadMessage, payload_len));
    }
    Ok(payload_len)
}
