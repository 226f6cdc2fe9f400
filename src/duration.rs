use core::time::Duration;

use crate::shape::{ShapeWriter, TypeTag};
use crate::sink::Sink;
use crate::{Decode, Decoder, Encode, Encoder, ErrorCode, WireError};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Whole seconds as a `u64`, then the sub-second nanoseconds as a `u32`, each under the
/// usual integer rules.
impl Encode for Duration {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Duration);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        self.as_secs().encode(enc)?;
        self.subsec_nanos().encode(enc)
    }
}

impl Decode for Duration {
    const MIN_WIRE_LEN: usize = 2;

    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Duration);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut secs = 0u64;
        secs.decode_in_place(dec)?;
        let off = dec.position();
        let mut nanos = 0u32;
        nanos.decode_in_place(dec)?;
        if nanos >= NANOS_PER_SEC {
            return Err(WireError::new(ErrorCode::IllegalByteSequence, off));
        }
        *self = Self::new(secs, nanos);
        Ok(())
    }
}
