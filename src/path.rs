use std::path::{Path, PathBuf};

use alloc::string::String;

use crate::shape::{ShapeWriter, TypeTag};
use crate::sink::Sink;
use crate::{Decode, Decoder, Encode, Encoder, ErrorCode, WireError};

/// Length-prefixed UTF-8, like a string. Paths that are not valid Unicode fail with
/// `IllegalByteSequence` before anything is written.
impl Encode for Path {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Path);
    }

    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        let text = self
            .to_str()
            .ok_or_else(|| enc.error(ErrorCode::IllegalByteSequence))?;
        text.encode(enc)
    }
}

impl Encode for PathBuf {
    fn describe(shape: &mut ShapeWriter) {
        Path::describe(shape);
    }

    #[inline]
    fn encode<S: Sink>(&self, enc: &mut Encoder<S>) -> Result<(), WireError> {
        self.as_path().encode(enc)
    }
}

impl Decode for PathBuf {
    fn describe(shape: &mut ShapeWriter) {
        shape.tag(TypeTag::Path);
    }

    fn decode_in_place(&mut self, dec: &mut Decoder<'_>) -> Result<(), WireError> {
        let mut text = String::new();
        text.decode_in_place(dec)?;
        *self = Self::from(text);
        Ok(())
    }
}
