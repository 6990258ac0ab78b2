use crate::prelude::*;
use serde::Serialize;

/// Raw encodings a register value can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderKind {
    Uint16,
    /// Unsigned 16 bit where `0xFFFF` means "not supported" and decodes to NaN.
    Uint16WithNaN,
    Int16,
    Uint32,
}

impl DecoderKind {
    /// Bytes one value occupies.
    pub fn width(&self) -> usize {
        match self {
            DecoderKind::Uint32 => 4,
            _ => 2,
        }
    }
}

/// Turns the leading bytes of a big-endian buffer into a float, multiplied
/// by a constant `scale`.
///
/// The buffer must hold at least [`DecoderKind::width`] bytes; a shorter one
/// panics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Decoder {
    pub kind: DecoderKind,
    pub scale: f64,
}

impl Decoder {
    pub const fn new(kind: DecoderKind) -> Self {
        Self { kind, scale: 1.0 }
    }

    pub const fn scaled(kind: DecoderKind, scale: f64) -> Self {
        Self { kind, scale }
    }

    pub fn decode(&self, b: &[u8]) -> f64 {
        let raw = match self.kind {
            DecoderKind::Uint16 => f64::from(Utils::be_u16ify(b, 0)),
            DecoderKind::Uint16WithNaN => match Utils::be_u16ify(b, 0) {
                0xffff => f64::NAN,
                u => f64::from(u),
            },
            DecoderKind::Int16 => f64::from(Utils::be_i16ify(b, 0)),
            DecoderKind::Uint32 => f64::from(Utils::be_u32ify(b, 0)),
        };

        raw * self.scale
    }
}
