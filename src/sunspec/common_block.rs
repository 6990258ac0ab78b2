use crate::prelude::*;
use crate::sunspec::register::{self, byte_offset, byte_span};

use serde::Serialize;

/// Identity of a SunSpec device as stored in its common block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub manufacturer: String,
    pub model: String,
    pub version: String,
    pub serial: String,
}

/// Bytes a common block buffer must hold: everything up to the end of the
/// serial field.
pub const COMMON_BLOCK_LEN: usize = byte_offset(register::SERIAL + register::SERIAL_LEN);

/// Decodes the common block read from the SunSpec base address.
pub fn decode_common_block(b: &[u8]) -> Result<DeviceDescriptor, CommonBlockError> {
    if b.len() < COMMON_BLOCK_LEN {
        return Err(CommonBlockError::BufferTooShort {
            len: b.len(),
            required: COMMON_BLOCK_LEN,
        });
    }

    let signature = Utils::be_u32ify(b, byte_offset(register::ID));
    if signature != register::SIGNATURE {
        return Err(CommonBlockError::InvalidSignature(signature));
    }

    let descriptor = DeviceDescriptor {
        manufacturer: string_field(b, register::MANUFACTURER, register::MANUFACTURER_LEN),
        model: string_field(b, register::MODEL, register::MODEL_LEN),
        version: string_field(b, register::VERSION, register::VERSION_LEN),
        serial: string_field(b, register::SERIAL, register::SERIAL_LEN),
    };

    debug!("decoded SunSpec common block: {:?}", descriptor);

    Ok(descriptor)
}

fn string_field(b: &[u8], register: u16, len: u16) -> String {
    Utils::trim_padded(&b[byte_span(register, len)])
}
