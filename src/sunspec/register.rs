//! SunSpec register addressing.
//!
//! Protocol fields count registers from 1, byte buffers from 0. Every
//! conversion goes through [`byte_offset`] or [`absolute_address`].

/// Modbus address of the first SunSpec register (the "SunS" marker).
pub const BASE: u16 = 40000;

// common block field registers, 1-based
pub const ID: u16 = 1;
pub const MODEL_ID: u16 = 3;
pub const MANUFACTURER: u16 = 5;
pub const MODEL: u16 = 21;
pub const VERSION: u16 = 45;
pub const SERIAL: u16 = 53;

// field lengths in registers
pub const MANUFACTURER_LEN: u16 = 16;
pub const MODEL_LEN: u16 = 16;
pub const VERSION_LEN: u16 = 8;
pub const SERIAL_LEN: u16 = 16;

/// "SunS"
pub const SIGNATURE: u32 = 0x5375_6e53;

/// Registers needed to cover the common block up to the end of the serial field.
pub const COMMON_BLOCK_REGISTERS: u16 = SERIAL + SERIAL_LEN - 1;

/// Byte offset of a 1-based register inside a buffer that starts at register 1.
pub const fn byte_offset(register: u16) -> usize {
    2 * (register as usize - 1)
}

/// Byte range covered by `len` registers starting at `register`.
pub fn byte_span(register: u16, len: u16) -> std::ops::Range<usize> {
    byte_offset(register)..byte_offset(register + len)
}

/// Highest 1-based register offset still addressable from [`BASE`].
pub const MAX_OPCODE: u16 = u16::MAX - BASE + 1;

/// Protocol address of a model-relative 1-based register offset.
///
/// Panics if the offset is 0 or lands past the 16-bit address space.
pub fn absolute_address(base: u16, offset: u16) -> u16 {
    match offset.checked_sub(1).and_then(|o| base.checked_add(o)) {
        Some(address) => address,
        None => panic!(
            "register offset {} is outside the address space of base {}",
            offset, base
        ),
    }
}

/// Registers a block read spans: every value from `min` to `max` plus the
/// trailing scale factor register.
pub fn block_registers(min: u16, max: u16, data_size: u16) -> usize {
    usize::from(max - min + 1) * usize::from(data_size / 2) + 1
}

/// Last protocol address touched by reading `count` registers from `offset`,
/// `None` when the read runs past the address space.
pub fn last_address(base: u16, offset: u16, count: usize) -> Option<u16> {
    if offset == 0 || count == 0 {
        return None;
    }
    u16::try_from(usize::from(base) + usize::from(offset) - 1 + count - 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offsets_are_zero_based() {
        assert_eq!(byte_offset(1), 0);
        assert_eq!(byte_offset(2), 2);
        assert_eq!(byte_offset(SERIAL), 104);

        for r in 1..=200u16 {
            assert_eq!(byte_offset(r), 2 * (r as usize - 1));
        }
    }

    #[test]
    fn spans_cover_whole_fields() {
        assert_eq!(byte_span(MANUFACTURER, MANUFACTURER_LEN), 8..40);
        assert_eq!(byte_span(SERIAL, SERIAL_LEN), 104..136);
        assert_eq!(byte_offset(COMMON_BLOCK_REGISTERS + 1), 136);
    }

    #[test]
    fn absolute_addresses() {
        assert_eq!(absolute_address(BASE, 1), 40000);
        assert_eq!(absolute_address(BASE, 12), 40011);
        assert_eq!(absolute_address(BASE, MAX_OPCODE), u16::MAX);
    }

    #[test]
    #[should_panic(expected = "outside the address space")]
    fn absolute_address_does_not_wrap() {
        absolute_address(BASE, MAX_OPCODE + 1);
    }

    #[test]
    fn block_spans() {
        assert_eq!(block_registers(3, 3, 2), 2);
        assert_eq!(block_registers(10, 12, 2), 4);
        assert_eq!(block_registers(1, 2, 4), 5);
        assert_eq!(block_registers(1, 4, 4), 9);
        assert_eq!(block_registers(1, u16::MAX, 4), 2 * 65535 + 1);
    }

    #[test]
    fn last_addresses() {
        assert_eq!(last_address(BASE, 1, 68), Some(40067));
        assert_eq!(last_address(BASE, MAX_OPCODE, 1), Some(u16::MAX));
        assert_eq!(last_address(BASE, MAX_OPCODE, 2), None);
        assert_eq!(last_address(BASE, MAX_OPCODE - 1, 2), Some(u16::MAX));
        assert_eq!(last_address(BASE, 0, 1), None);
    }

    #[test]
    fn signature_spells_suns() {
        assert_eq!(&SIGNATURE.to_be_bytes(), b"SunS");
    }
}
