use crate::prelude::*;

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::multispace0,
    combinator::{all_consuming, map_res},
    multi::many0,
    sequence::delimited,
    IResult,
};

pub struct Utils;

impl Utils {
    // Big-endian register helpers. These index straight into the slice, a
    // buffer shorter than the value is a caller bug and panics.
    pub fn be_u16ify(input: &[u8], offset: usize) -> u16 {
        u16::from_be_bytes([input[offset], input[offset + 1]])
    }

    pub fn be_i16ify(input: &[u8], offset: usize) -> i16 {
        i16::from_be_bytes([input[offset], input[offset + 1]])
    }

    pub fn be_u32ify(input: &[u8], offset: usize) -> u32 {
        u32::from_be_bytes([
            input[offset],
            input[offset + 1],
            input[offset + 2],
            input[offset + 3],
        ])
    }

    /// Right-trims the space and NUL padding SunSpec uses for string fields.
    pub fn trim_padded(input: &[u8]) -> String {
        String::from_utf8_lossy(input)
            .trim_end_matches(|c: char| c == ' ' || c == '\0')
            .to_string()
    }

    /// Parses a hex dump such as `53 75 6e 53` or `53756e53` into bytes.
    pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
        match all_consuming(many0(Self::hex_byte))(input.trim_start()) {
            Ok((_, bytes)) => Ok(bytes),
            Err(err) => Err(file_error!("invalid hex input {:?}: {}", input, err)),
        }
    }

    fn hex_byte(input: &str) -> IResult<&str, u8> {
        map_res(
            delimited(
                multispace0,
                take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
                multispace0,
            ),
            |pair| u8::from_str_radix(pair, 16),
        )(input)
    }
}
