use crate::prelude::*;
use crate::sunspec::register::{absolute_address, BASE};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Serialize, Serializer};

/// Energy totals come in Wh, readings are published in kWh. Applied by the
/// 32-bit block splitter only, on top of the block's own scale factor.
pub const WH_TO_KWH: f64 = 0.001;

// {{{ FunctionCode
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum FunctionCode {
    ReadCoils = 1,
    ReadDiscreteInputs = 2,
    ReadHoldingRegisters = 3,
    ReadInputRegisters = 4,
}

impl Serialize for FunctionCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8((*self).into())
    }
}
// }}}

// {{{ BlockKind
/// Value encoding of a scale-factor block, selecting its splitter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Uint16,
    Int16,
    Uint32,
}

impl BlockKind {
    /// Bytes per value inside the block.
    pub fn data_size(&self) -> u16 {
        match self {
            BlockKind::Uint16 | BlockKind::Int16 => 2,
            BlockKind::Uint32 => 4,
        }
    }

    pub fn decoder(&self) -> Decoder {
        match self {
            BlockKind::Uint16 => Decoder::new(DecoderKind::Uint16WithNaN),
            BlockKind::Int16 => Decoder::new(DecoderKind::Int16),
            BlockKind::Uint32 => Decoder::scaled(DecoderKind::Uint32, WH_TO_KWH),
        }
    }
}
// }}}

/// One decoded reading out of a register block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitResult {
    pub address: u16,
    pub measurement: Measurement,
    pub value: f64,
}

// {{{ Splitter
/// Splits a block of values followed by one signed scale-factor register
/// back into individual readings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Splitter {
    /// Requested measurements with their opcodes, in caller order.
    pub points: Vec<(Measurement, u16)>,
    /// Lowest opcode, where the block read starts.
    pub min: u16,
    pub data_size: u16,
    pub decoder: Decoder,
}

impl Splitter {
    pub fn split(&self, b: &[u8]) -> Vec<SplitResult> {
        // scale factor sits in the last register of the block
        let exp = Utils::be_i16ify(b, b.len() - 2);
        let scaler = 10f64.powi(i32::from(exp));

        let mut res = Vec::with_capacity(self.points.len());

        for &(measurement, opcode) in &self.points {
            let index = usize::from(self.data_size) * usize::from(opcode - self.min);
            let val = self.decoder.decode(&b[index..]);

            if val.is_nan() {
                debug!("{:?} at opcode {} not supported by device, skipping", measurement, opcode);
                continue;
            }

            let result = SplitResult {
                address: absolute_address(BASE, opcode),
                measurement,
                value: scaler * val,
            };
            trace!("split {:?}", result);

            res.push(result);
        }

        res
    }
}
// }}}

// {{{ ReadOperation
/// What to do with the bytes a [`ReadOperation`] returns.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extract {
    /// A single value of one measurement.
    Value {
        measurement: Measurement,
        decoder: Decoder,
    },
    /// A scale-factor block holding several measurements.
    Split(Splitter),
    /// The device identity block, see [`super::decode_common_block`].
    CommonBlock,
}

/// A register read for the transport to execute, plus the recipe for
/// decoding its response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReadOperation {
    pub function_code: FunctionCode,
    /// Absolute (0-based protocol) start address.
    pub address: u16,
    /// Number of 16-bit registers to read.
    pub count: u16,
    pub extract: Extract,
}

impl ReadOperation {
    /// Bytes a complete response carries.
    pub fn byte_len(&self) -> usize {
        2 * usize::from(self.count)
    }

    /// Runs a value or split extractor over the response bytes. A single
    /// value reading NaN is dropped the same way a split drops it.
    ///
    /// Returns `None` for the common block, which has no measurements.
    pub fn readings(&self, b: &[u8]) -> Option<Vec<SplitResult>> {
        match &self.extract {
            Extract::Value {
                measurement,
                decoder,
            } => {
                let value = decoder.decode(b);
                if value.is_nan() {
                    return Some(Vec::new());
                }
                Some(vec![SplitResult {
                    address: self.address,
                    measurement: *measurement,
                    value,
                }])
            }
            Extract::Split(splitter) => Some(splitter.split(b)),
            Extract::CommonBlock => None,
        }
    }
}
// }}}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_code_round_trips_through_u8() {
        assert_eq!(u8::from(FunctionCode::ReadHoldingRegisters), 3);
        assert_eq!(FunctionCode::try_from(4u8).unwrap(), FunctionCode::ReadInputRegisters);
        assert!(FunctionCode::try_from(5u8).is_err());
    }

    #[test]
    fn block_kinds() {
        assert_eq!(BlockKind::Uint16.data_size(), 2);
        assert_eq!(BlockKind::Int16.data_size(), 2);
        assert_eq!(BlockKind::Uint32.data_size(), 4);
        assert_eq!(BlockKind::Uint32.decoder().scale, WH_TO_KWH);
        assert_eq!(BlockKind::Uint16.decoder().kind, DecoderKind::Uint16WithNaN);
    }

    #[test]
    fn positive_exponent_scales_up() {
        let splitter = Splitter {
            points: vec![(Measurement::Power, 4)],
            min: 4,
            data_size: 2,
            decoder: BlockKind::Int16.decoder(),
        };

        // -12 followed by exponent 2
        let res = splitter.split(&[0xff, 0xf4, 0x00, 0x02]);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].address, 40003);
        assert_eq!(res[0].value, -1200.0);
    }

    #[test]
    fn wide_uint32_block_indexes_past_u16() {
        let splitter = Splitter {
            points: vec![(Measurement::Import, 1), (Measurement::Export, 16385)],
            min: 1,
            data_size: 4,
            decoder: BlockKind::Uint32.decoder(),
        };

        // export lands at byte 4 * 16384 = 65536, scale factor after it
        let mut b = vec![0u8; 65542];
        b[0..4].copy_from_slice(&2000u32.to_be_bytes());
        b[65536..65540].copy_from_slice(&5000u32.to_be_bytes());

        let res = splitter.split(&b);
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].value, 2.0);
        assert_eq!(res[1].measurement, Measurement::Export);
        assert_eq!(res[1].address, 56384);
        assert_eq!(res[1].value, 5.0);
    }
}
