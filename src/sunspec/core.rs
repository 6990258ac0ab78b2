use crate::prelude::*;
use crate::sunspec::register::{absolute_address, block_registers, BASE, COMMON_BLOCK_REGISTERS};

/// Builds SunSpec read operations against a device's register layout.
///
/// The layout is injected as any [`Resolve`] implementation. Every
/// measurement passed to a builder must resolve; an unmapped one panics.
#[derive(Clone, Debug)]
pub struct SunSpecCore<R> {
    mapping: R,
}

impl<R: Resolve> SunSpecCore<R> {
    pub fn new(mapping: R) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &R {
        &self.mapping
    }

    /// Read of the identity block at the SunSpec base address. Must start
    /// with 0x53756e53 ("SunS").
    pub fn common_block(&self) -> ReadOperation {
        ReadOperation {
            function_code: FunctionCode::ReadHoldingRegisters,
            address: BASE,
            count: COMMON_BLOCK_REGISTERS,
            extract: Extract::CommonBlock,
        }
    }

    pub fn decode_common_block(&self, b: &[u8]) -> Result<DeviceDescriptor, CommonBlockError> {
        sunspec::decode_common_block(b)
    }

    fn snip(&self, measurement: Measurement, count: u16, decoder: Decoder) -> ReadOperation {
        let op = ReadOperation {
            function_code: FunctionCode::ReadHoldingRegisters,
            address: absolute_address(BASE, self.mapping.opcode(measurement)),
            count,
            extract: Extract::Value {
                measurement,
                decoder,
            },
        };
        debug!("snip {:?} at {} len {}", measurement, op.address, op.count);
        op
    }

    pub fn snip16_uint(&self, measurement: Measurement, scaler: Option<f64>) -> ReadOperation {
        self.snip(measurement, 1, Self::decoder(DecoderKind::Uint16, scaler))
    }

    pub fn snip16_int(&self, measurement: Measurement, scaler: Option<f64>) -> ReadOperation {
        self.snip(measurement, 1, Self::decoder(DecoderKind::Int16, scaler))
    }

    pub fn snip32(&self, measurement: Measurement, scaler: Option<f64>) -> ReadOperation {
        self.snip(measurement, 2, Self::decoder(DecoderKind::Uint32, scaler))
    }

    fn decoder(kind: DecoderKind, scaler: Option<f64>) -> Decoder {
        match scaler {
            Some(scale) => Decoder::scaled(kind, scale),
            None => Decoder::new(kind),
        }
    }

    fn min_max(&self, measurements: &[Measurement]) -> (u16, u16) {
        assert!(
            !measurements.is_empty(),
            "block read needs at least one measurement"
        );

        measurements
            .iter()
            .map(|m| self.mapping.opcode(*m))
            .fold((u16::MAX, u16::MIN), |(min, max), op| {
                (min.min(op), max.max(op))
            })
    }

    /// Splitter for a block of `kind` values covering `measurements`.
    pub fn splitter(&self, kind: BlockKind, measurements: &[Measurement]) -> Splitter {
        let (min, _) = self.min_max(measurements);

        Splitter {
            points: measurements
                .iter()
                .map(|m| (*m, self.mapping.opcode(*m)))
                .collect(),
            min,
            data_size: kind.data_size(),
            decoder: kind.decoder(),
        }
    }

    /// One read covering all `measurements` plus the trailing int16 scale
    /// factor, split back into readings by the attached [`Splitter`].
    pub fn block(&self, kind: BlockKind, measurements: &[Measurement]) -> ReadOperation {
        let (min, max) = self.min_max(measurements);

        let count = match u16::try_from(block_registers(min, max, kind.data_size())) {
            Ok(count) => count,
            Err(_) => panic!("{:?} block from opcode {} to {} is too long", kind, min, max),
        };

        let op = ReadOperation {
            function_code: FunctionCode::ReadHoldingRegisters,
            address: absolute_address(BASE, min),
            count,
            extract: Extract::Split(self.splitter(kind, measurements)),
        };
        debug!(
            "{:?} block {:?} at {} len {}",
            kind, measurements, op.address, op.count
        );
        op
    }
}
