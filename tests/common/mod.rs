#![allow(dead_code)]

use sunspec_decode::prelude::*;
use sunspec_decode::sunspec::COMMON_BLOCK_LEN;

pub fn common_setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {}, got {}",
        expected,
        actual
    );
}

pub struct Factory;

impl Factory {
    /// Layout of a three phase inverter model block.
    pub fn mapping() -> MeasurementMapping {
        use sunspec_decode::measurement::Measurement::*;

        MeasurementMapping::from_pairs([
            (Current, 3),
            (CurrentL1, 4),
            (CurrentL2, 5),
            (CurrentL3, 6),
            (VoltageL1L2, 8),
            (VoltageL2L3, 9),
            (VoltageL3L1, 10),
            (VoltageL1, 11),
            (VoltageL2, 12),
            (VoltageL3, 13),
            (Power, 15),
            (Frequency, 17),
            (ApparentPower, 19),
            (ReactivePower, 21),
            (Cosphi, 23),
            (Sum, 25),
            (DcCurrent, 28),
            (DcVoltage, 30),
            (DcPower, 32),
            (HeatSinkTemp, 35),
        ])
    }

    pub fn core() -> SunSpecCore<MeasurementMapping> {
        SunSpecCore::new(Self::mapping())
    }

    /// A common block with space padded string fields.
    pub fn common_block(manufacturer: &str, model: &str, version: &str, serial: &str) -> Vec<u8> {
        let mut b = vec![0u8; COMMON_BLOCK_LEN];

        b[0..4].copy_from_slice(b"SunS");
        b[4..6].copy_from_slice(&1u16.to_be_bytes()); // model id
        b[6..8].copy_from_slice(&65u16.to_be_bytes()); // model length

        Self::put_string(&mut b, 5, 16, manufacturer, b' ');
        Self::put_string(&mut b, 21, 16, model, b' ');
        Self::put_string(&mut b, 45, 8, version, b' ');
        Self::put_string(&mut b, 53, 16, serial, b' ');

        b
    }

    pub fn put_string(b: &mut [u8], register: usize, len: usize, value: &str, pad: u8) {
        let start = 2 * (register - 1);
        let field = &mut b[start..start + 2 * len];
        field.fill(pad);
        field[..value.len()].copy_from_slice(value.as_bytes());
    }

    /// 16-bit values followed by the scale factor register.
    pub fn block16(values: &[u16], exponent: i16) -> Vec<u8> {
        values
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .chain(exponent.to_be_bytes())
            .collect()
    }

    pub fn block16_signed(values: &[i16], exponent: i16) -> Vec<u8> {
        values
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .chain(exponent.to_be_bytes())
            .collect()
    }

    /// 32-bit values followed by the scale factor register.
    pub fn block32(values: &[u32], exponent: i16) -> Vec<u8> {
        values
            .iter()
            .flat_map(|v| v.to_be_bytes())
            .chain(exponent.to_be_bytes())
            .collect()
    }
}
