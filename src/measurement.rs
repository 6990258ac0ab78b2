use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical quantities a SunSpec inverter or meter model can report.
///
/// The snake_case name is what configuration files use to refer to a
/// measurement, e.g. `voltage_l1` or `export`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    VoltageL1,
    VoltageL2,
    VoltageL3,
    VoltageL1L2,
    VoltageL2L3,
    VoltageL3L1,
    Current,
    CurrentL1,
    CurrentL2,
    CurrentL3,
    Power,
    PowerL1,
    PowerL2,
    PowerL3,
    ReactivePower,
    ApparentPower,
    Cosphi,
    Frequency,
    Import,
    Export,
    Sum,
    DcCurrent,
    DcVoltage,
    DcPower,
    HeatSinkTemp,
}

impl Measurement {
    pub fn description(&self) -> &'static str {
        use Measurement::*;

        match self {
            VoltageL1 => "L1 Voltage",
            VoltageL2 => "L2 Voltage",
            VoltageL3 => "L3 Voltage",
            VoltageL1L2 => "L1-L2 Voltage",
            VoltageL2L3 => "L2-L3 Voltage",
            VoltageL3L1 => "L3-L1 Voltage",
            Current => "Total Current",
            CurrentL1 => "L1 Current",
            CurrentL2 => "L2 Current",
            CurrentL3 => "L3 Current",
            Power => "Active Power",
            PowerL1 => "L1 Active Power",
            PowerL2 => "L2 Active Power",
            PowerL3 => "L3 Active Power",
            ReactivePower => "Reactive Power",
            ApparentPower => "Apparent Power",
            Cosphi => "Power Factor",
            Frequency => "Frequency",
            Import => "Imported Energy",
            Export => "Exported Energy",
            Sum => "Total Energy",
            DcCurrent => "DC Current",
            DcVoltage => "DC Voltage",
            DcPower => "DC Power",
            HeatSinkTemp => "Heat Sink Temperature",
        }
    }

    // units after protocol scaling; 32-bit energy blocks are already kWh
    pub fn unit(&self) -> &'static str {
        use Measurement::*;

        match self {
            VoltageL1 | VoltageL2 | VoltageL3 | VoltageL1L2 | VoltageL2L3 | VoltageL3L1
            | DcVoltage => "V",
            Current | CurrentL1 | CurrentL2 | CurrentL3 | DcCurrent => "A",
            Power | PowerL1 | PowerL2 | PowerL3 | DcPower => "W",
            ReactivePower => "var",
            ApparentPower => "VA",
            Cosphi => "",
            Frequency => "Hz",
            Import | Export | Sum => "kWh",
            HeatSinkTemp => "°C",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Maps a measurement to its 1-based register offset ("opcode") inside the
/// device's model block.
pub trait Resolve {
    fn resolve(&self, measurement: Measurement) -> Option<u16>;

    /// Like `resolve`, but an unmapped measurement is a programming error:
    /// the register map and the requested reads disagree.
    fn opcode(&self, measurement: Measurement) -> u16 {
        match self.resolve(measurement) {
            Some(opcode) => opcode,
            None => panic!("undefined opcode for measurement {:?}", measurement),
        }
    }
}

impl<R: Resolve + ?Sized> Resolve for &R {
    fn resolve(&self, measurement: Measurement) -> Option<u16> {
        (**self).resolve(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_follow_quantity() {
        assert_eq!(Measurement::VoltageL2L3.unit(), "V");
        assert_eq!(Measurement::DcCurrent.unit(), "A");
        assert_eq!(Measurement::PowerL2.unit(), "W");
        assert_eq!(Measurement::ReactivePower.unit(), "var");
        assert_eq!(Measurement::ApparentPower.unit(), "VA");
        assert_eq!(Measurement::Cosphi.unit(), "");
        assert_eq!(Measurement::Frequency.unit(), "Hz");
        assert_eq!(Measurement::HeatSinkTemp.unit(), "°C");

        // 32-bit energy blocks are reported in kWh
        for m in [Measurement::Import, Measurement::Export, Measurement::Sum] {
            assert_eq!(m.unit(), "kWh");
        }
    }

    #[test]
    fn displays_description() {
        assert_eq!(Measurement::Export.to_string(), "Exported Energy");
        assert_eq!(Measurement::HeatSinkTemp.to_string(), "Heat Sink Temperature");
    }
}
