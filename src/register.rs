use crate::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

/// Model-relative register layout of one device: which 1-based register
/// ("opcode") each measurement starts at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MeasurementMapping {
    opcodes: HashMap<Measurement, u16>,
}

impl MeasurementMapping {
    /// Loads a standalone register map file, a YAML (or JSON) object of
    /// `measurement: opcode` pairs.
    pub fn new(register_file: &str) -> Result<Self> {
        let content = std::fs::read_to_string(register_file)
            .map_err(|err| file_error!("error reading register file {}: {}", register_file, err))?;

        let mapping: Self = serde_yaml::from_str(&content)
            .map_err(|err| file_error!("error parsing register file {}: {}", register_file, err))?;

        debug!("loaded {} opcodes from {}", mapping.len(), register_file);

        Ok(mapping)
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Measurement, u16)>,
    {
        Self {
            opcodes: pairs.into_iter().collect(),
        }
    }

    /// Merges `other` into this mapping; entries in `other` win.
    pub fn extend(&mut self, other: MeasurementMapping) {
        self.opcodes.extend(other.opcodes);
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }

    /// Entries sorted by opcode, for logging and display.
    pub fn sorted(&self) -> Vec<(Measurement, u16)> {
        let mut pairs: Vec<_> = self.opcodes.iter().map(|(m, o)| (*m, *o)).collect();
        pairs.sort_by_key(|(m, o)| (*o, *m));
        pairs
    }
}

impl Resolve for MeasurementMapping {
    fn resolve(&self, measurement: Measurement) -> Option<u16> {
        self.opcodes.get(&measurement).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_measurements() {
        let mapping = MeasurementMapping::from_pairs([
            (Measurement::Current, 1),
            (Measurement::VoltageL1, 7),
        ]);

        assert_eq!(mapping.resolve(Measurement::Current), Some(1));
        assert_eq!(mapping.opcode(Measurement::VoltageL1), 7);
        assert_eq!(mapping.resolve(Measurement::Frequency), None);
    }

    #[test]
    #[should_panic(expected = "undefined opcode for measurement Frequency")]
    fn opcode_panics_on_unmapped_measurement() {
        MeasurementMapping::default().opcode(Measurement::Frequency);
    }

    #[test]
    fn deserializes_from_snake_case_names() {
        let mapping: MeasurementMapping =
            serde_yaml::from_str("current_l1: 2\nvoltage_l1_l2: 5\nexport: 31\n").unwrap();

        assert_eq!(
            mapping.sorted(),
            vec![
                (Measurement::CurrentL1, 2),
                (Measurement::VoltageL1L2, 5),
                (Measurement::Export, 31),
            ]
        );
    }
}
