use crate::prelude::*;
use crate::sunspec::register::{block_registers, last_address, BASE, MAX_OPCODE};

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Optional standalone register map, merged under `mapping`.
    pub register_file: Option<String>,

    #[serde(default)]
    pub mapping: MeasurementMapping,

    #[serde(default = "Vec::new")]
    pub values: Vec<Value>,

    #[serde(default = "Vec::new")]
    pub blocks: Vec<Block>,
}

// Value {{{
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Uint16,
    Int16,
    Uint32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Value {
    pub measurement: Measurement,
    pub kind: ValueKind,
    pub scale: Option<f64>,
}
impl Value {
    /// Registers a single read of this value covers.
    pub fn registers(&self) -> usize {
        match self.kind {
            ValueKind::Uint16 | ValueKind::Int16 => 1,
            ValueKind::Uint32 => 2,
        }
    }

    pub fn operation<R: Resolve>(&self, core: &SunSpecCore<R>) -> ReadOperation {
        match self.kind {
            ValueKind::Uint16 => core.snip16_uint(self.measurement, self.scale),
            ValueKind::Int16 => core.snip16_int(self.measurement, self.scale),
            ValueKind::Uint32 => core.snip32(self.measurement, self.scale),
        }
    }
} // }}}

// Block {{{
#[derive(Clone, Debug, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub measurements: Vec<Measurement>,
}
impl Block {
    pub fn operation<R: Resolve>(&self, core: &SunSpecCore<R>) -> ReadOperation {
        core.block(self.kind, &self.measurements)
    }
} // }}}

impl Config {
    pub fn new(file: String) -> Result<Self> {
        info!("Reading configuration from {}", file);
        let content = std::fs::read_to_string(&file)
            .map_err(|err| file_error!("error reading {}: {}", file, err))?;

        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|err| file_error!("error parsing {}: {}", file, err))?;

        if let Some(register_file) = &config.register_file {
            let mut mapping = MeasurementMapping::new(register_file)?;
            mapping.extend(std::mem::take(&mut config.mapping));
            config.mapping = mapping;
        }

        info!("Configuration loaded successfully:");
        info!("  Mapping: {} measurements", config.mapping.len());
        for (measurement, opcode) in config.mapping.sorted() {
            debug!("    {:?} => {}", measurement, opcode);
        }
        info!("  Values: {}", config.values.len());
        for (i, value) in config.values.iter().enumerate() {
            info!(
                "    Value[{}]: {:?} {:?} scale {}",
                i,
                value.measurement,
                value.kind,
                value.scale.unwrap_or(1.0)
            );
        }
        info!("  Blocks: {}", config.blocks.len());
        for (i, block) in config.blocks.iter().enumerate() {
            info!("    Block[{}]: {:?} {:?}", i, block.kind, block.measurements);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (measurement, opcode) in self.mapping.sorted() {
            if opcode == 0 {
                bail!("mapping.{:?}: opcodes are 1-based, got 0", measurement);
            }
            if opcode > MAX_OPCODE {
                bail!(
                    "mapping.{:?}: opcode {} is past the register address space (max {})",
                    measurement,
                    opcode,
                    MAX_OPCODE
                );
            }
        }

        for (i, value) in self.values.iter().enumerate() {
            let context = format!("values[{}]", i);
            let opcode = self.check_mapped(value.measurement, &context)?;
            Self::check_span(&context, opcode, value.registers())?;
            if let Some(scale) = value.scale {
                if !scale.is_finite() {
                    bail!("values[{}].scale must be finite, got {}", i, scale);
                }
            }
        }

        for (i, block) in self.blocks.iter().enumerate() {
            if block.measurements.is_empty() {
                bail!("blocks[{}] has no measurements", i);
            }
            let context = format!("blocks[{}]", i);
            let mut opcodes = Vec::with_capacity(block.measurements.len());
            for measurement in &block.measurements {
                opcodes.push(self.check_mapped(*measurement, &context)?);
            }
            if let (Some(&min), Some(&max)) = (opcodes.iter().min(), opcodes.iter().max()) {
                Self::check_span(&context, min, block_registers(min, max, block.kind.data_size()))?;
            }
        }

        Ok(())
    }

    fn check_mapped(&self, measurement: Measurement, context: &str) -> Result<u16> {
        match self.mapping.resolve(measurement) {
            Some(opcode) => Ok(opcode),
            None => bail!("{}: measurement {:?} has no opcode in mapping", context, measurement),
        }
    }

    fn check_span(context: &str, opcode: u16, count: usize) -> Result<()> {
        if last_address(BASE, opcode, count).is_none() {
            bail!(
                "{}: reading {} registers from opcode {} runs past the register address space",
                context,
                count,
                opcode
            );
        }
        Ok(())
    }

    /// Every read this configuration asks for: the common block first, then
    /// single values, then blocks, each in file order.
    pub fn operations(&self) -> Vec<ReadOperation> {
        let core = SunSpecCore::new(&self.mapping);

        std::iter::once(core.common_block())
            .chain(self.values.iter().map(|v| v.operation(&core)))
            .chain(self.blocks.iter().map(|b| b.operation(&core)))
            .collect()
    }
}
