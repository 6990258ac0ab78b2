pub use anyhow::{anyhow, bail, Result};
pub use log::{debug, error, info, trace, warn};

pub use crate::config::{self, Config};
pub use crate::error::CommonBlockError;
pub use crate::file_error;
pub use crate::measurement::{Measurement, Resolve};
pub use crate::options::{self, Options};
pub use crate::register::MeasurementMapping;
pub use crate::sunspec::{
    self, BlockKind, Decoder, DecoderKind, DeviceDescriptor, Extract, FunctionCode,
    ReadOperation, SplitResult, Splitter, SunSpecCore,
};
pub use crate::utils::Utils;
