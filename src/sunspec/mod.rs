pub mod common_block;
pub mod core;
pub mod decoder;
pub mod operation;
pub mod register;

pub use self::common_block::{decode_common_block, DeviceDescriptor, COMMON_BLOCK_LEN};
pub use self::core::SunSpecCore;
pub use self::decoder::{Decoder, DecoderKind};
pub use self::operation::{
    BlockKind, Extract, FunctionCode, ReadOperation, SplitResult, Splitter, WH_TO_KWH,
};
