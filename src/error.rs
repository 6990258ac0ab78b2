use thiserror::Error;

/// Reasons a SunSpec common block cannot be turned into a device descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonBlockError {
    #[error("could not read SunSpec device descriptor: got {len} bytes, need {required}")]
    BufferTooShort { len: usize, required: usize },

    #[error("invalid SunSpec device signature {0:#010x}")]
    InvalidSignature(u32),
}

/// Creates an anyhow error with the current file and line number
#[macro_export]
macro_rules! file_error {
    ($($arg:tt)*) => {
        anyhow::anyhow!(
            "[{}:{}] {}",
            std::path::Path::new(file!())
                .file_name()
                .map(|f| f.to_string_lossy())
                .unwrap_or_default(),
            line!(),
            format!($($arg)*)
        )
    };
}
