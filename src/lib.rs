// Module declarations for the crate's components
pub mod config;      // Configuration loading and validation
pub mod error;       // Error types and helpers
pub mod measurement; // Measurement taxonomy and opcode resolution
pub mod options;     // Command line options parsing
pub mod prelude;     // Common imports and types
pub mod register;    // Measurement to register offset mapping
pub mod sunspec;     // SunSpec addressing, decoders and read builders
pub mod utils;       // Byte and hex helpers

// Get the package version from Cargo.toml
const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

use crate::options::Command;
use crate::prelude::*;
use std::io::Write;

/// Installs the logger: timestamped, module-tagged lines, no colours.
pub fn init_logging(default_level: &str) {
    if let Err(e) = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
    {
        eprintln!("Failed to initialise logging: {}", e);
    }
}

/// Main application entry point
pub fn app(options: Options) -> Result<()> {
    init_logging(&options.loglevel);

    info!("sunspec-decode {} starting with config file: {}", CARGO_PKG_VERSION, options.config_file);

    let config = Config::new(options.config_file)?;
    let operations = config.operations();

    let mut out = std::io::stdout().lock();

    match options.command {
        Command::Plan => {
            for op in &operations {
                writeln!(out, "{}", serde_json::to_string(op)?)?;
            }
        }
        Command::Common { hex } => {
            let bytes = Utils::parse_hex(&hex)?;
            let descriptor = sunspec::decode_common_block(&bytes)?;
            info!(
                "found {} {} (version {}, serial {})",
                descriptor.manufacturer, descriptor.model, descriptor.version, descriptor.serial
            );
            writeln!(out, "{}", serde_json::to_string(&descriptor)?)?;
        }
        Command::Decode { index, hex } => {
            let op = operations.get(index).ok_or_else(|| {
                anyhow!("no operation {}, plan has {}", index, operations.len())
            })?;
            let bytes = Utils::parse_hex(&hex)?;
            for result in decode_response(op, &bytes)? {
                info!(
                    "{} = {} {}",
                    result.measurement,
                    result.value,
                    result.measurement.unit()
                );
                writeln!(out, "{}", serde_json::to_string(&result)?)?;
            }
        }
    }

    Ok(())
}

/// Checks a transport response against its operation, then decodes it.
///
/// The decoders trust their input length; this is where a mismatched
/// response is turned into an error instead.
pub fn decode_response(op: &ReadOperation, bytes: &[u8]) -> Result<Vec<SplitResult>> {
    if bytes.len() != op.byte_len() {
        bail!(
            "operation at {} expects {} bytes ({} registers), got {}",
            op.address,
            op.byte_len(),
            op.count,
            bytes.len()
        );
    }

    match op.readings(bytes) {
        Some(results) => Ok(results),
        None => bail!("operation at {} is the common block, use the common command", op.address),
    }
}
