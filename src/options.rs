use clap::{Parser, Subcommand};

/// SunSpec Decode - plan and decode SunSpec register reads
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Options {
    /// Config file to read
    #[clap(short = 'c', long = "config", default_value = "config.yaml")]
    pub config_file: String,

    /// Default log filter, RUST_LOG takes precedence
    #[clap(short = 'l', long = "loglevel", default_value = "info")]
    pub loglevel: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every planned read operation as JSON
    Plan,

    /// Decode a common block dump into the device descriptor
    Common {
        /// Register bytes read from the SunSpec base address, as hex
        #[clap(long)]
        hex: String,
    },

    /// Decode the response to one planned read operation
    Decode {
        /// Operation index as listed by `plan`
        #[clap(short = 'i', long)]
        index: usize,

        /// Register bytes returned for that operation, as hex
        #[clap(long)]
        hex: String,
    },
}

impl Options {
    pub fn new() -> Self {
        Self::parse()
    }
}
