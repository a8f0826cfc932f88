//! Application module
//!
//! Configuration, logging and output for the `thumbview` binary.

mod config;
mod config_file;
pub mod logging;
mod output;

pub use config::Config;
pub use config_file::ConfigFile;
pub use output::{write_results, OutputFormat};

/// Exit codes
pub mod exit_code {
    /// Normal exit
    pub const SUCCESS: i32 = 0;
    /// Runtime error occurred
    pub const ERROR: i32 = 2;
    /// Invalid arguments or options (e.g., unknown flag, invalid format)
    pub const INVALID: i32 = 3;
}
