//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::config_file::ConfigFile;
use super::exit_code;
use super::output::OutputFormat;
use crate::core::ThumbnailConfig;

/// Application configuration from CLI args and config file
#[derive(Debug)]
pub struct Config {
    /// Entries to resolve, in submission order
    pub paths: Vec<PathBuf>,
    /// Settings handed to the thumbnailer
    pub thumbnails: ThumbnailConfig,
    pub output_format: OutputFormat,
    /// Leave the thumbnail directory in place on exit
    pub keep: bool,
    /// tracing filter directive (from config file)
    pub log_level: String,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        Self::parse(env::args().skip(1))
    }

    /// Parse arguments (program name already stripped)
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args: Vec<String> = args.into_iter().collect();

        // --config has to be known before anything else is merged
        let config_file = match args.iter().position(|a| a == "--config") {
            Some(i) => {
                let path = args
                    .get(i + 1)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                args.drain(i..=i + 1);
                ConfigFile::load_from(&PathBuf::from(path))?
            }
            None => ConfigFile::load(),
        };

        let mut thumbnails = config_file.thumbnail_config();
        let mut output_format = OutputFormat::default();
        let mut keep = false;
        let mut paths = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--size" | "-s" => {
                    thumbnails.size = parse_value(&arg, args.next())?;
                    if thumbnails.size == 0 {
                        anyhow::bail!("--size must be greater than 0");
                    }
                }
                "--threshold" | "-t" => thumbnails.threshold = parse_value(&arg, args.next())?,
                "--thumb-dir" => {
                    thumbnails.thumb_dir = Some(PathBuf::from(require(&arg, args.next())?))
                }
                "--overlay" => {
                    thumbnails.play_overlay = Some(PathBuf::from(require(&arg, args.next())?))
                }
                "--timeout" => {
                    let secs: u64 = parse_value(&arg, args.next())?;
                    thumbnails.tool_timeout = Duration::from_secs(secs);
                }
                "--format" | "-f" => {
                    let fmt = require(&arg, args.next())?;
                    output_format = OutputFormat::from_str(&fmt).map_err(|_| {
                        anyhow::anyhow!("Invalid format '{}'. Valid formats: lines, json", fmt)
                    })?;
                }
                "--keep" => keep = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(exit_code::SUCCESS);
                }
                "--version" | "-V" => {
                    println!("thumbview {}", env!("CARGO_PKG_VERSION"));
                    std::process::exit(exit_code::SUCCESS);
                }
                path if !path.starts_with('-') => paths.push(PathBuf::from(path)),
                unknown => {
                    anyhow::bail!(
                        "Unknown option: {}. Use --help for usage information.",
                        unknown
                    );
                }
            }
        }

        if thumbnails.tool_timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0 seconds");
        }

        if paths.is_empty() {
            anyhow::bail!("No paths given. Use --help for usage information.");
        }

        Ok(Self {
            paths,
            thumbnails,
            output_format,
            keep,
            log_level: config_file.logging.level,
        })
    }
}

fn require(flag: &str, value: Option<String>) -> anyhow::Result<String> {
    value.ok_or_else(|| anyhow::anyhow!("{} requires a value", flag))
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> anyhow::Result<T> {
    let value = require(flag, value)?;
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} requires a number, got '{}'", flag, value))
}

fn print_help() {
    println!(
        r#"thumbview - resolve file browser thumbnails

USAGE:
    thumbview [OPTIONS] <PATH>...

Prints one line per path: the thumbnail to show, or icon:folder / icon:file.

OPTIONS:
    -s, --size <N>          Thumbnail size in pixels (default: 64)
    -t, --threshold <N>     Skip thumbnails in directories with more than N
                            entries (0 = never, negative = always show)
        --thumb-dir <DIR>   Directory for generated thumbnails
        --overlay <FILE>    Image composited over video frames
        --timeout <SECS>    Kill a frame extractor after SECS seconds
    -f, --format <FMT>      Output format: lines (default), json
        --keep              Keep generated thumbnails on exit
        --config <FILE>     Read settings from FILE instead of
                            ~/.config/thumbview/config.toml
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT:
    RUST_LOG                Diagnostic log filter, e.g. thumbview=debug"#
    );
}
