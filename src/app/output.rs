//! Result output for the command line

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::core::Thumbnail;

/// Output format for resolved entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `path<TAB>thumbnail` per line (default)
    #[default]
    Lines,
    /// JSON array of objects
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    path: String,
    thumbnail: String,
    kind: &'a str,
}

/// Write `(source, result)` pairs to `out`
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[(PathBuf, Thumbnail)],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Lines => {
            for (path, thumb) in results {
                writeln!(out, "{}\t{}", path.display(), thumb)?;
            }
        }
        OutputFormat::Json => {
            let records: Vec<JsonRecord> = results
                .iter()
                .map(|(path, thumb)| JsonRecord {
                    path: path.display().to_string(),
                    thumbnail: match thumb {
                        Thumbnail::Path(p) => p.display().to_string(),
                        Thumbnail::Icon(icon) => icon.id().to_string(),
                    },
                    kind: thumb.kind(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    out.flush()
}
