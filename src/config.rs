//! Configuration for the metaimage command-line tool.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `METAIMAGE_` prefix.
//!
//! # Example
//!
//! ```ignore
//! use metaimage::config::Config;
//!
//! let config = Config::parse();
//! for path in &config.paths {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `METAIMAGE_MAX_SIZE` - Largest file accepted, in bytes (default: 50 MiB)
//! - `METAIMAGE_OUTPUT` - Output format, `text` or `json` (default: text)
//! - `METAIMAGE_PREVIEW_DIR` - Directory for extracted RAW previews

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::io::DEFAULT_MAX_FILE_SIZE;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Output format for inspection results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned plain text
    #[default]
    Text,
    /// One JSON document per file
    Json,
}

/// metaimage - EXIF metadata and RAW preview inspector.
///
/// Decodes camera, GPS and authoring metadata from JPEG, TIFF and camera RAW
/// files, and extracts the embedded JPEG preview from RAW files.
#[derive(Parser, Debug, Clone)]
#[command(name = "metaimage")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Image files to inspect.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Largest file accepted, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "METAIMAGE_MAX_SIZE")]
    pub max_size: u64,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "METAIMAGE_OUTPUT")]
    pub output: OutputFormat,

    /// Write the embedded preview of each RAW file into this directory
    /// as `<name>.preview.jpg`.
    #[arg(long, env = "METAIMAGE_PREVIEW_DIR")]
    pub preview_dir: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("At least one file path is required".to_string());
        }

        if self.max_size == 0 {
            return Err("max_size must be greater than 0".to_string());
        }

        if let Some(ref dir) = self.preview_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "Preview directory '{}' does not exist or is not a directory",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Destination of the extracted preview for `source`, when a preview
    /// directory is configured.
    pub fn preview_path(&self, source: &Path) -> Option<PathBuf> {
        let dir = self.preview_dir.as_ref()?;
        let stem = source.file_stem()?.to_string_lossy();
        Some(dir.join(format!("{stem}.preview.jpg")))
    }
}

// =============================================================================
// Tests
// =============================================================================
