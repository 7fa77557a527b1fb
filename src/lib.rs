//! Toastforge
//!
//! Renders Minecraft-style achievement toasts: a nine-slice panel, an icon
//! and two lines of text, composed into one PNG per entry of a JSON list.
//!
//! # Features
//!
//! - **Nine-slice panels** with a rounded-rectangle fallback when the slice
//!   set is incomplete
//! - **Pluggable asset sources**: local disk, or a remote raw-file repository
//!   over HTTP (feature `remote`, on by default)
//! - **Deterministic output**: same inputs, byte-identical PNG
//!
//! # Example
//!
//! ```no_run
//! use toastforge::{BatchEntry, Generator, GeneratorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(GeneratorConfig::default())?;
//! let entry = BatchEntry::new("first_steps", "First Steps", "Open your inventory");
//! let written = generator.render_to_file(&entry, "generated/first_steps.png".as_ref())?;
//! println!("{} ({})", written.path.display(), written.sha256);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod assets;
pub mod batch;
pub mod compositor;

pub use assets::{new_resolver, AssetResolver, LocalResolver};
pub use batch::{BatchEntry, BatchReport, Generator, WrittenBadge};
pub use compositor::{compose, Badge, PanelKind, SliceSet};

/// Raw-file root of the public asset repository.
pub const DEFAULT_REMOTE_BASE: &str = "https://raw.githubusercontent.com/epic-tm/uc/main/";
/// Directory holding the nine slice tiles.
pub const DEFAULT_SLICE_DIR: &str = "assets/achievement";
/// Icon used by entries that do not name one.
pub const DEFAULT_ICON: &str = "assets/icons/icon_pickaxe.png";
/// Font shipped in the asset repository.
pub const DEFAULT_FONT: &str = "assets/fonts/Minecraft.ttf";
/// Output directory for batch runs.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Where assets are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Paths are relative to `root` on local disk.
    Local { root: PathBuf },
    /// Paths are joined onto `base_url` and fetched over HTTP.
    Remote { base_url: String },
}

impl Default for AssetSource {
    fn default() -> Self {
        AssetSource::Local { root: PathBuf::from(".") }
    }
}

/// Configuration for a [`Generator`]
///
/// Defaults read assets from the current directory, fall back to the
/// DejaVu system font, and write into `generated/`.
///
/// # Examples
///
/// ```
/// let cfg = toastforge::GeneratorConfig::default();
/// assert_eq!(cfg.slice_dir, "assets/achievement");
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Local directory or remote base URL for every asset
    pub asset_source: AssetSource,
    /// Font resolved through the asset source; tried before system fonts
    pub font_path: Option<String>,
    /// Local font files tried after `font_path`
    pub system_fonts: Vec<PathBuf>,
    /// Directory (within the asset source) holding the slice tiles
    pub slice_dir: String,
    /// Icon for entries without one
    pub default_icon: String,
    /// Directory batch output is written to
    pub output_dir: PathBuf,
    /// HTTP timeout for remote assets in milliseconds
    pub timeout_ms: u64,
    /// User agent sent with remote requests
    pub user_agent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            asset_source: AssetSource::default(),
            font_path: None,
            system_fonts: vec![PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")],
            slice_dir: DEFAULT_SLICE_DIR.to_string(),
            default_icon: DEFAULT_ICON.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_ms: 30000,
            user_agent: format!("toastforge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GeneratorConfig {
    /// Configuration for the remote asset repository at `base_url`, using the
    /// repository's bundled font.
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            asset_source: AssetSource::Remote { base_url: base_url.into() },
            font_path: Some(DEFAULT_FONT.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.asset_source, AssetSource::Local { root: PathBuf::from(".") });
        assert_eq!(config.output_dir, PathBuf::from("generated"));
        assert_eq!(config.default_icon, DEFAULT_ICON);
        assert!(config.font_path.is_none());
    }

    #[test]
    fn test_remote_config() {
        let config = GeneratorConfig::remote(DEFAULT_REMOTE_BASE);
        assert_eq!(
            config.asset_source,
            AssetSource::Remote { base_url: DEFAULT_REMOTE_BASE.to_string() }
        );
        assert_eq!(config.font_path.as_deref(), Some(DEFAULT_FONT));
    }
}
