//! Asset resolution and loading.
//!
//! An [`AssetResolver`] turns an asset path into bytes. Which resolver is used
//! (local disk or a remote raw-file repository) is decided once from the
//! [`GeneratorConfig`](crate::GeneratorConfig); everything downstream only sees
//! the trait. The loaders in this module apply the fallback rules: missing
//! icons become a placeholder, an incomplete slice set becomes `None`.

pub mod fonts;
#[cfg(feature = "remote")]
pub mod remote;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, warn};

use crate::compositor::{placeholder_icon, SliceSet};
use crate::{AssetSource, Error, GeneratorConfig, Result};

pub use fonts::{load_faces, FontAttempt, Faces};
#[cfg(feature = "remote")]
pub use remote::RemoteResolver;

/// Resolves an asset path (relative to the source root, or an absolute URL
/// for remote sources) to its raw bytes.
pub trait AssetResolver {
    fn resolve(&self, path: &str) -> Result<Vec<u8>>;

    /// Where assets come from, for logs.
    fn describe(&self) -> String;
}

/// Build the resolver selected by `config.asset_source`.
pub fn new_resolver(config: &GeneratorConfig) -> Result<Box<dyn AssetResolver>> {
    match &config.asset_source {
        AssetSource::Local { root } => Ok(Box::new(LocalResolver::new(root.clone()))),
        #[cfg(feature = "remote")]
        AssetSource::Remote { base_url } => Ok(Box::new(RemoteResolver::new(
            base_url,
            config.timeout_ms,
            &config.user_agent,
        )?)),
        #[cfg(not(feature = "remote"))]
        AssetSource::Remote { base_url } => Err(Error::ConfigError(format!(
            "remote asset source {} requires the `remote` feature",
            base_url
        ))),
    }
}

/// Whether `path` is an absolute http(s) URL. The scheme is case-insensitive.
pub(crate) fn is_url(path: &str) -> bool {
    let has_scheme = |scheme: &str| {
        path.get(..scheme.len()).is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    };
    has_scheme("http://") || has_scheme("https://")
}

/// Reads assets from a directory on local disk.
#[derive(Debug, Clone)]
pub struct LocalResolver {
    root: PathBuf,
}

impl LocalResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for LocalResolver {
    fn resolve(&self, path: &str) -> Result<Vec<u8>> {
        if is_url(path) {
            return Err(Error::AssetNotFound(format!(
                "{} (URLs need a remote asset source)",
                path
            )));
        }
        let full = self.root.join(path);
        debug!("reading {}", full.display());
        std::fs::read(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::AssetNotFound(full.display().to_string()),
            _ => Error::Io(e),
        })
    }

    fn describe(&self) -> String {
        format!("local:{}", self.root().display())
    }
}

/// Decode image bytes of any supported format into RGBA.
pub fn decode_image(bytes: &[u8], label: &str) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| Error::DecodeError(format!("{}: {}", label, e)))
}

pub fn load_image(resolver: &dyn AssetResolver, path: &str) -> Result<RgbaImage> {
    let bytes = resolver.resolve(path)?;
    decode_image(&bytes, path)
}

/// Load an icon, substituting the placeholder when it is missing, unreadable
/// or empty. Network failures are returned.
pub fn load_icon(resolver: &dyn AssetResolver, path: &str) -> Result<RgbaImage> {
    match load_image(resolver, path) {
        Ok(icon) if icon.width() > 0 && icon.height() > 0 => Ok(icon),
        Ok(_) => {
            warn!("icon {} is empty; using placeholder", path);
            Ok(placeholder_icon())
        }
        Err(e @ Error::NetworkError(_)) => Err(e),
        Err(e) => {
            warn!("icon {} unavailable ({}); using placeholder", path, e);
            Ok(placeholder_icon())
        }
    }
}

/// Load all nine tiles from `dir`.
///
/// Returns `Ok(None)` when any tile is missing, undecodable or misaligned, so
/// the caller draws the rounded fallback instead. Network failures are
/// returned.
pub fn load_slices(resolver: &dyn AssetResolver, dir: &str) -> Result<Option<SliceSet>> {
    let dir = dir.trim_end_matches('/');
    let loaded = SliceSet::try_from_fn(|name| {
        let path = if dir.is_empty() {
            name.file_name().to_string()
        } else {
            format!("{}/{}", dir, name.file_name())
        };
        load_image(resolver, &path)
    });

    match loaded {
        Ok(set) => Ok(Some(set)),
        Err(e @ Error::NetworkError(_)) => Err(e),
        Err(e) => {
            warn!("slice set under {} unusable ({}); using rounded panel", dir, e);
            Ok(None)
        }
    }
}
