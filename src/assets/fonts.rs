//! Font fallback chain.
//!
//! Faces are loaded by trying each [`FontAttempt`] in order and keeping the
//! first that succeeds. The built-in bitmap face always succeeds, so a chain
//! ending in [`FontAttempt::Builtin`] never fails.

use std::path::PathBuf;

use log::{debug, warn};

use super::AssetResolver;
use crate::compositor::text::{SUBTITLE_PX, TITLE_PX};
use crate::compositor::{BitmapFace, GlyphFace, TrueTypeFace};
use crate::{GeneratorConfig, Result};

/// One step of the font fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontAttempt {
    /// Font resolved through the asset source (local or remote).
    Asset(String),
    /// Font file on the local machine, regardless of asset source.
    File(PathBuf),
    /// The built-in bitmap face.
    Builtin,
}

impl FontAttempt {
    fn load(&self, resolver: &dyn AssetResolver) -> Result<Faces> {
        match self {
            FontAttempt::Asset(path) => Faces::from_font_bytes(resolver.resolve(path)?, path),
            FontAttempt::File(path) => {
                let bytes = std::fs::read(path)?;
                Faces::from_font_bytes(bytes, &path.display().to_string())
            }
            FontAttempt::Builtin => Ok(Faces::builtin()),
        }
    }
}

/// Title and subtitle faces.
pub struct Faces {
    pub title: Box<dyn GlyphFace>,
    pub subtitle: Box<dyn GlyphFace>,
}

impl Faces {
    pub fn builtin() -> Self {
        Self {
            title: Box::new(BitmapFace::for_px(TITLE_PX)),
            subtitle: Box::new(BitmapFace::for_px(SUBTITLE_PX)),
        }
    }

    pub fn from_font_bytes(bytes: Vec<u8>, label: &str) -> Result<Self> {
        let title = TrueTypeFace::from_bytes(bytes.clone(), TITLE_PX, label)?;
        let subtitle = TrueTypeFace::from_bytes(bytes, SUBTITLE_PX, label)?;
        Ok(Self { title: Box::new(title), subtitle: Box::new(subtitle) })
    }
}

/// Requested font, then system fonts, then the built-in face.
pub fn font_chain(config: &GeneratorConfig) -> Vec<FontAttempt> {
    let mut chain = Vec::new();
    if let Some(path) = &config.font_path {
        chain.push(FontAttempt::Asset(path.clone()));
    }
    chain.extend(config.system_fonts.iter().cloned().map(FontAttempt::File));
    chain.push(FontAttempt::Builtin);
    chain
}

/// Load faces from the first attempt that succeeds.
pub fn load_faces(resolver: &dyn AssetResolver, chain: &[FontAttempt]) -> Faces {
    for attempt in chain {
        match attempt.load(resolver) {
            Ok(faces) => {
                debug!("using font {}", faces.title.name());
                return faces;
            }
            Err(e) => warn!("font {:?} unavailable: {}", attempt, e),
        }
    }
    Faces::builtin()
}
