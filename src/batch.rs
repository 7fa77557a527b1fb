//! Batch generation: one badge per descriptor entry.
//!
//! Entries are processed in order. Each entry loads its own assets, is
//! composed in memory, encoded, and written through a temporary file that is
//! renamed into place, so an entry yields either a complete `{id}.png` or no
//! file at all. An entry that fails (network error, bad id, write error) is
//! recorded in the [`BatchReport`] and the batch moves on to the next one.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde::Deserialize;

use crate::assets::{self, fonts, AssetResolver};
use crate::compositor::{self, raster, Badge, PanelKind};
use crate::{Error, GeneratorConfig, Result};

fn default_id() -> String {
    "unk".to_string()
}

fn default_title() -> String {
    "NoTitle".to_string()
}

/// One record of the batch descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchEntry {
    /// Output file stem
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Icon path or URL; `None` uses the configured default icon
    #[serde(default)]
    pub icon: Option<String>,
}

impl BatchEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), subtitle: subtitle.into(), icon: None }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Parse a descriptor: a JSON array of entry objects.
pub fn parse_descriptor(bytes: &[u8]) -> Result<Vec<BatchEntry>> {
    serde_json::from_slice(bytes).map_err(|e| Error::DescriptorError(e.to_string()))
}

/// Reject ids that are empty or would escape the output directory.
pub fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidEntry("empty id".into()));
    }
    if id.contains('/') || id.contains('\\') || id == "." || id == ".." {
        return Err(Error::InvalidEntry(format!("id {:?} is not a plain file name", id)));
    }
    Ok(())
}

/// A badge that was written to disk.
#[derive(Debug, Clone)]
pub struct WrittenBadge {
    pub id: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub panel: PanelKind,
    /// Hex SHA-256 of the PNG bytes
    pub sha256: String,
}

/// An entry that produced no output.
#[derive(Debug, Clone)]
pub struct FailedEntry {
    pub id: String,
    pub error: String,
}

/// Outcome of a batch run, in descriptor order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub generated: Vec<WrittenBadge>,
    pub failed: Vec<FailedEntry>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ties a configuration to its asset resolver.
pub struct Generator {
    config: GeneratorConfig,
    resolver: Box<dyn AssetResolver>,
}

impl Generator {
    /// Create a generator with the resolver selected by `config`.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let resolver = assets::new_resolver(&config)?;
        Ok(Self::with_resolver(config, resolver))
    }

    pub fn with_resolver(config: GeneratorConfig, resolver: Box<dyn AssetResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolver(&self) -> &dyn AssetResolver {
        self.resolver.as_ref()
    }

    /// Load the entry's assets and compose its badge in memory.
    pub fn render_entry(&self, entry: &BatchEntry) -> Result<Badge> {
        let resolver = self.resolver.as_ref();
        let icon_path = entry.icon.as_deref().unwrap_or(&self.config.default_icon);

        let icon = assets::load_icon(resolver, icon_path)?;
        let slices = assets::load_slices(resolver, &self.config.slice_dir)?;
        let faces = assets::load_faces(resolver, &fonts::font_chain(&self.config));

        compositor::compose(
            &entry.title,
            &entry.subtitle,
            &icon,
            slices.as_ref(),
            faces.title.as_ref(),
            faces.subtitle.as_ref(),
        )
    }

    /// Render `entry` and write it to `out_path` atomically.
    pub fn render_to_file(&self, entry: &BatchEntry, out_path: &Path) -> Result<WrittenBadge> {
        let badge = self.render_entry(entry)?;
        let png = raster::encode_png(&badge.image)?;
        write_atomic(out_path, &png)?;

        let written = WrittenBadge {
            id: entry.id.clone(),
            path: out_path.to_path_buf(),
            width: badge.width(),
            height: badge.height(),
            panel: badge.panel,
            sha256: raster::sha256_hex(&png),
        };
        info!("Saved {} ({}x{}, {:?} panel)", written.path.display(), written.width, written.height, written.panel);
        Ok(written)
    }

    /// Read the descriptor at `descriptor_path` through the asset source and
    /// generate every entry into the configured output directory.
    pub fn generate_all(&self, descriptor_path: &str) -> Result<BatchReport> {
        let bytes = self.resolver.resolve(descriptor_path)?;
        let entries = parse_descriptor(&bytes)?;
        info!("{} entries in {} ({})", entries.len(), descriptor_path, self.resolver.describe());
        self.generate_entries(&entries)
    }

    /// Generate the given entries into the configured output directory.
    pub fn generate_entries(&self, entries: &[BatchEntry]) -> Result<BatchReport> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let mut report = BatchReport::default();
        for entry in entries {
            let result = validate_id(&entry.id).and_then(|_| {
                let out = self.config.output_dir.join(format!("{}.png", entry.id));
                self.render_to_file(entry, &out)
            });
            match result {
                Ok(written) => report.generated.push(written),
                Err(e) => {
                    error!("skipping {}: {}", entry.id, e);
                    report.failed.push(FailedEntry { id: entry.id.clone(), error: e.to_string() });
                }
            }
        }
        Ok(report)
    }
}

/// Same mode `File::create` uses; the process umask still applies.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o666;

/// Write `bytes` to a temporary file next to `path`, then rename it over
/// `path`. Readers never observe a partially written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".toastforge-").suffix(".tmp");
    // Temp files are created 0600 otherwise.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(OUTPUT_MODE));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::{write_png, write_slices, Unreachable};
    use crate::assets::LocalResolver;
    use crate::AssetSource;

    fn local_config(root: &Path) -> GeneratorConfig {
        GeneratorConfig {
            asset_source: AssetSource::Local { root: root.to_path_buf() },
            system_fonts: vec![],
            output_dir: root.join("out"),
            ..Default::default()
        }
    }

    #[test]
    fn descriptor_defaults_fill_missing_fields() {
        let entries = parse_descriptor(br#"[{"id":"a","title":"A"},{"extra":1}]"#).unwrap();
        assert_eq!(entries[0], BatchEntry::new("a", "A", ""));
        assert_eq!(entries[1].id, "unk");
        assert_eq!(entries[1].title, "NoTitle");
        assert!(entries[1].icon.is_none());
    }

    #[test]
    fn descriptor_must_be_an_array() {
        assert!(matches!(parse_descriptor(br#"{"id":"a"}"#), Err(Error::DescriptorError(_))));
        assert!(matches!(parse_descriptor(b"not json"), Err(Error::DescriptorError(_))));
    }

    #[test]
    fn ids_cannot_escape_output_dir() {
        assert!(validate_id("first_steps").is_ok());
        for bad in ["", "  ", "../x", "a/b", "a\\b", ".."] {
            assert!(validate_id(bad).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn render_uses_nine_slice_when_all_tiles_exist() {
        let tmp = tempfile::tempdir().unwrap();
        write_slices(&tmp.path().join("assets/achievement"), 4);
        write_png(&tmp.path().join("icons/a.png"), 16, 16, [0, 255, 0, 255]);

        let gen = Generator::new(local_config(tmp.path())).unwrap();
        let badge = gen.render_entry(&BatchEntry::new("a", "Hello", "World").with_icon("icons/a.png")).unwrap();
        assert_eq!(badge.panel, PanelKind::NineSlice);
        assert_eq!(badge.layout.icon.width, 16);
    }

    #[test]
    fn render_falls_back_without_slices() {
        let tmp = tempfile::tempdir().unwrap();
        let gen = Generator::new(local_config(tmp.path())).unwrap();
        let badge = gen.render_entry(&BatchEntry::new("a", "Hello", "")).unwrap();
        assert_eq!(badge.panel, PanelKind::Rounded);
        assert_eq!(badge.layout.icon.width, compositor::PLACEHOLDER_ICON_SIZE);
    }

    #[test]
    fn failed_entries_are_skipped_and_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let gen = Generator::new(local_config(tmp.path())).unwrap();
        let entries = vec![
            BatchEntry::new("good", "Good", ""),
            BatchEntry::new("../evil", "Evil", ""),
            BatchEntry::new("also_good", "Also good", "x"),
        ];
        let report = gen.generate_entries(&entries).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "../evil");
        assert!(tmp.path().join("out/good.png").exists());
        assert!(tmp.path().join("out/also_good.png").exists());
    }

    #[test]
    fn network_failure_produces_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = local_config(tmp.path());
        let gen = Generator::with_resolver(cfg, Box::new(Unreachable));
        let report = gen.generate_entries(&[BatchEntry::new("n", "N", "")]).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert!(!tmp.path().join("out/n.png").exists());
        let leftovers: Vec<_> = std::fs::read_dir(tmp.path().join("out")).unwrap().collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn descriptor_is_read_through_resolver() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("list.json"), br#"[{"id":"one","title":"One"}]"#).unwrap();
        let gen = Generator::with_resolver(local_config(tmp.path()), Box::new(LocalResolver::new(tmp.path())));
        let report = gen.generate_all("list.json").unwrap();
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.generated[0].path, tmp.path().join("out/one.png"));
        assert_eq!(report.generated[0].sha256.len(), 64);
    }

    #[test]
    fn missing_descriptor_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let gen = Generator::new(local_config(tmp.path())).unwrap();
        assert!(gen.generate_all("nope.json").unwrap_err().is_missing());
    }

    #[cfg(unix)]
    #[test]
    fn written_badges_have_plain_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let gen = Generator::new(local_config(tmp.path())).unwrap();
        let report = gen.generate_entries(&[BatchEntry::new("shared", "Shared", "")]).unwrap();
        assert!(report.is_success());

        let plain = tmp.path().join("out/plain.bin");
        std::fs::write(&plain, b"x").unwrap();
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&report.generated[0].path), mode(&plain));
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("x.png");
        std::fs::write(&p, b"old").unwrap();
        write_atomic(&p, b"new").unwrap();
        assert_eq!(std::fs::read(&p).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
