use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use toastforge::{AssetSource, BatchEntry, Generator, GeneratorConfig, DEFAULT_REMOTE_BASE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render achievement toast badges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one badge per entry of a JSON descriptor
    Generate {
        /// Descriptor path, resolved through the asset source
        descriptor: String,
        /// Output directory
        #[arg(long, short, default_value = toastforge::DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
        #[command(flatten)]
        assets: AssetArgs,
    },
    /// Render a single badge
    Render {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        subtitle: String,
        /// Icon path or URL (defaults to the placeholder icon)
        #[arg(long)]
        icon: Option<String>,
        /// Output PNG file
        #[arg(long, short)]
        output: PathBuf,
        #[command(flatten)]
        assets: AssetArgs,
    },
}

#[derive(Args, Debug)]
struct AssetArgs {
    /// Fetch assets over HTTP instead of reading local files
    #[arg(long)]
    remote: bool,
    /// Base URL for remote assets
    #[arg(long, default_value = DEFAULT_REMOTE_BASE)]
    base_url: String,
    /// Root directory for local assets
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Font path within the asset source
    #[arg(long)]
    font: Option<String>,
    /// Slice directory within the asset source
    #[arg(long, default_value = toastforge::DEFAULT_SLICE_DIR)]
    slices: String,
    /// HTTP timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,
}

impl AssetArgs {
    fn into_config(self) -> GeneratorConfig {
        let mut cfg = if self.remote {
            GeneratorConfig::remote(self.base_url)
        } else {
            GeneratorConfig {
                asset_source: AssetSource::Local { root: self.root },
                ..Default::default()
            }
        };
        if self.font.is_some() {
            cfg.font_path = self.font;
        }
        cfg.slice_dir = self.slices;
        cfg.timeout_ms = self.timeout_ms;
        cfg
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Generate { descriptor, out, assets } => {
            let mut cfg = assets.into_config();
            cfg.output_dir = out;
            let generator = Generator::new(cfg).context("failed to set up asset source")?;
            let report = generator
                .generate_all(&descriptor)
                .with_context(|| format!("batch {} failed", descriptor))?;

            println!(
                "Generated {} badge(s) in {}",
                report.generated.len(),
                generator.config().output_dir.display()
            );
            if !report.is_success() {
                for failed in &report.failed {
                    eprintln!("  failed {}: {}", failed.id, failed.error);
                }
                anyhow::bail!("{} of {} entries failed", report.failed.len(), report.failed.len() + report.generated.len());
            }
        }
        Command::Render { title, subtitle, icon, output, assets } => {
            let generator = Generator::new(assets.into_config()).context("failed to set up asset source")?;
            let stem = output
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "badge".to_string());
            let mut entry = BatchEntry::new(stem, title, subtitle);
            entry.icon = icon;
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
            }
            let written = generator
                .render_to_file(&entry, &output)
                .with_context(|| format!("render {:?}", output))?;
            println!("Saved {} ({})", written.path.display(), written.sha256);
        }
    }
    Ok(())
}
