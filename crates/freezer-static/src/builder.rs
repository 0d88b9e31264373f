//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::{copy_dir, redirect_document, reset_dir};
use crate::context::MockContext;
use crate::links::{Layout, LinkRewriter};
use crate::routes::{default_pages, RouteTable};
use crate::templates::TemplateEngine;

/// Subdirectory holding the nested preview copy of every page.
pub const PREVIEW_DIR: &str = "templates";

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source templates directory
    pub templates_dir: PathBuf,

    /// Source assets directory, copied verbatim if present
    pub static_dir: PathBuf,

    /// Output directory, rebuilt from scratch on every run
    pub output_dir: PathBuf,

    /// Name of the assets directory inside the output and in `url_for('static')`
    pub asset_dir_name: String,

    /// Templates to render, in order
    pub pages: Vec<String>,

    /// Endpoint to filename mapping
    pub routes: RouteTable,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("site"),
            asset_dir_name: "static".to_string(),
            pages: default_pages(),
            routes: RouteTable::default(),
        }
    }
}

/// A page left out of the build.
#[derive(Debug, Clone)]
pub struct SkippedPage {
    /// Template name
    pub template: String,

    /// Why it was skipped
    pub reason: String,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Root-layout files written, in page order
    pub pages: Vec<PathBuf>,

    /// Templates that failed to load or render
    pub skipped: Vec<SkippedPage>,

    /// Number of asset files copied, `None` when there was no assets directory
    pub assets_copied: Option<usize>,

    /// Whether the root redirect page was written
    pub redirect_written: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid asset directory name {0:?}")]
    InvalidAssetDir(String),

    #[error("Failed to reset output directory {path}: {source}")]
    Reset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy assets from {path}: {source}")]
    CopyAssets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
    links: LinkRewriter,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let context = MockContext::new(config.routes.clone(), config.asset_dir_name.clone());
        let templates = TemplateEngine::new(&config.templates_dir, &context);
        let links = LinkRewriter::new(PREVIEW_DIR, &config.asset_dir_name);

        Self {
            config,
            templates,
            links,
        }
    }

    /// Build the static site.
    ///
    /// Stages run once each, in order: reset the output directory, render
    /// every page, copy assets, write the root redirect. A page that fails
    /// to load or render is skipped; the remaining stages still run.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output_dir = &self.config.output_dir;

        // An empty name would turn every `href="/` into `href="..//`.
        if self.config.asset_dir_name.trim_matches('/').is_empty() {
            return Err(BuildError::InvalidAssetDir(
                self.config.asset_dir_name.clone(),
            ));
        }

        reset_dir(output_dir).map_err(|source| BuildError::Reset {
            path: output_dir.clone(),
            source,
        })?;

        let mut pages = Vec::new();
        let mut skipped = Vec::new();

        for template in &self.config.pages {
            let html = match self.templates.render(template) {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", template, e);
                    skipped.push(SkippedPage {
                        template: template.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            pages.push(self.write_page(template, &html)?);
        }

        let assets_copied = self.copy_assets()?;
        let redirect_written = self.write_redirect();

        Ok(BuildResult {
            pages,
            skipped,
            assets_copied,
            redirect_written,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: output_dir.clone(),
        })
    }

    /// Write both layouts of a rendered page, returning the root-layout path.
    fn write_page(&self, template: &str, html: &str) -> Result<PathBuf, BuildError> {
        let filename = self.config.routes.output_name(template);

        let root_path = self.config.output_dir.join(&filename);
        write_file(&root_path, &self.links.rewrite(html, Layout::Root))?;
        tracing::info!("Wrote {}", root_path.display());

        let preview_path = self.config.output_dir.join(PREVIEW_DIR).join(&filename);
        write_file(&preview_path, &self.links.rewrite(html, Layout::Preview))?;
        tracing::info!("Wrote {}", preview_path.display());

        Ok(root_path)
    }

    /// Copy the assets directory into the output, if there is one.
    fn copy_assets(&self) -> Result<Option<usize>, BuildError> {
        let source = &self.config.static_dir;
        if !source.is_dir() {
            tracing::warn!(
                "No assets directory at {}; skipping copy",
                source.display()
            );
            return Ok(None);
        }

        let dest = self.config.output_dir.join(&self.config.asset_dir_name);
        let count = copy_dir(source, &dest).map_err(|e| BuildError::CopyAssets {
            path: source.clone(),
            source: e,
        })?;
        tracing::info!("Copied {} assets to {}", count, dest.display());

        Ok(Some(count))
    }

    /// Overwrite the root index with a redirect to the preview home page.
    fn write_redirect(&self) -> bool {
        let target = format!("{}/{}", PREVIEW_DIR, self.config.routes.home());
        let path = self.config.output_dir.join("index.html");

        match fs::write(&path, redirect_document(&target)) {
            Ok(()) => {
                tracing::info!("Wrote redirect {} -> {}", path.display(), target);
                true
            }
            Err(e) => {
                tracing::error!("Failed to write redirect {}: {}", path.display(), e);
                false
            }
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    let io_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
