//! Static site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use freezer_static::{BuildConfig, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (freezer.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    assets: AssetsConfig,
}

#[derive(Debug, Deserialize)]
struct PathsConfig {
    #[serde(default = "default_templates")]
    templates: String,
    #[serde(default = "default_static", rename = "static")]
    static_dir: String,
    #[serde(default = "default_output")]
    output: String,
}

#[derive(Debug, Deserialize)]
struct AssetsConfig {
    #[serde(default = "default_static")]
    dir_name: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            static_dir: default_static(),
            output: default_output(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir_name: default_static(),
        }
    }
}

fn default_templates() -> String {
    "templates".to_string()
}
fn default_static() -> String {
    "static".to_string()
}
fn default_output() -> String {
    "site".to_string()
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

fn build_config(file: ConfigFile, output: Option<PathBuf>) -> BuildConfig {
    BuildConfig {
        templates_dir: PathBuf::from(file.paths.templates),
        static_dir: PathBuf::from(file.paths.static_dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(file.paths.output)),
        asset_dir_name: file.assets.dir_name,
        ..Default::default()
    }
}

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = build_config(load_config(config_path)?, output);

    tracing::info!(
        "Building static site from {}...",
        config.templates_dir.display()
    );

    let result = StaticBuilder::new(config).build()?;

    tracing::info!(
        "Built {} pages ({} skipped) in {}ms",
        result.pages.len(),
        result.skipped.len(),
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
