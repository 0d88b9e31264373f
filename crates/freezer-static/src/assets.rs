//! Filesystem helpers for the output tree.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Remove `dir` if it exists, then recreate it empty.
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        tracing::info!("Cleaning existing {}", dir.display());
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// Symlinks are followed, so linked directories are copied as real ones.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// A minimal page that forwards the browser to `target`.
pub fn redirect_document(target: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="robots" content="noindex">
  <meta http-equiv="refresh" content="0; url={target}">
  <title>Redirecting</title>
</head>
<body>
  <p>Redirecting to <a href="{target}">{target}</a></p>
  <script>window.location.replace("{target}");</script>
</body>
</html>
"#
    )
}
