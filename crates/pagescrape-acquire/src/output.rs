use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Cache raw HTML to the output directory for debugging selectors.
///
/// Lets the page be re-examined without fetching it again.
pub fn cache_html(output_dir: &Path, html: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("raw.html");
    fs::write(&path, html)?;
    tracing::info!(path = %path.display(), bytes = html.len(), "Cached raw HTML");
    Ok(path)
}
