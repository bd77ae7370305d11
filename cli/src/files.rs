use std::path::Path;

use anyhow::{Context, Result};
use playground_core::FileSelection;

/// Read `path` into a `FileSelection`, guessing the MIME type from the
/// extension the way a browser file picker does.
pub fn read_file(path: &Path) -> Result<FileSelection> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = mime_guess::from_path(path).first_or_octet_stream();
    Ok(FileSelection::new(file_name, content_type.essence_str(), bytes))
}
