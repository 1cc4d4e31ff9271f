use crate::types::{
    error::{ImportError, Result},
    store::Store,
};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialises the store with sorted keys and two-space indentation.
///
/// `serde_json::Map` is a `BTreeMap` unless `preserve_order` is enabled, so
/// keys come out sorted at every level.
pub fn render_store(store: &Store) -> std::result::Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(store.as_value())?;
    text.push('\n');
    Ok(text)
}

/// Writes the store next to `path` and renames it into place, so readers
/// only ever see the old file or the complete new one.
pub fn save_store(path: &Path, store: &Store) -> Result<()> {
    let fail = |reason: String| ImportError::StoreSave {
        path: path.to_path_buf(),
        reason,
    };

    let text = render_store(store).map_err(|e| fail(format!("serialization failed: {}", e)))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .map_err(|e| fail(format!("failed to create {}: {}", parent.display(), e)))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| fail(format!("failed to create temporary file: {}", e)))?;
    write_fully(&mut tmp, text.as_bytes())
        .map_err(|e| fail(format!("failed to write temporary file: {}", e)))?;
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| fail(format!("failed to keep store permissions: {}", e)))?;
    }
    tmp.persist(path)
        .map_err(|e| fail(format!("failed to replace store: {}", e.error)))?;
    Ok(())
}

fn write_fully(tmp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()
}
