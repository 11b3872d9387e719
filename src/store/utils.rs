//! Store utility functions.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use tempfile::NamedTempFile;

/// Generate a 32-character hex id for stored records and blobs.
pub fn generate_entity_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Check that `id` looks like one produced by [`generate_entity_id`].
///
/// Blob ids become file names, so anything else is refused before it
/// reaches the filesystem.
pub fn is_entity_id(id: &str) -> bool {
    id.len() == 32 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Get current datetime as string in SQLite format
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Replace `path` with `bytes` so readers see either the old or the new file.
///
/// The temp file is created next to the target, which keeps the final rename
/// on one filesystem.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid_and_unique() {
        let a = generate_entity_id();
        let b = generate_entity_id();
        assert!(is_entity_id(&a));
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_path_like_ids() {
        assert!(!is_entity_id("../../etc/passwd"));
        assert!(!is_entity_id(""));
        assert!(!is_entity_id(&"g".repeat(32)));
    }

    #[test]
    fn timestamp_has_sqlite_shape() {
        let ts = current_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn write_atomic_replaces_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("file.json");

        write_atomic(&path, b"[1]").unwrap();
        write_atomic(&path, b"[2]").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"[2]");
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
