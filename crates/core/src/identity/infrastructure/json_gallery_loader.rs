use std::fs;
use std::path::Path;

use crate::identity::domain::staff_gallery::{display_name_from_stem, StaffEntry, StaffGallery};
use crate::shared::error::CoreError;

/// Loads a staff gallery from a JSON array of `{ "name", "embedding" }`.
pub struct JsonGalleryLoader;

impl JsonGalleryLoader {
    /// Names are title-cased. Entries with an empty embedding are skipped.
    pub fn load(path: &Path) -> Result<StaffGallery, CoreError> {
        let json = fs::read_to_string(path)?;
        let raw: Vec<StaffEntry> = serde_json::from_str(&json)?;

        let mut gallery = StaffGallery::new();
        for entry in raw {
            if entry.embedding.is_empty() {
                log::warn!("Skipping staff '{}': empty embedding", entry.name);
                continue;
            }
            gallery.insert(display_name_from_stem(&entry.name), entry.embedding);
        }
        log::info!(
            "Loaded {} staff faces from {}: {:?}",
            gallery.len(),
            path.display(),
            gallery.names()
        );
        Ok(gallery)
    }

    /// Like [`JsonGalleryLoader::load`], but a missing or unreadable file
    /// disables staff recognition instead of failing.
    pub fn load_or_disabled(path: Option<&Path>) -> Option<StaffGallery> {
        let path = path?;
        match Self::load(path) {
            Ok(gallery) if gallery.is_empty() => {
                log::warn!("Staff gallery {} is empty, staff recognition disabled", path.display());
                None
            }
            Ok(gallery) => Some(gallery),
            Err(e) => {
                log::warn!(
                    "Could not load staff gallery {}: {e}. Staff recognition disabled",
                    path.display()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::embedding::Embedding;

    fn write(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("staff.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_normalizes_names_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"[{"name": "maria lopez", "embedding": [0.1, 0.2]},
                {"name": "TOM", "embedding": [0.3, 0.4]}]"#,
        );
        let gallery = JsonGalleryLoader::load(&path).unwrap();
        assert_eq!(gallery.names(), vec!["Maria Lopez", "Tom"]);
        assert_eq!(gallery.entries()[0].embedding, Embedding::new(vec![0.1, 0.2]));
    }

    #[test]
    fn test_empty_embedding_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"[{"name": "ghost", "embedding": []}, {"name": "ana", "embedding": [1.0]}]"#,
        );
        let gallery = JsonGalleryLoader::load(&path).unwrap();
        assert_eq!(gallery.names(), vec!["Ana"]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"name": "not an array"}"#);
        assert!(matches!(
            JsonGalleryLoader::load(&path).unwrap_err(),
            CoreError::Json(_)
        ));
    }

    #[test]
    fn test_missing_file_degrades_to_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(JsonGalleryLoader::load_or_disabled(Some(&missing)).is_none());
        assert!(JsonGalleryLoader::load_or_disabled(None).is_none());
    }

    #[test]
    fn test_valid_file_is_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"[{"name": "ana", "embedding": [1.0]}]"#);
        let gallery = JsonGalleryLoader::load_or_disabled(Some(&path)).unwrap();
        assert_eq!(gallery.len(), 1);
    }
}
