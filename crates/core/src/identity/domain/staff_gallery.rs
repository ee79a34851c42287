use serde::{Deserialize, Serialize};

use crate::shared::embedding::Embedding;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffEntry {
    pub name: String,
    pub embedding: Embedding,
}

/// Known staff faces, one reference embedding per display name.
///
/// Entries keep insertion order; matching scans them in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffGallery {
    entries: Vec<StaffEntry>,
}

impl StaffGallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = StaffEntry>) -> Self {
        let mut gallery = Self::new();
        for entry in entries {
            gallery.insert(entry.name, entry.embedding);
        }
        gallery
    }

    /// Adds a staff member. Re-inserting a name replaces its embedding in place.
    pub fn insert(&mut self, name: impl Into<String>, embedding: Embedding) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.embedding = embedding,
            None => self.entries.push(StaffEntry { name, embedding }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[StaffEntry] {
        &self.entries
    }

    /// First entry in gallery order whose distance is below `threshold`.
    ///
    /// This is the first acceptable match, not the closest one: a later
    /// entry that is nearer never displaces an earlier one that qualifies.
    pub fn first_match(&self, embedding: &Embedding, threshold: f64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.embedding.distance(embedding) < threshold)
            .map(|e| e.name.as_str())
    }
}

/// Title-cases a file stem into a display name (`"maria lopez"` → `"Maria Lopez"`).
///
/// A letter is upper-cased when it follows a non-letter, lower-cased otherwise.
pub fn display_name_from_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut prev_alpha = false;
    for c in stem.trim().chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn emb(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec())
    }

    #[test]
    fn test_first_acceptable_not_closest() {
        let gallery = StaffGallery::from_entries([
            StaffEntry {
                name: "Ana".into(),
                embedding: emb(&[0.4, 0.0]),
            },
            StaffEntry {
                name: "Ben".into(),
                embedding: emb(&[0.05, 0.0]),
            },
        ]);
        // Ben is closer, but Ana comes first and is within threshold.
        assert_eq!(gallery.first_match(&emb(&[0.0, 0.0]), 0.5), Some("Ana"));
    }

    #[test]
    fn test_no_match_above_threshold() {
        let mut gallery = StaffGallery::new();
        gallery.insert("Ana", emb(&[1.0, 1.0]));
        assert_eq!(gallery.first_match(&emb(&[0.0, 0.0]), 0.5), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut gallery = StaffGallery::new();
        gallery.insert("Ana", emb(&[0.5, 0.0]));
        assert_eq!(gallery.first_match(&emb(&[0.0, 0.0]), 0.5), None);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut gallery = StaffGallery::new();
        gallery.insert("Ana", emb(&[1.0]));
        gallery.insert("Ben", emb(&[2.0]));
        gallery.insert("Ana", emb(&[3.0]));
        assert_eq!(gallery.names(), vec!["Ana", "Ben"]);
        assert_eq!(gallery.entries()[0].embedding, emb(&[3.0]));
    }

    #[test]
    fn test_empty_gallery_never_matches() {
        let gallery = StaffGallery::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.first_match(&emb(&[0.0]), 10.0), None);
    }

    #[rstest]
    #[case::lowercase("maria lopez", "Maria Lopez")]
    #[case::uppercase("JOHN", "John")]
    #[case::padded("  chef ", "Chef")]
    #[case::apostrophe("o'neil", "O'Neil")]
    #[case::underscore("anna_b", "Anna_B")]
    fn test_display_name_from_stem(#[case] stem: &str, #[case] expected: &str) {
        assert_eq!(display_name_from_stem(stem), expected);
    }
}
