use indexmap::IndexMap;

use crate::shared::constants::{PERSON_TRACKING_THRESHOLD, STAFF_MATCH_THRESHOLD};
use crate::shared::embedding::Embedding;

use super::person::{Person, PersonKind, ResolvedIdentity};
use super::staff_gallery::StaffGallery;

/// Maps face embeddings to stable person identities.
///
/// Staff persons live for the whole session. Guests live only within the
/// current guest epoch and are dropped by [`IdentityResolver::reset_guests`].
/// Guest ids embed the epoch, so ids from an earlier epoch are never reissued.
pub struct IdentityResolver {
    staff: IndexMap<String, Person>,
    guests: Vec<Person>,
    guest_counter: u32,
    epoch: u32,
    staff_match_threshold: f64,
    tracking_threshold: f64,
}

impl IdentityResolver {
    pub fn new(staff_match_threshold: f64, tracking_threshold: f64) -> Self {
        Self {
            staff: IndexMap::new(),
            guests: Vec::new(),
            guest_counter: 0,
            epoch: 1,
            staff_match_threshold,
            tracking_threshold,
        }
    }

    pub fn resolve(
        &mut self,
        embedding: Option<&Embedding>,
        gallery: Option<&StaffGallery>,
    ) -> ResolvedIdentity {
        let Some(embedding) = embedding else {
            return self.mint_guest(None);
        };

        if let Some(name) = gallery.and_then(|g| g.first_match(embedding, self.staff_match_threshold)) {
            return self.resolve_staff(name, embedding);
        }

        let threshold = self.tracking_threshold;
        let tracked = self.guests.iter_mut().find(|g| {
            g.embedding
                .as_ref()
                .is_some_and(|known| known.distance(embedding) < threshold)
        });
        if let Some(guest) = tracked {
            guest.embedding = Some(embedding.clone());
            return guest.identity();
        }

        self.mint_guest(Some(embedding.clone()))
    }

    /// Drops every guest and starts a new guest epoch. Staff are kept.
    pub fn reset_guests(&mut self) {
        let dropped = self.guests.len();
        self.guests.clear();
        self.guest_counter = 0;
        self.epoch += 1;
        log::debug!("Guest pool reset: dropped {dropped} guests, epoch {}", self.epoch);
    }

    /// `(guests, staff)` currently tracked.
    pub fn counts(&self) -> (usize, usize) {
        (self.guests.len(), self.staff.len())
    }

    pub fn guests(&self) -> &[Person] {
        &self.guests
    }

    pub fn staff(&self) -> impl Iterator<Item = &Person> {
        self.staff.values()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn resolve_staff(&mut self, name: &str, embedding: &Embedding) -> ResolvedIdentity {
        let person = self
            .staff
            .entry(name.to_string())
            .or_insert_with(|| {
                log::info!("Recognized staff member: {name}");
                Person {
                    id: format!("staff_{name}"),
                    kind: PersonKind::Staff,
                    name: name.to_string(),
                    embedding: None,
                }
            });
        person.embedding = Some(embedding.clone());
        person.identity()
    }

    fn mint_guest(&mut self, embedding: Option<Embedding>) -> ResolvedIdentity {
        self.guest_counter += 1;
        let guest = Person {
            id: format!("guest_{}_{}", self.epoch, self.guest_counter),
            kind: PersonKind::Guest,
            name: format!("Guest {}", self.guest_counter),
            embedding,
        };
        let identity = guest.identity();
        self.guests.push(guest);
        identity
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(STAFF_MATCH_THRESHOLD, PERSON_TRACKING_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec())
    }

    fn gallery() -> StaffGallery {
        let mut g = StaffGallery::new();
        g.insert("Maria", emb(&[1.0, 0.0]));
        g.insert("Tom", emb(&[0.0, 1.0]));
        g
    }

    #[test]
    fn test_staff_match() {
        let mut resolver = IdentityResolver::default();
        let id = resolver.resolve(Some(&emb(&[0.9, 0.1])), Some(&gallery()));
        assert_eq!(id.person_id, "staff_Maria");
        assert_eq!(id.kind, PersonKind::Staff);
        assert_eq!(id.name, "Maria");
    }

    #[test]
    fn test_staff_created_once_and_tracks_drift() {
        let mut resolver = IdentityResolver::default();
        let g = gallery();
        resolver.resolve(Some(&emb(&[0.9, 0.1])), Some(&g));
        resolver.resolve(Some(&emb(&[0.95, 0.0])), Some(&g));
        let staff: Vec<_> = resolver.staff().collect();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].embedding, Some(emb(&[0.95, 0.0])));
    }

    #[test]
    fn test_without_gallery_everyone_is_a_guest() {
        let mut resolver = IdentityResolver::default();
        let id = resolver.resolve(Some(&emb(&[1.0, 0.0])), None);
        assert_eq!(id.kind, PersonKind::Guest);
        assert_eq!(id.person_id, "guest_1_1");
        assert_eq!(id.name, "Guest 1");
    }

    #[test]
    fn test_recurring_guest_is_tracked() {
        let mut resolver = IdentityResolver::default();
        let first = resolver.resolve(Some(&emb(&[5.0, 5.0])), Some(&gallery()));
        let again = resolver.resolve(Some(&emb(&[5.2, 5.1])), Some(&gallery()));
        assert_eq!(first, again);
        assert_eq!(resolver.counts(), (1, 0));
    }

    #[test]
    fn test_guest_embedding_drifts_to_latest() {
        let mut resolver = IdentityResolver::default();
        resolver.resolve(Some(&emb(&[5.0, 5.0])), None);
        resolver.resolve(Some(&emb(&[5.3, 5.0])), None);
        // Within 0.45 of the latest observation but not of the first.
        let id = resolver.resolve(Some(&emb(&[5.6, 5.0])), None);
        assert_eq!(id.person_id, "guest_1_1");
        assert_eq!(resolver.guests()[0].embedding, Some(emb(&[5.6, 5.0])));
    }

    #[test]
    fn test_distinct_guests_get_increasing_suffixes() {
        let mut resolver = IdentityResolver::default();
        let a = resolver.resolve(Some(&emb(&[5.0, 5.0])), None);
        let b = resolver.resolve(Some(&emb(&[-5.0, -5.0])), None);
        assert_eq!(a.person_id, "guest_1_1");
        assert_eq!(b.person_id, "guest_1_2");
        assert_eq!(b.name, "Guest 2");
    }

    #[test]
    fn test_missing_embedding_always_mints_unmatchable_guest() {
        let mut resolver = IdentityResolver::default();
        let a = resolver.resolve(None, Some(&gallery()));
        let b = resolver.resolve(None, Some(&gallery()));
        assert_ne!(a.person_id, b.person_id);
        assert!(resolver.guests().iter().all(|g| g.embedding.is_none()));

        // A later real embedding does not join the embedding-less guests.
        let c = resolver.resolve(Some(&emb(&[5.0, 5.0])), None);
        assert_eq!(c.person_id, "guest_1_3");
    }

    #[test]
    fn test_reset_never_reissues_pre_reset_ids() {
        let mut resolver = IdentityResolver::default();
        let same_face = emb(&[5.0, 5.0]);
        let before = resolver.resolve(Some(&same_face), None);
        resolver.reset_guests();
        let after = resolver.resolve(Some(&same_face), None);
        assert_ne!(before.person_id, after.person_id);
        assert_eq!(after.person_id, "guest_2_1");
        assert_eq!(after.name, "Guest 1");
    }

    #[test]
    fn test_reset_keeps_staff() {
        let mut resolver = IdentityResolver::default();
        resolver.resolve(Some(&emb(&[1.0, 0.0])), Some(&gallery()));
        resolver.resolve(Some(&emb(&[5.0, 5.0])), Some(&gallery()));
        assert_eq!(resolver.counts(), (1, 1));
        resolver.reset_guests();
        assert_eq!(resolver.counts(), (0, 1));
        assert_eq!(resolver.epoch(), 2);
    }
}
