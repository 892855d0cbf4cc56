//! The band record and its construction paths.
//!
//! A [`MusicBand`] is the payload carried inside requests to the collection
//! server. Its identifier always comes from an [`IdentityRegistry`]: either a
//! fresh allocation ([`MusicBand::create`]) or a reservation of an id that
//! arrived with a deserialized payload ([`MusicBand::restore`]).
//!
//! Field-level validity (non-empty name, positive participant count) is the
//! generator's responsibility; this module only guarantees identifier
//! uniqueness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{BandId, IdentityConflict, IdentityRegistry};

/// Location of a band, as stored by the collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// Musical genre of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicGenre {
    Rock,
    Jazz,
    Blues,
    Pop,
    PostPunk,
    Soul,
}

impl std::fmt::Display for MusicGenre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MusicGenre::Rock => "ROCK",
            MusicGenre::Jazz => "JAZZ",
            MusicGenre::Blues => "BLUES",
            MusicGenre::Pop => "POP",
            MusicGenre::PostPunk => "POST_PUNK",
            MusicGenre::Soul => "SOUL",
        };
        f.write_str(name)
    }
}

/// The label a band records under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Total sales attributed to the label.
    pub sales: f64,
}

/// The field set of a band minus identity: what a generator produces.
///
/// Drafts have no id and no creation date; those are stamped on by the
/// construction paths below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDraft {
    pub name: String,
    pub coordinates: Coordinates,
    pub number_of_participants: u32,
    pub albums_count: Option<u32>,
    pub genre: MusicGenre,
    pub label: Label,
}

/// A band record in the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicBand {
    pub id: BandId,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: DateTime<Utc>,
    pub number_of_participants: u32,
    pub albums_count: Option<u32>,
    pub genre: MusicGenre,
    pub label: Label,
}

impl MusicBand {
    /// Construct a new band from a draft, allocating a fresh identifier and
    /// stamping the current time as the creation date.
    pub fn create(registry: &mut IdentityRegistry, draft: BandDraft) -> Self {
        let id = registry.allocate();
        Self {
            id,
            name: draft.name,
            coordinates: draft.coordinates,
            creation_date: Utc::now(),
            number_of_participants: draft.number_of_participants,
            albums_count: draft.albums_count,
            genre: draft.genre,
            label: draft.label,
        }
    }

    /// Reconstruct a band that already carries an identifier, e.g. from a
    /// deserialized payload.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityConflict`] if `id` is already allocated; no band is
    /// constructed and the registry is unchanged.
    pub fn restore(
        registry: &mut IdentityRegistry,
        id: BandId,
        creation_date: DateTime<Utc>,
        draft: BandDraft,
    ) -> Result<Self, IdentityConflict> {
        registry.reserve(id)?;
        Ok(Self {
            id,
            name: draft.name,
            coordinates: draft.coordinates,
            creation_date,
            number_of_participants: draft.number_of_participants,
            albums_count: draft.albums_count,
            genre: draft.genre,
            label: draft.label,
        })
    }
}

impl std::fmt::Display for MusicBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id=\"{}\" name=\"{}\" coordinates_x=\"{}\" coordinates_y=\"{}\" \
             creation_date=\"{}\" number_of_participants=\"{}\" albums_count=\"{}\" \
             genre=\"{}\" label_sales=\"{}\"",
            self.id,
            self.name,
            self.coordinates.x,
            self.coordinates.y,
            self.creation_date.to_rfc3339(),
            self.number_of_participants,
            self.albums_count
                .map_or_else(|| "null".to_string(), |n| n.to_string()),
            self.genre,
            self.label.sales,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> BandDraft {
        BandDraft {
            name: name.to_string(),
            coordinates: Coordinates { x: 1.5, y: -2.0 },
            number_of_participants: 4,
            albums_count: Some(3),
            genre: MusicGenre::Rock,
            label: Label { sales: 10_000.0 },
        }
    }

    #[test]
    fn test_create_allocates_distinct_ids() {
        let mut registry = IdentityRegistry::new();
        let a = MusicBand::create(&mut registry, draft("a"));
        let b = MusicBand::create(&mut registry, draft("b"));
        assert_ne!(a.id, b.id);
        assert!(a.id.in_range());
        assert!(b.id.in_range());
    }

    #[test]
    fn test_restore_reserves_the_supplied_id() {
        let mut registry = IdentityRegistry::new();
        let id = BandId::from_raw(3_000_000);
        let band = MusicBand::restore(&mut registry, id, Utc::now(), draft("x")).unwrap();
        assert_eq!(band.id, id);
        assert!(!registry.is_free(id));
    }

    #[test]
    fn test_restore_rejects_conflicting_id() {
        let mut registry = IdentityRegistry::new();
        let band = MusicBand::create(&mut registry, draft("first"));
        let err = MusicBand::restore(&mut registry, band.id, Utc::now(), draft("second"));
        assert_eq!(err.unwrap_err(), IdentityConflict(band.id));
    }

    #[test]
    fn test_band_serialization_roundtrip() {
        let mut registry = IdentityRegistry::new();
        let band = MusicBand::create(&mut registry, draft("roundtrip"));
        let bytes = rmp_serde::to_vec(&band).unwrap();
        let restored: MusicBand = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(band, restored);
    }

    #[test]
    fn test_display_renders_null_albums_count() {
        let mut registry = IdentityRegistry::new();
        let mut d = draft("display");
        d.albums_count = None;
        let band = MusicBand::create(&mut registry, d);
        let rendered = band.to_string();
        assert!(rendered.contains("albums_count=\"null\""));
        assert!(rendered.contains("genre=\"ROCK\""));
    }
}
