//! Random band generation.
//!
//! The payload source for commands that create or replace a record: produces
//! a [`BandDraft`] whose fields satisfy the collection's validity rules
//! (non-empty name, positive participant count, positive album count when
//! present). Identity is stamped on later by `MusicBand::create`.

use band_model::{BandDraft, Coordinates, Label, MusicGenre};
use rand::Rng;

const NAMES: [&str; 10] = [
    "Velvet Static",
    "Iron Meridian",
    "The Low Orbits",
    "Paper Lanterns",
    "Glass Harbor",
    "Northern Echo",
    "Crimson Tape",
    "The Idle Hours",
    "Saltwater Choir",
    "Midnight Freight",
];

const GENRES: [MusicGenre; 6] = [
    MusicGenre::Rock,
    MusicGenre::Jazz,
    MusicGenre::Blues,
    MusicGenre::Pop,
    MusicGenre::PostPunk,
    MusicGenre::Soul,
];

/// Produce a draft with randomized fields.
pub fn random_draft(rng: &mut impl Rng) -> BandDraft {
    let albums_count = if rng.gen_bool(0.5) {
        Some(rng.gen_range(1..=40))
    } else {
        None
    };
    BandDraft {
        name: NAMES[rng.gen_range(0..NAMES.len())].to_string(),
        coordinates: Coordinates {
            x: rng.gen_range(-500.0..500.0),
            y: rng.gen_range(-500.0..500.0),
        },
        number_of_participants: rng.gen_range(1..=15),
        albums_count,
        genre: GENRES[rng.gen_range(0..GENRES.len())],
        label: Label {
            sales: rng.gen_range(0.0..1_000_000.0),
        },
    }
}
