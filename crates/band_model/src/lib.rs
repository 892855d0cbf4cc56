//! # band_model
//!
//! Band record types and identifier management for the collection client.
//!
//! This crate provides:
//!
//! - [`BandId`] — bounded `u32` band identifiers.
//! - [`IdentityRegistry`] — process-wide allocator keeping identifiers unique.
//! - [`MusicBand`] — the band record exchanged with the server.
//! - [`BandDraft`] — the identifier-less field set produced by generators.

pub mod band;
pub mod identity;

pub use band::{BandDraft, Coordinates, Label, MusicBand, MusicGenre};
pub use identity::{BandId, ID_MAX, ID_MIN, IdentityConflict, IdentityRegistry};
