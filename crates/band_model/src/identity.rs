//! Band identifier type and the registry that keeps identifiers unique.
//!
//! A [`BandId`] is a lightweight `u32` identifier drawn from a bounded range.
//! All identifiers are issued by an [`IdentityRegistry`] so that no two live
//! bands managed by one client process ever share an id.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest valid band identifier (inclusive).
pub const ID_MIN: u32 = 1_000_000;

/// Upper bound of the band identifier range (exclusive).
pub const ID_MAX: u32 = 10_000_000;

/// A unique band identifier.
///
/// Ids carry no data of their own; they exist to name a record in the remote
/// collection. Freshly issued ids always fall in `[ID_MIN, ID_MAX)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BandId(pub u32);

impl BandId {
    /// Create an id from a raw `u32`.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns `true` if this id lies inside the issuing range.
    #[must_use]
    pub const fn in_range(self) -> bool {
        self.0 >= ID_MIN && self.0 < ID_MAX
    }
}

impl std::fmt::Display for BandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A supplied identifier is already allocated to a live band.
///
/// Fatal to the single construction attempt that triggered it, never to the
/// process; the registry is left unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("band id {0} is already in use")]
pub struct IdentityConflict(pub BandId);

/// Tracks which band identifiers are currently allocated.
///
/// The registry is the single source of truth for band identity within the
/// client process. It is an explicit object handed by `&mut` to every
/// construction site; mutation is not internally synchronised, matching the
/// single-threaded command loop that drives it.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    allocated: HashSet<BandId>,
}

impl IdentityRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocated: HashSet::new(),
        }
    }

    /// Allocate a fresh identifier.
    ///
    /// Draws uniformly from `[ID_MIN, ID_MAX)` and redraws on collision until
    /// a free value is found. There is no retry cap: near-exhaustion of the
    /// ~9M-value space would loop, which is acceptable at interactive scale.
    pub fn allocate(&mut self) -> BandId {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = BandId(rng.gen_range(ID_MIN..ID_MAX));
            if self.allocated.insert(candidate) {
                return candidate;
            }
        }
    }

    /// Record an externally supplied identifier as allocated.
    ///
    /// Used when a band is restored from a deserialized payload that already
    /// carries an id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityConflict`] if `id` is already allocated. The
    /// allocated set is unchanged on failure.
    pub fn reserve(&mut self, id: BandId) -> Result<(), IdentityConflict> {
        if self.allocated.insert(id) {
            Ok(())
        } else {
            Err(IdentityConflict(id))
        }
    }

    /// Returns `true` if `id` is not currently allocated.
    #[must_use]
    pub fn is_free(&self, id: BandId) -> bool {
        !self.allocated.contains(&id)
    }

    /// Release an identifier back to the free pool.
    ///
    /// Idempotent: releasing an id that is already free is a no-op.
    pub fn release(&mut self, id: BandId) {
        self.allocated.remove(&id);
    }

    /// Returns the number of identifiers currently allocated.
    #[must_use]
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}
