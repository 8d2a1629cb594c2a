//! Seed selection for reproducible sampling.
//!
//! # Environment Variables
//!
//! - `FOLIO_SEED`: seed used when none is given explicitly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Name of the environment variable consulted by [`resolve_seed`].
pub const SEED_ENV: &str = "FOLIO_SEED";

/// Pick the explicit seed if present, else `FOLIO_SEED`, else none.
#[must_use]
pub fn resolve_seed(explicit: Option<u64>) -> Option<u64> {
    explicit.or_else(|| parse_seed(std::env::var(SEED_ENV).ok().as_deref()))
}

/// Parse a seed value; blank or malformed input yields `None`.
#[must_use]
pub fn parse_seed(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Seeded generator when a seed is known, otherwise one seeded from entropy.
#[must_use]
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
