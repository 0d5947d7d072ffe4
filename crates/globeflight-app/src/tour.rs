//! Deterministic random itineraries for unattended demo runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use globeflight_core::LocationId;

/// `len` stops drawn from the serviced locations. No stop repeats the one
/// before it, and the first stop differs from `start`. Same seed, same tour.
pub fn plan_tour(seed: u64, len: usize, start: LocationId) -> Vec<LocationId> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut previous = start;
    let mut stops = Vec::with_capacity(len);

    for _ in 0..len {
        let candidates: Vec<LocationId> = LocationId::ALL
            .iter()
            .copied()
            .filter(|&id| id != previous)
            .collect();
        let next = candidates[rng.gen_range(0..candidates.len())];
        stops.push(next);
        previous = next;
    }
    stops
}
