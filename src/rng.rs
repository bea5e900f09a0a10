//! Random source used by shape generation and round building.
//!
//! Everything downstream only needs fair bits and bounded indices, so the
//! seam is a small trait. Any `rand::Rng` works as a source; tests can plug
//! in a scripted source to reproduce exact walks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator used for a play session.
pub type SessionRng = ChaCha8Rng;

/// A source of uniform random bits and bounded integers.
pub trait RandomSource {
    /// Returns a fair random bit.
    fn random_bit(&mut self) -> bool;

    /// Returns a uniform integer in `0..bound`. `bound` must be nonzero.
    fn random_below(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn random_bit(&mut self) -> bool {
        self.gen::<bool>()
    }

    #[inline]
    fn random_below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Creates the session generator.
///
/// Without a seed one is drawn from the thread generator; the seed actually
/// used is returned so the session can be replayed.
pub fn session_rng(seed: Option<u64>) -> (SessionRng, u64) {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    (ChaCha8Rng::seed_from_u64(seed), seed)
}
