//! Store error type and the randomness seam used by demo seeding.

use rand::Rng;

use crate::model::BinId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors surfaced by the in-memory stores.
pub enum StoreError {
    /// No bin with the requested identifier exists.
    #[error("Bin not found")]
    BinNotFound(BinId),
}

/// Source of the random offsets applied to demo alert positions.
///
/// Every [`rand::Rng`] is a source, so production code passes a thread RNG
/// and tests pass a seeded one or a fixed implementation.
pub trait JitterSource: Send {
    /// Uniform offset in `[-radius, radius)`.
    fn offset(&mut self, radius: f64) -> f64;
}

impl<R: Rng + Send> JitterSource for R {
    fn offset(&mut self, radius: f64) -> f64 {
        if radius <= 0.0 {
            return 0.0;
        }
        self.gen_range(-radius..radius)
    }
}
