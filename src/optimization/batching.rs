//! batching — seeded epoch shuffling into fixed-size index minibatches.
//!
//! Purpose
//! -------
//! Partition `0..n` site indices into minibatches for one epoch of
//! training. Shuffling consumes entropy from a caller-supplied RNG, so a
//! fixed seed and epoch order reproduce exactly which sites land in which
//! minibatch.
//!
//! Key behaviors
//! -------------
//! - Validate batch sizing against the dataset before any work
//!   ([`OptError::InvalidBatchSize`], [`OptError::BatchExceedsSites`]).
//! - Optionally shuffle with `rand::seq::SliceRandom`; with shuffling
//!   disabled the epoch visits sites in dataset order.
//! - The final minibatch may be short when `batch_size` does not divide
//!   `n`; every index appears exactly once per epoch.
//!
//! Conventions
//! -----------
//! - Batches are index lists into an immutable dataset; the dataset itself
//!   is never reordered or copied here.
//! - The RNG is passed in by the caller (`R: Rng + ?Sized`) so the training
//!   loop owns seeding and the epoch-to-epoch stream position.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::optimization::errors::{OptError, OptResult};

/// Partition `0..n_sites` into minibatches for one epoch.
///
/// # Arguments
/// - `n_sites`: number of sites in the dataset (> 0 expected upstream).
/// - `batch_size`: fixed minibatch size; the last batch may be shorter.
/// - `shuffle`: when `true`, indices are shuffled with `rng` before
///   partitioning; when `false`, dataset order is kept and `rng` is not
///   consulted.
/// - `rng`: random source driving the shuffle.
///
/// # Returns
/// - Minibatches in processing order; concatenated they form a permutation
///   of `0..n_sites`.
///
/// # Errors
/// - [`OptError::InvalidBatchSize`] if `batch_size == 0`.
/// - [`OptError::BatchExceedsSites`] if `batch_size > n_sites`.
pub fn epoch_batches<R: Rng + ?Sized>(
    n_sites: usize, batch_size: usize, shuffle: bool, rng: &mut R,
) -> OptResult<Vec<Vec<usize>>> {
    if batch_size == 0 {
        return Err(OptError::InvalidBatchSize { batch_size });
    }
    if batch_size > n_sites {
        return Err(OptError::BatchExceedsSites { batch_size, n_sites });
    }

    let mut indices: Vec<usize> = (0..n_sites).collect();
    if shuffle {
        indices.shuffle(rng);
    }
    Ok(indices.chunks(batch_size).map(|chunk| chunk.to_vec()).collect())
}
