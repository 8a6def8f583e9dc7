//! Reordering of the read assignment between trials.
//!
//! The first trial uses [`full_shuffle`], an exact uniform permutation. Later
//! trials use a [`ChunkShuffler`]: the array is cut into `round(sqrt(n))`
//! contiguous blocks and only the order of the blocks is randomized. Order
//! within a block is inherited from the previous trial, so consecutive trials
//! are independent at block granularity only. The discovery curve does not
//! depend on the order inside a block once block order is random and trials
//! are averaged, and reordering `sqrt(n)` blocks needs `sqrt(n)` random draws
//! instead of `n`. Replacing it with a full shuffle changes the cost of every
//! trial but not the expected curve.

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

/// Uniformly random permutation of `items`.
pub fn full_shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Number of blocks used by the chunk shuffle for an array of `n` items.
pub fn num_chunks(n: usize) -> usize {
    (n as f64).sqrt().round() as usize
}

/// Block boundaries `i*n/k .. (i+1)*n/k` for `k = num_chunks(n)`.
pub fn chunk_bounds(n: usize) -> impl Iterator<Item = Range<usize>> {
    let k = num_chunks(n);
    (0..k).map(move |i| i * n / k..(i + 1) * n / k)
}

/// Randomizes block order of an array, reusing its buffers across calls.
#[derive(Debug, Default)]
pub struct ChunkShuffler<T> {
    chunks: Vec<Range<usize>>,
    scratch: Vec<T>,
}

impl<T: Copy> ChunkShuffler<T> {
    pub fn new() -> Self {
        ChunkShuffler {
            chunks: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Permute the blocks of `items` in place. The multiset of elements is
    /// unchanged.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, items: &mut Vec<T>, rng: &mut R) {
        self.chunks.clear();
        self.chunks.extend(chunk_bounds(items.len()));
        self.chunks.shuffle(rng);

        self.scratch.clear();
        self.scratch.reserve(items.len());
        for chunk in &self.chunks {
            self.scratch.extend_from_slice(&items[chunk.clone()]);
        }
        std::mem::swap(items, &mut self.scratch);
    }
}
