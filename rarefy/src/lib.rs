//! rarefy
//!
//! Rarefaction curves by simulation: the number of distinct species observed
//! as reads are drawn without replacement, in random order, from a sample
//! with known per-species read counts.
//!
//! The reads are expanded into one species index per read, stored in the
//! narrowest unsigned integer that can hold every index. Each trial walks a
//! random ordering of that array and records the number of species seen every
//! `step` reads and after the last read; trials are averaged with truncating
//! integer division. The first trial uses an exact shuffle, later trials a
//! cheaper chunk shuffle (see [`ChunkShuffler`]).
//!
//! ```rust
//! use rarefy::{rarefy_seeded, RarefyParams};
//! let counts = vec![("A", 4), ("B", 4)];
//! let curve = rarefy_seeded(counts, &RarefyParams::new(2, 100)).unwrap();
//! assert_eq!(curve.x(), &[2, 4, 6, 8]);
//! assert_eq!(curve.y().last(), Some(&2));
//! ```

// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]
#![deny(
    elided_lifetimes_in_paths,
    trivial_casts,
    unconditional_recursion,
    unused_comparisons,
    while_true
)]

mod assignment;
mod curve;
mod discovery;
mod errors;
mod params;
mod pipeline;
mod shuffle;
mod width;

pub use assignment::build_assignment;
pub use curve::{Curve, CurveAverager};
pub use discovery::{sample_points, DiscoveredSet, DiscoverySampler};
pub use errors::{RarefyError, Result};
pub use params::{RarefyParams, DEFAULT_PARAMS};
pub use pipeline::{rarefy, rarefy_seeded};
pub use shuffle::{chunk_bounds, full_shuffle, num_chunks, ChunkShuffler};
pub use width::{IndexWidth, SpeciesIndex};
