use crate::assignment::build_assignment;
use crate::curve::{Curve, CurveAverager};
use crate::discovery::DiscoverySampler;
use crate::errors::{RarefyError, Result};
use crate::params::RarefyParams;
use crate::shuffle::{full_shuffle, ChunkShuffler};
use crate::width::{IndexWidth, SpeciesIndex};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use std::fmt::Debug;

/// Compute a rarefaction curve from per-species read counts.
///
/// # Inputs
/// - `read_counts`: pairs of (species, number of reads). Species identifiers
///   are only used to report negative counts.
/// - `params`: sampling step, number of trials and how to group them.
/// - `rng`: source of every random ordering. The same generator state and
///   parameters always produce the same curve.
///
/// # Outputs
/// - A curve sampled every `params.step` reads and at the total read count,
///   holding the distinct species count averaged over `params.trials`
///   random orderings of the reads. Empty if there are no reads.
///
/// # Errors
/// - `InvalidStep`, `InvalidTrials` or `InvalidTrialChunks` for zero parameters.
/// - `NegativeReadCount` if any count is below zero.
/// - `TooManyReads` if the total read count overflows a `usize`.
/// - `Overflow` if there are too many species to index.
pub fn rarefy<K, I, R>(read_counts: I, params: &RarefyParams, rng: &mut R) -> Result<Curve>
where
    K: Debug,
    I: IntoIterator<Item = (K, i64)>,
    R: Rng + ?Sized,
{
    params.validate()?;
    // Counts are checked as they are collected; the per-read assignment is
    // only allocated once every count and their sum are known to be valid.
    let mut counts = Vec::new();
    let mut total_reads = 0usize;
    for (species, count) in read_counts {
        let count = usize::try_from(count)
            .map_err(|_| RarefyError::negative_read_count(&species, count))?;
        counts.push(count);
        total_reads = total_reads
            .checked_add(count)
            .ok_or(RarefyError::TooManyReads {
                num_species: counts.len(),
            })?;
    }

    let width = IndexWidth::select(counts.len() as u128)?;
    if total_reads == 0 {
        debug!("no reads in {} species, returning an empty curve", counts.len());
        return Ok(Curve::default());
    }
    debug!(
        "rarefying {} reads from {} species using {} species indices",
        total_reads,
        counts.len(),
        width
    );

    let curve = match width {
        IndexWidth::U8 => run_trials::<u8, R>(&counts, total_reads, params, rng),
        IndexWidth::U16 => run_trials::<u16, R>(&counts, total_reads, params, rng),
        IndexWidth::U32 => run_trials::<u32, R>(&counts, total_reads, params, rng),
        IndexWidth::U64 => run_trials::<u64, R>(&counts, total_reads, params, rng),
    };
    info!(
        "rarefaction curve over {} trials: {} samples, {} species after {} reads",
        params.trials,
        curve.len(),
        curve.y().last().copied().unwrap_or(0),
        curve.total_reads()
    );
    Ok(curve)
}

/// Same as [`rarefy`], with a generator seeded from `params.seed`.
pub fn rarefy_seeded<K, I>(read_counts: I, params: &RarefyParams) -> Result<Curve>
where
    K: Debug,
    I: IntoIterator<Item = (K, i64)>,
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(params.seed);
    rarefy(read_counts, params, &mut rng)
}

/// Buffers owned by one sequence of trials.
struct TrialRunner<T> {
    assignment: Vec<T>,
    sampler: DiscoverySampler,
    shuffler: ChunkShuffler<T>,
}

impl<T: SpeciesIndex> TrialRunner<T> {
    fn new(assignment: Vec<T>, num_species: usize, step: usize) -> Self {
        TrialRunner {
            assignment,
            sampler: DiscoverySampler::new(num_species, step),
            shuffler: ChunkShuffler::new(),
        }
    }

    /// Reorder the assignment for `trial`: a full shuffle for the first one
    /// and a chunk shuffle of the previous order afterwards.
    fn shuffle_for_trial<R: Rng + ?Sized>(&mut self, trial: usize, rng: &mut R) {
        if trial == 0 {
            full_shuffle(&mut self.assignment, rng);
        } else {
            self.shuffler.shuffle(&mut self.assignment, rng);
        }
    }

    /// Run `trials` trials. Returns the sample positions and the summed
    /// samples.
    fn run<R: Rng + ?Sized>(
        mut self,
        trials: usize,
        rng: &mut R,
    ) -> (Vec<usize>, CurveAverager) {
        let mut x = Vec::new();
        let mut averager = CurveAverager::new();
        for trial in 0..trials {
            self.shuffle_for_trial(trial, rng);
            let samples = self
                .sampler
                .sample(&self.assignment, (trial == 0).then_some(&mut x));
            averager.add(samples);
        }
        (x, averager)
    }
}

/// Number of trials in group `g` of `groups`.
fn group_trials(trials: usize, groups: usize, g: usize) -> usize {
    (g + 1) * trials / groups - g * trials / groups
}

fn run_trials<T: SpeciesIndex, R: Rng + ?Sized>(
    counts: &[usize],
    total_reads: usize,
    params: &RarefyParams,
    rng: &mut R,
) -> Curve {
    let assignment = build_assignment::<T>(counts, total_reads);
    let groups = params.trial_chunks.min(params.trials);
    if groups == 1 {
        let (x, averager) =
            TrialRunner::new(assignment, counts.len(), params.step).run(params.trials, rng);
        return averager.finish(x);
    }

    debug!("splitting {} trials into {} groups", params.trials, groups);
    let seeds: Vec<u64> = (0..groups).map(|_| rng.gen()).collect();
    let mut results: Vec<(Vec<usize>, CurveAverager)> = seeds
        .into_par_iter()
        .enumerate()
        .map(|(g, seed)| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            TrialRunner::new(assignment.clone(), counts.len(), params.step)
                .run(group_trials(params.trials, groups, g), &mut rng)
        })
        .collect();

    let rest = results.split_off(1);
    let (x, mut averager) = results.remove(0);
    for (group_x, group) in rest {
        assert_eq!(group_x, x);
        averager.merge(group);
    }
    averager.finish(x)
}
