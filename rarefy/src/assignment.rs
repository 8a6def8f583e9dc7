use crate::width::SpeciesIndex;

/// Expand per-species read counts into one entry per read, tagged with the
/// index of the species it belongs to. Species `i` of `read_counts` gets
/// index `i`; entries are grouped by species and must be shuffled before use.
/// `total_reads` is the sum of `read_counts`, checked for overflow by the
/// caller.
///
/// # Panics
/// - If `T` cannot index every species. The width is chosen by
///   [`IndexWidth::select`](crate::IndexWidth::select), so this is a bug in the
///   caller rather than a property of the data.
pub fn build_assignment<T: SpeciesIndex>(read_counts: &[usize], total_reads: usize) -> Vec<T> {
    debug_assert_eq!(read_counts.iter().sum::<usize>(), total_reads);
    let mut assignment = Vec::with_capacity(total_reads);
    let mut species = T::zero();
    for &count in read_counts {
        assignment.extend(std::iter::repeat(species).take(count));
        species = species.checked_add(&T::one()).unwrap_or_else(|| {
            panic!(
                "species index overflow: counting {} species with {}",
                read_counts.len(),
                T::WIDTH
            )
        });
    }
    assignment
}
