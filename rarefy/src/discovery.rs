use crate::width::SpeciesIndex;

/// Read counts at which the curve is sampled: every multiple of `step` up to
/// `total`, followed by `total` itself if it is not a multiple.
///
/// # Example
/// ```rust
/// use rarefy::sample_points;
/// let x: Vec<usize> = sample_points(55, 10).collect();
/// assert_eq!(x, vec![10, 20, 30, 40, 50, 55]);
/// ```
pub fn sample_points(total: usize, step: usize) -> impl Iterator<Item = usize> {
    assert!(step > 0, "sampling step must be positive");
    let tail = (total % step != 0).then_some(total);
    (1..=total / step).map(move |i| i * step).chain(tail)
}

/// One bit per species, plus a running count of the bits that are set.
#[derive(Debug, Clone)]
pub struct DiscoveredSet {
    words: Vec<u64>,
    num_species: usize,
    num_discovered: usize,
}

impl DiscoveredSet {
    pub fn new(num_species: usize) -> Self {
        DiscoveredSet {
            words: vec![0; num_species.div_ceil(64)],
            num_species,
            num_discovered: 0,
        }
    }

    /// Mark `species` as discovered. Returns true if it was not already.
    #[inline]
    pub fn insert(&mut self, species: usize) -> bool {
        debug_assert!(species < self.num_species);
        let word = &mut self.words[species / 64];
        let mask = 1u64 << (species % 64);
        let new = *word & mask == 0;
        *word |= mask;
        self.num_discovered += usize::from(new);
        new
    }

    pub fn contains(&self, species: usize) -> bool {
        self.words[species / 64] & (1u64 << (species % 64)) != 0
    }

    /// Number of distinct species discovered.
    pub fn len(&self) -> usize {
        self.num_discovered
    }

    pub fn is_empty(&self) -> bool {
        self.num_discovered == 0
    }

    pub fn capacity(&self) -> usize {
        self.num_species
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
        self.num_discovered = 0;
    }
}

/// Walks a shuffled assignment and records the number of distinct species
/// seen every `step` reads and after the last read.
///
/// The discovered set and the sample buffer are allocated once and reset at
/// the start of every trial.
#[derive(Debug, Clone)]
pub struct DiscoverySampler {
    step: usize,
    found: DiscoveredSet,
    samples: Vec<usize>,
}

impl DiscoverySampler {
    pub fn new(num_species: usize, step: usize) -> Self {
        assert!(step > 0, "sampling step must be positive");
        DiscoverySampler {
            step,
            found: DiscoveredSet::new(num_species),
            samples: Vec::new(),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Run one trial over `assignment`. Sample positions are appended to `x`
    /// when it is given; the distinct-species counts of this trial are
    /// returned and stay valid until the next call.
    pub fn sample<T: SpeciesIndex>(
        &mut self,
        assignment: &[T],
        mut x: Option<&mut Vec<usize>>,
    ) -> &[usize] {
        self.found.clear();
        self.samples.clear();

        for (chunk_idx, chunk) in assignment.chunks(self.step).enumerate() {
            for &species in chunk {
                self.found.insert(species.index());
            }
            if let Some(x) = x.as_deref_mut() {
                x.push(chunk_idx * self.step + chunk.len());
            }
            self.samples.push(self.found.len());
        }
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_points() {
        let cases: [(usize, usize, &[usize]); 6] = [
            (50, 10, &[10, 20, 30, 40, 50]),
            (55, 10, &[10, 20, 30, 40, 50, 55]),
            (15, 10, &[10, 15]),
            (10, 10, &[10]),
            (7, 10, &[7]),
            (0, 10, &[]),
        ];
        for (total, step, want) in cases {
            let got: Vec<usize> = sample_points(total, step).collect();
            assert_eq!(got, want, "sample_points({total}, {step})");
        }
    }

    #[test]
    fn test_discovered_set() {
        let mut found = DiscoveredSet::new(130);
        assert!(found.is_empty());
        assert!(found.insert(0));
        assert!(found.insert(129));
        assert!(!found.insert(129));
        assert!(found.insert(64));
        assert_eq!(found.len(), 3);
        assert!(found.contains(64));
        assert!(!found.contains(63));
        found.clear();
        assert!(found.is_empty());
        assert!(!found.contains(129));
        assert_eq!(found.capacity(), 130);
    }

    #[test]
    fn test_sampler_matches_sample_points() {
        let assignment: Vec<u8> = vec![0, 0, 1, 2, 1, 3, 3];
        let mut sampler = DiscoverySampler::new(4, 2);
        let mut x = Vec::new();
        let y = sampler.sample(&assignment, Some(&mut x)).to_vec();
        assert_eq!(x, sample_points(7, 2).collect::<Vec<_>>());
        assert_eq!(x, vec![2, 4, 6, 7]);
        assert_eq!(y, vec![1, 3, 4, 4]);

        // A second trial reuses the buffers and leaves x alone.
        let reordered: Vec<u8> = vec![3, 3, 1, 1, 2, 0, 0];
        let y = sampler.sample(&reordered, None);
        assert_eq!(y, &[1, 2, 4, 4]);
    }

    #[test]
    fn test_sampler_step_larger_than_total() {
        let assignment: Vec<u16> = vec![3, 1, 3];
        let mut sampler = DiscoverySampler::new(5, 100);
        let mut x = Vec::new();
        assert_eq!(sampler.sample(&assignment, Some(&mut x)), &[2]);
        assert_eq!(x, vec![3]);
    }

    #[test]
    fn test_sampler_empty() {
        let mut sampler = DiscoverySampler::new(0, 10);
        let mut x = Vec::new();
        assert!(sampler.sample::<u8>(&[], Some(&mut x)).is_empty());
        assert!(x.is_empty());
    }
}
