use serde::{Deserialize, Serialize};

/// A rarefaction curve: `y[i]` distinct species after `x[i]` reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    x: Vec<usize>,
    y: Vec<usize>,
}

impl Curve {
    /// # Panics
    /// - If `x` and `y` have different lengths.
    pub fn new(x: Vec<usize>, y: Vec<usize>) -> Curve {
        assert_eq!(
            x.len(),
            y.len(),
            "curve has {} sample points but {} values",
            x.len(),
            y.len()
        );
        Curve { x, y }
    }

    pub fn x(&self) -> &[usize] {
        &self.x
    }

    pub fn y(&self) -> &[usize] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Read count of the last sample, which is the total number of reads.
    pub fn total_reads(&self) -> usize {
        self.x.last().copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.x, self.y)
    }

    /// Describe the first violated shape constraint, if any: `x` strictly
    /// increasing, `y` non-decreasing and `y[i] <= min(x[i], num_species)`.
    pub fn check_invariants(&self, num_species: usize) -> Result<(), String> {
        for (i, (x, y)) in self.iter().enumerate() {
            if y > x.min(num_species) {
                return Err(format!(
                    "sample {i}: {y} species after {x} reads exceeds the bound for {num_species} species"
                ));
            }
        }
        if let Some(i) = self.x.windows(2).position(|w| w[0] >= w[1]) {
            return Err(format!("x is not strictly increasing at sample {}", i + 1));
        }
        if let Some(i) = self.y.windows(2).position(|w| w[0] > w[1]) {
            return Err(format!("y decreases at sample {}", i + 1));
        }
        Ok(())
    }
}

/// Running elementwise sum of per-trial samples.
#[derive(Debug, Clone, Default)]
pub struct CurveAverager {
    sums: Vec<usize>,
    trials: usize,
}

impl CurveAverager {
    pub fn new() -> Self {
        CurveAverager::default()
    }

    /// Add the samples of one trial. Every trial must report the same number
    /// of samples.
    pub fn add(&mut self, samples: &[usize]) {
        if self.trials == 0 {
            self.sums.resize(samples.len(), 0);
        }
        assert_eq!(
            samples.len(),
            self.sums.len(),
            "trial {} reported {} samples, expected {}",
            self.trials,
            samples.len(),
            self.sums.len()
        );
        for (sum, &s) in self.sums.iter_mut().zip(samples) {
            *sum += s;
        }
        self.trials += 1;
    }

    /// Fold in the sums accumulated by another averager.
    pub fn merge(&mut self, other: CurveAverager) {
        if other.trials == 0 {
            return;
        }
        if self.trials == 0 {
            *self = other;
            return;
        }
        assert_eq!(self.sums.len(), other.sums.len());
        for (sum, s) in self.sums.iter_mut().zip(other.sums) {
            *sum += s;
        }
        self.trials += other.trials;
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Per-sample totals accumulated so far.
    pub fn sums(&self) -> &[usize] {
        &self.sums
    }

    /// Divide the sums by the number of trials, truncating, and pair them
    /// with the sample positions `x`.
    pub fn finish(self, x: Vec<usize>) -> Curve {
        let trials = self.trials;
        let y = if trials == 0 {
            vec![0; x.len()]
        } else {
            self.sums.into_iter().map(|s| s / trials).collect()
        };
        Curve::new(x, y)
    }
}
