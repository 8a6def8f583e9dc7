use std::fmt::Debug;

/// Errors surfaced by the rarefaction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RarefyError {
    #[error(
        "Cannot index {num_species} species: the widest supported species index is 64 bits"
    )]
    Overflow { num_species: u128 },

    #[error("The total read count of the first {num_species} species does not fit in a usize")]
    TooManyReads { num_species: usize },

    #[error("Species {species} has a negative read count ({count})")]
    NegativeReadCount { species: String, count: i64 },

    #[error("The sampling step must be a positive number of reads, got {0}")]
    InvalidStep(usize),

    #[error("The number of trials must be positive, got {0}")]
    InvalidTrials(usize),

    #[error("The number of trial chunks must be positive, got {0}")]
    InvalidTrialChunks(usize),
}

impl RarefyError {
    pub(crate) fn negative_read_count(species: &impl Debug, count: i64) -> Self {
        RarefyError::NegativeReadCount {
            species: format!("{species:?}"),
            count,
        }
    }

    /// True for the errors caused by malformed caller input, as opposed to
    /// inputs that are well formed but too large to process.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            RarefyError::Overflow { .. } | RarefyError::TooManyReads { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RarefyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RarefyError::negative_read_count(&"otu_7", -3);
        assert_eq!(
            err.to_string(),
            "Species \"otu_7\" has a negative read count (-3)"
        );
        assert!(err.is_invalid_input());
        assert!(RarefyError::InvalidStep(0).is_invalid_input());
        assert!(!RarefyError::Overflow { num_species: 1 << 64 }.is_invalid_input());
        assert!(!RarefyError::TooManyReads { num_species: 3 }.is_invalid_input());
    }
}
