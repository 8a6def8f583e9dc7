//! Choose the narrowest integer type that can index every species.
use crate::errors::{RarefyError, Result};
use num_traits::PrimInt;
use std::fmt::{self, Debug, Display};

/// Bit width of the species index stored once per read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
    U64,
}

impl IndexWidth {
    const ALL: [IndexWidth; 4] = [
        IndexWidth::U8,
        IndexWidth::U16,
        IndexWidth::U32,
        IndexWidth::U64,
    ];

    /// Smallest width `W` with `2^W > num_species`.
    pub fn select(num_species: u128) -> Result<IndexWidth> {
        IndexWidth::ALL
            .into_iter()
            .find(|w| num_species < 1u128 << w.bits())
            .ok_or(RarefyError::Overflow { num_species })
    }

    pub fn bits(self) -> u32 {
        match self {
            IndexWidth::U8 => u8::BITS,
            IndexWidth::U16 => u16::BITS,
            IndexWidth::U32 => u32::BITS,
            IndexWidth::U64 => u64::BITS,
        }
    }
}

impl Display for IndexWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}

/// An unsigned integer used as a species index in the read assignment.
pub trait SpeciesIndex: PrimInt + Debug + Send + Sync + 'static {
    const WIDTH: IndexWidth;

    /// Position of this species in the discovered set.
    fn index(self) -> usize;
}

macro_rules! species_index {
    ($t:ty, $w:expr) => {
        impl SpeciesIndex for $t {
            const WIDTH: IndexWidth = $w;

            #[inline]
            fn index(self) -> usize {
                self as usize
            }
        }
    };
}

species_index!(u8, IndexWidth::U8);
species_index!(u16, IndexWidth::U16);
species_index!(u32, IndexWidth::U32);
species_index!(u64, IndexWidth::U64);
