/// Frequencies at or below this value mark an absent allele slot.
pub const ACTIVE_FREQUENCY_THRESHOLD: f64 = 1e-20;

/// Observed allele indices of the two individuals at one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenotypePair {
    /// Allele observed for the first individual.
    pub first: i32,
    /// Allele observed for the second individual.
    pub second: i32,
}

impl GenotypePair {
    /// Construct a pair of observations.
    pub fn new(first: i32, second: i32) -> Self {
        Self { first, second }
    }

    /// The same observations with the individuals exchanged.
    pub fn swapped(self) -> Self {
        Self::new(self.second, self.first)
    }
}

impl From<[i32; 2]> for GenotypePair {
    fn from([first, second]: [i32; 2]) -> Self {
        Self::new(first, second)
    }
}

/// Number of leading slots whose frequency exceeds [`ACTIVE_FREQUENCY_THRESHOLD`].
///
/// Scanning stops at the first absent slot; everything after it is treated as
/// structurally absent.
pub fn active_allele_count(row: &[f64]) -> usize {
    row.iter()
        .take_while(|&&freq| freq > ACTIVE_FREQUENCY_THRESHOLD)
        .count()
}

/// One genomic site: the observed pair, the active allele frequencies and the
/// genetic distance to the next site.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    genotypes: GenotypePair,
    frequencies: Box<[f64]>,
    distance_to_next: f64,
}

impl Site {
    /// Build a site from a full frequency row, keeping only its active prefix.
    ///
    /// No validation happens here; see
    /// [`SiteSequence::from_matrices`](super::SiteSequence::from_matrices).
    pub fn new(genotypes: GenotypePair, row: &[f64], distance_to_next: f64) -> Self {
        let active = active_allele_count(row);
        Self {
            genotypes,
            frequencies: row[..active].into(),
            distance_to_next,
        }
    }

    /// Observed pair.
    pub fn genotypes(&self) -> GenotypePair {
        self.genotypes
    }

    /// Frequencies of the active alleles.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Number of active allele classes at this site.
    pub fn active_alleles(&self) -> usize {
        self.frequencies.len()
    }

    /// Genetic distance to the next site. Meaningless for the last site.
    pub fn distance_to_next(&self) -> f64 {
        self.distance_to_next
    }

    /// Whether `allele` indexes an active allele class.
    pub fn is_active_allele(&self, allele: i32) -> bool {
        usize::try_from(allele).map_or(false, |idx| idx < self.active_alleles())
    }

    pub(crate) fn with_swapped_individuals(&self) -> Self {
        Self {
            genotypes: self.genotypes.swapped(),
            ..self.clone()
        }
    }
}
