use crate::core::state::{cumulative, pick_outcome};
use crate::{QubitRegister, errors::StateError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

/// Computational basis labels in outcome-index order.
pub const OUTCOME_LABELS: [&str; 4] = ["00", "01", "10", "11"];

/// A shot runner for two-qubit registers.
///
/// The `Sampler` repeats a computational basis measurement on a register and
/// aggregates the outcomes. The register itself is never modified.
#[derive(Debug, Clone)]
pub struct Sampler {
    /// Number of measurement shots per run.
    pub shots: usize,
    /// Fixed seed for reproducible runs. `None` uses the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
        }
    }
}

impl Sampler {
    /// Creates a new `Sampler` with 1024 shots and no fixed seed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Samples `register` `shots` times.
    ///
    /// # Returns
    ///
    /// A `HashMap` from bitstring label (`"00"` .. `"11"`) to count. Outcomes
    /// that never occurred are absent.
    pub fn run(&self, register: &QubitRegister) -> Result<HashMap<String, usize>, StateError> {
        let raw_counts = self.raw_counts(register)?;

        let mut counts = HashMap::new();
        for (idx, &count) in raw_counts.iter().enumerate() {
            if count > 0 {
                counts.insert(OUTCOME_LABELS[idx].to_string(), count);
            }
        }

        Ok(counts)
    }

    /// Relative frequency of each outcome over one run.
    pub fn frequencies(&self, register: &QubitRegister) -> Result<[f64; 4], StateError> {
        let raw_counts = self.raw_counts(register)?;
        let shots = self.shots.max(1) as f64;
        Ok(raw_counts.map(|count| count as f64 / shots))
    }

    fn raw_counts(&self, register: &QubitRegister) -> Result<[usize; 4], StateError> {
        match self.seed {
            Some(seed) => self.count_with(register, &mut StdRng::seed_from_u64(seed)),
            None => self.count_with(register, &mut rand::rng()),
        }
    }

    fn count_with<R: Rng + ?Sized>(
        &self,
        register: &QubitRegister,
        rng: &mut R,
    ) -> Result<[usize; 4], StateError> {
        // Pre-calculate Cumulative Distribution Function (CDF) once.
        let cdf = cumulative(&register.probabilities()?);

        let mut raw_counts = [0usize; 4];
        for _ in 0..self.shots {
            raw_counts[pick_outcome(&cdf, rng.random())] += 1;
        }

        debug!(shots = self.shots, seed = ?self.seed, ?raw_counts, "sampler run finished");
        Ok(raw_counts)
    }
}
