use crate::core::config::{GateConvention, RegisterConfig};
use crate::core::errors::{DimensionError, StateError};
use crate::core::input::IntoStateMatrix;
use crate::core::utils::{self, DIM};
use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use tracing::{debug, trace, warn};

/// Density matrix of a two-qubit system.
///
/// Outcome indices follow the computational basis order
/// `|00>, |01>, |10>, |11>`, with qubit 0 as the most significant bit.
#[derive(Clone, Debug)]
pub struct QubitRegister {
    state: Array2<Complex64>,
    config: RegisterConfig,
}

impl Default for QubitRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl QubitRegister {
    /// Creates a register in the pure state |00><00|.
    pub fn new() -> Self {
        let mut state = Array2::<Complex64>::zeros((DIM, DIM));
        state[[0, 0]] = Complex64::new(1.0, 0.0);

        Self {
            state,
            config: RegisterConfig::default(),
        }
    }

    /// Creates a register from an unnormalized density matrix.
    ///
    /// The input is divided by its trace, so any positive multiple of a
    /// valid density matrix yields the same register.
    ///
    /// # Errors
    ///
    /// Returns a `StateError` if:
    /// - The input is not 4x4.
    /// - The trace is zero or not finite, or dividing by it overflows.
    pub fn from_state(input: impl IntoStateMatrix) -> Result<Self, StateError> {
        Self::with_config(input, RegisterConfig::default())
    }

    /// Same as [`QubitRegister::from_state`] with explicit settings.
    pub fn with_config(
        input: impl IntoStateMatrix,
        config: RegisterConfig,
    ) -> Result<Self, StateError> {
        config.validate()?;
        let raw = input.into_state_matrix()?;

        let tr = utils::trace(&raw);
        if !(tr.re.is_finite() && tr.im.is_finite()) || (tr.re == 0.0 && tr.im == 0.0) {
            return Err(StateError::InvalidTrace(tr));
        }

        // Dividing by |tr| and then by the unit phase avoids squaring tiny traces.
        let scale = tr.norm();
        let phase = tr / scale;
        let state = raw.mapv(|x| (x / scale) / phase);
        if state.iter().any(|x| !(x.re.is_finite() && x.im.is_finite())) {
            return Err(StateError::InvalidTrace(tr));
        }
        debug!(trace = %tr, convention = ?config.convention, "initialized register");

        Ok(Self { state, config })
    }

    /// Applies a 4x4 operator to the state.
    ///
    /// Uses the register's [`GateConvention`]: $\rho \leftarrow U\rho$ by default.
    pub fn apply_unitary(&mut self, unitary: &Array2<Complex64>) -> Result<(), DimensionError> {
        utils::ensure_two_qubit_shape(unitary)?;
        self.transform(unitary);
        Ok(())
    }

    /// Applies an operator already known to be 4x4.
    pub(crate) fn transform(&mut self, unitary: &Array2<Complex64>) {
        let temp = unitary.dot(&self.state);
        self.state = match self.config.convention {
            GateConvention::LeftMultiply => temp,
            GateConvention::Conjugate => temp.dot(&utils::dagger(unitary)),
        };
    }

    /// Probability of each computational basis outcome, $|\mathrm{tr}(\Pi_k \rho)|$.
    ///
    /// # Errors
    ///
    /// `StateError::InvalidProbabilities` when the values do not sum to one
    /// within the configured tolerance. They are never renormalized.
    pub fn probabilities(&self) -> Result<[f64; DIM], StateError> {
        let mut probs = [0.0; DIM];
        for (k, p) in probs.iter_mut().enumerate() {
            *p = utils::trace(&utils::projector(k).dot(&self.state)).norm();
        }

        let sum: f64 = probs.iter().sum();
        if !sum.is_finite() || (sum - 1.0).abs() > self.config.probability_tolerance {
            warn!(sum, ?probs, "outcome probabilities are not normalized");
            return Err(StateError::InvalidProbabilities { sum });
        }

        Ok(probs)
    }

    /// Draws `number_of_samples` outcomes using the thread-local generator.
    ///
    /// See [`QubitRegister::measure_with`].
    pub fn measure(&self, number_of_samples: usize) -> Result<Array2<f64>, StateError> {
        self.measure_with(number_of_samples, &mut rand::rng())
    }

    /// Draws `number_of_samples` independent outcomes from `rng`.
    ///
    /// Row `i` of the result is the one-hot encoding of the `i`-th outcome.
    /// The state is left untouched: repeated calls sample the same distribution.
    pub fn measure_with<R: Rng + ?Sized>(
        &self,
        number_of_samples: usize,
        rng: &mut R,
    ) -> Result<Array2<f64>, StateError> {
        let cdf = cumulative(&self.probabilities()?);

        let mut samples = Array2::<f64>::zeros((number_of_samples, DIM));
        for mut row in samples.rows_mut() {
            row[pick_outcome(&cdf, rng.random())] = 1.0;
        }

        trace!(number_of_samples, "sampled register");
        Ok(samples)
    }

    /// Current density matrix.
    pub fn state(&self) -> &Array2<Complex64> {
        &self.state
    }

    /// Settings this register was built with.
    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// Trace of the current state; drifts from 1 under left multiplication.
    pub fn trace(&self) -> Complex64 {
        utils::trace(&self.state)
    }

    /// $\mathrm{Re}\,\mathrm{tr}(\rho^2)$: 1 for pure states, 1/4 for the maximally mixed one.
    pub fn purity(&self) -> f64 {
        utils::trace(&self.state.dot(&self.state)).re
    }

    /// Whether $\rho = \rho^\dagger$ entrywise within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        utils::is_hermitian(&self.state, tol)
    }

    /// Hermitian, unit trace and positive semi-definite, each within `tol`.
    pub fn is_physical(&self, tol: f64) -> bool {
        if !self.is_hermitian(tol) {
            return false;
        }
        if (self.trace() - Complex64::new(1.0, 0.0)).norm() > tol {
            return false;
        }
        utils::hermitian_eigenvalues(&self.state)
            .iter()
            .all(|&ev| ev >= -tol)
    }
}

/// Running sums of `probs`, scaled so the last entry is exactly one.
pub(crate) fn cumulative(probs: &[f64]) -> Vec<f64> {
    let mut cdf: Vec<f64> = probs
        .iter()
        .scan(0.0, |acc, &p| {
            *acc += p;
            Some(*acc)
        })
        .collect();
    if let Some(&total) = cdf.last() {
        if total > 0.0 {
            cdf.iter_mut().for_each(|c| *c /= total);
        }
    }
    cdf
}

/// Index of the first cumulative bucket above `roll`.
///
/// A roll past the end falls into the last bucket with nonzero mass.
pub(crate) fn pick_outcome(cdf: &[f64], roll: f64) -> usize {
    cdf.iter()
        .position(|&cumulative| roll < cumulative)
        .unwrap_or_else(|| last_reachable(cdf))
}

fn last_reachable(cdf: &[f64]) -> usize {
    (0..cdf.len())
        .rev()
        .find(|&i| cdf[i] > if i == 0 { 0.0 } else { cdf[i - 1] })
        .unwrap_or(0)
}
