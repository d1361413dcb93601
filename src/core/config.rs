use crate::core::errors::StateError;

/// Default tolerance on the sum of outcome probabilities.
pub const PROBABILITY_TOLERANCE: f64 = 1e-8;

/// How a unitary acts on the stored density matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateConvention {
    /// ρ ← Uρ. Does not preserve trace or Hermiticity in general.
    #[default]
    LeftMultiply,
    /// ρ ← UρU†.
    Conjugate,
}

/// Per-register settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegisterConfig {
    /// Gate application rule.
    pub convention: GateConvention,
    /// Allowed deviation of the outcome probabilities' sum from one.
    pub probability_tolerance: f64,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            convention: GateConvention::LeftMultiply,
            probability_tolerance: PROBABILITY_TOLERANCE,
        }
    }
}

impl RegisterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convention(mut self, convention: GateConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = tolerance;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), StateError> {
        if !self.probability_tolerance.is_finite() || self.probability_tolerance <= 0.0 {
            return Err(StateError::InvalidConfig(format!(
                "probability_tolerance must be finite and positive, got {}",
                self.probability_tolerance
            )));
        }
        Ok(())
    }
}
