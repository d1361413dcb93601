//! Two-qubit quantum simulator on a 4x4 density matrix.
//!
//! A [`QubitRegister`] holds the state, [`Gate`]s transform it and
//! measurement samples computational basis outcomes without collapsing it.
//!
//! ```
//! use two_qubit_sim::{Gate, QubitRegister};
//!
//! let mut register = QubitRegister::new();
//! Gate::cphase(0)?.apply(&mut register);
//! let samples = register.measure(10)?;
//! assert_eq!(samples.dim(), (10, 4));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;
mod sampler;

pub use crate::core::{
    DEFAULT_TARGET, Gate, GateConvention, GateKind, IntoStateMatrix, QubitRegister,
    RegisterConfig, UNITARITY_TOLERANCE, config, errors, utils,
};
pub use crate::sampler::{OUTCOME_LABELS, Sampler};
