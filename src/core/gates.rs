use crate::core::errors::GateError;
use crate::core::state::QubitRegister;
use crate::core::utils::{self, DIM};
use ndarray::{Array2, arr2};
use num_complex::Complex64;
use std::fmt;
use tracing::debug;

/// Maximum entrywise deviation of $UU^\dagger$ and $U^\dagger U$ from identity.
pub const UNITARITY_TOLERANCE: f64 = 1e-3;

/// Conventional target qubit for the standard gate constructors.
pub const DEFAULT_TARGET: usize = 0;

/// Which constructor produced a [`Gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    Custom,
    Hadamard,
    Phase,
    Cnot,
    Cphase,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateKind::Custom => "Custom",
            GateKind::Hadamard => "Hadamard",
            GateKind::Phase => "Phase",
            GateKind::Cnot => "CNOT",
            GateKind::Cphase => "CPHASE",
        };
        f.write_str(name)
    }
}

/// Represents a two-qubit quantum gate.
///
/// A gate is defined by its 4x4 unitary matrix, validated once at
/// construction and immutable afterwards.
#[derive(Clone, Debug)]
pub struct Gate {
    kind: GateKind,
    symbol: Option<String>,
    target: Option<usize>,
    unitary: Array2<Complex64>,
}

impl Gate {
    /// Creates a new `Gate` from a unitary matrix.
    ///
    /// # Arguments
    ///
    /// * `unitary` - A 4x4 matrix with real or complex entries.
    /// * `symbol` - Optional label used when printing the gate.
    ///
    /// # Errors
    ///
    /// Returns a `GateError` if:
    /// - The matrix is not 4x4.
    /// - The matrix is not unitary within [`UNITARITY_TOLERANCE`].
    pub fn new<T>(unitary: Array2<T>, symbol: Option<&str>) -> Result<Self, GateError>
    where
        T: Into<Complex64> + Clone,
    {
        Self::with_tolerance(unitary, symbol, UNITARITY_TOLERANCE)
    }

    /// Same as [`Gate::new`] with an explicit unitarity tolerance.
    ///
    /// Fails with `GateError::InvalidTolerance` unless `tolerance` is finite and positive.
    pub fn with_tolerance<T>(
        unitary: Array2<T>,
        symbol: Option<&str>,
        tolerance: f64,
    ) -> Result<Self, GateError>
    where
        T: Into<Complex64> + Clone,
    {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(GateError::InvalidTolerance(tolerance));
        }
        utils::ensure_two_qubit_shape(&unitary)?;
        let unitary = unitary.mapv(Into::into);

        Self::check_unitary(&unitary, tolerance)?;

        Ok(Self {
            kind: GateKind::Custom,
            symbol: symbol.map(str::to_owned),
            target: None,
            unitary,
        })
    }

    /// Checks both $UU^\dagger \approx I$ and $U^\dagger U \approx I$.
    fn check_unitary(matrix: &Array2<Complex64>, tolerance: f64) -> Result<(), GateError> {
        let eye = Array2::<Complex64>::eye(DIM);
        let u_dagger = utils::dagger(matrix);

        let deviation = utils::max_deviation(&matrix.dot(&u_dagger), &eye)
            .max(utils::max_deviation(&u_dagger.dot(matrix), &eye));

        if deviation.is_nan() || deviation >= tolerance {
            return Err(GateError::NonUnitary { deviation });
        }
        Ok(())
    }

    fn standard(
        kind: GateKind,
        symbol: &str,
        target: usize,
        unitary: Array2<Complex64>,
    ) -> Result<Self, GateError> {
        let mut gate = Self::new(unitary, Some(symbol))?;
        gate.kind = kind;
        gate.target = Some(target);
        debug!(%kind, target, "constructed gate");
        Ok(gate)
    }

    /// Applies the gate to `register`, mutating its state in place.
    pub fn apply(&self, register: &mut QubitRegister) {
        debug!(kind = %self.kind, symbol = ?self.symbol, "applying gate");
        register.transform(&self.unitary);
    }

    /// Human-readable form: type name, symbol and operator.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Constructor that produced this gate.
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Display label, if any.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Target qubit for the standard gates, `None` for custom ones.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// The validated 4x4 operator.
    pub fn unitary(&self) -> &Array2<Complex64> {
        &self.unitary
    }

    // --- Standard Gates ---
    //
    // Pass DEFAULT_TARGET (qubit 0) when no particular qubit is intended.

    /// Hadamard on `target`: $H \otimes I$ for qubit 0, $I \otimes H$ for qubit 1.
    pub fn hadamard(target: usize) -> Result<Gate, GateError> {
        let factor = 1.0 / 2.0_f64.sqrt();
        let h = arr2(&[
            [Complex64::new(factor, 0.0), Complex64::new(factor, 0.0)],
            [Complex64::new(factor, 0.0), Complex64::new(-factor, 0.0)],
        ]);
        let unitary = on_single_qubit(&h, target)?;
        Self::standard(GateKind::Hadamard, "H", target, unitary)
    }

    /// Phase gate $S = \mathrm{diag}(1, i)$ on `target`.
    pub fn phase(target: usize) -> Result<Gate, GateError> {
        let s = arr2(&[
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0)],
        ]);
        let unitary = on_single_qubit(&s, target)?;
        Self::standard(GateKind::Phase, "S", target, unitary)
    }

    /// Controlled-NOT flipping `target`, controlled by the other qubit.
    pub fn cnot(target: usize) -> Result<Gate, GateError> {
        let x = arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ]);
        let ground = Array2::from_diag(&ndarray::arr1(&[
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
        ]));
        let excited = Array2::from_diag(&ndarray::arr1(&[
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        ]));
        let eye = Array2::<Complex64>::eye(2);

        let unitary = match target {
            0 => {
                utils::kronecker_product(&eye, &ground) + utils::kronecker_product(&x, &excited)
            }
            1 => {
                utils::kronecker_product(&ground, &eye) + utils::kronecker_product(&excited, &x)
            }
            other => return Err(GateError::InvalidTarget(other)),
        };
        Self::standard(GateKind::Cnot, "CNOT", target, unitary)
    }

    /// Controlled-Z, $\mathrm{diag}(1, 1, 1, -1)$.
    ///
    /// The gate is symmetric in its qubits; `target` is validated and recorded only.
    pub fn cphase(target: usize) -> Result<Gate, GateError> {
        if target > 1 {
            return Err(GateError::InvalidTarget(target));
        }
        let unitary = Array2::from_diag(&ndarray::arr1(&[
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(-1.0, 0.0),
        ]));
        Self::standard(GateKind::Cphase, "CZ", target, unitary)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "QuantumGate {} ({}):",
            self.kind,
            self.symbol.as_deref().unwrap_or("None")
        )?;
        write!(f, "{}", self.unitary)
    }
}

/// Lifts a 2x2 operator to the two-qubit space, acting on `target`.
fn on_single_qubit(op: &Array2<Complex64>, target: usize) -> Result<Array2<Complex64>, GateError> {
    let eye = Array2::<Complex64>::eye(2);
    match target {
        0 => Ok(utils::kronecker_product(op, &eye)),
        1 => Ok(utils::kronecker_product(&eye, op)),
        other => Err(GateError::InvalidTarget(other)),
    }
}
