//! Statistical checks of register construction and measurement sampling.

use approx::assert_abs_diff_eq;
use ndarray::{Array1, Array2, Axis, arr2};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use two_qubit_sim::errors::StateError;
use two_qubit_sim::utils::kronecker_product;
use two_qubit_sim::{QubitRegister, Sampler};

const SAMPLES: usize = 5000;
const SAMPLING_TOLERANCE: f64 = 0.05;

fn zero() -> Array2<Complex64> {
    arr2(&[
        [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
    ])
}

fn one() -> Array2<Complex64> {
    arr2(&[
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
    ])
}

/// Density matrix properties that must hold right after construction.
fn check_register(register: &QubitRegister) {
    let state = register.state();
    assert_eq!(state.dim(), (4, 4));
    assert_abs_diff_eq!(register.trace().re, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(register.trace().im, 0.0, epsilon = 1e-12);
    assert!(state.diag().iter().all(|x| x.re >= 0.0));
}

fn average_outcome(register: &QubitRegister, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = register.measure_with(SAMPLES, &mut rng).unwrap();
    samples.mean_axis(Axis(0)).unwrap()
}

fn assert_converges(initial_state: Array2<Complex64>, expected: [f64; 4]) {
    let register = QubitRegister::from_state(initial_state.clone()).unwrap();
    check_register(&register);

    let tr = initial_state.diag().sum();
    let normalized = initial_state.mapv(|x| x / tr);
    for (a, b) in register.state().iter().zip(normalized.iter()) {
        assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
        assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
    }

    let average = average_outcome(&register, 2024);
    for (a, b) in average.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = SAMPLING_TOLERANCE);
    }
}

#[test]
fn basis_state_00() {
    assert_converges(kronecker_product(&zero(), &zero()), [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn basis_state_01() {
    assert_converges(kronecker_product(&zero(), &one()), [0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn basis_state_10() {
    assert_converges(kronecker_product(&one(), &zero()), [0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn basis_state_11() {
    assert_converges(kronecker_product(&one(), &one()), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn equal_mixture_of_00_and_11() {
    let state = kronecker_product(&zero(), &zero()) + kronecker_product(&one(), &one());
    assert_converges(state, [0.5, 0.0, 0.0, 0.5]);
}

#[test]
fn equal_mixture_of_01_and_10() {
    let state = kronecker_product(&zero(), &one()) + kronecker_product(&one(), &zero());
    assert_converges(state, [0.0, 0.5, 0.5, 0.0]);
}

#[test]
fn fully_mixed_state() {
    let state = kronecker_product(&zero(), &one())
        + kronecker_product(&one(), &zero())
        + kronecker_product(&zero(), &zero())
        + kronecker_product(&one(), &one());
    assert_converges(state, [0.25, 0.25, 0.25, 0.25]);
}

#[test]
fn nested_list_input() {
    let rows = vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0],
    ];
    let register = QubitRegister::from_state(rows).unwrap();
    check_register(&register);
    assert_eq!(register.state(), QubitRegister::new().state());

    let average = average_outcome(&register, 5);
    assert_abs_diff_eq!(average[0], 1.0, epsilon = SAMPLING_TOLERANCE);
}

#[test]
fn flat_and_fixed_array_inputs() {
    let mut flat = [0.0; 16];
    flat[15] = 3.0;
    let from_flat = QubitRegister::from_state(flat).unwrap();
    let from_slice = QubitRegister::from_state(&flat[..]).unwrap();

    let mut nested = [[0.0; 4]; 4];
    nested[3][3] = 0.5;
    let from_nested = QubitRegister::from_state(nested).unwrap();

    assert_eq!(from_flat.state(), from_slice.state());
    assert_eq!(from_flat.state(), from_nested.state());
    assert_eq!(from_flat.probabilities().unwrap(), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn normalization_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..10 {
        let raw = Array2::from_shape_fn((4, 4), |_| rng.random::<f64>());
        let register = QubitRegister::from_state(&raw).unwrap();
        assert_abs_diff_eq!(register.trace().re, 1.0, epsilon = 1e-12);

        let tr: f64 = raw.diag().sum();
        let renormalized = QubitRegister::from_state(raw.mapv(|x| x / tr)).unwrap();
        for (a, b) in register.state().iter().zip(renormalized.state().iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}

#[test]
fn complex_trace_is_divided_out() {
    let rho = Array2::from_diag(&ndarray::arr1(&[
        Complex64::new(0.0, 2.0),
        Complex64::new(0.0, 2.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
    ]));
    let register = QubitRegister::from_state(rho).unwrap();
    assert_eq!(register.state()[[0, 0]], Complex64::new(0.5, 0.0));
    check_register(&register);
}

#[test]
fn unnormalizable_probabilities_are_reported() {
    // Unit trace but |ρ_kk| sums to 3.
    let rho = Array2::from_diag(&ndarray::arr1(&[2.0, -1.0, 0.0, 0.0]));
    let register = QubitRegister::from_state(rho).unwrap();
    let err = register.measure(1).unwrap_err();
    match err {
        StateError::InvalidProbabilities { sum } => assert_abs_diff_eq!(sum, 3.0, epsilon = 1e-12),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repeated_measurements_sample_the_same_state() {
    let state = kronecker_product(&zero(), &zero()) + kronecker_product(&one(), &one());
    let register = QubitRegister::from_state(state).unwrap();

    let first = average_outcome(&register, 1);
    let second = average_outcome(&register, 2);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 2.0 * SAMPLING_TOLERANCE);
    }
}

#[test]
fn sampler_frequencies_match_probabilities() {
    let rho = Array2::from_diag(&ndarray::arr1(&[1.0, 2.0, 3.0, 4.0]));
    let register = QubitRegister::from_state(rho).unwrap();

    let freqs = Sampler::new()
        .with_shots(SAMPLES)
        .with_seed(17)
        .frequencies(&register)
        .unwrap();
    let probs = register.probabilities().unwrap();
    for (f, p) in freqs.iter().zip(probs.iter()) {
        assert_abs_diff_eq!(*f, *p, epsilon = SAMPLING_TOLERANCE);
    }
}
