use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use ising_umbrella::{
    average_over_seeds, equilibrium_magnetization, magnetization_vs_field,
    measure_abs_magnetization, measure_column_correlation, measure_magnetization,
    measure_spin_correlation, sample_windows, window_centers, SimParams, UmbrellaParams,
    WhamConfig,
};

fn sim(size: usize, temperature: f64, n_eq: usize, n_steps: usize) -> SimParams {
    SimParams {
        size,
        coupling: 1.0,
        temperature,
        field: 0.0,
        n_eq,
        n_steps,
    }
}

fn umbrella(temperature: f64) -> UmbrellaParams {
    UmbrellaParams {
        size: 4,
        coupling: 1.0,
        temperature,
        k_bias: 0.5,
        n_eq: 100,
        n_steps: 400,
        bins: 33,
    }
}

#[test]
fn test_paramagnet_has_no_net_magnetization() {
    let params = sim(10, 3.0, 50, 2000);
    let interrupted = AtomicBool::new(false);
    let m = average_over_seeds(16, 100, false, &interrupted, &|| {}, |seed| {
        measure_magnetization(&params, seed)
    })
    .unwrap();
    assert!(m.abs() < 0.1, "<m> = {m}");
}

#[test]
fn test_ferromagnet_orders() {
    let params = sim(10, 1.0, 50, 2000);
    let interrupted = AtomicBool::new(false);
    let m = average_over_seeds(16, 7, false, &interrupted, &|| {}, |seed| {
        measure_abs_magnetization(&params, seed)
    })
    .unwrap();
    assert!(m > 0.95, "<|m|> = {m}");
}

#[test]
fn test_field_polarizes() {
    let params = sim(8, 2.0, 200, 300);
    let interrupted = AtomicBool::new(false);
    let fields = [-1.0, 0.0, 1.0];
    let ms = magnetization_vs_field(&params, &fields, 11, false, &interrupted, &|| {}).unwrap();
    assert_eq!(ms.len(), 3);
    assert!(ms[0] < -0.5, "m(h=-1) = {}", ms[0]);
    assert!(ms[2] > 0.5, "m(h=+1) = {}", ms[2]);
}

#[test]
fn test_correlations_decay_above_critical_point() {
    let params = sim(12, 5.0, 200, 400);
    let full = measure_spin_correlation(&params, 3).unwrap();
    assert_eq!(full.correlation.len(), 7);
    assert!(full.correlation[0] > 0.9);
    assert!(full.correlation[6].abs() < 0.2, "C(6) = {}", full.correlation[6]);

    let col = measure_column_correlation(&params, 5, 3).unwrap();
    assert_eq!(col.column, 5);
    assert!(col.correlation[0] > 0.9);
    assert!(measure_column_correlation(&params, 12, 3).is_err());
}

#[test]
fn test_umbrella_ordered_phase() {
    let params = umbrella(1.5);
    let targets = window_centers(16, 9);
    let interrupted = AtomicBool::new(false);
    let est = equilibrium_magnetization(
        &params,
        &targets,
        WhamConfig::default(),
        1,
        false,
        &interrupted,
        &|| {},
    )
    .unwrap();
    assert!(!est.wham.degenerate);
    let m = est.magnetization.unwrap();
    assert!(m > 0.6, "m = {m}");
    assert!(m <= 1.0);
}

#[test]
fn test_umbrella_disordered_phase() {
    let params = umbrella(4.0);
    let targets = window_centers(16, 9);
    let interrupted = AtomicBool::new(false);
    let est = equilibrium_magnetization(
        &params,
        &targets,
        WhamConfig::default(),
        2,
        false,
        &interrupted,
        &|| {},
    )
    .unwrap();
    let m = est.magnetization.unwrap();
    assert!(m < 0.5, "m = {m}");
    let total: f64 = est.wham.probability.iter().sum();
    assert!(total > 0.0);
}

#[test]
fn test_sequential_and_parallel_windows_agree() {
    let params = umbrella(2.0);
    let targets = window_centers(16, 5);
    let interrupted = AtomicBool::new(false);
    let (_, seq) = sample_windows(&params, &targets, 5, true, &interrupted, &|| {}).unwrap();
    let (_, par) = sample_windows(&params, &targets, 5, false, &interrupted, &|| {}).unwrap();
    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(a.histogram, b.histogram);
        assert_eq!(a.final_magnetization, b.final_magnetization);
    }
}

#[test]
fn test_window_callback_and_interrupt() {
    let params = umbrella(2.0);
    let targets = window_centers(16, 6);
    let done = AtomicUsize::new(0);
    let interrupted = AtomicBool::new(false);
    sample_windows(&params, &targets, 0, false, &interrupted, &|| {
        done.fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();
    assert_eq!(done.load(Ordering::Relaxed), 6);

    let interrupted = AtomicBool::new(true);
    assert!(sample_windows(&params, &targets, 0, false, &interrupted, &|| {}).is_err());
}
