pub mod run;

pub use run::Run;

use std::sync::atomic::AtomicBool;

use crate::config::SimParams;
use crate::geometry::SpinLattice;
use crate::parallel::par_over_runs;
use crate::statistics::{
    ColumnCorrelationAccum, ColumnCorrelationResult, CorrelationAccum, CorrelationResult,
    MagnetizationAccum, MagnetizationResult,
};
use tracing::debug;
use validator::Validate;

/// Run the full unbiased Monte Carlo loop (equilibration + measurement) for one [`Run`].
///
/// `n_eq` sweeps are discarded; `measure` is called with the lattice after
/// each of the following `n_steps` sweeps.
pub fn run_sweep_loop(
    run: &mut Run,
    params: &SimParams,
    mut measure: impl FnMut(&SpinLattice),
) -> Result<(), String> {
    params.validate().map_err(|e| format!("{e}"))?;
    if run.lattice.size != params.size {
        return Err(format!(
            "run lattice has L = {}, params expect L = {}",
            run.lattice.size, params.size
        ));
    }

    for _ in 0..params.n_eq {
        run.sweep(params);
    }
    for _ in 0..params.n_steps {
        run.sweep(params);
        measure(&run.lattice);
    }

    debug!(
        seed = run.seed,
        size = params.size,
        temperature = params.temperature,
        field = params.field,
        acceptance = run.acceptance_rate(),
        "run finished"
    );
    Ok(())
}

/// ⟨m⟩, ⟨|m|⟩ and ⟨m²⟩ for a fresh run seeded with `seed`.
pub fn measure_magnetization_stats(
    params: &SimParams,
    seed: u64,
) -> Result<MagnetizationResult, String> {
    params.validate().map_err(|e| format!("{e}"))?;
    let mut run = Run::new(params.size, seed);
    let mut acc = MagnetizationAccum::new();
    run_sweep_loop(&mut run, params, |lat| acc.push(lat))?;
    Ok(acc.finish())
}

/// Average magnetization per site, `⟨M⟩ / L²`.
pub fn measure_magnetization(params: &SimParams, seed: u64) -> Result<f64, String> {
    Ok(measure_magnetization_stats(params, seed)?.mean)
}

/// Average absolute magnetization per site, `⟨|M|⟩ / L²`.
///
/// Preferred near and below the critical point, where the signed average
/// self-averages toward zero through domain flips.
pub fn measure_abs_magnetization(params: &SimParams, seed: u64) -> Result<f64, String> {
    Ok(measure_magnetization_stats(params, seed)?.abs_mean)
}

/// Connected full-lattice correlation `C(r)` for `r ∈ [0, L/2]`.
pub fn measure_spin_correlation(
    params: &SimParams,
    seed: u64,
) -> Result<CorrelationResult, String> {
    params.validate().map_err(|e| format!("{e}"))?;
    let mut run = Run::new(params.size, seed);
    let mut acc = CorrelationAccum::new(params.size);
    run_sweep_loop(&mut run, params, |lat| acc.push(lat))?;
    Ok(acc.finish())
}

/// Correlation `C(r)` restricted to column `col`.
pub fn measure_column_correlation(
    params: &SimParams,
    col: usize,
    seed: u64,
) -> Result<ColumnCorrelationResult, String> {
    params.validate().map_err(|e| format!("{e}"))?;
    if col >= params.size {
        return Err(format!(
            "column index {col} out of range for L = {}",
            params.size
        ));
    }
    let mut run = Run::new(params.size, seed);
    let mut acc = ColumnCorrelationAccum::new(params.size, col);
    run_sweep_loop(&mut run, params, |lat| acc.push(lat))?;
    Ok(acc.finish())
}

/// Average a scalar measurement over `n_repeats` independent seeds.
///
/// Run `r` is seeded with `base_seed + r`.
pub fn average_over_seeds(
    n_repeats: usize,
    base_seed: u64,
    sequential: bool,
    interrupted: &AtomicBool,
    on_run: &(dyn Fn() + Sync),
    measure: impl Fn(u64) -> Result<f64, String> + Send + Sync,
) -> Result<f64, String> {
    if n_repeats < 1 {
        return Err("n_repeats must be >= 1".to_string());
    }
    let values = par_over_runs(n_repeats, sequential, interrupted, on_run, |r| {
        measure(base_seed + r as u64)
    })?;
    Ok(values.iter().sum::<f64>() / n_repeats as f64)
}

/// Average correlation functions over `n_repeats` independent seeds.
pub fn average_correlation_over_seeds(
    params: &SimParams,
    n_repeats: usize,
    base_seed: u64,
    sequential: bool,
    interrupted: &AtomicBool,
    on_run: &(dyn Fn() + Sync),
) -> Result<CorrelationResult, String> {
    if n_repeats < 1 {
        return Err("n_repeats must be >= 1".to_string());
    }
    let results = par_over_runs(n_repeats, sequential, interrupted, on_run, |r| {
        measure_spin_correlation(params, base_seed + r as u64)
    })?;
    Ok(CorrelationResult::aggregate(&results))
}

/// ⟨m⟩ for each external field in `fields`, one independent run per field.
///
/// The run for `fields[k]` is seeded with `base_seed + k`.
pub fn magnetization_vs_field(
    params: &SimParams,
    fields: &[f64],
    base_seed: u64,
    sequential: bool,
    interrupted: &AtomicBool,
    on_run: &(dyn Fn() + Sync),
) -> Result<Vec<f64>, String> {
    par_over_runs(fields.len(), sequential, interrupted, on_run, |k| {
        measure_magnetization(&params.with_field(fields[k]), base_seed + k as u64)
    })
}
