pub mod grid;
pub mod window;

pub use grid::{linspace, window_centers, Histogram, MagnetizationGrid};
pub use window::{run_window, WindowSample};

use std::sync::atomic::AtomicBool;

use crate::config::{UmbrellaParams, WhamConfig};
use crate::parallel::par_over_runs;
use crate::wham::{WhamResult, WhamSolver};
use tracing::info;
use validator::Validate;

/// Umbrella + WHAM estimate at one temperature.
#[derive(Debug, Clone)]
pub struct UmbrellaEstimate {
    pub grid: MagnetizationGrid,
    pub windows: Vec<WindowSample>,
    pub wham: WhamResult,
    /// `|argmin F| / L²`; `None` only if every free-energy value is NaN.
    pub magnetization: Option<f64>,
}

/// Sample every window in `targets`, one independent run per window.
///
/// Window `k` is seeded with `base_seed + k`.
pub fn sample_windows(
    params: &UmbrellaParams,
    targets: &[f64],
    base_seed: u64,
    sequential: bool,
    interrupted: &AtomicBool,
    on_window: &(dyn Fn() + Sync),
) -> Result<(MagnetizationGrid, Vec<WindowSample>), String> {
    params.validate().map_err(|e| format!("{e}"))?;
    let grid = MagnetizationGrid::new(params.n_sites(), params.bins);
    let windows = par_over_runs(targets.len(), sequential, interrupted, on_window, |k| {
        run_window(params, &grid, targets[k], base_seed + k as u64)
    })?;
    Ok((grid, windows))
}

/// Full pipeline at one temperature: sample all windows, solve WHAM, and
/// report the magnetization that minimizes the free energy.
pub fn equilibrium_magnetization(
    params: &UmbrellaParams,
    targets: &[f64],
    wham_config: WhamConfig,
    base_seed: u64,
    sequential: bool,
    interrupted: &AtomicBool,
    on_window: &(dyn Fn() + Sync),
) -> Result<UmbrellaEstimate, String> {
    let solver = WhamSolver::new(wham_config)?;
    let (grid, windows) =
        sample_windows(params, targets, base_seed, sequential, interrupted, on_window)?;

    let histograms: Vec<&Histogram> = windows.iter().map(|w| &w.histogram).collect();
    let wham = solver.solve(
        &histograms,
        grid.points(),
        params.k_bias,
        targets,
        params.beta(),
    )?;
    let magnetization = wham.equilibrium_magnetization(grid.points(), params.n_sites());

    info!(
        size = params.size,
        temperature = params.temperature,
        n_windows = targets.len(),
        magnetization = ?magnetization,
        converged = wham.converged,
        "umbrella estimate"
    );

    Ok(UmbrellaEstimate {
        grid,
        windows,
        wham,
        magnetization,
    })
}
