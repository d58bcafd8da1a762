use crate::config::UmbrellaParams;
use crate::mcmc::{self, TrackedMagnetization};
use crate::simulation::Run;
use crate::umbrella::{Histogram, MagnetizationGrid};
use tracing::debug;
use validator::Validate;

/// Output of one biased window: the magnetization histogram plus bookkeeping.
#[derive(Debug, Clone)]
pub struct WindowSample {
    /// Target magnetization `M0` of the harmonic bias.
    pub target: f64,
    pub histogram: Histogram,
    /// Accepted flips during the measurement phase.
    pub accepted: usize,
    /// Trial flips during the measurement phase (`n_steps · L²`).
    pub trials: usize,
    /// Tracked magnetization at the end of the run.
    pub final_magnetization: i64,
}

impl WindowSample {
    pub fn acceptance_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.trials as f64
    }
}

/// Sample one umbrella window centered on `target` from a fresh lattice.
///
/// Runs `n_eq` discarded biased sweeps, then `n_steps` biased sweeps that
/// record the running magnetization into the histogram after every single
/// trial flip.
pub fn run_window(
    params: &UmbrellaParams,
    grid: &MagnetizationGrid,
    target: f64,
    seed: u64,
) -> Result<WindowSample, String> {
    params.validate().map_err(|e| format!("{e}"))?;
    if grid.bins() != params.bins {
        return Err(format!(
            "grid has {} bins, params expect {}",
            grid.bins(),
            params.bins
        ));
    }

    let beta = params.beta();
    let mut run = Run::new(params.size, seed);
    let mut magnetization = TrackedMagnetization::new(&run.lattice);

    for _ in 0..params.n_eq {
        mcmc::biased_sweep(
            &mut run.lattice,
            &mut magnetization,
            beta,
            params.coupling,
            params.k_bias,
            target,
            &mut run.rng,
            |_| {},
        );
    }
    debug_assert!(magnetization.matches(&run.lattice));

    let mut histogram = Histogram::new(params.bins);
    let mut accepted = 0;
    for _ in 0..params.n_steps {
        accepted += mcmc::biased_sweep(
            &mut run.lattice,
            &mut magnetization,
            beta,
            params.coupling,
            params.k_bias,
            target,
            &mut run.rng,
            |m| histogram.increment(grid.bin_index(m)),
        );
    }
    debug_assert!(magnetization.matches(&run.lattice));

    let trials = params.n_steps * params.n_sites();
    debug!(
        seed,
        target,
        temperature = params.temperature,
        final_magnetization = magnetization.value(),
        acceptance = accepted as f64 / trials as f64,
        "umbrella window finished"
    );

    Ok(WindowSample {
        target,
        histogram,
        accepted,
        trials,
        final_magnetization: magnetization.value(),
    })
}
