//! Weighted Histogram Analysis Method.
//!
//! Combines the magnetization histograms of several harmonically biased
//! windows into one unbiased distribution `P(M)` by iterating the WHAM
//! equations for the per-window free-energy offsets `f_k` to a fixed point:
//!
//! ```text
//! D(M)  = Σ_k n_k exp(β (f_k − V_k(M)))
//! P(M)  = Σ_k H_k(M) / D(M),          normalized so ∫ P dM = 1
//! f_k   = −ln(∫ P(M) exp(−β V_k(M)) dM + ε) / β
//! ```
//!
//! The solver never fails on degenerate data. Empty input, a vanishing
//! normalization or hitting the iteration cap all return the last iterate
//! with [`WhamResult::converged`] / [`WhamResult::degenerate`] set accordingly.

pub mod integrate;

pub use integrate::trapezoid;

use crate::config::WhamConfig;
use tracing::{info, warn};
use validator::Validate;

/// Harmonic umbrella bias `V(M) = ½ k (M − M0)²`.
#[inline]
pub fn bias_potential(k_bias: f64, target: f64, m: f64) -> f64 {
    let d = m - target;
    0.5 * k_bias * d * d
}

/// Unbiased estimate produced by [`WhamSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct WhamResult {
    /// `P(M)` on the magnetization grid, integrating to 1 unless degenerate.
    pub probability: Vec<f64>,
    /// `F(M) = −ln(P(M) + ε) / β`.
    pub free_energy: Vec<f64>,
    /// Final per-window offsets `f_k`.
    pub offsets: Vec<f64>,
    pub iterations: usize,
    /// `max_k |Δf_k|` of the last iteration.
    pub max_change: f64,
    pub converged: bool,
    /// No samples at all, or `P` could not be normalized.
    pub degenerate: bool,
}

impl WhamResult {
    /// Grid index of the free-energy minimum, skipping NaN. First index wins ties.
    pub fn minimum(&self) -> Option<usize> {
        self.free_energy
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_nan())
            .fold(None, |best: Option<(usize, f64)>, (i, &f)| match best {
                Some((_, b)) if b <= f => best,
                _ => Some((i, f)),
            })
            .map(|(i, _)| i)
    }

    /// `|argmin F| / N`, the equilibrium magnetization per site.
    pub fn equilibrium_magnetization(&self, grid: &[f64], n_sites: usize) -> Option<f64> {
        self.minimum().map(|i| grid[i].abs() / n_sites as f64)
    }

    /// Whether the estimate can be trusted: converged and non-degenerate.
    pub fn is_reliable(&self) -> bool {
        self.converged && !self.degenerate
    }
}

pub struct WhamSolver {
    config: WhamConfig,
}

impl WhamSolver {
    pub fn new(config: WhamConfig) -> Result<Self, String> {
        config.validate().map_err(|e| format!("{e}"))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WhamConfig {
        &self.config
    }

    /// Solve the WHAM equations for `histograms[k]` sampled under bias
    /// `½ k_bias (M − targets[k])²`, all binned on `grid`.
    ///
    /// Errors only on malformed input (mismatched lengths, non-positive `β`,
    /// negative bias). Non-convergence and empty data are reported through
    /// the result flags.
    #[allow(clippy::needless_range_loop)]
    pub fn solve<H: AsRef<[u64]>>(
        &self,
        histograms: &[H],
        grid: &[f64],
        k_bias: f64,
        targets: &[f64],
        beta: f64,
    ) -> Result<WhamResult, String> {
        let n_bins = grid.len();
        let n_windows = histograms.len();
        let rows: Vec<&[u64]> = histograms.iter().map(|h| h.as_ref()).collect();

        if n_bins < 2 {
            return Err(format!("grid needs at least 2 points, got {n_bins}"));
        }
        if targets.len() != n_windows {
            return Err(format!(
                "{n_windows} histograms but {} window targets",
                targets.len()
            ));
        }
        if let Some((k, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_bins) {
            return Err(format!(
                "histogram {k} has {} bins, grid has {n_bins}",
                row.len()
            ));
        }
        if !(beta > 0.0 && beta.is_finite()) {
            return Err(format!("beta must be finite and > 0, got {beta}"));
        }
        if !(k_bias >= 0.0 && k_bias.is_finite()) {
            return Err(format!("k_bias must be finite and >= 0, got {k_bias}"));
        }

        let eps = self.config.epsilon;
        let tol = self.config.tolerance;

        let n_k: Vec<f64> = rows
            .iter()
            .map(|row| row.iter().sum::<u64>() as f64)
            .collect();
        let mut total_h = vec![0.0f64; n_bins];
        for row in &rows {
            for (t, &c) in total_h.iter_mut().zip(row.iter()) {
                *t += c as f64;
            }
        }

        if n_windows == 0 || n_k.iter().sum::<f64>() == 0.0 {
            warn!(n_windows, "WHAM input has no samples; returning flat zero estimate");
            return Ok(WhamResult {
                probability: vec![0.0; n_bins],
                free_energy: vec![-eps.ln() / beta; n_bins],
                offsets: vec![0.0; n_windows],
                iterations: 0,
                max_change: 0.0,
                converged: false,
                degenerate: true,
            });
        }

        // Flat [n_windows][n_bins] layout.
        let mut bias = vec![0.0f64; n_windows * n_bins];
        let mut boltz = vec![0.0f64; n_windows * n_bins];
        for (k, &target) in targets.iter().enumerate() {
            for (m, &x) in grid.iter().enumerate() {
                let v = bias_potential(k_bias, target, x);
                bias[k * n_bins + m] = v;
                boltz[k * n_bins + m] = (-beta * v).exp();
            }
        }

        let mut f = vec![0.0f64; n_windows];
        let mut f_new = vec![0.0f64; n_windows];
        let mut p = vec![0.0f64; n_bins];
        let mut integrand = vec![0.0f64; n_bins];
        let mut iterations = 0;
        let mut max_change = f64::INFINITY;
        let mut converged = false;
        let mut degenerate = false;

        while iterations < self.config.max_iterations {
            iterations += 1;

            for m in 0..n_bins {
                let denom: f64 = (0..n_windows)
                    .map(|k| n_k[k] * (beta * (f[k] - bias[k * n_bins + m])).exp())
                    .sum();
                p[m] = if denom > eps { total_h[m] / denom } else { 0.0 };
            }

            let norm = trapezoid(&p, grid);
            if norm > eps && norm.is_finite() {
                for v in p.iter_mut() {
                    *v /= norm;
                }
                degenerate = false;
            } else {
                degenerate = true;
            }

            for k in 0..n_windows {
                let row = &boltz[k * n_bins..(k + 1) * n_bins];
                for ((out, &pm), &b) in integrand.iter_mut().zip(p.iter()).zip(row) {
                    *out = pm * b;
                }
                f_new[k] = -(trapezoid(&integrand, grid) + eps).ln() / beta;
            }

            max_change = f
                .iter()
                .zip(f_new.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            std::mem::swap(&mut f, &mut f_new);

            if max_change < tol {
                converged = true;
                break;
            }
        }

        if converged {
            info!(iterations, max_change, n_windows, "WHAM converged");
        } else {
            warn!(
                iterations,
                max_change,
                n_windows,
                "WHAM did not converge; returning last iterate"
            );
        }
        if degenerate {
            warn!("WHAM probability could not be normalized");
        }

        let free_energy = p.iter().map(|&pm| -(pm + eps).ln() / beta).collect();

        Ok(WhamResult {
            probability: p,
            free_energy,
            offsets: f,
            iterations,
            max_change,
            converged,
            degenerate,
        })
    }
}
