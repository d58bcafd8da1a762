use std::sync::atomic::AtomicBool;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use ising_umbrella::{equilibrium_magnetization, window_centers, UmbrellaParams, WhamConfig};
use tracing_subscriber::EnvFilter;

const L: usize = 10;
const N_WINDOWS: usize = 31;
const K_BIAS: f64 = 2.0;
const BINS: usize = 351;
const N_EQ: usize = 50;
const N_STEPS: usize = 500;
const TEMPS: [f64; 5] = [1.5, 2.0, 2.27, 2.5, 3.0];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let targets = window_centers(L * L, N_WINDOWS);
    let interrupted = AtomicBool::new(false);

    println!(
        "Lattice: {}x{}  |  Windows: {}  |  k: {}  |  Bins: {}  |  Sweeps: {}+{}",
        L, L, N_WINDOWS, K_BIAS, BINS, N_EQ, N_STEPS
    );
    println!("{}", "-".repeat(70));

    let t0 = Instant::now();
    for &temperature in &TEMPS {
        let params = UmbrellaParams {
            size: L,
            coupling: 1.0,
            temperature,
            k_bias: K_BIAS,
            n_eq: N_EQ,
            n_steps: N_STEPS,
            bins: BINS,
        };

        let pb = ProgressBar::new(N_WINDOWS as u64);
        pb.set_style(
            ProgressStyle::with_template("T={msg} [{bar:40}] {pos}/{len} windows")
                .unwrap()
                .progress_chars("=> "),
        );
        pb.set_message(format!("{temperature:.2}"));
        let on_window = || pb.inc(1);

        let t = Instant::now();
        let estimate = equilibrium_magnetization(
            &params,
            &targets,
            WhamConfig::default(),
            42,
            false,
            &interrupted,
            &on_window,
        )
        .unwrap();
        pb.finish_and_clear();

        let m = estimate
            .magnetization
            .map_or_else(|| "n/a".to_string(), |m| format!("{m:.4}"));
        println!(
            "T = {:.2}  |  |m| = {}  |  WHAM iters = {}{}  |  {:.3} s",
            temperature,
            m,
            estimate.wham.iterations,
            if estimate.wham.converged { "" } else { " (not converged)" },
            t.elapsed().as_secs_f64()
        );
    }

    println!("Total: {:.3} s", t0.elapsed().as_secs_f64());
}
