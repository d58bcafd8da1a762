use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

/// Dispatch a per-run closure over `n_runs` independent runs, optionally in parallel.
///
/// Each invocation receives its run index and must build all of its mutable
/// state (lattice, RNG) privately. `on_run` is called once per finished run.
///
/// When `sequential` is true, runs are processed in order on the current
/// thread (no rayon overhead, best when an outer level already saturates the
/// cores). Runs not yet started when `interrupted` is raised are skipped and
/// the call returns `Err("interrupted")`.
pub fn par_over_runs<T: Send>(
    n_runs: usize,
    sequential: bool,
    interrupted: &AtomicBool,
    on_run: &(dyn Fn() + Sync),
    body: impl Fn(usize) -> Result<T, String> + Send + Sync,
) -> Result<Vec<T>, String> {
    let work = |run_id: usize| {
        if interrupted.load(Ordering::Relaxed) {
            return Err("interrupted".to_string());
        }
        let out = body(run_id)?;
        on_run();
        Ok(out)
    };

    if sequential {
        (0..n_runs).map(work).collect()
    } else {
        (0..n_runs).into_par_iter().map(work).collect()
    }
}
