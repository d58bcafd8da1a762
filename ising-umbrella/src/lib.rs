pub mod config;
pub mod geometry;
pub mod mcmc;
pub mod parallel;
pub mod simulation;
pub mod spins;
pub mod statistics;
pub mod umbrella;
pub mod wham;

pub use config::{SimParams, UmbrellaParams, WhamConfig};
pub use geometry::SpinLattice;
pub use simulation::{
    average_correlation_over_seeds, average_over_seeds, magnetization_vs_field,
    measure_abs_magnetization, measure_column_correlation, measure_magnetization,
    measure_magnetization_stats, measure_spin_correlation, run_sweep_loop, Run,
};
pub use statistics::{ColumnCorrelationResult, CorrelationResult, MagnetizationResult};
pub use umbrella::{
    equilibrium_magnetization, run_window, sample_windows, window_centers, Histogram,
    MagnetizationGrid, UmbrellaEstimate, WindowSample,
};
pub use wham::{trapezoid, WhamResult, WhamSolver};
