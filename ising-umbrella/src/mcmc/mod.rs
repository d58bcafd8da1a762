pub mod magnetization;
pub mod sweep;

pub use magnetization::TrackedMagnetization;
pub use sweep::{biased_sweep, metropolis_accept, metropolis_sweep};
