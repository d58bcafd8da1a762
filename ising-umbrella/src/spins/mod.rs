pub mod energy;

pub use energy::{delta_energy, delta_energy_biased, total_energy, BiasedDelta};
