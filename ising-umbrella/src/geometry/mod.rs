pub mod lattice;

pub use lattice::{SpinLattice, N_NEIGHBORS};
