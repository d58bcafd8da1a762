use crate::geometry::SpinLattice;

/// Running total magnetization M for biased sampling.
///
/// Updated by ±2 on every accepted flip instead of re-summing the lattice.
/// Must always equal `lattice.total_sum()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedMagnetization {
    value: i64,
}

impl TrackedMagnetization {
    pub fn new(lattice: &SpinLattice) -> Self {
        Self {
            value: lattice.total_sum(),
        }
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Apply the change from one accepted flip.
    #[inline]
    pub fn apply(&mut self, delta: i64) {
        debug_assert!(delta == 2 || delta == -2, "single-flip ΔM must be ±2, got {delta}");
        self.value += delta;
    }

    /// Whether the tracked value still agrees with a full recount.
    pub fn matches(&self, lattice: &SpinLattice) -> bool {
        self.value == lattice.total_sum()
    }
}
