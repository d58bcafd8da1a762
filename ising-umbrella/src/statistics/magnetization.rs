use crate::geometry::SpinLattice;
use crate::statistics::{MagnetizationResult, Statistics};

/// Accumulates ⟨m⟩, ⟨|m|⟩ and ⟨m²⟩ over measurement sweeps.
pub struct MagnetizationAccum {
    mags: Statistics,
    mags2: Statistics,
    buf: [f64; 2],
}

impl MagnetizationAccum {
    pub fn new() -> Self {
        Self {
            // [m, |m|]
            mags: Statistics::new(2, 1),
            mags2: Statistics::new(1, 2),
            buf: [0.0; 2],
        }
    }

    pub fn push(&mut self, lattice: &SpinLattice) {
        let m = lattice.magnetization();
        self.buf = [m, m.abs()];
        self.mags.update(&self.buf);
        self.mags2.update(&self.buf[..1]);
    }

    pub fn finish(&self) -> MagnetizationResult {
        let avg = self.mags.average();
        MagnetizationResult {
            mean: avg[0],
            abs_mean: avg[1],
            mean_sq: self.mags2.average()[0],
            n_samples: self.mags.count,
        }
    }
}

impl Default for MagnetizationAccum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_and_absolute() {
        let mut acc = MagnetizationAccum::new();
        acc.push(&SpinLattice::uniform(4, 1));
        acc.push(&SpinLattice::uniform(4, -1));
        let res = acc.finish();
        assert_eq!(res.n_samples, 2);
        assert_eq!(res.mean, 0.0);
        assert_eq!(res.abs_mean, 1.0);
        assert_eq!(res.mean_sq, 1.0);
    }
}
