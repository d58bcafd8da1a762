use crate::geometry::SpinLattice;
use crate::statistics::{ColumnCorrelationResult, CorrelationResult, Statistics};

/// Full-lattice spin-spin correlation along the row axis.
///
/// For each separation `r ∈ [0, L/2]` every measurement records the spatial
/// averages of `s(i,j)·s(i+r,j)` and of the shifted spin `s(i+r,j)`. The
/// connected correlator subtracts the product of the time-averaged
/// magnetization and the time-averaged shifted spin:
/// `C(r) = ⟨pair⟩ − ⟨m⟩·⟨shift⟩`.
pub struct CorrelationAccum {
    max_r: usize,
    mags: Statistics,
    pair: Statistics,
    shift: Statistics,
    pair_buf: Vec<f64>,
    shift_buf: Vec<f64>,
}

impl CorrelationAccum {
    pub fn new(size: usize) -> Self {
        let max_r = size / 2;
        Self {
            max_r,
            mags: Statistics::new(1, 1),
            pair: Statistics::new(max_r + 1, 1),
            shift: Statistics::new(max_r + 1, 1),
            pair_buf: vec![0.0; max_r + 1],
            shift_buf: vec![0.0; max_r + 1],
        }
    }

    pub fn max_separation(&self) -> usize {
        self.max_r
    }

    pub fn push(&mut self, lattice: &SpinLattice) {
        let l = lattice.size;
        let n = lattice.n_spins as f64;
        let spins = lattice.spins();

        self.mags.update(&[lattice.magnetization()]);

        for r in 0..=self.max_r {
            let mut pair_sum = 0i64;
            let mut shift_sum = 0i64;
            for i in 0..l {
                let row = &spins[i * l..(i + 1) * l];
                let shifted = (i + r) % l;
                let shifted_row = &spins[shifted * l..(shifted + 1) * l];
                for (&si, &sj) in row.iter().zip(shifted_row.iter()) {
                    pair_sum += (si * sj) as i64;
                    shift_sum += sj as i64;
                }
            }
            self.pair_buf[r] = pair_sum as f64 / n;
            self.shift_buf[r] = shift_sum as f64 / n;
        }

        self.pair.update(&self.pair_buf);
        self.shift.update(&self.shift_buf);
    }

    pub fn finish(&self) -> CorrelationResult {
        let magnetization = self.mags.average()[0];
        let pair = self.pair.average();
        let shift = self.shift.average();
        let correlation = pair
            .iter()
            .zip(shift.iter())
            .map(|(&p, &s)| p - magnetization * s)
            .collect();
        CorrelationResult {
            magnetization,
            pair,
            shift,
            correlation,
            n_samples: self.mags.count,
        }
    }
}

/// Spin-spin correlation down a single column `col`.
///
/// Uses the uncorrected form `C(r) = ⟨pair⟩ − ⟨m⟩²`, where `⟨m⟩` is the
/// whole-lattice magnetization; this is kept distinct from the shift-based
/// estimator of [`CorrelationAccum`].
pub struct ColumnCorrelationAccum {
    col: usize,
    max_r: usize,
    mags: Statistics,
    pair: Statistics,
    pair_buf: Vec<f64>,
}

impl ColumnCorrelationAccum {
    pub fn new(size: usize, col: usize) -> Self {
        assert!(col < size, "column {col} out of range for L = {size}");
        let max_r = size / 2;
        Self {
            col,
            max_r,
            mags: Statistics::new(1, 1),
            pair: Statistics::new(max_r + 1, 1),
            pair_buf: vec![0.0; max_r + 1],
        }
    }

    pub fn push(&mut self, lattice: &SpinLattice) {
        let l = lattice.size;
        let spins = lattice.spins();
        let col = self.col;

        self.mags.update(&[lattice.magnetization()]);

        for r in 0..=self.max_r {
            let mut c = 0i64;
            for i in 0..l {
                let si = spins[i * l + col];
                let sj = spins[((i + r) % l) * l + col];
                c += (si * sj) as i64;
            }
            self.pair_buf[r] = c as f64 / l as f64;
        }
        self.pair.update(&self.pair_buf);
    }

    pub fn finish(&self) -> ColumnCorrelationResult {
        let magnetization = self.mags.average()[0];
        let pair = self.pair.average();
        let correlation = pair
            .iter()
            .map(|&p| p - magnetization * magnetization)
            .collect();
        ColumnCorrelationResult {
            column: self.col,
            magnetization,
            pair,
            correlation,
            n_samples: self.mags.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    // Rows alternate +1 / −1:
    //   + + + +
    //   − − − −
    //   + + + +
    //   − − − −
    fn striped_4x4() -> SpinLattice {
        let mut spins = Vec::with_capacity(16);
        for i in 0..4 {
            let s = if i % 2 == 0 { 1 } else { -1 };
            spins.extend(std::iter::repeat(s).take(4));
        }
        SpinLattice::from_spins(4, spins)
    }

    #[test]
    fn test_full_correlation_on_stripes() {
        let mut acc = CorrelationAccum::new(4);
        assert_eq!(acc.max_separation(), 2);
        acc.push(&striped_4x4());
        let res = acc.finish();
        assert_eq!(res.magnetization, 0.0);
        assert_eq!(res.pair, vec![1.0, -1.0, 1.0]);
        assert_eq!(res.correlation, vec![1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_ordered_lattice_has_no_connected_correlation() {
        let mut acc = CorrelationAccum::new(6);
        acc.push(&SpinLattice::uniform(6, 1));
        acc.push(&SpinLattice::uniform(6, 1));
        let res = acc.finish();
        assert_eq!(res.n_samples, 2);
        for &c in &res.correlation {
            assert_eq!(c, 0.0);
        }
    }

    #[test]
    fn test_zero_separation_is_mean_square_spin() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let mut full = CorrelationAccum::new(8);
        let mut column = ColumnCorrelationAccum::new(8, 3);
        for _ in 0..20 {
            let lat = SpinLattice::random(8, &mut rng);
            full.push(&lat);
            column.push(&lat);
        }
        let f = full.finish();
        let c = column.finish();
        assert_eq!(f.pair[0], 1.0);
        assert_eq!(c.pair[0], 1.0);
        assert!((f.correlation[0] - (1.0 - f.magnetization * f.shift[0])).abs() < 1e-12);
        assert!((c.correlation[0] - (1.0 - c.magnetization * c.magnetization)).abs() < 1e-12);
    }

    #[test]
    fn test_column_uses_only_its_column() {
        // Column 0 alternates down the rows, every other column is +1.
        let mut spins = vec![1i8; 16];
        spins[4] = -1;
        spins[12] = -1;
        let lat = SpinLattice::from_spins(4, spins);

        let mut col0 = ColumnCorrelationAccum::new(4, 0);
        let mut col2 = ColumnCorrelationAccum::new(4, 2);
        col0.push(&lat);
        col2.push(&lat);

        assert_eq!(col0.finish().pair, vec![1.0, -1.0, 1.0]);
        assert_eq!(col2.finish().pair, vec![1.0, 1.0, 1.0]);

        let m = 12.0 / 16.0;
        let res = col2.finish();
        assert_eq!(res.magnetization, m);
        assert!((res.correlation[1] - (1.0 - m * m)).abs() < 1e-12);
    }
}
