use rand::Rng;

/// Number of nearest neighbors per site on the square lattice.
pub const N_NEIGHBORS: usize = 4;

/// Periodic L×L square lattice of Ising spins with a precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `(i, j)` is `i * size + j`.
/// Every spin is exactly +1 or −1 at all times. The neighbor table stores, for
/// each site, its four toroidal neighbors in the order down, up, right, left.
#[derive(Debug, Clone)]
pub struct SpinLattice {
    /// Linear extent L.
    pub size: usize,
    /// Total number of sites (`size * size`).
    pub n_spins: usize,
    spins: Vec<i8>,
    /// Layout: `neighbors[site * N_NEIGHBORS + d]`.
    neighbors: Vec<u32>,
}

impl SpinLattice {
    /// Create an L×L lattice with every spin drawn independently and uniformly from ±1.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut lattice = Self::uniform(size, 1);
        for s in lattice.spins.iter_mut() {
            *s = if rng.gen::<f32>() < 0.5 { -1 } else { 1 };
        }
        lattice
    }

    /// Create an L×L lattice with every spin set to `spin`.
    pub fn uniform(size: usize, spin: i8) -> Self {
        assert!(spin == 1 || spin == -1, "spin must be +1 or -1, got {spin}");
        Self::from_spins(size, vec![spin; size * size])
    }

    /// Wrap an existing row-major spin buffer of length `size * size`.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Self {
        assert!(size >= 1, "lattice size must be >= 1");
        let n_spins = size * size;
        assert_eq!(
            spins.len(),
            n_spins,
            "spin buffer has length {}, expected {n_spins}",
            spins.len()
        );
        assert!(
            spins.iter().all(|&s| s == 1 || s == -1),
            "every spin must be +1 or -1"
        );

        let mut neighbors = vec![0u32; n_spins * N_NEIGHBORS];
        for i in 0..size {
            let down = (i + 1) % size;
            let up = (i + size - 1) % size;
            for j in 0..size {
                let right = (j + 1) % size;
                let left = (j + size - 1) % size;
                let base = (i * size + j) * N_NEIGHBORS;
                neighbors[base] = (down * size + j) as u32;
                neighbors[base + 1] = (up * size + j) as u32;
                neighbors[base + 2] = (i * size + right) as u32;
                neighbors[base + 3] = (i * size + left) as u32;
            }
        }

        Self {
            size,
            n_spins,
            spins,
            neighbors,
        }
    }

    /// Flat site index of `(i, j)`; both coordinates are taken modulo L.
    #[inline]
    pub fn site(&self, i: isize, j: isize) -> usize {
        let l = self.size as isize;
        (i.rem_euclid(l) * l + j.rem_euclid(l)) as usize
    }

    #[inline]
    pub fn spin(&self, i: isize, j: isize) -> i8 {
        self.spins[self.site(i, j)]
    }

    #[inline]
    pub fn spin_at(&self, site: usize) -> i8 {
        self.spins[site]
    }

    /// Sum of the four periodic nearest neighbors of `(i, j)`.
    #[inline]
    pub fn neighbor_sum(&self, i: isize, j: isize) -> i32 {
        self.neighbor_sum_at(self.site(i, j))
    }

    #[inline]
    pub fn neighbor_sum_at(&self, site: usize) -> i32 {
        let base = site * N_NEIGHBORS;
        self.neighbors[base..base + N_NEIGHBORS]
            .iter()
            .map(|&n| self.spins[n as usize] as i32)
            .sum()
    }

    /// Negate the spin at `(i, j)`.
    #[inline]
    pub fn flip(&mut self, i: isize, j: isize) {
        let site = self.site(i, j);
        self.flip_at(site);
    }

    #[inline]
    pub fn flip_at(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// Total spin sum M over all sites.
    pub fn total_sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Magnetization per site, `M / L²`.
    pub fn magnetization(&self) -> f64 {
        self.total_sum() as f64 / self.n_spins as f64
    }

    /// Row-major view of all spins.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }
}
