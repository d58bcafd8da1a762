/// `n` evenly spaced points from `start` to `stop`, both ends included.
///
/// A single point is `start`; zero points is empty.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|k| if k == n - 1 { stop } else { start + step * k as f64 })
                .collect()
        }
    }
}

/// Evenly spaced umbrella targets `M0` over `[−N, N]`.
pub fn window_centers(n_sites: usize, n_windows: usize) -> Vec<f64> {
    let n = n_sites as f64;
    linspace(-n, n, n_windows)
}

/// Shared magnetization grid: `bins` points spanning `[−N, N]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetizationGrid {
    n_sites: i64,
    bins: usize,
    points: Vec<f64>,
}

impl MagnetizationGrid {
    pub fn new(n_sites: usize, bins: usize) -> Self {
        assert!(n_sites >= 1, "grid needs at least one site");
        assert!(bins >= 2, "grid needs at least two bins, got {bins}");
        let n = n_sites as f64;
        Self {
            n_sites: n_sites as i64,
            bins,
            points: linspace(-n, n, bins),
        }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Bin of total magnetization `m`: `⌊(M + N)(bins − 1) / 2N⌋`.
    ///
    /// Always in `[0, bins − 1]` for `M ∈ [−N, N]`; the clamp covers anything
    /// outside that range.
    #[inline]
    pub fn bin_index(&self, m: i64) -> usize {
        let shifted = (m + self.n_sites).clamp(0, 2 * self.n_sites);
        let idx = (shifted * (self.bins as i64 - 1)) / (2 * self.n_sites);
        (idx as usize).min(self.bins - 1)
    }
}

/// Visit counts of one umbrella window on a [`MagnetizationGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(bins: usize) -> Self {
        Self {
            counts: vec![0; bins],
        }
    }

    #[inline]
    pub fn increment(&mut self, bin: usize) {
        self.counts[bin] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl AsRef<[u64]> for Histogram {
    fn as_ref(&self) -> &[u64] {
        &self.counts
    }
}
