/// Magnetization moments averaged over measurement sweeps of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetizationResult {
    /// ⟨m⟩, mean magnetization per site.
    pub mean: f64,
    /// ⟨|m|⟩.
    pub abs_mean: f64,
    /// ⟨m²⟩.
    pub mean_sq: f64,
    pub n_samples: usize,
}

/// Full-lattice correlation function, indexed by separation `r ∈ [0, L/2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    /// ⟨m⟩ over measurement sweeps.
    pub magnetization: f64,
    /// ⟨s(i,j)·s(i+r,j)⟩.
    pub pair: Vec<f64>,
    /// ⟨s(i+r,j)⟩.
    pub shift: Vec<f64>,
    /// Connected correlator `pair[r] − magnetization · shift[r]`.
    pub correlation: Vec<f64>,
    pub n_samples: usize,
}

/// Single-column correlation function, indexed by separation `r ∈ [0, L/2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCorrelationResult {
    pub column: usize,
    /// ⟨m⟩ over the whole lattice.
    pub magnetization: f64,
    /// ⟨s(i,col)·s(i+r,col)⟩.
    pub pair: Vec<f64>,
    /// `pair[r] − magnetization²`.
    pub correlation: Vec<f64>,
    pub n_samples: usize,
}

impl CorrelationResult {
    /// Average results from independent runs of the same lattice size.
    pub fn aggregate(results: &[Self]) -> Self {
        let n = results.len() as f64;
        let len = results[0].correlation.len();
        let mut agg = CorrelationResult {
            magnetization: 0.0,
            pair: vec![0.0; len],
            shift: vec![0.0; len],
            correlation: vec![0.0; len],
            n_samples: 0,
        };

        for r in results {
            agg.magnetization += r.magnetization;
            agg.n_samples += r.n_samples;
            for (a, &v) in agg.pair.iter_mut().zip(r.pair.iter()) {
                *a += v;
            }
            for (a, &v) in agg.shift.iter_mut().zip(r.shift.iter()) {
                *a += v;
            }
            for (a, &v) in agg.correlation.iter_mut().zip(r.correlation.iter()) {
                *a += v;
            }
        }

        agg.magnetization /= n;
        for v in agg
            .pair
            .iter_mut()
            .chain(agg.shift.iter_mut())
            .chain(agg.correlation.iter_mut())
        {
            *v /= n;
        }
        agg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_averages_per_run_correlators() {
        let a = CorrelationResult {
            magnetization: 0.5,
            pair: vec![1.0, 0.5],
            shift: vec![0.5, 0.5],
            correlation: vec![0.75, 0.25],
            n_samples: 10,
        };
        let b = CorrelationResult {
            magnetization: -0.5,
            pair: vec![1.0, 0.3],
            shift: vec![-0.5, -0.5],
            correlation: vec![0.75, 0.05],
            n_samples: 10,
        };
        let agg = CorrelationResult::aggregate(&[a, b]);
        assert_eq!(agg.magnetization, 0.0);
        assert_eq!(agg.n_samples, 20);
        assert_eq!(agg.shift, vec![0.0, 0.0]);
        assert!((agg.correlation[0] - 0.75).abs() < 1e-12);
        assert!((agg.correlation[1] - 0.15).abs() < 1e-12);
    }
}
