/// Per-sweep sums of one observable vector, such as `[m, |m|]` or the
/// pair products `s(i)·s(i+r)` indexed by separation `r`.
///
/// Each slot is raised to `power` before it is added, so a second instance
/// with `power = 2` yields ⟨m²⟩ from the same per-sweep buffer.
#[derive(Debug, Clone)]
pub struct Statistics {
    pub count: usize,
    pub aggregate: Vec<f64>,
    pub power: u32,
}

impl Statistics {
    pub fn new(len: usize, power: u32) -> Self {
        Self {
            count: 0,
            aggregate: vec![0.0; len],
            power,
        }
    }

    /// Record one sweep. `values` must have one entry per slot.
    pub fn update(&mut self, values: &[f64]) {
        debug_assert_eq!(
            values.len(),
            self.aggregate.len(),
            "observable buffer length mismatch"
        );
        self.count += 1;
        for (agg, &v) in self.aggregate.iter_mut().zip(values.iter()) {
            *agg += if self.power == 1 {
                v
            } else {
                v.powi(self.power as i32)
            };
        }
    }

    /// Time average per slot. All zeros before the first sweep is recorded.
    pub fn average(&self) -> Vec<f64> {
        if self.count == 0 {
            return self.aggregate.clone();
        }
        let c = self.count as f64;
        self.aggregate.iter().map(|&a| a / c).collect()
    }
}
