/// Trapezoidal rule for samples `y` on the (possibly non-uniform) abscissa `x`.
///
/// Fewer than two points integrate to zero.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::umbrella::linspace;

    #[test]
    fn test_linear_is_exact() {
        let x = linspace(0.0, 2.0, 5);
        let y: Vec<f64> = x.iter().map(|&v| 3.0 * v + 1.0).collect();
        assert!((trapezoid(&y, &x) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_normalization() {
        let x = linspace(-10.0, 10.0, 2001);
        let y: Vec<f64> = x.iter().map(|&v| (-0.5 * v * v).exp()).collect();
        let expected = (2.0 * std::f64::consts::PI).sqrt();
        assert!((trapezoid(&y, &x) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(trapezoid(&[], &[]), 0.0);
        assert_eq!(trapezoid(&[5.0], &[1.0]), 0.0);
    }
}
