use crate::geometry::SpinLattice;

/// Energy and magnetization change of a proposed single-spin flip under an
/// umbrella bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasedDelta {
    /// Interaction energy change plus bias-potential change.
    pub energy: f64,
    /// Change in total magnetization, always ±2.
    pub magnetization: i64,
}

/// Energy change from flipping `(i, j)`: `ΔE = 2 s (J Σ_nb + h)`.
pub fn delta_energy(lattice: &SpinLattice, i: isize, j: isize, coupling: f64, field: f64) -> f64 {
    delta_energy_at(lattice, lattice.site(i, j), coupling, field)
}

#[inline]
pub fn delta_energy_at(lattice: &SpinLattice, site: usize, coupling: f64, field: f64) -> f64 {
    let s = lattice.spin_at(site) as f64;
    let nb = lattice.neighbor_sum_at(site) as f64;
    2.0 * s * (coupling * nb + field)
}

/// Flip cost under the harmonic bias `V(M) = ½ k (M − M0)²`.
///
/// The external field is not part of the biased Hamiltonian: umbrella windows
/// steer the magnetization directly.
pub fn delta_energy_biased(
    lattice: &SpinLattice,
    i: isize,
    j: isize,
    coupling: f64,
    k_bias: f64,
    target: f64,
    magnetization: i64,
) -> BiasedDelta {
    delta_energy_biased_at(
        lattice,
        lattice.site(i, j),
        coupling,
        k_bias,
        target,
        magnetization,
    )
}

#[inline]
pub fn delta_energy_biased_at(
    lattice: &SpinLattice,
    site: usize,
    coupling: f64,
    k_bias: f64,
    target: f64,
    magnetization: i64,
) -> BiasedDelta {
    let s = lattice.spin_at(site);
    let nb = lattice.neighbor_sum_at(site) as f64;
    let de_int = 2.0 * s as f64 * coupling * nb;
    let dm = -2 * s as i64;

    let before = magnetization as f64 - target;
    let after = (magnetization + dm) as f64 - target;
    let dv = 0.5 * k_bias * (after * after - before * before);

    BiasedDelta {
        energy: de_int + dv,
        magnetization: dm,
    }
}

/// Total energy `E = −J Σ_<ij> s_i s_j − h Σ_i s_i`, each bond counted once.
pub fn total_energy(lattice: &SpinLattice, coupling: f64, field: f64) -> f64 {
    let l = lattice.size as isize;
    let mut bonds = 0i64;
    let mut spin_sum = 0i64;
    for i in 0..l {
        for j in 0..l {
            let s = lattice.spin(i, j) as i64;
            bonds += s * (lattice.spin(i, j + 1) as i64 + lattice.spin(i + 1, j) as i64);
            spin_sum += s;
        }
    }
    -coupling * bonds as f64 - field * spin_sum as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_delta_energy_all_up() {
        let lat = SpinLattice::uniform(4, 1);
        // s = +1, Σ_nb = 4: ΔE = 2 (4J + h)
        assert_eq!(delta_energy(&lat, 0, 0, 1.0, 0.0), 8.0);
        assert_eq!(delta_energy(&lat, 2, 3, 1.0, 0.5), 9.0);
        assert_eq!(delta_energy(&lat, 2, 3, 1.0, -0.5), 7.0);
    }

    #[test]
    fn test_delta_energy_matches_total_energy_difference() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut lat = SpinLattice::random(6, &mut rng);
        let (coupling, field) = (0.7, 0.3);

        for _ in 0..200 {
            let i = rng.gen_range(0..6);
            let j = rng.gen_range(0..6);
            let before = total_energy(&lat, coupling, field);
            let de = delta_energy(&lat, i, j, coupling, field);
            lat.flip(i, j);
            let after = total_energy(&lat, coupling, field);
            assert!((after - before - de).abs() < 1e-9);
        }
    }

    #[test]
    fn test_biased_delta_includes_bias_change() {
        let lat = SpinLattice::uniform(4, 1);
        let m = lat.total_sum();
        let d = delta_energy_biased(&lat, 1, 1, 1.0, 2.0, 0.0, m);
        assert_eq!(d.magnetization, -2);
        // 8 from interactions, ½·2·(14² − 16²) = −60 from the bias.
        assert!((d.energy - (8.0 - 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_biased_delta_without_bias_ignores_field() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let lat = SpinLattice::random(5, &mut rng);
        let m = lat.total_sum();
        for i in 0..5 {
            for j in 0..5 {
                let d = delta_energy_biased(&lat, i, j, 1.0, 0.0, 10.0, m);
                assert_eq!(d.energy, delta_energy(&lat, i, j, 1.0, 0.0));
                assert_eq!(d.magnetization, -2 * lat.spin(i, j) as i64);
            }
        }
    }

    #[test]
    fn test_total_energy_ground_state() {
        let lat = SpinLattice::uniform(5, -1);
        // 2 bonds per site, all satisfied.
        assert_eq!(total_energy(&lat, 1.0, 0.0), -50.0);
        assert_eq!(total_energy(&lat, 1.0, 1.0), -50.0 + 25.0);
    }
}
