use crate::geometry::SpinLattice;
use crate::mcmc::TrackedMagnetization;
use crate::spins::energy::{delta_energy_at, delta_energy_biased_at};
use rand::Rng;

/// Metropolis criterion: accept if `delta <= 0`, else with probability `exp(−β delta)`.
///
/// `beta = f64::INFINITY` rejects every uphill move deterministically.
#[inline]
pub fn metropolis_accept<R: Rng + ?Sized>(rng: &mut R, beta: f64, delta: f64) -> bool {
    delta <= 0.0 || rng.gen::<f64>() < (-beta * delta).exp()
}

#[inline]
fn random_site<R: Rng + ?Sized>(lattice: &SpinLattice, rng: &mut R) -> usize {
    let i = rng.gen_range(0..lattice.size);
    let j = rng.gen_range(0..lattice.size);
    i * lattice.size + j
}

/// One Metropolis sweep: `L²` sequential trial flips at uniformly random sites.
///
/// Returns the number of accepted flips.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_sweep<R: Rng + ?Sized>(
    lattice: &mut SpinLattice,
    beta: f64,
    coupling: f64,
    field: f64,
    rng: &mut R,
) -> usize {
    let mut accepted = 0;
    for _ in 0..lattice.n_spins {
        let site = random_site(lattice, rng);
        let de = delta_energy_at(lattice, site, coupling, field);
        if metropolis_accept(rng, beta, de) {
            lattice.flip_at(site);
            accepted += 1;
        }
    }
    accepted
}

/// One umbrella-biased sweep of `L²` trials toward target magnetization `target`.
///
/// `on_trial` receives the magnetization after every trial, accepted or not.
/// Returns the number of accepted flips.
#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "profile", inline(never))]
pub fn biased_sweep<R: Rng + ?Sized>(
    lattice: &mut SpinLattice,
    magnetization: &mut TrackedMagnetization,
    beta: f64,
    coupling: f64,
    k_bias: f64,
    target: f64,
    rng: &mut R,
    mut on_trial: impl FnMut(i64),
) -> usize {
    let mut accepted = 0;
    for _ in 0..lattice.n_spins {
        let site = random_site(lattice, rng);
        let d = delta_energy_biased_at(
            lattice,
            site,
            coupling,
            k_bias,
            target,
            magnetization.value(),
        );
        if metropolis_accept(rng, beta, d.energy) {
            lattice.flip_at(site);
            magnetization.apply(d.magnetization);
            accepted += 1;
        }
        on_trial(magnetization.value());
    }
    accepted
}
