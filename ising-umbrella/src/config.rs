use validator::{Validate, ValidationError};

fn check_temperature(temperature: f64) -> Result<(), ValidationError> {
    if !(temperature > 0.0 && temperature.is_finite()) {
        return Err(ValidationError::new("temperature must be finite and > 0"));
    }
    Ok(())
}

fn validate_sim_params(p: &SimParams) -> Result<(), ValidationError> {
    if p.size < 1 {
        return Err(ValidationError::new("size must be >= 1"));
    }
    if p.n_steps < 1 {
        return Err(ValidationError::new("n_steps must be >= 1"));
    }
    check_temperature(p.temperature)?;
    if !p.coupling.is_finite() || !p.field.is_finite() {
        return Err(ValidationError::new("coupling and field must be finite"));
    }
    Ok(())
}

/// Parameters of one unbiased Metropolis run.
///
/// `n_eq` equilibration sweeps are discarded, then `n_steps` sweeps are measured.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_sim_params"))]
pub struct SimParams {
    /// Linear lattice size L.
    pub size: usize,
    /// Coupling constant J.
    pub coupling: f64,
    /// Temperature T (k_B = 1).
    pub temperature: f64,
    /// External field h.
    pub field: f64,
    pub n_eq: usize,
    pub n_steps: usize,
}

impl SimParams {
    pub fn beta(&self) -> f64 {
        1.0 / self.temperature
    }

    pub fn with_field(self, field: f64) -> Self {
        Self { field, ..self }
    }
}

fn validate_umbrella_params(p: &UmbrellaParams) -> Result<(), ValidationError> {
    if p.size < 1 {
        return Err(ValidationError::new("size must be >= 1"));
    }
    if p.n_steps < 1 {
        return Err(ValidationError::new("n_steps must be >= 1"));
    }
    if p.bins < 2 {
        return Err(ValidationError::new("bins must be >= 2"));
    }
    check_temperature(p.temperature)?;
    if !(p.k_bias >= 0.0 && p.k_bias.is_finite()) {
        return Err(ValidationError::new("k_bias must be finite and >= 0"));
    }
    if !p.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    Ok(())
}

/// Parameters shared by every umbrella window at one temperature.
///
/// Sweep counts are in units of `L²` trial flips. The histogram spans
/// `[−L², L²]` with `bins` grid points.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_umbrella_params"))]
pub struct UmbrellaParams {
    pub size: usize,
    pub coupling: f64,
    pub temperature: f64,
    /// Harmonic bias strength k.
    pub k_bias: f64,
    pub n_eq: usize,
    pub n_steps: usize,
    pub bins: usize,
}

impl UmbrellaParams {
    pub fn beta(&self) -> f64 {
        1.0 / self.temperature
    }

    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }
}

fn validate_wham_config(cfg: &WhamConfig) -> Result<(), ValidationError> {
    if cfg.max_iterations < 1 {
        return Err(ValidationError::new("max_iterations must be >= 1"));
    }
    if !(cfg.tolerance > 0.0) {
        return Err(ValidationError::new("tolerance must be > 0"));
    }
    if !(cfg.epsilon > 0.0) {
        return Err(ValidationError::new("epsilon must be > 0"));
    }
    Ok(())
}

/// Fixed-point iteration controls for the WHAM solver.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_wham_config"))]
pub struct WhamConfig {
    pub max_iterations: usize,
    /// Stop once `max_k |Δf_k|` falls below this.
    pub tolerance: f64,
    /// Floor for denominators and logarithm arguments.
    pub epsilon: f64,
}

impl Default for WhamConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            tolerance: 1e-6,
            epsilon: 1e-30,
        }
    }
}
