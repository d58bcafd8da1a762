pub mod correlation;
pub mod magnetization;
pub mod results;
mod stats;

pub use correlation::{ColumnCorrelationAccum, CorrelationAccum};
pub use magnetization::MagnetizationAccum;
pub use results::{ColumnCorrelationResult, CorrelationResult, MagnetizationResult};
pub use stats::Statistics;
