pub mod calculations;
pub mod models;
pub mod tables;

pub use calculations::{
    AmortizationError, AmortizationSchedule, CostProjector, ProjectionError, ProjectionResult,
    TaxError, TaxEvaluator,
};
pub use models::*;
pub use tables::TaxTables;
