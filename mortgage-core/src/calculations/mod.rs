//! Mortgage and tax calculations.
//!
//! This module provides the amortization engine, the bracket-based tax
//! evaluator, and the cost projector that couples the two over the life of
//! a loan.

pub mod amortization;
pub mod common;
pub mod projection;
pub mod tax;

pub use amortization::{
    AmortizationEntry, AmortizationError, AmortizationSchedule, generate_schedule,
};
pub use projection::{
    CostProjector, ProjectionError, ProjectionResult, ProjectionSeries, ProjectionSummary,
    ProjectionYear, project,
};
pub use tax::{TaxBreakdown, TaxError, TaxEvaluator, TaxObserver};
