//! Progressive income tax evaluation.
//!
//! The model is simple: the matched federal and state rates are
//! applied to the *whole* income, the state bracket's base amount is added
//! on top, and a capped flat payroll tax is added last.
//!
//! ```text
//! tax = (federal_rate + state_rate) / 100 × income
//!     + state_base
//!     + min(payroll_rate / 100 × income, payroll_cap)
//! ```
//!
//! A table with no bracket containing the income contributes nothing. With
//! the built-in tables that only happens above the top bracket's ceiling.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::FilingStatus;
//! use mortgage_core::calculations::TaxEvaluator;
//! use mortgage_core::tables::TaxTables;
//!
//! let evaluator = TaxEvaluator::new(TaxTables::historical());
//! let breakdown = evaluator
//!     .evaluate_breakdown(dec!(50000), FilingStatus::Single)
//!     .unwrap();
//!
//! assert_eq!(breakdown.federal_rate_percent, dec!(25));
//! assert_eq!(breakdown.state_rate_percent, dec!(9.30));
//! assert_eq!(breakdown.payroll_tax, dec!(3100.0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::FilingStatus;
use crate::tables::TaxTables;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),
}

/// Every contribution that went into one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub income: Decimal,
    pub filing_status: FilingStatus,
    /// Zero when no federal bracket matched.
    pub federal_rate_percent: Decimal,
    /// Zero when no state bracket matched.
    pub state_rate_percent: Decimal,
    pub state_base_tax: Decimal,
    pub payroll_tax: Decimal,
    pub total: Decimal,
}

/// Receives every breakdown the evaluator produces.
pub trait TaxObserver {
    fn on_evaluation(
        &self,
        breakdown: &TaxBreakdown,
    );
}

impl<F> TaxObserver for F
where
    F: Fn(&TaxBreakdown),
{
    fn on_evaluation(
        &self,
        breakdown: &TaxBreakdown,
    ) {
        self(breakdown)
    }
}

/// Evaluates tax owed against a set of [`TaxTables`].
#[derive(Clone, Copy)]
pub struct TaxEvaluator<'a> {
    tables: TaxTables<'a>,
    observer: Option<&'a dyn TaxObserver>,
}

impl std::fmt::Debug for TaxEvaluator<'_> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("TaxEvaluator")
            .field("tables", &self.tables)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<'a> TaxEvaluator<'a> {
    pub fn new(tables: TaxTables<'a>) -> Self {
        Self {
            tables,
            observer: None,
        }
    }

    /// Attaches an observer that is called after every evaluation.
    pub fn with_observer(
        mut self,
        observer: &'a dyn TaxObserver,
    ) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns the total tax owed on `income`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeIncome`] if `income` is below zero.
    pub fn evaluate_tax(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> Result<Decimal, TaxError> {
        self.evaluate_breakdown(income, filing_status)
            .map(|b| b.total)
    }

    /// Evaluates tax owed on `income` and returns each contribution.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeIncome`] if `income` is below zero.
    pub fn evaluate_breakdown(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> Result<TaxBreakdown, TaxError> {
        let breakdown = self.breakdown_unobserved(income, filing_status)?;
        if let Some(observer) = self.observer {
            observer.on_evaluation(&breakdown);
        }
        Ok(breakdown)
    }

    /// Total tax on `income`, without notifying the observer.
    pub(crate) fn evaluate_tax_unobserved(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> Result<Decimal, TaxError> {
        self.breakdown_unobserved(income, filing_status)
            .map(|b| b.total)
    }

    fn breakdown_unobserved(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> Result<TaxBreakdown, TaxError> {
        if income < Decimal::ZERO {
            return Err(TaxError::NegativeIncome(income));
        }

        let federal_rate_percent = self.federal_rate(income, filing_status);
        let (state_rate_percent, state_base_tax) = self.state_rate(income, filing_status);
        let payroll_tax = self.tables.payroll.contribution(income);

        let total = (federal_rate_percent + state_rate_percent) / Decimal::ONE_HUNDRED * income
            + state_base_tax
            + payroll_tax;

        debug!(
            %income,
            status = %filing_status,
            federal_rate = %federal_rate_percent,
            state_rate = %state_rate_percent,
            state_base = %state_base_tax,
            payroll = %payroll_tax,
            %total,
            "evaluated income tax"
        );

        Ok(TaxBreakdown {
            income,
            filing_status,
            federal_rate_percent,
            state_rate_percent,
            state_base_tax,
            payroll_tax,
            total,
        })
    }

    /// Tax saved by deducting `writeoff` from `income`:
    /// `tax(income) − tax(income − writeoff)`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::NegativeIncome`] if either income is below zero.
    pub fn tax_savings(
        &self,
        income: Decimal,
        writeoff: Decimal,
        filing_status: FilingStatus,
    ) -> Result<Decimal, TaxError> {
        let before = self.evaluate_tax(income, filing_status)?;
        let after = self.evaluate_tax(income - writeoff, filing_status)?;
        Ok(before - after)
    }

    fn federal_rate(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> Decimal {
        self.tables
            .federal
            .iter()
            .find(|b| b.ranges[filing_status.index()].contains(income))
            .map_or(Decimal::ZERO, |b| b.rate_percent)
    }

    fn state_rate(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
    ) -> (Decimal, Decimal) {
        self.tables.state[filing_status.index()]
            .iter()
            .find(|b| b.range.contains(income))
            .map_or((Decimal::ZERO, Decimal::ZERO), |b| {
                (b.rate_percent, b.base_tax)
            })
    }
}
