use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CostAssumptions, FilingStatus, GrowthAssumptions, LoanParameters, MAX_TERM_YEARS};

/// Errors returned by [`MortgageScenario::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("home value must be positive, got {0}")]
    InvalidHomeValue(Decimal),

    #[error("gross income must be non-negative, got {0}")]
    InvalidGrossIncome(Decimal),

    /// The down payment must leave something to borrow.
    #[error("down payment percent must be in [0, 100), got {0}")]
    InvalidDownPayment(Decimal),

    #[error("interest rate must be non-negative, got {0}")]
    InvalidInterestRate(Decimal),

    #[error("loan term must be between 1 and {MAX_TERM_YEARS} years, got {0}")]
    InvalidTerm(u32),

    #[error("{field} must be non-negative, got {value}")]
    NegativeCost { field: &'static str, value: Decimal },

    /// Growth rates at or below -100% would make values flip sign.
    #[error("{field} must be greater than -100, got {value}")]
    InvalidGrowthRate { field: &'static str, value: Decimal },
}

/// Every input to a projection, already typed.
///
/// Build one with [`MortgageScenario::new`] to get the documented defaults,
/// then override fields as needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortgageScenario {
    /// Gross household income in dollars per year.
    pub gross_income: Decimal,
    pub filing_status: FilingStatus,
    pub loan: LoanParameters,
    pub costs: CostAssumptions,
    pub growth: GrowthAssumptions,
}

impl MortgageScenario {
    pub fn new(
        home_value: Decimal,
        gross_income: Decimal,
    ) -> Self {
        Self {
            gross_income,
            filing_status: FilingStatus::default(),
            loan: LoanParameters::new(home_value),
            costs: CostAssumptions::default(),
            growth: GrowthAssumptions::default(),
        }
    }

    /// Range-checks every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScenarioError`] found, checking the loan first,
    /// then costs, then growth rates.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let loan = &self.loan;
        if loan.home_value <= Decimal::ZERO {
            return Err(ScenarioError::InvalidHomeValue(loan.home_value));
        }
        if self.gross_income < Decimal::ZERO {
            return Err(ScenarioError::InvalidGrossIncome(self.gross_income));
        }
        if loan.down_payment_percent < Decimal::ZERO
            || loan.down_payment_percent >= Decimal::ONE_HUNDRED
        {
            return Err(ScenarioError::InvalidDownPayment(
                loan.down_payment_percent,
            ));
        }
        if loan.interest_rate_percent < Decimal::ZERO {
            return Err(ScenarioError::InvalidInterestRate(
                loan.interest_rate_percent,
            ));
        }
        if loan.term_years == 0 || loan.term_years > MAX_TERM_YEARS {
            return Err(ScenarioError::InvalidTerm(loan.term_years));
        }

        let costs = [
            ("property tax percent", self.costs.property_tax_percent),
            ("repair cost percent", self.costs.repair_cost_percent),
            ("annual insurance", self.costs.annual_insurance),
            ("monthly utilities", self.costs.monthly_utilities),
            ("monthly medical", self.costs.monthly_medical),
        ];
        if let Some((field, value)) = costs.into_iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(ScenarioError::NegativeCost { field, value });
        }

        let floor = -Decimal::ONE_HUNDRED;
        let rates = [
            ("home value growth", self.growth.home_value_growth_percent),
            ("inflation", self.growth.inflation_percent),
            ("salary growth", self.growth.salary_growth_percent),
        ];
        if let Some((field, value)) = rates.into_iter().find(|(_, v)| *v <= floor) {
            return Err(ScenarioError::InvalidGrowthRate { field, value });
        }

        Ok(())
    }
}
