use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An inclusive income range `[min_income, max_income]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRange {
    pub min_income: Decimal,
    pub max_income: Decimal,
}

impl IncomeRange {
    pub const fn new(
        min_income: Decimal,
        max_income: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
        }
    }

    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        self.min_income <= income && income <= self.max_income
    }
}

/// A bracket in cumulative form: a marginal rate (percent) plus the fixed
/// amount owed from all lower brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub range: IncomeRange,
    pub rate_percent: Decimal,
    pub base_tax: Decimal,
}

/// A federal bracket: one flat rate shared by all filing statuses, with a
/// separate income range per status (indexed by `FilingStatus::index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalBracket {
    pub rate_percent: Decimal,
    pub ranges: [IncomeRange; 4],
}

/// A flat payroll tax whose contribution never exceeds `max_contribution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTax {
    pub rate_percent: Decimal,
    pub max_contribution: Decimal,
}

impl PayrollTax {
    pub fn contribution(
        &self,
        income: Decimal,
    ) -> Decimal {
        (self.rate_percent / Decimal::ONE_HUNDRED * income).min(self.max_contribution)
    }
}
