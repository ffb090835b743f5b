use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Long-run average annual US CPI inflation, precomputed.
pub const DEFAULT_INFLATION_PERCENT: Decimal = dec!(2.7);

/// Recurring costs of owning the home and living in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAssumptions {
    /// Property tax as a percent of home value per year.
    pub property_tax_percent: Decimal,

    /// Maintenance and repairs as a percent of home value per year.
    pub repair_cost_percent: Decimal,

    /// Homeowners insurance in dollars per year.
    pub annual_insurance: Decimal,

    /// Utilities in dollars per month.
    pub monthly_utilities: Decimal,

    /// Medical insurance in dollars per month.
    pub monthly_medical: Decimal,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            property_tax_percent: dec!(1.5),
            repair_cost_percent: dec!(2),
            annual_insurance: dec!(2000),
            monthly_utilities: dec!(150),
            monthly_medical: dec!(150),
        }
    }
}

impl CostAssumptions {
    /// Utilities plus insurance for one year. These inflate together.
    /// `None` on overflow.
    pub fn annual_recurring(&self) -> Option<Decimal> {
        self.monthly_utilities
            .checked_mul(Decimal::from(12))?
            .checked_add(self.annual_insurance)
    }

    pub fn annual_medical(&self) -> Option<Decimal> {
        self.monthly_medical.checked_mul(Decimal::from(12))
    }

    /// Property tax plus repairs owed on a home worth `home_value`.
    /// `None` on overflow.
    pub fn value_based_costs(
        &self,
        home_value: Decimal,
    ) -> Option<Decimal> {
        let percent = self
            .repair_cost_percent
            .checked_add(self.property_tax_percent)?;
        (percent / Decimal::ONE_HUNDRED).checked_mul(home_value)
    }
}

/// Annual growth rates applied at every year boundary, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthAssumptions {
    pub home_value_growth_percent: Decimal,
    pub inflation_percent: Decimal,
    pub salary_growth_percent: Decimal,
}

impl Default for GrowthAssumptions {
    fn default() -> Self {
        Self {
            home_value_growth_percent: dec!(1),
            inflation_percent: DEFAULT_INFLATION_PERCENT,
            salary_growth_percent: dec!(3),
        }
    }
}

/// Converts a percent rate into the factor applied once per year.
pub fn growth_factor(percent: Decimal) -> Decimal {
    Decimal::ONE + percent / Decimal::ONE_HUNDRED
}
