//! Year-by-year cost projection over the life of a loan.
//!
//! The projector amortizes the loan once, then walks the term one year at a
//! time. Each year it deducts that year's mortgage interest from the running
//! income, evaluates tax on the result, and works out what is left after
//! taxes, medical insurance, the mortgage payment and the other costs of
//! owning the home. Income, costs and home value then grow for the next year.
//!
//! | Step | Value |
//! |------|-------|
//! | 1 | `writeoff` = interest paid in the year's 12 months |
//! | 2 | `agi` = income − writeoff |
//! | 3 | `income_tax` = tax(agi) |
//! | 4 | `takehome` = income − income_tax − medical |
//! | 5 | `other_costs` = utilities + insurance + (repair% + property tax%) × home value |
//! | 6 | `house_costs` = other_costs + 12 × payment |
//! | 7 | `leftover` = takehome − house_costs |
//!
//! Taxes are annual, so every cash-flow series repeats the year's value / 12
//! for each of its 12 months. The amortization series (balances, interest,
//! equity) genuinely vary month to month. Both kinds have one entry per month
//! of the loan so they can be charted side by side.
//!
//! Repair and property-tax costs follow the *growing* home value, not the
//! purchase price.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::MortgageScenario;
//! use mortgage_core::calculations::project;
//! use mortgage_core::calculations::common::round_half_up;
//!
//! let scenario = MortgageScenario::new(dec!(500000), dec!(150000));
//! let result = project(&scenario).unwrap();
//!
//! assert_eq!(result.summary.principal, dec!(400000));
//! assert_eq!(round_half_up(result.summary.monthly_payment), dec!(2147.29));
//! assert_eq!(result.series.balances.len(), 360);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::calculations::amortization::{AmortizationError, AmortizationSchedule, generate_schedule};
use crate::calculations::common::{MONTHS_PER_YEAR, per_month, push_year};
use crate::calculations::tax::{TaxError, TaxEvaluator};
use crate::models::{GrowthAssumptions, MortgageScenario, ScenarioError, growth_factor};
use crate::tables::TaxTables;

/// Errors that can occur during a projection. No partial result is
/// returned when any of these occur.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("amortization failed: {0}")]
    Amortization(#[from] AmortizationError),

    #[error("tax evaluation failed: {0}")]
    Tax(#[from] TaxError),

    /// An amount grew past what a decimal can hold.
    #[error("amounts in year {year} are too large to represent")]
    Overflow { year: u32 },
}

/// Scalar results of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub principal: Decimal,
    pub down_payment: Decimal,
    pub rate_percent: Decimal,
    pub term_years: u32,
    pub monthly_payment: Decimal,

    /// Payment × term months.
    pub total_cost: Decimal,

    /// Total cost − principal.
    pub total_interest: Decimal,

    /// First-year housing cost per month: payment, property tax, repairs,
    /// insurance and utilities.
    pub monthly_costs: Decimal,

    /// Monthly tax saved by writing off the average year's interest against
    /// the starting gross income.
    pub extra_monthly_income: Decimal,

    /// Monthly costs − extra monthly income.
    pub monthly_costs_with_new_income: Decimal,
}

impl ProjectionSummary {
    /// Labelled values in display order.
    pub fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("principal", self.principal),
            ("down payment", self.down_payment),
            ("rate", self.rate_percent),
            ("years", Decimal::from(self.term_years)),
            ("monthly payment", self.monthly_payment),
            ("total cost", self.total_cost),
            ("total interest", self.total_interest),
            ("monthly costs", self.monthly_costs),
            ("extra monthly income", self.extra_monthly_income),
            (
                "monthly costs with new income",
                self.monthly_costs_with_new_income,
            ),
        ]
    }
}

/// Month-indexed series, each with one entry per month of the loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub balances: Vec<Decimal>,
    pub interest_paid: Vec<Decimal>,
    pub equity_earned: Vec<Decimal>,
    pub monthly_payment: Vec<Decimal>,
    pub monthly_takehome: Vec<Decimal>,
    pub monthly_other_costs: Vec<Decimal>,
    pub monthly_house_costs: Vec<Decimal>,
    pub monthly_leftover: Vec<Decimal>,
    pub interest_writeoff: Vec<Decimal>,
    pub stated_income: Vec<Decimal>,
    pub monthly_tax_savings: Vec<Decimal>,
}

impl ProjectionSeries {
    fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        let months = schedule.months();
        let with_capacity = || Vec::with_capacity(months);
        Self {
            balances: schedule.entries.iter().map(|e| e.balance).collect(),
            interest_paid: schedule.entries.iter().map(|e| e.interest).collect(),
            equity_earned: schedule.entries.iter().map(|e| e.equity).collect(),
            monthly_payment: vec![schedule.monthly_payment; months],
            monthly_takehome: with_capacity(),
            monthly_other_costs: with_capacity(),
            monthly_house_costs: with_capacity(),
            monthly_leftover: with_capacity(),
            interest_writeoff: with_capacity(),
            stated_income: with_capacity(),
            monthly_tax_savings: with_capacity(),
        }
    }

    fn extend_year(
        &mut self,
        year: &ProjectionYear,
    ) {
        push_year(&mut self.stated_income, per_month(year.stated_income));
        push_year(&mut self.interest_writeoff, per_month(year.interest_writeoff));
        push_year(&mut self.monthly_takehome, per_month(year.takehome));
        push_year(&mut self.monthly_other_costs, per_month(year.other_costs));
        push_year(&mut self.monthly_house_costs, per_month(year.house_costs));
        push_year(&mut self.monthly_leftover, per_month(year.leftover));
        push_year(&mut self.monthly_tax_savings, per_month(year.tax_savings));
    }

    /// Labelled series in display order.
    pub fn entries(&self) -> Vec<(&'static str, &[Decimal])> {
        vec![
            ("balances", self.balances.as_slice()),
            ("interest paid", self.interest_paid.as_slice()),
            ("equity earned", self.equity_earned.as_slice()),
            ("monthly payment", self.monthly_payment.as_slice()),
            ("monthly takehome", self.monthly_takehome.as_slice()),
            ("monthly other costs", self.monthly_other_costs.as_slice()),
            ("monthly house costs", self.monthly_house_costs.as_slice()),
            ("monthly leftover", self.monthly_leftover.as_slice()),
            ("interest writeoff", self.interest_writeoff.as_slice()),
            ("stated income", self.stated_income.as_slice()),
            ("monthly tax savings", self.monthly_tax_savings.as_slice()),
        ]
    }
}

/// Annual values for one year of the loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionYear {
    /// 1-based year of the loan.
    pub year: u32,
    pub stated_income: Decimal,
    pub interest_writeoff: Decimal,
    pub adjusted_gross_income: Decimal,
    pub income_tax: Decimal,
    /// Tax saved by the interest writeoff this year.
    pub tax_savings: Decimal,
    pub medical_cost: Decimal,
    pub takehome: Decimal,
    /// Utilities, insurance, repairs and property tax.
    pub other_costs: Decimal,
    /// Other costs plus twelve mortgage payments.
    pub house_costs: Decimal,
    pub leftover: Decimal,
    pub home_value: Decimal,
    /// Loan balance after the year's last payment.
    pub loan_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub summary: ProjectionSummary,
    pub series: ProjectionSeries,
    pub yearly: Vec<ProjectionYear>,
}

/// Running values carried from one year to the next.
#[derive(Debug)]
struct YearlyState {
    income: Decimal,
    medical: Decimal,
    recurring_costs: Decimal,
    home_value: Decimal,
}

impl YearlyState {
    fn new(scenario: &MortgageScenario) -> Result<Self, ProjectionError> {
        let overflow = || ProjectionError::Overflow { year: 1 };
        Ok(Self {
            income: scenario.gross_income,
            medical: scenario.costs.annual_medical().ok_or_else(overflow)?,
            recurring_costs: scenario.costs.annual_recurring().ok_or_else(overflow)?,
            home_value: scenario.loan.home_value,
        })
    }

    /// Applies one year of growth, leaving `self` untouched on overflow.
    fn advance(
        &mut self,
        growth: &GrowthAssumptions,
        next_year: u32,
    ) -> Result<(), ProjectionError> {
        let overflow = || ProjectionError::Overflow { year: next_year };
        let inflation = growth_factor(growth.inflation_percent);
        let grown = Self {
            income: self
                .income
                .checked_mul(growth_factor(growth.salary_growth_percent))
                .ok_or_else(overflow)?,
            medical: self.medical.checked_mul(inflation).ok_or_else(overflow)?,
            recurring_costs: self
                .recurring_costs
                .checked_mul(inflation)
                .ok_or_else(overflow)?,
            home_value: self
                .home_value
                .checked_mul(growth_factor(growth.home_value_growth_percent))
                .ok_or_else(overflow)?,
        };
        *self = grown;
        Ok(())
    }
}

/// Projects the cost of owning a home against a tax model.
#[derive(Debug, Clone, Copy)]
pub struct CostProjector<'a> {
    evaluator: TaxEvaluator<'a>,
}

impl<'a> CostProjector<'a> {
    pub fn new(evaluator: TaxEvaluator<'a>) -> Self {
        Self { evaluator }
    }

    /// Runs the full projection for `scenario`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] if the scenario fails validation, the loan
    /// cannot be amortized, the interest writeoff pushes a year's adjusted
    /// gross income below zero, or growth carries an amount past
    /// [`Decimal::MAX`].
    pub fn project(
        &self,
        scenario: &MortgageScenario,
    ) -> Result<ProjectionResult, ProjectionError> {
        scenario.validate()?;

        let loan = &scenario.loan;
        let status = scenario.filing_status;
        let schedule = generate_schedule(
            loan.principal(),
            loan.interest_rate_percent,
            loan.term_years,
        )?;
        let annual_payment = schedule
            .monthly_payment
            .checked_mul(Decimal::from(MONTHS_PER_YEAR))
            .ok_or(ProjectionError::Overflow { year: 1 })?;

        let mut state = YearlyState::new(scenario)?;
        let mut series = ProjectionSeries::from_schedule(&schedule);
        let mut yearly = Vec::with_capacity(loan.term_years as usize);

        for (index, year) in (1..=loan.term_years).enumerate() {
            let overflow = || ProjectionError::Overflow { year };
            let interest_writeoff = schedule.interest_for_year(index);
            let adjusted_gross_income = state
                .income
                .checked_sub(interest_writeoff)
                .ok_or_else(overflow)?;
            let income_tax = self.evaluator.evaluate_tax(adjusted_gross_income, status)?;
            // only the adjusted evaluation is reported to the observer
            let tax_savings =
                self.evaluator.evaluate_tax_unobserved(state.income, status)? - income_tax;
            let takehome = (state.income - income_tax)
                .checked_sub(state.medical)
                .ok_or_else(overflow)?;
            let other_costs = scenario
                .costs
                .value_based_costs(state.home_value)
                .and_then(|v| v.checked_add(state.recurring_costs))
                .ok_or_else(overflow)?;
            let house_costs = other_costs
                .checked_add(annual_payment)
                .ok_or_else(overflow)?;
            let leftover = takehome.checked_sub(house_costs).ok_or_else(overflow)?;

            let row = ProjectionYear {
                year,
                stated_income: state.income,
                interest_writeoff,
                adjusted_gross_income,
                income_tax,
                tax_savings,
                medical_cost: state.medical,
                takehome,
                other_costs,
                house_costs,
                leftover,
                home_value: state.home_value,
                loan_balance: schedule
                    .balance_at_end_of_year(index)
                    .unwrap_or_default(),
            };
            trace!(
                year,
                agi = %row.adjusted_gross_income,
                tax = %row.income_tax,
                leftover = %row.leftover,
                "projected year"
            );

            series.extend_year(&row);
            yearly.push(row);
            if year < loan.term_years {
                state.advance(&scenario.growth, year + 1)?;
            }
        }

        let summary = self.summarize(scenario, &schedule)?;
        debug!(
            principal = %summary.principal,
            payment = %summary.monthly_payment,
            years = yearly.len(),
            "projection complete"
        );

        Ok(ProjectionResult {
            summary,
            series,
            yearly,
        })
    }

    fn summarize(
        &self,
        scenario: &MortgageScenario,
        schedule: &AmortizationSchedule,
    ) -> Result<ProjectionSummary, ProjectionError> {
        let loan = &scenario.loan;
        let costs = &scenario.costs;
        let overflow = || ProjectionError::Overflow { year: 1 };

        let value_based = costs
            .value_based_costs(loan.home_value)
            .ok_or_else(overflow)?;
        let monthly_costs = [
            per_month(value_based),
            per_month(costs.annual_insurance),
            costs.monthly_utilities,
        ]
        .into_iter()
        .try_fold(schedule.monthly_payment, Decimal::checked_add)
        .ok_or_else(overflow)?;

        let average_interest = schedule.total_interest() / Decimal::from(loan.term_years);
        let extra_monthly_income = per_month(self.evaluator.tax_savings(
            scenario.gross_income,
            average_interest,
            scenario.filing_status,
        )?);

        Ok(ProjectionSummary {
            principal: schedule.principal,
            down_payment: loan.down_payment(),
            rate_percent: loan.interest_rate_percent,
            term_years: loan.term_years,
            monthly_payment: schedule.monthly_payment,
            total_cost: schedule.total_paid(),
            total_interest: schedule.total_interest(),
            monthly_costs,
            extra_monthly_income,
            monthly_costs_with_new_income: monthly_costs
                .checked_sub(extra_monthly_income)
                .ok_or_else(overflow)?,
        })
    }
}

/// Runs a projection against the built-in historical tax tables.
///
/// # Errors
///
/// See [`CostProjector::project`].
pub fn project(scenario: &MortgageScenario) -> Result<ProjectionResult, ProjectionError> {
    CostProjector::new(TaxEvaluator::new(TaxTables::historical())).project(scenario)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::models::FilingStatus;

    fn scenario() -> MortgageScenario {
        MortgageScenario::new(dec!(500000), dec!(150000))
    }

    fn flat_scenario() -> MortgageScenario {
        let mut s = scenario();
        s.growth = GrowthAssumptions {
            home_value_growth_percent: dec!(0),
            inflation_percent: dec!(0),
            salary_growth_percent: dec!(0),
        };
        s
    }

    // =========================================================================
    // summary
    // =========================================================================

    #[test]
    fn summary_matches_reference_scenario() {
        let result = project(&scenario()).unwrap();
        let summary = &result.summary;

        assert_eq!(summary.principal, dec!(400000));
        assert_eq!(summary.down_payment, dec!(100000));
        assert_eq!(summary.rate_percent, dec!(5));
        assert_eq!(summary.term_years, 30);
        assert_eq!(round_half_up(summary.monthly_payment), dec!(2147.29));
        assert_eq!(round_half_up(summary.total_cost), dec!(773023.14));
        assert_eq!(round_half_up(summary.total_interest), dec!(373023.14));
    }

    #[test]
    fn summary_monthly_costs_include_every_housing_cost() {
        let result = project(&scenario()).unwrap();
        let summary = &result.summary;

        // payment + property tax and repairs + insurance + utilities
        let expected =
            summary.monthly_payment + dec!(17500) / dec!(12) + dec!(2000) / dec!(12) + dec!(150);

        assert_eq!(summary.monthly_costs, expected);
        assert_eq!(
            summary.monthly_costs_with_new_income,
            summary.monthly_costs - summary.extra_monthly_income
        );
    }

    #[test]
    fn summary_extra_income_uses_average_interest() {
        let s = scenario();
        let result = project(&s).unwrap();
        let evaluator = TaxEvaluator::new(TaxTables::historical());

        let average = result.summary.total_interest / dec!(30);
        let savings = evaluator
            .tax_savings(dec!(150000), average, FilingStatus::Joint)
            .unwrap();

        assert_eq!(result.summary.extra_monthly_income, savings / dec!(12));
        assert!(result.summary.extra_monthly_income > Decimal::ZERO);
    }

    #[test]
    fn summary_entries_are_labelled_in_order() {
        let result = project(&scenario()).unwrap();
        let labels: Vec<_> = result.summary.entries().into_iter().map(|(l, _)| l).collect();

        assert_eq!(
            labels,
            vec![
                "principal",
                "down payment",
                "rate",
                "years",
                "monthly payment",
                "total cost",
                "total interest",
                "monthly costs",
                "extra monthly income",
                "monthly costs with new income",
            ]
        );
    }

    // =========================================================================
    // series
    // =========================================================================

    #[test]
    fn every_series_has_one_entry_per_month() {
        let result = project(&scenario()).unwrap();

        for (label, values) in result.series.entries() {
            assert_eq!(values.len(), 360, "{label}");
        }
        assert_eq!(result.yearly.len(), 30);
    }

    #[test]
    fn cash_flow_series_repeat_within_a_year() {
        let result = project(&scenario()).unwrap();
        let takehome = &result.series.monthly_takehome;

        assert!(takehome[0..12].iter().all(|v| *v == takehome[0]));
        assert!(takehome[12..24].iter().all(|v| *v == takehome[12]));
        assert_ne!(takehome[0], takehome[12]);
    }

    #[test]
    fn first_year_values_follow_the_projection_steps() {
        let s = scenario();
        let result = project(&s).unwrap();
        let first = &result.yearly[0];
        let evaluator = TaxEvaluator::new(TaxTables::historical());

        let schedule = generate_schedule(dec!(400000), dec!(5), 30).unwrap();
        let writeoff = schedule.interest_for_year(0);
        let tax = evaluator
            .evaluate_tax(dec!(150000) - writeoff, FilingStatus::Joint)
            .unwrap();

        assert_eq!(first.year, 1);
        assert_eq!(first.interest_writeoff, writeoff);
        assert_eq!(first.adjusted_gross_income, dec!(150000) - writeoff);
        assert_eq!(first.income_tax, tax);
        assert_eq!(first.takehome, dec!(150000) - tax - dec!(1800));
        // 3,800 recurring + 3.5% of 500,000
        assert_eq!(first.other_costs, dec!(21300));
        assert_eq!(first.house_costs, dec!(21300) + schedule.monthly_payment * dec!(12));
        assert_eq!(first.leftover, first.takehome - first.house_costs);
        assert_eq!(first.loan_balance, schedule.entries[11].balance);
    }

    #[test]
    fn monthly_series_are_annual_values_over_twelve() {
        let result = project(&scenario()).unwrap();
        let first = &result.yearly[0];
        let series = &result.series;

        assert_eq!(series.stated_income[0], dec!(12500));
        assert_eq!(series.interest_writeoff[5], first.interest_writeoff / dec!(12));
        assert_eq!(series.monthly_other_costs[11], dec!(1775));
        assert_eq!(series.monthly_house_costs[0], first.house_costs / dec!(12));
        assert_eq!(series.monthly_leftover[0], first.leftover / dec!(12));
        assert_eq!(series.monthly_tax_savings[0], first.tax_savings / dec!(12));
    }

    #[test]
    fn leftover_equals_takehome_minus_costs_and_payment() {
        let result = project(&scenario()).unwrap();
        let series = &result.series;

        for month in 0..360 {
            let expected = series.monthly_takehome[month]
                - series.monthly_other_costs[month]
                - series.monthly_payment[month];
            let diff = (series.monthly_leftover[month] - expected).abs();
            assert!(diff < dec!(0.000001), "month {month}: {diff}");
        }
    }

    #[test]
    fn amortization_series_copy_the_schedule() {
        let result = project(&scenario()).unwrap();
        let schedule = generate_schedule(dec!(400000), dec!(5), 30).unwrap();

        assert_eq!(result.series.balances[0], schedule.entries[0].balance);
        assert_eq!(result.series.interest_paid[100], schedule.entries[100].interest);
        assert_eq!(result.series.equity_earned[359], schedule.entries[359].equity);
        assert!(result.series.monthly_payment.iter().all(|p| *p == schedule.monthly_payment));
    }

    // =========================================================================
    // growth
    // =========================================================================

    #[test]
    fn values_grow_each_year() {
        let result = project(&scenario()).unwrap();
        let (first, second) = (&result.yearly[0], &result.yearly[1]);

        assert_eq!(second.stated_income, dec!(154500));
        assert_eq!(second.medical_cost, dec!(1848.6));
        assert_eq!(second.home_value, dec!(505000));
        // 3,800 × 1.027 + 3.5% of 505,000
        assert_eq!(second.other_costs, dec!(3902.6) + dec!(17675));
        assert!(second.interest_writeoff < first.interest_writeoff);
    }

    #[test]
    fn without_growth_only_the_writeoff_changes() {
        let result = project(&flat_scenario()).unwrap();
        let (first, last) = (&result.yearly[0], &result.yearly[29]);

        assert_eq!(first.stated_income, last.stated_income);
        assert_eq!(first.other_costs, last.other_costs);
        assert!(last.interest_writeoff < first.interest_writeoff);
        assert!(last.income_tax >= first.income_tax);
    }

    #[test]
    fn tax_savings_shrink_as_interest_falls() {
        let result = project(&flat_scenario()).unwrap();

        assert!(result.yearly[0].tax_savings > result.yearly[29].tax_savings);
        assert!(result.yearly.iter().all(|y| y.tax_savings >= Decimal::ZERO));
    }

    // =========================================================================
    // failures
    // =========================================================================

    #[test]
    fn project_rejects_invalid_scenario() {
        let mut s = scenario();
        s.loan.term_years = 0;

        let result = project(&s);

        assert_eq!(result, Err(ProjectionError::Scenario(ScenarioError::InvalidTerm(0))));
    }

    #[test]
    fn project_fails_when_writeoff_exceeds_income() {
        let s = MortgageScenario::new(dec!(500000), dec!(1000));

        let result = project(&s);

        assert!(matches!(
            result,
            Err(ProjectionError::Tax(TaxError::NegativeIncome(_)))
        ));
    }

    #[test]
    fn project_surfaces_amortization_overflow() {
        let mut s = scenario();
        s.loan.interest_rate_percent = dec!(5000);
        s.loan.term_years = 50;

        let result = project(&s);

        assert!(matches!(
            result,
            Err(ProjectionError::Amortization(AmortizationError::Overflow { .. }))
        ));
    }

    #[test]
    fn project_reports_overflow_from_runaway_growth() {
        let mut s = scenario();
        s.growth.salary_growth_percent = dec!(1000);
        assert_eq!(s.validate(), Ok(()));

        let result = project(&s);

        // 150,000 × 11^23 no longer fits in a decimal
        assert_eq!(result, Err(ProjectionError::Overflow { year: 24 }));
    }

    #[test]
    fn project_reports_overflow_from_huge_costs() {
        let mut s = scenario();
        s.costs.property_tax_percent = Decimal::MAX;

        let result = project(&s);

        assert_eq!(result, Err(ProjectionError::Overflow { year: 1 }));
    }

    #[test]
    fn zero_rate_loan_has_no_writeoff() {
        let mut s = scenario();
        s.loan.interest_rate_percent = dec!(0);

        let result = project(&s).unwrap();

        assert!(result.yearly.iter().all(|y| y.interest_writeoff.is_zero()));
        assert!(result.yearly.iter().all(|y| y.tax_savings.is_zero()));
        assert_eq!(round_half_up(result.summary.extra_monthly_income), dec!(0));
    }

    #[test]
    fn projection_is_deterministic() {
        let s = scenario();

        assert_eq!(project(&s).unwrap(), project(&s).unwrap());
    }
}
