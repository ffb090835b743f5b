//! Fixed-rate loan amortization.
//!
//! The monthly payment is the standard annuity payment
//!
//! ```text
//! i       = annual_rate_percent / 100 / 12
//! payment = principal × i / (1 − (1 + i)^−n)        (n = term_years × 12)
//! ```
//!
//! and for a zero rate `payment = principal / n`. Each month the interest
//! portion is `balance × i`, the remainder of the payment is equity, and the
//! balance drops by the equity portion. Payments are not rounded to cents,
//! so the final balance lands within arithmetic drift of zero rather than
//! exactly on it.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::calculations::generate_schedule;
//! use mortgage_core::calculations::common::round_half_up;
//!
//! let schedule = generate_schedule(dec!(400000), dec!(5), 30).unwrap();
//!
//! assert_eq!(schedule.entries.len(), 360);
//! assert_eq!(round_half_up(schedule.monthly_payment), dec!(2147.29));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::MONTHS_PER_YEAR;
use crate::models::MAX_TERM_YEARS;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmortizationError {
    #[error("principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),

    #[error("interest rate must be non-negative, got {0}")]
    NegativeRate(Decimal),

    #[error("loan term must be at least one year")]
    NonPositiveTerm,

    #[error("loan term must be at most {MAX_TERM_YEARS} years, got {0}")]
    TermTooLong(u32),

    /// `(1 + i)^n` does not fit in a decimal.
    #[error("interest rate {rate}% over {term_years} years overflows the payment calculation")]
    Overflow { rate: Decimal, term_years: u32 },
}

/// One month of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month number.
    pub month: u32,
    /// Balance remaining after this month's payment.
    pub balance: Decimal,
    pub interest: Decimal,
    pub equity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Decimal,
    pub monthly_payment: Decimal,
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    pub fn months(&self) -> usize {
        self.entries.len()
    }

    /// Payment × number of months.
    pub fn total_paid(&self) -> Decimal {
        self.monthly_payment * Decimal::from(self.entries.len())
    }

    pub fn total_interest(&self) -> Decimal {
        self.total_paid() - self.principal
    }

    /// Interest paid during zero-based loan year `year`, i.e. months
    /// `[year × 12, year × 12 + 12)`.
    pub fn interest_for_year(
        &self,
        year: usize,
    ) -> Decimal {
        let months = MONTHS_PER_YEAR as usize;
        self.entries
            .iter()
            .skip(year * months)
            .take(months)
            .map(|e| e.interest)
            .sum()
    }

    /// Balance after the last payment of zero-based loan year `year`.
    pub fn balance_at_end_of_year(
        &self,
        year: usize,
    ) -> Option<Decimal> {
        let months = MONTHS_PER_YEAR as usize;
        self.entries.get(year * months + months - 1).map(|e| e.balance)
    }

    pub fn final_balance(&self) -> Decimal {
        self.entries
            .last()
            .map_or(self.principal, |e| e.balance)
    }
}

/// Builds the month-by-month schedule for a fixed-rate loan.
///
/// # Errors
///
/// Returns [`AmortizationError`] if the principal is not positive, the rate
/// is negative, the term is zero or longer than [`MAX_TERM_YEARS`], or the
/// rate is too large to compute.
pub fn generate_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> Result<AmortizationSchedule, AmortizationError> {
    if principal <= Decimal::ZERO {
        return Err(AmortizationError::NonPositivePrincipal(principal));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::NegativeRate(annual_rate_percent));
    }
    if term_years == 0 {
        return Err(AmortizationError::NonPositiveTerm);
    }
    if term_years > MAX_TERM_YEARS {
        return Err(AmortizationError::TermTooLong(term_years));
    }

    let months = term_years * MONTHS_PER_YEAR;
    let monthly_rate = monthly_rate(annual_rate_percent);
    let overflow = AmortizationError::Overflow {
        rate: annual_rate_percent,
        term_years,
    };
    let monthly_payment =
        monthly_payment(principal, monthly_rate, months).ok_or_else(|| overflow.clone())?;
    // total_paid() must stay representable
    monthly_payment
        .checked_mul(Decimal::from(months))
        .ok_or(overflow)?;

    let mut balance = principal;
    let entries = (1..=months)
        .map(|month| {
            let interest = balance * monthly_rate;
            let equity = monthly_payment - interest;
            balance -= equity;
            AmortizationEntry {
                month,
                balance,
                interest,
                equity,
            }
        })
        .collect();

    debug!(
        %principal,
        rate = %annual_rate_percent,
        term_years,
        payment = %monthly_payment,
        final_balance = %balance,
        "generated amortization schedule"
    );

    Ok(AmortizationSchedule {
        principal,
        monthly_payment,
        entries,
    })
}

fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR)
}

/// Returns `None` when `(1 + i)^n` overflows.
fn monthly_payment(
    principal: Decimal,
    monthly_rate: Decimal,
    months: u32,
) -> Option<Decimal> {
    let straight_line = || Some(principal / Decimal::from(months));
    if monthly_rate.is_zero() {
        return straight_line();
    }

    // P·i / (1 − (1+i)^−n) rewritten as P·i·g / (g − 1) with g = (1+i)^n
    let growth = (Decimal::ONE + monthly_rate).checked_powu(u64::from(months))?;
    // i below decimal precision
    if growth == Decimal::ONE {
        return straight_line();
    }
    let numerator = principal.checked_mul(monthly_rate)?.checked_mul(growth)?;
    numerator.checked_div(growth - Decimal::ONE)
}
