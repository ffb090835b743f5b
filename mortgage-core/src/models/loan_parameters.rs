use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOWN_PAYMENT_PERCENT: Decimal = dec!(20);
pub const DEFAULT_INTEREST_RATE_PERCENT: Decimal = dec!(5);
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 100;

/// The purchase and the loan taken out against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Purchase price of the home in dollars.
    pub home_value: Decimal,

    /// Down payment as a percent of home value (20 means 20%).
    pub down_payment_percent: Decimal,

    /// Annual nominal interest rate in percent.
    pub interest_rate_percent: Decimal,

    /// Length of the loan in whole years.
    pub term_years: u32,
}

impl LoanParameters {
    /// Creates loan parameters for `home_value` with the default down
    /// payment, rate and term.
    pub fn new(home_value: Decimal) -> Self {
        Self {
            home_value,
            down_payment_percent: DEFAULT_DOWN_PAYMENT_PERCENT,
            interest_rate_percent: DEFAULT_INTEREST_RATE_PERCENT,
            term_years: DEFAULT_TERM_YEARS,
        }
    }

    pub fn down_payment(&self) -> Decimal {
        self.down_payment_percent / Decimal::ONE_HUNDRED * self.home_value
    }

    /// Amount borrowed: `home_value × (1 − down%)`.
    pub fn principal(&self) -> Decimal {
        self.home_value * (Decimal::ONE - self.down_payment_percent / Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn principal_subtracts_down_payment() {
        let loan = LoanParameters::new(dec!(500000));

        assert_eq!(loan.principal(), dec!(400000));
        assert_eq!(loan.down_payment(), dec!(100000));
    }

    #[test]
    fn principal_with_zero_down_is_home_value() {
        let loan = LoanParameters {
            down_payment_percent: dec!(0),
            ..LoanParameters::new(dec!(250000))
        };

        assert_eq!(loan.principal(), dec!(250000));
    }
}
