//! Frozen historical tax tables.
//!
//! The federal table is the 2009 rate schedule (one rate per bracket, one
//! income range per filing status). The state table is the 2009 California
//! schedule in cumulative form. The payroll tax is Social Security at 6.2%
//! on the 2009 wage base of $106,800.
//!
//! Adjacent brackets share their boundary value; the evaluator takes the
//! first bracket that contains an income, so a boundary income belongs to
//! the lower bracket.

use rust_decimal_macros::dec;

use crate::models::{FederalBracket, IncomeRange, PayrollTax, TaxBracket};

const fn range(
    min: rust_decimal::Decimal,
    max: rust_decimal::Decimal,
) -> IncomeRange {
    IncomeRange::new(min, max)
}

const fn state(
    base_tax: rust_decimal::Decimal,
    rate_percent: rust_decimal::Decimal,
    min: rust_decimal::Decimal,
    max: rust_decimal::Decimal,
) -> TaxBracket {
    TaxBracket {
        range: IncomeRange::new(min, max),
        rate_percent,
        base_tax,
    }
}

/// Columns: single, joint, separate, head of household.
pub static FEDERAL_BRACKETS: [FederalBracket; 6] = [
    FederalBracket {
        rate_percent: dec!(10),
        ranges: [
            range(dec!(0), dec!(8350)),
            range(dec!(0), dec!(16700)),
            range(dec!(0), dec!(8350)),
            range(dec!(0), dec!(11950)),
        ],
    },
    FederalBracket {
        rate_percent: dec!(15),
        ranges: [
            range(dec!(8350), dec!(33950)),
            range(dec!(16700), dec!(67900)),
            range(dec!(8350), dec!(33950)),
            range(dec!(11950), dec!(45500)),
        ],
    },
    FederalBracket {
        rate_percent: dec!(25),
        ranges: [
            range(dec!(33950), dec!(82250)),
            range(dec!(67900), dec!(137050)),
            range(dec!(33950), dec!(68525)),
            range(dec!(45500), dec!(117450)),
        ],
    },
    FederalBracket {
        rate_percent: dec!(28),
        ranges: [
            range(dec!(82250), dec!(171550)),
            range(dec!(137050), dec!(208850)),
            range(dec!(68525), dec!(104425)),
            range(dec!(117450), dec!(190200)),
        ],
    },
    FederalBracket {
        rate_percent: dec!(33),
        ranges: [
            range(dec!(171550), dec!(372950)),
            range(dec!(208850), dec!(372950)),
            range(dec!(104425), dec!(186475)),
            range(dec!(190200), dec!(372950)),
        ],
    },
    FederalBracket {
        rate_percent: dec!(35),
        ranges: [
            range(dec!(372950), dec!(10000000000)),
            range(dec!(372950), dec!(10000000000)),
            range(dec!(186475), dec!(10000000000)),
            range(dec!(372950), dec!(10000000000)),
        ],
    },
];

// Separate filers use the single schedule in California.
static STATE_SINGLE: [TaxBracket; 6] = [
    state(dec!(0.00), dec!(1.00), dec!(0.00), dec!(7168.00)),
    state(dec!(71.68), dec!(2.00), dec!(7168.00), dec!(16994.00)),
    state(dec!(268.20), dec!(4.00), dec!(16994.00), dec!(26821.00)),
    state(dec!(661.28), dec!(6.00), dec!(26821.00), dec!(37233.00)),
    state(dec!(1286.00), dec!(8.00), dec!(37233.00), dec!(47055.00)),
    state(dec!(2071.76), dec!(9.30), dec!(47055.00), dec!(1000000000.00)),
];

static STATE_JOINT: [TaxBracket; 6] = [
    state(dec!(0.00), dec!(1.00), dec!(0.00), dec!(14336.00)),
    state(dec!(143.36), dec!(2.00), dec!(14336.00), dec!(33988.00)),
    state(dec!(536.40), dec!(4.00), dec!(33988.00), dec!(53642.00)),
    state(dec!(1322.56), dec!(6.00), dec!(53642.00), dec!(74466.00)),
    state(dec!(2572.00), dec!(8.00), dec!(74466.00), dec!(94110.00)),
    state(dec!(4143.52), dec!(9.30), dec!(94110.00), dec!(1000000000.00)),
];

static STATE_HEAD_OF_HOUSEHOLD: [TaxBracket; 6] = [
    state(dec!(0.00), dec!(1.00), dec!(0.00), dec!(14345.00)),
    state(dec!(143.45), dec!(2.00), dec!(14345.00), dec!(33989.00)),
    state(dec!(536.33), dec!(4.00), dec!(33989.00), dec!(43814.00)),
    state(dec!(929.33), dec!(6.00), dec!(43814.00), dec!(54225.00)),
    state(dec!(1553.99), dec!(8.00), dec!(54225.00), dec!(64050.00)),
    state(dec!(2339.99), dec!(9.30), dec!(64050.00), dec!(1000000000.00)),
];

pub static PAYROLL_TAX: PayrollTax = PayrollTax {
    rate_percent: dec!(6.2),
    max_contribution: dec!(6621.60),
};

/// A complete set of tables for one evaluation. Borrowed so tests and
/// callers can supply their own.
#[derive(Debug, Clone, Copy)]
pub struct TaxTables<'a> {
    pub federal: &'a [FederalBracket],
    /// State tables indexed by `FilingStatus::index`.
    pub state: [&'a [TaxBracket]; 4],
    pub payroll: PayrollTax,
}

impl TaxTables<'static> {
    /// The built-in 2009 federal, California and Social Security tables.
    pub fn historical() -> Self {
        Self {
            federal: &FEDERAL_BRACKETS,
            state: [
                &STATE_SINGLE,
                &STATE_JOINT,
                &STATE_SINGLE,
                &STATE_HEAD_OF_HOUSEHOLD,
            ],
            payroll: PAYROLL_TAX,
        }
    }
}

impl Default for TaxTables<'static> {
    fn default() -> Self {
        Self::historical()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::FilingStatus;

    #[test]
    fn federal_ranges_are_contiguous_for_every_status() {
        for status in FilingStatus::ALL {
            let ranges: Vec<_> = FEDERAL_BRACKETS
                .iter()
                .map(|b| b.ranges[status.index()])
                .collect();

            assert_eq!(ranges[0].min_income, dec!(0), "{status}");
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].max_income, pair[1].min_income, "{status}");
            }
        }
    }

    #[test]
    fn state_tables_are_contiguous_for_every_status() {
        let tables = TaxTables::historical();

        for status in FilingStatus::ALL {
            let brackets = tables.state[status.index()];

            assert_eq!(brackets[0].range.min_income, dec!(0), "{status}");
            for pair in brackets.windows(2) {
                assert_eq!(pair[0].range.max_income, pair[1].range.min_income, "{status}");
                assert!(pair[0].rate_percent < pair[1].rate_percent, "{status}");
                assert!(pair[0].base_tax < pair[1].base_tax, "{status}");
            }
        }
    }

    #[test]
    fn federal_rates_increase() {
        for pair in FEDERAL_BRACKETS.windows(2) {
            assert!(pair[0].rate_percent < pair[1].rate_percent);
        }
    }

    #[test]
    fn payroll_cap_matches_wage_base() {
        // 6.2% of $106,800
        assert_eq!(PAYROLL_TAX.contribution(dec!(106800)), dec!(6621.60));
    }
}
