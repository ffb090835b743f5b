mod assumptions;
mod filing_status;
mod loan_parameters;
mod scenario;
mod tax_bracket;

pub use assumptions::{CostAssumptions, DEFAULT_INFLATION_PERCENT, GrowthAssumptions, growth_factor};
pub use filing_status::{FilingStatus, ParseFilingStatusError};
pub use loan_parameters::{
    DEFAULT_DOWN_PAYMENT_PERCENT, DEFAULT_INTEREST_RATE_PERCENT, DEFAULT_TERM_YEARS,
    LoanParameters, MAX_TERM_YEARS,
};
pub use scenario::{MortgageScenario, ScenarioError};
pub use tax_bracket::{FederalBracket, IncomeRange, PayrollTax, TaxBracket};
