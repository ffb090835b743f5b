use std::path::PathBuf;

use clap::Parser;
use mortgage_core::FilingStatus;
use rust_decimal::Decimal;

use crate::config::ScenarioFile;
use crate::utils::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Mortgage and home ownership cost calculator.
///
/// Amortizes a fixed-rate mortgage, then projects take-home pay, housing
/// costs and leftover income year by year, including the tax saved by
/// writing off mortgage interest.
///
/// Options left unset fall back to the scenario file (`--config`), then to
/// the built-in defaults shown below.
#[derive(Debug, Parser)]
#[command(name = "mortgage", version, about, long_about = None)]
pub struct Cli {
    /// Purchase price of the home in dollars.
    #[arg(value_parser = parse_decimal, required_unless_present = "config")]
    pub home_value: Option<Decimal>,

    /// Gross household income in dollars per year.
    #[arg(value_parser = parse_decimal, required_unless_present = "config")]
    pub gross_income: Option<Decimal>,

    /// Down payment as percent of house value (e.g. 20 for 20%) [default: 20]
    #[arg(short, long, value_parser = parse_decimal)]
    pub down: Option<Decimal>,

    /// Interest rate of mortgage as percent (e.g. 5 for 5%) [default: 5]
    #[arg(short, long, value_parser = parse_decimal)]
    pub rate: Option<Decimal>,

    /// Years of mortgage, 1 to 100 [default: 30]
    #[arg(short, long)]
    pub years: Option<u32>,

    /// Property tax as percent of home value per year [default: 1.5]
    #[arg(short, long = "property-tax-rate", value_parser = parse_decimal)]
    pub property_tax: Option<Decimal>,

    /// Annual maintenance costs as percent of home value [default: 2]
    #[arg(long = "repair-cost", value_parser = parse_decimal)]
    pub repair_cost: Option<Decimal>,

    /// Annual cost of homeowners insurance in dollars [default: 2000]
    #[arg(long, value_parser = parse_decimal)]
    pub insurance: Option<Decimal>,

    /// Monthly average cost of utilities in dollars [default: 150]
    #[arg(short, long, value_parser = parse_decimal)]
    pub utilities: Option<Decimal>,

    /// Monthly cost of medical insurance in dollars [default: 150]
    #[arg(long, value_parser = parse_decimal)]
    pub medical: Option<Decimal>,

    /// Tax filing status: 1=single, 2=joint, 3=separate, 4=head of
    /// household. Names are accepted too. [default: 2]
    #[arg(long)]
    pub filing_status: Option<FilingStatus>,

    /// Annual home value growth as percent [default: 1]
    #[arg(long, value_parser = parse_decimal)]
    pub home_growth: Option<Decimal>,

    /// Annual inflation of utilities, insurance and medical costs as
    /// percent [default: 2.7]
    #[arg(long, value_parser = parse_decimal)]
    pub inflation: Option<Decimal>,

    /// Annual salary growth as percent [default: 3]
    #[arg(long, value_parser = parse_decimal)]
    pub salary_growth: Option<Decimal>,

    /// TOML scenario file supplying any of the values above.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write every monthly series to a CSV file.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write the year-by-year table to a CSV file.
    #[arg(long, value_name = "FILE")]
    pub yearly_csv: Option<PathBuf>,

    /// Print the year-by-year table.
    #[arg(long)]
    pub yearly: bool,

    /// Log every tax evaluation with its rate, base and payroll parts.
    #[arg(long)]
    pub trace_taxes: bool,

    /// Show debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The scenario values given on the command line.
    pub fn overrides(&self) -> ScenarioFile {
        ScenarioFile {
            home_value: self.home_value,
            gross_income: self.gross_income,
            filing_status: self.filing_status,
            down_payment_percent: self.down,
            interest_rate_percent: self.rate,
            term_years: self.years,
            property_tax_percent: self.property_tax,
            repair_cost_percent: self.repair_cost,
            annual_insurance: self.insurance,
            monthly_utilities: self.utilities,
            monthly_medical: self.medical,
            home_value_growth_percent: self.home_growth,
            inflation_percent: self.inflation,
            salary_growth_percent: self.salary_growth,
        }
    }
}
