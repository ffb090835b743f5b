//! Scenario files.
//!
//! A scenario file is TOML with every field optional. Values from the file
//! sit between the built-in defaults and the command-line flags:
//!
//! ```toml
//! home_value = 650000
//! gross_income = 180000
//! filing_status = "single"
//! interest_rate_percent = 6.5
//! term_years = 15
//! ```
//!
//! | Key | Default |
//! |-----------------------------|---------|
//! | `home_value` | required |
//! | `gross_income` | required |
//! | `filing_status` | `joint` |
//! | `down_payment_percent` | 20 |
//! | `interest_rate_percent` | 5 |
//! | `term_years` | 30 |
//! | `property_tax_percent` | 1.5 |
//! | `repair_cost_percent` | 2 |
//! | `annual_insurance` | 2000 |
//! | `monthly_utilities` | 150 |
//! | `monthly_medical` | 150 |
//! | `home_value_growth_percent` | 1 |
//! | `inflation_percent` | 2.7 |
//! | `salary_growth_percent` | 3 |

use std::fs;
use std::path::{Path, PathBuf};

use mortgage_core::{FilingStatus, MortgageScenario};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required value was given neither on the command line nor in a
    /// scenario file.
    #[error("missing required value '{0}'")]
    Missing(&'static str),
}

/// A partial scenario. Every `None` falls through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    pub home_value: Option<Decimal>,
    pub gross_income: Option<Decimal>,
    pub filing_status: Option<FilingStatus>,
    pub down_payment_percent: Option<Decimal>,
    pub interest_rate_percent: Option<Decimal>,
    pub term_years: Option<u32>,
    pub property_tax_percent: Option<Decimal>,
    pub repair_cost_percent: Option<Decimal>,
    pub annual_insurance: Option<Decimal>,
    pub monthly_utilities: Option<Decimal>,
    pub monthly_medical: Option<Decimal>,
    pub home_value_growth_percent: Option<Decimal>,
    pub inflation_percent: Option<Decimal>,
    pub salary_growth_percent: Option<Decimal>,
}

impl ScenarioFile {
    /// Reads and parses a scenario file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded scenario file");
        Ok(file)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Returns `self` with every value set in `top` replaced by `top`'s.
    pub fn overlay(
        self,
        top: ScenarioFile,
    ) -> ScenarioFile {
        ScenarioFile {
            home_value: top.home_value.or(self.home_value),
            gross_income: top.gross_income.or(self.gross_income),
            filing_status: top.filing_status.or(self.filing_status),
            down_payment_percent: top.down_payment_percent.or(self.down_payment_percent),
            interest_rate_percent: top.interest_rate_percent.or(self.interest_rate_percent),
            term_years: top.term_years.or(self.term_years),
            property_tax_percent: top.property_tax_percent.or(self.property_tax_percent),
            repair_cost_percent: top.repair_cost_percent.or(self.repair_cost_percent),
            annual_insurance: top.annual_insurance.or(self.annual_insurance),
            monthly_utilities: top.monthly_utilities.or(self.monthly_utilities),
            monthly_medical: top.monthly_medical.or(self.monthly_medical),
            home_value_growth_percent: top
                .home_value_growth_percent
                .or(self.home_value_growth_percent),
            inflation_percent: top.inflation_percent.or(self.inflation_percent),
            salary_growth_percent: top.salary_growth_percent.or(self.salary_growth_percent),
        }
    }

    /// Fills every unset value from the defaults. Range checks happen later,
    /// in [`MortgageScenario::validate`].
    pub fn into_scenario(self) -> Result<MortgageScenario, ConfigError> {
        let home_value = self.home_value.ok_or(ConfigError::Missing("home_value"))?;
        let gross_income = self
            .gross_income
            .ok_or(ConfigError::Missing("gross_income"))?;

        let mut scenario = MortgageScenario::new(home_value, gross_income);
        set(&mut scenario.filing_status, self.filing_status);

        let loan = &mut scenario.loan;
        set(&mut loan.down_payment_percent, self.down_payment_percent);
        set(&mut loan.interest_rate_percent, self.interest_rate_percent);
        set(&mut loan.term_years, self.term_years);

        let costs = &mut scenario.costs;
        set(&mut costs.property_tax_percent, self.property_tax_percent);
        set(&mut costs.repair_cost_percent, self.repair_cost_percent);
        set(&mut costs.annual_insurance, self.annual_insurance);
        set(&mut costs.monthly_utilities, self.monthly_utilities);
        set(&mut costs.monthly_medical, self.monthly_medical);

        let growth = &mut scenario.growth;
        set(&mut growth.home_value_growth_percent, self.home_value_growth_percent);
        set(&mut growth.inflation_percent, self.inflation_percent);
        set(&mut growth.salary_growth_percent, self.salary_growth_percent);

        Ok(scenario)
    }
}

fn set<T>(
    slot: &mut T,
    value: Option<T>,
) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn from_toml_str_reads_partial_file() {
        let file = ScenarioFile::from_toml_str(
            r#"
            home_value = 650000
            filing_status = "single"
            interest_rate_percent = 6.5
            term_years = 15
            "#,
        )
        .unwrap();

        assert_eq!(file.home_value, Some(dec!(650000)));
        assert_eq!(file.filing_status, Some(FilingStatus::Single));
        assert_eq!(file.interest_rate_percent, Some(dec!(6.5)));
        assert_eq!(file.term_years, Some(15));
        assert_eq!(file.gross_income, None);
    }

    #[test]
    fn from_toml_str_accepts_quoted_decimals() {
        let file = ScenarioFile::from_toml_str(r#"inflation_percent = "2.7""#).unwrap();

        assert_eq!(file.inflation_percent, Some(dec!(2.7)));
    }

    #[test]
    fn from_toml_str_reads_filing_status_codes_and_names() {
        let cases = [
            ("filing_status = 4", FilingStatus::HeadOfHousehold),
            ("filing_status = \"2\"", FilingStatus::Joint),
            ("filing_status = \"hoh\"", FilingStatus::HeadOfHousehold),
            ("filing_status = \"head_of_household\"", FilingStatus::HeadOfHousehold),
            ("filing_status = \"separate\"", FilingStatus::Separate),
        ];

        for (text, expected) in cases {
            let file = ScenarioFile::from_toml_str(text).unwrap();
            assert_eq!(file.filing_status, Some(expected), "{text}");
        }
    }

    #[test]
    fn from_toml_str_rejects_unknown_filing_status() {
        assert!(matches!(
            ScenarioFile::from_toml_str("filing_status = 7"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ScenarioFile::from_toml_str("filing_status = \"widowed\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let result = ScenarioFile::from_toml_str("hoa_fees = 300");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn overlay_prefers_top_values() {
        let bottom = ScenarioFile {
            home_value: Some(dec!(400000)),
            term_years: Some(30),
            ..Default::default()
        };
        let top = ScenarioFile {
            term_years: Some(15),
            ..Default::default()
        };

        let merged = bottom.overlay(top);

        assert_eq!(merged.home_value, Some(dec!(400000)));
        assert_eq!(merged.term_years, Some(15));
    }

    #[test]
    fn into_scenario_fills_defaults() {
        let file = ScenarioFile {
            home_value: Some(dec!(500000)),
            gross_income: Some(dec!(150000)),
            monthly_utilities: Some(dec!(220)),
            ..Default::default()
        };

        let scenario = file.into_scenario().unwrap();

        let mut expected = MortgageScenario::new(dec!(500000), dec!(150000));
        expected.costs.monthly_utilities = dec!(220);
        assert_eq!(scenario, expected);
    }

    #[test]
    fn into_scenario_requires_home_value_and_income() {
        let missing_value = ScenarioFile {
            gross_income: Some(dec!(1)),
            ..Default::default()
        };
        let missing_income = ScenarioFile {
            home_value: Some(dec!(1)),
            ..Default::default()
        };

        assert!(matches!(
            missing_value.into_scenario(),
            Err(ConfigError::Missing("home_value"))
        ));
        assert!(matches!(
            missing_income.into_scenario(),
            Err(ConfigError::Missing("gross_income"))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = ScenarioFile::load(Path::new("/nonexistent/scenario.toml"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
