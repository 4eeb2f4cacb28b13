//! Resolves a service member's situation into monthly pay components and
//! the taxes and take-home pay that follow from them.

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::military::pay::{
    base_pay, housing_allowance, subsistence_allowance, PayGrade, MAX_YEARS_OF_SERVICE,
};
use crate::money::percent_one_decimal;
use crate::tax::brackets::{federal_tax, FilingStatus};
use crate::tax::fica::fica;

/// Monthly military compensation. Only base pay is taxable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayComposition {
    pub grade: PayGrade,
    pub years_of_service: u32,
    pub base_pay: f64,
    pub subsistence: f64,
    pub housing: f64,
    pub housing_is_exact_zip_match: bool,
}

impl PayComposition {
    pub fn resolve(grade: PayGrade, years_of_service: u32, zip_code: &str, with_dependents: bool) -> Self {
        let housing = housing_allowance(grade, zip_code, with_dependents);
        Self {
            grade,
            years_of_service,
            base_pay: base_pay(grade, years_of_service),
            subsistence: subsistence_allowance(grade),
            housing: housing.monthly,
            housing_is_exact_zip_match: housing.is_exact_zip_match,
        }
    }

    pub fn monthly_total(&self) -> f64 {
        self.base_pay + self.subsistence + self.housing
    }

    pub fn annual_base_pay(&self) -> f64 {
        self.base_pay * 12.0
    }

    pub fn annual_tax_free_allowances(&self) -> f64 {
        (self.subsistence + self.housing) * 12.0
    }

    pub fn annual_total(&self) -> f64 {
        self.monthly_total() * 12.0
    }
}

/// The service-member fields shared by the tax and equivalence requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryProfile {
    pub grade: String,
    #[serde(default)]
    pub years_of_service: u32,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default = "default_with_dependents")]
    pub with_dependents: bool,
}

fn default_with_dependents() -> bool {
    true
}

impl MilitaryProfile {
    pub fn resolve(&self) -> Result<PayComposition, CalcError> {
        let grade: PayGrade = self.grade.parse()?;
        let years = service_years(self.years_of_service)?;
        Ok(PayComposition::resolve(
            grade,
            years,
            &self.zip_code,
            self.with_dependents,
        ))
    }
}

pub fn service_years(years: u32) -> Result<u32, CalcError> {
    if years > MAX_YEARS_OF_SERVICE {
        return Err(CalcError::out_of_range(
            "yearsOfService",
            format!("must be between 0 and {MAX_YEARS_OF_SERVICE}"),
        ));
    }
    Ok(years)
}

/// Monthly components as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPay {
    pub base_pay: f64,
    pub bas: f64,
    pub bah: f64,
    pub total: f64,
}

impl PayComposition {
    pub fn monthly(&self) -> MonthlyPay {
        MonthlyPay {
            base_pay: self.base_pay,
            bas: self.subsistence,
            bah: self.housing,
            total: self.monthly_total(),
        }
    }
}

/// Whether the standard deduction is taken before federal tax on base pay.
///
/// The salary-equivalence comparison taxes gross base pay; the tax
/// calculator applies the deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxBasis {
    GrossBasePay,
    AfterStandardDeduction,
}

/// Annual military taxes and take-home pay. State tax is taken as zero:
/// members are usually taxed by a home state they are not stationed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryTaxes {
    pub taxable_income: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica: f64,
    pub total_tax: f64,
    pub net_income: f64,
    pub effective_rate: f64,
}

pub fn military_taxes(pay: &PayComposition, status: FilingStatus, basis: TaxBasis) -> MilitaryTaxes {
    let annual_base = pay.annual_base_pay();
    let taxable_income = match basis {
        TaxBasis::GrossBasePay => annual_base,
        TaxBasis::AfterStandardDeduction => (annual_base - status.standard_deduction()).max(0.0),
    };

    let federal = federal_tax(taxable_income, status);
    let payroll = fica(annual_base).total;
    let state = 0.0;
    let total_tax = federal + payroll + state;
    let gross = pay.annual_total();

    MilitaryTaxes {
        taxable_income,
        federal_tax: federal,
        state_tax: state,
        fica: payroll,
        total_tax,
        net_income: gross - total_tax,
        effective_rate: percent_one_decimal(total_tax, gross),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_e5_at_six_years_default_location() {
        let pay = PayComposition::resolve(PayGrade::E5, 6, "00000", true);
        assert_eq!(pay.base_pay, 3420.30);
        assert_eq!(pay.subsistence, 460.25);
        assert_eq!(pay.housing, 1725.0);
        assert!(!pay.housing_is_exact_zip_match);
        assert!((pay.monthly_total() - 5605.55).abs() < 1e-9);
    }

    #[test]
    fn test_profile_rejects_bad_grade_and_years() {
        let mut profile = MilitaryProfile {
            grade: "E-4".to_string(),
            years_of_service: 41,
            zip_code: "76544".to_string(),
            with_dependents: true,
        };
        assert!(matches!(profile.resolve(), Err(CalcError::OutOfRange { .. })));

        profile.years_of_service = 4;
        assert_eq!(profile.resolve().unwrap().base_pay, 2916.60);

        profile.grade = "Z1".to_string();
        assert_eq!(profile.resolve(), Err(CalcError::InvalidGrade("Z1".to_string())));
    }

    #[test]
    fn test_allowances_are_not_taxed() {
        let pay = PayComposition::resolve(PayGrade::O3, 8, "92101", true);
        let taxes = military_taxes(&pay, FilingStatus::Single, TaxBasis::GrossBasePay);
        assert_eq!(taxes.taxable_income, pay.annual_base_pay());
        assert_eq!(taxes.state_tax, 0.0);
        assert!((taxes.net_income + taxes.total_tax - pay.annual_total()).abs() < 1e-6);
    }

    #[test]
    fn test_standard_deduction_lowers_federal_tax_only() {
        let pay = PayComposition::resolve(PayGrade::E6, 10, "28307", false);
        let gross = military_taxes(&pay, FilingStatus::Single, TaxBasis::GrossBasePay);
        let deducted = military_taxes(&pay, FilingStatus::Single, TaxBasis::AfterStandardDeduction);
        assert!(deducted.federal_tax < gross.federal_tax);
        assert_eq!(deducted.fica, gross.fica);
    }
}
