//! Military versus civilian take-home pay for the tax calculator.

use serde::{Deserialize, Serialize};

use crate::errors::{non_negative, positive, CalcError};
use crate::military::composition::{
    military_taxes, MilitaryProfile, MonthlyPay, PayComposition, TaxBasis,
};
use crate::money::{percent_one_decimal, round_dollars};
use crate::tax::brackets::{federal_tax, FilingStatus};
use crate::tax::fica::{fica, FicaBreakdown};
use crate::tax::states::state_regime;

/// Net-to-gross divisor for the quick civilian-equivalent estimate
/// (roughly a 28% combined rate in a moderate-tax state).
pub const QUICK_EQUIVALENT_NET_RATIO: f64 = 0.72;

pub const DISCLAIMER: &str = "This calculator provides estimates for educational purposes only. \
Actual tax situations vary based on deductions, credits, filing status, and other factors. \
Consult a tax professional for personalized advice.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CivilianIncome {
    pub salary: f64,
    pub state: String,
    #[serde(default)]
    pub bonus: f64,
    #[serde(default, rename = "preTax401k")]
    pub pre_tax_401k: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationRequest {
    pub military: Option<MilitaryProfile>,
    #[serde(default)]
    pub civilian: Vec<CivilianIncome>,
    #[serde(default)]
    pub filing_status: FilingStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Military
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualMilitaryPay {
    pub base_pay: f64,
    pub bas: f64,
    pub bah: f64,
    pub tax_free_allowances: f64,
    pub gross_total: f64,
    pub taxable_income: f64,
    pub adjusted_taxable_income: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLines {
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica: FicaBreakdown,
    pub total_tax: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetIncome {
    pub annual: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryTaxResult {
    pub monthly: MonthlyPay,
    pub annual: AnnualMilitaryPay,
    pub taxes: TaxLines,
    pub net_income: NetIncome,
    pub effective_rate: f64,
}

pub fn military_result(pay: &PayComposition, status: FilingStatus) -> MilitaryTaxResult {
    let taxes = military_taxes(pay, status, TaxBasis::AfterStandardDeduction);
    let annual_base = pay.annual_base_pay();

    MilitaryTaxResult {
        monthly: pay.monthly(),
        annual: AnnualMilitaryPay {
            base_pay: annual_base,
            bas: pay.subsistence * 12.0,
            bah: pay.housing * 12.0,
            tax_free_allowances: pay.annual_tax_free_allowances(),
            gross_total: pay.annual_total(),
            taxable_income: annual_base,
            adjusted_taxable_income: taxes.taxable_income,
        },
        taxes: TaxLines {
            federal_tax: taxes.federal_tax,
            state_tax: taxes.state_tax,
            fica: fica(annual_base),
            total_tax: taxes.total_tax,
        },
        net_income: NetIncome {
            annual: taxes.net_income,
            monthly: round_dollars(taxes.net_income / 12.0),
        },
        effective_rate: taxes.effective_rate,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Civilian
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CivilianTaxResult {
    pub scenario: usize,
    pub gross_income: f64,
    pub taxable_income: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica: FicaBreakdown,
    pub total_tax: f64,
    pub net_income: f64,
    pub effective_rate: f64,
    pub state: String,
    pub state_name: String,
}

/// Taxes one civilian scenario. The 401(k) deferral lowers income tax but
/// not FICA, and is excluded from take-home pay.
pub fn civilian_result(
    scenario: usize,
    income: &CivilianIncome,
    status: FilingStatus,
) -> Result<CivilianTaxResult, CalcError> {
    let salary = positive("salary", income.salary)?;
    let bonus = non_negative("bonus", income.bonus)?;
    let deferral = non_negative("preTax401k", income.pre_tax_401k)?;
    let regime = state_regime(&income.state)?;

    let gross_income = salary + bonus;
    if deferral > gross_income {
        return Err(CalcError::out_of_range(
            "preTax401k",
            "cannot exceed gross income",
        ));
    }

    let taxable_income = (gross_income - deferral - status.standard_deduction()).max(0.0);
    let federal = federal_tax(taxable_income, status);
    let state = regime.tax(taxable_income);
    let payroll = fica(gross_income);
    let total_tax = federal + state + payroll.total;

    Ok(CivilianTaxResult {
        scenario,
        gross_income,
        taxable_income,
        federal_tax: federal,
        state_tax: state,
        fica: payroll,
        total_tax,
        net_income: gross_income - total_tax - deferral,
        effective_rate: percent_one_decimal(total_tax, gross_income),
        state: regime.code.to_string(),
        state_name: regime.name.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Comparison
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CivilianEquivalentEstimate {
    pub target_net_income: f64,
    pub estimated_gross_salary: f64,
    pub note: &'static str,
}

impl CivilianEquivalentEstimate {
    pub fn from_net(target_net_income: f64) -> Self {
        Self {
            target_net_income,
            estimated_gross_salary: round_dollars(target_net_income / QUICK_EQUIVALENT_NET_RATIO),
            note: "Estimated civilian salary needed to achieve the same after-tax income as your \
military compensation, assuming a moderate tax state.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryAdvantage {
    pub scenario: usize,
    pub state: String,
    pub civilian_gross: f64,
    pub civilian_net: f64,
    pub military_net: f64,
    pub difference: f64,
    pub percent_difference: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub military_advantage: Vec<MilitaryAdvantage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResponse {
    pub filing_status: FilingStatus,
    pub standard_deduction: f64,
    pub military: Option<MilitaryTaxResult>,
    pub civilian: Vec<CivilianTaxResult>,
    pub civilian_equivalent: Option<CivilianEquivalentEstimate>,
    pub comparison: Option<Comparison>,
    pub disclaimer: &'static str,
}

/// Validates every scenario up front, then computes. Scenarios are numbered
/// from 1 in request order.
pub fn calculate(req: &TaxCalculationRequest) -> Result<TaxCalculationResponse, CalcError> {
    let status = req.filing_status;

    let military = req
        .military
        .as_ref()
        .map(|profile| profile.resolve().map(|pay| military_result(&pay, status)))
        .transpose()?;

    let civilian = req
        .civilian
        .iter()
        .enumerate()
        .map(|(i, income)| civilian_result(i + 1, income, status))
        .collect::<Result<Vec<_>, _>>()?;

    let comparison = military
        .as_ref()
        .filter(|_| !civilian.is_empty())
        .map(|mil| Comparison {
            military_advantage: civilian
                .iter()
                .map(|civ| {
                    let difference = mil.net_income.annual - civ.net_income;
                    MilitaryAdvantage {
                        scenario: civ.scenario,
                        state: civ.state_name.clone(),
                        civilian_gross: civ.gross_income,
                        civilian_net: civ.net_income,
                        military_net: mil.net_income.annual,
                        difference,
                        percent_difference: percent_one_decimal(difference, civ.net_income),
                    }
                })
                .collect(),
        });

    Ok(TaxCalculationResponse {
        filing_status: status,
        standard_deduction: status.standard_deduction(),
        civilian_equivalent: military
            .as_ref()
            .map(|mil| CivilianEquivalentEstimate::from_net(mil.net_income.annual)),
        military,
        civilian,
        comparison,
        disclaimer: DISCLAIMER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e5_profile() -> MilitaryProfile {
        MilitaryProfile {
            grade: "E5".to_string(),
            years_of_service: 6,
            zip_code: "28307".to_string(),
            with_dependents: true,
        }
    }

    fn civilian(salary: f64, state: &str) -> CivilianIncome {
        CivilianIncome {
            salary,
            state: state.to_string(),
            bonus: 0.0,
            pre_tax_401k: 0.0,
        }
    }

    #[test]
    fn test_texas_scenario_pays_no_state_tax() {
        let result = civilian_result(1, &civilian(60_000.0, "TX"), FilingStatus::Single).unwrap();
        assert_eq!(result.taxable_income, 45_400.0);
        assert_eq!(result.state_tax, 0.0);
        // 1160 + 12% of 33,800
        assert_eq!(result.federal_tax, 5_216.0);
        assert_eq!(result.fica.total, 4_590.0);
        assert!((result.net_income - 50_194.0).abs() < 1e-6);
        assert_eq!(result.state_name, "Texas");
    }

    #[test]
    fn test_401k_reduces_income_tax_not_fica() {
        let plain = civilian_result(1, &civilian(90_000.0, "IL"), FilingStatus::Single).unwrap();
        let mut deferring = civilian(90_000.0, "IL");
        deferring.pre_tax_401k = 10_000.0;
        let deferred = civilian_result(1, &deferring, FilingStatus::Single).unwrap();

        assert_eq!(deferred.fica, plain.fica);
        assert!(deferred.federal_tax < plain.federal_tax);
        assert!(deferred.state_tax < plain.state_tax);
        assert!(deferred.net_income < plain.net_income);
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let err = civilian_result(1, &civilian(50_000.0, "ZZ"), FilingStatus::Single).unwrap_err();
        assert_eq!(err, CalcError::UnknownState("ZZ".to_string()));
    }

    #[test]
    fn test_negative_bonus_is_rejected() {
        let mut income = civilian(50_000.0, "TX");
        income.bonus = -1.0;
        assert!(civilian_result(1, &income, FilingStatus::Single).is_err());
    }

    #[test]
    fn test_military_result_splits_taxable_and_tax_free() {
        let pay = e5_profile().resolve().unwrap();
        let result = military_result(&pay, FilingStatus::Single);
        assert_eq!(result.annual.taxable_income, pay.annual_base_pay());
        assert_eq!(
            result.annual.adjusted_taxable_income,
            pay.annual_base_pay() - 14_600.0
        );
        assert_eq!(result.taxes.state_tax, 0.0);
        assert_eq!(result.taxes.fica.total, fica(pay.annual_base_pay()).total);
    }

    #[test]
    fn test_full_calculation_builds_comparison_rows() {
        let req = TaxCalculationRequest {
            military: Some(e5_profile()),
            civilian: vec![civilian(55_000.0, "TX"), civilian(55_000.0, "CA")],
            filing_status: FilingStatus::Single,
        };
        let response = calculate(&req).unwrap();

        let mil_net = response.military.as_ref().unwrap().net_income.annual;
        let comparison = response.comparison.unwrap();
        assert_eq!(comparison.military_advantage.len(), 2);
        assert_eq!(comparison.military_advantage[1].scenario, 2);
        assert_eq!(comparison.military_advantage[1].state, "California");
        // Higher state tax in CA leaves less civilian net, so a larger gap.
        assert!(comparison.military_advantage[1].difference > comparison.military_advantage[0].difference);

        let estimate = response.civilian_equivalent.unwrap();
        assert_eq!(estimate.estimated_gross_salary, (mil_net / 0.72).round());
    }

    #[test]
    fn test_civilian_only_has_no_comparison() {
        let req = TaxCalculationRequest {
            military: None,
            civilian: vec![civilian(70_000.0, "NY")],
            filing_status: FilingStatus::Married,
        };
        let response = calculate(&req).unwrap();
        assert!(response.comparison.is_none());
        assert!(response.civilian_equivalent.is_none());
        assert_eq!(response.standard_deduction, 29_200.0);
    }
}
