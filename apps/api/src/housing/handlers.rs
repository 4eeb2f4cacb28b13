use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::AnalyticsEvent;
use crate::errors::{positive, within, AppError, CalcError};
use crate::housing::amortization::Amortization;
use crate::housing::rent_vs_buy::{
    break_even_year, compare_at, Assumptions, HomePurchase, HorizonComparison, ASSUMPTIONS,
    MAX_BREAK_EVEN_YEARS,
};
use crate::housing::va_loan::{FundingFeeTerms, FEE_EXEMPTIONS, VA_30_YEAR_RATE};
use crate::state::AppState;

pub const HORIZONS: [u32; 4] = [1, 3, 5, 10];
pub const LOAN_TERMS: [u32; 2] = [15, 30];
pub const MAX_INTEREST_RATE: f64 = 25.0;

const DISCLAIMER: &str = "This calculator provides estimates for educational purposes only. \
Actual costs will vary based on location, credit score, market conditions, and other factors. \
Consult with a mortgage professional for personalized advice.";

fn default_true() -> bool {
    true
}

fn default_rate() -> f64 {
    VA_30_YEAR_RATE
}

fn default_term() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingCompareRequest {
    pub home_price: Option<f64>,
    #[serde(default)]
    pub down_payment_percent: f64,
    pub monthly_rent: Option<f64>,
    #[serde(default = "default_rate")]
    pub interest_rate: f64,
    #[serde(default = "default_term")]
    pub loan_term_years: u32,
    #[serde(default = "default_true", rename = "isFirstTimeVA")]
    pub is_first_time_va: bool,
    #[serde(default)]
    pub is_funding_fee_exempt: bool,
}

/// Inputs after validation.
#[derive(Debug, Clone, Copy)]
pub struct HousingInputs {
    pub home_price: f64,
    pub down_payment_percent: f64,
    pub monthly_rent: f64,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    pub fee_terms: FundingFeeTerms,
}

impl HousingCompareRequest {
    pub fn validate(&self) -> Result<HousingInputs, CalcError> {
        let home_price = positive(
            "homePrice",
            self.home_price.ok_or(CalcError::MissingField("homePrice"))?,
        )?;
        let monthly_rent = positive(
            "monthlyRent",
            self.monthly_rent.ok_or(CalcError::MissingField("monthlyRent"))?,
        )?;
        let down_payment_percent =
            within("downPaymentPercent", self.down_payment_percent, 0.0, 100.0)?;
        let interest_rate = within("interestRate", self.interest_rate, 0.0, MAX_INTEREST_RATE)?;
        if !LOAN_TERMS.contains(&self.loan_term_years) {
            return Err(CalcError::out_of_range("loanTermYears", "must be 15 or 30"));
        }

        Ok(HousingInputs {
            home_price,
            down_payment_percent,
            monthly_rent,
            interest_rate,
            loan_term_years: self.loan_term_years,
            fee_terms: FundingFeeTerms {
                first_use: self.is_first_time_va,
                exempt: self.is_funding_fee_exempt,
            },
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputsEcho {
    pub home_price: f64,
    pub down_payment: f64,
    pub down_payment_percent: f64,
    pub monthly_rent: f64,
    pub interest_rate: f64,
    pub loan_term_years: u32,
    #[serde(rename = "isFirstTimeVA")]
    pub is_first_time_va: bool,
    pub is_funding_fee_exempt: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaLoanSummary {
    pub loan_amount: f64,
    pub funding_fee: f64,
    pub funding_fee_percent: f64,
    pub total_loan_amount: f64,
    pub fee_exemptions: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBuying {
    pub mortgage_payment: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRenting {
    pub rent: f64,
    pub insurance: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparison {
    pub buying: MonthlyBuying,
    pub renting: MonthlyRenting,
    pub difference: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyingBreakdown {
    pub down_payment: f64,
    pub closing_costs: f64,
    pub mortgage_payments: f64,
    pub property_taxes: f64,
    pub insurance: f64,
    pub maintenance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyingPosition {
    pub total_cash_outflow: f64,
    pub home_equity: f64,
    pub home_value: f64,
    pub net_cost: f64,
    pub breakdown: BuyingBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentingBreakdown {
    pub total_rent: f64,
    pub insurance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentingPosition {
    pub total_cash_outflow: f64,
    pub net_cost: f64,
    pub net_cost_with_opportunity: f64,
    pub opportunity_cost_of_down_payment: f64,
    pub breakdown: RentingBreakdown,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDifference {
    pub absolute_difference: f64,
    pub with_opportunity_cost: f64,
    pub buying_is_better: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonResult {
    pub years: u32,
    pub buying: BuyingPosition,
    pub renting: RentingPosition,
    pub difference: PositionDifference,
}

impl From<HorizonComparison> for HorizonResult {
    fn from(c: HorizonComparison) -> Self {
        let buying_net = c.buying_net_cost();
        let renting_with_opportunity = c.renting_net_cost_with_opportunity();

        HorizonResult {
            years: c.years,
            buying: BuyingPosition {
                total_cash_outflow: c.buying.total_cash_outflow,
                home_equity: c.buying.home_equity,
                home_value: c.buying.home_value,
                net_cost: buying_net,
                breakdown: BuyingBreakdown {
                    down_payment: c.buying.down_payment,
                    closing_costs: c.buying.closing_costs,
                    mortgage_payments: c.buying.total_mortgage_payments,
                    property_taxes: c.buying.property_taxes,
                    insurance: c.buying.insurance,
                    maintenance: c.buying.maintenance,
                },
            },
            renting: RentingPosition {
                total_cash_outflow: c.renting.total_cash_outflow,
                net_cost: c.renting.total_cash_outflow,
                net_cost_with_opportunity: renting_with_opportunity,
                opportunity_cost_of_down_payment: c.opportunity_cost,
                breakdown: RentingBreakdown {
                    total_rent: c.renting.total_rent_paid,
                    insurance: c.renting.total_insurance,
                },
            },
            difference: PositionDifference {
                absolute_difference: c.renting.total_cash_outflow - buying_net,
                with_opportunity_cost: renting_with_opportunity - buying_net,
                buying_is_better: c.buying_is_better(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingCompareResponse {
    pub inputs: InputsEcho,
    pub va_loan: VaLoanSummary,
    pub monthly: MonthlyComparison,
    pub comparisons: Vec<HorizonResult>,
    pub break_even_year: Option<u32>,
    pub assumptions: Assumptions,
    pub disclaimer: &'static str,
}

pub fn compare(inputs: &HousingInputs) -> HousingCompareResponse {
    let down_payment = (inputs.home_price * inputs.down_payment_percent / 100.0).round();
    let loan_amount = inputs.home_price - down_payment;
    let funding_fee = inputs.fee_terms.fee(loan_amount, inputs.down_payment_percent);

    let purchase = HomePurchase {
        home_price: inputs.home_price,
        down_payment,
        interest_rate: inputs.interest_rate,
        term_years: inputs.loan_term_years,
        financed_fees: funding_fee,
    };
    let schedule: Amortization = purchase.amortization();

    let monthly_share = |rate_percent: f64| (inputs.home_price * rate_percent / 100.0 / 12.0).round();
    let buying = MonthlyBuying {
        mortgage_payment: schedule.monthly_payment,
        property_tax: monthly_share(ASSUMPTIONS.property_tax_rate),
        insurance: monthly_share(ASSUMPTIONS.home_insurance_rate),
        maintenance: monthly_share(ASSUMPTIONS.maintenance_rate),
        total: 0.0,
    };
    let buying = MonthlyBuying {
        total: buying.mortgage_payment + buying.property_tax + buying.insurance + buying.maintenance,
        ..buying
    };
    let renting = MonthlyRenting {
        rent: inputs.monthly_rent,
        insurance: ASSUMPTIONS.renters_insurance,
        total: inputs.monthly_rent + ASSUMPTIONS.renters_insurance,
    };

    let comparisons = HORIZONS
        .into_iter()
        .map(|years| compare_at(&purchase, &schedule, inputs.monthly_rent, years).into())
        .collect();

    HousingCompareResponse {
        inputs: InputsEcho {
            home_price: inputs.home_price,
            down_payment,
            down_payment_percent: inputs.down_payment_percent,
            monthly_rent: inputs.monthly_rent,
            interest_rate: inputs.interest_rate,
            loan_term_years: inputs.loan_term_years,
            is_first_time_va: inputs.fee_terms.first_use,
            is_funding_fee_exempt: inputs.fee_terms.exempt,
        },
        va_loan: VaLoanSummary {
            loan_amount,
            funding_fee,
            funding_fee_percent: inputs.fee_terms.percent(inputs.down_payment_percent),
            total_loan_amount: purchase.loan_amount(),
            fee_exemptions: &FEE_EXEMPTIONS,
        },
        monthly: MonthlyComparison {
            difference: buying.total - renting.total,
            buying,
            renting,
        },
        comparisons,
        break_even_year: break_even_year(&purchase, inputs.monthly_rent, MAX_BREAK_EVEN_YEARS),
        assumptions: ASSUMPTIONS,
        disclaimer: DISCLAIMER,
    }
}

/// POST /api/housing/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(req): Json<HousingCompareRequest>,
) -> Result<Json<HousingCompareResponse>, AppError> {
    let inputs = req.validate()?;
    let response = compare(&inputs);

    info!(
        home_price = inputs.home_price,
        monthly_rent = inputs.monthly_rent,
        break_even = ?response.break_even_year,
        "Housing comparison calculated"
    );
    state
        .events
        .record(AnalyticsEvent::tool_completed("va-loan-rent-vs-buy"));

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HousingCompareRequest {
        HousingCompareRequest {
            home_price: Some(350_000.0),
            down_payment_percent: 0.0,
            monthly_rent: Some(2_000.0),
            interest_rate: 6.25,
            loan_term_years: 30,
            is_first_time_va: true,
            is_funding_fee_exempt: false,
        }
    }

    #[test]
    fn test_defaults_from_json() {
        let req: HousingCompareRequest =
            serde_json::from_str(r#"{"homePrice":300000,"monthlyRent":1800}"#).unwrap();
        assert_eq!(req.interest_rate, 6.25);
        assert_eq!(req.loan_term_years, 30);
        assert!(req.is_first_time_va);
        assert!(!req.is_funding_fee_exempt);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        let mut req = request();
        req.home_price = None;
        assert_eq!(req.validate().unwrap_err(), CalcError::MissingField("homePrice"));

        let mut req = request();
        req.monthly_rent = Some(0.0);
        assert!(req.validate().is_err());

        let mut req = request();
        req.down_payment_percent = 100.5;
        assert!(req.validate().is_err());

        let mut req = request();
        req.loan_term_years = 20;
        assert!(req.validate().is_err());

        let mut req = request();
        req.interest_rate = 30.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_down_va_scenario() {
        let response = compare(&request().validate().unwrap());
        assert_eq!(response.va_loan.loan_amount, 350_000.0);
        assert_eq!(response.va_loan.funding_fee, 7_525.0);
        assert_eq!(response.va_loan.funding_fee_percent, 2.15);
        assert_eq!(response.va_loan.total_loan_amount, 357_525.0);
        assert_eq!(response.monthly.buying.mortgage_payment, 2_201.34);
        assert_eq!(response.monthly.buying.property_tax, 321.0);
        assert_eq!(response.monthly.renting.total, 2_020.0);
        assert_eq!(response.comparisons.len(), 4);
        assert_eq!(response.comparisons[0].buying.breakdown.down_payment, 0.0);
        assert!(matches!(response.break_even_year, Some(y) if (1..=10).contains(&y)));
    }

    #[test]
    fn test_down_payment_lowers_fee_tier() {
        let mut req = request();
        req.down_payment_percent = 10.0;
        let response = compare(&req.validate().unwrap());
        assert_eq!(response.inputs.down_payment, 35_000.0);
        assert_eq!(response.va_loan.funding_fee_percent, 1.25);
        assert_eq!(response.va_loan.funding_fee, 3_938.0);
        assert!(response.comparisons[1].renting.opportunity_cost_of_down_payment > 0.0);
    }
}
