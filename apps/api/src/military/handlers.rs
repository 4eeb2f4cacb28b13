use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::AnalyticsEvent;
use crate::errors::{non_negative, AppError, CalcError};
use crate::military::composition::{
    military_taxes, service_years, MilitaryProfile, PayComposition, TaxBasis,
};
use crate::military::equivalence::{all_state_equivalents, StateEquivalent};
use crate::military::pay::{
    base_pay, housing_allowance, retirement_eligibility, retirement_pay, subsistence_allowance,
    BranchTitles, DataSource, GradeCategory, PayGrade, RetirementEligibility, RetirementSystem,
    DATA_SOURCE,
};
use crate::money::{format_usd, round_dollars};
use crate::state::AppState;
use crate::tax::brackets::FilingStatus;
use crate::tax::states::TaxType;

fn parse_grade(raw: Option<&str>) -> Result<PayGrade, CalcError> {
    match raw.map(str::trim).filter(|g| !g.is_empty()) {
        Some(grade) => grade.parse(),
        None => Err(CalcError::MissingField("grade")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GET /api/military/pay
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PayQuery {
    pub grade: Option<String>,
    pub years: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInfo {
    pub title: String,
    pub army_title: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayAmounts {
    pub base_pay: f64,
    pub bas: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayResponse {
    pub grade: PayGrade,
    pub years_of_service: u32,
    pub grade_info: GradeInfo,
    pub monthly: PayAmounts,
    pub annual: PayAmounts,
    pub data_source: DataSource,
}

fn parse_years(raw: Option<&str>) -> Result<u32, CalcError> {
    let Some(raw) = raw.map(str::trim).filter(|y| !y.is_empty()) else {
        return Ok(0);
    };
    let years = raw.parse::<u32>().map_err(|_| {
        CalcError::out_of_range("years", "must be a number between 0 and 40")
    })?;
    service_years(years)
}

/// GET /api/military/pay?grade=E5&years=6
pub async fn handle_pay(Query(query): Query<PayQuery>) -> Result<Json<PayResponse>, AppError> {
    let grade = parse_grade(query.grade.as_deref())?;
    let years = parse_years(query.years.as_deref())?;

    let base = base_pay(grade, years);
    let bas = subsistence_allowance(grade);

    Ok(Json(PayResponse {
        grade,
        years_of_service: years,
        grade_info: GradeInfo {
            title: grade.title(),
            army_title: grade.branch_titles().army,
        },
        monthly: PayAmounts {
            base_pay: base,
            bas,
            total: base + bas,
        },
        annual: PayAmounts {
            base_pay: base * 12.0,
            bas: bas * 12.0,
            total: (base + bas) * 12.0,
        },
        data_source: DATA_SOURCE,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// GET /api/military/bah
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BahQuery {
    pub grade: Option<String>,
    pub zip: Option<String>,
    pub dependents: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BahResponse {
    pub grade: PayGrade,
    pub zip_code: String,
    pub with_dependents: bool,
    pub monthly: f64,
    pub annual: f64,
    pub is_exact_zip_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<&'static str>,
    pub note: &'static str,
    pub data_source: DataSource,
}

pub fn is_zip_code(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

/// GET /api/military/bah?grade=E5&zip=28307&dependents=false
///
/// `dependents` is true unless given as exactly `false`.
pub async fn handle_bah(Query(query): Query<BahQuery>) -> Result<Json<BahResponse>, AppError> {
    let grade = parse_grade(query.grade.as_deref())?;
    let zip = query
        .zip
        .as_deref()
        .map(str::trim)
        .filter(|z| is_zip_code(z))
        .ok_or_else(|| CalcError::out_of_range("zip", "must be a 5-digit ZIP code"))?;
    let with_dependents = query.dependents.as_deref() != Some("false");

    let housing = housing_allowance(grade, zip, with_dependents);
    let note = if housing.is_exact_zip_match {
        "BAH rate for this specific location"
    } else {
        "Estimated BAH based on national average. Actual rates may vary by location."
    };

    Ok(Json(BahResponse {
        grade,
        zip_code: zip.to_string(),
        with_dependents,
        monthly: housing.monthly,
        annual: housing.monthly * 12.0,
        is_exact_zip_match: housing.is_exact_zip_match,
        location_name: housing.location_name,
        note,
        data_source: DATA_SOURCE,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// GET /api/military/grades
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub code: PayGrade,
    pub title: String,
    pub label: String,
    pub category: GradeCategory,
    pub branch_titles: BranchTitles,
}

#[derive(Debug, Serialize)]
pub struct GradesResponse {
    pub grades: Vec<GradeEntry>,
}

/// GET /api/military/grades
pub async fn handle_grades() -> Json<GradesResponse> {
    let grades = PayGrade::ALL
        .into_iter()
        .map(|grade| GradeEntry {
            code: grade,
            title: grade.title(),
            label: grade.label(),
            category: grade.category(),
            branch_titles: grade.branch_titles(),
        })
        .collect();
    Json(GradesResponse { grades })
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/military/equivalent
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparationType {
    #[default]
    Ets,
    Retiree,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentRequest {
    #[serde(flatten)]
    pub profile: MilitaryProfile,
    #[serde(default)]
    pub filing_status: FilingStatus,
    #[serde(default)]
    pub separation_type: SeparationType,
    #[serde(default)]
    pub retirement_system: RetirementSystem,
    /// Overrides the computed pension when given.
    pub monthly_retirement_pay: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedMonthly {
    pub base_pay: f64,
    pub bah: f64,
    pub bas: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedAnnual {
    pub base_pay: f64,
    pub bah: f64,
    pub bas: f64,
    pub gross_total: f64,
    pub taxable_income: f64,
    pub tax_free_allowances: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedTaxes {
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica: f64,
    pub total_tax: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedNet {
    pub annual: f64,
    pub monthly: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitarySummary {
    pub grade: PayGrade,
    pub years_of_service: u32,
    pub zip_code: String,
    pub with_dependents: bool,
    pub separation_type: SeparationType,
    pub monthly: RoundedMonthly,
    pub annual: RoundedAnnual,
    pub taxes: RoundedTaxes,
    pub net_income: RoundedNet,
    pub effective_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSummary {
    pub system: RetirementSystem,
    pub monthly_pay: f64,
    pub annual_pay: f64,
    pub eligibility: RetirementEligibility,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentSummary {
    pub lowest_salary_needed: StateEquivalent,
    pub highest_salary_needed: StateEquivalent,
    pub average_salary_needed: f64,
    pub no_tax_states: Vec<StateEquivalent>,
    pub flat_tax_states: Vec<StateEquivalent>,
    pub progressive_states: Vec<StateEquivalent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentResponse {
    pub military: MilitarySummary,
    pub retirement: Option<RetirementSummary>,
    pub state_equivalents: Vec<StateEquivalent>,
    pub summary: EquivalentSummary,
    pub insight: String,
}

fn summarize_military(req: &EquivalentRequest, pay: &PayComposition) -> MilitarySummary {
    // Gross base pay is taxed here with no deduction; see `TaxBasis`.
    let taxes = military_taxes(pay, req.filing_status, TaxBasis::GrossBasePay);

    MilitarySummary {
        grade: pay.grade,
        years_of_service: pay.years_of_service,
        zip_code: req.profile.zip_code.trim().to_string(),
        with_dependents: req.profile.with_dependents,
        separation_type: req.separation_type,
        monthly: RoundedMonthly {
            base_pay: round_dollars(pay.base_pay),
            bah: round_dollars(pay.housing),
            bas: round_dollars(pay.subsistence),
            total: round_dollars(pay.monthly_total()),
        },
        annual: RoundedAnnual {
            base_pay: round_dollars(pay.annual_base_pay()),
            bah: round_dollars(pay.housing * 12.0),
            bas: round_dollars(pay.subsistence * 12.0),
            gross_total: round_dollars(pay.annual_total()),
            taxable_income: round_dollars(pay.annual_base_pay()),
            tax_free_allowances: round_dollars(pay.annual_tax_free_allowances()),
        },
        taxes: RoundedTaxes {
            federal_tax: round_dollars(taxes.federal_tax),
            state_tax: round_dollars(taxes.state_tax),
            fica: round_dollars(taxes.fica),
            total_tax: round_dollars(taxes.total_tax),
        },
        net_income: RoundedNet {
            annual: round_dollars(taxes.net_income),
            monthly: round_dollars(taxes.net_income / 12.0),
        },
        effective_rate: taxes.effective_rate,
    }
}

fn retirement_summary(
    req: &EquivalentRequest,
    pay: &PayComposition,
) -> Result<Option<RetirementSummary>, CalcError> {
    if req.separation_type != SeparationType::Retiree {
        return Ok(None);
    }
    let monthly = match req.monthly_retirement_pay {
        Some(amount) => non_negative("monthlyRetirementPay", amount)?,
        None => retirement_pay(pay.grade, pay.years_of_service, req.retirement_system),
    };
    Ok(Some(RetirementSummary {
        system: req.retirement_system,
        monthly_pay: round_dollars(monthly),
        annual_pay: round_dollars(monthly * 12.0),
        eligibility: retirement_eligibility(pay.years_of_service),
    }))
}

fn insight(
    military_net: f64,
    annual_pension: f64,
    lowest: &StateEquivalent,
    highest: &StateEquivalent,
) -> String {
    let range = format!(
        "you'd need a civilian salary ranging from {} in {} to {} in {}",
        format_usd(lowest.equivalent_salary),
        lowest.state_name,
        format_usd(highest.equivalent_salary),
        highest.state_name,
    );
    if annual_pension > 0.0 {
        format!(
            "As a retiree receiving {}/year in retirement pay, you'll need less civilian income. \
To match your military take-home of {}/year, {range}, combined with your retirement pension.",
            format_usd(annual_pension),
            format_usd(military_net),
        )
    } else {
        format!(
            "To match your military take-home pay of {}/year, {range}.",
            format_usd(military_net)
        )
    }
}

pub fn build_equivalent(req: &EquivalentRequest) -> Result<EquivalentResponse, AppError> {
    if req.profile.grade.trim().is_empty() {
        return Err(CalcError::MissingField("grade").into());
    }
    if req.profile.zip_code.trim().is_empty() {
        return Err(CalcError::MissingField("zipCode").into());
    }

    let pay = req.profile.resolve()?;
    let military = summarize_military(req, &pay);
    let retirement = retirement_summary(req, &pay)?;
    let annual_pension = retirement.as_ref().map_or(0.0, |r| r.annual_pay);

    let military_net = pay.annual_total()
        - military_taxes(&pay, req.filing_status, TaxBasis::GrossBasePay).total_tax;
    let rows = all_state_equivalents(
        military_net,
        pay.annual_total(),
        annual_pension,
        req.filing_status,
    );

    let (Some(lowest), Some(highest)) = (rows.first().cloned(), rows.last().cloned()) else {
        return Err(AppError::Internal(anyhow::anyhow!("no state tax regimes loaded")));
    };
    let average = round_dollars(
        rows.iter().map(|r| r.equivalent_salary).sum::<f64>() / rows.len() as f64,
    );
    let by_type = |tax_type: TaxType| -> Vec<StateEquivalent> {
        rows.iter()
            .filter(|r| r.tax_type == tax_type)
            .cloned()
            .collect()
    };

    let summary = EquivalentSummary {
        average_salary_needed: average,
        no_tax_states: by_type(TaxType::None),
        flat_tax_states: by_type(TaxType::Flat),
        progressive_states: by_type(TaxType::Progressive),
        lowest_salary_needed: lowest,
        highest_salary_needed: highest,
    };

    Ok(EquivalentResponse {
        insight: insight(
            military_net,
            annual_pension,
            &summary.lowest_salary_needed,
            &summary.highest_salary_needed,
        ),
        military,
        retirement,
        state_equivalents: rows,
        summary,
    })
}

/// POST /api/military/equivalent
///
/// Civilian salary needed in every state to match military take-home pay,
/// net of any retirement pension.
pub async fn handle_equivalent(
    State(state): State<AppState>,
    Json(req): Json<EquivalentRequest>,
) -> Result<Json<EquivalentResponse>, AppError> {
    let response = build_equivalent(&req)?;

    info!(
        grade = %response.military.grade,
        years = response.military.years_of_service,
        separation = ?req.separation_type,
        lowest = response.summary.lowest_salary_needed.equivalent_salary,
        "Military equivalent salaries calculated"
    );
    state.events.record(
        AnalyticsEvent::tool_completed("salary-equivalent")
            .with("grade", response.military.grade.code()),
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(separation_type: SeparationType, years: u32) -> EquivalentRequest {
        EquivalentRequest {
            profile: MilitaryProfile {
                grade: "E7".to_string(),
                years_of_service: years,
                zip_code: "23511".to_string(),
                with_dependents: true,
            },
            filing_status: FilingStatus::Single,
            separation_type,
            retirement_system: RetirementSystem::High3,
            monthly_retirement_pay: None,
        }
    }

    #[test]
    fn test_parse_years_defaults_and_bounds() {
        assert_eq!(parse_years(None), Ok(0));
        assert_eq!(parse_years(Some("12")), Ok(12));
        assert!(parse_years(Some("41")).is_err());
        assert!(parse_years(Some("-1")).is_err());
        assert!(parse_years(Some("ten")).is_err());
    }

    #[test]
    fn test_zip_code_shape() {
        assert!(is_zip_code("28307"));
        assert!(!is_zip_code("2830"));
        assert!(!is_zip_code("28307-1234"));
        assert!(!is_zip_code("abcde"));
    }

    #[test]
    fn test_missing_grade_is_reported() {
        assert_eq!(parse_grade(None), Err(CalcError::MissingField("grade")));
        assert_eq!(parse_grade(Some("  ")), Err(CalcError::MissingField("grade")));
        assert_eq!(parse_grade(Some("w-3")), Ok(PayGrade::W3));
    }

    #[test]
    fn test_ets_equivalent_covers_every_state_sorted() {
        let response = build_equivalent(&request(SeparationType::Ets, 12)).unwrap();
        assert_eq!(response.state_equivalents.len(), 51);
        assert!(response
            .state_equivalents
            .windows(2)
            .all(|w| w[0].equivalent_salary <= w[1].equivalent_salary));
        assert!(response.retirement.is_none());
        assert_eq!(
            response.summary.lowest_salary_needed.tax_type,
            TaxType::None
        );
        assert_eq!(
            response.summary.no_tax_states.len()
                + response.summary.flat_tax_states.len()
                + response.summary.progressive_states.len(),
            51
        );
        assert!(response.insight.starts_with("To match your military take-home pay of $"));
    }

    #[test]
    fn test_retiree_pension_lowers_needed_salary() {
        let ets = build_equivalent(&request(SeparationType::Ets, 20)).unwrap();
        let retiree = build_equivalent(&request(SeparationType::Retiree, 20)).unwrap();

        let retirement = retiree.retirement.as_ref().unwrap();
        // E-7 at 20 years under High-3: 50% of base pay.
        assert_eq!(retirement.monthly_pay, 2721.0);
        assert!(retirement.eligibility.eligible);
        assert!(
            retiree.summary.average_salary_needed < ets.summary.average_salary_needed
        );
        assert!(retiree.insight.starts_with("As a retiree receiving $32,652/year"));
    }

    #[test]
    fn test_large_pension_covers_everything() {
        let mut req = request(SeparationType::Retiree, 20);
        req.monthly_retirement_pay = Some(50_000.0);
        let response = build_equivalent(&req).unwrap();
        assert!(response
            .state_equivalents
            .iter()
            .all(|row| row.retirement_income_covers_all && row.equivalent_salary == 0.0));
    }

    #[test]
    fn test_missing_zip_is_rejected() {
        let mut req = request(SeparationType::Ets, 4);
        req.profile.zip_code = String::new();
        assert!(matches!(
            build_equivalent(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_equivalent_request_defaults() {
        let req: EquivalentRequest = serde_json::from_str(
            r#"{"grade":"O3","yearsOfService":6,"zipCode":"92101"}"#,
        )
        .unwrap();
        assert!(req.profile.with_dependents);
        assert_eq!(req.separation_type, SeparationType::Ets);
        assert_eq!(req.retirement_system, RetirementSystem::High3);
        assert_eq!(req.filing_status, FilingStatus::Single);
    }
}
