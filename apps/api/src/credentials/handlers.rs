use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::AnalyticsEvent;
use crate::credentials::catalog::{find_credential, Credential, ExperienceLevel, CREDENTIALS};
use crate::credentials::roi::{analyze, gi_bill_benefit, RoiAnalysis, GI_BILL};
use crate::errors::{positive, AppError, CalcError};
use crate::money::{format_usd, round_dollars};
use crate::state::AppState;

pub const DEFAULT_YEARS_TO_ANALYZE: u32 = 10;
pub const MAX_YEARS_TO_ANALYZE: u32 = 40;
pub const MAX_BATCH: usize = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRoiRequest {
    pub credential_id: Option<String>,
    pub current_salary: Option<f64>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default, rename = "useGIBill", alias = "useGIBillBenefit")]
    pub use_gi_bill: bool,
    #[serde(default)]
    pub is_private_school: bool,
    pub years_to_analyze: Option<u32>,
}

/// A batch is tried first: a single request has no `credentials` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoiCalculateRequest {
    Batch { credentials: Vec<CredentialRoiRequest> },
    Single(CredentialRoiRequest),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiBillDetails {
    pub tuition_covered: f64,
    pub housing_allowance: f64,
    pub book_stipend: f64,
    pub total_benefit: f64,
    pub months_used: u32,
    pub months_remaining: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiAssumptions {
    pub discount_rate: &'static str,
    pub salary_increase: String,
    pub time_to_complete: String,
    pub cost_estimate: String,
    pub gi_bill: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRoiResult {
    pub credential: &'static Credential,
    pub analysis: RoiAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gi_bill_details: Option<GiBillDetails>,
    pub assumptions: RoiAssumptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiComparisonSummary {
    pub credentials: Vec<&'static str>,
    #[serde(rename = "bestNPV")]
    pub best_npv: f64,
    /// `None` when no credential in the batch ever breaks even.
    pub fastest_break_even: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RoiComparison {
    pub comparison: bool,
    pub results: Vec<CredentialRoiResult>,
    pub winner: Option<&'static str>,
    pub summary: RoiComparisonSummary,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RoiCalculateResponse {
    Single(Box<CredentialRoiResult>),
    Batch(RoiComparison),
}

pub fn calculate_one(req: &CredentialRoiRequest) -> Result<CredentialRoiResult, CalcError> {
    let id = req
        .credential_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(CalcError::MissingField("credentialId"))?;
    let salary = req
        .current_salary
        .ok_or(CalcError::MissingField("currentSalary"))?;
    positive("currentSalary", salary)?;

    let years = req.years_to_analyze.unwrap_or(DEFAULT_YEARS_TO_ANALYZE);
    if !(1..=MAX_YEARS_TO_ANALYZE).contains(&years) {
        return Err(CalcError::out_of_range(
            "yearsToAnalyze",
            format!("must be between 1 and {MAX_YEARS_TO_ANALYZE}"),
        ));
    }

    let credential = find_credential(id)?;
    let benefit = req
        .use_gi_bill
        .then(|| gi_bill_benefit(credential, req.is_private_school));
    let analysis = analyze(credential, req.experience_level, benefit.as_ref(), years);

    let gi_bill_details = benefit.map(|b| GiBillDetails {
        tuition_covered: round_dollars(b.tuition_covered),
        housing_allowance: round_dollars(b.housing_allowance),
        book_stipend: round_dollars(b.book_stipend),
        total_benefit: round_dollars(b.total_benefit),
        months_used: b.months_used,
        months_remaining: b.months_remaining,
    });

    Ok(CredentialRoiResult {
        credential,
        analysis,
        gi_bill_details,
        assumptions: RoiAssumptions {
            discount_rate: "5% annual discount rate for NPV",
            salary_increase: format!(
                "Based on {} level estimates",
                req.experience_level.as_str()
            ),
            time_to_complete: format!("Average {} months", credential.average_months().round()),
            cost_estimate: format!(
                "Average of {} - {}",
                format_usd(credential.total_cost.min),
                format_usd(credential.total_cost.max)
            ),
            gi_bill: if req.use_gi_bill {
                "Post-9/11 GI Bill benefits applied"
            } else {
                "No GI Bill benefits applied"
            },
        },
    })
}

/// Ranks a batch by ten-year NPV. Ties go to the earlier credential.
pub fn compare(requests: &[CredentialRoiRequest]) -> Result<RoiComparison, CalcError> {
    if requests.is_empty() || requests.len() > MAX_BATCH {
        return Err(CalcError::out_of_range(
            "credentials",
            "comparison requires 1 or 2 credentials",
        ));
    }
    let results = requests
        .iter()
        .map(calculate_one)
        .collect::<Result<Vec<_>, _>>()?;

    let winner = match results.as_slice() {
        [first, second] => Some(
            if second.analysis.npv_10_year > first.analysis.npv_10_year {
                second.credential.name
            } else {
                first.credential.name
            },
        ),
        _ => None,
    };

    let summary = RoiComparisonSummary {
        credentials: results.iter().map(|r| r.credential.name).collect(),
        best_npv: results
            .iter()
            .map(|r| r.analysis.npv_10_year)
            .fold(f64::NEG_INFINITY, f64::max),
        fastest_break_even: results
            .iter()
            .filter_map(|r| r.analysis.break_even_months)
            .reduce(f64::min),
    };

    Ok(RoiComparison {
        comparison: true,
        results,
        winner,
        summary,
    })
}

/// POST /api/roi/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    Json(req): Json<RoiCalculateRequest>,
) -> Result<Json<RoiCalculateResponse>, AppError> {
    let response = match &req {
        RoiCalculateRequest::Single(one) => {
            let result = calculate_one(one)?;
            info!(
                credential = result.credential.id,
                gi_bill = one.use_gi_bill,
                npv_10_year = result.analysis.npv_10_year,
                "Credential ROI calculated"
            );
            RoiCalculateResponse::Single(Box::new(result))
        }
        RoiCalculateRequest::Batch { credentials } => {
            let comparison = compare(credentials)?;
            info!(
                credentials = ?comparison.summary.credentials,
                winner = ?comparison.winner,
                "Credential ROI comparison calculated"
            );
            RoiCalculateResponse::Batch(comparison)
        }
    };

    state
        .events
        .record(AnalyticsEvent::tool_completed("roi-calculator"));

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialListing {
    #[serde(flatten)]
    pub credential: &'static Credential,
    pub type_name: &'static str,
    pub industry_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiBillSummary {
    pub max_months: u32,
    pub private_tuition_cap: f64,
    pub monthly_housing: f64,
    pub book_stipend: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsResponse {
    pub credentials: Vec<CredentialListing>,
    pub gi_bill: GiBillSummary,
}

/// GET /api/roi/credentials
pub async fn handle_credentials() -> Json<CredentialsResponse> {
    Json(CredentialsResponse {
        credentials: CREDENTIALS
            .iter()
            .map(|credential| CredentialListing {
                credential,
                type_name: credential.kind.display_name(),
                industry_name: credential.industry.display_name(),
            })
            .collect(),
        gi_bill: GiBillSummary {
            max_months: GI_BILL.max_months,
            private_tuition_cap: GI_BILL.private_tuition_cap,
            monthly_housing: GI_BILL.monthly_housing,
            book_stipend: GI_BILL.book_stipend,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str) -> CredentialRoiRequest {
        CredentialRoiRequest {
            credential_id: Some(id.to_string()),
            current_salary: Some(60_000.0),
            ..CredentialRoiRequest::default()
        }
    }

    #[test]
    fn test_single_request_validation() {
        let mut req = request("pmp");
        req.current_salary = Some(0.0);
        assert!(calculate_one(&req).is_err());

        let mut req = request("pmp");
        req.years_to_analyze = Some(41);
        assert!(calculate_one(&req).is_err());

        assert_eq!(
            calculate_one(&CredentialRoiRequest::default()).unwrap_err(),
            CalcError::MissingField("credentialId")
        );
        assert!(matches!(
            calculate_one(&request("astronaut")),
            Err(CalcError::UnknownCredential(_))
        ));
    }

    #[test]
    fn test_gi_bill_details_only_when_used() {
        let plain = calculate_one(&request("masters-mba")).unwrap();
        assert!(plain.gi_bill_details.is_none());
        assert_eq!(plain.assumptions.cost_estimate, "Average of $50,000 - $200,000");

        let mut req = request("masters-mba");
        req.use_gi_bill = true;
        let with_benefit = calculate_one(&req).unwrap();
        let details = with_benefit.gi_bill_details.unwrap();
        assert_eq!(details.tuition_covered, 125_000.0);
        assert_eq!(with_benefit.analysis.total_investment, 0.0);
    }

    #[test]
    fn test_batch_picks_higher_npv() {
        let comparison = compare(&[request("pmp"), request("bootcamp-data-science")]).unwrap();
        assert_eq!(comparison.winner, Some("Data Science Bootcamp"));
        assert_eq!(comparison.summary.credentials.len(), 2);
        assert_eq!(
            comparison.summary.best_npv,
            comparison.results[1].analysis.npv_10_year
        );
        assert_eq!(comparison.summary.fastest_break_even, Some(8.0));
    }

    #[test]
    fn test_batch_size_bounds() {
        assert!(compare(&[]).is_err());
        assert!(compare(&[request("pmp"), request("cpa"), request("cissp")]).is_err());
        assert_eq!(compare(&[request("pmp")]).unwrap().winner, None);
    }

    #[test]
    fn test_request_shapes_deserialize() {
        let single: RoiCalculateRequest = serde_json::from_str(
            r#"{"credentialId":"pmp","currentSalary":50000,"experienceLevel":"experienced","useGIBill":true}"#,
        )
        .unwrap();
        match single {
            RoiCalculateRequest::Single(req) => {
                assert_eq!(req.experience_level, ExperienceLevel::Experienced);
                assert!(req.use_gi_bill);
            }
            RoiCalculateRequest::Batch { .. } => panic!("expected a single request"),
        }

        let batch: RoiCalculateRequest = serde_json::from_str(
            r#"{"credentials":[{"credentialId":"pmp","currentSalary":50000}]}"#,
        )
        .unwrap();
        assert!(matches!(batch, RoiCalculateRequest::Batch { credentials } if credentials.len() == 1));
    }
}
