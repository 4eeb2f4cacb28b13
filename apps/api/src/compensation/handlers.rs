use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::AnalyticsEvent;
use crate::compensation::offers::{
    healthcare_values, location_index, metro_by_key, pick_winner, total_compensation, JobOffer,
    TotalCompensation, Winner, BASE_PTO_DAYS, COST_OF_LIVING, DEFAULT_REFERENCE_LOCATION,
    PTO_VALUE_PER_EXTRA_DAY,
};
use crate::compensation::vesting::VestingSchedule;
use crate::errors::{AppError, CalcError};
use crate::state::AppState;

pub const YEAR_MARKS: [u32; 3] = [1, 2, 4];
pub const MIN_OFFERS: usize = 2;
pub const MAX_OFFERS: usize = 4;

const DISCLAIMER: &str = "Equity values are estimates and may differ significantly from actual \
outcomes. Stock options and RSUs carry risk. Benefits valuations are estimates based on market \
averages. This is not financial advice.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationCompareRequest {
    #[serde(default)]
    pub offers: Vec<JobOffer>,
    pub normalize_to_location: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferComparison {
    pub offer_id: String,
    pub company_name: String,
    pub location: String,
    #[serde(rename = "locationCOL")]
    pub location_col: f64,
    pub base_salary: f64,
    pub compensation: Vec<TotalCompensation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearWinners {
    pub year: u32,
    pub by_total_comp: Winner,
    #[serde(rename = "byCOLAdjusted")]
    pub by_col_adjusted: Winner,
}

#[derive(Debug, Serialize)]
pub struct OverallWinner {
    #[serde(rename = "year4Total")]
    pub year4_total: Option<String>,
    #[serde(rename = "year4COLAdjusted")]
    pub year4_col_adjusted: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationSummary {
    pub total_offers: usize,
    pub year_marks: [u32; 3],
    pub normalize_to_location: String,
    #[serde(rename = "baseCOL")]
    pub base_col: f64,
    pub overall_winner: OverallWinner,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitValuations {
    pub healthcare: BTreeMap<&'static str, f64>,
    #[serde(rename = "401kMatch")]
    pub match_401k: &'static str,
    pub pto: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationAssumptions {
    pub vesting_schedules: BTreeMap<&'static str, &'static str>,
    pub benefit_valuations: BenefitValuations,
    pub col_normalization: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationCompareResponse {
    pub comparisons: Vec<OfferComparison>,
    pub winners: Vec<YearWinners>,
    pub summary: CompensationSummary,
    pub assumptions: CompensationAssumptions,
    pub disclaimer: &'static str,
}

fn too_few_offers() -> CalcError {
    CalcError::out_of_range("offers", "must include at least 2 offers for comparison")
}

fn validate_offers(offers: &[JobOffer]) -> Result<(), CalcError> {
    if offers.len() < MIN_OFFERS {
        return Err(too_few_offers());
    }
    if offers.len() > MAX_OFFERS {
        return Err(CalcError::out_of_range(
            "offers",
            "can include at most 4 offers",
        ));
    }
    for (i, offer) in offers.iter().enumerate() {
        offer.validate().map_err(|err| match err {
            CalcError::OutOfRange { field, message } => CalcError::OutOfRange {
                field,
                message: format!("{message} (offer {})", i + 1),
            },
            other => other,
        })?;
    }
    Ok(())
}

pub fn compare(req: &CompensationCompareRequest) -> Result<CompensationCompareResponse, CalcError> {
    validate_offers(&req.offers)?;

    let reference = req
        .normalize_to_location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_REFERENCE_LOCATION);
    let reference_index = location_index(reference);

    let comparisons: Vec<OfferComparison> = req
        .offers
        .iter()
        .map(|offer| OfferComparison {
            offer_id: offer.id.clone(),
            company_name: offer.company_name.clone(),
            location: offer.location.clone(),
            location_col: offer.location_index(),
            base_salary: offer.base_salary,
            compensation: YEAR_MARKS
                .iter()
                .map(|&year| total_compensation(offer, year))
                .collect(),
        })
        .collect();

    let winners = YEAR_MARKS
        .iter()
        .enumerate()
        .map(|(mark, &year)| {
            let at_mark = || {
                req.offers
                    .iter()
                    .zip(&comparisons)
                    .map(move |(offer, c)| (offer, c.compensation[mark]))
            };
            Ok(YearWinners {
                year,
                by_total_comp: pick_winner(at_mark().map(|(o, comp)| (o, comp.total)))
                    .ok_or_else(too_few_offers)?,
                by_col_adjusted: pick_winner(at_mark().map(|(o, comp)| (o, comp.col_adjusted)))
                    .ok_or_else(too_few_offers)?,
            })
        })
        .collect::<Result<Vec<YearWinners>, CalcError>>()?;

    let year4 = winners.iter().find(|w| w.year == 4);
    let summary = CompensationSummary {
        total_offers: req.offers.len(),
        year_marks: YEAR_MARKS,
        normalize_to_location: reference.to_string(),
        base_col: reference_index,
        overall_winner: OverallWinner {
            year4_total: year4.map(|w| w.by_total_comp.company_name.clone()),
            year4_col_adjusted: year4.map(|w| w.by_col_adjusted.company_name.clone()),
        },
    };

    let reference_name = metro_by_key(reference).map_or("National Average", |m| m.name);
    let assumptions = CompensationAssumptions {
        vesting_schedules: VestingSchedule::ALL
            .into_iter()
            .map(|s| (s.key(), s.description()))
            .collect(),
        benefit_valuations: BenefitValuations {
            healthcare: healthcare_values(),
            match_401k: "Calculated as match rate × contribution up to max",
            pto: format!(
                "{}% of salary per day beyond {BASE_PTO_DAYS} days",
                PTO_VALUE_PER_EXTRA_DAY * 100.0
            ),
        },
        col_normalization: format!(
            "All values normalized to {reference_name} (index {reference_index})"
        ),
    };

    Ok(CompensationCompareResponse {
        comparisons,
        winners,
        summary,
        assumptions,
        disclaimer: DISCLAIMER,
    })
}

/// POST /api/compensation/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(req): Json<CompensationCompareRequest>,
) -> Result<Json<CompensationCompareResponse>, AppError> {
    let response = compare(&req)?;

    info!(
        offers = response.summary.total_offers,
        reference = %response.summary.normalize_to_location,
        "Compensation comparison calculated"
    );
    state
        .events
        .record(AnalyticsEvent::tool_completed("compensation-comparison"));

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct LocationOption {
    pub value: &'static str,
    pub label: String,
    pub index: f64,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationOption>,
}

pub fn location_options() -> Vec<LocationOption> {
    let mut options: Vec<LocationOption> = COST_OF_LIVING
        .iter()
        .map(|m| LocationOption {
            value: m.key,
            label: format!("{} (COL: {})", m.name, m.index),
            index: m.index,
        })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label));
    options
}

/// GET /api/compensation/locations
pub async fn handle_locations() -> Json<LocationsResponse> {
    Json(LocationsResponse {
        locations: location_options(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str, location: &str, base_salary: f64) -> JobOffer {
        JobOffer {
            id: id.to_string(),
            company_name: format!("Company {id}"),
            location: location.to_string(),
            base_salary,
            ..JobOffer::default()
        }
    }

    fn request(offers: Vec<JobOffer>) -> CompensationCompareRequest {
        CompensationCompareRequest {
            offers,
            normalize_to_location: None,
        }
    }

    #[test]
    fn test_offer_count_bounds() {
        assert!(compare(&request(vec![offer("a", "remote", 1.0)])).is_err());
        let five = (0..5).map(|i| offer(&i.to_string(), "remote", 1.0)).collect();
        assert!(compare(&request(five)).is_err());
    }

    #[test]
    fn test_invalid_offer_is_named() {
        let err = compare(&request(vec![
            offer("a", "remote", 90_000.0),
            offer("b", "remote", 0.0),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "baseSalary must be greater than zero (offer 2)");
    }

    #[test]
    fn test_expensive_city_wins_nominally_loses_adjusted() {
        let response = compare(&request(vec![
            offer("sf", "san-francisco", 150_000.0),
            offer("tx", "san-antonio", 100_000.0),
        ]))
        .unwrap();

        assert_eq!(response.winners.len(), 3);
        let year1 = &response.winners[0];
        assert_eq!(year1.by_total_comp.offer_id, "sf");
        assert_eq!(year1.by_total_comp.margin, 50_000.0);
        assert_eq!(year1.by_col_adjusted.offer_id, "tx");
        assert_eq!(response.summary.overall_winner.year4_total.as_deref(), Some("Company sf"));
        assert_eq!(response.summary.base_col, 100.0);
        assert_eq!(response.comparisons[0].location_col, 180.0);
    }

    #[test]
    fn test_reference_location_only_changes_labels() {
        let offers = vec![offer("a", "austin", 100_000.0), offer("b", "remote", 90_000.0)];
        let national = compare(&request(offers.clone())).unwrap();
        let mut req = request(offers);
        req.normalize_to_location = Some("new-york".to_string());
        let new_york = compare(&req).unwrap();

        // Good healthcare (10,000) is the default benefit: round(110,000 × 100 / 112).
        for response in [&national, &new_york] {
            assert_eq!(response.comparisons[0].compensation[0].col_adjusted, 98_214.0);
        }
        for (n, ny) in national.comparisons.iter().zip(&new_york.comparisons) {
            assert_eq!(n.compensation, ny.compensation);
        }

        assert_eq!(new_york.summary.normalize_to_location, "new-york");
        assert_eq!(new_york.summary.base_col, 170.0);
        assert!(new_york.assumptions.col_normalization.contains("New York, NY (index 170)"));
    }

    #[test]
    fn test_every_year_mark_has_winners() {
        let response = compare(&request(vec![
            offer("a", "remote", 80_000.0),
            offer("b", "remote", 80_000.0),
        ]))
        .unwrap();
        let years: Vec<u32> = response.winners.iter().map(|w| w.year).collect();
        assert_eq!(years, YEAR_MARKS);
        assert!(response.winners.iter().all(|w| w.by_total_comp.offer_id == "a"));
    }

    #[test]
    fn test_locations_sorted_by_label() {
        let options = location_options();
        assert_eq!(options.len(), COST_OF_LIVING.len());
        assert!(options.windows(2).all(|w| w[0].label <= w[1].label));
        assert_eq!(options[0].label, "Atlanta, GA (COL: 103)");
    }
}
