use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::analytics::AnalyticsEvent;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tax::comparison::{calculate, TaxCalculationRequest, TaxCalculationResponse};
use crate::tax::states::{TaxType, STATE_TAX_REGIMES};

/// POST /api/tax/calculate
pub async fn handle_calculate(
    State(state): State<AppState>,
    Json(req): Json<TaxCalculationRequest>,
) -> Result<Json<TaxCalculationResponse>, AppError> {
    let response = calculate(&req)?;

    info!(
        filing_status = ?req.filing_status,
        military = req.military.is_some(),
        scenarios = response.civilian.len(),
        "Tax comparison calculated"
    );
    state
        .events
        .record(AnalyticsEvent::tool_completed("tax-calculator"));

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub code: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub tax_type: TaxType,
    pub rate: f64,
    pub label: &'static str,
    pub display_label: String,
}

#[derive(Debug, Serialize)]
pub struct StatesResponse {
    pub states: Vec<StateSummary>,
}

/// GET /api/tax/states
pub async fn handle_states() -> Json<StatesResponse> {
    Json(StatesResponse {
        states: state_summaries(),
    })
}

pub fn state_summaries() -> Vec<StateSummary> {
    let mut states: Vec<StateSummary> = STATE_TAX_REGIMES
        .iter()
        .map(|regime| StateSummary {
            code: regime.code,
            name: regime.name,
            tax_type: regime.tax_type(),
            rate: regime.headline_rate(),
            label: regime.label,
            display_label: regime.display_label(),
        })
        .collect();
    states.sort_by(|a, b| a.display_label.cmp(&b.display_label));
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_summaries_sorted_by_label() {
        let states = state_summaries();
        assert_eq!(states.len(), 51);
        assert_eq!(states[0].name, "Alabama");
        assert!(states
            .windows(2)
            .all(|pair| pair[0].display_label <= pair[1].display_label));
    }

    #[test]
    fn test_untaxed_states_are_labelled() {
        let texas = state_summaries()
            .into_iter()
            .find(|s| s.code == "TX")
            .unwrap();
        assert_eq!(texas.tax_type, TaxType::None);
        assert_eq!(texas.display_label, "Texas (No Income Tax)");
        assert_eq!(texas.rate, 0.0);
    }
}
