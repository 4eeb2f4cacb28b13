//! Multi-year total-compensation valuation of job offers.
//!
//! Cash, vested equity and benefits are summed per offer, then scaled by cost
//! of living against the national average.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compensation::vesting::VestingSchedule;
use crate::errors::{non_negative, positive, within, CalcError};

// ────────────────────────────────────────────────────────────────────────────
// Cost of living
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Metro {
    pub key: &'static str,
    pub name: &'static str,
    pub index: f64,
}

const fn metro(key: &'static str, name: &'static str, index: f64) -> Metro {
    Metro { key, name, index }
}

/// Regional price index, 100 = national average.
pub static COST_OF_LIVING: [Metro; 29] = [
    metro("san-francisco", "San Francisco, CA", 180.0),
    metro("new-york", "New York, NY", 170.0),
    metro("san-jose", "San Jose, CA", 165.0),
    metro("los-angeles", "Los Angeles, CA", 145.0),
    metro("boston", "Boston, MA", 140.0),
    metro("seattle", "Seattle, WA", 135.0),
    metro("washington-dc", "Washington, DC", 130.0),
    metro("san-diego", "San Diego, CA", 125.0),
    metro("denver", "Denver, CO", 115.0),
    metro("portland", "Portland, OR", 115.0),
    metro("austin", "Austin, TX", 112.0),
    metro("chicago", "Chicago, IL", 110.0),
    metro("miami", "Miami, FL", 108.0),
    metro("philadelphia", "Philadelphia, PA", 105.0),
    metro("atlanta", "Atlanta, GA", 103.0),
    metro("dallas", "Dallas, TX", 100.0),
    metro("phoenix", "Phoenix, AZ", 100.0),
    metro("minneapolis", "Minneapolis, MN", 98.0),
    metro("houston", "Houston, TX", 97.0),
    metro("charlotte", "Charlotte, NC", 96.0),
    metro("tampa", "Tampa, FL", 95.0),
    metro("raleigh", "Raleigh, NC", 94.0),
    metro("nashville", "Nashville, TN", 93.0),
    metro("salt-lake-city", "Salt Lake City, UT", 92.0),
    metro("columbus", "Columbus, OH", 90.0),
    metro("kansas-city", "Kansas City, MO", 88.0),
    metro("indianapolis", "Indianapolis, IN", 87.0),
    metro("san-antonio", "San Antonio, TX", 85.0),
    metro("remote", "Remote (National Average)", 100.0),
];

pub const DEFAULT_REFERENCE_LOCATION: &str = "remote";
pub const NATIONAL_AVERAGE_INDEX: f64 = 100.0;

pub fn metro_by_key(key: &str) -> Option<&'static Metro> {
    COST_OF_LIVING.iter().find(|m| m.key == key)
}

/// Unknown locations count as the national average.
pub fn location_index(key: &str) -> f64 {
    metro_by_key(key).map_or(NATIONAL_AVERAGE_INDEX, |m| m.index)
}

// ────────────────────────────────────────────────────────────────────────────
// Benefits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthcareTier {
    Excellent,
    #[default]
    Good,
    Basic,
    None,
}

impl HealthcareTier {
    /// Annual employer-paid value.
    pub fn annual_value(self) -> f64 {
        match self {
            HealthcareTier::Excellent => 15_000.0,
            HealthcareTier::Good => 10_000.0,
            HealthcareTier::Basic => 5_000.0,
            HealthcareTier::None => 0.0,
        }
    }
}

pub const BASE_PTO_DAYS: u32 = 10;
/// Share of base salary one extra PTO day is worth.
pub const PTO_VALUE_PER_EXTRA_DAY: f64 = 0.004;
pub const MAX_PTO_DAYS: u32 = 365;

pub static OTHER_BENEFITS: [(&str, f64); 5] = [
    ("tuitionReimbursement", 5_250.0),
    ("commuter", 3_000.0),
    ("wellness", 500.0),
    ("phone", 600.0),
    ("internet", 600.0),
];

/// Annual value of a named perk; unrecognised names are worth nothing.
pub fn other_benefit_value(name: &str) -> f64 {
    OTHER_BENEFITS
        .iter()
        .find(|(key, _)| *key == name)
        .map_or(0.0, |(_, value)| *value)
}

/// Employer match on contributions up to `max_match_up_to` percent of salary.
pub fn match_401k_value(base_salary: f64, match_percent: f64, max_match_up_to: f64) -> f64 {
    (base_salary * max_match_up_to / 100.0 * match_percent / 100.0).round()
}

// ────────────────────────────────────────────────────────────────────────────
// Offers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquityType {
    Options,
    Rsus,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobOffer {
    pub id: String,
    pub company_name: String,
    pub location: String,
    pub base_salary: f64,
    pub signing_bonus: f64,
    /// Target annual bonus, percent of base.
    pub annual_bonus_target: f64,
    pub equity_type: EquityType,
    /// Total grant value.
    pub equity_value: f64,
    pub vesting_schedule: VestingSchedule,
    #[serde(rename = "has401kMatch")]
    pub has_401k_match: bool,
    pub match_percent: f64,
    pub max_match_up_to: f64,
    pub healthcare_quality: HealthcareTier,
    pub pto_days: u32,
    pub has_other_benefits: Vec<String>,
}

impl JobOffer {
    pub fn validate(&self) -> Result<(), CalcError> {
        positive("baseSalary", self.base_salary)?;
        non_negative("signingBonus", self.signing_bonus)?;
        non_negative("equityValue", self.equity_value)?;
        within("annualBonusTarget", self.annual_bonus_target, 0.0, 100.0)?;
        within("matchPercent", self.match_percent, 0.0, 100.0)?;
        within("maxMatchUpTo", self.max_match_up_to, 0.0, 100.0)?;
        if self.pto_days > MAX_PTO_DAYS {
            return Err(CalcError::out_of_range(
                "ptoDays",
                format!("must be at most {MAX_PTO_DAYS}"),
            ));
        }
        Ok(())
    }

    pub fn location_index(&self) -> f64 {
        location_index(&self.location)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationBreakdown {
    pub base_salary: f64,
    pub signing_bonus: f64,
    pub annual_bonus: f64,
    pub vested_equity: f64,
    #[serde(rename = "match401k")]
    pub match_401k: f64,
    pub healthcare_value: f64,
    pub pto_value: f64,
    pub other_benefits: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCompensation {
    pub year: u32,
    pub cash: f64,
    pub equity: f64,
    pub benefits: f64,
    pub total: f64,
    pub col_adjusted: f64,
    pub breakdown: CompensationBreakdown,
}

/// Cumulative value of an offer over `years`. The signing bonus is paid once.
///
/// `col_adjusted` is always expressed in national-average dollars, whatever
/// location the caller displays as its reference: the per-year total is
/// scaled by `100 / offer index`.
pub fn total_compensation(offer: &JobOffer, years: u32) -> TotalCompensation {
    let y = f64::from(years);

    let base_salary = offer.base_salary * y;
    let annual_bonus = offer.base_salary * offer.annual_bonus_target / 100.0 * y;
    let cash = base_salary + offer.signing_bonus + annual_bonus;

    let equity = offer.vesting_schedule.vested_value(offer.equity_value, years);

    let match_401k = if offer.has_401k_match {
        match_401k_value(offer.base_salary, offer.match_percent, offer.max_match_up_to) * y
    } else {
        0.0
    };
    let healthcare_value = offer.healthcare_quality.annual_value() * y;
    let extra_pto = f64::from(offer.pto_days.saturating_sub(BASE_PTO_DAYS));
    let pto_value = (offer.base_salary * PTO_VALUE_PER_EXTRA_DAY * extra_pto * y).round();
    let other_benefits = offer
        .has_other_benefits
        .iter()
        .map(|name| other_benefit_value(name))
        .sum::<f64>()
        * y;
    let benefits = match_401k + healthcare_value + pto_value + other_benefits;

    let total = cash + equity + benefits;
    let col_adjusted = if years == 0 {
        0.0
    } else {
        (total / y * NATIONAL_AVERAGE_INDEX / offer.location_index()).round() * y
    };

    TotalCompensation {
        year: years,
        cash,
        equity,
        benefits,
        total,
        col_adjusted,
        breakdown: CompensationBreakdown {
            base_salary,
            signing_bonus: offer.signing_bonus,
            annual_bonus,
            vested_equity: equity,
            match_401k,
            healthcare_value,
            pto_value,
            other_benefits,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Winners
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub company_name: String,
    pub offer_id: String,
    pub value: f64,
    /// Lead over the runner-up; 0 when there is only one entry.
    pub margin: f64,
}

/// Highest-valued entry by `value`. Ties go to the earlier offer.
pub fn pick_winner<'a, I>(entries: I) -> Option<Winner>
where
    I: IntoIterator<Item = (&'a JobOffer, f64)>,
{
    let mut ranked: Vec<(&JobOffer, f64)> = entries.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (offer, value) = *ranked.first()?;
    let margin = ranked.get(1).map_or(0.0, |(_, second)| value - second);
    Some(Winner {
        company_name: offer.company_name.clone(),
        offer_id: offer.id.clone(),
        value,
        margin,
    })
}

/// Healthcare values keyed by tier, for the assumptions block.
pub fn healthcare_values() -> BTreeMap<&'static str, f64> {
    [
        ("excellent", HealthcareTier::Excellent),
        ("good", HealthcareTier::Good),
        ("basic", HealthcareTier::Basic),
        ("none", HealthcareTier::None),
    ]
    .into_iter()
    .map(|(key, tier)| (key, tier.annual_value()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn austin_offer() -> JobOffer {
        JobOffer {
            id: "a".to_string(),
            company_name: "Acme".to_string(),
            location: "austin".to_string(),
            base_salary: 100_000.0,
            signing_bonus: 10_000.0,
            annual_bonus_target: 10.0,
            equity_type: EquityType::Rsus,
            equity_value: 40_000.0,
            vesting_schedule: VestingSchedule::FourYearOneYearCliff,
            has_401k_match: true,
            match_percent: 50.0,
            max_match_up_to: 6.0,
            healthcare_quality: HealthcareTier::Good,
            pto_days: 20,
            has_other_benefits: vec!["wellness".to_string(), "yacht".to_string()],
        }
    }

    #[test]
    fn test_year_one_total() {
        let comp = total_compensation(&austin_offer(), 1);
        assert_eq!(comp.cash, 120_000.0);
        assert_eq!(comp.equity, 10_000.0);
        assert_eq!(comp.breakdown.match_401k, 3_000.0);
        assert_eq!(comp.breakdown.pto_value, 4_000.0);
        assert_eq!(comp.breakdown.other_benefits, 500.0);
        assert_eq!(comp.benefits, 17_500.0);
        assert_eq!(comp.total, 147_500.0);
    }

    #[test]
    fn test_signing_bonus_counted_once() {
        let comp = total_compensation(&austin_offer(), 4);
        assert_eq!(comp.cash, 450_000.0);
        assert_eq!(comp.equity, 40_000.0);
        assert_eq!(comp.total, 560_000.0);
    }

    #[test]
    fn test_col_adjustment_divides_by_offer_index() {
        let offer = austin_offer();
        // round(147,500 × 100 / 112)
        assert_eq!(total_compensation(&offer, 1).col_adjusted, 131_696.0);
        // Per-year figure is rounded before scaling back up.
        assert_eq!(total_compensation(&offer, 2).col_adjusted, 254_464.0);
        assert_eq!(total_compensation(&offer, 4).col_adjusted, 500_000.0);

        // A cheaper-than-average city counts for more.
        let mut cheap = offer.clone();
        cheap.location = "san-antonio".to_string();
        assert!(total_compensation(&cheap, 1).col_adjusted > 147_500.0);
    }

    #[test]
    fn test_unknown_location_is_national_average() {
        assert_eq!(location_index("atlantis"), 100.0);
        assert_eq!(location_index("new-york"), 170.0);
    }

    #[test]
    fn test_no_match_when_plan_absent() {
        let mut offer = austin_offer();
        offer.has_401k_match = false;
        let comp = total_compensation(&offer, 1);
        assert_eq!(comp.breakdown.match_401k, 0.0);
    }

    #[test]
    fn test_validation() {
        let mut offer = austin_offer();
        assert!(offer.validate().is_ok());
        offer.base_salary = 0.0;
        assert!(offer.validate().is_err());

        let mut offer = austin_offer();
        offer.match_percent = 150.0;
        assert!(offer.validate().is_err());

        let mut offer = austin_offer();
        offer.pto_days = 400;
        assert!(offer.validate().is_err());
    }

    #[test]
    fn test_winner_margin_and_ties() {
        let a = austin_offer();
        let mut b = austin_offer();
        b.id = "b".to_string();
        b.company_name = "Bolt".to_string();

        let winner = pick_winner([(&a, 100.0), (&b, 130.0)]).unwrap();
        assert_eq!(winner.company_name, "Bolt");
        assert_eq!(winner.margin, 30.0);

        let tie = pick_winner([(&a, 100.0), (&b, 100.0)]).unwrap();
        assert_eq!(tie.offer_id, "a");
        assert_eq!(tie.margin, 0.0);

        assert!(pick_winner(std::iter::empty::<(&JobOffer, f64)>()).is_none());
    }

    #[test]
    fn test_offer_defaults_from_json() {
        let offer: JobOffer =
            serde_json::from_str(r#"{"companyName":"Acme","baseSalary":90000}"#).unwrap();
        assert_eq!(offer.vesting_schedule, VestingSchedule::FourYearOneYearCliff);
        assert_eq!(offer.healthcare_quality, HealthcareTier::Good);
        assert!(offer.has_other_benefits.is_empty());
    }
}
