//! Return on investment for a credential: discounted value of the expected
//! raise, months to recoup the cost, and the Post-9/11 GI Bill offset.

use serde::Serialize;

use crate::credentials::catalog::{Credential, ExperienceLevel};
use crate::money::round_dollars;

/// Post-9/11 GI Bill (Chapter 33) rates used for the benefit estimate.
pub struct GiBillRates {
    pub max_months: u32,
    /// Private-school tuition cap per academic year. Public schools are
    /// covered in full.
    pub private_tuition_cap: f64,
    /// National-average monthly housing allowance.
    pub monthly_housing: f64,
    /// Book stipend per academic year.
    pub book_stipend: f64,
    pub months_per_academic_year: f64,
}

pub const GI_BILL: GiBillRates = GiBillRates {
    max_months: 36,
    private_tuition_cap: 28_937.94,
    monthly_housing: 1_800.0,
    book_stipend: 1_000.0,
    months_per_academic_year: 9.0,
};

pub const DISCOUNT_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GiBillBenefit {
    pub tuition_covered: f64,
    pub housing_allowance: f64,
    pub book_stipend: f64,
    pub total_benefit: f64,
    pub out_of_pocket: f64,
    pub months_used: u32,
    pub months_remaining: u32,
}

/// Benefit for completing `credential` at its average cost and duration.
pub fn gi_bill_benefit(credential: &Credential, private_school: bool) -> GiBillBenefit {
    let cost = credential.average_cost();
    let months = credential.average_months();
    let academic_years = months / GI_BILL.months_per_academic_year;

    let tuition_covered = if private_school {
        cost.min(GI_BILL.private_tuition_cap * academic_years)
    } else {
        cost
    };
    let housing_allowance = GI_BILL.monthly_housing * months.min(f64::from(GI_BILL.max_months));
    let book_stipend = GI_BILL.book_stipend * academic_years;

    let whole_months = months.round() as u32;
    GiBillBenefit {
        tuition_covered,
        housing_allowance,
        book_stipend,
        total_benefit: tuition_covered + housing_allowance + book_stipend,
        out_of_pocket: (cost - tuition_covered).max(0.0),
        months_used: whole_months.min(GI_BILL.max_months),
        months_remaining: GI_BILL.max_months.saturating_sub(whole_months),
    }
}

/// Net present value of paying `investment` now for `annual_increase` a
/// year over `years`, discounted at `rate`.
pub fn npv(investment: f64, annual_increase: f64, years: u32, rate: f64) -> f64 {
    (1..=years).fold(-investment, |acc, year| {
        acc + annual_increase / (1.0 + rate).powi(year as i32)
    })
}

/// Months from enrolment until the raise has repaid the investment. Earning
/// starts once the credential is complete. `None` when the raise never
/// repays it.
pub fn break_even_months(
    investment: f64,
    monthly_increase: f64,
    months_to_complete: f64,
) -> Option<f64> {
    if monthly_increase <= 0.0 {
        return None;
    }
    Some(months_to_complete + (investment / monthly_increase).ceil())
}

pub fn format_break_even(months: Option<f64>) -> String {
    let Some(months) = months else {
        return "Never".to_string();
    };
    let months = months.round() as u64;
    if months < 12 {
        return format!("{months} months");
    }
    match (months / 12, months % 12) {
        (years, 0) => format!("{years} years"),
        (years, rest) => format!("{years} years, {rest} months"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeReturn {
    pub year: u32,
    /// Earnings gained so far less the investment.
    pub cumulative: f64,
    /// Earnings gained so far.
    pub net_return: f64,
}

/// Year-by-year running total of the raise less the investment.
pub fn cumulative_returns(
    investment: f64,
    annual_increase: f64,
    months_to_complete: f64,
    years: u32,
) -> Vec<CumulativeReturn> {
    let monthly = annual_increase / 12.0;
    (1..=years)
        .map(|year| {
            let earning_months = (f64::from(year) * 12.0 - months_to_complete).max(0.0);
            let earned = earning_months * monthly;
            CumulativeReturn {
                year,
                cumulative: round_dollars(earned - investment),
                net_return: round_dollars(earned),
            }
        })
        .collect()
}

/// Simple undiscounted ROI percentage. Zero when nothing was invested.
pub fn roi_percent(investment: f64, annual_increase: f64, years: u32) -> f64 {
    if investment <= 0.0 {
        return 0.0;
    }
    round_dollars((annual_increase * f64::from(years) - investment) / investment * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryGain {
    pub annual: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiAnalysis {
    pub total_investment: f64,
    pub out_of_pocket: f64,
    pub gi_bill_benefit: f64,
    pub expected_salary_increase: SalaryGain,
    pub break_even_months: Option<f64>,
    pub break_even_formatted: String,
    #[serde(rename = "npv5Year")]
    pub npv_5_year: f64,
    #[serde(rename = "npv10Year")]
    pub npv_10_year: f64,
    pub cumulative_returns: Vec<CumulativeReturn>,
    #[serde(rename = "roi5Year")]
    pub roi_5_year: f64,
    #[serde(rename = "roi10Year")]
    pub roi_10_year: f64,
}

/// Full analysis for one credential. With the GI Bill the investment is
/// only the tuition it leaves uncovered.
pub fn analyze(
    credential: &Credential,
    level: ExperienceLevel,
    gi_bill: Option<&GiBillBenefit>,
    years_to_analyze: u32,
) -> RoiAnalysis {
    let cost = credential.average_cost();
    let months = credential.average_months();
    let annual = credential.average_annual_increase(level);
    let monthly = annual / 12.0;

    let investment = gi_bill.map_or(cost, |b| b.out_of_pocket);
    let break_even = break_even_months(investment, monthly, months);

    RoiAnalysis {
        total_investment: round_dollars(investment),
        out_of_pocket: round_dollars(investment),
        gi_bill_benefit: round_dollars(gi_bill.map_or(0.0, |b| b.total_benefit)),
        expected_salary_increase: SalaryGain {
            annual: round_dollars(annual),
            monthly: round_dollars(monthly),
        },
        break_even_months: break_even.map(round_dollars),
        break_even_formatted: format_break_even(break_even),
        npv_5_year: round_dollars(npv(investment, annual, 5, DISCOUNT_RATE)),
        npv_10_year: round_dollars(npv(investment, annual, 10, DISCOUNT_RATE)),
        cumulative_returns: cumulative_returns(investment, annual, months, years_to_analyze),
        roi_5_year: roi_percent(investment, annual, 5),
        roi_10_year: roi_percent(investment, annual, 10),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::catalog::find_credential;
    use proptest::prelude::*;

    #[test]
    fn test_pmp_without_gi_bill() {
        let pmp = find_credential("pmp").unwrap();
        let analysis = analyze(pmp, ExperienceLevel::Entry, None, 10);

        assert_eq!(analysis.total_investment, 3_000.0);
        assert_eq!(analysis.expected_salary_increase.annual, 11_500.0);
        assert_eq!(analysis.expected_salary_increase.monthly, 958.0);
        assert_eq!(analysis.break_even_months, Some(8.0));
        assert_eq!(analysis.break_even_formatted, "8 months");
        assert_eq!(analysis.npv_5_year, 46_789.0);
        assert_eq!(analysis.npv_10_year, 85_800.0);
        assert_eq!(analysis.roi_5_year, 1_817.0);
        assert_eq!(analysis.roi_10_year, 3_733.0);
        assert_eq!(analysis.cumulative_returns.len(), 10);
    }

    #[test]
    fn test_earning_starts_after_completion() {
        let returns = cumulative_returns(3_000.0, 11_500.0, 4.0, 2);
        assert_eq!(returns[0].cumulative, 4_667.0);
        assert_eq!(returns[0].net_return, 7_667.0);
        assert_eq!(returns[1].cumulative, 16_167.0);

        // Nothing is earned while still enrolled.
        let returns = cumulative_returns(10_000.0, 12_000.0, 30.0, 3);
        assert_eq!(returns[0].cumulative, -10_000.0);
        assert_eq!(returns[1].cumulative, -10_000.0);
        assert_eq!(returns[2].cumulative, -4_000.0);
    }

    #[test]
    fn test_public_school_gi_bill_covers_tuition() {
        let degree = find_credential("bachelors-cs").unwrap();
        let benefit = gi_bill_benefit(degree, false);
        assert_eq!(benefit.tuition_covered, 100_000.0);
        assert_eq!(benefit.out_of_pocket, 0.0);
        // 42 months of housing capped at 36.
        assert_eq!(benefit.housing_allowance, 64_800.0);
        assert_eq!(benefit.months_used, 36);
        assert_eq!(benefit.months_remaining, 0);

        let analysis = analyze(degree, ExperienceLevel::Entry, Some(&benefit), 10);
        assert_eq!(analysis.total_investment, 0.0);
        assert_eq!(analysis.roi_10_year, 0.0);
        assert_eq!(analysis.break_even_formatted, "3 years, 6 months");
    }

    #[test]
    fn test_private_school_tuition_cap() {
        let mba = find_credential("masters-mba").unwrap();
        let benefit = gi_bill_benefit(mba, true);
        // 21 months is 2⅓ academic years.
        assert!((benefit.tuition_covered - 67_521.86).abs() < 0.01);
        assert!((benefit.out_of_pocket - 57_478.14).abs() < 0.01);
        assert_eq!(benefit.housing_allowance, 37_800.0);
        assert_eq!(benefit.months_used, 21);
        assert_eq!(benefit.months_remaining, 15);

        let analysis = analyze(mba, ExperienceLevel::Entry, Some(&benefit), 10);
        assert_eq!(analysis.break_even_months, Some(39.0));
    }

    #[test]
    fn test_no_raise_never_breaks_even() {
        assert_eq!(break_even_months(5_000.0, 0.0, 6.0), None);
        assert_eq!(format_break_even(None), "Never");
        assert_eq!(format_break_even(Some(24.0)), "2 years");
        assert_eq!(format_break_even(Some(30.0)), "2 years, 6 months");
    }

    #[test]
    fn test_npv_without_years_is_the_investment() {
        assert_eq!(npv(1_000.0, 500.0, 0, DISCOUNT_RATE), -1_000.0);
    }

    proptest! {
        #[test]
        fn test_npv_grows_with_horizon(
            investment in 0.0f64..100_000.0,
            raise in 1.0f64..100_000.0,
            years in 1u32..40,
        ) {
            let shorter = npv(investment, raise, years, DISCOUNT_RATE);
            let longer = npv(investment, raise, years + 1, DISCOUNT_RATE);
            prop_assert!(longer > shorter);
        }

        #[test]
        fn test_cumulative_returns_never_decrease(
            investment in 0.0f64..50_000.0,
            raise in 0.0f64..80_000.0,
            months in 0.0f64..60.0,
        ) {
            let returns = cumulative_returns(investment, raise, months, 15);
            for pair in returns.windows(2) {
                prop_assert!(pair[1].cumulative >= pair[0].cumulative);
            }
        }
    }
}
