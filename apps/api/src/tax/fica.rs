use serde::Serialize;

use crate::money::round_cents;

pub const SOCIAL_SECURITY_RATE: f64 = 0.062;
pub const SOCIAL_SECURITY_WAGE_BASE: f64 = 168_600.0;
pub const MEDICARE_RATE: f64 = 0.0145;
pub const ADDITIONAL_MEDICARE_RATE: f64 = 0.009;
pub const ADDITIONAL_MEDICARE_THRESHOLD: f64 = 200_000.0;

/// Payroll tax on gross wages. Each component is rounded to the cent;
/// `total` is the rounded sum of the unrounded components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FicaBreakdown {
    pub social_security: f64,
    pub medicare: f64,
    pub total: f64,
}

pub fn fica(gross_wages: f64) -> FicaBreakdown {
    let gross = gross_wages.max(0.0);

    let social_security = gross.min(SOCIAL_SECURITY_WAGE_BASE) * SOCIAL_SECURITY_RATE;

    let mut medicare = gross * MEDICARE_RATE;
    if gross > ADDITIONAL_MEDICARE_THRESHOLD {
        medicare += (gross - ADDITIONAL_MEDICARE_THRESHOLD) * ADDITIONAL_MEDICARE_RATE;
    }

    FicaBreakdown {
        social_security: round_cents(social_security),
        medicare: round_cents(medicare),
        total: round_cents(social_security + medicare),
    }
}
