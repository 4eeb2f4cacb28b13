//! State income tax regimes for the 50 states and DC (2024).
//!
//! Only California and New York are modelled bracket by bracket. The other
//! graduated states are approximated at an effective rate for a single filer
//! near the median income.

use serde::Serialize;

use crate::errors::CalcError;
use crate::money::round_cents;
use crate::tax::brackets::{bracket_tax, TaxBracket};

/// How a regime computes tax. Exactly one representation is active per kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateTaxKind {
    None,
    Flat {
        rate: f64,
    },
    Graduated {
        effective_rate: f64,
        brackets: Option<&'static [TaxBracket]>,
    },
}

/// Reporting group used when results are bucketed by tax structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    None,
    Flat,
    Progressive,
}

#[derive(Debug)]
pub struct StateTaxRegime {
    pub code: &'static str,
    pub name: &'static str,
    pub kind: StateTaxKind,
    pub label: &'static str,
}

impl StateTaxRegime {
    /// State tax on `taxable_income`, rounded to the cent.
    pub fn tax(&self, taxable_income: f64) -> f64 {
        let income = taxable_income.max(0.0);
        match self.kind {
            StateTaxKind::None => 0.0,
            StateTaxKind::Flat { rate } => round_cents(income * rate),
            StateTaxKind::Graduated {
                brackets: Some(brackets),
                ..
            } => bracket_tax(income, brackets),
            StateTaxKind::Graduated {
                effective_rate,
                brackets: None,
            } => round_cents(income * effective_rate),
        }
    }

    pub fn tax_type(&self) -> TaxType {
        match self.kind {
            StateTaxKind::None => TaxType::None,
            StateTaxKind::Flat { .. } => TaxType::Flat,
            StateTaxKind::Graduated { .. } => TaxType::Progressive,
        }
    }

    /// Headline rate shown next to the state name.
    pub fn headline_rate(&self) -> f64 {
        match self.kind {
            StateTaxKind::None => 0.0,
            StateTaxKind::Flat { rate } => rate,
            StateTaxKind::Graduated { effective_rate, .. } => effective_rate,
        }
    }

    /// `"Texas (No Income Tax)"` for untaxed states, the bare name otherwise.
    pub fn display_label(&self) -> String {
        match self.kind {
            StateTaxKind::None => format!("{} (No Income Tax)", self.name),
            _ => self.name.to_string(),
        }
    }
}

static CALIFORNIA_BRACKETS: [TaxBracket; 9] = [
    TaxBracket::new(0.0, 10_412.0, 0.01),
    TaxBracket::new(10_412.0, 24_684.0, 0.02),
    TaxBracket::new(24_684.0, 38_959.0, 0.04),
    TaxBracket::new(38_959.0, 54_081.0, 0.06),
    TaxBracket::new(54_081.0, 68_350.0, 0.08),
    TaxBracket::new(68_350.0, 349_137.0, 0.093),
    TaxBracket::new(349_137.0, 418_961.0, 0.103),
    TaxBracket::new(418_961.0, 698_271.0, 0.113),
    TaxBracket::open(698_271.0, 0.123),
];

static NEW_YORK_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(0.0, 8_500.0, 0.04),
    TaxBracket::new(8_500.0, 11_700.0, 0.045),
    TaxBracket::new(11_700.0, 13_900.0, 0.0525),
    TaxBracket::new(13_900.0, 80_650.0, 0.055),
    TaxBracket::new(80_650.0, 215_400.0, 0.06),
    TaxBracket::new(215_400.0, 1_077_550.0, 0.0685),
    TaxBracket::open(1_077_550.0, 0.109),
];

const fn none(code: &'static str, name: &'static str, label: &'static str) -> StateTaxRegime {
    StateTaxRegime {
        code,
        name,
        kind: StateTaxKind::None,
        label,
    }
}

const fn flat(code: &'static str, name: &'static str, rate: f64, label: &'static str) -> StateTaxRegime {
    StateTaxRegime {
        code,
        name,
        kind: StateTaxKind::Flat { rate },
        label,
    }
}

const fn graduated(
    code: &'static str,
    name: &'static str,
    effective_rate: f64,
    label: &'static str,
) -> StateTaxRegime {
    StateTaxRegime {
        code,
        name,
        kind: StateTaxKind::Graduated {
            effective_rate,
            brackets: None,
        },
        label,
    }
}

pub static STATE_TAX_REGIMES: [StateTaxRegime; 51] = [
    graduated("AL", "Alabama", 0.05, "2-5% graduated"),
    none("AK", "Alaska", "No state income tax"),
    flat("AZ", "Arizona", 0.025, "2.5% flat rate"),
    graduated("AR", "Arkansas", 0.044, "2-4.4% graduated"),
    StateTaxRegime {
        code: "CA",
        name: "California",
        kind: StateTaxKind::Graduated {
            effective_rate: 0.093,
            brackets: Some(&CALIFORNIA_BRACKETS),
        },
        label: "1-12.3% graduated",
    },
    flat("CO", "Colorado", 0.044, "4.4% flat rate"),
    graduated("CT", "Connecticut", 0.055, "3-6.99% graduated"),
    graduated("DE", "Delaware", 0.066, "2.2-6.6% graduated"),
    none("FL", "Florida", "No state income tax"),
    flat("GA", "Georgia", 0.055, "5.49% flat rate (transitioning)"),
    graduated("HI", "Hawaii", 0.0825, "1.4-11% graduated"),
    flat("ID", "Idaho", 0.058, "5.8% flat rate"),
    flat("IL", "Illinois", 0.0495, "4.95% flat rate"),
    flat("IN", "Indiana", 0.0305, "3.05% flat rate"),
    graduated("IA", "Iowa", 0.057, "4.4-5.7% graduated"),
    graduated("KS", "Kansas", 0.057, "3.1-5.7% graduated"),
    flat("KY", "Kentucky", 0.04, "4% flat rate"),
    graduated("LA", "Louisiana", 0.0425, "1.85-4.25% graduated"),
    graduated("ME", "Maine", 0.0715, "5.8-7.15% graduated"),
    graduated("MD", "Maryland", 0.05, "2-5.75% graduated + local"),
    flat("MA", "Massachusetts", 0.05, "5% flat rate (9% on >$1M)"),
    flat("MI", "Michigan", 0.0425, "4.25% flat rate"),
    graduated("MN", "Minnesota", 0.0785, "5.35-9.85% graduated"),
    flat("MS", "Mississippi", 0.05, "5% flat rate"),
    graduated("MO", "Missouri", 0.048, "2-4.8% graduated"),
    graduated("MT", "Montana", 0.059, "4.7-5.9% graduated"),
    graduated("NE", "Nebraska", 0.0584, "2.46-5.84% graduated"),
    none("NV", "Nevada", "No state income tax"),
    none("NH", "New Hampshire", "No income tax (interest/dividends phasing out)"),
    graduated("NJ", "New Jersey", 0.0637, "1.4-10.75% graduated"),
    graduated("NM", "New Mexico", 0.049, "1.7-5.9% graduated"),
    StateTaxRegime {
        code: "NY",
        name: "New York",
        kind: StateTaxKind::Graduated {
            effective_rate: 0.0685,
            brackets: Some(&NEW_YORK_BRACKETS),
        },
        label: "+ NYC tax if applicable",
    },
    flat("NC", "North Carolina", 0.0475, "4.75% flat rate"),
    graduated("ND", "North Dakota", 0.0195, "1.1-2.5% graduated"),
    graduated("OH", "Ohio", 0.035, "0-3.5% graduated"),
    graduated("OK", "Oklahoma", 0.0475, "0.25-4.75% graduated"),
    graduated("OR", "Oregon", 0.09, "4.75-9.9% graduated"),
    flat("PA", "Pennsylvania", 0.0307, "3.07% flat rate"),
    graduated("RI", "Rhode Island", 0.0475, "3.75-5.99% graduated"),
    graduated("SC", "South Carolina", 0.065, "3-6.4% graduated"),
    none("SD", "South Dakota", "No state income tax"),
    none("TN", "Tennessee", "No state income tax"),
    none("TX", "Texas", "No state income tax"),
    flat("UT", "Utah", 0.0465, "4.65% flat rate"),
    graduated("VT", "Vermont", 0.0675, "3.35-8.75% graduated"),
    graduated("VA", "Virginia", 0.0575, "2-5.75% graduated"),
    none("WA", "Washington", "No state income tax (7% on cap gains >$250k)"),
    graduated("WV", "West Virginia", 0.052, "2.36-5.12% graduated"),
    graduated("WI", "Wisconsin", 0.053, "3.5-7.65% graduated"),
    none("WY", "Wyoming", "No state income tax"),
    graduated("DC", "District of Columbia", 0.085, "4-10.75% graduated"),
];

/// Looks up a regime by its two-letter code, case-insensitively.
pub fn state_regime(code: &str) -> Result<&'static StateTaxRegime, CalcError> {
    let code = code.trim();
    STATE_TAX_REGIMES
        .iter()
        .find(|regime| regime.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| CalcError::UnknownState(code.to_string()))
}

/// State tax for a state code. Unknown codes are an error, never zero.
pub fn state_tax(taxable_income: f64, code: &str) -> Result<f64, CalcError> {
    Ok(state_regime(code)?.tax(taxable_income))
}
