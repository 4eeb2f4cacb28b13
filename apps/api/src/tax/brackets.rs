//! Progressive bracket evaluation and the 2024 federal schedules.

use serde::{Deserialize, Serialize};

use crate::money::round_cents;

/// One band of a progressive schedule: income in `[lower, upper)` is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBracket {
    pub lower: f64,
    pub upper: f64,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(lower: f64, upper: f64, rate: f64) -> Self {
        Self { lower, upper, rate }
    }

    /// Top band with no upper bound.
    pub const fn open(lower: f64, rate: f64) -> Self {
        Self {
            lower,
            upper: f64::INFINITY,
            rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    #[default]
    Single,
    Married,
}

pub static FEDERAL_SINGLE_2024: [TaxBracket; 7] = [
    TaxBracket::new(0.0, 11_600.0, 0.10),
    TaxBracket::new(11_600.0, 47_150.0, 0.12),
    TaxBracket::new(47_150.0, 100_525.0, 0.22),
    TaxBracket::new(100_525.0, 191_950.0, 0.24),
    TaxBracket::new(191_950.0, 243_725.0, 0.32),
    TaxBracket::new(243_725.0, 609_350.0, 0.35),
    TaxBracket::open(609_350.0, 0.37),
];

pub static FEDERAL_MARRIED_2024: [TaxBracket; 7] = [
    TaxBracket::new(0.0, 23_200.0, 0.10),
    TaxBracket::new(23_200.0, 94_300.0, 0.12),
    TaxBracket::new(94_300.0, 201_050.0, 0.22),
    TaxBracket::new(201_050.0, 383_900.0, 0.24),
    TaxBracket::new(383_900.0, 487_450.0, 0.32),
    TaxBracket::new(487_450.0, 731_200.0, 0.35),
    TaxBracket::open(731_200.0, 0.37),
];

pub const STANDARD_DEDUCTION_SINGLE: f64 = 14_600.0;
pub const STANDARD_DEDUCTION_MARRIED: f64 = 29_200.0;

impl FilingStatus {
    pub fn federal_brackets(self) -> &'static [TaxBracket] {
        match self {
            FilingStatus::Single => &FEDERAL_SINGLE_2024,
            FilingStatus::Married => &FEDERAL_MARRIED_2024,
        }
    }

    pub fn standard_deduction(self) -> f64 {
        match self {
            FilingStatus::Single => STANDARD_DEDUCTION_SINGLE,
            FilingStatus::Married => STANDARD_DEDUCTION_MARRIED,
        }
    }
}

/// Tax owed on `taxable_income` under a progressive schedule, rounded to the cent.
///
/// Brackets must be ordered and contiguous from zero. Income at or below
/// zero owes nothing.
pub fn bracket_tax(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    let mut remaining = taxable_income.max(0.0);
    let mut tax = 0.0;

    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }
        let in_bracket = remaining.min(bracket.upper - bracket.lower);
        tax += in_bracket * bracket.rate;
        remaining -= in_bracket;
    }

    round_cents(tax)
}

/// Federal income tax for the given filing status, rounded to the cent.
pub fn federal_tax(taxable_income: f64, status: FilingStatus) -> f64 {
    bracket_tax(taxable_income, status.federal_brackets())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_and_negative_income_owe_nothing() {
        assert_eq!(federal_tax(0.0, FilingStatus::Single), 0.0);
        assert_eq!(federal_tax(-5_000.0, FilingStatus::Married), 0.0);
    }

    #[test]
    fn test_single_filer_spans_three_brackets() {
        // 1,160 + 4,266 + 627
        assert_eq!(federal_tax(50_000.0, FilingStatus::Single), 6_053.0);
    }

    #[test]
    fn test_married_filer_uses_wider_brackets() {
        // 2,320 + 8,532 + 1,254
        assert_eq!(federal_tax(100_000.0, FilingStatus::Married), 12_106.0);
    }

    #[test]
    fn test_income_on_bracket_edge() {
        assert_eq!(federal_tax(11_600.0, FilingStatus::Single), 1_160.0);
    }

    /// Closed-form tax at the upper edge of every bounded band.
    fn tax_at_edges(schedule: &[TaxBracket]) -> Vec<(f64, f64)> {
        schedule
            .iter()
            .filter(|b| b.upper.is_finite())
            .scan(0.0, |owed, b| {
                *owed += (b.upper - b.lower) * b.rate;
                Some((b.upper, *owed))
            })
            .collect()
    }

    #[test]
    fn test_tax_is_continuous_across_every_edge() {
        for status in [FilingStatus::Single, FilingStatus::Married] {
            let schedule = status.federal_brackets();
            for (i, (edge, owed)) in tax_at_edges(schedule).into_iter().enumerate() {
                let below = owed - 0.01 * schedule[i].rate;
                let above = owed + 0.01 * schedule[i + 1].rate;

                assert!((federal_tax(edge, status) - round_cents(owed)).abs() < 1e-6, "{edge}");
                assert!((federal_tax(edge - 0.01, status) - round_cents(below)).abs() < 1e-6, "{edge}");
                assert!((federal_tax(edge + 0.01, status) - round_cents(above)).abs() < 1e-6, "{edge}");

                // A cent of income never moves the tax by more than a cent.
                let step = federal_tax(edge + 0.01, status) - federal_tax(edge - 0.01, status);
                assert!((0.0..=0.011).contains(&step), "{edge}: {step}");
            }
        }
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        let at_edge = federal_tax(609_350.0, FilingStatus::Single);
        let above = federal_tax(709_350.0, FilingStatus::Single);
        assert!((above - at_edge - 37_000.0).abs() < 0.02);
    }

    #[test]
    fn test_standard_deduction_by_status() {
        assert_eq!(FilingStatus::Single.standard_deduction(), 14_600.0);
        assert_eq!(FilingStatus::Married.standard_deduction(), 29_200.0);
    }

    #[test]
    fn test_schedules_are_contiguous_from_zero() {
        for schedule in [&FEDERAL_SINGLE_2024[..], &FEDERAL_MARRIED_2024[..]] {
            assert_eq!(schedule[0].lower, 0.0);
            for pair in schedule.windows(2) {
                assert_eq!(pair[0].upper, pair[1].lower);
                assert!(pair[0].rate < pair[1].rate);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_federal_tax_is_monotonic(a in 0.0f64..2_000_000.0, b in 0.0f64..2_000_000.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            for status in [FilingStatus::Single, FilingStatus::Married] {
                prop_assert!(federal_tax(low, status) <= federal_tax(high, status));
            }
        }

        #[test]
        fn prop_marginal_rate_never_exceeds_top_rate(x in 0.0f64..1_500_000.0, delta in 1.0f64..50_000.0) {
            let added = federal_tax(x + delta, FilingStatus::Single) - federal_tax(x, FilingStatus::Single);
            prop_assert!(added <= delta * 0.37 + 0.01);
        }
    }
}
