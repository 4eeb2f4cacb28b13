//! Finds the civilian gross salary whose take-home pay matches a target,
//! state by state, by bisection over the tax pipeline.

use serde::Serialize;

use crate::money::{percent_one_decimal, round_dollars};
use crate::tax::brackets::{federal_tax, FilingStatus};
use crate::tax::fica::fica;
use crate::tax::states::{StateTaxRegime, TaxType, STATE_TAX_REGIMES};

pub const MAX_ITERATIONS: u32 = 20;
/// Net-income distance, in dollars, at which the search stops early.
pub const TOLERANCE: f64 = 100.0;
const LOWER_BOUND_FACTOR: f64 = 0.5;
const UPPER_BOUND_FACTOR: f64 = 2.0;

/// Take-home pay on civilian wages: gross less federal, state and payroll tax.
/// No deductions are taken.
pub fn civilian_net_income(gross: f64, status: FilingStatus, regime: &StateTaxRegime) -> f64 {
    gross - federal_tax(gross, status) - regime.tax(gross) - fica(gross).total
}

/// Take-home value of a pension: federal and state tax apply, FICA does not.
pub fn pension_net_income(annual_pension: f64, status: FilingStatus, regime: &StateTaxRegime) -> f64 {
    if annual_pension <= 0.0 {
        return 0.0;
    }
    annual_pension - federal_tax(annual_pension, status) - regime.tax(annual_pension)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalarySearch {
    /// Whole-dollar gross salary.
    pub gross_salary: f64,
    pub iterations: u32,
    /// Whether a midpoint landed within `TOLERANCE` before iterations ran out.
    pub converged: bool,
}

/// Bisects over `[0.5 × target, 2 × target]` for the gross salary whose
/// civilian net income is within `TOLERANCE` of `target_net`.
///
/// Net income is increasing in gross, so the bracket always contains the
/// answer for marginal rates below 50% at the low end. The result is the
/// final interval's midpoint rounded to the dollar.
pub fn solve_gross_for_net(target_net: f64, status: FilingStatus, regime: &StateTaxRegime) -> SalarySearch {
    let mut low = target_net * LOWER_BOUND_FACTOR;
    let mut high = target_net * UPPER_BOUND_FACTOR;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < MAX_ITERATIONS {
        iterations += 1;
        let mid = (low + high) / 2.0;
        let net = civilian_net_income(mid, status, regime);

        if (net - target_net).abs() < TOLERANCE {
            converged = true;
            break;
        }

        if net < target_net {
            low = mid;
        } else {
            high = mid;
        }
    }

    SalarySearch {
        gross_salary: round_dollars((low + high) / 2.0),
        iterations,
        converged,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Equivalence {
    /// The pension's take-home already meets the target.
    CoveredByPension,
    Salary(SalarySearch),
}

/// Civilian salary needed in one state so that salary plus pension take-home
/// matches `target_net`. Pension and salary are taxed independently.
pub fn equivalent_salary(
    target_net: f64,
    annual_pension: f64,
    status: FilingStatus,
    regime: &StateTaxRegime,
) -> Equivalence {
    let residual = target_net - pension_net_income(annual_pension, status, regime);
    if residual <= 0.0 {
        return Equivalence::CoveredByPension;
    }
    Equivalence::Salary(solve_gross_for_net(residual, status, regime))
}

/// One row of the all-states comparison. Dollar figures are whole dollars.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEquivalent {
    pub state_code: &'static str,
    pub state_name: &'static str,
    pub tax_type: TaxType,
    pub equivalent_salary: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    pub fica_total: f64,
    pub total_tax: f64,
    pub effective_rate: f64,
    pub premium_over_military: f64,
    /// Whole percent over military gross.
    pub premium_percent: f64,
    pub retirement_income_covers_all: bool,
}

pub fn state_equivalent(
    regime: &'static StateTaxRegime,
    military_net: f64,
    military_gross: f64,
    annual_pension: f64,
    status: FilingStatus,
) -> StateEquivalent {
    let salary = match equivalent_salary(military_net, annual_pension, status, regime) {
        Equivalence::CoveredByPension => {
            return StateEquivalent {
                state_code: regime.code,
                state_name: regime.name,
                tax_type: regime.tax_type(),
                equivalent_salary: 0.0,
                federal_tax: 0.0,
                state_tax: 0.0,
                fica_total: 0.0,
                total_tax: 0.0,
                effective_rate: 0.0,
                premium_over_military: -round_dollars(military_gross),
                premium_percent: -100.0,
                retirement_income_covers_all: true,
            }
        }
        Equivalence::Salary(search) => search.gross_salary,
    };

    let federal = federal_tax(salary, status);
    let state = regime.tax(salary);
    let payroll = fica(salary).total;
    let total = federal + state + payroll;
    let premium = salary - military_gross;
    let premium_percent = if military_gross > 0.0 {
        (premium / military_gross * 100.0).round()
    } else {
        0.0
    };

    StateEquivalent {
        state_code: regime.code,
        state_name: regime.name,
        tax_type: regime.tax_type(),
        equivalent_salary: salary,
        federal_tax: round_dollars(federal),
        state_tax: round_dollars(state),
        fica_total: round_dollars(payroll),
        total_tax: round_dollars(total),
        effective_rate: percent_one_decimal(total, salary),
        premium_over_military: round_dollars(premium),
        premium_percent,
        retirement_income_covers_all: false,
    }
}

/// Equivalent salaries for every state, cheapest first. Ties keep table order.
pub fn all_state_equivalents(
    military_net: f64,
    military_gross: f64,
    annual_pension: f64,
    status: FilingStatus,
) -> Vec<StateEquivalent> {
    let mut rows: Vec<StateEquivalent> = STATE_TAX_REGIMES
        .iter()
        .map(|regime| state_equivalent(regime, military_net, military_gross, annual_pension, status))
        .collect();
    rows.sort_by(|a, b| a.equivalent_salary.total_cmp(&b.equivalent_salary));
    rows
}
