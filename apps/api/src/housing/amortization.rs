//! Fixed-rate mortgage math.

use serde::Serialize;

use crate::money::round_cents;

/// Level monthly payment for a fixed-rate loan, rounded to the cent.
/// A zero rate spreads principal evenly; a zero term is a single payment of
/// the whole principal.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let payments = term_years * 12;
    if payments == 0 {
        return round_cents(principal);
    }
    let n = f64::from(payments);
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return round_cents(principal / n);
    }
    let growth = (1.0 + monthly_rate).powf(n);
    round_cents(principal * (monthly_rate * growth) / (growth - 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Running totals over the first `months` payments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTotals {
    pub payments: f64,
    pub interest: f64,
    pub principal: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone)]
pub struct Amortization {
    pub principal: f64,
    pub monthly_payment: f64,
    pub rows: Vec<AmortizationRow>,
}

impl Amortization {
    /// Builds the schedule by forward recurrence on the balance. Because the
    /// level payment is rounded to the cent, the last row pays off whatever
    /// remains so the balance always ends at exactly zero.
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        let payment = monthly_payment(principal, annual_rate_percent, term_years);
        let monthly_rate = annual_rate_percent / 100.0 / 12.0;
        let payments = term_years * 12;

        let mut rows = Vec::with_capacity(payments as usize);
        let mut balance = principal;
        for month in 1..=payments {
            let interest = balance * monthly_rate;
            let principal_part = if month == payments {
                balance
            } else {
                (payment - interest).min(balance)
            };
            balance = (balance - principal_part).max(0.0);
            rows.push(AmortizationRow {
                month,
                payment: principal_part + interest,
                principal: principal_part,
                interest,
                balance,
            });
        }

        Self {
            principal,
            monthly_payment: payment,
            rows,
        }
    }

    /// Totals through month `months`. Past the end of the schedule the loan
    /// is paid off and the balance stays at zero.
    pub fn totals_through(&self, months: u32) -> PeriodTotals {
        let paid = &self.rows[..self.rows.len().min(months as usize)];
        let remaining_balance = paid.last().map_or(self.principal, |row| row.balance);

        PeriodTotals {
            payments: paid.iter().map(|row| row.payment).sum(),
            interest: paid.iter().map(|row| row.interest).sum(),
            principal: paid.iter().map(|row| row.principal).sum(),
            remaining_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standard_thirty_year_payment() {
        assert_eq!(monthly_payment(357_525.0, 6.25, 30), 2201.34);
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        assert_eq!(monthly_payment(200_000.0, 0.0, 15), 1111.11);
        let schedule = Amortization::new(200_000.0, 0.0, 15);
        assert_eq!(schedule.rows.len(), 180);
        assert!(schedule.rows.iter().all(|row| row.interest == 0.0));
        assert_eq!(schedule.rows[179].balance, 0.0);
    }

    #[test]
    fn test_zero_term_is_single_payment_with_empty_schedule() {
        assert_eq!(monthly_payment(10_000.0, 5.0, 0), 10_000.0);
        let schedule = Amortization::new(10_000.0, 5.0, 0);
        assert!(schedule.rows.is_empty());
        assert_eq!(schedule.totals_through(12).remaining_balance, 10_000.0);
    }

    #[test]
    fn test_totals_before_any_payment() {
        let schedule = Amortization::new(100_000.0, 6.0, 30);
        let totals = schedule.totals_through(0);
        assert_eq!(totals.payments, 0.0);
        assert_eq!(totals.remaining_balance, 100_000.0);
    }

    #[test]
    fn test_balance_stays_zero_after_payoff() {
        let schedule = Amortization::new(100_000.0, 6.0, 15);
        let at_term = schedule.totals_through(180);
        let later = schedule.totals_through(240);
        assert_eq!(at_term.remaining_balance, 0.0);
        assert_eq!(later.remaining_balance, 0.0);
        assert_eq!(at_term.payments, later.payments);
    }

    #[test]
    fn test_first_month_split() {
        let schedule = Amortization::new(300_000.0, 6.0, 30);
        let first = schedule.rows[0];
        assert!((first.interest - 1_500.0).abs() < 1e-9);
        assert!((first.principal - (schedule.monthly_payment - 1_500.0)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn test_schedule_conserves_principal(
            principal in 1_000.0f64..2_000_000.0,
            rate in 0.0f64..15.0,
            term in prop::sample::select(vec![15u32, 30]),
        ) {
            let schedule = Amortization::new(principal, rate, term);
            let repaid: f64 = schedule.rows.iter().map(|row| row.principal).sum();
            prop_assert!((repaid - principal).abs() < 0.01);
            prop_assert_eq!(schedule.rows.last().map(|row| row.balance), Some(0.0));
            prop_assert!(schedule
                .rows
                .windows(2)
                .all(|pair| pair[1].balance <= pair[0].balance));
        }
    }
}
