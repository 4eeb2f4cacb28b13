//! Buy-versus-rent projections and the break-even search.

use serde::Serialize;

use crate::housing::amortization::Amortization;

/// Market assumptions, all annual percentages except where noted.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub property_appreciation_rate: f64,
    pub rent_increase_rate: f64,
    pub investment_return_rate: f64,
    pub property_tax_rate: f64,
    pub home_insurance_rate: f64,
    pub maintenance_rate: f64,
    pub closing_costs_percent: f64,
    /// Dollars per month.
    pub renters_insurance: f64,
    pub security_deposit_months: f64,
}

pub const ASSUMPTIONS: Assumptions = Assumptions {
    property_appreciation_rate: 3.0,
    rent_increase_rate: 3.5,
    investment_return_rate: 7.0,
    property_tax_rate: 1.1,
    home_insurance_rate: 0.35,
    maintenance_rate: 1.0,
    closing_costs_percent: 2.5,
    renters_insurance: 20.0,
    security_deposit_months: 2.0,
};

pub const MAX_BREAK_EVEN_YEARS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomePurchase {
    pub home_price: f64,
    pub down_payment: f64,
    pub interest_rate: f64,
    pub term_years: u32,
    /// Fees rolled into the loan (the VA funding fee).
    pub financed_fees: f64,
}

/// Whole-dollar totals after owning for some number of years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeownershipCosts {
    pub down_payment: f64,
    pub total_mortgage_payments: f64,
    pub total_interest_paid: f64,
    pub principal_paid: f64,
    pub remaining_balance: f64,
    pub property_taxes: f64,
    pub insurance: f64,
    pub maintenance: f64,
    pub closing_costs: f64,
    pub total_cash_outflow: f64,
    pub home_equity: f64,
    pub home_value: f64,
}

impl HomeownershipCosts {
    pub fn net_cost(&self) -> f64 {
        self.total_cash_outflow - self.home_equity
    }
}

impl HomePurchase {
    pub fn loan_amount(&self) -> f64 {
        self.home_price - self.down_payment + self.financed_fees
    }

    pub fn amortization(&self) -> Amortization {
        Amortization::new(self.loan_amount(), self.interest_rate, self.term_years)
    }

    /// Cash spent and equity held after `years`. Property tax, insurance and
    /// maintenance are charged on the home value at the start of each year,
    /// which then appreciates.
    pub fn costs_over(&self, schedule: &Amortization, years: u32) -> HomeownershipCosts {
        let loan = schedule.totals_through(years * 12);

        let mut property_taxes = 0.0;
        let mut insurance = 0.0;
        let mut maintenance = 0.0;
        let mut home_value = self.home_price;
        for _ in 0..years {
            property_taxes += home_value * ASSUMPTIONS.property_tax_rate / 100.0;
            insurance += home_value * ASSUMPTIONS.home_insurance_rate / 100.0;
            maintenance += home_value * ASSUMPTIONS.maintenance_rate / 100.0;
            home_value *= 1.0 + ASSUMPTIONS.property_appreciation_rate / 100.0;
        }

        let closing_costs = self.home_price * ASSUMPTIONS.closing_costs_percent / 100.0;
        let total_cash_outflow = self.down_payment
            + closing_costs
            + loan.payments
            + property_taxes
            + insurance
            + maintenance;

        HomeownershipCosts {
            down_payment: self.down_payment,
            total_mortgage_payments: loan.payments.round(),
            total_interest_paid: loan.interest.round(),
            principal_paid: loan.principal.round(),
            remaining_balance: loan.remaining_balance.round(),
            property_taxes: property_taxes.round(),
            insurance: insurance.round(),
            maintenance: maintenance.round(),
            closing_costs: closing_costs.round(),
            total_cash_outflow: total_cash_outflow.round(),
            home_equity: (home_value - loan.remaining_balance).round(),
            home_value: home_value.round(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentingCosts {
    pub total_rent_paid: f64,
    pub total_insurance: f64,
    /// Refundable, so not part of the outflow.
    pub security_deposit: f64,
    pub total_cash_outflow: f64,
}

/// Rent paid over `years`, rising once a year.
pub fn renting_costs(monthly_rent: f64, years: u32) -> RentingCosts {
    let mut total_rent = 0.0;
    let mut rent = monthly_rent;
    for _ in 0..years {
        total_rent += rent * 12.0;
        rent *= 1.0 + ASSUMPTIONS.rent_increase_rate / 100.0;
    }
    let total_insurance = ASSUMPTIONS.renters_insurance * 12.0 * f64::from(years);

    RentingCosts {
        total_rent_paid: total_rent.round(),
        total_insurance: total_insurance.round(),
        security_deposit: (monthly_rent * ASSUMPTIONS.security_deposit_months).round(),
        total_cash_outflow: (total_rent + total_insurance).round(),
    }
}

/// Growth forgone by putting the down payment into the house instead of
/// investing it.
pub fn opportunity_cost(down_payment: f64, years: u32) -> f64 {
    let growth = (1.0 + ASSUMPTIONS.investment_return_rate / 100.0).powi(years as i32);
    (down_payment * growth - down_payment).round()
}

/// Net position of each choice at one horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonComparison {
    pub years: u32,
    pub buying: HomeownershipCosts,
    pub renting: RentingCosts,
    pub opportunity_cost: f64,
}

impl HorizonComparison {
    pub fn buying_net_cost(&self) -> f64 {
        self.buying.net_cost()
    }

    pub fn renting_net_cost_with_opportunity(&self) -> f64 {
        self.renting.total_cash_outflow + self.opportunity_cost
    }

    pub fn buying_is_better(&self) -> bool {
        self.buying_net_cost() < self.renting_net_cost_with_opportunity()
    }
}

pub fn compare_at(
    purchase: &HomePurchase,
    schedule: &Amortization,
    monthly_rent: f64,
    years: u32,
) -> HorizonComparison {
    HorizonComparison {
        years,
        buying: purchase.costs_over(schedule, years),
        renting: renting_costs(monthly_rent, years),
        opportunity_cost: opportunity_cost(purchase.down_payment, years),
    }
}

/// First year in `1..=max_years` in which buying's net cost (outflow less
/// equity) drops below renting's (outflow plus the down payment's forgone
/// growth). `None` means no crossover within the horizon.
pub fn break_even_year(purchase: &HomePurchase, monthly_rent: f64, max_years: u32) -> Option<u32> {
    let schedule = purchase.amortization();
    (1..=max_years).find(|&years| compare_at(purchase, &schedule, monthly_rent, years).buying_is_better())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn va_zero_down() -> HomePurchase {
        HomePurchase {
            home_price: 350_000.0,
            down_payment: 0.0,
            interest_rate: 6.25,
            term_years: 30,
            financed_fees: 7_525.0,
        }
    }

    #[test]
    fn test_first_year_costs() {
        let purchase = va_zero_down();
        let costs = purchase.costs_over(&purchase.amortization(), 1);
        assert_eq!(costs.property_taxes, 3_850.0);
        assert_eq!(costs.insurance, 1_225.0);
        assert_eq!(costs.maintenance, 3_500.0);
        assert_eq!(costs.closing_costs, 8_750.0);
        assert_eq!(costs.home_value, 360_500.0);
        assert!((costs.total_mortgage_payments - 26_416.0).abs() <= 1.0);
    }

    #[test]
    fn test_renting_costs_grow_yearly() {
        let renting = renting_costs(2_000.0, 2);
        assert_eq!(renting.total_rent_paid, 48_840.0);
        assert_eq!(renting.total_insurance, 480.0);
        assert_eq!(renting.security_deposit, 4_000.0);
        assert_eq!(renting.total_cash_outflow, 49_320.0);
    }

    #[test]
    fn test_opportunity_cost() {
        assert_eq!(opportunity_cost(0.0, 10), 0.0);
        assert_eq!(opportunity_cost(10_000.0, 1), 700.0);
        assert_eq!(opportunity_cost(10_000.0, 2), 1_449.0);
    }

    #[test]
    fn test_zero_down_va_purchase_breaks_even_early() {
        let year = break_even_year(&va_zero_down(), 2_000.0, MAX_BREAK_EVEN_YEARS);
        assert!(matches!(year, Some(y) if (1..=10).contains(&y)), "got {year:?}");
    }

    #[test]
    fn test_cheap_rent_never_breaks_even() {
        assert_eq!(break_even_year(&va_zero_down(), 200.0, MAX_BREAK_EVEN_YEARS), None);
    }

    #[test]
    fn test_equity_after_payoff_is_full_home_value() {
        let purchase = HomePurchase {
            term_years: 15,
            ..va_zero_down()
        };
        let costs = purchase.costs_over(&purchase.amortization(), 20);
        assert_eq!(costs.remaining_balance, 0.0);
        assert_eq!(costs.home_equity, costs.home_value);
    }

    proptest! {
        #[test]
        fn test_higher_rent_never_delays_break_even(
            rent in 500.0f64..4_000.0,
            bump in 0.0f64..1_500.0,
        ) {
            let purchase = va_zero_down();
            let lower = break_even_year(&purchase, rent, MAX_BREAK_EVEN_YEARS);
            let higher = break_even_year(&purchase, rent + bump, MAX_BREAK_EVEN_YEARS);
            match (lower, higher) {
                (Some(a), Some(b)) => prop_assert!(b <= a),
                (Some(_), None) => prop_assert!(false, "higher rent lost the break-even"),
                _ => {}
            }
        }
    }
}
