//! VA purchase-loan funding fee (2024 VA.gov schedule).

/// Fee percentages by down payment: under 5%, 5% or more, 10% or more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundingFeeTier {
    pub no_down_payment: f64,
    pub five_percent: f64,
    pub ten_percent: f64,
}

pub const FIRST_USE: FundingFeeTier = FundingFeeTier {
    no_down_payment: 2.15,
    five_percent: 1.5,
    ten_percent: 1.25,
};

pub const SUBSEQUENT_USE: FundingFeeTier = FundingFeeTier {
    no_down_payment: 3.3,
    five_percent: 1.5,
    ten_percent: 1.25,
};

pub const VA_30_YEAR_RATE: f64 = 6.25;

/// Who is waived from the fee.
pub const FEE_EXEMPTIONS: [&str; 5] = [
    "Veterans receiving VA compensation for service-connected disabilities",
    "Veterans entitled to receive VA compensation but receiving retirement/active duty pay",
    "Surviving spouses of veterans who died in service or from service-connected disabilities",
    "Service members with proposed or memorandum disability ratings before loan closing",
    "Purple Heart recipients serving on active duty",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingFeeTerms {
    pub first_use: bool,
    pub exempt: bool,
}

impl FundingFeeTerms {
    /// Fee as a percent of the loan amount.
    pub fn percent(self, down_payment_percent: f64) -> f64 {
        if self.exempt {
            return 0.0;
        }
        let tier = if self.first_use {
            FIRST_USE
        } else {
            SUBSEQUENT_USE
        };
        if down_payment_percent >= 10.0 {
            tier.ten_percent
        } else if down_payment_percent >= 5.0 {
            tier.five_percent
        } else {
            tier.no_down_payment
        }
    }

    /// Whole-dollar fee, financed into the loan.
    pub fn fee(self, loan_amount: f64, down_payment_percent: f64) -> f64 {
        (loan_amount * self.percent(down_payment_percent) / 100.0).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: FundingFeeTerms = FundingFeeTerms {
        first_use: true,
        exempt: false,
    };

    #[test]
    fn test_first_use_zero_down() {
        assert_eq!(FIRST.percent(0.0), 2.15);
        assert_eq!(FIRST.fee(350_000.0, 0.0), 7_525.0);
    }

    #[test]
    fn test_down_payment_tiers() {
        assert_eq!(FIRST.percent(4.99), 2.15);
        assert_eq!(FIRST.percent(5.0), 1.5);
        assert_eq!(FIRST.percent(10.0), 1.25);
        let subsequent = FundingFeeTerms {
            first_use: false,
            exempt: false,
        };
        assert_eq!(subsequent.percent(0.0), 3.3);
        assert_eq!(subsequent.percent(20.0), 1.25);
    }

    #[test]
    fn test_exempt_pays_nothing() {
        let exempt = FundingFeeTerms {
            first_use: false,
            exempt: true,
        };
        assert_eq!(exempt.fee(400_000.0, 0.0), 0.0);
    }
}
