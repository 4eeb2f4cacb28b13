use serde::{Deserialize, Serialize};

/// Equity vesting shapes offered on the comparison form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VestingSchedule {
    /// 25% at the one-year cliff, then monthly for three years.
    #[default]
    #[serde(rename = "4year-1cliff")]
    FourYearOneYearCliff,
    #[serde(rename = "4year-monthly")]
    FourYearMonthly,
    #[serde(rename = "3year-monthly")]
    ThreeYearMonthly,
    #[serde(rename = "immediate")]
    Immediate,
}

const CLIFF_MONTHS: u32 = 12;
const CLIFF_FRACTION: f64 = 0.25;
const POST_CLIFF_MONTHS: u32 = 36;

impl VestingSchedule {
    pub const ALL: [VestingSchedule; 4] = [
        VestingSchedule::FourYearOneYearCliff,
        VestingSchedule::FourYearMonthly,
        VestingSchedule::ThreeYearMonthly,
        VestingSchedule::Immediate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VestingSchedule::FourYearOneYearCliff => "4year-1cliff",
            VestingSchedule::FourYearMonthly => "4year-monthly",
            VestingSchedule::ThreeYearMonthly => "3year-monthly",
            VestingSchedule::Immediate => "immediate",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VestingSchedule::FourYearOneYearCliff => "25% at 1 year, then monthly over 3 years",
            VestingSchedule::FourYearMonthly => "Monthly over 4 years, no cliff",
            VestingSchedule::ThreeYearMonthly => "Monthly over 3 years, no cliff",
            VestingSchedule::Immediate => "Immediate vesting",
        }
    }

    /// Share of the grant vested after `months`, in `[0, 1]`.
    pub fn vested_fraction(self, months: u32) -> f64 {
        match self {
            VestingSchedule::Immediate => 1.0,
            VestingSchedule::FourYearOneYearCliff => {
                if months < CLIFF_MONTHS {
                    return 0.0;
                }
                let after_cliff = (months - CLIFF_MONTHS).min(POST_CLIFF_MONTHS);
                CLIFF_FRACTION
                    + (1.0 - CLIFF_FRACTION) * f64::from(after_cliff) / f64::from(POST_CLIFF_MONTHS)
            }
            VestingSchedule::FourYearMonthly => monthly_fraction(months, 48),
            VestingSchedule::ThreeYearMonthly => monthly_fraction(months, 36),
        }
    }

    /// Whole-dollar value vested after `years`.
    pub fn vested_value(self, total_grant: f64, years: u32) -> f64 {
        (total_grant * self.vested_fraction(years * 12)).round()
    }
}

fn monthly_fraction(months: u32, total_months: u32) -> f64 {
    f64::from(months.min(total_months)) / f64::from(total_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cliff_boundaries() {
        let cliff = VestingSchedule::FourYearOneYearCliff;
        assert_eq!(cliff.vested_fraction(11), 0.0);
        assert_eq!(cliff.vested_fraction(12), 0.25);
        assert_eq!(cliff.vested_fraction(24), 0.5);
        assert_eq!(cliff.vested_fraction(48), 1.0);
        assert_eq!(cliff.vested_fraction(120), 1.0);
    }

    #[test]
    fn test_monthly_schedules_vest_linearly() {
        assert_eq!(VestingSchedule::FourYearMonthly.vested_fraction(12), 0.25);
        assert_eq!(VestingSchedule::ThreeYearMonthly.vested_fraction(18), 0.5);
        assert_eq!(VestingSchedule::ThreeYearMonthly.vested_fraction(48), 1.0);
        assert_eq!(VestingSchedule::FourYearMonthly.vested_fraction(0), 0.0);
    }

    #[test]
    fn test_immediate_is_always_fully_vested() {
        assert_eq!(VestingSchedule::Immediate.vested_fraction(0), 1.0);
        assert_eq!(VestingSchedule::Immediate.vested_value(12_345.0, 1), 12_345.0);
    }

    #[test]
    fn test_schedule_keys_round_trip_through_serde() {
        for schedule in VestingSchedule::ALL {
            let json = serde_json::to_string(&schedule).unwrap();
            assert_eq!(json, format!("\"{}\"", schedule.key()));
        }
    }
}
