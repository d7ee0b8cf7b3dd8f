use serde::{Deserialize, Serialize};
use time::Duration;
use vodca::{AsRefln, Fromln};

use crate::entity::DailyRentalRate;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalFee(i64);

impl RentalFee {
    pub fn new(fee: impl Into<i64>) -> Self {
        Self(fee.into())
    }

    /// Bills whole 24 hour periods only. Partial days and negative spans cost nothing.
    pub fn calculate(rate: &DailyRentalRate, elapsed: Duration) -> Self {
        let days = elapsed.whole_days().max(0);
        Self(i64::from(*rate.as_ref()).saturating_mul(days))
    }
}

#[cfg(test)]
mod test {
    use time::Duration;

    use super::RentalFee;
    use crate::entity::DailyRentalRate;

    #[test]
    fn whole_days_are_billed() {
        let rate = DailyRentalRate::new(3);
        assert_eq!(RentalFee::calculate(&rate, Duration::days(7)), RentalFee::new(21));
    }

    #[test]
    fn partial_days_are_truncated() {
        let rate = DailyRentalRate::new(3);
        let elapsed = Duration::days(2) + Duration::hours(23) + Duration::minutes(59);
        assert_eq!(RentalFee::calculate(&rate, elapsed), RentalFee::new(6));
        assert_eq!(RentalFee::calculate(&rate, Duration::hours(5)), RentalFee::new(0));
    }

    #[test]
    fn future_date_out_costs_nothing() {
        let rate = DailyRentalRate::new(4);
        assert_eq!(RentalFee::calculate(&rate, Duration::days(-3)), RentalFee::new(0));
    }
}
