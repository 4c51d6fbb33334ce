use serde::Deserialize;

use super::{Cents, PromoterRef};
use crate::serde_utils::{lenient_string, lenient_u64, minor_units};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Payout {
    #[serde(deserialize_with = "minor_units")]
    pub amount: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    pub promoter: Option<PromoterRef>,
}

impl Payout {
    pub fn amount(&self) -> Cents {
        Cents::or_zero(self.amount)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PayoutStats {
    #[serde(deserialize_with = "minor_units")]
    pub pending_amount: Option<i64>,
    #[serde(deserialize_with = "minor_units")]
    pub completed_amount: Option<i64>,
    #[serde(deserialize_with = "minor_units")]
    pub processing_amount: Option<i64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub pending_count: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub completed_count: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DuePayoutStats {
    #[serde(deserialize_with = "minor_units")]
    pub total_amount: Option<i64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub total_count: Option<u64>,
    #[serde(deserialize_with = "minor_units")]
    pub next_period_amount: Option<i64>,
    #[serde(deserialize_with = "minor_units")]
    pub overdue_amount: Option<i64>,
}

/// One row of the payouts-grouped-by-promoter report.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PromoterPayoutGroup {
    pub promoter: Option<PromoterRef>,
    #[serde(deserialize_with = "minor_units")]
    pub total_amount: Option<i64>,
}
