use serde::Deserialize;

use super::{Cents, PromoterCampaign};
use crate::serde_utils::{lenient_string, minor_units};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Commission {
    #[serde(deserialize_with = "minor_units")]
    pub amount: Option<i64>,
    /// `cash`, `points`, `free_months`, ...
    #[serde(deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    pub promoter_campaign: Option<PromoterCampaign>,
}

impl Commission {
    pub fn amount(&self) -> Cents {
        Cents::or_zero(self.amount)
    }

    pub fn unit(&self) -> &str {
        self.unit.as_deref().unwrap_or("cash")
    }
}
