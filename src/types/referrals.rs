use serde::Deserialize;

use super::PromoterCampaign;
use crate::serde_utils::{lenient_string, lenient_u64};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Referral {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    /// External id assigned by the merchant
    #[serde(deserialize_with = "lenient_string")]
    pub uid: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub fraud_check: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    pub promoter_campaign: Option<PromoterCampaign>,
}

impl Referral {
    pub fn promoter_campaign(&self) -> PromoterCampaign {
        self.promoter_campaign.clone().unwrap_or_default()
    }
}
