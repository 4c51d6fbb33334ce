use serde::Deserialize;

use super::{Cents, PromoterCampaign};
use crate::serde_utils::{lenient_string, lenient_u64, minor_units};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PromoterStats {
    #[serde(deserialize_with = "lenient_u64")]
    pub clicks_count: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub referrals_count: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub sales_count: Option<u64>,
    #[serde(deserialize_with = "minor_units")]
    pub revenue_amount: Option<i64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub active_customers_count: Option<u64>,
}

impl PromoterStats {
    pub fn revenue(&self) -> Cents {
        Cents::or_zero(self.revenue_amount)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Promoter {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cust_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub joined_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_login_at: Option<String>,
    pub stats: Option<PromoterStats>,
    pub promoter_campaigns: Option<Vec<PromoterCampaign>>,
}

impl Promoter {
    pub fn stats(&self) -> PromoterStats {
        self.stats.clone().unwrap_or_default()
    }

    pub fn campaigns(&self) -> &[PromoterCampaign] {
        self.promoter_campaigns.as_deref().unwrap_or_default()
    }

    /// Referral link of the first campaign membership, if any.
    pub fn first_ref_link(&self) -> Option<&str> {
        self.campaigns().first().and_then(|pc| pc.ref_link.as_deref())
    }
}

/// `meta` block of the promoter listing envelope.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PromoterListMeta {
    #[serde(deserialize_with = "lenient_u64")]
    pub pending_count: Option<u64>,
}

/// Reply to an asynchronous bulk accept.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BatchStatus {
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
}
