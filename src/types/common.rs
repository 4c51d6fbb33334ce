//! Shapes shared by several resources.

use std::fmt;

use serde::Deserialize;

use crate::serde_utils::{lenient_string, lenient_u64};

/// Monetary amount in minor units, rendered as `$<units>.<cents>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(pub i64);

impl Cents {
    pub fn or_zero(amount: Option<i64>) -> Self {
        Cents(amount.unwrap_or(0))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "${sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Promoter as embedded inside other records.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PromoterRef {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CampaignRef {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// Membership of a promoter in a campaign, with its own referral token.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PromoterCampaign {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    pub promoter: Option<PromoterRef>,
    pub campaign: Option<CampaignRef>,
    #[serde(deserialize_with = "lenient_string")]
    pub ref_token: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ref_link: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub coupon: Option<String>,
}

impl PromoterCampaign {
    pub fn promoter(&self) -> PromoterRef {
        self.promoter.clone().unwrap_or_default()
    }

    pub fn campaign(&self) -> CampaignRef {
        self.campaign.clone().unwrap_or_default()
    }
}
