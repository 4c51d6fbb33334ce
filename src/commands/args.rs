//! Tool arguments as received from the host.
//!
//! Every field is a string because the tool surface is string-typed; blank
//! means "not provided". Conversion to typed values happens in the handlers.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NoArgs {}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListReferralsArgs {
    pub search: String,
    pub state: String,
    pub promoter_id: String,
    pub page: String,
    pub per_page: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReferralIdArgs {
    pub referral_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListPromotersArgs {
    pub search: String,
    pub state: String,
    pub campaign_id: String,
    pub page: String,
    pub per_page: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PromoterIdArgs {
    pub promoter_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreatePromoterArgs {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub campaign_id: String,
    pub cust_id: String,
    /// `"true"` suppresses the welcome email
    pub skip_email: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UpdatePromoterArgs {
    pub promoter_id: String,
    pub first_name: String,
    pub last_name: String,
    pub note: String,
    pub cust_id: String,
}

/// Add-to and move-to campaign.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CampaignAssignmentArgs {
    pub campaign_id: String,
    /// Comma-separated promoter ids
    pub promoter_ids: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AcceptPromotersArgs {
    pub promoter_ids: String,
    pub campaign_id: String,
}

/// Reject, block, archive and restore.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PromoterIdsArgs {
    pub promoter_ids: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListPromoterCampaignsArgs {
    pub promoter_id: String,
    pub campaign_id: String,
    pub page: String,
    pub per_page: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PromoterCampaignIdArgs {
    pub promoter_campaign_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UpdatePromoterCampaignArgs {
    pub promoter_campaign_id: String,
    pub ref_token: String,
    pub coupon: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListCommissionsArgs {
    pub search: String,
    pub status: String,
    pub promoter_id: String,
    pub page: String,
    pub per_page: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CommissionIdsArgs {
    pub commission_ids: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListPayoutsArgs {
    pub status: String,
    pub promoter_id: String,
    pub payout_method: String,
    pub page: String,
    pub per_page: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GroupedPayoutsArgs {
    pub status: String,
    pub page: String,
    pub per_page: String,
}
