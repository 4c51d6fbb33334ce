//! Tool catalogue and dispatch.
//!
//! [`TOOLS`] is what hosts see: stable names, one-line descriptions and
//! string-typed parameter lists. [`ToolCall`] is the typed form of one
//! invocation, deserialized straight from `{ "name": ..., "arguments": {...} }`.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::commands::{
    AcceptPromotersArgs, CampaignAssignmentArgs, CommissionIdsArgs, CreatePromoterArgs,
    FirstPromoterClient, GroupedPayoutsArgs, ListCommissionsArgs, ListPayoutsArgs,
    ListPromoterCampaignsArgs, ListPromotersArgs, ListReferralsArgs, NoArgs,
    PromoterCampaignIdArgs, PromoterIdArgs, PromoterIdsArgs, ReferralIdArgs,
    UpdatePromoterArgs, UpdatePromoterCampaignArgs,
};
use crate::serde_utils::stringify_arguments;
use crate::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Value assumed when the parameter is omitted
    pub default: Option<&'static str>,
}

const fn required(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        description,
        required: true,
        default: None,
    }
}

const fn optional(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        description,
        required: false,
        default: None,
    }
}

const fn defaulted(
    name: &'static str,
    description: &'static str,
    default: &'static str,
) -> ParamSpec {
    ParamSpec {
        name,
        description,
        required: false,
        default: Some(default),
    }
}

const PAGE: ParamSpec = defaulted("page", "Page number", "1");
const PER_PAGE: ParamSpec = defaulted("per_page", "Records per page", "20");
const PROMOTER_IDS: ParamSpec = required("promoter_ids", "Comma-separated promoter IDs");
const COMMISSION_IDS: ParamSpec = required("commission_ids", "Comma-separated commission IDs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

impl ToolSpec {
    /// JSON schema advertised to hosts; every property is a string.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| {
                let mut prop = json!({ "type": "string", "description": p.description });
                if let Some(default) = p.default {
                    prop["default"] = json!(default);
                }
                (p.name.to_string(), prop)
            })
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn find(name: &str) -> Option<&'static ToolSpec> {
        TOOLS.iter().find(|t| t.name == name)
    }
}

pub const TOOLS: &[ToolSpec] = &[
    // Referrals
    ToolSpec {
        name: "get_referrals",
        description: "List all referrals with optional filters for search, state, and promoter_id.",
        params: &[
            optional("search", "Free-text search"),
            optional("state", "Referral state filter"),
            optional("promoter_id", "Only referrals of this promoter"),
            PAGE,
            PER_PAGE,
        ],
    },
    ToolSpec {
        name: "get_referral",
        description: "Get details of a specific referral by ID.",
        params: &[required("referral_id", "Referral ID")],
    },
    // Promoters
    ToolSpec {
        name: "get_promoters",
        description: "List all promoters with optional filters for search, state, and campaign_id.",
        params: &[
            optional("search", "Free-text search"),
            optional("state", "Promoter state filter"),
            optional("campaign_id", "Only promoters in this campaign"),
            PAGE,
            PER_PAGE,
        ],
    },
    ToolSpec {
        name: "get_promoter",
        description: "Get detailed information about a specific promoter by ID.",
        params: &[required("promoter_id", "Promoter ID")],
    },
    ToolSpec {
        name: "create_promoter",
        description: "Create a new promoter with email (required), optional name, campaign_id, and cust_id.",
        params: &[
            required("email", "Promoter email"),
            optional("first_name", "First name"),
            optional("last_name", "Last name"),
            optional("campaign_id", "Campaign to join"),
            optional("cust_id", "Your customer ID for this promoter"),
            defaulted("skip_email", "\"true\" to skip the welcome email", "false"),
        ],
    },
    ToolSpec {
        name: "update_promoter",
        description: "Update a promoter's information including name, note, or customer ID.",
        params: &[
            required("promoter_id", "Promoter ID"),
            optional("first_name", "First name"),
            optional("last_name", "Last name"),
            optional("note", "Internal note"),
            optional("cust_id", "Your customer ID for this promoter"),
        ],
    },
    ToolSpec {
        name: "add_promoters_to_campaign",
        description: "Add promoters to a campaign. Provide campaign_id and comma-separated promoter_ids.",
        params: &[required("campaign_id", "Target campaign ID"), PROMOTER_IDS],
    },
    ToolSpec {
        name: "move_promoters_to_campaign",
        description: "Move promoters to a different campaign. Provide campaign_id and comma-separated promoter_ids.",
        params: &[required("campaign_id", "Target campaign ID"), PROMOTER_IDS],
    },
    ToolSpec {
        name: "accept_promoters",
        description: "Accept pending promoters. Provide comma-separated promoter_ids and optional campaign_id.",
        params: &[PROMOTER_IDS, optional("campaign_id", "Campaign to accept into")],
    },
    ToolSpec {
        name: "reject_promoters",
        description: "Reject pending promoters. Provide comma-separated promoter_ids.",
        params: &[PROMOTER_IDS],
    },
    ToolSpec {
        name: "block_promoters",
        description: "Block promoters. Provide comma-separated promoter_ids.",
        params: &[PROMOTER_IDS],
    },
    ToolSpec {
        name: "archive_promoters",
        description: "Archive promoters. Provide comma-separated promoter_ids.",
        params: &[PROMOTER_IDS],
    },
    ToolSpec {
        name: "restore_promoters",
        description: "Restore archived promoters. Provide comma-separated promoter_ids.",
        params: &[PROMOTER_IDS],
    },
    // Promoter campaigns
    ToolSpec {
        name: "get_promoter_campaigns",
        description: "List promoter campaigns with optional filters for promoter_id and campaign_id.",
        params: &[
            optional("promoter_id", "Only memberships of this promoter"),
            optional("campaign_id", "Only memberships in this campaign"),
            PAGE,
            PER_PAGE,
        ],
    },
    ToolSpec {
        name: "get_promoter_campaign",
        description: "Get details of a specific promoter campaign by ID.",
        params: &[required("promoter_campaign_id", "Promoter campaign ID")],
    },
    ToolSpec {
        name: "update_promoter_campaign",
        description: "Update a promoter campaign's ref_token or coupon code.",
        params: &[
            required("promoter_campaign_id", "Promoter campaign ID"),
            optional("ref_token", "New referral token"),
            optional("coupon", "New coupon code"),
        ],
    },
    // Commissions
    ToolSpec {
        name: "get_commissions",
        description: "List all commissions with optional filters for search, status, and promoter_id.",
        params: &[
            optional("search", "Free-text search"),
            optional("status", "Commission status filter"),
            optional("promoter_id", "Only commissions of this promoter"),
            PAGE,
            PER_PAGE,
        ],
    },
    ToolSpec {
        name: "approve_commissions",
        description: "Approve pending commissions. Provide comma-separated commission_ids.",
        params: &[COMMISSION_IDS],
    },
    ToolSpec {
        name: "deny_commissions",
        description: "Deny commissions. Provide comma-separated commission_ids.",
        params: &[COMMISSION_IDS],
    },
    // Payouts
    ToolSpec {
        name: "get_payouts",
        description: "List all payouts with optional filters for status, promoter_id, and payout_method.",
        params: &[
            optional("status", "Payout status filter"),
            optional("promoter_id", "Only payouts of this promoter"),
            optional("payout_method", "Payout method filter"),
            PAGE,
            PER_PAGE,
        ],
    },
    ToolSpec {
        name: "get_payout_stats",
        description: "Get overall payout statistics.",
        params: &[],
    },
    ToolSpec {
        name: "get_due_payout_stats",
        description: "Get statistics for payouts that are due.",
        params: &[],
    },
    ToolSpec {
        name: "get_payouts_by_promoter",
        description: "Get payouts grouped by promoter with optional status filter.",
        params: &[optional("status", "Payout status filter"), PAGE, PER_PAGE],
    },
];

/// One typed tool invocation.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    GetReferrals(ListReferralsArgs),
    GetReferral(ReferralIdArgs),
    GetPromoters(ListPromotersArgs),
    GetPromoter(PromoterIdArgs),
    CreatePromoter(CreatePromoterArgs),
    UpdatePromoter(UpdatePromoterArgs),
    AddPromotersToCampaign(CampaignAssignmentArgs),
    MovePromotersToCampaign(CampaignAssignmentArgs),
    AcceptPromoters(AcceptPromotersArgs),
    RejectPromoters(PromoterIdsArgs),
    BlockPromoters(PromoterIdsArgs),
    ArchivePromoters(PromoterIdsArgs),
    RestorePromoters(PromoterIdsArgs),
    GetPromoterCampaigns(ListPromoterCampaignsArgs),
    GetPromoterCampaign(PromoterCampaignIdArgs),
    UpdatePromoterCampaign(UpdatePromoterCampaignArgs),
    GetCommissions(ListCommissionsArgs),
    ApproveCommissions(CommissionIdsArgs),
    DenyCommissions(CommissionIdsArgs),
    GetPayouts(ListPayoutsArgs),
    GetPayoutStats(NoArgs),
    GetDuePayoutStats(NoArgs),
    GetPayoutsByPromoter(GroupedPayoutsArgs),
}

impl ToolCall {
    /// Binds a host invocation. Scalar argument values are stringified,
    /// missing arguments default to blank.
    pub fn parse(name: &str, arguments: Option<Map<String, Value>>) -> Result<Self, DispatchError> {
        if ToolSpec::find(name).is_none() {
            return Err(DispatchError::UnknownTool(name.to_string()));
        }
        let arguments = stringify_arguments(arguments.unwrap_or_default());
        serde_json::from_value(json!({ "name": name, "arguments": arguments })).map_err(|e| {
            DispatchError::InvalidArguments {
                tool: name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::GetReferrals(_) => "get_referrals",
            ToolCall::GetReferral(_) => "get_referral",
            ToolCall::GetPromoters(_) => "get_promoters",
            ToolCall::GetPromoter(_) => "get_promoter",
            ToolCall::CreatePromoter(_) => "create_promoter",
            ToolCall::UpdatePromoter(_) => "update_promoter",
            ToolCall::AddPromotersToCampaign(_) => "add_promoters_to_campaign",
            ToolCall::MovePromotersToCampaign(_) => "move_promoters_to_campaign",
            ToolCall::AcceptPromoters(_) => "accept_promoters",
            ToolCall::RejectPromoters(_) => "reject_promoters",
            ToolCall::BlockPromoters(_) => "block_promoters",
            ToolCall::ArchivePromoters(_) => "archive_promoters",
            ToolCall::RestorePromoters(_) => "restore_promoters",
            ToolCall::GetPromoterCampaigns(_) => "get_promoter_campaigns",
            ToolCall::GetPromoterCampaign(_) => "get_promoter_campaign",
            ToolCall::UpdatePromoterCampaign(_) => "update_promoter_campaign",
            ToolCall::GetCommissions(_) => "get_commissions",
            ToolCall::ApproveCommissions(_) => "approve_commissions",
            ToolCall::DenyCommissions(_) => "deny_commissions",
            ToolCall::GetPayouts(_) => "get_payouts",
            ToolCall::GetPayoutStats(_) => "get_payout_stats",
            ToolCall::GetDuePayoutStats(_) => "get_due_payout_stats",
            ToolCall::GetPayoutsByPromoter(_) => "get_payouts_by_promoter",
        }
    }
}

/// Binds the catalogue to a handler set.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: FirstPromoterClient,
}

impl ToolRegistry {
    pub fn new(client: FirstPromoterClient) -> Self {
        Self { client }
    }

    pub fn tools(&self) -> &'static [ToolSpec] {
        TOOLS
    }

    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<String, DispatchError> {
        let call = ToolCall::parse(name, arguments)?;
        Ok(self.execute(call).await)
    }

    pub async fn execute(&self, call: ToolCall) -> String {
        let client = &self.client;
        match call {
            ToolCall::GetReferrals(args) => client.get_referrals(args).await,
            ToolCall::GetReferral(args) => client.get_referral(args).await,
            ToolCall::GetPromoters(args) => client.get_promoters(args).await,
            ToolCall::GetPromoter(args) => client.get_promoter(args).await,
            ToolCall::CreatePromoter(args) => client.create_promoter(args).await,
            ToolCall::UpdatePromoter(args) => client.update_promoter(args).await,
            ToolCall::AddPromotersToCampaign(args) => client.add_promoters_to_campaign(args).await,
            ToolCall::MovePromotersToCampaign(args) => {
                client.move_promoters_to_campaign(args).await
            }
            ToolCall::AcceptPromoters(args) => client.accept_promoters(args).await,
            ToolCall::RejectPromoters(args) => client.reject_promoters(args).await,
            ToolCall::BlockPromoters(args) => client.block_promoters(args).await,
            ToolCall::ArchivePromoters(args) => client.archive_promoters(args).await,
            ToolCall::RestorePromoters(args) => client.restore_promoters(args).await,
            ToolCall::GetPromoterCampaigns(args) => client.get_promoter_campaigns(args).await,
            ToolCall::GetPromoterCampaign(args) => client.get_promoter_campaign(args).await,
            ToolCall::UpdatePromoterCampaign(args) => client.update_promoter_campaign(args).await,
            ToolCall::GetCommissions(args) => client.get_commissions(args).await,
            ToolCall::ApproveCommissions(args) => client.approve_commissions(args).await,
            ToolCall::DenyCommissions(args) => client.deny_commissions(args).await,
            ToolCall::GetPayouts(args) => client.get_payouts(args).await,
            ToolCall::GetPayoutStats(args) => client.get_payout_stats(args).await,
            ToolCall::GetDuePayoutStats(args) => client.get_due_payout_stats(args).await,
            ToolCall::GetPayoutsByPromoter(args) => client.get_payouts_by_promoter(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_catalogue_entry_binds_to_a_call() {
        for spec in TOOLS {
            let call = ToolCall::parse(spec.name, None)
                .unwrap_or_else(|e| panic!("{} did not bind: {e}", spec.name));
            assert_eq!(call.name(), spec.name);
        }
    }

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<_> = TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn arguments_bind_with_stringified_scalars() {
        let Value::Object(args) = json!({ "promoter_ids": "1,2", "campaign_id": 7 }) else {
            unreachable!()
        };
        let call = ToolCall::parse("accept_promoters", Some(args)).unwrap();
        assert_eq!(
            call,
            ToolCall::AcceptPromoters(AcceptPromotersArgs {
                promoter_ids: "1,2".to_string(),
                campaign_id: "7".to_string(),
            })
        );
    }

    #[test]
    fn unknown_tool_is_rejected() {
        assert_eq!(
            ToolCall::parse("delete_everything", None),
            Err(DispatchError::UnknownTool("delete_everything".to_string()))
        );
    }

    #[test]
    fn structured_argument_is_invalid() {
        let Value::Object(args) = json!({ "referral_id": ["1"] }) else {
            unreachable!()
        };
        assert!(matches!(
            ToolCall::parse("get_referral", Some(args)),
            Err(DispatchError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn schema_lists_required_string_params() {
        let spec = ToolSpec::find("add_promoters_to_campaign").unwrap();
        let schema = spec.input_schema();
        assert_eq!(schema["required"], json!(["campaign_id", "promoter_ids"]));
        assert_eq!(schema["properties"]["promoter_ids"]["type"], json!("string"));

        let schema = ToolSpec::find("get_payouts").unwrap().input_schema();
        assert_eq!(schema["properties"]["per_page"]["default"], json!("20"));
        assert_eq!(schema["required"], json!([]));
    }
}
