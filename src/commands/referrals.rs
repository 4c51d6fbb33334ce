//! Referral tools.

use tracing::info;

use super::params::{optional, record_id, Paging};
use super::{respond, FirstPromoterClient, ListReferralsArgs, ReferralIdArgs};
use crate::{
    format::{format_referral, or_na, render_list},
    logging::targets,
    prelude::*,
    req::QueryParams,
    response::Page,
    types::{decode_record, Referral},
};

impl FirstPromoterClient {
    /// List referrals, optionally filtered by search text, state and promoter.
    pub async fn get_referrals(&self, args: ListReferralsArgs) -> String {
        info!(
            target: targets::COMMANDS,
            search = %args.search,
            state = %args.state,
            "Getting referrals"
        );
        respond(self.list_referrals(&args).await)
    }

    async fn list_referrals(&self, args: &ListReferralsArgs) -> Result<String> {
        let paging = Paging::parse(&args.page, &args.per_page)?;
        let query = QueryParams::paged(paging.page, paging.per_page)
            .search(optional(&args.search))
            .filter("state", optional(&args.state))
            .filter("promoter_id", optional(&args.promoter_id));

        let page = Page::extract(self.http_client.get("referrals", Some(&query)).await?);
        if page.is_empty() {
            return Ok("📋 No referrals found".to_string());
        }

        let referrals: Vec<Referral> = page.decode();
        Ok(render_list(
            format!("📋 Found {} referrals:", referrals.len()),
            &referrals,
            format_referral,
        ))
    }

    /// Full detail of one referral.
    pub async fn get_referral(&self, args: ReferralIdArgs) -> String {
        info!(target: targets::COMMANDS, referral_id = %args.referral_id, "Getting referral");
        respond(self.referral_detail(&args).await)
    }

    async fn referral_detail(&self, args: &ReferralIdArgs) -> Result<String> {
        let id = record_id("referral_id", &args.referral_id)?;
        let body = self.http_client.get(&format!("referrals/{id}"), None).await?;

        let referral: Referral = decode_record(&body);
        let promoter_campaign = referral.promoter_campaign();
        let promoter = promoter_campaign.promoter();
        let campaign = promoter_campaign.campaign();

        Ok(format!(
            "📋 Referral Details:\n\
             - ID: {}\n\
             - Email: {}\n\
             - UID: {}\n\
             - State: {}\n\
             - Fraud Check: {}\n\
             - Created: {}\n\
             - Promoter: {} ({})\n\
             - Campaign: {}",
            referral.id.unwrap_or(id),
            or_na(referral.email.as_deref()),
            or_na(referral.uid.as_deref()),
            or_na(referral.state.as_deref()),
            or_na(referral.fraud_check.as_deref()),
            or_na(referral.created_at.as_deref()),
            or_na(promoter.name.as_deref()),
            or_na(promoter.email.as_deref()),
            or_na(campaign.name.as_deref()),
        ))
    }
}
