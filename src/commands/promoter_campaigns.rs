use tracing::info;

use super::params::{optional, record_id, Paging};
use super::{
    respond, FirstPromoterClient, ListPromoterCampaignsArgs, PromoterCampaignIdArgs,
    UpdatePromoterCampaign, UpdatePromoterCampaignArgs,
};
use crate::{
    format::{format_promoter_campaign, or_na, render_list},
    logging::targets,
    prelude::*,
    req::QueryParams,
    response::Page,
    types::{decode_record, PromoterCampaign},
    Error,
};

impl FirstPromoterClient {
    /// List promoter campaigns, optionally filtered by promoter and campaign.
    pub async fn get_promoter_campaigns(&self, args: ListPromoterCampaignsArgs) -> String {
        info!(
            target: targets::COMMANDS,
            promoter_id = %args.promoter_id,
            campaign_id = %args.campaign_id,
            "Getting promoter campaigns"
        );
        respond(self.list_promoter_campaigns(&args).await)
    }

    async fn list_promoter_campaigns(&self, args: &ListPromoterCampaignsArgs) -> Result<String> {
        let paging = Paging::parse(&args.page, &args.per_page)?;
        let query = QueryParams::paged(paging.page, paging.per_page)
            .filter("promoter_id", optional(&args.promoter_id))
            .filter("campaign_id", optional(&args.campaign_id));

        let page = Page::extract(
            self.http_client
                .get("promoter_campaigns", Some(&query))
                .await?,
        );
        if page.is_empty() {
            return Ok("🎯 No promoter campaigns found".to_string());
        }

        let memberships: Vec<PromoterCampaign> = page.decode();
        Ok(render_list(
            format!("🎯 Found {} promoter campaigns:", memberships.len()),
            &memberships,
            format_promoter_campaign,
        ))
    }

    /// Detail of one promoter campaign.
    pub async fn get_promoter_campaign(&self, args: PromoterCampaignIdArgs) -> String {
        info!(
            target: targets::COMMANDS,
            promoter_campaign_id = %args.promoter_campaign_id,
            "Getting promoter campaign"
        );
        respond(self.promoter_campaign_detail(&args).await)
    }

    async fn promoter_campaign_detail(&self, args: &PromoterCampaignIdArgs) -> Result<String> {
        let id = record_id("promoter_campaign_id", &args.promoter_campaign_id)?;
        let body = self
            .http_client
            .get(&format!("promoter_campaigns/{id}"), None)
            .await?;

        let pc: PromoterCampaign = decode_record(&body);
        let promoter = pc.promoter();
        let campaign = pc.campaign();
        Ok(format!(
            "🎯 Promoter Campaign Details:\n\
             - ID: {}\n\
             - Promoter: {} ({})\n\
             - Campaign: {}\n\
             - Ref Token: {}\n\
             - Ref Link: {}\n\
             - Coupon: {}",
            pc.id.unwrap_or(id),
            or_na(promoter.name.as_deref()),
            or_na(promoter.email.as_deref()),
            or_na(campaign.name.as_deref()),
            or_na(pc.ref_token.as_deref()),
            or_na(pc.ref_link.as_deref()),
            or_na(pc.coupon.as_deref()),
        ))
    }

    /// Change the referral token or coupon code of a promoter campaign.
    pub async fn update_promoter_campaign(&self, args: UpdatePromoterCampaignArgs) -> String {
        info!(
            target: targets::COMMANDS,
            promoter_campaign_id = %args.promoter_campaign_id,
            "Updating promoter campaign"
        );
        respond(self.update_promoter_campaign_inner(&args).await)
    }

    async fn update_promoter_campaign_inner(
        &self,
        args: &UpdatePromoterCampaignArgs,
    ) -> Result<String> {
        let id = record_id("promoter_campaign_id", &args.promoter_campaign_id)?;
        let body = UpdatePromoterCampaign {
            ref_token: optional(&args.ref_token).map(String::from),
            coupon: optional(&args.coupon).map(String::from),
        };
        if body.is_empty() {
            return Err(Error::NothingToUpdate(" (ref_token or coupon)"));
        }

        self.http_client
            .put(&format!("promoter_campaigns/{id}"), &body)
            .await?;
        Ok(format!("✅ Promoter campaign {id} updated successfully"))
    }
}
