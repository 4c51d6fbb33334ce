//! Promoter tools: listing, detail, create/update and the bulk state
//! transitions.

use std::fmt::Write as _;

use tracing::info;

use super::params::{flag, id_list, optional, optional_id, record_id, required, Paging};
use super::{
    respond, AcceptPromotersArgs, BulkIds, CampaignAssignmentArgs, CreatePromoter,
    CreatePromoterArgs, FirstPromoterClient, ListPromotersArgs, PromoterIdArgs, PromoterIdsArgs,
    UpdatePromoter, UpdatePromoterArgs,
};
use crate::{
    format::{count, format_promoter, id_or_na, or_na, render_list},
    logging::targets,
    prelude::*,
    req::QueryParams,
    response::Page,
    types::{decode_record, BatchStatus, Promoter, PromoterListMeta},
    Error,
};

/// Bulk transitions that take only a promoter id list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PromoterTransition {
    Reject,
    Block,
    Archive,
    Restore,
}

impl PromoterTransition {
    fn endpoint(self) -> &'static str {
        match self {
            PromoterTransition::Reject => "promoters/reject",
            PromoterTransition::Block => "promoters/block",
            PromoterTransition::Archive => "promoters/archive",
            PromoterTransition::Restore => "promoters/restore",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            PromoterTransition::Reject => "Rejected",
            PromoterTransition::Block => "Blocked",
            PromoterTransition::Archive => "Archived",
            PromoterTransition::Restore => "Restored",
        }
    }
}

/// Campaign membership changes for a set of promoters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CampaignAssignment {
    Add,
    Move,
}

impl CampaignAssignment {
    fn endpoint(self) -> &'static str {
        match self {
            CampaignAssignment::Add => "promoters/add_to_campaign",
            CampaignAssignment::Move => "promoters/move_to_campaign",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            CampaignAssignment::Add => "Added",
            CampaignAssignment::Move => "Moved",
        }
    }
}

impl FirstPromoterClient {
    /// List promoters, optionally filtered by search text, state and campaign.
    pub async fn get_promoters(&self, args: ListPromotersArgs) -> String {
        info!(
            target: targets::COMMANDS,
            search = %args.search,
            state = %args.state,
            "Getting promoters"
        );
        respond(self.list_promoters(&args).await)
    }

    async fn list_promoters(&self, args: &ListPromotersArgs) -> Result<String> {
        let paging = Paging::parse(&args.page, &args.per_page)?;
        let query = QueryParams::paged(paging.page, paging.per_page)
            .search(optional(&args.search))
            .filter("state", optional(&args.state))
            .filter("campaign_id", optional(&args.campaign_id));

        let page = Page::extract(self.http_client.get("promoters", Some(&query)).await?);
        if page.is_empty() {
            return Ok("👥 No promoters found".to_string());
        }

        let meta: PromoterListMeta = page.meta();
        let promoters: Vec<Promoter> = page.decode();
        Ok(render_list(
            format!(
                "👥 Found {} promoters (Pending: {}):",
                promoters.len(),
                count(meta.pending_count)
            ),
            &promoters,
            format_promoter,
        ))
    }

    /// Full detail of one promoter, including stats and campaign memberships.
    pub async fn get_promoter(&self, args: PromoterIdArgs) -> String {
        info!(target: targets::COMMANDS, promoter_id = %args.promoter_id, "Getting promoter");
        respond(self.promoter_detail(&args).await)
    }

    async fn promoter_detail(&self, args: &PromoterIdArgs) -> Result<String> {
        let id = record_id("promoter_id", &args.promoter_id)?;
        let body = self.http_client.get(&format!("promoters/{id}"), None).await?;

        let promoter: Promoter = decode_record(&body);
        let stats = promoter.stats();

        let mut output = format!(
            "👤 Promoter Details:\n\
             - ID: {}\n\
             - Name: {}\n\
             - Email: {}\n\
             - State: {}\n\
             - Customer ID: {}\n\
             - Joined: {}\n\
             - Last Login: {}\n\
             \n\
             📊 Stats:\n\
             - Clicks: {}\n\
             - Referrals: {}\n\
             - Sales: {}\n\
             - Revenue: {}\n\
             - Active Customers: {}",
            promoter.id.unwrap_or(id),
            or_na(promoter.name.as_deref()),
            or_na(promoter.email.as_deref()),
            or_na(promoter.state.as_deref()),
            or_na(promoter.cust_id.as_deref()),
            or_na(promoter.joined_at.as_deref()),
            or_na(promoter.last_login_at.as_deref()),
            count(stats.clicks_count),
            count(stats.referrals_count),
            count(stats.sales_count),
            stats.revenue(),
            count(stats.active_customers_count),
        );

        let campaigns = promoter.campaigns();
        if !campaigns.is_empty() {
            output.push_str("\n\n🎯 Campaigns:");
            for pc in campaigns {
                // Writing to a String cannot fail
                let _ = write!(
                    output,
                    "\n- {} (Ref: {})",
                    or_na(pc.campaign().name.as_deref()),
                    or_na(pc.ref_token.as_deref())
                );
            }
        }

        Ok(output)
    }

    /// Create a promoter. Only `email` is required.
    pub async fn create_promoter(&self, args: CreatePromoterArgs) -> String {
        info!(target: targets::COMMANDS, email = %args.email, "Creating promoter");
        respond(self.create_promoter_inner(&args).await)
    }

    async fn create_promoter_inner(&self, args: &CreatePromoterArgs) -> Result<String> {
        let email = required("email", &args.email)?;
        let body = CreatePromoter {
            email: email.to_string(),
            first_name: optional(&args.first_name).map(String::from),
            last_name: optional(&args.last_name).map(String::from),
            campaign_id: optional_id("campaign_id", &args.campaign_id)?,
            cust_id: optional(&args.cust_id).map(String::from),
            skip_email_notification: flag(&args.skip_email),
        };

        let created: Promoter = decode_record(&self.http_client.post("promoters", &body).await?);
        Ok(format!(
            "✅ Promoter created successfully:\n\
             - ID: {}\n\
             - Email: {}\n\
             - State: {}\n\
             - Ref Link: {}",
            id_or_na(created.id),
            or_na(created.email.as_deref()),
            or_na(created.state.as_deref()),
            or_na(created.first_ref_link()),
        ))
    }

    /// Update name, note or customer id of a promoter.
    pub async fn update_promoter(&self, args: UpdatePromoterArgs) -> String {
        info!(target: targets::COMMANDS, promoter_id = %args.promoter_id, "Updating promoter");
        respond(self.update_promoter_inner(&args).await)
    }

    async fn update_promoter_inner(&self, args: &UpdatePromoterArgs) -> Result<String> {
        let id = record_id("promoter_id", &args.promoter_id)?;
        let body = UpdatePromoter {
            first_name: optional(&args.first_name).map(String::from),
            last_name: optional(&args.last_name).map(String::from),
            note: optional(&args.note).map(String::from),
            cust_id: optional(&args.cust_id).map(String::from),
        };
        if body.is_empty() {
            return Err(Error::NothingToUpdate(""));
        }

        self.http_client
            .put(&format!("promoters/{id}"), &body)
            .await?;
        Ok(format!("✅ Promoter {id} updated successfully"))
    }

    /// Add promoters to a campaign.
    pub async fn add_promoters_to_campaign(&self, args: CampaignAssignmentArgs) -> String {
        info!(
            target: targets::COMMANDS,
            campaign_id = %args.campaign_id,
            "Adding promoters to campaign"
        );
        respond(self.assign_campaign(CampaignAssignment::Add, &args).await)
    }

    /// Move promoters from their current campaign to another.
    pub async fn move_promoters_to_campaign(&self, args: CampaignAssignmentArgs) -> String {
        info!(
            target: targets::COMMANDS,
            campaign_id = %args.campaign_id,
            "Moving promoters to campaign"
        );
        respond(self.assign_campaign(CampaignAssignment::Move, &args).await)
    }

    async fn assign_campaign(
        &self,
        assignment: CampaignAssignment,
        args: &CampaignAssignmentArgs,
    ) -> Result<String> {
        if optional(&args.campaign_id).is_none() || optional(&args.promoter_ids).is_none() {
            return Err(Error::RequiredPair("campaign_id", "promoter_ids"));
        }
        let ids = id_list("promoter", &args.promoter_ids)?;
        let campaign_id = record_id("campaign_id", &args.campaign_id)?;
        let total = ids.len();

        let body = BulkIds::new(ids).with_campaign(Some(campaign_id));
        self.http_client.post(assignment.endpoint(), &body).await?;

        Ok(format!(
            "✅ {} {total} promoter(s) to campaign {campaign_id}",
            assignment.past_tense()
        ))
    }

    /// Accept pending promoters, optionally into a specific campaign.
    pub async fn accept_promoters(&self, args: AcceptPromotersArgs) -> String {
        info!(
            target: targets::COMMANDS,
            promoter_ids = %args.promoter_ids,
            "Accepting promoters"
        );
        respond(self.accept_promoters_inner(&args).await)
    }

    async fn accept_promoters_inner(&self, args: &AcceptPromotersArgs) -> Result<String> {
        let raw = required("promoter_ids", &args.promoter_ids)?;
        let ids = id_list("promoter", raw)?;
        let campaign_id = optional_id("campaign_id", &args.campaign_id)?;
        let requested = ids.len() as u64;

        let body = BulkIds::new(ids).with_campaign(campaign_id);
        let reply = self.http_client.post("promoters/accept", &body).await?;

        let batch: BatchStatus = decode_record(&reply);
        Ok(format!(
            "✅ Accept request submitted - Status: {}, Total: {}",
            batch.status.as_deref().unwrap_or("unknown"),
            batch.total.unwrap_or(requested)
        ))
    }

    /// Reject pending promoters.
    pub async fn reject_promoters(&self, args: PromoterIdsArgs) -> String {
        self.transition_promoters(PromoterTransition::Reject, args)
            .await
    }

    /// Block promoters.
    pub async fn block_promoters(&self, args: PromoterIdsArgs) -> String {
        self.transition_promoters(PromoterTransition::Block, args)
            .await
    }

    /// Archive promoters.
    pub async fn archive_promoters(&self, args: PromoterIdsArgs) -> String {
        self.transition_promoters(PromoterTransition::Archive, args)
            .await
    }

    /// Restore archived promoters.
    pub async fn restore_promoters(&self, args: PromoterIdsArgs) -> String {
        self.transition_promoters(PromoterTransition::Restore, args)
            .await
    }

    async fn transition_promoters(
        &self,
        transition: PromoterTransition,
        args: PromoterIdsArgs,
    ) -> String {
        info!(
            target: targets::COMMANDS,
            transition = ?transition,
            promoter_ids = %args.promoter_ids,
            "Transitioning promoters"
        );
        respond(self.transition_promoters_inner(transition, &args).await)
    }

    async fn transition_promoters_inner(
        &self,
        transition: PromoterTransition,
        args: &PromoterIdsArgs,
    ) -> Result<String> {
        let raw = required("promoter_ids", &args.promoter_ids)?;
        let ids = id_list("promoter", raw)?;
        let total = ids.len();

        self.http_client
            .post(transition.endpoint(), &BulkIds::new(ids))
            .await?;
        Ok(format!(
            "✅ {} {total} promoter(s)",
            transition.past_tense()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_map_to_endpoints() {
        assert_eq!(PromoterTransition::Archive.endpoint(), "promoters/archive");
        assert_eq!(PromoterTransition::Restore.past_tense(), "Restored");
        assert_eq!(
            CampaignAssignment::Move.endpoint(),
            "promoters/move_to_campaign"
        );
    }
}
