use tracing::info;

use super::params::{id_list, optional, required, Paging};
use super::{respond, BulkIds, CommissionIdsArgs, FirstPromoterClient, ListCommissionsArgs};
use crate::{
    format::{format_commission, render_list},
    logging::targets,
    prelude::*,
    req::QueryParams,
    response::Page,
    types::Commission,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommissionDecision {
    Approve,
    Deny,
}

impl CommissionDecision {
    fn endpoint(self) -> &'static str {
        match self {
            CommissionDecision::Approve => "commissions/approve",
            CommissionDecision::Deny => "commissions/deny",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            CommissionDecision::Approve => "Approved",
            CommissionDecision::Deny => "Denied",
        }
    }
}

impl FirstPromoterClient {
    /// List commissions, optionally filtered by search text, status and promoter.
    pub async fn get_commissions(&self, args: ListCommissionsArgs) -> String {
        info!(target: targets::COMMANDS, status = %args.status, "Getting commissions");
        respond(self.list_commissions(&args).await)
    }

    async fn list_commissions(&self, args: &ListCommissionsArgs) -> Result<String> {
        let paging = Paging::parse(&args.page, &args.per_page)?;
        let query = QueryParams::paged(paging.page, paging.per_page)
            .search(optional(&args.search))
            .filter("status", optional(&args.status))
            .filter("promoter_id", optional(&args.promoter_id));

        let page = Page::extract(self.http_client.get("commissions", Some(&query)).await?);
        if page.is_empty() {
            return Ok("💰 No commissions found".to_string());
        }

        let commissions: Vec<Commission> = page.decode();
        Ok(render_list(
            format!("💰 Found {} commissions:", commissions.len()),
            &commissions,
            format_commission,
        ))
    }

    /// Approve pending commissions.
    pub async fn approve_commissions(&self, args: CommissionIdsArgs) -> String {
        self.decide_commissions(CommissionDecision::Approve, args)
            .await
    }

    /// Deny commissions.
    pub async fn deny_commissions(&self, args: CommissionIdsArgs) -> String {
        self.decide_commissions(CommissionDecision::Deny, args).await
    }

    async fn decide_commissions(
        &self,
        decision: CommissionDecision,
        args: CommissionIdsArgs,
    ) -> String {
        info!(
            target: targets::COMMANDS,
            decision = ?decision,
            commission_ids = %args.commission_ids,
            "Deciding commissions"
        );
        respond(self.decide_commissions_inner(decision, &args).await)
    }

    async fn decide_commissions_inner(
        &self,
        decision: CommissionDecision,
        args: &CommissionIdsArgs,
    ) -> Result<String> {
        let raw = required("commission_ids", &args.commission_ids)?;
        let ids = id_list("commission", raw)?;
        let total = ids.len();

        self.http_client
            .post(decision.endpoint(), &BulkIds::new(ids))
            .await?;
        Ok(format!("✅ {} {total} commission(s)", decision.past_tense()))
    }
}
