use tracing::info;

use super::params::{optional, Paging};
use super::{respond, FirstPromoterClient, GroupedPayoutsArgs, ListPayoutsArgs, NoArgs};
use crate::{
    format::{count, format_payout, format_payout_group, render_list},
    logging::targets,
    prelude::*,
    req::QueryParams,
    response::Page,
    types::{decode_record, Cents, DuePayoutStats, Payout, PayoutStats, PromoterPayoutGroup},
};

impl FirstPromoterClient {
    /// List payouts, optionally filtered by status, promoter and payout method.
    pub async fn get_payouts(&self, args: ListPayoutsArgs) -> String {
        info!(target: targets::COMMANDS, status = %args.status, "Getting payouts");
        respond(self.list_payouts(&args).await)
    }

    async fn list_payouts(&self, args: &ListPayoutsArgs) -> Result<String> {
        let paging = Paging::parse(&args.page, &args.per_page)?;
        let query = QueryParams::paged(paging.page, paging.per_page)
            .filter("status", optional(&args.status))
            .filter("promoter_id", optional(&args.promoter_id))
            .filter("payout_method", optional(&args.payout_method));

        let page = Page::extract(self.http_client.get("payouts", Some(&query)).await?);
        if page.is_empty() {
            return Ok("💸 No payouts found".to_string());
        }

        let payouts: Vec<Payout> = page.decode();
        Ok(render_list(
            format!("💸 Found {} payouts:", payouts.len()),
            &payouts,
            format_payout,
        ))
    }

    /// Account-wide payout totals.
    pub async fn get_payout_stats(&self, _args: NoArgs) -> String {
        info!(target: targets::COMMANDS, "Getting payout stats");
        respond(self.payout_stats().await)
    }

    async fn payout_stats(&self) -> Result<String> {
        let stats: PayoutStats = decode_record(&self.http_client.get("payouts/stats", None).await?);
        Ok(format!(
            "📊 Payout Statistics:\n\
             - Total Pending: {}\n\
             - Total Completed: {}\n\
             - Total Processing: {}\n\
             - Pending Count: {}\n\
             - Completed Count: {}",
            Cents::or_zero(stats.pending_amount),
            Cents::or_zero(stats.completed_amount),
            Cents::or_zero(stats.processing_amount),
            count(stats.pending_count),
            count(stats.completed_count),
        ))
    }

    /// Totals for payouts currently due.
    pub async fn get_due_payout_stats(&self, _args: NoArgs) -> String {
        info!(target: targets::COMMANDS, "Getting due payout stats");
        respond(self.due_payout_stats().await)
    }

    async fn due_payout_stats(&self) -> Result<String> {
        let stats: DuePayoutStats =
            decode_record(&self.http_client.get("payouts/due_stats", None).await?);
        Ok(format!(
            "📊 Due Payout Statistics:\n\
             - Total Due: {}\n\
             - Due Count: {}\n\
             - Next Period Due: {}\n\
             - Overdue Amount: {}",
            Cents::or_zero(stats.total_amount),
            count(stats.total_count),
            Cents::or_zero(stats.next_period_amount),
            Cents::or_zero(stats.overdue_amount),
        ))
    }

    /// Payout totals grouped by promoter.
    pub async fn get_payouts_by_promoter(&self, args: GroupedPayoutsArgs) -> String {
        info!(
            target: targets::COMMANDS,
            status = %args.status,
            "Getting payouts grouped by promoter"
        );
        respond(self.grouped_payouts(&args).await)
    }

    async fn grouped_payouts(&self, args: &GroupedPayoutsArgs) -> Result<String> {
        let paging = Paging::parse(&args.page, &args.per_page)?;
        let query = QueryParams::paged(paging.page, paging.per_page)
            .filter("status", optional(&args.status));

        let page = Page::extract(
            self.http_client
                .get("payouts/grouped_by_promoters", Some(&query))
                .await?,
        );
        if page.is_empty() {
            return Ok("💸 No grouped payouts found".to_string());
        }

        let groups: Vec<PromoterPayoutGroup> = page.decode();
        Ok(render_list(
            "💸 Payouts by Promoter:",
            &groups,
            format_payout_group,
        ))
    }
}
