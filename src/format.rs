//! Text rendering for tool results.
//!
//! Each formatter renders one record to one bullet line. Absent text renders
//! as `N/A`, absent counts and amounts as `0`.

use std::fmt::Display;

use crate::consts::{DISPLAY_LIMIT, NOT_AVAILABLE};
use crate::types::{
    Cents, Commission, Payout, Promoter, PromoterCampaign, PromoterPayoutGroup, Referral,
};

pub(crate) fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

pub(crate) fn id_or_na(id: Option<u64>) -> String {
    id.map_or_else(|| NOT_AVAILABLE.to_string(), |id| id.to_string())
}

pub(crate) fn count(value: Option<u64>) -> u64 {
    value.unwrap_or(0)
}

pub fn format_promoter(p: &Promoter) -> String {
    let stats = p.stats();
    format!(
        "• {} ({}) - State: {}, Referrals: {}, Revenue: {}",
        or_na(p.name.as_deref()),
        or_na(p.email.as_deref()),
        or_na(p.state.as_deref()),
        count(stats.referrals_count),
        stats.revenue(),
    )
}

pub fn format_referral(r: &Referral) -> String {
    let promoter = r.promoter_campaign().promoter();
    format!(
        "• {} - State: {}, Promoter: {}",
        or_na(r.email.as_deref()),
        or_na(r.state.as_deref()),
        or_na(promoter.name.as_deref()),
    )
}

pub fn format_commission(c: &Commission) -> String {
    let promoter = c
        .promoter_campaign
        .as_ref()
        .map(PromoterCampaign::promoter)
        .unwrap_or_default();
    format!(
        "• {} ({}) - Status: {}, Promoter: {}",
        c.amount(),
        c.unit(),
        or_na(c.status.as_deref()),
        or_na(promoter.name.as_deref()),
    )
}

pub fn format_payout(p: &Payout) -> String {
    let promoter = p.promoter.clone().unwrap_or_default();
    format!(
        "• {} - Status: {}, Promoter: {}",
        p.amount(),
        or_na(p.status.as_deref()),
        or_na(promoter.name.as_deref()),
    )
}

pub fn format_promoter_campaign(pc: &PromoterCampaign) -> String {
    format!(
        "• {} in {} - Ref: {}",
        or_na(pc.promoter().name.as_deref()),
        or_na(pc.campaign().name.as_deref()),
        or_na(pc.ref_token.as_deref()),
    )
}

pub fn format_payout_group(group: &PromoterPayoutGroup) -> String {
    let promoter = group.promoter.clone().unwrap_or_default();
    format!(
        "• {} ({}): {}",
        or_na(promoter.name.as_deref()),
        or_na(promoter.email.as_deref()),
        Cents::or_zero(group.total_amount),
    )
}

/// Header line, the first [`DISPLAY_LIMIT`] records, and a `... and N more`
/// suffix when records were cut. Truncation is display-only; paging is
/// controlled upstream by `per_page`.
pub fn render_list<T>(header: impl Display, records: &[T], line: impl Fn(&T) -> String) -> String {
    let mut output = Vec::with_capacity(records.len().min(DISPLAY_LIMIT) + 2);
    output.push(header.to_string());
    output.extend(records.iter().take(DISPLAY_LIMIT).map(line));
    if records.len() > DISPLAY_LIMIT {
        output.push(format!("... and {} more", records.len() - DISPLAY_LIMIT));
    }
    output.join("\n")
}
