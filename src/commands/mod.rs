//! Command handlers, one per tool.
//!
//! Every handler runs the same single pass: log the call, convert the
//! string-typed arguments (failing fast without touching the network),
//! issue at most one upstream request, then render the payload. Handlers
//! are written against [`Result`](crate::prelude) and collapse to the tool's
//! string result exactly once, in [`respond`].
//!
//! # Submodules
//! - `args` - string-typed argument structs bound from tool invocations
//! - `actions` - typed JSON bodies for mutation endpoints
//! - `params` - boundary conversion (required fields, ids, id lists, paging)
//! - `referrals`, `promoters`, `promoter_campaigns`, `commissions`, `payouts` -
//!   handler implementations (impl FirstPromoterClient)

// Type definition modules
mod actions;
mod args;
pub(crate) mod params;

// Method implementation modules (impl FirstPromoterClient)
mod commissions;
mod payouts;
mod promoter_campaigns;
mod promoters;
mod referrals;

pub use actions::*;
pub use args::*;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{config::Credentials, logging::targets, prelude::*, req::HttpClient, BaseUrl};

/// Handler set bound to one upstream account.
///
/// Cheap to clone; holds no per-call state, so concurrent invocations are
/// fully independent.
#[derive(Debug, Clone)]
pub struct FirstPromoterClient {
    pub http_client: HttpClient,
}

impl FirstPromoterClient {
    pub fn new(credentials: Arc<Credentials>, base_url: Option<BaseUrl>) -> Self {
        Self {
            http_client: HttpClient::new(credentials, base_url.unwrap_or_default()),
        }
    }
}

/// Collapses a handler outcome into the tool's textual result.
pub(crate) fn respond(result: Result<String>) -> String {
    result.unwrap_or_else(|e| {
        if e.is_local() {
            debug!(target: targets::COMMANDS, error = %e, "Rejected before upstream call");
        } else {
            warn!(target: targets::COMMANDS, error = %e, "Tool call failed");
        }
        e.to_string()
    })
}
