use std::time::Duration;

pub const PRODUCTION_API_URL: &str = "https://api.firstpromoter.com/api/v2/company";

/// Total budget for one upstream call, connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Records rendered by list tools before the `... and N more` suffix.
pub const DISPLAY_LIMIT: usize = 20;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Placeholder for absent text fields.
pub const NOT_AVAILABLE: &str = "N/A";

pub const FAILURE_GLYPH: &str = "❌";
