use thiserror::Error;

/// Failure surfaced by a tool. `Display` is the exact text returned to the
/// caller, so every variant carries the failure glyph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // === Configuration ===
    /// A credential needed for upstream calls is unset or blank
    #[error("❌ {var} environment variable not set")]
    MissingCredential { var: &'static str },

    // === Validation ===
    /// Required parameter empty after trimming
    #[error("❌ {0} is required")]
    Required(&'static str),

    /// Two parameters that must both be present
    #[error("❌ {0} and {1} are required")]
    RequiredPair(&'static str, &'static str),

    /// Comma-separated id list with no numeric entries
    #[error("❌ No valid {0} IDs provided")]
    NoValidIds(&'static str),

    /// Single record id that is not a non-negative integer
    #[error("❌ {0} must be a numeric ID")]
    InvalidId(&'static str),

    /// Paging parameter that is not a positive integer
    #[error("❌ {0} must be a positive integer")]
    InvalidNumber(&'static str),

    /// Update call with every optional field blank
    #[error("❌ At least one field to update is required{0}")]
    NothingToUpdate(&'static str),

    // === Upstream ===
    /// Upstream answered with status >= 400
    #[error("❌ API Error {status}: {body}")]
    Api { status: u16, body: String },

    /// The call did not complete (timeout, connect, decode)
    #[error("❌ Request failed: {0}")]
    Request(String),
}

impl Error {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Error::Api {
            status,
            body: body.into(),
        }
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Error::Request(msg.into())
    }

    /// Configuration and validation errors are raised before any network call.
    pub fn is_local(&self) -> bool {
        !matches!(self, Error::Api { .. } | Error::Request(_))
    }
}

/// Failure to route a host invocation to a tool. These never reach a
/// handler and are reported through the transport's own error channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_tool_contract() {
        assert_eq!(Error::Required("email").to_string(), "❌ email is required");
        assert_eq!(
            Error::NoValidIds("promoter").to_string(),
            "❌ No valid promoter IDs provided"
        );
        assert_eq!(
            Error::RequiredPair("campaign_id", "promoter_ids").to_string(),
            "❌ campaign_id and promoter_ids are required"
        );
        assert_eq!(
            Error::MissingCredential {
                var: "FP_ACCOUNT_ID"
            }
            .to_string(),
            "❌ FP_ACCOUNT_ID environment variable not set"
        );
        assert_eq!(
            Error::NothingToUpdate(" (ref_token or coupon)").to_string(),
            "❌ At least one field to update is required (ref_token or coupon)"
        );
    }

    #[test]
    fn api_error_embeds_status_and_body() {
        let msg = Error::api(422, r#"{"error":"invalid"}"#).to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("invalid"));
        assert!(!Error::api(500, "").is_local());
        assert!(Error::Required("x").is_local());
    }
}
