use crate::consts::PRODUCTION_API_URL;

/// Upstream API root. Only `Production` is used in deployment; `Custom`
/// points the executor at a proxy or an in-process mock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaseUrl {
    #[default]
    Production,
    Custom(String),
}

impl BaseUrl {
    pub fn get_url(&self) -> String {
        match self {
            BaseUrl::Production => PRODUCTION_API_URL.to_string(),
            BaseUrl::Custom(url) => url.trim_end_matches('/').to_string(),
        }
    }

    /// Joins an endpoint such as `promoters/42` onto the root.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.get_url(), endpoint.trim_start_matches('/'))
    }
}
