//! Request bodies for mutation endpoints.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePromoter {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip_email_notification: bool,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePromoter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_id: Option<String>,
}

impl UpdatePromoter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body shared by every bulk promoter/commission action.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkIds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<u64>,
    pub ids: Vec<u64>,
}

impl BulkIds {
    pub fn new(ids: Vec<u64>) -> Self {
        Self {
            campaign_id: None,
            ids,
        }
    }

    pub fn with_campaign(mut self, campaign_id: Option<u64>) -> Self {
        self.campaign_id = campaign_id;
        self
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePromoterCampaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
}

impl UpdatePromoterCampaign {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_promoter_omits_blank_fields() {
        let body = CreatePromoter {
            email: "a@b.co".to_string(),
            campaign_id: Some(3),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "email": "a@b.co", "campaign_id": 3 })
        );

        let body = CreatePromoter {
            skip_email_notification: true,
            ..body
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap()["skip_email_notification"],
            json!(true)
        );
    }

    #[test]
    fn bulk_ids_shape() {
        let body = BulkIds::new(vec![1, 2]).with_campaign(Some(9));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "campaign_id": 9, "ids": [1, 2] })
        );
        assert_eq!(
            serde_json::to_value(BulkIds::new(vec![5])).unwrap(),
            json!({ "ids": [5] })
        );
    }
}
