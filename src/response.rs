//! Response envelope resolution.
//!
//! Listing endpoints answer in one of two shapes: referrals, commissions and
//! payouts return a bare JSON array, while promoters and promoter campaigns
//! wrap the array as `{ "data": [...], "meta": {...} }`. The shape is
//! resolved here once so the command handlers only ever see a [`Page`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::types::decode_record;

/// The closed set of body shapes a listing endpoint may return.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    Wrapped {
        data: Vec<Value>,
        #[serde(default)]
        meta: Option<Map<String, Value>>,
    },
    Bare(Vec<Value>),
    /// Scalars, or objects without a `data` array; treated as no records
    Other(Value),
}

impl Envelope {
    pub fn resolve(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or(Envelope::Other(Value::Null))
    }

    pub fn into_page(self) -> Page {
        match self {
            Envelope::Wrapped { data, meta } => Page {
                records: data,
                meta: meta.unwrap_or_default(),
            },
            Envelope::Bare(records) => Page {
                records,
                meta: Map::new(),
            },
            Envelope::Other(_) => Page::default(),
        }
    }
}

/// Records of one upstream page plus whatever `meta` accompanied them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Value>,
    pub meta: Map<String, Value>,
}

impl Page {
    pub fn extract(body: Value) -> Self {
        Envelope::resolve(body).into_page()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decodes every record into its typed view.
    pub fn decode<T: DeserializeOwned + Default>(&self) -> Vec<T> {
        self.records.iter().map(decode_record).collect()
    }

    pub fn meta<T: DeserializeOwned + Default>(&self) -> T {
        decode_record(&Value::Object(self.meta.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PromoterListMeta, Referral};
    use serde_json::json;

    #[test]
    fn bare_array_has_empty_meta() {
        let page = Page::extract(json!([{ "email": "a@x.io" }, { "email": "b@x.io" }]));
        assert_eq!(page.len(), 2);
        assert!(page.meta.is_empty());
        let referrals: Vec<Referral> = page.decode();
        assert_eq!(referrals[1].email.as_deref(), Some("b@x.io"));
    }

    #[test]
    fn wrapped_envelope_carries_meta() {
        let page = Page::extract(json!({
            "data": [{ "id": 1 }, { "id": 2 }],
            "meta": { "pending_count": 3 }
        }));
        assert_eq!(page.len(), 2);
        let meta: PromoterListMeta = page.meta();
        assert_eq!(meta.pending_count, Some(3));
    }

    #[test]
    fn wrapped_without_meta() {
        let page = Page::extract(json!({ "data": [] }));
        assert!(page.is_empty());
        assert!(page.meta.is_empty());
        let meta: PromoterListMeta = page.meta();
        assert_eq!(meta.pending_count, None);
    }

    #[test]
    fn unexpected_shapes_are_empty() {
        assert!(Page::extract(json!({ "message": "ok" })).is_empty());
        assert!(Page::extract(json!({ "data": "nope" })).is_empty());
        assert!(Page::extract(json!(null)).is_empty());
        assert!(Page::extract(json!(42)).is_empty());
    }

    #[test]
    fn envelope_variants_resolve_once() {
        assert!(matches!(
            Envelope::resolve(json!({ "data": [] })),
            Envelope::Wrapped { .. }
        ));
        assert!(matches!(Envelope::resolve(json!([])), Envelope::Bare(_)));
        assert!(matches!(Envelope::resolve(json!("x")), Envelope::Other(_)));
    }
}
