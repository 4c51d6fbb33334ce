//! Typed views of the upstream records.
//!
//! Only the fields the tools render are modelled. Every field is optional
//! and decoded leniently so a sparse or oddly-typed record still renders
//! with placeholders instead of failing the whole listing.

mod common;
mod commissions;
mod payouts;
mod promoters;
mod referrals;

pub use common::*;
pub use commissions::*;
pub use payouts::*;
pub use promoters::*;
pub use referrals::*;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decodes one record, falling back to an all-absent record if the shape is
/// unusable (e.g. a bare string where an object is expected).
pub fn decode_record<T: DeserializeOwned + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_else(|e| {
        warn!(
            error = %e,
            record = std::any::type_name::<T>(),
            "Undecodable record, rendering placeholders"
        );
        T::default()
    })
}
