//! Conversion of string-typed tool arguments into typed values.

use crate::consts::{DEFAULT_PAGE, DEFAULT_PER_PAGE};
use crate::{prelude::*, Error};

/// Trimmed value, or `None` when blank.
pub(crate) fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    optional(value).ok_or(Error::Required(field))
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn parse_numeric(token: &str) -> Option<u64> {
    if is_numeric(token) {
        token.parse().ok()
    } else {
        None
    }
}

/// Required single record id.
pub(crate) fn record_id(field: &'static str, value: &str) -> Result<u64> {
    let value = required(field, value)?;
    parse_numeric(value).ok_or(Error::InvalidId(field))
}

/// Optional single record id; blank is `None`, non-numeric is an error.
pub(crate) fn optional_id(field: &'static str, value: &str) -> Result<Option<u64>> {
    optional(value)
        .map(|v| parse_numeric(v).ok_or(Error::InvalidId(field)))
        .transpose()
}

/// Splits a comma-separated list, keeping only purely numeric tokens.
/// Non-numeric tokens are dropped without notice.
pub(crate) fn parse_id_list(value: &str) -> Vec<u64> {
    value
        .split(',')
        .filter_map(|token| parse_numeric(token.trim()))
        .collect()
}

/// [`parse_id_list`] that fails when nothing usable remains.
pub(crate) fn id_list(kind: &'static str, value: &str) -> Result<Vec<u64>> {
    let ids = parse_id_list(value);
    if ids.is_empty() {
        return Err(Error::NoValidIds(kind));
    }
    Ok(ids)
}

/// `"true"` in any case; everything else is false.
pub(crate) fn flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paging {
    pub(crate) page: u32,
    pub(crate) per_page: u32,
}

impl Paging {
    pub(crate) fn parse(page: &str, per_page: &str) -> Result<Self> {
        Ok(Self {
            page: positive("page", page, DEFAULT_PAGE)?,
            per_page: positive("per_page", per_page, DEFAULT_PER_PAGE)?,
        })
    }
}

fn positive(field: &'static str, value: &str, default: u32) -> Result<u32> {
    match optional(value) {
        None => Ok(default),
        Some(v) => v
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0 && is_numeric(v))
            .ok_or(Error::InvalidNumber(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_keeps_numeric_tokens_only() {
        assert_eq!(parse_id_list("12, abc, 7,, 3x"), vec![12, 7]);
        assert_eq!(parse_id_list(" 1 ,2,+3,-4, 5 "), vec![1, 2, 5]);
        assert!(parse_id_list("abc,xyz").is_empty());
        assert_eq!(
            id_list("promoter", "abc,xyz"),
            Err(Error::NoValidIds("promoter"))
        );
    }

    #[test]
    fn id_list_drops_overflowing_tokens() {
        assert_eq!(parse_id_list("99999999999999999999999,4"), vec![4]);
    }

    #[test]
    fn required_fields_are_trimmed() {
        assert_eq!(required("email", "  a@b.co "), Ok("a@b.co"));
        assert_eq!(required("email", "   "), Err(Error::Required("email")));
        assert_eq!(record_id("referral_id", ""), Err(Error::Required("referral_id")));
        assert_eq!(
            record_id("referral_id", "r-1"),
            Err(Error::InvalidId("referral_id"))
        );
        assert_eq!(record_id("referral_id", " 42 "), Ok(42));
    }

    #[test]
    fn optional_ids() {
        assert_eq!(optional_id("campaign_id", ""), Ok(None));
        assert_eq!(optional_id("campaign_id", "9"), Ok(Some(9)));
        assert_eq!(
            optional_id("campaign_id", "nine"),
            Err(Error::InvalidId("campaign_id"))
        );
    }

    #[test]
    fn flags() {
        assert!(flag("TRUE"));
        assert!(flag(" true"));
        assert!(!flag("yes"));
        assert!(!flag(""));
    }

    #[test]
    fn paging_defaults_and_validation() {
        assert_eq!(
            Paging::parse("", ""),
            Ok(Paging {
                page: 1,
                per_page: 20
            })
        );
        assert_eq!(
            Paging::parse("3", "50"),
            Ok(Paging {
                page: 3,
                per_page: 50
            })
        );
        assert_eq!(Paging::parse("0", ""), Err(Error::InvalidNumber("page")));
        assert_eq!(
            Paging::parse("1", "lots"),
            Err(Error::InvalidNumber("per_page"))
        );
    }
}
