//! Error types for Soul Reaper commands and catalog construction.

use thiserror::Error;

/// A command referenced something the catalog does not contain.
///
/// Upgrade ids come from a closed catalog, so this always points at a
/// caller bug rather than a player mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("upgrade not found: {0:?}")]
    NotFound(String),
}

/// A custom catalog broke one of the construction rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate upgrade id: {0:?}")]
    DuplicateId(&'static str),

    #[error("upgrade {0:?} must have a base price above zero")]
    InvalidBasePrice(&'static str),

    #[error("upgrade {0:?} must have a growth factor above one")]
    InvalidGrowth(&'static str),

    #[error("upgrade {0:?} must have a positive effect")]
    InvalidEffect(&'static str),

    #[error("catalog has no passive upgrade")]
    MissingPassive,

    #[error("catalog has more than one passive upgrade: {0:?} and {1:?}")]
    MultiplePassive(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let err = PurchaseError::NotFound("bogus".into());
        assert_eq!(err.to_string(), "upgrade not found: \"bogus\"");
    }

    #[test]
    fn multiple_passive_names_both() {
        let err = CatalogError::MultiplePassive("rift", "crypt");
        assert!(err.to_string().contains("\"rift\" and \"crypt\""));
    }
}
