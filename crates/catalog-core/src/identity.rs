//! Layer 1: Identity atoms
//!
//! LocationId: a selling location
//! CategoryId, TaxId, ModifierListId, ImageId: catalog references
//! CatalogObjectId: item and variation identity

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidId};

/// Trims `raw` and rejects empty values or values with inner whitespace or
/// control characters.
fn validate_id(raw: String, make: fn(String, String) -> InvalidId) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(make(raw, "empty".into()).into());
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(make(raw, "contains whitespace or control characters".into()).into());
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_string())
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident => $variant:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: impl Into<String>) -> Result<Self, CoreError> {
                validate_id(raw.into(), |raw, reason| InvalidId::$variant { raw, reason })
                    .map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:?})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                $name::parse(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            fn try_from(s: &str) -> Result<Self, Self::Error> {
                $name::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

catalog_id! {
    /// A selling location known to the merchant account.
    LocationId => Location
}

catalog_id! {
    /// A catalog category.
    CategoryId => Category
}

catalog_id! {
    TaxId => Tax
}

catalog_id! {
    ModifierListId => ModifierList
}

catalog_id! {
    ImageId => Image
}

catalog_id! {
    /// Server-assigned identity of an item or a variation.
    ///
    /// Records that were never saved carry no id at all rather than a
    /// placeholder.
    CatalogObjectId => CatalogObject
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let id = LocationId::parse("  L1 ").unwrap();
        assert_eq!(id.as_str(), "L1");
    }

    #[test]
    fn parse_rejects_blank_and_inner_whitespace() {
        assert!(LocationId::parse("").is_err());
        assert!(LocationId::parse("   ").is_err());
        let err = CategoryId::parse("a b").unwrap_err();
        assert!(err.to_string().contains("category id"));
        assert!(TaxId::parse("tax\n1").is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let id: CatalogObjectId = serde_json::from_str("\"ITEM_1\"").unwrap();
        assert_eq!(id.as_str(), "ITEM_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ITEM_1\"");

        let err = serde_json::from_str::<CatalogObjectId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn debug_names_the_kind() {
        let id = ModifierListId::parse("M1").unwrap();
        assert_eq!(format!("{id:?}"), "ModifierListId(\"M1\")");
    }
}
