//! Layer 2: Domain values
//!
//! PricingType: fixed, variable
//! TrackingMode: untracked, stock_count
//! Money: minor-unit amount + ISO currency
//! InventoryAlert: none, low quantity threshold

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidEnum, InvalidMoney};

/// How a variation is priced at checkout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PricingType {
    #[default]
    Fixed,
    /// Price is entered at the register.
    Variable,
}

crate::enum_str! {
    impl PricingType {
        pub fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Fixed => ["FIXED_PRICING", "fixed"],
            Variable => ["VARIABLE_PRICING", "variable"],
        }
    }
}

impl PricingType {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::parse_str(raw).ok_or_else(|| {
            InvalidEnum {
                kind: "pricing type",
                raw: raw.to_string(),
            }
            .into()
        })
    }
}

/// Per-location inventory tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    #[default]
    Untracked,
    StockCount,
}

crate::enum_str! {
    impl TrackingMode {
        pub fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Untracked => ["untracked", "none"],
            StockCount => ["stock_count", "stock-count", "tracked"],
        }
    }
}

impl TrackingMode {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::parse_str(raw).ok_or_else(|| {
            InvalidEnum {
                kind: "tracking mode",
                raw: raw.to_string(),
            }
            .into()
        })
    }

    pub fn from_flag(track_inventory: bool) -> Self {
        if track_inventory {
            Self::StockCount
        } else {
            Self::Untracked
        }
    }

    pub fn is_tracking(self) -> bool {
        matches!(self, Self::StockCount)
    }
}

impl FromStr for TrackingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackingMode::parse(s)
    }
}

/// ISO 4217 currency code, upper case.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    pub const USD: Currency = Currency(*b"USD");

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let code = raw.trim();
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(InvalidMoney {
                raw: raw.to_string(),
                reason: "currency must be three ASCII letters".into(),
            }
            .into());
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::USD
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.as_str())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Currency {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Currency::parse(&s)
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> String {
        c.as_str().to_string()
    }
}

/// An amount in the currency's smallest unit (cents for USD).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn usd(amount: i64) -> Self {
        Self::new(amount, Currency::USD)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / 100, abs % 100, self.currency)
    }
}

/// Low-stock alert configured for one location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InventoryAlert {
    #[default]
    None,
    LowQuantity {
        threshold: i64,
    },
}

impl InventoryAlert {
    pub fn threshold(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::LowQuantity { threshold } => Some(*threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_type_accepts_wire_and_short_spellings() {
        assert_eq!(
            PricingType::parse("FIXED_PRICING").unwrap(),
            PricingType::Fixed
        );
        assert_eq!(
            PricingType::parse("variable").unwrap(),
            PricingType::Variable
        );
        assert_eq!(PricingType::Variable.as_str(), "VARIABLE_PRICING");
        let err = PricingType::parse("free").unwrap_err();
        assert!(err.to_string().contains("pricing type"));
    }

    #[test]
    fn tracking_mode_mirrors_flag() {
        assert_eq!(TrackingMode::from_flag(true), TrackingMode::StockCount);
        assert_eq!(TrackingMode::from_flag(false), TrackingMode::Untracked);
        assert!(TrackingMode::StockCount.is_tracking());
        assert_eq!(
            "stock-count".parse::<TrackingMode>().unwrap(),
            TrackingMode::StockCount
        );
    }

    #[test]
    fn currency_normalizes_case() {
        let c = Currency::parse(" cad ").unwrap();
        assert_eq!(c.as_str(), "CAD");
        assert!(Currency::parse("US").is_err());
        assert!(Currency::parse("U$D").is_err());
    }

    #[test]
    fn money_displays_minor_units() {
        assert_eq!(Money::usd(1250).to_string(), "12.50 USD");
        assert_eq!(Money::usd(-5).to_string(), "-0.05 USD");
        assert!(!Money::usd(0).is_positive());
    }
}
