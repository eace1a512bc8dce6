use crate::error::UnknownCode;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    Membership,
    License,
}

impl PriceType {
    pub fn code(&self) -> &'static str {
        match self {
            PriceType::Membership => "MEMBERSHIP",
            PriceType::License => "LICENSE",
        }
    }
}

impl Display for PriceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PriceType {
    type Err = UnknownCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "MEMBERSHIP" => Ok(PriceType::Membership),
            "LICENSE" => Ok(PriceType::License),
            _ => Err(UnknownCode::new("price type", code)),
        }
    }
}

/// The amount to pay for a given membership or licence code during a membership year.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct Price {
    year: i32,
    #[serde(rename = "type")]
    price_type: PriceType,
    code: String,
    amount: f64,
}

impl Price {
    pub fn new(year: i32, price_type: PriceType, code: String, amount: f64) -> Self {
        Self {
            year,
            price_type,
            code,
            amount,
        }
    }
}

/// A price sent by an administrator. The year comes from the request path.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct PriceUpdate {
    #[serde(rename = "type")]
    price_type: PriceType,
    code: String,
    amount: f64,
}

impl PriceUpdate {
    pub fn new(price_type: PriceType, code: String, amount: f64) -> Self {
        Self {
            price_type,
            code,
            amount,
        }
    }
}

/// Identifies a catalog entry which has no price for a given year.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MissingPrice {
    #[serde(rename = "type")]
    price_type: PriceType,
    code: String,
}

impl MissingPrice {
    pub fn new(price_type: PriceType, code: String) -> Self {
        Self { price_type, code }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub const TEST_YEAR: i32 = 2026;

    /// The catalog published for 2025, before the prices were stored in database.
    pub fn get_test_prices(year: i32) -> Vec<Price> {
        vec![
            Price::new(year, PriceType::Membership, "GOLF".to_owned(), 70.0),
            Price::new(year, PriceType::Membership, "GOLF_LOISIR".to_owned(), 70.0),
            Price::new(year, PriceType::Membership, "GOLF_JEUNE".to_owned(), 35.0),
            Price::new(year, PriceType::License, "adult".to_owned(), 78.0),
            Price::new(year, PriceType::License, "young-adult".to_owned(), 54.0),
            Price::new(year, PriceType::License, "teen".to_owned(), 31.0),
            Price::new(year, PriceType::License, "child".to_owned(), 24.0),
        ]
    }

    pub fn get_test_price_updates() -> Vec<PriceUpdate> {
        get_test_prices(TEST_YEAR)
            .into_iter()
            .map(|price| PriceUpdate::new(price.price_type, price.code, price.amount))
            .collect()
    }

    #[test]
    fn should_parse_price_type() {
        assert_eq!(Ok(PriceType::Membership), PriceType::from_str("MEMBERSHIP"));
        assert_eq!(Ok(PriceType::License), PriceType::from_str("LICENSE"));
        assert!(PriceType::from_str("membership").is_err());
    }
}
