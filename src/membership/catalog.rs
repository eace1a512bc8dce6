use crate::database::dao;
use crate::error::Result;
use crate::membership::error::MembershipError;
use diesel::SqliteConnection;
use dto::license_type::LicenseType;
use dto::membership_type::MembershipType;
use dto::price::{MissingPrice, Price, PriceType, PriceUpdate};
use std::collections::HashSet;

/// Amount of the first price matching type and code, in list order.
pub fn lookup(prices: &[Price], price_type: PriceType, code: &str) -> Option<f64> {
    prices
        .iter()
        .find(|price| *price.price_type() == price_type && price.code() == code)
        .map(|price| *price.amount())
}

/// Like [lookup], but a missing price costs nothing.
pub fn price_for(prices: &[Price], price_type: PriceType, code: &str) -> f64 {
    lookup(prices, price_type, code).unwrap_or(0.0)
}

/// Duplicate the given prices into another year.
pub fn copy_forward(prices: &[Price], target_year: i32) -> Vec<Price> {
    prices
        .iter()
        .map(|price| {
            Price::new(
                target_year,
                *price.price_type(),
                price.code().clone(),
                *price.amount(),
            )
        })
        .collect()
}

/// Catalog entries which have no price.
/// Not requesting a licence is free, so it never needs a price.
pub fn missing_codes(prices: &[Price]) -> Vec<MissingPrice> {
    let membership_codes = MembershipType::ALL
        .iter()
        .map(|membership_type| (PriceType::Membership, membership_type.code()));
    let license_codes = LicenseType::ALL
        .iter()
        .filter(|license_type| license_type.is_requested())
        .map(|license_type| (PriceType::License, license_type.code()));

    membership_codes
        .chain(license_codes)
        .filter(|(price_type, code)| lookup(prices, *price_type, code).is_none())
        .map(|(price_type, code)| MissingPrice::new(price_type, code.to_owned()))
        .collect()
}

fn is_known_code(price_type: PriceType, code: &str) -> bool {
    match price_type {
        PriceType::Membership => code.parse::<MembershipType>().is_ok(),
        PriceType::License => code
            .parse::<LicenseType>()
            .is_ok_and(|license_type| license_type.is_requested()),
    }
}

/// Reject negative or non-finite amounts, unknown codes and prices given twice.
pub fn validate_updates(updates: &[PriceUpdate]) -> Result<(), MembershipError> {
    let mut seen = HashSet::new();
    for update in updates {
        let price_type = *update.price_type();
        let code = update.code();
        if !update.amount().is_finite() || *update.amount() < 0.0 {
            return Err(MembershipError::InvalidAmount {
                price_type,
                code: code.clone(),
                amount: *update.amount(),
            });
        }
        if !is_known_code(price_type, code) {
            return Err(MembershipError::UnknownPriceCode {
                price_type,
                code: code.clone(),
            });
        }
        if !seen.insert((price_type, code)) {
            return Err(MembershipError::DuplicatedPrice {
                price_type,
                code: code.clone(),
            });
        }
    }

    Ok(())
}

pub fn load_prices(connection: &mut SqliteConnection, year: i32) -> Result<Vec<Price>> {
    Ok(dao::price::retrieve_prices(connection, year)?)
}

/// Create or update the prices of a year, then return the whole catalog of that year.
pub fn save_prices(
    connection: &mut SqliteConnection,
    year: i32,
    updates: &[PriceUpdate],
) -> Result<Vec<Price>> {
    validate_updates(updates)?;
    let count = dao::price::upsert_prices(connection, year, updates)?;
    info!("Saved {count} price(s) [year: {year}]");

    load_prices(connection, year)
}

/// Copy the prices of a year into the following one.
/// The following year has to be empty, so that no price gets overwritten.
pub fn copy_prices_forward(
    connection: &mut SqliteConnection,
    source_year: i32,
) -> Result<Vec<Price>> {
    let target_year = source_year
        .checked_add(1)
        .ok_or(MembershipError::YearOutOfRange(source_year))?;
    connection.immediate_transaction(|connection| {
        if dao::price::count_prices(connection, target_year)? > 0 {
            return Err(MembershipError::TargetYearNotEmpty(target_year).into());
        }

        let source_prices = load_prices(connection, source_year)?;
        if source_prices.is_empty() {
            return Err(MembershipError::NothingToCopy(source_year).into());
        }

        let copied_prices = copy_forward(&source_prices, target_year);
        dao::price::insert_prices(connection, &copied_prices)?;
        info!("Copied {} price(s) from {source_year} to {target_year}", copied_prices.len());

        Ok(copied_prices)
    })
}
