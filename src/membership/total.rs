use crate::membership::catalog::lookup;
use dto::license_type::LicenseType;
use dto::membership_type::MembershipType;
use dto::price::{Price, PriceType};
use dto::total::Total;

/// Sum up the membership price and the licence price.
/// A missing price counts as zero and marks the total as computed from an incomplete catalog.
pub fn compute_total(
    membership_type: MembershipType,
    license_type: LicenseType,
    prices: &[Price],
) -> Total {
    let mut incomplete_catalog = false;

    let membership_amount = match lookup(prices, PriceType::Membership, membership_type.code()) {
        Some(amount) => amount,
        None => {
            warn!("No price found for membership [type: {membership_type}]");
            incomplete_catalog = true;
            0.0
        }
    };

    let license_amount = if license_type.is_requested() {
        match lookup(prices, PriceType::License, license_type.code()) {
            Some(amount) => amount,
            None => {
                warn!("No price found for licence [type: {license_type}]");
                incomplete_catalog = true;
                0.0
            }
        }
    } else {
        0.0
    };

    Total::new(membership_amount, license_amount, incomplete_catalog)
}
