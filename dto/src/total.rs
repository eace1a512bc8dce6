use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Amounts to pay for a membership and its optional licence.
/// `incomplete_catalog` is raised when a price was missing and counted as zero.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct Total {
    membership_amount: f64,
    license_amount: f64,
    total: f64,
    incomplete_catalog: bool,
}

impl Total {
    pub fn new(membership_amount: f64, license_amount: f64, incomplete_catalog: bool) -> Self {
        Self {
            membership_amount,
            license_amount,
            total: membership_amount + license_amount,
            incomplete_catalog,
        }
    }
}
