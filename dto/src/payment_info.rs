use crate::application::MembershipApplication;
use crate::total::Total;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where the transfers have to be sent.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct BankDetails {
    account_holder: String,
    iban: String,
    bic: String,
}

impl BankDetails {
    pub fn new(account_holder: String, iban: String, bic: String) -> Self {
        Self {
            account_holder,
            iban,
            bic,
        }
    }
}

/// Everything a member needs to pay for their application by bank transfer.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct PaymentInfo {
    application: MembershipApplication,
    firstname: Option<String>,
    lastname: Option<String>,
    membership_year: i32,
    total: Total,
    reference: String,
    bank_details: BankDetails,
}

impl PaymentInfo {
    pub fn new(
        application: MembershipApplication,
        firstname: Option<String>,
        lastname: Option<String>,
        membership_year: i32,
        total: Total,
        reference: String,
        bank_details: BankDetails,
    ) -> Self {
        Self {
            application,
            firstname,
            lastname,
            membership_year,
            total,
            reference,
            bank_details,
        }
    }
}
