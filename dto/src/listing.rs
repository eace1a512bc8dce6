use crate::application::MembershipApplication;
use crate::payment::PaymentStatus;
use crate::profile::{PersonalInfo, Role};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An application as displayed on the administration dashboard.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct ApplicationOverview {
    application: MembershipApplication,
    email: String,
    role: Role,
    personal_info: PersonalInfo,
    membership_year: i32,
    payment: Option<PaymentStatus>,
}

impl ApplicationOverview {
    pub fn new(
        application: MembershipApplication,
        email: String,
        role: Role,
        personal_info: PersonalInfo,
        membership_year: i32,
        payment: Option<PaymentStatus>,
    ) -> Self {
        Self {
            application,
            email,
            role,
            personal_info,
            membership_year,
            payment,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.payment
            .as_ref()
            .is_some_and(|payment| payment.is_complete(self.application.license_type().is_requested()))
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct ApplicationStats {
    total: usize,
    per_membership_type: BTreeMap<String, usize>,
}

impl ApplicationStats {
    pub fn new(total: usize, per_membership_type: BTreeMap<String, usize>) -> Self {
        Self {
            total,
            per_membership_type,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct ApplicationListing {
    applications: Vec<ApplicationOverview>,
    stats: ApplicationStats,
}

impl ApplicationListing {
    pub fn new(applications: Vec<ApplicationOverview>, stats: ApplicationStats) -> Self {
        Self {
            applications,
            stats,
        }
    }
}
