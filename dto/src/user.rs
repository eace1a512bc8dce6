use crate::profile::Role;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A line of the user management screen.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct UserSummary {
    id: String,
    email: String,
    role: Role,
    firstname: Option<String>,
    lastname: Option<String>,
    has_membership_application: bool,
}

impl UserSummary {
    pub fn new(
        id: String,
        email: String,
        role: Role,
        firstname: Option<String>,
        lastname: Option<String>,
        has_membership_application: bool,
    ) -> Self {
        Self {
            id,
            email,
            role,
            firstname,
            lastname,
            has_membership_application,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct RoleUpdate {
    role: Role,
}

impl RoleUpdate {
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct EmailUpdate {
    email: String,
}

impl EmailUpdate {
    pub fn new(email: String) -> Self {
        Self { email }
    }
}

#[derive(Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct PasswordUpdate {
    password: String,
}

impl PasswordUpdate {
    pub fn new(password: String) -> Self {
        Self { password }
    }
}

impl std::fmt::Debug for PasswordUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordUpdate { password: \"********\" }")
    }
}
