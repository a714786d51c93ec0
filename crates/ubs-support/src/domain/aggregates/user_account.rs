//! User Account
//!
//! Platform users carry a boolean admin flag; credential storage and
//! verification live with the external authentication collaborator.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub is_admin: bool,
}

impl UserAccount {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }
}
