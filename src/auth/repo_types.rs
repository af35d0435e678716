use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Public profile stored alongside each user and returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub company: String,
}

/// User record in the store.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub password: String, // plaintext, compared verbatim on login
    pub profile: Profile,
}

impl UserRecord {
    pub fn email(&self) -> &str {
        &self.profile.email
    }
}
