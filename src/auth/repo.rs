use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::auth::repo_types::{Profile, Role, UserRecord};
use crate::errors::AuthError;

/// Storage for registered users, keyed by email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user unless the email is already taken.
    async fn insert(&self, record: UserRecord) -> Result<Profile, AuthError>;
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;
    async fn count(&self) -> usize;
    async fn list_emails(&self) -> BTreeSet<String>;
}

/// Process-lifetime user store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: DashMap<String, UserRecord>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the demo and admin accounts.
    pub fn seeded() -> Self {
        let repo = Self::new();
        for (password, profile) in demo_accounts() {
            repo.users.insert(
                profile.email.clone(),
                UserRecord {
                    password: password.to_string(),
                    profile,
                },
            );
        }
        repo
    }
}

fn demo_accounts() -> [(&'static str, Profile); 2] {
    [
        (
            "demo123",
            Profile {
                email: "demo@biasmeter.ai".into(),
                name: "Demo User".into(),
                role: Role::User,
                company: "Demo Corp".into(),
            },
        ),
        (
            "admin123",
            Profile {
                email: "admin@biasmeter.ai".into(),
                name: "Admin User".into(),
                role: Role::Admin,
                company: "BiasMeter AI".into(),
            },
        ),
    ]
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, record: UserRecord) -> Result<Profile, AuthError> {
        // entry() holds the shard lock, so check-and-insert is atomic
        match self.users.entry(record.email().to_string()) {
            Entry::Occupied(_) => Err(AuthError::DuplicateUser),
            Entry::Vacant(slot) => {
                let profile = record.profile.clone();
                slot.insert(record);
                Ok(profile)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.get(email).map(|r| r.value().clone())
    }

    async fn count(&self) -> usize {
        self.users.len()
    }

    async fn list_emails(&self) -> BTreeSet<String> {
        self.users.iter().map(|r| r.key().clone()).collect()
    }
}
