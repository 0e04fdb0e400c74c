use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use carona_models::{NewUser, UserRecord};

use crate::error::StoreError;
use crate::store::UserStore;

/// Process-local user store. Applies the same uniqueness rules as the
/// `users` table; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().get(national_id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .read()
            .values()
            .any(|u| u.email.as_deref() == Some(email)))
    }

    async fn save(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        // Check and insert under one write lock so concurrent saves of the
        // same national ID cannot both succeed.
        let mut users = self.users.write();

        if users.contains_key(&user.national_id) {
            return Err(StoreError::DuplicateNationalId);
        }
        if let Some(email) = user.email.as_deref() {
            if users.values().any(|u| u.email.as_deref() == Some(email)) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            national_id: user.national_id,
            password_hash: user.password_hash,
            enrollment_code: user.enrollment_code,
            email: user.email,
            birth_date: user.birth_date,
            created_at: Utc::now(),
        };
        users.insert(record.national_id.clone(), record.clone());

        Ok(record)
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}
