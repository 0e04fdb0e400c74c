use async_trait::async_trait;

use carona_models::{NewUser, UserRecord};

use crate::error::StoreError;

/// Durable user storage keyed by national ID.
///
/// Implementations enforce uniqueness of `national_id` and of `email`
/// (when present) and report violations as `StoreError::Duplicate*`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Persists `user`, assigning its id and creation time.
    async fn save(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Short label for health reporting.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
