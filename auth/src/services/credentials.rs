use std::sync::Arc;

use validator::Validate;

use carona_database::{StoreError, UserStore};
use carona_models::{LoginRequest, NewUser, RegisterRequest, UserRecord};

use super::clock::{Clock, SystemClock};
use super::eligibility;
use super::password::PasswordEncoder;
use crate::errors::CredentialError;

// Verified against when the national ID is unknown, so that path costs one
// bcrypt verification just like a wrong password does.
const DUMMY_PASSWORD: &str = "carona-unknown-user";

pub struct CredentialService {
    store: Arc<dyn UserStore>,
    encoder: PasswordEncoder,
    clock: Arc<dyn Clock>,
    dummy_hash: String,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, encoder: PasswordEncoder) -> Result<Self, CredentialError> {
        Self::with_clock(store, encoder, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn UserStore>,
        encoder: PasswordEncoder,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CredentialError> {
        let dummy_hash = encoder.encode(DUMMY_PASSWORD)?;
        Ok(Self {
            store,
            encoder,
            clock,
            dummy_hash,
        })
    }

    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Validates the age rule, hashes the password and persists the user.
    ///
    /// Nothing is hashed or written when the candidate is under age. Store
    /// failures, including uniqueness conflicts, are returned unchanged.
    pub async fn register(&self, mut request: RegisterRequest) -> Result<UserRecord, CredentialError> {
        request.validate()?;

        let today = self.clock.today();
        if let Err(e) = eligibility::check_age(request.birth_date, today) {
            tracing::info!(national_id = %request.national_id, "Registration rejected: under minimum age");
            return Err(e);
        }

        request.email = request.email.filter(|e| !e.trim().is_empty());
        if let Some(email) = request.email.as_deref() {
            if self.store.exists_by_email(email).await? {
                tracing::info!(national_id = %request.national_id, "Registration rejected: email already in use");
                return Err(StoreError::DuplicateEmail.into());
            }
        }

        let encoder = self.encoder;
        let plain = std::mem::take(&mut request.password);
        let password_hash = tokio::task::spawn_blocking(move || encoder.encode(&plain)).await??;

        let saved = self
            .store
            .save(NewUser::from_request(request, password_hash))
            .await?;

        tracing::info!(national_id = %saved.national_id, user_id = %saved.id, "User registered");
        Ok(saved)
    }

    /// `true` iff a user exists for the national ID and the password matches
    /// its stored hash. Unknown users and wrong passwords are indistinguishable.
    pub async fn authenticate(&self, request: &LoginRequest) -> Result<bool, CredentialError> {
        let user = self.store.find_by_national_id(&request.national_id).await?;

        let (password_hash, known) = match user {
            Some(user) => (user.password_hash, true),
            None => (self.dummy_hash.clone(), false),
        };

        let encoder = self.encoder;
        let plain = request.password.clone();
        let matched = tokio::task::spawn_blocking(move || encoder.matches(&plain, &password_hash)).await?;

        let authenticated = known && matched;
        if !authenticated {
            tracing::debug!(national_id = %request.national_id, "Login rejected");
        }
        Ok(authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carona_database::InMemoryUserStore;
    use chrono::NaiveDate;

    use crate::services::clock::FixedClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn service_with(store: Arc<dyn UserStore>) -> CredentialService {
        CredentialService::with_clock(store, PasswordEncoder::with_cost(4), Arc::new(FixedClock(today())))
            .unwrap()
    }

    fn candidate(national_id: &str, password: &str, birth_date: NaiveDate) -> RegisterRequest {
        RegisterRequest {
            name: "Joana Lima".to_string(),
            national_id: national_id.to_string(),
            password: password.to_string(),
            enrollment_code: Some("118031042".to_string()),
            email: Some(format!("{}@example.com", national_id)),
            birth_date,
        }
    }

    fn years_ago(years: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026 - years, 10, 16).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());

        let saved = service.register(candidate("111", "secret1", years_ago(20))).await.unwrap();
        assert_ne!(saved.password_hash, "secret1");
        assert_eq!(saved.national_id, "111");

        assert!(service.authenticate(&LoginRequest::new("111", "secret1")).await.unwrap());
        assert!(!service.authenticate(&LoginRequest::new("111", "wrong")).await.unwrap());
    }

    #[tokio::test]
    async fn test_underage_candidate_is_not_stored() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());

        let err = service.register(candidate("222", "secret1", years_ago(10))).await.unwrap_err();
        assert!(matches!(err, CredentialError::IneligibleAge { minimum: 18 }));
        assert!(store.find_by_national_id("222").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_age_boundary_is_calendar_exact() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());

        assert!(service.register(candidate("333", "pw", years_ago(18))).await.is_ok());

        let one_day_short = years_ago(18).succ_opt().unwrap();
        let err = service.register(candidate("334", "pw", one_day_short)).await.unwrap_err();
        assert!(matches!(err, CredentialError::IneligibleAge { .. }));
    }

    #[tokio::test]
    async fn test_unknown_national_id_is_false() {
        let service = service_with(Arc::new(InMemoryUserStore::new()));
        assert!(!service.authenticate(&LoginRequest::new("999", "anything")).await.unwrap());
        assert!(!service.authenticate(&LoginRequest::new("", "")).await.unwrap());
    }

    #[tokio::test]
    async fn test_dummy_password_does_not_log_in_unknown_user() {
        let service = service_with(Arc::new(InMemoryUserStore::new()));
        assert!(!service.authenticate(&LoginRequest::new("999", DUMMY_PASSWORD)).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_stored_differently() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());

        let first = service.register(candidate("444", "shared", years_ago(30))).await.unwrap();
        let second = service.register(candidate("445", "shared", years_ago(30))).await.unwrap();

        assert_ne!(first.password_hash, second.password_hash);
        assert!(service.authenticate(&LoginRequest::new("444", "shared")).await.unwrap());
        assert!(service.authenticate(&LoginRequest::new("445", "shared")).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_national_id_propagates_store_error() {
        let service = service_with(Arc::new(InMemoryUserStore::new()));
        service.register(candidate("555", "pw", years_ago(25))).await.unwrap();

        let mut again = candidate("555", "other", years_ago(25));
        again.email = Some("different@example.com".to_string());
        let err = service.register(again).await.unwrap_err();
        assert!(matches!(err, CredentialError::Store(StoreError::DuplicateNationalId)));

        // The original password still works.
        assert!(service.authenticate(&LoginRequest::new("555", "pw")).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_before_hashing() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());
        service.register(candidate("666", "pw", years_ago(25))).await.unwrap();

        let mut other = candidate("667", "pw", years_ago(25));
        other.email = Some("666@example.com".to_string());
        let err = service.register(other).await.unwrap_err();
        assert!(matches!(err, CredentialError::Store(StoreError::DuplicateEmail)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_email_treated_as_absent() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());

        let mut first = candidate("777", "pw", years_ago(25));
        first.email = Some("  ".to_string());
        let mut second = candidate("778", "pw", years_ago(25));
        second.email = Some(String::new());

        assert!(service.register(first).await.unwrap().email.is_none());
        assert!(service.register(second).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_password_is_validation_error() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = service_with(store.clone());

        let err = service.register(candidate("888", "", years_ago(25))).await.unwrap_err();
        assert!(matches!(err, CredentialError::Validation(_)));
        assert!(store.is_empty());
    }

    struct UnavailableStore;

    #[async_trait]
    impl UserStore for UnavailableStore {
        async fn find_by_national_id(&self, _: &str) -> Result<Option<UserRecord>, StoreError> {
            Err(StoreError::Database(carona_database::sqlx::Error::PoolTimedOut))
        }

        async fn exists_by_email(&self, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Database(carona_database::sqlx::Error::PoolTimedOut))
        }

        async fn save(&self, _: NewUser) -> Result<UserRecord, StoreError> {
            Err(StoreError::Database(carona_database::sqlx::Error::PoolTimedOut))
        }

        fn backend(&self) -> &'static str {
            "unavailable"
        }
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let service = service_with(Arc::new(UnavailableStore));

        let err = service.authenticate(&LoginRequest::new("111", "pw")).await.unwrap_err();
        assert!(matches!(err, CredentialError::Store(StoreError::Database(_))));

        let mut request = candidate("111", "pw", years_ago(25));
        request.email = None;
        let err = service.register(request).await.unwrap_err();
        assert!(matches!(err, CredentialError::Store(StoreError::Database(_))));
    }

    #[tokio::test]
    async fn test_underage_check_runs_before_store() {
        let service = service_with(Arc::new(UnavailableStore));
        let err = service.register(candidate("111", "pw", years_ago(5))).await.unwrap_err();
        assert!(matches!(err, CredentialError::IneligibleAge { .. }));
    }
}
