#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::NaiveDate;
use serde_json::{json, Value};

use carona_auth::{CredentialService, FixedClock, PasswordEncoder};
use carona_config::FeatureToggles;
use carona_database::InMemoryUserStore;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

pub fn years_ago(years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026 - years, 10, 16).unwrap()
}

pub struct TestState {
    pub store: Arc<InMemoryUserStore>,
    pub credentials: web::Data<CredentialService>,
    pub toggles: web::Data<FeatureToggles>,
}

pub fn test_state() -> TestState {
    test_state_with_toggles(FeatureToggles::default())
}

pub fn test_state_with_toggles(toggles: FeatureToggles) -> TestState {
    let store = Arc::new(InMemoryUserStore::new());
    let credentials = CredentialService::with_clock(
        store.clone(),
        PasswordEncoder::with_cost(4),
        Arc::new(FixedClock(today())),
    )
    .expect("Failed to build credential service");

    TestState {
        store,
        credentials: web::Data::new(credentials),
        toggles: web::Data::new(toggles),
    }
}

pub fn registration_body(national_id: &str, password: &str, birth_date: NaiveDate) -> Value {
    json!({
        "name": "Carlos Pereira",
        "national_id": national_id,
        "password": password,
        "enrollment_code": "219054321",
        "email": format!("{}@example.com", national_id),
        "birth_date": birth_date.format("%Y-%m-%d").to_string()
    })
}
