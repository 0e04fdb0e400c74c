// Credential management for the ride-sharing platform.
//
// - Registration with the minimum-age rule
// - bcrypt password hashing and verification
// - HTTP handlers and route wiring for the auth service

pub mod errors;
pub mod handlers;
pub mod routes;
pub mod services;

pub use errors::CredentialError;
pub use routes::configure_routes;
pub use services::{Clock, CredentialService, FixedClock, PasswordEncoder, SystemClock};
