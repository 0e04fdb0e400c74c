// Repository pattern for database operations

pub mod user;

pub use user::PgUserStore;
