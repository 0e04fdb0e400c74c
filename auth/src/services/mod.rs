pub mod clock;
pub mod credentials;
pub mod eligibility;
pub mod password;

pub use clock::*;
pub use credentials::CredentialService;
pub use eligibility::*;
pub use password::PasswordEncoder;
