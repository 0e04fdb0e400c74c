use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// bcrypt settings shared by registration and login. Each hash embeds its own
/// random salt and cost, so verification needs nothing but the stored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordEncoder {
    cost: u32,
}

impl Default for PasswordEncoder {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordEncoder {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes `plain` with a fresh salt. bcrypt reads at most 72 bytes, so
    /// longer inputs are rejected at registration before they get here.
    pub fn encode(&self, plain: &str) -> Result<String, BcryptError> {
        hash(plain, self.cost)
    }

    /// Constant-time check of `plain` against a stored hash. A hash bcrypt
    /// cannot parse never matches.
    pub fn matches(&self, plain: &str, password_hash: &str) -> bool {
        match verify(plain, password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }
}
