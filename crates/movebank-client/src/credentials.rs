use crate::error::{ClientError, Result};
use std::fmt;

/// Environment variable holding the Movebank user name
pub const USERNAME_VAR: &str = "mbus";

/// Environment variable holding the Movebank password
pub const PASSWORD_VAR: &str = "mbpw";

/// HTTP basic credentials sent with every direct-read request
#[derive(Clone, PartialEq, Eq)]
pub struct MovebankCredentials {
    pub username: String,
    pub password: String,
}

impl MovebankCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `mbus` and `mbpw`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(require_var(USERNAME_VAR)?, require_var(PASSWORD_VAR)?))
    }
}

impl fmt::Debug for MovebankCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovebankCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn require_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ClientError::MissingCredential(name.to_string()))
}
