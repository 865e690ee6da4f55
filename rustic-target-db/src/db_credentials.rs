use std::env;
use std::fmt;

use crate::error::LoadError;

pub const USER_VAR: &str = "USER";
pub const PASSWORD_VAR: &str = "PASS";
pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const DATABASE_NAME_VAR: &str = "NAME";

/// Connection parameters for the target database.
#[derive(Clone, PartialEq)]
pub struct DbCredentials {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

impl DbCredentials {
    /// Reads `USER`, `PASS`, `HOST`, `PORT` and `NAME` from the process
    /// environment. Every variable must be set and non-empty.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoadError> {
        let raw = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(LoadError::MissingCredential(key))
        };
        let required = |key: &'static str| raw(key).map(|value| value.trim().to_string());

        let raw_port = required(PORT_VAR)?;
        let port = raw_port
            .parse()
            .map_err(|_| LoadError::InvalidCredential {
                name: PORT_VAR,
                value: raw_port.clone(),
            })?;

        Ok(Self {
            user: required(USER_VAR)?,
            password: raw(PASSWORD_VAR)?,
            host: required(HOST_VAR)?,
            port,
            database_name: required(DATABASE_NAME_VAR)?,
        })
    }
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .finish()
    }
}
