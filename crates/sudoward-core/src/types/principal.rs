//! Validated OS account names.
//!
//! A principal name ends up verbatim inside a sudoers rule, so it is
//! validated before any host interaction. The accepted alphabet is the
//! POSIX portable user name set plus the trailing `$` used by machine
//! accounts.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest account name accepted (matches `LOGIN_NAME_MAX` on common systems
/// minus the utmp limit).
pub const MAX_PRINCIPAL_LEN: usize = 32;

/// An OS-level user account identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Validate and wrap an account name.
    pub fn parse(name: &str) -> Result<Self, AppError> {
        if name.is_empty() {
            return Err(AppError::invalid_principal("Principal name must not be empty"));
        }
        if name.len() > MAX_PRINCIPAL_LEN {
            return Err(AppError::invalid_principal(format!(
                "Principal name exceeds {MAX_PRINCIPAL_LEN} characters"
            )));
        }
        if name.starts_with('-') {
            return Err(AppError::invalid_principal(format!(
                "Principal name '{name}' must not start with '-'"
            )));
        }

        let body = name.strip_suffix('$').unwrap_or(name);
        if body.is_empty()
            || !body
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(AppError::invalid_principal(format!(
                "Principal name '{}' contains invalid characters",
                name.escape_default()
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// Return the account name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Principal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> String {
        principal.0
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Principal {
    fn borrow(&self) -> &str {
        &self.0
    }
}
