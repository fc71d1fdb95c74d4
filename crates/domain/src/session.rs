use std::fmt;

use derive_more::AsRef;

use crate::{StorageError, User};

/// Persisted client session: the credential pair, the cached user record and the page to
/// return to after login.
///
/// The access and refresh token are always written and cleared together.
pub trait TokenRepository {
    fn read_access_token(&self) -> Option<AccessToken>;
    fn read_refresh_token(&self) -> Option<RefreshToken>;
    fn write_tokens(&self, tokens: &Tokens) -> Result<(), StorageError>;

    /// Returns `None` if no user is stored or the stored record cannot be decoded.
    fn read_user(&self) -> Option<User>;
    fn write_user(&self, user: &User) -> Result<(), StorageError>;

    /// Removes both tokens and the user record.
    fn clear(&self);

    fn write_redirect_after_login(&self, path: &str) -> Result<(), StorageError>;
    fn take_redirect_after_login(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.read_access_token().is_some()
    }
}

#[derive(AsRef, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

#[derive(AsRef, Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RefreshToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RefreshToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AccessToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl RefreshToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub access: AccessToken,
    pub refresh: RefreshToken,
}

impl Tokens {
    pub fn new(access: impl Into<AccessToken>, refresh: impl Into<RefreshToken>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}
