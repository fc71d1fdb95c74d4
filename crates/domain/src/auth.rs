use crate::{ApiError, Email, Name, Password, User, ValidationError};

#[allow(async_fn_in_trait)]
pub trait AuthService {
    async fn register(&self, registration: Registration) -> Result<User, ApiError>;
    async fn login(&self, credentials: Credentials) -> Result<User, ApiError>;
    async fn logout(&self);
    async fn get_current_user(&self) -> Result<User, ApiError>;
    async fn change_password(&self, current: Password, new: Password) -> Result<(), ApiError>;

    fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Credentials, ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::Missing("password"));
        }
        Ok(Credentials {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    fn validate_registration(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<Registration, ValidationError> {
        let registration = Registration {
            name: Name::new(name)?,
            email: Email::new(email)?,
            password: Password::new(password)?,
        };
        if password != password_confirmation {
            return Err(ValidationError::Invalid {
                field: "password confirmation",
                expected: "equal to password",
            });
        }
        Ok(registration)
    }
}

#[allow(async_fn_in_trait)]
pub trait AuthRepository {
    /// Stores the issued tokens and the user record on success.
    async fn register(&self, registration: Registration) -> Result<User, ApiError>;
    /// Stores the issued tokens and the user record on success.
    async fn login(&self, credentials: Credentials) -> Result<User, ApiError>;
    /// Best effort. The local session is cleared even if the server cannot be reached.
    async fn logout(&self);
    /// Stores the returned user record on success.
    async fn read_current_user(&self) -> Result<User, ApiError>;
    async fn change_password(&self, current: Password, new: Password) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: Name,
    pub email: Email,
    pub password: Password,
}
