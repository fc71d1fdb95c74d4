use chrono::{DateTime, Utc};

use crate::{ApiError, Filter, Name, ValidationError};

pub const METRICS_FILTER_KEYS: &[&str] = &["limit", "days"];

#[allow(async_fn_in_trait)]
pub trait UserService {
    async fn get_profile(&self) -> Result<User, ApiError>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError>;
    async fn record_body_metrics(&self, metrics: BodyMetrics) -> Result<BodyMetrics, ApiError>;
    async fn get_body_metrics_history(&self, filter: &Filter)
    -> Result<Vec<BodyMetrics>, ApiError>;

    fn validate_name(&self, name: &str) -> Result<Name, ValidationError> {
        Ok(Name::new(name)?)
    }

    /// Accepts a decimal comma. An empty input means "not provided".
    fn validate_measurement(
        &self,
        value: &str,
        field: &'static str,
    ) -> Result<Option<f32>, ValidationError> {
        let value = value.replace(',', ".");
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        match value.parse::<f32>() {
            Ok(parsed) if parsed > 0.0 && parsed.is_finite() => Ok(Some(parsed)),
            _ => Err(ValidationError::Invalid {
                field,
                expected: "a positive decimal number",
            }),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait UserRepository {
    async fn read_profile(&self) -> Result<User, ApiError>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError>;
    async fn create_body_metrics(&self, metrics: BodyMetrics) -> Result<BodyMetrics, ApiError>;
    async fn read_body_metrics(&self, filter: &Filter) -> Result<Vec<BodyMetrics>, ApiError>;
}

/// Identity of the signed-in user, as last reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserID,
    pub name: String,
    pub email: String,
    pub role: String,
    pub height: Option<f32>,
    pub weight: Option<f32>,
    pub fitness_goal: Option<String>,
}

impl User {
    /// Up to two upper-case initials of the user's name, for avatars.
    #[must_use]
    pub fn initials(&self) -> String {
        let initials = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect::<String>();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

crate::string_id!(UserID);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<Name>,
    pub height: Option<f32>,
    pub weight: Option<f32>,
    pub fitness_goal: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BodyMetrics {
    pub recorded_at: Option<DateTime<Utc>>,
    pub weight: Option<f32>,
    pub body_fat: Option<f32>,
    pub muscle_mass: Option<f32>,
    pub resting_heart_rate: Option<u32>,
}
