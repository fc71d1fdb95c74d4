use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};

use crate::ApiError;

#[allow(async_fn_in_trait)]
pub trait SubscriptionService {
    async fn get_subscription(&self) -> Result<Option<Subscription>, ApiError>;
    async fn checkout(&self, plan: Plan) -> Result<CheckoutSession, ApiError>;
    async fn cancel_subscription(&self) -> Result<(), ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait SubscriptionRepository {
    /// `None` if the user has no subscription.
    async fn read_subscription(&self) -> Result<Option<Subscription>, ApiError>;
    async fn create_checkout(&self, plan: Plan) -> Result<CheckoutSession, ApiError>;
    async fn cancel_subscription(&self) -> Result<(), ApiError>;
}

/// Plan identifier in the canonical upper-case form the server expects.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq)]
pub struct Plan(String);

impl Plan {
    pub fn new(plan: &str) -> Result<Self, PlanError> {
        let plan = plan.trim();

        if plan.is_empty() {
            return Err(PlanError::Empty);
        }

        Ok(Plan(plan.to_uppercase()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Plan must not be empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub plan: Plan,
    pub status: String,
    pub current_period_end: Option<DateTime<Utc>>,
    pub cancel_at_period_end: bool,
}

impl Subscription {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status.as_str(), "active" | "trialing")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub url: String,
    pub session_id: Option<String>,
}
