//! Wire format of the API.
//!
//! Field names are camelCase. Unknown fields are ignored, missing optional fields take their
//! default value, and identifiers are accepted as `id` or `_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use stride_domain as domain;

/// Common response envelope.
#[derive(Deserialize, Debug)]
pub struct Envelope<D> {
    #[serde(default = "default_true")]
    pub success: bool,
    pub data: Option<D>,
    pub error: Option<String>,
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// List payload, either a bare array or an object holding the array next to pagination data.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum List<T> {
    Items(Vec<T>),
    Page(Page<T>),
}

#[derive(Deserialize, Debug)]
pub struct Page<T> {
    #[serde(
        alias = "workouts",
        alias = "programs",
        alias = "enrollments",
        alias = "progress",
        alias = "entries",
        alias = "history",
        alias = "achievements",
        alias = "metrics"
    )]
    pub items: Vec<T>,
}

impl<T> List<T> {
    pub fn into_domain<D: From<T>>(self) -> Vec<D> {
        match self {
            List::Items(items) | List::Page(Page { items }) => {
                items.into_iter().map(D::from).collect()
            }
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    /// Both tokens, if neither is empty.
    pub fn into_tokens(self) -> Option<domain::Tokens> {
        if self.access_token.is_empty() || self.refresh_token.is_empty() {
            None
        } else {
            Some(domain::Tokens::new(self.access_token, self.refresh_token))
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

/// User record, either bare or wrapped in an object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum UserData {
    Wrapped { user: User },
    Plain(User),
}

impl From<UserData> for User {
    fn from(value: UserData) -> Self {
        match value {
            UserData::Wrapped { user } | UserData::Plain(user) => user,
        }
    }
}

impl From<User> for domain::User {
    fn from(value: User) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            email: value.email,
            role: value.role,
            height: value.height,
            weight: value.weight,
            fitness_goal: value.fitness_goal,
        }
    }
}

impl From<&domain::User> for User {
    fn from(value: &domain::User) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            email: value.email.clone(),
            role: value.role.clone(),
            height: value.height,
            weight: value.weight,
            fitness_goal: value.fitness_goal.clone(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(alias = "estimatedCalories")]
    pub calories: Option<u32>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
    #[serde(default, alias = "premium")]
    pub is_premium: bool,
}

impl From<Workout> for domain::Workout {
    fn from(value: Workout) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            description: value.description,
            category: value.category,
            difficulty: parse_difficulty(value.difficulty.as_deref()),
            duration: value.duration,
            calories: value.calories,
            equipment: value.equipment,
            exercises: value.exercises.into_iter().map(Into::into).collect(),
            is_premium: value.is_premium,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

impl From<WorkoutExercise> for domain::WorkoutExercise {
    fn from(value: WorkoutExercise) -> Self {
        Self {
            name: value.name,
            sets: value.sets,
            reps: value.reps,
            notes: value.notes,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Option<String>,
    pub goal: Option<String>,
    #[serde(default, alias = "durationWeeks", alias = "weeks")]
    pub duration_weeks: u32,
    pub workouts_per_week: Option<u32>,
    #[serde(default)]
    pub workouts: Vec<WorkoutRef>,
    #[serde(default, alias = "premium")]
    pub is_premium: bool,
}

impl From<Program> for domain::Program {
    fn from(value: Program) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            description: value.description,
            difficulty: parse_difficulty(value.difficulty.as_deref()),
            goal: value.goal,
            duration_weeks: value.duration_weeks,
            workouts_per_week: value.workouts_per_week,
            workouts: value.workouts.into_iter().map(WorkoutRef::into_id).collect(),
            is_premium: value.is_premium,
        }
    }
}

/// Reference that the server either leaves as an identifier or populates.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum WorkoutRef {
    Id(String),
    Workout {
        #[serde(alias = "_id")]
        id: String,
    },
}

impl WorkoutRef {
    fn into_id(self) -> domain::WorkoutID {
        match self {
            WorkoutRef::Id(id) | WorkoutRef::Workout { id } => id.into(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ProgramRef {
    Id(String),
    Program(Box<Program>),
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "programId")]
    pub program: ProgramRef,
    #[serde(default = "default_one")]
    pub current_week: u32,
    #[serde(default = "default_one")]
    pub current_day: u32,
    #[serde(default)]
    pub progress: f32,
    pub status: Option<String>,
}

fn default_one() -> u32 {
    1
}

impl From<Enrollment> for domain::Enrollment {
    fn from(value: Enrollment) -> Self {
        let (program_id, program) = match value.program {
            ProgramRef::Id(id) => (id.into(), None),
            ProgramRef::Program(program) => {
                let program = domain::Program::from(*program);
                (program.id.clone(), Some(program))
            }
        };
        Self {
            id: value.id.into(),
            program_id,
            program,
            current_week: value.current_week,
            current_day: value.current_day,
            progress: value.progress,
            status: value
                .status
                .as_deref()
                .and_then(|status| status.parse().ok())
                .unwrap_or(domain::EnrollmentStatus::Active),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub workout: Option<WorkoutSummary>,
    pub workout_id: Option<String>,
    #[serde(default)]
    pub duration: u32,
    pub calories_burned: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Populated workout inside a progress entry.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum WorkoutSummary {
    Id(String),
    Workout {
        #[serde(alias = "_id")]
        id: String,
        #[serde(alias = "name")]
        title: Option<String>,
    },
}

impl From<ProgressEntry> for domain::ProgressEntry {
    fn from(value: ProgressEntry) -> Self {
        let (workout_id, workout_title) = match value.workout {
            Some(WorkoutSummary::Id(id)) => (Some(id.into()), None),
            Some(WorkoutSummary::Workout { id, title }) => (Some(id.into()), title),
            None => (value.workout_id.map(Into::into), None),
        };
        Self {
            id: value.id.into(),
            workout_id,
            workout_title,
            duration: value.duration,
            calories_burned: value.calories_burned,
            completed_at: value.completed_at,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_workouts: u32,
    #[serde(alias = "totalMinutes")]
    pub total_duration: u32,
    #[serde(alias = "totalCaloriesBurned")]
    pub total_calories: u32,
    pub current_streak: u32,
}

impl From<ProgressStats> for domain::ProgressStats {
    fn from(value: ProgressStats) -> Self {
        Self {
            total_workouts: value.total_workouts,
            total_duration: value.total_duration,
            total_calories: value.total_calories,
            current_streak: value.current_streak,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    #[serde(alias = "_id", deserialize_with = "date")]
    pub date: NaiveDate,
    #[serde(default, alias = "count")]
    pub workouts: u32,
    #[serde(default, alias = "totalDuration")]
    pub duration: u32,
    #[serde(default, alias = "totalCalories")]
    pub calories: u32,
}

impl From<HistoryPoint> for domain::HistoryPoint {
    fn from(value: HistoryPoint) -> Self {
        Self {
            date: value.date,
            workouts: value.workouts,
            duration: value.duration,
            calories: value.calories,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Streaks {
    #[serde(alias = "currentStreak")]
    pub current: u32,
    #[serde(alias = "longestStreak")]
    pub longest: u32,
    #[serde(deserialize_with = "optional_date", alias = "lastWorkoutDate")]
    pub last_workout: Option<NaiveDate>,
}

impl From<Streaks> for domain::Streaks {
    fn from(value: Streaks) -> Self {
        Self {
            current: value.current,
            longest: value.longest,
            last_workout: value.last_workout,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<Achievement> for domain::Achievement {
    fn from(value: Achievement) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            description: value.description,
            unlocked_at: value.unlocked_at,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyMetrics {
    #[serde(alias = "createdAt")]
    pub recorded_at: Option<DateTime<Utc>>,
    pub weight: Option<f32>,
    pub body_fat: Option<f32>,
    pub muscle_mass: Option<f32>,
    pub resting_heart_rate: Option<u32>,
}

impl From<BodyMetrics> for domain::BodyMetrics {
    fn from(value: BodyMetrics) -> Self {
        Self {
            recorded_at: value.recorded_at,
            weight: value.weight,
            body_fat: value.body_fat,
            muscle_mass: value.muscle_mass,
            resting_heart_rate: value.resting_heart_rate,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

fn default_status() -> String {
    "active".to_string()
}

impl TryFrom<Subscription> for domain::Subscription {
    type Error = domain::PlanError;

    fn try_from(value: Subscription) -> Result<Self, Self::Error> {
        Ok(Self {
            plan: domain::Plan::new(&value.plan)?,
            status: value.status.to_lowercase(),
            current_period_end: value.current_period_end,
            cancel_at_period_end: value.cancel_at_period_end,
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    #[serde(alias = "checkoutUrl")]
    pub url: String,
    pub session_id: Option<String>,
}

impl From<CheckoutSession> for domain::CheckoutSession {
    fn from(value: CheckoutSession) -> Self {
        Self {
            url: value.url,
            session_id: value.session_id,
        }
    }
}

fn parse_difficulty(value: Option<&str>) -> Option<domain::Difficulty> {
    value.and_then(|value| value.parse().ok())
}

/// Accepts plain dates as well as timestamps.
fn parse_date(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse_date(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {value}")))
}

fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(parse_date))
}
