use chrono::{DateTime, NaiveDate, Utc};
use strum::{Display, EnumString};

use crate::{ApiError, Filter, ValidationError, WorkoutID};

pub const PROGRESS_FILTER_KEYS: &[&str] = &["limit", "page"];

#[allow(async_fn_in_trait)]
pub trait ProgressService {
    async fn log_workout(&self, log: WorkoutLog) -> Result<ProgressEntry, ApiError>;
    async fn get_progress(&self, filter: &Filter) -> Result<Vec<ProgressEntry>, ApiError>;
    async fn get_stats(&self) -> Result<ProgressStats, ApiError>;
    async fn get_history(&self, period: HistoryPeriod) -> Result<Vec<HistoryPoint>, ApiError>;
    async fn get_streaks(&self) -> Result<Streaks, ApiError>;
    async fn get_achievements(&self) -> Result<Vec<Achievement>, ApiError>;

    fn validate_workout_log(&self, form: &WorkoutLogForm) -> Result<WorkoutLog, ValidationError> {
        WorkoutLog::try_from(form)
    }
}

#[allow(async_fn_in_trait)]
pub trait ProgressRepository {
    async fn create_workout_log(&self, log: WorkoutLog) -> Result<ProgressEntry, ApiError>;
    async fn read_progress(&self, filter: &Filter) -> Result<Vec<ProgressEntry>, ApiError>;
    async fn read_stats(&self) -> Result<ProgressStats, ApiError>;
    async fn read_history(&self, period: HistoryPeriod) -> Result<Vec<HistoryPoint>, ApiError>;
    async fn read_streaks(&self) -> Result<Streaks, ApiError>;
    async fn read_achievements(&self) -> Result<Vec<Achievement>, ApiError>;
}

/// A completed workout as submitted by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub workout_id: Option<WorkoutID>,
    /// Whole minutes. Transmitted as is.
    pub duration: u32,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub calories_burned: Option<u32>,
    /// Average beats per minute.
    pub heart_rate: Option<u32>,
    pub notes: String,
}

/// Raw form input for [`WorkoutLog`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkoutLogForm {
    pub workout_id: String,
    pub duration: String,
    pub sets: String,
    pub reps: String,
    pub calories_burned: String,
    pub heart_rate: String,
    pub notes: String,
}

impl TryFrom<&WorkoutLogForm> for WorkoutLog {
    type Error = ValidationError;

    fn try_from(form: &WorkoutLogForm) -> Result<Self, Self::Error> {
        let workout_id = form.workout_id.trim();
        Ok(WorkoutLog {
            workout_id: (!workout_id.is_empty()).then(|| workout_id.into()),
            duration: parse_count(&form.duration, "duration")?
                .filter(|duration| *duration > 0)
                .ok_or(ValidationError::Missing("duration"))?,
            sets: parse_count(&form.sets, "sets")?,
            reps: parse_count(&form.reps, "reps")?,
            calories_burned: parse_count(&form.calories_burned, "calories")?,
            heart_rate: parse_count(&form.heart_rate, "heart rate")?,
            notes: form.notes.trim().to_string(),
        })
    }
}

fn parse_count(value: &str, field: &'static str) -> Result<Option<u32>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ValidationError::Invalid {
            field,
            expected: "a whole number",
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub id: ProgressEntryID,
    pub workout_id: Option<WorkoutID>,
    pub workout_title: Option<String>,
    /// Minutes.
    pub duration: u32,
    pub calories_burned: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
}

crate::string_id!(ProgressEntryID);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgressStats {
    pub total_workouts: u32,
    /// Minutes.
    pub total_duration: u32,
    pub total_calories: u32,
    pub current_streak: u32,
}

impl ProgressStats {
    /// Minutes per workout, rounded down.
    #[must_use]
    pub fn average_duration(&self) -> u32 {
        self.total_duration
            .checked_div(self.total_workouts)
            .unwrap_or_default()
    }
}

#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum HistoryPeriod {
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub workouts: u32,
    /// Minutes.
    pub duration: u32,
    pub calories: u32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
    pub last_workout: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: AchievementID,
    pub title: String,
    pub description: String,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}

crate::string_id!(AchievementID);
