use strum::{Display, EnumString};

use crate::{ApiError, Filter};

/// Query parameters understood by the workout list and search endpoints.
pub const WORKOUT_FILTER_KEYS: &[&str] = &["category", "difficulty", "duration", "limit", "page"];

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, filter: &Filter) -> Result<Vec<Workout>, ApiError>;
    async fn search_workouts(&self, query: &str, filter: &Filter)
    -> Result<Vec<Workout>, ApiError>;
    async fn get_workout(&self, id: &WorkoutID) -> Result<Workout, ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, filter: &Filter) -> Result<Vec<Workout>, ApiError>;
    async fn search_workouts(
        &self,
        query: &str,
        filter: &Filter,
    ) -> Result<Vec<Workout>, ApiError>;
    async fn read_workout(&self, id: &WorkoutID) -> Result<Workout, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Option<Difficulty>,
    /// Minutes.
    pub duration: u32,
    pub calories: Option<u32>,
    pub equipment: Vec<String>,
    pub exercises: Vec<WorkoutExercise>,
    pub is_premium: bool,
}

impl Workout {
    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().filter_map(|e| e.sets).sum()
    }
}

crate::string_id!(WorkoutID);

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub name: String,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub notes: String,
}

#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}
