use strum::{Display, EnumString};

use crate::{ApiError, Difficulty, Filter, WorkoutID};

/// Query parameters understood by the program list endpoint.
pub const PROGRAM_FILTER_KEYS: &[&str] = &["difficulty", "goal", "limit", "page"];

#[allow(async_fn_in_trait)]
pub trait ProgramService {
    async fn get_programs(&self, filter: &Filter) -> Result<Vec<Program>, ApiError>;
    async fn get_program(&self, id: &ProgramID) -> Result<Program, ApiError>;
    async fn enroll(&self, id: &ProgramID) -> Result<Enrollment, ApiError>;
    async fn get_enrollments(&self) -> Result<Vec<Enrollment>, ApiError>;
    async fn update_enrollment_progress(
        &self,
        id: &EnrollmentID,
        progress: EnrollmentProgress,
    ) -> Result<Enrollment, ApiError>;

    /// Advances to the next day, or to the first day of the next week after the last day.
    #[must_use]
    fn next_progress(&self, enrollment: &Enrollment, program: &Program) -> EnrollmentProgress {
        let days_per_week = program.workouts_per_week.unwrap_or(7).max(1);
        if enrollment.current_day >= days_per_week {
            EnrollmentProgress {
                current_week: enrollment.current_week + 1,
                current_day: 1,
                completed_workout: None,
            }
        } else {
            EnrollmentProgress {
                current_week: enrollment.current_week,
                current_day: enrollment.current_day + 1,
                completed_workout: None,
            }
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProgramRepository {
    async fn read_programs(&self, filter: &Filter) -> Result<Vec<Program>, ApiError>;
    async fn read_program(&self, id: &ProgramID) -> Result<Program, ApiError>;
    async fn create_enrollment(&self, id: &ProgramID) -> Result<Enrollment, ApiError>;
    async fn read_enrollments(&self) -> Result<Vec<Enrollment>, ApiError>;
    async fn update_enrollment_progress(
        &self,
        id: &EnrollmentID,
        progress: EnrollmentProgress,
    ) -> Result<Enrollment, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: ProgramID,
    pub title: String,
    pub description: String,
    pub difficulty: Option<Difficulty>,
    pub goal: Option<String>,
    pub duration_weeks: u32,
    pub workouts_per_week: Option<u32>,
    pub workouts: Vec<WorkoutID>,
    pub is_premium: bool,
}

crate::string_id!(ProgramID);

#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: EnrollmentID,
    pub program_id: ProgramID,
    /// Only present if the server embeds the program.
    pub program: Option<Program>,
    pub current_week: u32,
    pub current_day: u32,
    /// Percent.
    pub progress: f32,
    pub status: EnrollmentStatus,
}

crate::string_id!(EnrollmentID);

#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EnrollmentStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentProgress {
    pub current_week: u32,
    pub current_day: u32,
    pub completed_workout: Option<WorkoutID>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    struct Planner;

    impl ProgramService for Planner {
        async fn get_programs(&self, _: &Filter) -> Result<Vec<Program>, ApiError> {
            unreachable!()
        }
        async fn get_program(&self, _: &ProgramID) -> Result<Program, ApiError> {
            unreachable!()
        }
        async fn enroll(&self, _: &ProgramID) -> Result<Enrollment, ApiError> {
            unreachable!()
        }
        async fn get_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
            unreachable!()
        }
        async fn update_enrollment_progress(
            &self,
            _: &EnrollmentID,
            _: EnrollmentProgress,
        ) -> Result<Enrollment, ApiError> {
            unreachable!()
        }
    }

    fn program(workouts_per_week: Option<u32>) -> Program {
        Program {
            id: "p1".into(),
            title: "Couch to 5K".to_string(),
            description: String::new(),
            difficulty: Some(Difficulty::Beginner),
            goal: Some("endurance".to_string()),
            duration_weeks: 9,
            workouts_per_week,
            workouts: vec![],
            is_premium: false,
        }
    }

    fn enrollment(current_week: u32, current_day: u32) -> Enrollment {
        Enrollment {
            id: "e1".into(),
            program_id: "p1".into(),
            program: None,
            current_week,
            current_day,
            progress: 0.0,
            status: EnrollmentStatus::Active,
        }
    }

    #[rstest]
    #[case(Some(3), 1, 1, (1, 2))]
    #[case(Some(3), 1, 3, (2, 1))]
    #[case(None, 2, 6, (2, 7))]
    #[case(None, 2, 7, (3, 1))]
    #[case(Some(0), 1, 1, (2, 1))]
    fn test_next_progress(
        #[case] workouts_per_week: Option<u32>,
        #[case] week: u32,
        #[case] day: u32,
        #[case] expected: (u32, u32),
    ) {
        let progress = Planner.next_progress(&enrollment(week, day), &program(workouts_per_week));
        assert_eq!(
            (progress.current_week, progress.current_day),
            expected
        );
    }
}
