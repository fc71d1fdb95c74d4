use log::{debug, error};

use crate::{
    Achievement, ApiError, AuthRepository, AuthService, BodyMetrics, CheckoutSession,
    Credentials, Enrollment, EnrollmentID, EnrollmentProgress, Filter, HistoryPeriod,
    HistoryPoint, Password, Plan, ProfileUpdate, Program, ProgramID, ProgramRepository,
    ProgramService, ProgressEntry, ProgressRepository, ProgressService, ProgressStats,
    Registration, Streaks, Subscription, SubscriptionRepository, SubscriptionService, User,
    UserRepository, UserService, Workout, WorkoutID, WorkoutLog, WorkoutRepository,
    WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                ApiError::Network(_) | ApiError::SessionExpired => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                ApiError::Request { .. } | ApiError::Storage(_) => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: AuthRepository> AuthService for Service<R> {
    async fn register(&self, registration: Registration) -> Result<User, ApiError> {
        log_on_error!(self.repository.register(registration), "register", "user")
    }

    async fn login(&self, credentials: Credentials) -> Result<User, ApiError> {
        log_on_error!(self.repository.login(credentials), "log in", "user")
    }

    async fn logout(&self) {
        self.repository.logout().await;
    }

    async fn get_current_user(&self) -> Result<User, ApiError> {
        log_on_error!(self.repository.read_current_user(), "get", "current user")
    }

    async fn change_password(&self, current: Password, new: Password) -> Result<(), ApiError> {
        log_on_error!(
            self.repository.change_password(current, new),
            "change",
            "password"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, filter: &Filter) -> Result<Vec<Workout>, ApiError> {
        log_on_error!(self.repository.read_workouts(filter), "get", "workouts")
    }

    async fn search_workouts(
        &self,
        query: &str,
        filter: &Filter,
    ) -> Result<Vec<Workout>, ApiError> {
        log_on_error!(
            self.repository.search_workouts(query, filter),
            "search",
            "workouts"
        )
    }

    async fn get_workout(&self, id: &WorkoutID) -> Result<Workout, ApiError> {
        log_on_error!(self.repository.read_workout(id), "get", "workout")
    }
}

impl<R: ProgramRepository> ProgramService for Service<R> {
    async fn get_programs(&self, filter: &Filter) -> Result<Vec<Program>, ApiError> {
        log_on_error!(self.repository.read_programs(filter), "get", "programs")
    }

    async fn get_program(&self, id: &ProgramID) -> Result<Program, ApiError> {
        log_on_error!(self.repository.read_program(id), "get", "program")
    }

    async fn enroll(&self, id: &ProgramID) -> Result<Enrollment, ApiError> {
        log_on_error!(self.repository.create_enrollment(id), "create", "enrollment")
    }

    async fn get_enrollments(&self) -> Result<Vec<Enrollment>, ApiError> {
        log_on_error!(self.repository.read_enrollments(), "get", "enrollments")
    }

    async fn update_enrollment_progress(
        &self,
        id: &EnrollmentID,
        progress: EnrollmentProgress,
    ) -> Result<Enrollment, ApiError> {
        log_on_error!(
            self.repository.update_enrollment_progress(id, progress),
            "update",
            "enrollment progress"
        )
    }
}

impl<R: ProgressRepository> ProgressService for Service<R> {
    async fn log_workout(&self, log: WorkoutLog) -> Result<ProgressEntry, ApiError> {
        log_on_error!(self.repository.create_workout_log(log), "log", "workout")
    }

    async fn get_progress(&self, filter: &Filter) -> Result<Vec<ProgressEntry>, ApiError> {
        log_on_error!(self.repository.read_progress(filter), "get", "progress")
    }

    async fn get_stats(&self) -> Result<ProgressStats, ApiError> {
        log_on_error!(self.repository.read_stats(), "get", "progress stats")
    }

    async fn get_history(&self, period: HistoryPeriod) -> Result<Vec<HistoryPoint>, ApiError> {
        log_on_error!(
            self.repository.read_history(period),
            "get",
            "progress history"
        )
    }

    async fn get_streaks(&self) -> Result<Streaks, ApiError> {
        log_on_error!(self.repository.read_streaks(), "get", "streaks")
    }

    async fn get_achievements(&self) -> Result<Vec<Achievement>, ApiError> {
        log_on_error!(self.repository.read_achievements(), "get", "achievements")
    }
}

impl<R: UserRepository> UserService for Service<R> {
    async fn get_profile(&self) -> Result<User, ApiError> {
        log_on_error!(self.repository.read_profile(), "get", "profile")
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, ApiError> {
        log_on_error!(self.repository.update_profile(update), "update", "profile")
    }

    async fn record_body_metrics(&self, metrics: BodyMetrics) -> Result<BodyMetrics, ApiError> {
        log_on_error!(
            self.repository.create_body_metrics(metrics),
            "record",
            "body metrics"
        )
    }

    async fn get_body_metrics_history(
        &self,
        filter: &Filter,
    ) -> Result<Vec<BodyMetrics>, ApiError> {
        log_on_error!(
            self.repository.read_body_metrics(filter),
            "get",
            "body metrics"
        )
    }
}

impl<R: SubscriptionRepository> SubscriptionService for Service<R> {
    async fn get_subscription(&self) -> Result<Option<Subscription>, ApiError> {
        log_on_error!(self.repository.read_subscription(), "get", "subscription")
    }

    async fn checkout(&self, plan: Plan) -> Result<CheckoutSession, ApiError> {
        log_on_error!(self.repository.create_checkout(plan), "create", "checkout")
    }

    async fn cancel_subscription(&self) -> Result<(), ApiError> {
        log_on_error!(
            self.repository.cancel_subscription(),
            "cancel",
            "subscription"
        )
    }
}
