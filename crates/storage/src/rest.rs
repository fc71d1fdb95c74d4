//! REST
//!
//! Every call carries the stored access token. A call rejected with 401 triggers one refresh of
//! the token pair followed by one retry. If the refresh fails, the session is cleared and the
//! user is sent to the login page.

use futures_util::lock::Mutex;
use log::{debug, error, warn};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use stride_domain as domain;
use stride_web_app::{BrowserNavigator, Config, Navigator};

use crate::local_storage::{LocalStorage, TokenStore};

mod schema;

pub use schema::*;

const UNAUTHORIZED: u16 = 401;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        let mut builder = match request.method {
            Method::Get => gloo_net::http::Request::get(&request.url),
            Method::Post => gloo_net::http::Request::post(&request.url),
            Method::Put => gloo_net::http::Request::put(&request.url),
            Method::Delete => gloo_net::http::Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let request = match request.body {
            Some(body) => builder.body(body)?,
            None => builder.build()?,
        };
        let response = request.send().await?;
        Ok(Response {
            status: response.status(),
            body: response.text().await?,
        })
    }
}

pub struct REST<S, T, N> {
    pub sender: S,
    pub session: T,
    pub navigator: N,
    pub config: Config,
    refresh_lock: Mutex<()>,
}

impl REST<GlooNetSendRequest, TokenStore<LocalStorage>, BrowserNavigator> {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with(
            GlooNetSendRequest,
            TokenStore::new(LocalStorage),
            BrowserNavigator,
            config,
        )
    }
}

impl<S, T, N> REST<S, T, N> {
    pub fn with(sender: S, session: T, navigator: N, config: Config) -> Self {
        Self {
            sender,
            session,
            navigator,
            config,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &T {
        &self.session
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> REST<S, T, N> {
    /// Performs an authenticated call and returns the decoded response body.
    ///
    /// `headers` are sent in addition to `Content-Type: application/json`, which they may
    /// override. The `Authorization` header is always derived from the stored access token.
    /// An empty response body results in [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns an error if no response was obtained, the response signals a failure or the
    /// session could not be refreshed after being rejected.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<Value, domain::ApiError> {
        Ok(self.perform(method, endpoint, body, headers).await?.1)
    }

    /// Replaces the token pair using the stored refresh token.
    ///
    /// Returns `false` without contacting the server if no refresh token is stored. The stored
    /// tokens are only modified if the server issued a complete new pair.
    pub async fn refresh(&self) -> bool {
        let Some(refresh_token) = self.session.read_refresh_token() else {
            debug!("no refresh token available");
            return false;
        };

        let body = json!({ "refreshToken": refresh_token.as_str() });
        let response = match self
            .send(Method::Post, "/auth/refresh", Some(&body), &[], None)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!("failed to refresh session: {err}");
                return false;
            }
        };

        if !response.ok() {
            debug!("failed to refresh session: status {}", response.status);
            return false;
        }

        let Some(tokens) = serde_json::from_str::<Envelope<TokenPair>>(&response.body)
            .ok()
            .filter(|envelope| envelope.success)
            .and_then(|envelope| envelope.data)
            .and_then(TokenPair::into_tokens)
        else {
            warn!("failed to refresh session: incomplete token pair");
            return false;
        };

        match self.session.write_tokens(&tokens) {
            Ok(()) => {
                debug!("session refreshed");
                true
            }
            Err(err) => {
                error!("failed to store refreshed session: {err}");
                false
            }
        }
    }

    async fn perform(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<(u16, Value), domain::ApiError> {
        let token = self.session.read_access_token();
        let response = self
            .send(method, endpoint, body, headers, token.as_ref())
            .await?;

        match token {
            Some(rejected) if response.status == UNAUTHORIZED => {
                debug!("{method} {endpoint} unauthorized");
                self.renew_after_unauthorized(&rejected).await?;
                let token = self.session.read_access_token();
                parse(
                    self.send(method, endpoint, body, headers, token.as_ref())
                        .await?,
                )
            }
            _ => parse(response),
        }
    }

    /// Waits for a concurrent refresh to finish. Refreshes only if no other call has already
    /// replaced the rejected token, and expires the session only if no other call has already
    /// done so.
    async fn renew_after_unauthorized(
        &self,
        rejected: &domain::AccessToken,
    ) -> Result<(), domain::ApiError> {
        let _guard = self.refresh_lock.lock().await;
        match self.session.read_access_token() {
            Some(current) if current != *rejected => Ok(()),
            Some(_) => {
                if self.refresh().await {
                    Ok(())
                } else {
                    Err(self.expire_session())
                }
            }
            None => Err(domain::ApiError::SessionExpired),
        }
    }

    fn expire_session(&self) -> domain::ApiError {
        warn!("session expired");
        self.session.clear();
        let path = self.navigator.current_path();
        if path != self.config.login_path {
            if let Err(err) = self.session.write_redirect_after_login(&path) {
                error!("failed to remember page before login: {err}");
            }
        }
        self.navigator.navigate(&self.config.login_path);
        domain::ApiError::SessionExpired
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
        token: Option<&domain::AccessToken>,
    ) -> Result<Response, domain::ApiError> {
        let mut merged = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in headers {
            if !name.eq_ignore_ascii_case("Authorization") {
                set_header(&mut merged, name, value);
            }
        }
        if let Some(token) = token {
            set_header(&mut merged, "Authorization", &token.bearer());
        }
        self.sender
            .send_request(Request {
                method,
                url: self.config.endpoint_url(endpoint),
                headers: merged,
                body: body.map(Value::to_string),
            })
            .await
            .map_err(|err| domain::ApiError::Network(err.to_string()))
    }

    async fn fetch<D: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<D, domain::ApiError> {
        let (status, value) = self.perform(method, endpoint, body, &[]).await?;
        decode(status, value)?.ok_or_else(|| invalid_response(status, "missing data"))
    }

    async fn fetch_optional<D: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
    ) -> Result<Option<D>, domain::ApiError> {
        let (status, value) = self.perform(method, endpoint, None, &[]).await?;
        decode(status, value)
    }

    async fn fetch_no_content(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<(), domain::ApiError> {
        let (status, value) = self.perform(method, endpoint, body, &[]).await?;
        if value.get("success") == Some(&Value::Bool(false)) {
            return Err(domain::ApiError::Request {
                status,
                message: failure_message(&value, status),
            });
        }
        Ok(())
    }

    async fn authenticate(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<domain::User, domain::ApiError> {
        let data: AuthData = self.fetch(Method::Post, endpoint, Some(body)).await?;
        let tokens = domain::Tokens::new(data.access_token, data.refresh_token);
        let user = domain::User::from(data.user);
        self.session.write_tokens(&tokens)?;
        self.store_user(&user);
        Ok(user)
    }

    fn store_user(&self, user: &domain::User) {
        if let Err(err) = self.session.write_user(user) {
            error!("failed to store user: {err}");
        }
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> domain::AuthRepository
    for REST<S, T, N>
{
    async fn register(
        &self,
        registration: domain::Registration,
    ) -> Result<domain::User, domain::ApiError> {
        let password: &String = registration.password.as_ref();
        self.authenticate(
            "/auth/register",
            &json!({
                "name": registration.name.to_string(),
                "email": registration.email.to_string(),
                "password": password,
            }),
        )
        .await
    }

    async fn login(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::User, domain::ApiError> {
        let password: &String = credentials.password.as_ref();
        self.authenticate(
            "/auth/login",
            &json!({
                "email": credentials.email.to_string(),
                "password": password,
            }),
        )
        .await
    }

    async fn logout(&self) {
        if let Some(refresh_token) = self.session.read_refresh_token() {
            let token = self.session.read_access_token();
            let body = json!({ "refreshToken": refresh_token.as_str() });
            if let Err(err) = self
                .send(Method::Post, "/auth/logout", Some(&body), &[], token.as_ref())
                .await
            {
                debug!("failed to log out on server: {err}");
            }
        }
        self.session.clear();
        self.navigator.navigate(&self.config.login_path);
    }

    async fn read_current_user(&self) -> Result<domain::User, domain::ApiError> {
        let data: UserData = self.fetch(Method::Get, "/auth/me", None).await?;
        let user = domain::User::from(User::from(data));
        self.store_user(&user);
        Ok(user)
    }

    async fn change_password(
        &self,
        current: domain::Password,
        new: domain::Password,
    ) -> Result<(), domain::ApiError> {
        let current: &String = current.as_ref();
        let new: &String = new.as_ref();
        self.fetch_no_content(
            Method::Post,
            "/auth/change-password",
            Some(&json!({ "currentPassword": current, "newPassword": new })),
        )
        .await
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> domain::WorkoutRepository
    for REST<S, T, N>
{
    async fn read_workouts(
        &self,
        filter: &domain::Filter,
    ) -> Result<Vec<domain::Workout>, domain::ApiError> {
        let endpoint = with_query("/workouts", &filter.allowed(domain::WORKOUT_FILTER_KEYS));
        let workouts: List<Workout> = self.fetch(Method::Get, &endpoint, None).await?;
        Ok(workouts.into_domain())
    }

    async fn search_workouts(
        &self,
        query: &str,
        filter: &domain::Filter,
    ) -> Result<Vec<domain::Workout>, domain::ApiError> {
        let mut params = vec![("q", query)];
        params.extend(filter.allowed(domain::WORKOUT_FILTER_KEYS));
        let endpoint = with_query("/workouts/search", &params);
        let workouts: List<Workout> = self.fetch(Method::Get, &endpoint, None).await?;
        Ok(workouts.into_domain())
    }

    async fn read_workout(
        &self,
        id: &domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ApiError> {
        let workout: Workout = self
            .fetch(Method::Get, &path(&["workouts", id.as_str()]), None)
            .await?;
        Ok(workout.into())
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> domain::ProgramRepository
    for REST<S, T, N>
{
    async fn read_programs(
        &self,
        filter: &domain::Filter,
    ) -> Result<Vec<domain::Program>, domain::ApiError> {
        let endpoint = with_query("/programs", &filter.allowed(domain::PROGRAM_FILTER_KEYS));
        let programs: List<Program> = self.fetch(Method::Get, &endpoint, None).await?;
        Ok(programs.into_domain())
    }

    async fn read_program(
        &self,
        id: &domain::ProgramID,
    ) -> Result<domain::Program, domain::ApiError> {
        let program: Program = self
            .fetch(Method::Get, &path(&["programs", id.as_str()]), None)
            .await?;
        Ok(program.into())
    }

    async fn create_enrollment(
        &self,
        id: &domain::ProgramID,
    ) -> Result<domain::Enrollment, domain::ApiError> {
        let enrollment: Enrollment = self
            .fetch(
                Method::Post,
                &path(&["programs", id.as_str(), "enroll"]),
                None,
            )
            .await?;
        Ok(enrollment.into())
    }

    async fn read_enrollments(&self) -> Result<Vec<domain::Enrollment>, domain::ApiError> {
        let enrollments: List<Enrollment> = self
            .fetch(Method::Get, "/programs/my-enrollments", None)
            .await?;
        Ok(enrollments.into_domain())
    }

    async fn update_enrollment_progress(
        &self,
        id: &domain::EnrollmentID,
        progress: domain::EnrollmentProgress,
    ) -> Result<domain::Enrollment, domain::ApiError> {
        let mut content = Map::new();
        content.insert("currentWeek".into(), json!(progress.current_week));
        content.insert("currentDay".into(), json!(progress.current_day));
        insert_some(
            &mut content,
            "completedWorkout",
            progress.completed_workout.as_ref().map(domain::WorkoutID::as_str),
        );
        let enrollment: Enrollment = self
            .fetch(
                Method::Put,
                &path(&["programs", "enrollments", id.as_str(), "progress"]),
                Some(&Value::Object(content)),
            )
            .await?;
        Ok(enrollment.into())
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> domain::ProgressRepository
    for REST<S, T, N>
{
    async fn create_workout_log(
        &self,
        log: domain::WorkoutLog,
    ) -> Result<domain::ProgressEntry, domain::ApiError> {
        let mut content = Map::new();
        insert_some(
            &mut content,
            "workoutId",
            log.workout_id.as_ref().map(domain::WorkoutID::as_str),
        );
        content.insert("duration".into(), json!(log.duration));
        insert_some(&mut content, "sets", log.sets);
        insert_some(&mut content, "reps", log.reps);
        insert_some(&mut content, "caloriesBurned", log.calories_burned);
        insert_some(&mut content, "heartRate", log.heart_rate);
        if !log.notes.is_empty() {
            content.insert("notes".into(), json!(log.notes));
        }
        let entry: ProgressEntry = self
            .fetch(Method::Post, "/progress", Some(&Value::Object(content)))
            .await?;
        Ok(entry.into())
    }

    async fn read_progress(
        &self,
        filter: &domain::Filter,
    ) -> Result<Vec<domain::ProgressEntry>, domain::ApiError> {
        let endpoint = with_query("/progress/me", &filter.allowed(domain::PROGRESS_FILTER_KEYS));
        let entries: List<ProgressEntry> = self.fetch(Method::Get, &endpoint, None).await?;
        Ok(entries.into_domain())
    }

    async fn read_stats(&self) -> Result<domain::ProgressStats, domain::ApiError> {
        let stats: ProgressStats = self.fetch(Method::Get, "/progress/stats", None).await?;
        Ok(stats.into())
    }

    async fn read_history(
        &self,
        period: domain::HistoryPeriod,
    ) -> Result<Vec<domain::HistoryPoint>, domain::ApiError> {
        let period = period.to_string();
        let endpoint = with_query("/progress/history", &[("period", period.as_str())]);
        let history: List<HistoryPoint> = self.fetch(Method::Get, &endpoint, None).await?;
        Ok(history.into_domain())
    }

    async fn read_streaks(&self) -> Result<domain::Streaks, domain::ApiError> {
        let streaks: Streaks = self.fetch(Method::Get, "/progress/streaks", None).await?;
        Ok(streaks.into())
    }

    async fn read_achievements(&self) -> Result<Vec<domain::Achievement>, domain::ApiError> {
        let achievements: List<Achievement> = self
            .fetch(Method::Get, "/progress/achievements", None)
            .await?;
        Ok(achievements.into_domain())
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> domain::UserRepository
    for REST<S, T, N>
{
    async fn read_profile(&self) -> Result<domain::User, domain::ApiError> {
        let data: UserData = self.fetch(Method::Get, "/users/me", None).await?;
        Ok(User::from(data).into())
    }

    async fn update_profile(
        &self,
        update: domain::ProfileUpdate,
    ) -> Result<domain::User, domain::ApiError> {
        let mut content = Map::new();
        insert_some(&mut content, "name", update.name.map(|name| name.to_string()));
        insert_some(&mut content, "height", update.height);
        insert_some(&mut content, "weight", update.weight);
        insert_some(&mut content, "fitnessGoal", update.fitness_goal);
        let data: UserData = self
            .fetch(Method::Put, "/users/me", Some(&Value::Object(content)))
            .await?;
        let user = domain::User::from(User::from(data));
        self.store_user(&user);
        Ok(user)
    }

    async fn create_body_metrics(
        &self,
        metrics: domain::BodyMetrics,
    ) -> Result<domain::BodyMetrics, domain::ApiError> {
        let mut content = Map::new();
        insert_some(&mut content, "weight", metrics.weight);
        insert_some(&mut content, "bodyFat", metrics.body_fat);
        insert_some(&mut content, "muscleMass", metrics.muscle_mass);
        insert_some(&mut content, "restingHeartRate", metrics.resting_heart_rate);
        let metrics: BodyMetrics = self
            .fetch(Method::Post, "/users/metrics", Some(&Value::Object(content)))
            .await?;
        Ok(metrics.into())
    }

    async fn read_body_metrics(
        &self,
        filter: &domain::Filter,
    ) -> Result<Vec<domain::BodyMetrics>, domain::ApiError> {
        let endpoint = with_query(
            "/users/metrics/history",
            &filter.allowed(domain::METRICS_FILTER_KEYS),
        );
        let metrics: List<BodyMetrics> = self.fetch(Method::Get, &endpoint, None).await?;
        Ok(metrics.into_domain())
    }
}

impl<S: SendRequest, T: domain::TokenRepository, N: Navigator> domain::SubscriptionRepository
    for REST<S, T, N>
{
    async fn read_subscription(&self) -> Result<Option<domain::Subscription>, domain::ApiError> {
        let Some(subscription) = self
            .fetch_optional::<Subscription>(Method::Get, "/subscriptions/me")
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(
            subscription
                .try_into()
                .map_err(|err| invalid_response(200, err))?,
        ))
    }

    async fn create_checkout(
        &self,
        plan: domain::Plan,
    ) -> Result<domain::CheckoutSession, domain::ApiError> {
        let session: CheckoutSession = self
            .fetch(
                Method::Post,
                "/subscriptions/checkout",
                Some(&json!({ "plan": plan.to_string() })),
            )
            .await?;
        Ok(session.into())
    }

    async fn cancel_subscription(&self) -> Result<(), domain::ApiError> {
        self.fetch_no_content(Method::Post, "/subscriptions/cancel", None)
            .await
    }
}

fn parse(response: Response) -> Result<(u16, Value), domain::ApiError> {
    let status = response.status;
    let value = if response.body.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(_) if !response.ok() => Value::Null,
            Err(err) => return Err(invalid_response(status, err)),
        }
    };

    if response.ok() {
        Ok((status, value))
    } else {
        Err(domain::ApiError::Request {
            status,
            message: failure_message(&value, status),
        })
    }
}

fn decode<D: DeserializeOwned>(status: u16, value: Value) -> Result<Option<D>, domain::ApiError> {
    let envelope = serde_json::from_value::<Envelope<D>>(value)
        .map_err(|err| invalid_response(status, err))?;
    if !envelope.success {
        return Err(domain::ApiError::Request {
            status,
            message: envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| format!("Request failed ({status})")),
        });
    }
    Ok(envelope.data)
}

fn failure_message(value: &Value, status: u16) -> String {
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map_or_else(|| format!("Request failed ({status})"), ToString::to_string)
}

fn invalid_response(status: u16, err: impl std::fmt::Display) -> domain::ApiError {
    domain::ApiError::Request {
        status,
        message: format!("invalid response: {err}"),
    }
}

fn with_query(endpoint: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    url::form_urlencoded::Serializer::for_suffix(format!("{endpoint}?"), endpoint.len() + 1)
        .extend_pairs(params)
        .finish()
}

/// Endpoint path made of percent-encoded segments.
fn path(segments: &[&str]) -> String {
    match url::Url::parse("http://localhost/") {
        Ok(mut url) => {
            if let Ok(mut path) = url.path_segments_mut() {
                path.clear().extend(segments);
            }
            url.path().to_string()
        }
        Err(_) => format!("/{}", segments.join("/")),
    }
}

/// Replaces a header of the same name, compared case-insensitively, or appends it.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers
        .iter_mut()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        Some(header) => header.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

fn insert_some<V: Serialize>(content: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        content.insert(key.into(), json!(value));
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    };

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use stride_domain::{
        AuthRepository, ProgramRepository, ProgressRepository, SubscriptionRepository,
        TokenRepository, UserRepository, WorkoutRepository,
    };

    use super::*;
    use crate::local_storage::{KeyValueStore, MemoryStorage};
    use crate::tests::data::{
        ENROLLMENT_JSON, PROGRAM_JSON, PROGRESS_ENTRY_JSON, USER, USER_JSON, WORKOUT_JSON, envelope,
    };

    type Route = Box<dyn Fn(&Request) -> Result<Response, gloo_net::Error>>;

    struct MockSendRequest {
        requests: RefCell<Vec<Request>>,
        route: Route,
    }

    impl SendRequest for MockSendRequest {
        async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
            self.requests.borrow_mut().push(request.clone());
            YieldNow(false).await;
            (self.route)(&request)
        }
    }

    /// Lets other futures polled by the same task make progress once.
    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct MockNavigator {
        path: String,
        navigated_to: RefCell<Vec<String>>,
    }

    impl Navigator for MockNavigator {
        fn current_path(&self) -> String {
            self.path.clone()
        }
        fn navigate(&self, path: &str) {
            self.navigated_to.borrow_mut().push(path.to_string());
        }
    }

    type MockREST = REST<MockSendRequest, TokenStore<MemoryStorage>, MockNavigator>;

    fn rest_with_route(
        tokens: Option<(&str, &str)>,
        route: impl Fn(&Request) -> Result<Response, gloo_net::Error> + 'static,
    ) -> MockREST {
        let session = TokenStore::new(MemoryStorage::default());
        if let Some((access, refresh)) = tokens {
            session
                .write_tokens(&domain::Tokens::new(access, refresh))
                .unwrap();
        }
        REST::with(
            MockSendRequest {
                requests: RefCell::new(vec![]),
                route: Box::new(route),
            },
            session,
            MockNavigator {
                path: "/workouts".to_string(),
                navigated_to: RefCell::new(vec![]),
            },
            Config::default(),
        )
    }

    fn respond(status: u16, body: &str) -> Result<Response, gloo_net::Error> {
        Ok(Response {
            status,
            body: body.to_string(),
        })
    }

    fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn body(request: &Request) -> Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    fn requests_to(rest: &MockREST, url: &str) -> usize {
        rest.sender
            .requests
            .borrow()
            .iter()
            .filter(|request| request.url == url)
            .count()
    }

    /// Rejects access token `A` and issues `A2`/`R2` on refresh.
    fn expiring_route(request: &Request) -> Result<Response, gloo_net::Error> {
        if request.url == "/api/v1/auth/refresh" {
            return respond(
                200,
                &envelope(&json!({ "accessToken": "A2", "refreshToken": "R2" })),
            );
        }
        match header(request, "Authorization") {
            Some("Bearer A2") => respond(200, &envelope(&WORKOUT_JSON)),
            _ => respond(401, r#"{"success":false,"error":"Token expired"}"#),
        }
    }

    #[test]
    fn test_request_headers() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, &envelope(&WORKOUT_JSON)));

        block_on(rest.read_workout(&"w1".into())).unwrap();

        let requests = rest.sender.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[0].url, "/api/v1/workouts/w1");
        assert_eq!(
            header(&requests[0], "Content-Type"),
            Some("application/json")
        );
        assert_eq!(header(&requests[0], "Authorization"), Some("Bearer A"));
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn test_request_without_token() {
        let rest = rest_with_route(None, |_| respond(200, &envelope(&json!([]))));

        assert_eq!(
            block_on(rest.read_workouts(&domain::Filter::new())),
            Ok(vec![])
        );
        assert_eq!(
            header(&rest.sender.requests.borrow()[0], "Authorization"),
            None
        );
    }

    #[test]
    fn test_request_returns_raw_json() {
        let rest = rest_with_route(Some(("A", "R")), |request| match request.method {
            Method::Delete => respond(204, ""),
            _ => respond(200, r#"{"success":true,"data":{"version":"1.2.0"}}"#),
        });

        assert_eq!(
            block_on(rest.request(Method::Get, "/health", None, &[])),
            Ok(json!({ "success": true, "data": { "version": "1.2.0" } }))
        );
        assert_eq!(
            block_on(rest.request(Method::Delete, "/progress/pe1", None, &[])),
            Ok(Value::Null)
        );
    }

    #[test]
    fn test_request_custom_headers_are_sent_on_retry() {
        let rest = rest_with_route(Some(("A", "R")), expiring_route);

        block_on(rest.request(
            Method::Get,
            "/workouts/w1",
            None,
            &[("X-Client", "stride-web")],
        ))
        .unwrap();

        let requests = rest.sender.requests.borrow();
        assert_eq!(requests.len(), 3);
        assert_eq!(header(&requests[0], "X-Client"), Some("stride-web"));
        assert_eq!(header(&requests[0], "Authorization"), Some("Bearer A"));
        assert_eq!(requests[1].url, "/api/v1/auth/refresh");
        assert_eq!(header(&requests[1], "X-Client"), None);
        assert_eq!(header(&requests[2], "X-Client"), Some("stride-web"));
        assert_eq!(header(&requests[2], "Authorization"), Some("Bearer A2"));
    }

    #[test]
    fn test_request_custom_headers_are_merged() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, &envelope(&json!({}))));

        block_on(rest.request(
            Method::Post,
            "/progress",
            Some(&json!({ "duration": 30 })),
            &[
                ("content-type", "application/merge-patch+json"),
                ("Authorization", "Bearer forged"),
            ],
        ))
        .unwrap();

        let requests = rest.sender.requests.borrow();
        assert_eq!(
            requests[0].headers,
            vec![
                (
                    "Content-Type".to_string(),
                    "application/merge-patch+json".to_string()
                ),
                ("Authorization".to_string(), "Bearer A".to_string()),
            ]
        );
    }

    #[test]
    fn test_unauthorized_refreshes_and_retries() {
        let rest = rest_with_route(Some(("A", "R")), expiring_route);

        let workout = block_on(rest.read_workout(&"w1".into())).unwrap();

        assert_eq!(workout.id, "w1".into());
        let requests = rest.sender.requests.borrow();
        assert_eq!(requests.len(), 3);
        assert_eq!(header(&requests[0], "Authorization"), Some("Bearer A"));
        assert_eq!(requests[1].url, "/api/v1/auth/refresh");
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(header(&requests[1], "Authorization"), None);
        assert_eq!(body(&requests[1]), json!({ "refreshToken": "R" }));
        assert_eq!(requests[2].url, "/api/v1/workouts/w1");
        assert_eq!(header(&requests[2], "Authorization"), Some("Bearer A2"));
        assert_eq!(rest.session.read_access_token(), Some("A2".into()));
        assert_eq!(rest.session.read_refresh_token(), Some("R2".into()));
        assert!(rest.navigator.navigated_to.borrow().is_empty());
    }

    #[test]
    fn test_unauthorized_after_refresh() {
        let rest = rest_with_route(Some(("A", "R")), |request| {
            if request.url == "/api/v1/auth/refresh" {
                respond(
                    200,
                    &envelope(&json!({ "accessToken": "A2", "refreshToken": "R2" })),
                )
            } else {
                respond(401, r#"{"error":"Forbidden for this account"}"#)
            }
        });

        assert_eq!(
            block_on(rest.read_workout(&"w1".into())),
            Err(domain::ApiError::Request {
                status: 401,
                message: "Forbidden for this account".to_string()
            })
        );
        assert_eq!(rest.sender.requests.borrow().len(), 3);
        assert_eq!(requests_to(&rest, "/api/v1/auth/refresh"), 1);
        assert!(rest.session.is_authenticated());
    }

    #[test]
    fn test_unauthorized_without_token() {
        let rest = rest_with_route(None, |_| {
            respond(401, r#"{"success":false,"error":"Invalid credentials"}"#)
        });

        assert_eq!(
            block_on(rest.login(domain::Credentials {
                email: domain::Email::new("alice@example.com").unwrap(),
                password: domain::Password::new("wrong-password").unwrap(),
            })),
            Err(domain::ApiError::Request {
                status: 401,
                message: "Invalid credentials".to_string()
            })
        );
        assert_eq!(rest.sender.requests.borrow().len(), 1);
        assert!(rest.navigator.navigated_to.borrow().is_empty());
    }

    #[test]
    fn test_refresh_failure_expires_session() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(401, r#"{"success":false,"error":"Invalid refresh token"}"#)
        });
        rest.session.write_user(&USER).unwrap();

        assert_eq!(
            block_on(rest.read_workouts(&domain::Filter::new())),
            Err(domain::ApiError::SessionExpired)
        );
        assert_eq!(rest.sender.requests.borrow().len(), 2);
        assert_eq!(rest.session.read_access_token(), None);
        assert_eq!(rest.session.read_refresh_token(), None);
        assert_eq!(rest.session.read_user(), None);
        assert_eq!(
            *rest.navigator.navigated_to.borrow(),
            vec!["/login".to_string()]
        );
        assert_eq!(
            rest.session.take_redirect_after_login(),
            Some("/workouts".to_string())
        );
    }

    #[test]
    fn test_refresh() {
        let rest = rest_with_route(Some(("A", "R")), expiring_route);

        assert!(block_on(rest.refresh()));
        assert_eq!(rest.session.read_access_token(), Some("A2".into()));
        assert_eq!(rest.session.read_refresh_token(), Some("R2".into()));
    }

    #[test]
    fn test_refresh_without_refresh_token() {
        let rest = rest_with_route(None, expiring_route);

        assert!(!block_on(rest.refresh()));
        assert!(rest.sender.requests.borrow().is_empty());
    }

    #[rstest]
    #[case::server_error(500, r#"{"success":false,"error":"Internal error"}"#)]
    #[case::not_successful(200, r#"{"success":false,"data":{"accessToken":"A2","refreshToken":"R2"}}"#)]
    #[case::missing_refresh_token(200, r#"{"success":true,"data":{"accessToken":"A2"}}"#)]
    #[case::empty_access_token(200, r#"{"success":true,"data":{"accessToken":"","refreshToken":"R2"}}"#)]
    #[case::missing_data(200, r#"{"success":true}"#)]
    #[case::not_json(200, "<html></html>")]
    fn test_refresh_rejected(#[case] status: u16, #[case] response: &'static str) {
        let rest = rest_with_route(Some(("A", "R")), move |_| respond(status, response));

        assert!(!block_on(rest.refresh()));
        assert_eq!(rest.session.read_access_token(), Some("A".into()));
        assert_eq!(rest.session.read_refresh_token(), Some("R".into()));
    }

    #[test]
    fn test_refresh_no_connection() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            Err(gloo_net::Error::GlooError("offline".to_string()))
        });

        assert!(!block_on(rest.refresh()));
        assert_eq!(rest.session.read_access_token(), Some("A".into()));
    }

    #[test]
    fn test_concurrent_unauthorized_requests_refresh_once() {
        let rest = rest_with_route(Some(("A", "R")), expiring_route);

        let first_id: domain::WorkoutID = "w1".into();
        let second_id: domain::WorkoutID = "w1".into();
        let (first, second) = block_on(async {
            futures::join!(
                rest.read_workout(&first_id),
                rest.read_workout(&second_id)
            )
        });

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(requests_to(&rest, "/api/v1/auth/refresh"), 1);
        assert_eq!(requests_to(&rest, "/api/v1/workouts/w1"), 4);
        assert_eq!(rest.session.read_access_token(), Some("A2".into()));
        assert_eq!(rest.session.read_refresh_token(), Some("R2".into()));
    }

    #[test]
    fn test_concurrent_unauthorized_requests_expire_session_once() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(401, r#"{"success":false,"error":"Invalid refresh token"}"#)
        });

        let first_id: domain::WorkoutID = "w1".into();
        let second_id: domain::WorkoutID = "w2".into();
        let (first, second) = block_on(async {
            futures::join!(
                rest.read_workout(&first_id),
                rest.read_workout(&second_id)
            )
        });

        assert_eq!(first, Err(domain::ApiError::SessionExpired));
        assert_eq!(second, Err(domain::ApiError::SessionExpired));
        assert_eq!(requests_to(&rest, "/api/v1/auth/refresh"), 1);
        assert_eq!(
            *rest.navigator.navigated_to.borrow(),
            vec!["/login".to_string()]
        );
        assert_eq!(
            rest.session.take_redirect_after_login(),
            Some("/workouts".to_string())
        );
    }

    #[rstest]
    #[case(500, r#"{"success":false,"error":"Database unavailable"}"#, "Database unavailable")]
    #[case(400, r#"{"success":false,"message":"Title is required"}"#, "Title is required")]
    #[case(404, r#"{"error":"Not found","message":"No workout w9"}"#, "Not found")]
    #[case(502, "<html>Bad Gateway</html>", "Request failed (502)")]
    #[case(503, "", "Request failed (503)")]
    #[case(409, r#"{"success":false}"#, "Request failed (409)")]
    fn test_request_failure_message(
        #[case] status: u16,
        #[case] response: &'static str,
        #[case] expected: &str,
    ) {
        let rest = rest_with_route(Some(("A", "R")), move |_| respond(status, response));

        assert_eq!(
            block_on(rest.read_workout(&"w9".into())),
            Err(domain::ApiError::Request {
                status,
                message: expected.to_string()
            })
        );
    }

    #[test]
    fn test_unsuccessful_envelope() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(200, r#"{"success":false,"message":"Already enrolled"}"#)
        });

        assert_eq!(
            block_on(rest.create_enrollment(&"p1".into())),
            Err(domain::ApiError::Request {
                status: 200,
                message: "Already enrolled".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_response() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, "<html></html>"));

        assert!(matches!(
            block_on(rest.read_stats()),
            Err(domain::ApiError::Request { status: 200, message }) if message.starts_with("invalid response")
        ));
    }

    #[test]
    fn test_no_connection() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            Err(gloo_net::Error::GlooError("offline".to_string()))
        });

        assert!(matches!(
            block_on(rest.read_streaks()),
            Err(domain::ApiError::Network(_))
        ));
        assert!(rest.session.is_authenticated());
    }

    #[test]
    fn test_workout_filter() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(200, &envelope(&json!({ "workouts": [WORKOUT_JSON.clone()] })))
        });
        let filter = domain::Filter::new()
            .with("page", 2)
            .with("category", "strength")
            .with("sort", "-createdAt")
            .with("limit", 10)
            .with("difficulty", "");

        let workouts = block_on(rest.read_workouts(&filter)).unwrap();

        assert_eq!(workouts.len(), 1);
        assert_eq!(
            rest.sender.requests.borrow()[0].url,
            "/api/v1/workouts?category=strength&limit=10&page=2"
        );
    }

    #[test]
    fn test_search_workouts() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, &envelope(&json!([]))));
        let filter = domain::Filter::new()
            .with("difficulty", "advanced")
            .with("q", "ignored");

        block_on(rest.search_workouts("leg day & core", &filter)).unwrap();

        assert_eq!(
            rest.sender.requests.borrow()[0].url,
            "/api/v1/workouts/search?q=leg+day+%26+core&difficulty=advanced"
        );
    }

    #[test]
    fn test_program_endpoints() {
        let rest = rest_with_route(Some(("A", "R")), |request| {
            if request.url.ends_with("/my-enrollments") {
                respond(200, &envelope(&json!({ "enrollments": [ENROLLMENT_JSON.clone()] })))
            } else if request.url.starts_with("/api/v1/programs?") {
                respond(200, &envelope(&json!({ "programs": [PROGRAM_JSON.clone()] })))
            } else {
                respond(200, &envelope(&ENROLLMENT_JSON))
            }
        });

        let enrollments = block_on(rest.read_enrollments()).unwrap();
        assert_eq!(enrollments[0].program_id, "p1".into());

        block_on(rest.create_enrollment(&"p1".into())).unwrap();
        block_on(rest.update_enrollment_progress(
            &"e1".into(),
            domain::EnrollmentProgress {
                current_week: 1,
                current_day: 3,
                completed_workout: Some("w1".into()),
            },
        ))
        .unwrap();
        let programs =
            block_on(rest.read_programs(&domain::Filter::new().with("goal", "endurance")))
                .unwrap();
        assert_eq!(programs[0].workouts_per_week, Some(3));

        let requests = rest.sender.requests.borrow();
        assert_eq!(requests[0].url, "/api/v1/programs/my-enrollments");
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, "/api/v1/programs/p1/enroll");
        assert_eq!(requests[2].method, Method::Put);
        assert_eq!(requests[2].url, "/api/v1/programs/enrollments/e1/progress");
        assert_eq!(
            body(&requests[2]),
            json!({ "currentWeek": 1, "currentDay": 3, "completedWorkout": "w1" })
        );
        assert_eq!(requests[3].url, "/api/v1/programs?goal=endurance");
    }

    #[test]
    fn test_log_workout() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(201, &envelope(&PROGRESS_ENTRY_JSON))
        });
        let form = domain::WorkoutLogForm {
            workout_id: "w1".to_string(),
            duration: "45".to_string(),
            calories_burned: " 300 ".to_string(),
            ..domain::WorkoutLogForm::default()
        };
        let log = domain::WorkoutLog::try_from(&form).unwrap();

        let entry = block_on(rest.create_workout_log(log)).unwrap();

        assert_eq!(entry.duration, 45);
        let requests = rest.sender.requests.borrow();
        assert_eq!(requests[0].url, "/api/v1/progress");
        assert_eq!(
            body(&requests[0]),
            json!({ "workoutId": "w1", "duration": 45, "caloriesBurned": 300 })
        );
    }

    #[test]
    fn test_progress_queries() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, &envelope(&json!([]))));

        block_on(rest.read_progress(&domain::Filter::new().with("limit", 5).with("days", 7)))
            .unwrap();
        block_on(rest.read_history(domain::HistoryPeriod::Month)).unwrap();
        block_on(rest.read_achievements()).unwrap();
        block_on(rest.read_body_metrics(&domain::Filter::new().with("limit", 30))).unwrap();

        let urls = rest
            .sender
            .requests
            .borrow()
            .iter()
            .map(|request| request.url.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "/api/v1/progress/me?limit=5",
                "/api/v1/progress/history?period=month",
                "/api/v1/progress/achievements",
                "/api/v1/users/metrics/history?limit=30",
            ]
        );
    }

    #[test]
    fn test_login_stores_session() {
        let rest = rest_with_route(None, |_| {
            respond(
                200,
                &envelope(&json!({
                    "user": USER_JSON.clone(),
                    "accessToken": "A",
                    "refreshToken": "R"
                })),
            )
        });

        let user = block_on(rest.login(domain::Credentials {
            email: domain::Email::new("alice@example.com").unwrap(),
            password: domain::Password::new("secret123").unwrap(),
        }))
        .unwrap();

        assert_eq!(user, USER.clone());
        let requests = rest.sender.requests.borrow();
        assert_eq!(requests[0].url, "/api/v1/auth/login");
        assert_eq!(
            body(&requests[0]),
            json!({ "email": "alice@example.com", "password": "secret123" })
        );
        assert_eq!(rest.session.read_access_token(), Some("A".into()));
        assert_eq!(rest.session.read_refresh_token(), Some("R".into()));
        assert_eq!(rest.session.read_user(), Some(USER.clone()));
    }

    /// Store that rejects every write.
    struct ReadOnlyStorage;

    impl KeyValueStore for ReadOnlyStorage {
        fn get(&self, _: &str) -> Option<String> {
            None
        }
        fn set(&self, _: &str, _: &str) -> Result<(), String> {
            Err("quota exceeded".to_string())
        }
        fn delete(&self, _: &str) {}
    }

    #[test]
    fn test_login_storage_failure() {
        let rest = REST::with(
            MockSendRequest {
                requests: RefCell::new(vec![]),
                route: Box::new(|_| {
                    respond(
                        200,
                        &envelope(&json!({
                            "user": USER_JSON.clone(),
                            "accessToken": "A",
                            "refreshToken": "R"
                        })),
                    )
                }),
            },
            TokenStore::new(ReadOnlyStorage),
            MockNavigator {
                path: "/login".to_string(),
                navigated_to: RefCell::new(vec![]),
            },
            Config::default(),
        );

        assert_eq!(
            block_on(rest.login(domain::Credentials {
                email: domain::Email::new("alice@example.com").unwrap(),
                password: domain::Password::new("secret123").unwrap(),
            })),
            Err(domain::ApiError::Storage(domain::StorageError::Write {
                key: "accessToken".to_string(),
                message: "quota exceeded".to_string()
            }))
        );
    }

    #[test]
    fn test_read_current_user_stores_user() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(200, &envelope(&json!({ "user": USER_JSON.clone() })))
        });

        assert_eq!(block_on(rest.read_current_user()), Ok(USER.clone()));
        assert_eq!(rest.session.read_user(), Some(USER.clone()));
    }

    #[test]
    fn test_update_profile_stores_user() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, &envelope(&USER_JSON)));

        block_on(rest.update_profile(domain::ProfileUpdate {
            weight: Some(61.5),
            ..domain::ProfileUpdate::default()
        }))
        .unwrap();

        let requests = rest.sender.requests.borrow();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, "/api/v1/users/me");
        assert_eq!(body(&requests[0]), json!({ "weight": 61.5 }));
        assert_eq!(rest.session.read_user(), Some(USER.clone()));
    }

    #[test]
    fn test_logout() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            Err(gloo_net::Error::GlooError("offline".to_string()))
        });
        rest.session.write_user(&USER).unwrap();

        block_on(rest.logout());

        let requests = rest.sender.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "/api/v1/auth/logout");
        assert_eq!(body(&requests[0]), json!({ "refreshToken": "R" }));
        assert!(!rest.session.is_authenticated());
        assert_eq!(rest.session.read_user(), None);
        assert_eq!(
            *rest.navigator.navigated_to.borrow(),
            vec!["/login".to_string()]
        );
    }

    #[test]
    fn test_logout_does_not_refresh() {
        let rest = rest_with_route(Some(("A", "R")), expiring_route);

        block_on(rest.logout());

        assert_eq!(rest.sender.requests.borrow().len(), 1);
        assert!(!rest.session.is_authenticated());
    }

    #[test]
    fn test_logout_without_session() {
        let rest = rest_with_route(None, expiring_route);

        block_on(rest.logout());

        assert!(rest.sender.requests.borrow().is_empty());
        assert_eq!(
            *rest.navigator.navigated_to.borrow(),
            vec!["/login".to_string()]
        );
    }

    #[test]
    fn test_checkout() {
        let rest = rest_with_route(Some(("A", "R")), |_| {
            respond(
                200,
                &envelope(&json!({ "url": "https://checkout.example.com/s/1", "sessionId": "s1" })),
            )
        });

        let session = block_on(rest.create_checkout(domain::Plan::new(" premium ").unwrap()))
            .unwrap();

        assert_eq!(session.url, "https://checkout.example.com/s/1");
        assert_eq!(
            body(&rest.sender.requests.borrow()[0]),
            json!({ "plan": "PREMIUM" })
        );
    }

    #[test]
    fn test_subscription() {
        let rest = rest_with_route(Some(("A", "R")), |request| match request.url.as_str() {
            "/api/v1/subscriptions/me" => respond(200, r#"{"success":true,"data":null}"#),
            _ => respond(200, r#"{"success":true,"message":"Subscription cancelled"}"#),
        });

        assert_eq!(block_on(rest.read_subscription()), Ok(None));
        assert_eq!(block_on(rest.cancel_subscription()), Ok(()));
        assert_eq!(
            rest.sender.requests.borrow()[1].url,
            "/api/v1/subscriptions/cancel"
        );
    }

    #[test]
    fn test_change_password() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, r#"{"success":true}"#));

        block_on(rest.change_password(
            domain::Password::new("secret123").unwrap(),
            domain::Password::new("secret456").unwrap(),
        ))
        .unwrap();

        assert_eq!(
            body(&rest.sender.requests.borrow()[0]),
            json!({ "currentPassword": "secret123", "newPassword": "secret456" })
        );
    }

    #[rstest]
    #[case("/workouts", &[], "/workouts")]
    #[case("/workouts", &[("limit", "10")], "/workouts?limit=10")]
    #[case("/workouts/search", &[("q", "a b"), ("page", "1")], "/workouts/search?q=a+b&page=1")]
    fn test_with_query(
        #[case] endpoint: &str,
        #[case] params: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        assert_eq!(with_query(endpoint, params), expected);
    }

    #[rstest]
    #[case("w1", "/workouts/w1")]
    #[case("a b", "/workouts/a%20b")]
    #[case("a/b", "/workouts/a%2Fb")]
    #[case("a+b", "/workouts/a+b")]
    #[case("a?b#c", "/workouts/a%3Fb%23c")]
    fn test_path(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(path(&["workouts", id]), expected);
    }

    #[test]
    fn test_read_workout_encodes_id() {
        let rest = rest_with_route(Some(("A", "R")), |_| respond(200, &envelope(&WORKOUT_JSON)));

        block_on(rest.read_workout(&"a b".into())).unwrap();

        assert_eq!(
            rest.sender.requests.borrow()[0].url,
            "/api/v1/workouts/a%20b"
        );
    }
}
