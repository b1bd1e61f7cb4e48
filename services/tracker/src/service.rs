//! User registration, exercise logging and log queries
//!
//! The service owns no state of its own; the store handle is injected at
//! construction and shared by every request.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    log_query::{self, LogFilter},
    models::{
        AddExerciseRequest, Exercise, ExerciseResponse, LogsQuery, NewUser, User, UserId,
        UserLog, UserSummary,
    },
    repositories::UserRepository,
    validation,
};

/// Operations exposed over HTTP
#[derive(Clone)]
pub struct TrackerService {
    repository: Arc<dyn UserRepository>,
}

impl TrackerService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a user with an empty exercise log
    pub async fn create_user(&self, username: Option<&str>) -> ApiResult<UserSummary> {
        let username = validation::validate_username(username)?;
        let user = self.repository.create(&NewUser { username }).await?;

        info!("Registered user {}", user.id);
        Ok(UserSummary::from(&user))
    }

    /// List every user, id and username only
    pub async fn list_users(&self) -> ApiResult<Vec<UserSummary>> {
        Ok(self.repository.list().await?)
    }

    /// Append an exercise to a user's log
    ///
    /// Input is validated before the user is looked up. The append is a plain
    /// read-modify-write: two concurrent appends for one user may lose one.
    pub async fn add_exercise(
        &self,
        user_id: &str,
        request: &AddExerciseRequest,
    ) -> ApiResult<ExerciseResponse> {
        let duration = validation::parse_duration(request.duration.as_ref())?;
        let date = validation::parse_exercise_date(request.date.as_ref(), Utc::now())?;

        let mut user = self.find_user(user_id).await?;

        let exercise = Exercise {
            description: request.description.clone().unwrap_or_default(),
            duration,
            date,
        };
        user.exercises.push(exercise.clone());
        self.repository.save(&user).await?;

        info!(
            "Logged exercise for user {} ({} entries)",
            user.id,
            user.exercises.len()
        );
        Ok(ExerciseResponse::new(user.id, exercise))
    }

    /// Filtered, limited and formatted view of a user's exercises
    ///
    /// An unknown user is reported before any filter is validated.
    pub async fn get_logs(&self, user_id: &str, query: &LogsQuery) -> ApiResult<UserLog> {
        let user = self.find_user(user_id).await?;
        let filter = LogFilter::parse(query)?;

        Ok(log_query::build_log(&user, &filter))
    }

    /// Release the store
    pub async fn shutdown(&self) {
        self.repository.close().await;
    }

    /// Resolve a path id; ids that are not even well formed are simply unknown
    async fn find_user(&self, user_id: &str) -> ApiResult<User> {
        let id: UserId = user_id.parse().map_err(|_| ApiError::user_not_found())?;

        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(ApiError::user_not_found)
    }
}
