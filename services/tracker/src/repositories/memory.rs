//! Process-local user repository

use async_trait::async_trait;
use common::error::DatabaseResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::UserRepository;
use crate::models::{NewUser, User, UserId, UserSummary};

/// User repository holding records in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        let user = User {
            id: UserId::generate(),
            username: new_user.username.clone(),
            exercises: Vec::new(),
        };
        self.users.write().await.push(user.clone());

        Ok(user)
    }

    async fn list(&self) -> DatabaseResult<Vec<UserSummary>> {
        let users = self.users.read().await;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == *id).cloned())
    }

    async fn save(&self, user: &User) -> DatabaseResult<()> {
        let mut users = self.users.write().await;
        if let Some(stored) = users.iter_mut().find(|stored| stored.id == user.id) {
            stored.exercises = user.exercises.clone();
        }
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;
    use chrono::Utc;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_preserves_insertion_order() -> DatabaseResult<()> {
        let repository = InMemoryUserRepository::new();
        let first = repository.create(&new_user("alice")).await?;
        let second = repository.create(&new_user("bob")).await?;

        let users = repository.list().await?;
        assert_eq!(
            users,
            vec![UserSummary::from(&first), UserSummary::from(&second)]
        );
        assert!(first.exercises.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_id() -> DatabaseResult<()> {
        let repository = InMemoryUserRepository::new();
        let user = repository.create(&new_user("alice")).await?;

        assert_eq!(repository.find_by_id(&user.id).await?, Some(user));
        assert_eq!(repository.find_by_id(&UserId::generate()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_overwrites_exercises_only() -> DatabaseResult<()> {
        let repository = InMemoryUserRepository::new();
        let mut user = repository.create(&new_user("alice")).await?;

        user.username = "renamed".to_string();
        user.exercises.push(Exercise {
            description: "row".to_string(),
            duration: 15.0,
            date: Utc::now(),
        });
        repository.save(&user).await?;

        let stored = repository.find_by_id(&user.id).await?.unwrap();
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.exercises, user.exercises);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_unknown_user_is_ignored() -> DatabaseResult<()> {
        let repository = InMemoryUserRepository::new();
        let ghost = User {
            id: UserId::generate(),
            username: "ghost".to_string(),
            exercises: Vec::new(),
        };
        repository.save(&ghost).await?;
        assert!(repository.list().await?.is_empty());
        Ok(())
    }
}
