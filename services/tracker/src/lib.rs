//! Exercise tracker service
//!
//! Users register, log exercises against their record and query a filtered
//! view of that log over a small JSON API. See [`routes::create_router`] for
//! the HTTP surface and [`log_query`] for how logs are narrowed.

pub mod config;
pub mod dates;
pub mod error;
pub mod extract;
pub mod log_query;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;
pub mod validation;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::{
    config::{Settings, StoreBackend},
    repositories::{InMemoryUserRepository, PgUserRepository, UserRepository},
};

pub use crate::{routes::create_router, service::TrackerService, state::AppState};

/// Connect the configured store and return it behind the repository seam
pub async fn connect_repository(settings: &Settings) -> Result<Arc<dyn UserRepository>> {
    match settings.store_backend()? {
        StoreBackend::Memory => {
            info!("Using in-memory user store");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StoreBackend::Postgres => {
            let pool = common::database::init_pool(&settings.database()).await?;

            if !common::database::health_check(&pool).await? {
                anyhow::bail!("Failed to connect to database");
            }
            info!("Database connection successful");

            common::database::run_migrations(&pool).await?;
            Ok(Arc::new(PgUserRepository::new(pool)))
        }
    }
}
