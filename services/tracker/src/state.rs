//! Application state shared across handlers

use crate::service::TrackerService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: TrackerService,
}

impl AppState {
    pub fn new(service: TrackerService) -> Self {
        Self { service }
    }
}
