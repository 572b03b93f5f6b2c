//! Service layer: validation in front of the storage traits, and the executor
//! that moves blocking store calls off the async workers.

pub mod file_service;
pub mod people_service;

use std::time::Duration;

use actix_web::web;
use log::warn;

use crate::config::AppConfig;
use crate::error::{ApiError, StoreError};

/// MDC key rendered by the log pattern
pub const ENDPOINT_KEY: &str = "endpoint";

/// Runs blocking store calls on actix's blocking pool under a deadline and
/// translates their failures into [`ApiError`]s.
#[derive(Debug, Clone)]
pub struct StoreExecutor {
    timeout: Duration,
    expose_error_details: bool,
}

impl StoreExecutor {
    pub fn new(timeout: Duration, expose_error_details: bool) -> Self {
        Self {
            timeout,
            expose_error_details,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.database.timeout(), config.server.expose_error_details)
    }

    /// Run `op` on the blocking pool. The deadline stops the wait, not the
    /// call itself: a timed-out query still runs to completion.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        // Blocking-pool threads get the caller's endpoint tag for the call only.
        let endpoint = log_mdc::get(ENDPOINT_KEY, |value| value.map(str::to_string));
        let tagged = move || {
            let _guard = endpoint.map(|endpoint| log_mdc::insert_scoped(ENDPOINT_KEY, endpoint));
            op()
        };

        match tokio::time::timeout(self.timeout, web::block(tagged)).await {
            Err(_) => {
                warn!("Store call exceeded {} ms", self.timeout.as_millis());
                Err(ApiError::Timeout(self.timeout.as_millis() as u64))
            }
            Ok(Err(blocking)) => Err(self.persistence(format!("blocking task failed: {}", blocking))),
            Ok(Ok(result)) => result.map_err(|e| self.store_error(e)),
        }
    }

    /// Build a persistence error honouring the detail exposure setting
    pub fn persistence(&self, detail: impl Into<String>) -> ApiError {
        ApiError::Persistence {
            detail: detail.into(),
            expose: self.expose_error_details,
        }
    }

    fn store_error(&self, err: StoreError) -> ApiError {
        match err {
            StoreError::NotFound { entity, .. } => ApiError::NotFound(format!("{} not found", entity)),
            other => self.persistence(other.to_string()),
        }
    }
}
