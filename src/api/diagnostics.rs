//! Health probes: `?test=true` on the data endpoints, and `/api/test`

use std::future::Future;

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::api::tag_endpoint;
use crate::app_state::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ProbeQuery {
    pub test: Option<String>,
}

impl ProbeQuery {
    pub fn requested(&self) -> bool {
        is_probe(self.test.as_deref())
    }
}

pub(crate) fn is_probe(flag: Option<&str>) -> bool {
    flag == Some("true")
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Report on one store. Mock mode never touches `ping`.
pub async fn store_report<F>(state: &AppState, api: &str, ping: F) -> HttpResponse
where
    F: Future<Output = Result<(), ApiError>>,
{
    if state.is_mock() {
        return HttpResponse::Ok().json(json!({
            "message": format!("Mock {} API is working", api),
            "timestamp": timestamp(),
            "hasDatabase": false,
            "databaseConnected": false,
            "mode": state.mode(),
        }));
    }

    match ping.await {
        Ok(()) => {
            info!("{} probe: database reachable", api);
            HttpResponse::Ok().json(json!({
                "message": format!("{} API is working", api),
                "timestamp": timestamp(),
                "hasDatabase": state.has_database(),
                "databaseConnected": true,
                "mode": state.mode(),
            }))
        }
        Err(e) => {
            warn!("{} probe: database unreachable: {}", api, e);
            HttpResponse::InternalServerError().json(json!({
                "message": format!("{} API is working", api),
                "timestamp": timestamp(),
                "hasDatabase": state.has_database(),
                "databaseConnected": false,
                "dbError": e.to_string(),
                "mode": state.mode(),
            }))
        }
    }
}

/// `/api/test`: echoes the method and the configured mode without touching a store
pub async fn api_test(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    tag_endpoint("test");
    HttpResponse::Ok().json(json!({
        "message": "Test API is working",
        "timestamp": timestamp(),
        "method": req.method().as_str(),
        "hasDatabase": state.has_database(),
        "mode": state.mode(),
    }))
}
