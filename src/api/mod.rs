//! HTTP surface under `/api`.
//!
//! Every resource answers `OPTIONS` with an empty 200, and any method it does
//! not route with a 405. The CORS headers are added to every response by
//! [`cors_headers`], errors included.

pub mod diagnostics;
pub mod files;
pub mod people;

use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::json;

use crate::error::ApiError;
use crate::service::ENDPOINT_KEY;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/files")
                    .route(web::get().to(files::list_files))
                    .route(web::post().to(files::upload_file))
                    .route(web::delete().to(files::delete_file))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/files/{id}/download")
                    .route(web::get().to(files::download_file))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/people")
                    .route(web::get().to(people::list_people))
                    .route(web::post().to(people::post_people))
                    .route(web::delete().to(people::clear_people))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/test")
                    .route(web::get().to(diagnostics::api_test))
                    .route(web::post().to(diagnostics::api_test))
                    .route(web::delete().to(diagnostics::api_test))
                    .route(web::method(Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .default_service(web::to(endpoint_not_found)),
    );
}

/// Permissive CORS: any origin, the three data methods plus preflight
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// JSON extractor config: body limit, and parse failures rendered as 400 JSON
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            debug!("Rejected request body: {}", err);
            ApiError::Validation(format!("Invalid request body: {}", err)).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid query string: {}", err)).into()
    })
}

/// Tag this worker's log lines with the endpoint being served
pub(crate) fn tag_endpoint(endpoint: &str) {
    log_mdc::insert(ENDPOINT_KEY, endpoint);
}

fn untag_endpoint() {
    log_mdc::remove(ENDPOINT_KEY);
}

async fn preflight() -> HttpResponse {
    untag_endpoint();
    HttpResponse::Ok().finish()
}

async fn method_not_allowed() -> HttpResponse {
    untag_endpoint();
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}

async fn endpoint_not_found() -> HttpResponse {
    untag_endpoint();
    HttpResponse::NotFound().json(json!({ "error": "API endpoint not found" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_tag() -> Option<String> {
        log_mdc::get(ENDPOINT_KEY, |v| v.map(str::to_string))
    }

    #[actix_web::test]
    async fn test_generic_handlers_drop_stale_endpoint_tag() {
        tag_endpoint("files");
        assert_eq!(current_tag().as_deref(), Some("files"));
        let _ = preflight().await;
        assert_eq!(current_tag(), None);

        tag_endpoint("people");
        let _ = method_not_allowed().await;
        assert_eq!(current_tag(), None);

        tag_endpoint("files");
        let _ = endpoint_not_found().await;
        assert_eq!(current_tag(), None);
    }
}
