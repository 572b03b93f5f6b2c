// People endpoints: list, create or populate, clear
use actix_web::{web, HttpResponse};
use log::debug;
use serde_json::json;

use crate::api::diagnostics::{self, ProbeQuery};
use crate::api::tag_endpoint;
use crate::app_state::AppState;
use crate::error::ApiError;
use crate::people::PersonDraft;

const POPULATE: &str = "populate";

/// GET /api/people
pub async fn list_people(
    query: web::Query<ProbeQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    tag_endpoint("people");
    let people = state.people()?;

    if query.requested() {
        return Ok(diagnostics::store_report(&state, "People", people.ping()).await);
    }

    let people = people.list().await?;
    Ok(HttpResponse::Ok().json(json!({ "people": people })))
}

/// POST /api/people: `{"action":"populate"}` or a person
pub async fn post_people(
    draft: web::Json<PersonDraft>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    tag_endpoint("people");
    let people = state.people()?;
    let draft = draft.into_inner();

    let action = draft.action.clone();
    match action.as_deref() {
        Some(POPULATE) => {
            let result = people.populate().await?;
            Ok(HttpResponse::Created().json(json!({
                "message": "Database populated successfully",
                "count": result.count,
                "people": result.people,
            })))
        }
        other => {
            if let Some(other) = other {
                debug!("Treating people action {:?} as a create", other);
            }
            let person = people.create(draft).await?;
            Ok(HttpResponse::Created().json(json!({ "person": person })))
        }
    }
}

/// DELETE /api/people
pub async fn clear_people(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    tag_endpoint("people");
    let deleted = state.people()?.clear().await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "All people deleted successfully",
        "deletedCount": deleted,
    })))
}
