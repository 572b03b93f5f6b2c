// File endpoints: list, upload, delete, download
use actix_web::http::header::{
    self, Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpResponse};
use bytes::Bytes;
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::api::{diagnostics, tag_endpoint};
use crate::app_state::AppState;
use crate::error::ApiError;
use crate::files::FileDraft;

#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    pub section: Option<String>,
    pub test: Option<String>,
    pub id: Option<String>,
}

fn parse_file_id(raw: Option<&str>) -> Result<i64, ApiError> {
    match raw.map(str::trim).filter(|id| !id.is_empty()) {
        None => Err(ApiError::Validation("File ID is required".to_string())),
        Some(id) => id
            .parse::<i64>()
            .map_err(|_| ApiError::Validation("Invalid file ID".to_string())),
    }
}

/// `attachment` disposition for a stored name. Control characters become `_`;
/// non-ASCII names get an ASCII `filename` plus a UTF-8 `filename*`.
fn attachment_disposition(name: &str) -> ContentDisposition {
    let clean: String = name.chars().map(|c| if c.is_control() { '_' } else { c }).collect();

    let parameters = if clean.is_ascii() {
        vec![DispositionParam::Filename(clean)]
    } else {
        let fallback = clean.chars().map(|c| if c.is_ascii() { c } else { '_' }).collect();
        vec![
            DispositionParam::Filename(fallback),
            DispositionParam::FilenameExt(ExtendedValue {
                charset: Charset::Ext("UTF-8".to_string()),
                language_tag: None,
                value: clean.into_bytes(),
            }),
        ]
    };

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

/// GET /api/files
pub async fn list_files(
    query: web::Query<FileQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    tag_endpoint("files");
    let files = state.files()?;

    if diagnostics::is_probe(query.test.as_deref()) {
        return Ok(diagnostics::store_report(&state, "Files", files.ping()).await);
    }

    // An empty section behaves like no filter
    let section = query.into_inner().section.filter(|s| !s.is_empty());
    debug!("Listing files, section={:?}", section);
    let files = files.list(section).await?;
    Ok(HttpResponse::Ok().json(json!({ "files": files })))
}

/// POST /api/files
pub async fn upload_file(
    draft: web::Json<FileDraft>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    tag_endpoint("files");
    let file = state.files()?.create(draft.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "file": file })))
}

/// DELETE /api/files?id=<n>
pub async fn delete_file(
    query: web::Query<FileQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    tag_endpoint("files");
    let files = state.files()?;
    let id = parse_file_id(query.id.as_deref())?;
    files.delete(id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "File deleted successfully" })))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    tag_endpoint("files");
    let files = state.files()?;
    let id = parse_file_id(Some(path.as_str()))?;
    let (record, bytes) = files.download(id).await?;

    let etag = format!("\"{}\"", hex::encode(md5::compute(&bytes).0));
    debug!("Serving file id={} ({} bytes, etag {})", id, bytes.len(), etag);

    Ok(HttpResponse::Ok()
        .content_type(record.file_type.as_str())
        .insert_header(attachment_disposition(&record.name))
        .insert_header((header::ETAG, etag))
        .body(Bytes::from(bytes)))
}
