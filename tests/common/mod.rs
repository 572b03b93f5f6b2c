#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use filedesk::app_state::AppState;
use filedesk::config::AppConfig;
use filedesk::content::encode_data_url;
use filedesk::database::Database;
use filedesk::files::sqlite_store::SQLiteFileStore;
use filedesk::people::sqlite_store::SQLitePeopleStore;

pub const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Build an initialised test service around the given `AppState`
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data(filedesk::api::json_config($crate::common::JSON_LIMIT))
                .app_data(filedesk::api::query_config())
                .wrap(filedesk::api::cors_headers())
                .configure(filedesk::api::configure),
        )
        .await
    };
}

pub fn mock_state() -> AppState {
    AppState::new_for_testing()
}

/// Both stores on one in-memory SQLite connection
pub fn sqlite_state() -> AppState {
    let db = Database::open_in_memory().unwrap();
    let mut config = AppConfig::default();
    config.database.url = Some(":memory:".to_string());
    AppState::with_stores(
        config,
        Arc::new(SQLiteFileStore::new(db.clone())),
        Arc::new(SQLitePeopleStore::new(db)),
    )
}

pub fn upload_body(name: &str, section: &str, bytes: &[u8]) -> Value {
    json!({
        "name": name,
        "type": "text/plain",
        "size": bytes.len(),
        "content": encode_data_url("text/plain", bytes),
        "section": section,
    })
}
