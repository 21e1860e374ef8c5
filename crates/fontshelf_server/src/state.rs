//! Shared handles owned by the composition root and handed to handlers.
//!
//! # Invariants
//! - All store access goes through [`run_blocking`], off the async workers,
//!   one request at a time on the single connection.

use actix_web::web;
use fontshelf_core::{ApiResponse, FsBlobStore};
use log::{error, warn};
use rusqlite::Connection;
use std::sync::Mutex;

const MSG_INTERNAL: &str = "Internal server error";

pub struct AppState {
    conn: Mutex<Connection>,
    blobs: FsBlobStore,
}

impl AppState {
    pub fn new(conn: Connection, blobs: FsBlobStore) -> Self {
        Self {
            conn: Mutex::new(conn),
            blobs,
        }
    }
}

/// Runs `job` against the store on the blocking pool and returns its envelope.
///
/// A panicking job or a dead blocking pool turns into a 500 envelope.
pub async fn run_blocking<T, F>(state: web::Data<AppState>, job: F) -> ApiResponse<T>
where
    T: Send + 'static,
    F: FnOnce(&Connection, &FsBlobStore) -> ApiResponse<T> + Send + 'static,
{
    let outcome = web::block(move || {
        // A panic mid-request leaves the connection usable: any open unit of
        // work was rolled back while unwinding.
        let conn = state.conn.lock().unwrap_or_else(|poisoned| {
            warn!("event=store_lock module=http status=recovered");
            poisoned.into_inner()
        });
        job(&conn, &state.blobs)
    })
    .await;

    match outcome {
        Ok(response) => response,
        Err(err) => {
            error!("event=store_job module=http status=error error={err}");
            ApiResponse::failure(MSG_INTERNAL, 500)
        }
    }
}
