//! `DELETE /fonts/{font_name}`.

use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_web::{web, Responder};
use fontshelf_core::{ApiResponse, FontService, SqliteFontRepository};

const MSG_DELETED: &str = "Font deleted successfully";

pub async fn process(state: web::Data<AppState>, font_name: web::Path<String>) -> impl Responder {
    let font_name = font_name.into_inner();
    let response = run_blocking(state, move |conn, blobs| {
        let service = FontService::new(SqliteFontRepository::new(conn), blobs);
        ApiResponse::from_action(service.delete_font(&font_name), MSG_DELETED)
    })
    .await;
    respond(response)
}
