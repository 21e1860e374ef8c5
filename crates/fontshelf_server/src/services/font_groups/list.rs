//! `GET /fontgroups`: every group newest first with its member fonts.

use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_web::{web, Responder};
use fontshelf_core::{ApiResponse, GroupService, SqliteFontGroupRepository, SqliteFontRepository};

const MSG_FOUND: &str = "Font groups retrieved successfully";
const MSG_EMPTY: &str = "No font groups found";

pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let response = run_blocking(state, |conn, _| {
        let service = GroupService::new(
            SqliteFontGroupRepository::new(conn),
            SqliteFontRepository::new(conn),
        );
        ApiResponse::from_listing(service.list_groups(), MSG_FOUND, MSG_EMPTY)
    })
    .await;
    respond(response)
}
