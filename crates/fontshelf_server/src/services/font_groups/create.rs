//! `POST /fontgroups`.

use super::parse_group_request;
use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_web::web::{self, Bytes};
use actix_web::Responder;
use fontshelf_core::{ApiResponse, GroupService, SqliteFontGroupRepository, SqliteFontRepository};

const MSG_CREATED: &str = "Font group created successfully";

pub async fn process(state: web::Data<AppState>, body: Bytes) -> impl Responder {
    let request = match parse_group_request(&body) {
        Ok(request) => request,
        Err(response) => return respond(response),
    };
    let response = run_blocking(state, move |conn, _| {
        let service = GroupService::new(
            SqliteFontGroupRepository::new(conn),
            SqliteFontRepository::new(conn),
        );
        ApiResponse::from_action(service.create_group(&request), MSG_CREATED)
    })
    .await;
    respond(response)
}
