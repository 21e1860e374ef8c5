//! `PUT /fontgroups/{group_name}`: rename and/or replace membership.

use super::parse_group_request;
use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_web::web::{self, Bytes};
use actix_web::Responder;
use fontshelf_core::{ApiResponse, GroupService, SqliteFontGroupRepository, SqliteFontRepository};

const MSG_UPDATED: &str = "Font group updated successfully";

pub async fn process(
    state: web::Data<AppState>,
    group_name: web::Path<String>,
    body: Bytes,
) -> impl Responder {
    let request = match parse_group_request(&body) {
        Ok(request) => request,
        Err(response) => return respond(response),
    };
    let group_name = group_name.into_inner();
    let response = run_blocking(state, move |conn, _| {
        let service = GroupService::new(
            SqliteFontGroupRepository::new(conn),
            SqliteFontRepository::new(conn),
        );
        ApiResponse::from_action(service.update_group(&group_name, &request), MSG_UPDATED)
    })
    .await;
    respond(response)
}
