//! `DELETE /fontgroups/{group_name}`.

use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_web::{web, Responder};
use fontshelf_core::{ApiResponse, GroupService, SqliteFontGroupRepository, SqliteFontRepository};

const MSG_DELETED: &str = "Font group deleted successfully";

pub async fn process(state: web::Data<AppState>, group_name: web::Path<String>) -> impl Responder {
    let group_name = group_name.into_inner();
    let response = run_blocking(state, move |conn, _| {
        let service = GroupService::new(
            SqliteFontGroupRepository::new(conn),
            SqliteFontRepository::new(conn),
        );
        ApiResponse::from_action(service.delete_group(&group_name), MSG_DELETED)
    })
    .await;
    respond(response)
}
