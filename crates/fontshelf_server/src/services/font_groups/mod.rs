//! # Font Group Service Routes
//!
//! Endpoints under `/fontgroups`. Create and update take a JSON body
//! `{name, fonts: [{name}, ...]}`; the group being changed or removed is
//! addressed by its name in the path.

mod create;
mod delete;
mod list;
mod update;

use super::method_not_allowed;
use actix_web::web::{delete, get, post, put, resource, scope, to, Bytes};
use actix_web::Scope;
use fontshelf_core::{ApiResponse, FontRef, GroupRequest};
use log::warn;
use serde_json::Value;

const API_PATH: &str = "/fontgroups";

/// Configures and returns the Actix scope for font group routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("")
                .route(post().to(create::process))
                .route(get().to(list::process))
                .default_service(to(method_not_allowed)),
        )
        .service(
            resource("/{group_name}")
                .route(put().to(update::process))
                .route(delete().to(delete::process))
                .default_service(to(method_not_allowed)),
        )
}

/// Parses a group request body regardless of the declared content type.
///
/// Only syntactically broken JSON is rejected here; fields of the wrong type
/// are treated as missing and left to workflow validation.
fn parse_group_request(body: &Bytes) -> Result<GroupRequest, ApiResponse<()>> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        warn!("event=group_request module=http status=error error_code=bad_json error={err}");
        ApiResponse::failure(format!("Invalid JSON body: {err}"), 400)
    })?;
    Ok(group_request_from_value(&value))
}

fn group_request_from_value(value: &Value) -> GroupRequest {
    let string_field = |value: &Value| value.get("name").and_then(Value::as_str).map(str::to_string);

    GroupRequest {
        name: string_field(value),
        fonts: value.get("fonts").and_then(Value::as_array).map(|fonts| {
            fonts
                .iter()
                .map(|font| FontRef {
                    name: string_field(font),
                })
                .collect()
        }),
    }
}
