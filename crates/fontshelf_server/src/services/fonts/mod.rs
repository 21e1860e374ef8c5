//! # Font Service Routes
//!
//! Endpoints under `/fonts` for font files:
//! - `upload`: stores a `.ttf` sent as multipart field `font`.
//! - `list`: returns every font newest first with base64 file content.
//! - `delete`: removes a font no group references, then its file.
//!
//! `/upload` is registered before `/{font_name}`, so a font literally named
//! `upload` cannot be deleted over HTTP.

mod delete;
mod list;
mod upload;

use super::method_not_allowed;
use actix_web::web::{delete, get, post, resource, scope, to};
use actix_web::Scope;

const API_PATH: &str = "/fonts";

/// Configures and returns the Actix scope for font routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("/upload")
                .route(post().to(upload::process))
                .default_service(to(method_not_allowed)),
        )
        .service(
            resource("")
                .route(get().to(list::process))
                .default_service(to(method_not_allowed)),
        )
        .service(
            resource("/{font_name}")
                .route(delete().to(delete::process))
                .default_service(to(method_not_allowed)),
        )
}
