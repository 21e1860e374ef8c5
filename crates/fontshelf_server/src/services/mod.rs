//! HTTP surface: route tables plus the cross-cutting pieces every response
//! shares (CORS headers, preflight answers, request logging, 404 and 405
//! envelopes).

pub mod font_groups;
pub mod fonts;

use actix_web::http::{Method, StatusCode};
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpResponse, Responder};
use fontshelf_core::ApiResponse;
use serde::Serialize;

const MSG_NOT_FOUND: &str = "Endpoint not found";
const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";
const REQUEST_LOG_FORMAT: &str =
    "event=http_request module=http status=%s request=\"%r\" bytes=%b elapsed_ms=%D";

/// Registers every route plus the preflight and fallback handlers.
///
/// Preflight is registered first so `OPTIONS` never reaches a real route.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.route("/{tail:.*}", web::method(Method::OPTIONS).to(preflight))
        .service(fonts::configure_routes())
        .service(font_groups::configure_routes())
        .default_service(web::to(not_found));
}

/// CORS headers attached to every response.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE"))
        .add((
            "Access-Control-Allow-Headers",
            "Content-Type, Access-Control-Allow-Headers, Authorization, X-Requested-With",
        ))
}

/// One `event=http_request` line per request.
pub fn request_logger() -> Logger {
    Logger::new(REQUEST_LOG_FORMAT)
}

async fn preflight() -> impl Responder {
    HttpResponse::Ok().finish()
}

async fn not_found() -> impl Responder {
    respond(ApiResponse::<()>::failure(MSG_NOT_FOUND, 404))
}

/// Fallback for a known path hit with a method it does not serve.
pub(crate) async fn method_not_allowed() -> impl Responder {
    respond(ApiResponse::<()>::failure(MSG_METHOD_NOT_ALLOWED, 405))
}

/// Serializes an envelope with the status code it carries.
pub(crate) fn respond<T: Serialize>(response: ApiResponse<T>) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response)
}
