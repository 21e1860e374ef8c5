//! `GET /fonts`: every font newest first, file content base64-encoded.

use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_web::{web, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use fontshelf_core::{ApiResponse, FontListing, FontService, SqliteFontRepository};
use serde::Serialize;

const MSG_FOUND: &str = "Fonts retrieved successfully";
const MSG_EMPTY: &str = "No fonts found";

/// Listing entry as sent to clients. `file` is `null` when the stored file
/// could not be read; `url` is always `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontFileDto {
    pub name: String,
    pub file: Option<String>,
    pub url: Option<String>,
}

impl From<FontListing> for FontFileDto {
    fn from(listing: FontListing) -> Self {
        Self {
            name: listing.name,
            file: listing.content.map(|bytes| BASE64.encode(bytes)),
            url: None,
        }
    }
}

pub async fn process(state: web::Data<AppState>) -> impl Responder {
    let response = run_blocking(state, |conn, blobs| {
        let service = FontService::new(SqliteFontRepository::new(conn), blobs);
        let fonts = service
            .list_fonts()
            .map(|fonts| fonts.into_iter().map(FontFileDto::from).collect::<Vec<_>>());
        ApiResponse::from_listing(fonts, MSG_FOUND, MSG_EMPTY)
    })
    .await;
    respond(response)
}
