//! `POST /fonts/upload`: reads the multipart field `font` and hands it to the
//! font workflow. A missing field, an empty file name or a broken stream all
//! reach the workflow as "no upload".

use crate::services::respond;
use crate::state::{run_blocking, AppState};
use actix_multipart::Multipart;
use actix_web::{web, Responder};
use fontshelf_core::{ApiResponse, FontService, SqliteFontRepository, UploadedFont};
use futures_util::StreamExt;
use log::warn;

const FIELD_NAME: &str = "font";
const MSG_UPLOADED: &str = "Font uploaded successfully";

pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    let upload = read_font_field(payload).await;
    let response = run_blocking(state, move |conn, blobs| {
        let service = FontService::new(SqliteFontRepository::new(conn), blobs);
        ApiResponse::from_result(service.upload_font(upload), MSG_UPLOADED)
    })
    .await;
    respond(response)
}

async fn read_font_field(mut payload: Multipart) -> Option<UploadedFont> {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(err) => {
                warn!("event=font_upload module=http status=error error_code=multipart error={err}");
                return None;
            }
        };

        let file_name = field
            .content_disposition()
            .filter(|cd| cd.get_name() == Some(FIELD_NAME))
            .map(|cd| cd.get_filename().unwrap_or_default().to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(chunk) => bytes.extend_from_slice(&chunk),
                Err(err) => {
                    warn!("event=font_upload module=http status=error error_code=multipart error={err}");
                    return None;
                }
            }
        }

        match file_name {
            Some(file_name) if !file_name.is_empty() => {
                return Some(UploadedFont { file_name, bytes })
            }
            Some(_) => return None,
            None => continue,
        }
    }
    None
}
