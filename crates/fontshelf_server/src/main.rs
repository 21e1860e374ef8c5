//! Composition root: config, logging, store handles, then the HTTP server.

use actix_web::{web, App, HttpServer};
use fontshelf_core::db::open_db;
use fontshelf_core::{init_logging, FsBlobStore};
use fontshelf_server::{configure, cors_headers, request_logger, AppState, ServerConfig};
use log::{error, info};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServerConfig::from_env().map_err(io::Error::other)?;
    init_logging(&config.log_level, &config.log_dir).map_err(io::Error::other)?;

    let conn = open_db(&config.db_path).map_err(|err| {
        error!("event=startup module=server status=error error_code=db_open error={err}");
        io::Error::other(err)
    })?;
    let blobs = FsBlobStore::open(&config.upload_dir).map_err(|err| {
        error!("event=startup module=server status=error error_code=blob_root error={err}");
        io::Error::other(err)
    })?;
    let state = web::Data::new(AppState::new(conn, blobs));

    info!(
        "event=startup module=server status=ok host={} port={} db_path={} upload_dir={}",
        config.host,
        config.port,
        config.db_path.display(),
        config.upload_dir.display()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_headers())
            .wrap(request_logger())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
