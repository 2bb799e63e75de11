mod config;
mod services;

use crate::config::ServerConfig;
use crate::services::tables::SqliteCounter;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info, warn};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded frontend bundle, falling back to `index.html` for client-side screens.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env().map_err(|e| {
        error!("invalid configuration: {e}");
        std::io::Error::other(e)
    })?;
    let url = config.url();

    if !config.database.exists() {
        warn!(
            "database {} not found; every count will answer 503",
            config.database.display()
        );
    }

    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    let counter = web::Data::new(SqliteCounter::new(
        config.database.clone(),
        config.monitored_tables.clone(),
    ));

    info!(
        "Server running at {} (database {}, {} monitored tables)",
        url,
        config.database.display(),
        config.monitored_tables.len()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(counter.clone())
            .service(services::tables::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
