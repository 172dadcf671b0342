#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, http::Method, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::storage::FsImageStorage;

pub mod db;
#[cfg(feature = "server")]
pub mod doc;
pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod storage;

/// URL prefix under which the upload directory is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";
/// Sub-directory of the upload root holding apartment images.
pub const APARTMENT_IMAGES_DIR: &str = "apartments";

/// Image storage rooted at `<upload_dir>/apartments`, served as `/uploads/apartments/*`.
#[cfg(feature = "server")]
pub fn image_storage(server_config: &ServerConfig) -> FsImageStorage {
    FsImageStorage::new(
        server_config.upload_dir.join(APARTMENT_IMAGES_DIR),
        format!("{UPLOADS_URL_PREFIX}/{APARTMENT_IMAGES_DIR}"),
    )
}

#[cfg(feature = "server")]
fn cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_any_header()
        .supports_credentials()
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let applied = db::run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
    log::info!("Applied {applied} pending migration(s)");

    let repo = DieselRepository::new(pool);

    let storage = image_storage(&server_config);
    std::fs::create_dir_all(storage.root())?;
    log::info!("Serving uploads from {}", server_config.upload_dir.display());
    log::info!("API documentation at /api, OpenAPI document at {}", doc::OPENAPI_JSON_URL);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config.cors_origins))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new(UPLOADS_URL_PREFIX, &server_config.upload_dir))
            .service(doc::swagger_ui())
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
