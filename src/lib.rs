#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::EnvironmentDatabases;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::settings::SettingsProvider;

pub mod db;
pub mod domain;
pub mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod settings;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig, settings: SettingsProvider) -> std::io::Result<()> {
    // Environment databases are provisioned lazily on the first request.
    let databases = web::Data::new(EnvironmentDatabases::new(&server_config.database_dir));
    let settings = web::Data::new(settings);

    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Listening on {}:{}, databases in {}",
        server_config.address,
        server_config.port,
        server_config.database_dir
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(databases.clone())
            .app_data(settings.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
