#[cfg(feature = "proxy")]
use actix_cors::Cors;
#[cfg(feature = "proxy")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "proxy")]
use crate::models::config::ProxyConfig;
#[cfg(feature = "proxy")]
use crate::routes::proxy::{api_config, call_audio, trigger_flow};

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "proxy")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "tui")]
pub mod ui;

/// Builds and runs the config/relay proxy using the provided configuration.
#[cfg(feature = "proxy")]
pub async fn run(server_config: ProxyConfig) -> std::io::Result<()> {
    // One shared client for all relayed upstream calls.
    let relay = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to build relay HTTP client: {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .service(api_config)
            .service(trigger_flow)
            .service(call_audio)
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(relay.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
