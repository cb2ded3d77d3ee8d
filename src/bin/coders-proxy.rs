//! Config/relay proxy binary: serves connection configuration to the
//! dashboard and relays webhook/recording traffic so privileged secrets
//! never reach the client.

use std::env;

use config::Config;
use dotenvy::dotenv;

use coders_crm::models::config::ProxyConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Environment variables win (SUPABASE_URL, SUPABASE_ANON_KEY, ...)
        .add_source(config::Environment::default())
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ProxyConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading proxy config: {err}");
            std::process::exit(1);
        }
    };

    if server_config.n8n_webhook_url.is_none() {
        log::warn!("N8N_WEBHOOK_URL is not set; /api/trigger-flow will answer 503");
    }

    coders_crm::run(server_config).await
}
