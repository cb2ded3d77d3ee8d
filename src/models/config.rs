//! Configuration models loaded from external sources.

use serde::{Deserialize, Serialize};

/// Configuration of the config/relay proxy process.
///
/// The anon key is safe to hand to clients (row-level security applies);
/// the webhook URL and recordings key are privileged and never leave this
/// process. A service-role key, if present in the environment, has no field
/// here and is never served.
#[derive(Clone, Debug, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    #[serde(default)]
    pub n8n_webhook_url: Option<String>,
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Connection configuration served to clients by `GET /api/config`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

/// Configuration of the terminal dashboard process.
#[derive(Clone, Debug, Deserialize)]
pub struct DashboardConfig {
    /// Origin of the config/relay proxy.
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    /// Log destination; the terminal owns stdout/stderr while running.
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_log_file() -> String {
    "coders-crm.log".to_string()
}
