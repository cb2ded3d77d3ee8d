//! The proxy's three routes: config handout, webhook relay, recording relay.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;
use serde::Deserialize;

use crate::models::config::{ClientConfig, ProxyConfig};
use crate::routes::json_error;

/// Hands the client-safe connection parameters to the dashboard. Only the
/// anon key leaves the server — row-level security governs what it can do.
/// The webhook URL and recordings key stay server-side.
#[get("/api/config")]
pub async fn api_config(config: web::Data<ProxyConfig>) -> impl Responder {
    HttpResponse::Ok().json(ClientConfig {
        supabase_url: config.supabase_url.clone(),
        supabase_anon_key: config.supabase_anon_key.clone(),
    })
}

/// Relays the automation trigger server-side. 503 when no webhook is
/// configured, 502 when the upstream call fails, otherwise the upstream
/// status and body verbatim — an HTML body must reach the client intact so
/// it can diagnose the misconfiguration.
#[post("/api/trigger-flow")]
pub async fn trigger_flow(
    config: web::Data<ProxyConfig>,
    http: web::Data<reqwest::Client>,
) -> impl Responder {
    let Some(webhook_url) = config.n8n_webhook_url.as_deref() else {
        return HttpResponse::ServiceUnavailable()
            .json(json_error("N8N_WEBHOOK_URL is not configured"));
    };

    let upstream = match http.get(webhook_url).send().await {
        Ok(upstream) => upstream,
        Err(err) => {
            error!("Failed to relay webhook trigger: {err}");
            return HttpResponse::BadGateway()
                .json(json_error("Failed to reach the automation webhook"));
        }
    };

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    match upstream.text().await {
        Ok(body) => HttpResponse::build(status).content_type(content_type).body(body),
        Err(err) => {
            error!("Failed to read webhook response: {err}");
            HttpResponse::BadGateway().json(json_error("Failed to read the webhook response"))
        }
    }
}

#[derive(Deserialize)]
pub struct CallAudioQuery {
    #[serde(default)]
    conversation_id: Option<String>,
}

/// Relays a call-recording download, attaching the privileged recordings
/// API key server-side.
#[get("/api/call-audio")]
pub async fn call_audio(
    query: web::Query<CallAudioQuery>,
    config: web::Data<ProxyConfig>,
    http: web::Data<reqwest::Client>,
) -> impl Responder {
    let conversation_id = match query
        .conversation_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        Some(id) => id.to_string(),
        None => {
            return HttpResponse::BadRequest().json(json_error("Missing conversation_id"));
        }
    };
    let Some(api_key) = config.elevenlabs_api_key.as_deref() else {
        return HttpResponse::InternalServerError().json(json_error(
            "ELEVENLABS_API_KEY not configured in environment",
        ));
    };

    let url = format!(
        "https://api.elevenlabs.io/v1/convai/conversations/{conversation_id}/audio"
    );
    let upstream = match http.get(&url).header("xi-api-key", api_key).send().await {
        Ok(upstream) => upstream,
        Err(err) => {
            error!("Failed to fetch audio for {conversation_id}: {err}");
            return HttpResponse::InternalServerError()
                .json(json_error("Failed to fetch audio from ElevenLabs"));
        }
    };

    if !upstream.status().is_success() {
        let status = StatusCode::from_u16(upstream.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error!(
            "Recording fetch for {conversation_id} answered {}",
            upstream.status()
        );
        return HttpResponse::build(status)
            .json(json_error("Failed to fetch audio from ElevenLabs"));
    }

    match upstream.bytes().await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("audio/mpeg")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"call-{conversation_id}.mp3\""),
            ))
            .body(bytes.to_vec()),
        Err(err) => {
            error!("Failed to read audio body for {conversation_id}: {err}");
            HttpResponse::BadGateway().json(json_error("Failed to read the audio response"))
        }
    }
}
