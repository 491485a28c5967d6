use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Health check endpoint
///
/// Lives outside `/api` and requires no token.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
