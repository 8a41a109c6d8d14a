use crate::helper::sanitization_helpers;
use crate::AppState;
use actix_web::{web, HttpResponse, Responder};

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/is_server_active", web::get().to(is_server_active))
            .route("/messages/sanitize", web::post().to(sanitize_envelope))
            .route("/messages/sanitize/text", web::post().to(sanitize_text)),
    );
}

async fn is_server_active() -> impl Responder {
    HttpResponse::Ok().body("active")
}

/// Handles POST /api/messages/sanitize.
/// The body is read as raw bytes so that malformed JSON still gets a (blank) envelope
/// back instead of an extractor error.
async fn sanitize_envelope(body: web::Bytes, app_state: web::Data<AppState>) -> impl Responder {
    let raw = String::from_utf8_lossy(&body);
    let sanitized = sanitization_helpers::sanitize_envelope_json_with(&raw, &app_state.defaults);
    HttpResponse::Ok()
        .content_type("application/json")
        .body(sanitized)
}

async fn sanitize_text(body: web::Bytes) -> impl Responder {
    let raw = match String::from_utf8(body.to_vec()) {
        Ok(s) => s,
        Err(_) => return HttpResponse::BadRequest().body("Invalid UTF-8 in request body."),
    };
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(sanitization_helpers::sanitize_message(&raw))
}
