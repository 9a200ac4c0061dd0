use actix_web::{error, web, HttpResponse};
use serde_json::json;

pub mod health;
pub mod reservations;

/// Registers every route. Expects `PricingConfig`, `PmsClient` and
/// `AppConfig` as application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "error": "invalid_body",
                "message": message
            })),
        )
        .into()
    });

    cfg.app_data(json_config)
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/reservations")
                .route(
                    "/initial-setup",
                    web::get().to(reservations::initial_setup),
                )
                .route(
                    "/availability",
                    web::post().to(reservations::availability),
                )
                .route("/quote", web::post().to(reservations::quote))
                .route("/book", web::post().to(reservations::book)),
        );
}
