use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::{config::AppConfig, models::rates::PricingConfig, services::pms_client::PmsClient};

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(
    app_config: web::Data<AppConfig>,
    pricing: web::Data<PricingConfig>,
    pms: web::Data<PmsClient>,
) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: app_config.environment.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let pricing_result = check_pricing(&pricing);
    health
        .services
        .insert("pricing".to_string(), pricing_result.clone());

    let pms_result = check_pms(&pms);
    health.services.insert("pms".to_string(), pms_result.clone());

    if pricing_result.status != "ok" || pms_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_pricing(pricing: &PricingConfig) -> ServiceStatus {
    let hotels = pricing.rate_table.hotel_count();
    if hotels == 0 {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some("Rate table is empty".to_string()),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!(
            "Rates for {} hotels, age categories for {}",
            hotels,
            pricing.age_categories.len()
        )),
    }
}

fn check_pms(pms: &PmsClient) -> ServiceStatus {
    // Only the configuration is checked; the PMS has no cheap ping endpoint
    match pms.base_url().host_str() {
        Some(host) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("PMS configured at {}", host)),
        },
        None => ServiceStatus {
            status: "error".to_string(),
            details: Some("PMS base URL has no host".to_string()),
        },
    }
}
