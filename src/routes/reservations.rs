use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    models::{
        arrangement::Arrangement,
        availability::{ArrangementQuery, InitialSetupQuery, PricedArrangement},
        booking::BookingRequest,
        pricing::NightlyPricing,
        products::ProductCatalog,
        rates::PricingConfig,
    },
    services::{
        pms_client::{PmsClient, PmsError},
        price_resolver::{aggregate_total, PriceBreakdown},
    },
};

const GENERIC_FETCH_ERROR: &str =
    "Something went wrong while loading the arrangements. Please go back and try again.";
const GENERIC_BOOKING_ERROR: &str =
    "The booking could not be completed. Please try again or contact us.";

fn pms_error_response(err: &PmsError, fallback: &str) -> HttpResponse {
    match err {
        PmsError::NoArrangement => HttpResponse::NotFound().json(json!({
            "error": "no_arrangement",
            "message": "No arrangement is available for these dates and guests."
        })),
        PmsError::StatusError {
            message: Some(message),
            ..
        } => HttpResponse::BadGateway().json(json!({
            "error": "pms_error",
            "message": message
        })),
        _ => HttpResponse::BadGateway().json(json!({
            "error": "pms_unavailable",
            "message": fallback
        })),
    }
}

/*
    GET /api/reservations/initial-setup?startDate=&length=
*/
pub async fn initial_setup(
    query: web::Query<InitialSetupQuery>,
    pms: web::Data<PmsClient>,
) -> impl Responder {
    match pms.initial_setup(query.start_date, query.length).await {
        Ok(setup) => HttpResponse::Ok().json(setup),
        Err(err) => {
            log::error!("Failed to load initial setup: {}", err);
            pms_error_response(&err, GENERIC_FETCH_ERROR)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArrangementOption {
    #[serde(flatten)]
    pub priced: PricedArrangement,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResult {
    pub breakfast: Option<ArrangementOption>,
    pub halfboard: Option<ArrangementOption>,
}

fn with_breakdown(config: &PricingConfig, priced: PricedArrangement) -> ArrangementOption {
    let breakdown = aggregate_total(
        config,
        &priced.arrangement,
        &priced.pricing,
        &ProductCatalog::default(),
    );
    ArrangementOption { priced, breakdown }
}

/*
    POST /api/reservations/availability
*/
pub async fn availability(
    input: web::Json<ArrangementQuery>,
    pms: web::Data<PmsClient>,
    config: web::Data<PricingConfig>,
) -> impl Responder {
    let query = input.into_inner();
    if query.length == 0 || query.guests.total() == 0 || query.amount_of_rooms == 0 {
        return HttpResponse::BadRequest().json(json!({
            "error": "invalid_query",
            "message": "Length, guests and amount of rooms must be at least 1."
        }));
    }

    match pms.arrangement_options(&query).await {
        Ok(options) => HttpResponse::Ok().json(AvailabilityResult {
            breakfast: options.breakfast.map(|p| with_breakdown(&config, p)),
            halfboard: options.halfboard.map(|p| with_breakdown(&config, p)),
        }),
        Err(err) => {
            log::error!("Availability fetch failed: {}", err);
            pms_error_response(&err, GENERIC_FETCH_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub arrangement: Arrangement,
    #[serde(default)]
    pub pricing: Vec<NightlyPricing>,
    #[serde(default)]
    pub products: ProductCatalog,
}

/*
    POST /api/reservations/quote
*/
pub async fn quote(
    input: web::Json<QuoteRequest>,
    config: web::Data<PricingConfig>,
) -> impl Responder {
    let request = input.into_inner();
    let breakdown = aggregate_total(
        &config,
        &request.arrangement,
        &request.pricing,
        &request.products,
    );
    HttpResponse::Ok().json(breakdown)
}

/*
    POST /api/reservations/book
*/
pub async fn book(input: web::Json<BookingRequest>, pms: web::Data<PmsClient>) -> impl Responder {
    let request = input.into_inner();

    if let Err(errors) = request.validate() {
        return HttpResponse::UnprocessableEntity().json(json!({
            "error": "validation_failed",
            "fields": errors
        }));
    }

    match pms.book(&request).await {
        Ok(confirmation) => {
            log::info!(
                "Booked {} nights for transaction {}",
                request.selected_arrangement.nights.len(),
                request.transaction_id
            );
            HttpResponse::Ok().json(confirmation)
        }
        Err(err) => {
            log::error!("Booking failed: {}", err);
            pms_error_response(&err, GENERIC_BOOKING_ERROR)
        }
    }
}
