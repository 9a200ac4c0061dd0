#![allow(dead_code)]

use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use arrangement_booking::{
    config::{AppConfig, Environment},
    models::{
        availability::{AvailabilityRequest, PricingRequest},
        booking::BookingRequest,
        rates::PricingConfig,
    },
    routes,
    services::pms_client::PmsClient,
};

pub fn pricing_config() -> PricingConfig {
    serde_json::from_value(json!({
        "rate_table": {
            "hotel1": {
                "walking": {
                    "3D": { "breakfast": "h1-w3-bb", "halfboard": "h1-w3-hb" },
                    "4D": { "breakfast": "h1-w4-bb", "halfboard": "h1-w4-hb" }
                },
                "cycling": {
                    "3D": { "breakfast": "h1-c3-bb", "halfboard": "h1-c3-hb" },
                    "4D": { "breakfast": "h1-c4-bb", "halfboard": "h1-c4-hb" }
                }
            },
            "hotel2": {
                "walking": {
                    "3D": {
                        "breakfast": "h2-w3-bb",
                        "halfboard": { "Bink": "h2-w3-hb-bink", "Bardo": "h2-w3-hb-bardo" }
                    }
                }
            }
        },
        "age_categories": {
            "hotel1": { "adult": "h1-adult", "child": "h1-child" },
            "hotel2": { "adult": "h2-adult", "child": "h2-child" }
        },
        "restaurant_hotel": { "hotel": "hotel2", "restaurants": ["Bink", "Bardo"] }
    }))
    .expect("valid pricing fixture")
}

pub fn app_config(pms_base_url: Url) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        pricing_config_path: PathBuf::from("config/pricing.dev.json"),
        pms_base_url,
        pms_api_key: None,
        pms_timeout: Duration::from_secs(5),
        cors_origin: None,
    }
}

/// Base URL nothing listens on.
pub fn unreachable_pms() -> Url {
    Url::parse("http://127.0.0.1:1/").expect("valid url")
}

pub struct TestApp {
    pub config: AppConfig,
    pub pricing: PricingConfig,
}

impl TestApp {
    pub fn new(pms_base_url: Url) -> Self {
        Self {
            config: app_config(pms_base_url),
            pricing: pricing_config(),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let pms = PmsClient::from_config(&self.config).expect("pms client");

        App::new()
            .app_data(web::Data::new(self.pricing.clone()))
            .app_data(web::Data::new(pms))
            .app_data(web::Data::new(self.config.clone()))
            .configure(routes::configure)
    }
}

/// How the mock PMS answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPms {
    /// Both boards available for three nights at hotel1.
    Available,
    /// The optimizer finds nothing for half board.
    BreakfastOnly,
    /// The optimizer finds nothing at all.
    NoArrangement,
    /// The half board availability call fails.
    HalfBoardFails,
}

async fn mock_initial_setup(query: web::Query<HashMap<String, String>>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "hotels": [{
            "key": "hotel1",
            "name": "Hotel One",
            "room_categories": [{ "id": "double", "name": "Double room", "images": ["double.jpg"] }]
        }],
        "products": [
            { "key": "lunch", "price": { "hotel1": 15.0 }, "chargingMode": "PerPersonNight" }
        ],
        "echo": query.into_inner()
    }))
}

async fn mock_availability(
    mode: web::Data<MockPms>,
    input: web::Json<AvailabilityRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let mode = *mode.get_ref();

    if request.use_half_board && mode == MockPms::HalfBoardFails {
        return HttpResponse::InternalServerError().json(json!({ "message": "optimizer crashed" }));
    }
    if mode == MockPms::NoArrangement || (request.use_half_board && mode == MockPms::BreakfastOnly) {
        return HttpResponse::Ok().json(json!({ "optimal_sequence": null }));
    }

    let night_details: Vec<_> = (0..request.length)
        .map(|i| {
            let date = request.start_date + chrono::Duration::days(i as i64);
            json!({
                "date": date,
                "hotel": "hotel1",
                "rooms": [{
                    "category_id": "double",
                    "occupant_adults": request.guests.adults,
                    "occupant_children": request.guests.children
                }]
            })
        })
        .collect();

    HttpResponse::Ok().json(json!({ "optimal_sequence": { "night_details": night_details } }))
}

async fn mock_pricing(input: web::Json<PricingRequest>) -> impl Responder {
    let pricing: Vec<_> = input
        .into_inner()
        .selected_arrangement
        .nights
        .iter()
        .map(|night| {
            json!({
                "date": night.date,
                "hotel": night.hotel,
                "CategoryPrices": [{
                    "CategoryId": "double",
                    "OccupancyPrices": [{
                        "Occupancies": [{ "AgeCategoryId": "h1-adult", "PersonCount": 2 }],
                        "RateGroupPrices": [
                            { "MinRateId": "h1-w3-bb", "MinPrice": { "TotalAmount": { "GrossValue": 150.0 } } },
                            { "MinRateId": "h1-w3-hb", "MinPrice": { "TotalAmount": { "GrossValue": 190.0 } } }
                        ]
                    }]
                }]
            })
        })
        .collect();

    HttpResponse::Ok().json(pricing)
}

async fn mock_book(input: web::Json<BookingRequest>) -> impl Responder {
    let request = input.into_inner();
    match request.transaction_id.as_str() {
        "declined" => HttpResponse::PaymentRequired().json(json!({ "message": "Payment was declined" })),
        "crash" => HttpResponse::InternalServerError().finish(),
        _ => HttpResponse::Ok().json(json!({
            "reservationId": "R-1001",
            "status": "confirmed",
            "nights": request.selected_arrangement.nights.len()
        })),
    }
}

/// Starts an in-process PMS on a free port.
pub async fn spawn_mock_pms(mode: MockPms) -> (Url, ServerHandle) {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(mode))
            .route("/reservations/initial-setup/", web::get().to(mock_initial_setup))
            .route("/reservations/availability/", web::post().to(mock_availability))
            .route("/reservations/pricing/", web::post().to(mock_pricing))
            .route("/reservations/book/", web::post().to(mock_book))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind mock PMS");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    let url = Url::parse(&format!("http://{}/", addr)).expect("mock PMS url");
    (url, handle)
}

pub fn booking_body(transaction_id: &str) -> serde_json::Value {
    json!({
        "customer": {
            "firstName": "Anna",
            "lastName": "Jansen",
            "email": "anna@example.com",
            "phone": "+31 6 1234 5678",
            "country": "NL",
            "acceptTerms": true
        },
        "selectedArrangement": {
            "length": 3,
            "travel_mode": "walking",
            "nights": [
                {
                    "date": "2025-06-01",
                    "hotel": "hotel1",
                    "board": "breakfast",
                    "rooms": [{ "category_id": "double", "occupant_adults": 2 }]
                }
            ]
        },
        "transactionId": transaction_id
    })
}
