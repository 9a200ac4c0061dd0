use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use arrangement_booking::{
    config::AppConfig, models::rates::PricingConfig, routes, services::pms_client::PmsClient,
};

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    log::error!("Startup failed: {}", err);
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

fn cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env().map_err(startup_error)?;
    log::info!("Environment: {}", config.environment.as_str());

    let pricing = PricingConfig::load(&config.pricing_config_path).map_err(startup_error)?;
    let pms = PmsClient::from_config(&config).map_err(startup_error)?;
    log::info!("Forwarding reservations to {}", pms.base_url());

    let host = config.host.clone();
    let port = config.port;
    let cors_origin = config.cors_origin.clone();

    let pricing = web::Data::new(pricing);
    let pms = web::Data::new(pms);
    let app_config = web::Data::new(config);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(cors_origin.as_deref()))
            .app_data(pricing.clone())
            .app_data(pms.clone())
            .app_data(app_config.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
