pub mod pms_client;
pub mod price_resolver;
