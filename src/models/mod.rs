pub mod arrangement;
pub mod availability;
pub mod booking;
pub mod pricing;
pub mod products;
pub mod rates;
pub mod wizard;
