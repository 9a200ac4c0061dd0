use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::arrangement::TravelMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargingMode {
    /// Charged once for the whole booking.
    Once,
    /// Charged once per guest.
    PerPerson,
    /// Charged per guest for every night it is selected.
    PerPersonNight,
}

/// Unit price of a product, either the same everywhere or set per hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductPrice {
    Flat(f64),
    PerHotel(HashMap<String, f64>),
}

/// Add-on such as lunch, bicycle rental or bicycle transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalProduct {
    pub key: String,
    pub price: ProductPrice,
    pub charging_mode: ChargingMode,
    /// Travel modes the product is offered for. `None` means all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_modes: Option<Vec<TravelMode>>,
}

impl OptionalProduct {
    pub fn unit_price(&self, hotel: &str) -> Option<f64> {
        match &self.price {
            ProductPrice::Flat(price) => Some(*price),
            ProductPrice::PerHotel(prices) => prices.get(hotel).copied(),
        }
    }

    pub fn serves(&self, travel_mode: TravelMode) -> bool {
        self.travel_modes
            .as_ref()
            .map_or(true, |modes| modes.contains(&travel_mode))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog(Vec<OptionalProduct>);

impl ProductCatalog {
    pub fn get(&self, key: &str) -> Option<&OptionalProduct> {
        self.0.iter().find(|product| product.key == key)
    }
}
