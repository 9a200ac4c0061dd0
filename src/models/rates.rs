use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::models::arrangement::{BoardType, TravelMode};

pub type RateId = String;

/// Board level value of the rate table. One hotel prices half board per
/// restaurant, every other entry is a plain rate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateEntry {
    Single(RateId),
    ByRestaurant(BTreeMap<String, RateId>),
}

/// `hotel -> travel mode -> length key -> board -> entry`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, HashMap<String, HashMap<String, HashMap<String, RateEntry>>>>);

impl RateTable {
    pub fn lookup(
        &self,
        hotel: &str,
        travel_mode: TravelMode,
        length_key: &str,
        board: BoardType,
    ) -> Option<&RateEntry> {
        self.0
            .get(hotel)?
            .get(travel_mode.as_key())?
            .get(length_key)?
            .get(board.as_key())
    }

    pub fn hotel_count(&self) -> usize {
        self.0.len()
    }
}

/// PMS age category ids used by a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategories {
    pub adult: String,
    pub child: String,
}

/// The hotel whose half board rate depends on the restaurant the guest picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantHotel {
    pub hotel: String,
    pub restaurants: Vec<String>,
}

impl RestaurantHotel {
    pub fn recognizes(&self, restaurant: &str) -> bool {
        self.restaurants.iter().any(|name| name == restaurant)
    }
}

/// Static pricing data for one environment. Loaded once at startup and
/// handed to the handlers as application data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub rate_table: RateTable,
    #[serde(default)]
    pub age_categories: HashMap<String, AgeCategories>,
    #[serde(default)]
    pub restaurant_hotel: Option<RestaurantHotel>,
}

impl PricingConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: PricingConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        log::info!(
            "Loaded pricing data for {} hotels from {}",
            config.rate_table.hotel_count(),
            path.display()
        );

        Ok(config)
    }
}
