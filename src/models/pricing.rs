//! Typed view of the PMS pricing response.
//!
//! The PMS omits fields freely, so every nested collection defaults to empty
//! and every leaf value is optional. Lookups return `Option` and the price
//! resolver decides what a missing value means.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prices for one hotel on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlyPricing {
    pub date: NaiveDate,
    pub hotel: String,
    #[serde(rename = "CategoryPrices", default)]
    pub category_prices: Vec<CategoryPrice>,
}

impl NightlyPricing {
    pub fn category(&self, category_id: &str) -> Option<&CategoryPrice> {
        self.category_prices
            .iter()
            .find(|category| category.category_id == category_id)
    }
}

/// Finds the pricing record for a night of the arrangement.
pub fn pricing_for_night<'a>(
    pricing: &'a [NightlyPricing],
    date: NaiveDate,
    hotel: &str,
) -> Option<&'a NightlyPricing> {
    pricing
        .iter()
        .find(|night| night.date == date && night.hotel == hotel)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryPrice {
    pub category_id: String,
    #[serde(default)]
    pub occupancy_prices: Vec<OccupancyPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OccupancyPrice {
    #[serde(default)]
    pub occupancies: Vec<Occupancy>,
    #[serde(default)]
    pub rate_group_prices: Vec<RateGroupPrice>,
}

impl OccupancyPrice {
    pub fn person_count(&self) -> u32 {
        self.occupancies
            .iter()
            .map(|o| o.person_count)
            .fold(0, u32::saturating_add)
    }

    /// Gross value of the rate group priced under `rate_id`.
    pub fn gross_value_for(&self, rate_id: &str) -> Option<f64> {
        self.rate_group_prices
            .iter()
            .find(|group| group.min_rate_id == rate_id)?
            .min_price
            .as_ref()?
            .total_amount
            .as_ref()?
            .gross_value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Occupancy {
    pub age_category_id: String,
    pub person_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateGroupPrice {
    pub min_rate_id: String,
    #[serde(default)]
    pub min_price: Option<MinPrice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MinPrice {
    #[serde(default)]
    pub total_amount: Option<Amount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Amount {
    #[serde(default)]
    pub gross_value: Option<f64>,
}
