use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    arrangement::{Arrangement, BoardType, ChosenRoom, Guests, Night, TravelMode},
    pricing::NightlyPricing,
    products::ProductCatalog,
};

/// Body of `POST /api/reservations/availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementQuery {
    pub start_date: NaiveDate,
    pub length: u32,
    pub guests: Guests,
    #[serde(default = "default_amount_of_rooms")]
    pub amount_of_rooms: u32,
    #[serde(default)]
    pub travel_mode: TravelMode,
}

fn default_amount_of_rooms() -> u32 {
    1
}

impl ArrangementQuery {
    pub fn availability_request(&self, use_half_board: bool) -> AvailabilityRequest {
        AvailabilityRequest {
            start_date: self.start_date,
            length: self.length,
            guests: self.guests,
            amount_of_rooms: self.amount_of_rooms,
            use_half_board,
        }
    }
}

/// Body of the PMS `POST /reservations/availability/` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub start_date: NaiveDate,
    pub length: u32,
    pub guests: Guests,
    pub amount_of_rooms: u32,
    pub use_half_board: bool,
}

/// Output of the external arrangement optimizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub optimal_sequence: Option<OptimalSequence>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimalSequence {
    #[serde(default)]
    pub night_details: Vec<NightDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightDetail {
    pub date: NaiveDate,
    pub hotel: String,
    #[serde(default)]
    pub rooms: Vec<ChosenRoom>,
}

impl AvailabilityResponse {
    /// Turns the optimizer output into an arrangement. `None` when the
    /// optimizer found no feasible sequence.
    pub fn into_arrangement(
        self,
        length: u32,
        travel_mode: TravelMode,
        board: BoardType,
    ) -> Option<Arrangement> {
        let details = self.optimal_sequence?.night_details;
        if details.is_empty() {
            return None;
        }

        let nights = details
            .into_iter()
            .map(|detail| Night {
                date: detail.date,
                hotel: detail.hotel,
                board,
                rooms: detail.rooms,
                restaurant: None,
                extras: Vec::new(),
            })
            .collect();

        Some(Arrangement {
            length,
            travel_mode,
            nights,
        })
    }
}

/// Body of the PMS `POST /reservations/pricing/` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub selected_arrangement: Arrangement,
}

/// Query of `GET /reservations/initial-setup/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialSetupQuery {
    pub start_date: NaiveDate,
    pub length: u32,
}

/// Hotel configuration returned by the PMS initial setup call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitialSetup {
    #[serde(default)]
    pub hotels: Vec<HotelSetup>,
    #[serde(default)]
    pub products: ProductCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelSetup {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room_categories: Vec<RoomCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// An arrangement together with the prices the PMS quoted for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedArrangement {
    pub arrangement: Arrangement,
    pub pricing: Vec<NightlyPricing>,
}

/// Breakfast and half board variants of the same query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrangementOptions {
    pub breakfast: Option<PricedArrangement>,
    pub halfboard: Option<PricedArrangement>,
}
