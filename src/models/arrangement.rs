use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Meal plan booked for a night.
///
/// Callers send either the PMS spelling (`"HB"`, `"B&B"`) or the rate table
/// spelling (`"halfboard"`, `"breakfast"`); both deserialize to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BoardType {
    Breakfast,
    HalfBoard,
}

impl BoardType {
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hb" | "halfboard" | "half_board" | "half-board" => BoardType::HalfBoard,
            _ => BoardType::Breakfast,
        }
    }

    /// Key used in the rate table.
    pub fn as_key(&self) -> &'static str {
        match self {
            BoardType::Breakfast => "breakfast",
            BoardType::HalfBoard => "halfboard",
        }
    }
}

impl From<String> for BoardType {
    fn from(value: String) -> Self {
        BoardType::normalize(&value)
    }
}

impl From<BoardType> for String {
    fn from(value: BoardType) -> Self {
        value.as_key().to_string()
    }
}

/// How the guests travel between hotels. Anything that is not cycling is walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
}

impl TravelMode {
    pub fn normalize(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("cycling") {
            TravelMode::Cycling
        } else {
            TravelMode::Walking
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
        }
    }
}

impl From<String> for TravelMode {
    fn from(value: String) -> Self {
        TravelMode::normalize(&value)
    }
}

impl From<TravelMode> for String {
    fn from(value: TravelMode) -> Self {
        value.as_key().to_string()
    }
}

/// Rate table key for an arrangement length. Only 3 and 4 nights are sold;
/// every other length is priced as the 4 day package.
pub fn length_key(length: u32) -> &'static str {
    match length {
        3 => "3D",
        _ => "4D",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guests {
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

impl Guests {
    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// One room on one night and who sleeps in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenRoom {
    pub category_id: String,
    #[serde(default)]
    pub occupant_adults: u32,
    #[serde(default)]
    pub occupant_children: u32,
}

impl ChosenRoom {
    pub fn guest_count(&self) -> u32 {
        self.occupant_adults.saturating_add(self.occupant_children)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Night {
    pub date: NaiveDate,
    pub hotel: String,
    pub board: BoardType,
    #[serde(default)]
    pub rooms: Vec<ChosenRoom>,
    /// Restaurant picked for dinner. Only meaningful for half board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    /// Optional product keys selected for this night.
    #[serde(default)]
    pub extras: Vec<String>,
}

impl Night {
    /// Adults and children across all rooms of the night.
    pub fn guest_count(&self) -> u32 {
        self.rooms
            .iter()
            .map(ChosenRoom::guest_count)
            .fold(0, u32::saturating_add)
    }
}

/// A multi-night package as selected by the guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub length: u32,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub nights: Vec<Night>,
}
