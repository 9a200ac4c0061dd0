//! Price resolution for arrangement bookings.
//!
//! Turns booking parameters into a rate id, matches a room's guests against
//! the occupancy prices the PMS returned and sums everything into a booking
//! total. Every function here is pure; lookups that miss produce `None` and
//! count as zero in totals so a partial pricing response still renders.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::models::{
    arrangement::{length_key, Arrangement, BoardType, ChosenRoom, Night, TravelMode},
    pricing::{pricing_for_night, CategoryPrice, NightlyPricing, OccupancyPrice},
    products::{ChargingMode, ProductCatalog},
    rates::{AgeCategories, PricingConfig, RateEntry},
};

const DECIMAL_PLACES: u32 = 2;

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Resolves the PMS rate id for a booking variant.
///
/// The designated restaurant hotel prices half board per restaurant. A
/// recognized restaurant name indexes one level deeper; an absent or unknown
/// name falls back to the board level entry, which only resolves when it is a
/// plain id.
pub fn resolve_rate_id<'a>(
    config: &'a PricingConfig,
    hotel: &str,
    board: BoardType,
    travel_mode: TravelMode,
    length: u32,
    restaurant: Option<&str>,
) -> Option<&'a str> {
    let entry = config
        .rate_table
        .lookup(hotel, travel_mode, length_key(length), board)?;

    let restaurant = restaurant.filter(|name| {
        board == BoardType::HalfBoard
            && config
                .restaurant_hotel
                .as_ref()
                .is_some_and(|designated| designated.hotel == hotel && designated.recognizes(name))
    });

    let rate_id = match (entry, restaurant) {
        (RateEntry::ByRestaurant(rates), Some(name)) => rates.get(name)?,
        (RateEntry::Single(_), Some(_)) => return None,
        (RateEntry::Single(rate_id), None) => rate_id,
        (RateEntry::ByRestaurant(_), None) => return None,
    };

    Some(rate_id.as_str()).filter(|id| !id.is_empty())
}

fn sorted_pairs<'a>(pairs: impl Iterator<Item = (&'a str, u32)>) -> Vec<(&'a str, u32)> {
    let mut pairs: Vec<_> = pairs.collect();
    pairs.sort_unstable();
    pairs
}

/// Finds the occupancy price entry for a room's guests.
///
/// An entry with exactly the same age category breakdown always wins. Only
/// when none exists is the first entry with the same head count used, since
/// the PMS does not always return the split that was asked for.
pub fn find_occupancy_price_entry<'a>(
    category: &'a CategoryPrice,
    age_categories: Option<&AgeCategories>,
    adults: u32,
    children: u32,
) -> Option<&'a OccupancyPrice> {
    let total = adults.saturating_add(children);
    if total == 0 {
        return None;
    }

    if let Some(ids) = age_categories {
        let wanted = sorted_pairs(
            [(ids.adult.as_str(), adults), (ids.child.as_str(), children)]
                .into_iter()
                .filter(|(_, count)| *count > 0),
        );

        let exact = category.occupancy_prices.iter().find(|entry| {
            entry.occupancies.len() == wanted.len()
                && sorted_pairs(
                    entry
                        .occupancies
                        .iter()
                        .map(|o| (o.age_category_id.as_str(), o.person_count)),
                ) == wanted
        });

        if exact.is_some() {
            return exact;
        }
    }

    category
        .occupancy_prices
        .iter()
        .find(|entry| entry.person_count() == total)
}

/// Gross price of one room on one night, `None` when any lookup misses or the
/// room is empty.
pub fn price_for_room(
    config: &PricingConfig,
    night_pricing: &NightlyPricing,
    night: &Night,
    room: &ChosenRoom,
    travel_mode: TravelMode,
    length: u32,
) -> Option<f64> {
    if room.guest_count() == 0 {
        return None;
    }

    let rate_id = resolve_rate_id(
        config,
        &night.hotel,
        night.board,
        travel_mode,
        length,
        night.restaurant.as_deref(),
    )?;

    let category = night_pricing.category(&room.category_id)?;
    let entry = find_occupancy_price_entry(
        category,
        config.age_categories.get(&night.hotel),
        room.occupant_adults,
        room.occupant_children,
    )?;

    entry.gross_value_for(rate_id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomLine {
    pub category_id: String,
    pub guests: u32,
    /// `None` when the room could not be priced.
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NightLine {
    pub date: NaiveDate,
    pub hotel: String,
    pub board: BoardType,
    pub rate_id: String,
    pub rooms: Vec<RoomLine>,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductLine {
    pub key: String,
    pub date: NaiveDate,
    pub hotel: String,
    pub charging_mode: ChargingMode,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub nights: Vec<NightLine>,
    pub products: Vec<ProductLine>,
    pub rooms_total: f64,
    pub products_total: f64,
    pub total: f64,
}

/// Adds `amount` to every running sum, or to none of them when one would
/// overflow.
fn add_to_sums(sums: &mut [&mut Decimal], amount: Decimal) -> bool {
    let Some(updated) = sums
        .iter()
        .map(|sum| sum.checked_add(amount))
        .collect::<Option<Vec<_>>>()
    else {
        return false;
    };

    for (sum, value) in sums.iter_mut().zip(updated) {
        **sum = value;
    }
    true
}

/// Sums room prices for every night plus the selected optional products.
///
/// `Once` and `PerPerson` products are charged a single time, at the first
/// night they are selected and at that night's hotel price. When that hotel
/// has no price the product contributes nothing. `PerPersonNight` products
/// are charged on every night they are selected, for that night's guests.
///
/// A line whose amount does not fit in a `Decimal` is treated as unpriced.
pub fn aggregate_total(
    config: &PricingConfig,
    arrangement: &Arrangement,
    pricing: &[NightlyPricing],
    catalog: &ProductCatalog,
) -> PriceBreakdown {
    let travel_mode = arrangement.travel_mode;
    let mut rooms_total = Decimal::ZERO;
    let mut products_total = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    let mut nights = Vec::with_capacity(arrangement.nights.len());
    let mut products = Vec::new();
    let mut charged_once: HashSet<&str> = HashSet::new();

    for night in &arrangement.nights {
        let night_pricing = pricing_for_night(pricing, night.date, &night.hotel);
        if night_pricing.is_none() {
            log::debug!("No pricing for {} on {}", night.hotel, night.date);
        }

        let mut rooms: Vec<RoomLine> = night
            .rooms
            .iter()
            .map(|room| RoomLine {
                category_id: room.category_id.clone(),
                guests: room.guest_count(),
                price: night_pricing.and_then(|p| {
                    price_for_room(config, p, night, room, travel_mode, arrangement.length)
                }),
            })
            .collect();

        let mut subtotal = Decimal::ZERO;
        for room in &mut rooms {
            let Some(price) = room.price else { continue };
            let Some(amount) = Decimal::from_f64(price) else {
                log::warn!("Room price {} for {} is out of range", price, night.hotel);
                room.price = None;
                continue;
            };
            if !add_to_sums(&mut [&mut subtotal, &mut rooms_total, &mut total], amount) {
                log::warn!("Room total overflowed for {} on {}", night.hotel, night.date);
                room.price = None;
            }
        }

        let guests = night.guest_count();
        let mut seen_tonight: HashSet<&str> = HashSet::new();

        for key in &night.extras {
            if !seen_tonight.insert(key.as_str()) || charged_once.contains(key.as_str()) {
                continue;
            }

            let Some(product) = catalog.get(key) else {
                log::debug!("Unknown optional product {}", key);
                continue;
            };
            if !product.serves(travel_mode) {
                continue;
            }
            if product.charging_mode != ChargingMode::PerPersonNight {
                charged_once.insert(key.as_str());
            }
            let Some(unit_price) = product.unit_price(&night.hotel) else {
                log::debug!("Product {} has no price for {}", key, night.hotel);
                continue;
            };

            let quantity = match product.charging_mode {
                ChargingMode::Once => 1,
                ChargingMode::PerPerson | ChargingMode::PerPersonNight => guests,
            };

            let Some(amount) = Decimal::from_f64(unit_price)
                .and_then(|unit| unit.checked_mul(Decimal::from(quantity)))
            else {
                log::warn!("Product {} amount is out of range on {}", key, night.date);
                continue;
            };
            if !add_to_sums(&mut [&mut products_total, &mut total], amount) {
                log::warn!("Product total overflowed at {} on {}", key, night.date);
                continue;
            }

            products.push(ProductLine {
                key: key.clone(),
                date: night.date,
                hotel: night.hotel.clone(),
                charging_mode: product.charging_mode,
                quantity,
                unit_price,
                amount: to_f64(amount),
            });
        }

        nights.push(NightLine {
            date: night.date,
            hotel: night.hotel.clone(),
            board: night.board,
            rate_id: resolve_rate_id(
                config,
                &night.hotel,
                night.board,
                travel_mode,
                arrangement.length,
                night.restaurant.as_deref(),
            )
            .unwrap_or_default()
            .to_string(),
            rooms,
            subtotal: to_f64(subtotal),
        });
    }

    PriceBreakdown {
        nights,
        products,
        rooms_total: to_f64(rooms_total),
        products_total: to_f64(products_total),
        total: to_f64(total),
    }
}
