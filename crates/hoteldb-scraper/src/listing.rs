//! Hotel entries from a city listing payload.
//!
//! ## Observed entry shape (`initData.firstPageList.hotelList[]`)
//!
//! ```json
//! {
//!   "hotelBasicInfo": {"hotelName": "...", "price": 100, "hotelImg": "https://..."},
//!   "commentInfo":    {"commentScore": 4.5},
//!   "roomInfo":       {"physicalRoomName": "Deluxe Room"},
//!   "positionInfo":   {"cityName": "London", "positionName": "...",
//!                      "coordinate": {"lat": 51.5, "lng": -0.12}}
//! }
//! ```
//!
//! Every section is optional in practice. `price` and `commentScore` arrive
//! as numbers on most pages and as numeric strings on some; values are kept
//! as raw JSON here and typed in [`crate::normalize`].

use serde_json::Value;

use crate::json_path::{array_at, value_at};

const HOTEL_LIST: &[&str] = &["initData", "firstPageList", "hotelList"];

/// One listing entry flattened to its raw field values.
///
/// `None` means the field (or its whole section) was absent or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHotelRecord {
    pub city_name: Option<Value>,
    pub title: Option<Value>,
    pub address: Option<Value>,
    pub price: Option<Value>,
    pub image_url: Option<Value>,
    pub rating: Option<Value>,
    pub room_type: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

impl RawHotelRecord {
    /// The image URL when it is a non-empty string.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url
            .as_ref()
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Flattens every entry of the first results page, preserving order.
///
/// A payload without a hotel list produces an empty vector.
pub fn extract_listings(payload: &Value) -> Vec<RawHotelRecord> {
    array_at(payload, HOTEL_LIST)
        .iter()
        .map(extract_entry)
        .collect()
}

fn extract_entry(hotel: &Value) -> RawHotelRecord {
    let field = |path: &[&str]| value_at(hotel, path).cloned();

    RawHotelRecord {
        city_name: field(&["positionInfo", "cityName"]),
        title: field(&["hotelBasicInfo", "hotelName"]),
        address: field(&["positionInfo", "positionName"]),
        price: field(&["hotelBasicInfo", "price"]),
        image_url: field(&["hotelBasicInfo", "hotelImg"]),
        rating: field(&["commentInfo", "commentScore"]),
        room_type: field(&["roomInfo", "physicalRoomName"]),
        latitude: field(&["positionInfo", "coordinate", "lat"]),
        longitude: field(&["positionInfo", "coordinate", "lng"]),
    }
}
