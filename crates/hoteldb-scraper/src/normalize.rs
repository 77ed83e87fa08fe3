//! Normalization from [`RawHotelRecord`] to [`hoteldb_core::HotelEntity`].
//!
//! Text fields collapse `null` and `""` to `None` and otherwise pass through
//! untouched. Numeric fields accept JSON numbers and numeric strings; any
//! other non-empty value is a [`ScraperError::MalformedField`].

use hoteldb_core::HotelEntity;
use serde_json::Value;

use crate::error::ScraperError;
use crate::listing::RawHotelRecord;

/// Normalizes a raw listing record, attaching the already-fetched
/// `image_path` (empty when no image was stored).
///
/// # Errors
///
/// Returns [`ScraperError::MalformedField`] if price, rating, latitude, or
/// longitude holds something that is not a finite number.
pub fn normalize_record(
    raw: &RawHotelRecord,
    image_path: String,
) -> Result<HotelEntity, ScraperError> {
    Ok(HotelEntity {
        city: text_field(raw.city_name.as_ref()),
        title: text_field(raw.title.as_ref()),
        location: text_field(raw.address.as_ref()),
        price: number_field("price", raw.price.as_ref())?,
        image_path,
        rating: number_field("rating", raw.rating.as_ref())?,
        room_type: text_field(raw.room_type.as_ref()),
        latitude: number_field("latitude", raw.latitude.as_ref())?,
        longitude: number_field("longitude", raw.longitude.as_ref())?,
    })
}

/// Normalizes a raw listing record without an image.
///
/// # Errors
///
/// Same as [`normalize_record`].
pub fn normalize_listing(raw: &RawHotelRecord) -> Result<HotelEntity, ScraperError> {
    normalize_record(raw, String::new())
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Numbers and booleans occasionally stand in for names (e.g. numeric
        // room codes); keep their JSON rendering.
        other => Some(other.to_string()),
    }
}

fn number_field(field: &'static str, value: Option<&Value>) -> Result<Option<f64>, ScraperError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Null => return Ok(None),
        Value::String(s) if s.is_empty() => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ScraperError::MalformedField {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
