use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// fixtures
// -----------------------------------------------------------------------

fn make_raw_record() -> RawHotelRecord {
    RawHotelRecord {
        city_name: Some(json!("London")),
        title: Some(json!("Test Hotel")),
        address: Some(json!("123 Test Street")),
        price: Some(json!(100)),
        image_url: Some(json!("https://img.example.com/test.jpg")),
        rating: Some(json!(4.5)),
        room_type: Some(json!("Deluxe Room")),
        latitude: Some(json!(51.5074)),
        longitude: Some(json!(-0.1278)),
    }
}

fn assert_malformed(result: Result<HotelEntity, ScraperError>, expected_field: &str) {
    match result {
        Err(ScraperError::MalformedField { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected MalformedField({expected_field}), got: {other:?}"),
    }
}

// -----------------------------------------------------------------------
// normalize_record
// -----------------------------------------------------------------------

#[test]
fn normalize_record_keeps_populated_values() {
    let hotel = normalize_record(&make_raw_record(), "images/Test_Hotel.jpg".to_string()).unwrap();
    assert_eq!(hotel.city.as_deref(), Some("London"));
    assert_eq!(hotel.title.as_deref(), Some("Test Hotel"));
    assert_eq!(hotel.location.as_deref(), Some("123 Test Street"));
    assert_eq!(hotel.price, Some(100.0));
    assert_eq!(hotel.image_path, "images/Test_Hotel.jpg");
    assert_eq!(hotel.rating, Some(4.5));
    assert_eq!(hotel.room_type.as_deref(), Some("Deluxe Room"));
    assert_eq!(hotel.latitude, Some(51.5074));
    assert_eq!(hotel.longitude, Some(-0.1278));
}

#[test]
fn normalize_listing_leaves_image_path_empty() {
    let hotel = normalize_listing(&make_raw_record()).unwrap();
    assert_eq!(hotel.image_path, "");
}

#[test]
fn normalize_record_all_absent_is_all_none() {
    let hotel = normalize_listing(&RawHotelRecord::default()).unwrap();
    assert!(hotel.city.is_none());
    assert!(hotel.title.is_none());
    assert!(hotel.location.is_none());
    assert!(hotel.price.is_none());
    assert!(hotel.rating.is_none());
    assert!(hotel.room_type.is_none());
    assert!(hotel.latitude.is_none());
    assert!(hotel.longitude.is_none());
}

#[test]
fn normalize_record_empty_strings_become_none() {
    let mut raw = make_raw_record();
    raw.city_name = Some(json!(""));
    raw.title = Some(json!(""));
    raw.room_type = Some(json!(""));
    raw.price = Some(json!(""));
    raw.latitude = Some(json!(""));
    let hotel = normalize_listing(&raw).unwrap();
    assert!(hotel.city.is_none());
    assert!(hotel.title.is_none());
    assert!(hotel.room_type.is_none());
    assert!(hotel.price.is_none());
    assert!(hotel.latitude.is_none());
}

#[test]
fn normalize_record_null_values_become_none() {
    let mut raw = make_raw_record();
    raw.address = Some(json!(null));
    raw.rating = Some(json!(null));
    let hotel = normalize_listing(&raw).unwrap();
    assert!(hotel.location.is_none());
    assert!(hotel.rating.is_none());
}

#[test]
fn normalize_record_does_not_trim_text() {
    let mut raw = make_raw_record();
    raw.title = Some(json!("  Spaced Hotel "));
    let hotel = normalize_listing(&raw).unwrap();
    assert_eq!(hotel.title.as_deref(), Some("  Spaced Hotel "));
}

#[test]
fn normalize_record_parses_numeric_strings() {
    let mut raw = make_raw_record();
    raw.price = Some(json!("129.50"));
    raw.rating = Some(json!(" 4.2 "));
    raw.latitude = Some(json!("48.8566"));
    let hotel = normalize_listing(&raw).unwrap();
    assert_eq!(hotel.price, Some(129.5));
    assert_eq!(hotel.rating, Some(4.2));
    assert_eq!(hotel.latitude, Some(48.8566));
}

#[test]
fn normalize_record_integer_price_becomes_float() {
    let hotel = normalize_listing(&make_raw_record()).unwrap();
    let price = hotel.price.unwrap();
    assert!((price - 100.0).abs() < f64::EPSILON);
}

#[test]
fn normalize_record_zero_is_a_value() {
    let mut raw = make_raw_record();
    raw.price = Some(json!(0));
    raw.longitude = Some(json!(0.0));
    let hotel = normalize_listing(&raw).unwrap();
    assert_eq!(hotel.price, Some(0.0));
    assert_eq!(hotel.longitude, Some(0.0));
}

#[test]
fn normalize_record_renders_numeric_room_type_as_text() {
    let mut raw = make_raw_record();
    raw.room_type = Some(json!(204));
    let hotel = normalize_listing(&raw).unwrap();
    assert_eq!(hotel.room_type.as_deref(), Some("204"));
}

// -----------------------------------------------------------------------
// malformed numeric fields
// -----------------------------------------------------------------------

#[test]
fn normalize_record_rejects_non_numeric_price() {
    let mut raw = make_raw_record();
    raw.price = Some(json!("call for price"));
    assert_malformed(normalize_listing(&raw), "price");
}

#[test]
fn normalize_record_malformed_error_names_value() {
    let mut raw = make_raw_record();
    raw.rating = Some(json!("excellent"));
    let err = normalize_listing(&raw).unwrap_err();
    assert!(
        err.to_string().contains("excellent"),
        "error should carry the offending value: {err}"
    );
}

#[test]
fn normalize_record_rejects_whitespace_only_number() {
    let mut raw = make_raw_record();
    raw.latitude = Some(json!("   "));
    assert_malformed(normalize_listing(&raw), "latitude");
}

#[test]
fn normalize_record_rejects_structured_number_field() {
    let mut raw = make_raw_record();
    raw.longitude = Some(json!({"value": 1.0}));
    assert_malformed(normalize_listing(&raw), "longitude");
}

#[test]
fn normalize_record_rejects_boolean_number_field() {
    let mut raw = make_raw_record();
    raw.rating = Some(json!(true));
    assert_malformed(normalize_listing(&raw), "rating");
}

#[test]
fn normalize_record_rejects_non_finite_text() {
    let mut raw = make_raw_record();
    raw.price = Some(json!("NaN"));
    assert_malformed(normalize_listing(&raw), "price");
}

// -----------------------------------------------------------------------
// idempotence on clean input
// -----------------------------------------------------------------------

#[test]
fn normalize_record_is_idempotent_on_clean_input() {
    let first = normalize_listing(&make_raw_record()).unwrap();

    let round_trip = RawHotelRecord {
        city_name: first.city.clone().map(Value::from),
        title: first.title.clone().map(Value::from),
        address: first.location.clone().map(Value::from),
        price: first.price.map(Value::from),
        image_url: None,
        rating: first.rating.map(Value::from),
        room_type: first.room_type.clone().map(Value::from),
        latitude: first.latitude.map(Value::from),
        longitude: first.longitude.map(Value::from),
    };
    let second = normalize_listing(&round_trip).unwrap();

    assert_eq!(first, second);
}
