use serde::{Deserialize, Serialize};

/// A hotel listing normalized for storage.
///
/// Built once per scraped listing entry and written once; numeric fields are
/// either a parsed `f64` or `None`, never raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelEntity {
    pub city: Option<String>,
    pub title: Option<String>,
    /// Street address or area name shown on the listing.
    pub location: Option<String>,
    pub price: Option<f64>,
    /// Local path of the downloaded image, or an empty string when no image
    /// could be stored.
    pub image_path: String,
    pub rating: Option<f64>,
    pub room_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl HotelEntity {
    /// Returns `true` if an image was downloaded for this hotel.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.image_path.is_empty()
    }

    /// Returns `(latitude, longitude)` when both coordinates are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
