use serde::{Deserialize, Serialize};

use crate::schema::SCHEMA_WIDTH;

/// One validated car-sale listing.
///
/// Field names double as the JSON keys of the export format, so the struct
/// serializes directly to the wire shape:
/// `{"id": …, "model": …, "brand": …, "transmission": …, "plate_no": …,
/// "mileage": …, "color": …, "price": …}`.
///
/// `plate_no` is the natural key: the keyed store upserts on it, and two
/// records with the same plate describe the same car. `mileage` is `None`
/// when the source document carried the "unknown" dash. `price` is kept as
/// `f64` because fractional prices occur in the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarSaleRecord {
    /// Row sequence number from the source document. Not globally unique
    /// across documents.
    pub id: i64,
    /// Manufacturer model code.
    pub model: i64,
    pub brand: String,
    pub transmission: String,
    pub plate_no: String,
    pub mileage: Option<i64>,
    pub color: String,
    pub price: f64,
}

impl CarSaleRecord {
    /// Textual rendering of every field, in schema order. This is what the
    /// query façade's substring search matches against; unknown mileage
    /// renders as the dash it came from.
    #[must_use]
    pub fn field_texts(&self) -> [String; SCHEMA_WIDTH] {
        [
            self.id.to_string(),
            self.model.to_string(),
            self.brand.clone(),
            self.transmission.clone(),
            self.plate_no.clone(),
            self.mileage.map_or_else(|| "-".to_string(), |m| m.to_string()),
            self.color.clone(),
            self.price.to_string(),
        ]
    }
}
