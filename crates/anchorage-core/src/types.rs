//! # Domain Types
//!
//! Core domain types used throughout Anchorage.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ LocationResult  │   │    Listing      │   │  ListingForm    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  latitude       │   │  id (UUID)      │   │  raw strings    │       │
//! │  │  longitude      │   │  seller_id      │   │  from the       │       │
//! │  │  accuracy (m)   │   │  title, price   │   │  dashboard      │       │
//! │  └─────────────────┘   │  category       │   └────────┬────────┘       │
//! │     sensor only,       └─────────────────┘            │ validate        │
//! │     never persisted                          ┌────────▼────────┐       │
//! │                                              │  ListingDraft   │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  typed, ready   │       │
//! │  │ ProductCategory │   │   SellerType    │   │  for backend    │       │
//! │  │  food / fish /  │   │  sailboat /     │   └─────────────────┘       │
//! │  │  crafts /       │   │  island /       │                             │
//! │  │  nautical       │   │  tourist        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Location
// =============================================================================

/// A single fix read from a location sensor.
///
/// Only sensor adapters construct this, and only from a successful read.
/// Fields are private; a fix cannot be edited after the fact. No
/// `Deserialize`: a fix lives for the current screen only and is never
/// loaded back from storage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct LocationResult {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
}

impl LocationResult {
    /// Wraps the triple reported by the sensor, unmodified.
    pub const fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        LocationResult {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Radius of uncertainty in meters.
    #[inline]
    pub const fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// The coordinate pair handed to the flow's caller.
    #[inline]
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A latitude/longitude pair, as given to `on_granted`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    /// Four decimals, as shown on the discovery header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// Category of a marketplace listing.
///
/// The four known categories are what the seller form offers. Rows written
/// by other tools may carry anything, so unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Food,
    Fish,
    Crafts,
    Nautical,
    Other(String),
}

impl ProductCategory {
    /// Categories offered by the seller form, in display order.
    pub const KNOWN: [ProductCategory; 4] = [
        ProductCategory::Food,
        ProductCategory::Fish,
        ProductCategory::Crafts,
        ProductCategory::Nautical,
    ];

    /// Value stored in the backend `category` column.
    pub fn as_str(&self) -> &str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::Fish => "fish",
            ProductCategory::Crafts => "crafts",
            ProductCategory::Nautical => "nautical",
            ProductCategory::Other(raw) => raw,
        }
    }

    /// Human label used on cards and in the category picker.
    pub fn label(&self) -> &str {
        match self {
            ProductCategory::Food => "Food & Drinks",
            ProductCategory::Fish => "Fresh Seafood",
            ProductCategory::Crafts => "Handmade & Crafts",
            ProductCategory::Nautical => "Sailor Supplies",
            ProductCategory::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProductCategory::Other(_))
    }
}

impl Default for ProductCategory {
    fn default() -> Self {
        ProductCategory::Food
    }
}

impl From<&str> for ProductCategory {
    fn from(value: &str) -> Self {
        match value {
            "food" => ProductCategory::Food,
            "fish" => ProductCategory::Fish,
            "crafts" => ProductCategory::Crafts,
            "nautical" => ProductCategory::Nautical,
            other => ProductCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProductCategory::from(raw.as_str()))
    }
}

// =============================================================================
// Seller Type
// =============================================================================

/// Where a seller trades from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SellerType {
    /// Mobile seller working from a boat.
    Sailboat,
    /// Fixed vendor on an island.
    Island,
    /// Visiting seller.
    Tourist,
}

impl SellerType {
    /// Backend rows only record whether the seller is mobile.
    pub fn from_mobile_flag(is_mobile_seller: bool) -> Self {
        if is_mobile_seller {
            SellerType::Sailboat
        } else {
            SellerType::Island
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

/// A product row as stored in the hosted backend's `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Listing {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning seller (auth user id).
    pub seller_id: String,

    pub title: String,

    pub description: Option<String>,

    /// Price in dollars, as the backend's numeric column returns it.
    pub price: f64,

    #[ts(as = "String")]
    pub category: ProductCategory,

    pub image_url: Option<String>,

    /// Whether the listing is visible in public discovery.
    pub is_active: bool,

    /// Whether the seller trades from a boat.
    pub is_mobile_seller: bool,

    pub available_quantity: u32,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    #[inline]
    pub fn seller_type(&self) -> SellerType {
        SellerType::from_mobile_flag(self.is_mobile_seller)
    }
}

// =============================================================================
// Listing Form
// =============================================================================

/// The seller dashboard's create/edit form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub is_mobile_seller: bool,
    pub available_quantity: String,
}

impl Default for ListingForm {
    fn default() -> Self {
        ListingForm {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            category: ProductCategory::Food.as_str().to_string(),
            image_url: String::new(),
            is_mobile_seller: false,
            available_quantity: "1".to_string(),
        }
    }
}

impl ListingForm {
    /// Prefills the form for editing an existing listing.
    pub fn from_listing(listing: &Listing) -> Self {
        ListingForm {
            title: listing.title.clone(),
            description: listing.description.clone().unwrap_or_default(),
            price: format!("{:.2}", listing.price().as_decimal()),
            category: listing.category.as_str().to_string(),
            image_url: listing.image_url.clone().unwrap_or_default(),
            is_mobile_seller: listing.is_mobile_seller,
            available_quantity: listing.available_quantity.to_string(),
        }
    }
}

/// A validated listing, ready to insert or update.
///
/// Produced only by [`crate::validation::validate_listing_form`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ListingDraft {
    pub title: String,
    pub description: Option<String>,
    pub price: Money,
    #[ts(as = "String")]
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub is_mobile_seller: bool,
    pub available_quantity: u32,
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Login form input.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form input.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validated sign-in credentials (email trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validated sign-up request (name and email trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing() -> Listing {
        Listing {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            seller_id: "9b2f6c1e-0000-4000-8000-000000000001".to_string(),
            title: "Fish Catch of the Day".to_string(),
            description: None,
            price: 16.5,
            category: ProductCategory::Fish,
            image_url: None,
            is_active: true,
            is_mobile_seller: true,
            available_quantity: 4,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_location_result_keeps_sensor_triple() {
        let fix = LocationResult::new(18.4655, -66.1057, 15.0);
        assert_eq!(fix.latitude(), 18.4655);
        assert_eq!(fix.longitude(), -66.1057);
        assert_eq!(fix.accuracy(), 15.0);
        assert_eq!(fix.coordinates(), Coordinates::new(18.4655, -66.1057));
    }

    #[test]
    fn test_coordinates_display() {
        let coords = Coordinates::new(18.46551, -66.10569);
        assert_eq!(coords.to_string(), "18.4655, -66.1057");
    }

    #[test]
    fn test_category_round_trips_backend_values() {
        assert_eq!(ProductCategory::from("crafts"), ProductCategory::Crafts);
        assert_eq!(ProductCategory::Nautical.label(), "Sailor Supplies");

        let other = ProductCategory::from("jewelry");
        assert!(!other.is_known());
        assert_eq!(other.label(), "jewelry");

        let json = serde_json::to_string(&ProductCategory::Fish).unwrap();
        assert_eq!(json, "\"fish\"");
        let parsed: ProductCategory = serde_json::from_str("\"food\"").unwrap();
        assert_eq!(parsed, ProductCategory::Food);
    }

    #[test]
    fn test_seller_type_from_mobile_flag() {
        assert_eq!(SellerType::from_mobile_flag(true), SellerType::Sailboat);
        assert_eq!(SellerType::from_mobile_flag(false), SellerType::Island);
    }

    #[test]
    fn test_listing_form_defaults() {
        let form = ListingForm::default();
        assert_eq!(form.category, "food");
        assert_eq!(form.available_quantity, "1");
        assert!(!form.is_mobile_seller);
    }

    #[test]
    fn test_listing_form_prefills_from_listing() {
        let form = ListingForm::from_listing(&sample_listing());
        assert_eq!(form.title, "Fish Catch of the Day");
        assert_eq!(form.price, "16.50");
        assert_eq!(form.category, "fish");
        assert_eq!(form.available_quantity, "4");
        assert_eq!(form.description, "");
        assert!(form.is_mobile_seller);
    }

    #[test]
    fn test_listing_deserializes_backend_row() {
        let row = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "seller_id": "9b2f6c1e-0000-4000-8000-000000000001",
            "title": "Handwoven Basket",
            "description": "Made by local artisans",
            "price": 24,
            "category": "crafts",
            "image_url": null,
            "is_active": true,
            "is_mobile_seller": false,
            "available_quantity": 3,
            "created_at": "2024-05-01T12:00:00Z"
        }"#;
        let listing: Listing = serde_json::from_str(row).unwrap();
        assert_eq!(listing.price().cents(), 2400);
        assert_eq!(listing.category, ProductCategory::Crafts);
        assert_eq!(listing.seller_type(), SellerType::Island);
    }
}
