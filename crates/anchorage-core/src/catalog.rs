//! # Discovery Catalog
//!
//! Turns backend listing rows into the sections shown on the public
//! discovery screen.
//!
//! ```text
//! Vec<Listing> ──► active only ──► DiscoveryProduct ──► group by category
//!                                                        │
//!        food → fish → crafts → nautical (fixed order)   ▼
//!                                           empty sections dropped
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Coordinates, Listing, ProductCategory, SellerType};
use crate::validation::validate_uuid;
use crate::SELLER_LABEL_ID_CHARS;

// =============================================================================
// Discovery Product
// =============================================================================

/// A listing as rendered on a discovery card.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryProduct {
    pub id: String,
    pub name: String,
    /// Display label of the category.
    pub category: String,
    /// Formatted price, e.g. `$8.50`.
    pub price: String,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Public seller label; the full seller id is never shown.
    pub seller: String,
    pub seller_type: SellerType,
    /// Raw category value the product is grouped under.
    pub section: String,
}

impl DiscoveryProduct {
    pub fn from_listing(listing: &Listing) -> Self {
        DiscoveryProduct {
            id: listing.id.clone(),
            name: listing.title.clone(),
            category: listing.category.label().to_string(),
            price: listing.price().to_string(),
            image: listing.image_url.clone(),
            description: listing.description.clone(),
            seller: seller_label(&listing.seller_id),
            seller_type: listing.seller_type(),
            section: listing.category.as_str().to_string(),
        }
    }
}

/// `Seller 9b2f6c1e` for seller id `9b2f6c1e-...`.
pub fn seller_label(seller_id: &str) -> String {
    let prefix: String = seller_id.chars().take(SELLER_LABEL_ID_CHARS).collect();
    format!("Seller {}", prefix)
}

// =============================================================================
// Sections
// =============================================================================

/// A titled horizontal row on the discovery screen.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub products: Vec<DiscoveryProduct>,
}

/// Section title and tagline for each known category.
fn section_heading(category: &ProductCategory) -> Option<(&'static str, &'static str)> {
    match category {
        ProductCategory::Food => Some(("Fresh Food & Drinks", "Today's harvest and daily catches")),
        ProductCategory::Fish => Some(("Fresh Seafood", "Catch of the day from local fishermen")),
        ProductCategory::Crafts => Some(("Handmade & Local Crafts", "Authentic artisan products")),
        ProductCategory::Nautical => Some(("Sailor Supplies", "Everything you need for the waves")),
        ProductCategory::Other(_) => None,
    }
}

/// Groups active listings into discovery sections.
///
/// ## Rules
/// - Inactive listings never appear
/// - Sections follow [`ProductCategory::KNOWN`] order
/// - Listings keep their input order inside a section
/// - Empty sections are dropped
/// - Listings with an unknown category are not shown in any section
pub fn build_sections(listings: &[Listing]) -> Vec<Section> {
    ProductCategory::KNOWN
        .iter()
        .filter_map(|category| {
            let (title, description) = section_heading(category)?;
            let products: Vec<DiscoveryProduct> = listings
                .iter()
                .filter(|l| l.is_active && &l.category == category)
                .map(DiscoveryProduct::from_listing)
                .collect();

            if products.is_empty() {
                return None;
            }

            Some(Section {
                id: category.as_str().to_string(),
                title: title.to_string(),
                description: Some(description.to_string()),
                products,
            })
        })
        .collect()
}

/// Finds an active listing by id (opening the product detail view).
///
/// ## Errors
/// - [`CoreError::Validation`] if `id` is not a UUID
/// - [`CoreError::ListingNotFound`] if no row has that id
/// - [`CoreError::ListingInactive`] if the row is hidden from discovery
pub fn find_listing<'a>(listings: &'a [Listing], id: &str) -> CoreResult<&'a Listing> {
    validate_uuid(id)?;
    let id = id.trim();

    let listing = listings
        .iter()
        .find(|l| l.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| CoreError::ListingNotFound(id.to_string()))?;

    if !listing.is_active {
        return Err(CoreError::ListingInactive(listing.id.clone()));
    }

    Ok(listing)
}

// =============================================================================
// Discovery Context
// =============================================================================

/// What the discovery screen knows about the current visitor.
///
/// Location is optional and screen-local: it is set from the permission
/// flow's grant and dropped with the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DiscoveryContext {
    location: Option<Coordinates>,
}

impl DiscoveryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags the context with a granted location.
    pub fn with_location(mut self, coordinates: Coordinates) -> Self {
        self.location = Some(coordinates);
        self
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Header badge text.
    pub fn badge(&self) -> &'static str {
        if self.location.is_some() {
            "Location Active"
        } else {
            "Browsing All"
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(id: &str, title: &str, category: &str, active: bool) -> Listing {
        Listing {
            id: id.to_string(),
            seller_id: "9b2f6c1e-0000-4000-8000-000000000001".to_string(),
            title: title.to_string(),
            description: None,
            price: 8.5,
            category: ProductCategory::from(category),
            image_url: None,
            is_active: active,
            is_mobile_seller: category == "fish",
            available_quantity: 1,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("00000000-0000-4000-8000-000000000001", "Rope", "nautical", true),
            listing("00000000-0000-4000-8000-000000000002", "Mangoes", "food", true),
            listing("00000000-0000-4000-8000-000000000003", "Lobster", "fish", false),
            listing("00000000-0000-4000-8000-000000000004", "Ring", "jewelry", true),
            listing("00000000-0000-4000-8000-000000000005", "Rum", "food", true),
        ]
    }

    #[test]
    fn test_sections_follow_fixed_order_and_drop_empty() {
        let sections = build_sections(&sample());
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["food", "nautical"]);

        let food = &sections[0];
        assert_eq!(food.title, "Fresh Food & Drinks");
        let names: Vec<&str> = food.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mangoes", "Rum"]);
    }

    #[test]
    fn test_discovery_product_formatting() {
        let product = DiscoveryProduct::from_listing(&sample()[1]);
        assert_eq!(product.price, "$8.50");
        assert_eq!(product.category, "Food & Drinks");
        assert_eq!(product.seller, "Seller 9b2f6c1e");
        assert_eq!(product.seller_type, SellerType::Island);
        assert_eq!(product.section, "food");
    }

    #[test]
    fn test_seller_label_short_id() {
        assert_eq!(seller_label("abc"), "Seller abc");
    }

    #[test]
    fn test_find_listing() {
        let listings = sample();
        let found = find_listing(&listings, "00000000-0000-4000-8000-000000000002").unwrap();
        assert_eq!(found.title, "Mangoes");

        assert!(matches!(
            find_listing(&listings, "00000000-0000-4000-8000-000000000003"),
            Err(CoreError::ListingInactive(_))
        ));
        assert!(matches!(
            find_listing(&listings, "00000000-0000-4000-8000-0000000000ff"),
            Err(CoreError::ListingNotFound(_))
        ));
        assert!(matches!(
            find_listing(&listings, "nope"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_discovery_context_location_tag() {
        let ctx = DiscoveryContext::new();
        assert_eq!(ctx.location(), None);
        assert_eq!(ctx.badge(), "Browsing All");

        let ctx = ctx.with_location(Coordinates::new(18.4655, -66.1057));
        assert_eq!(ctx.badge(), "Location Active");
        assert_eq!(ctx.location().unwrap().to_string(), "18.4655, -66.1057");
    }
}
