//! Product Model
//!
//! The storefront sells exactly one product (turkey) in two sizes and four
//! flavors. Prices live here and nowhere else.

use serde::{Deserialize, Serialize};

/// Price of a full turkey in cents
pub const PRICE_FULL_CENTS: u64 = 5000;
/// Price of a half turkey in cents
pub const PRICE_HALF_CENTS: u64 = 3000;

/// Turkey size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Full,
    Half,
}

impl Size {
    /// Unit price from the fixed price table
    pub const fn unit_price_cents(&self) -> u64 {
        match self {
            Size::Full => PRICE_FULL_CENTS,
            Size::Half => PRICE_HALF_CENTS,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Size::Full => "Full",
            Size::Half => "Half",
        }
    }
}

/// Seasoning options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Flavor {
    #[serde(rename = "Cajun")]
    Cajun,
    #[serde(rename = "Lemon Pepper")]
    LemonPepper,
    #[serde(rename = "Honey Mustard")]
    HoneyMustard,
    #[serde(rename = "Fajita")]
    Fajita,
}

impl Flavor {
    pub const ALL: [Flavor; 4] = [
        Flavor::Cajun,
        Flavor::LemonPepper,
        Flavor::HoneyMustard,
        Flavor::Fajita,
    ];

    /// Display name, identical to the wire form
    pub const fn name(&self) -> &'static str {
        match self {
            Flavor::Cajun => "Cajun",
            Flavor::LemonPepper => "Lemon Pepper",
            Flavor::HoneyMustard => "Honey Mustard",
            Flavor::Fajita => "Fajita",
        }
    }
}

/// Catalog entry served by `GET /api/products`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub flavors: Vec<Flavor>,
    pub price_full: u64,
    pub price_half: u64,
}

/// The static catalog
pub fn catalog() -> Vec<Product> {
    vec![Product {
        id: "turkey".to_string(),
        name: "Turkey".to_string(),
        description: "Full Texas turkey or 1/2 Texas turkey. Choose your flavor.".to_string(),
        flavors: Flavor::ALL.to_vec(),
        price_full: PRICE_FULL_CENTS,
        price_half: PRICE_HALF_CENTS,
    }]
}
