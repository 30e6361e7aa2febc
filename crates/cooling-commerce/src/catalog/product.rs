//! Product, type and facet definitions.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Air-conditioner construction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AcType {
    /// Wall-mounted indoor unit with a separate outdoor compressor.
    #[default]
    Split,
    /// Single-box unit installed in a window or wall opening.
    Window,
    /// Ceiling-mounted commercial unit.
    Cassette,
}

impl AcType {
    /// All types, in catalog order.
    pub const ALL: [AcType; 3] = [AcType::Split, AcType::Window, AcType::Cassette];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcType::Split => "split",
            AcType::Window => "window",
            AcType::Cassette => "cassette",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "split" => Some(AcType::Split),
            "window" => Some(AcType::Window),
            "cassette" => Some(AcType::Cassette),
            _ => None,
        }
    }

    /// Human-readable name (e.g., "Split AC").
    pub fn display_name(&self) -> &'static str {
        match self {
            AcType::Split => "Split AC",
            AcType::Window => "Window AC",
            AcType::Cassette => "Cassette AC",
        }
    }
}

/// A categorical product attribute usable as a filter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facet {
    #[serde(rename = "brands")]
    Brand,
    #[serde(rename = "types")]
    Type,
    #[serde(rename = "tonnage")]
    Tonnage,
    #[serde(rename = "colors")]
    Color,
    #[serde(rename = "coverageArea")]
    CoverageArea,
}

impl Facet {
    /// All facets, in the order the filter sidebar lists them.
    pub const ALL: [Facet; 5] = [
        Facet::Type,
        Facet::Brand,
        Facet::Tonnage,
        Facet::Color,
        Facet::CoverageArea,
    ];

    /// Key used in the filter metadata document.
    pub fn key(&self) -> &'static str {
        match self {
            Facet::Brand => "brands",
            Facet::Type => "types",
            Facet::Tonnage => "tonnage",
            Facet::Color => "colors",
            Facet::CoverageArea => "coverageArea",
        }
    }

    /// Sidebar heading.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::Brand => "Brand",
            Facet::Type => "AC Type",
            Facet::Tonnage => "Tonnage",
            Facet::Color => "Color",
            Facet::CoverageArea => "Coverage Area",
        }
    }

    /// Parse a facet from its metadata key or a singular alias.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "brands" | "brand" => Some(Facet::Brand),
            "types" | "type" => Some(Facet::Type),
            "tonnage" => Some(Facet::Tonnage),
            "colors" | "color" => Some(Facet::Color),
            "coverageArea" | "coverage" => Some(Facet::CoverageArea),
            _ => None,
        }
    }

    /// The product's value for this facet.
    pub fn value_of<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            Facet::Brand => &product.brand,
            Facet::Type => product.ac_type.as_str(),
            Facet::Tonnage => &product.tonnage,
            Facet::Color => &product.color,
            Facet::CoverageArea => &product.coverage_area,
        }
    }
}

/// A product in the catalog.
///
/// Field names follow the static `products.json` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Manufacturer.
    pub brand: String,
    /// Construction type.
    #[serde(rename = "type")]
    pub ac_type: AcType,
    /// Cooling capacity (e.g., "1.5 Ton").
    pub tonnage: String,
    /// Recommended room size (e.g., "150-200 sq ft").
    pub coverage_area: String,
    /// Housing color.
    pub color: String,
    /// Price in whole rupees.
    pub price: i64,
    /// Average rating, 0 to 5.
    pub rating: f64,
    /// Image path.
    #[serde(default)]
    pub image: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Create a product with the required fields; descriptive fields start
    /// empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            ac_type: AcType::default(),
            tonnage: String::new(),
            coverage_area: String::new(),
            color: String::new(),
            price,
            rating: 0.0,
            image: String::new(),
            description: String::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_type(mut self, ac_type: AcType) -> Self {
        self.ac_type = ac_type;
        self
    }

    pub fn with_tonnage(mut self, tonnage: impl Into<String>) -> Self {
        self.tonnage = tonnage.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_coverage_area(mut self, coverage_area: impl Into<String>) -> Self {
        self.coverage_area = coverage_area.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Price as money.
    pub fn price_money(&self) -> Money {
        Money::rupees(self.price)
    }

    /// Check the record is usable by the catalog.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidProduct {
            id: self.id,
            reason: reason.to_string(),
        };

        if !self.id.is_valid() {
            return Err(invalid("id must be positive"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if self.price < 0 {
            return Err(invalid("price is negative"));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(invalid("rating must be between 0 and 5"));
        }
        Ok(())
    }
}
