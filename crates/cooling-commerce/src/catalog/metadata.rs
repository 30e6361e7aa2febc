//! Canonical filter options from the filter metadata document.

use serde::{Deserialize, Serialize};

use crate::catalog::Facet;
use crate::error::CommerceError;

/// A preset price bracket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PriceBucket {
    pub label: String,
    pub min: i64,
    /// Upper bound; `None` for an open-ended bracket.
    pub max: Option<i64>,
}

impl PriceBucket {
    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// Canonical facet option lists (`filters.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterMetadata {
    pub types: Vec<String>,
    pub brands: Vec<String>,
    pub tonnage: Vec<String>,
    pub colors: Vec<String>,
    pub coverage_area: Vec<String>,
    pub price_ranges: Vec<PriceBucket>,
}

impl FilterMetadata {
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The canonical option list for a facet.
    pub fn canonical(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Brand => &self.brands,
            Facet::Type => &self.types,
            Facet::Tonnage => &self.tonnage,
            Facet::Color => &self.colors,
            Facet::CoverageArea => &self.coverage_area,
        }
    }

    /// Check if no option lists were supplied.
    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&f| self.canonical(f).is_empty())
    }
}

/// Glyph shown next to a brand in filter controls.
pub fn brand_icon(brand: &str) -> &'static str {
    match brand {
        "Rheem" => "🏭",
        "Daikin" => "❄️",
        "LG" | "Hitachi" => "🔴",
        "Carrier" => "🌬️",
        "Samsung" => "🔵",
        "Voltas" => "⚡",
        "Blue Star" => "🔷",
        "Mitsubishi" => "♦️",
        "Haier" => "🏢",
        "Asad" => "⭐",
        _ => "🏷️",
    }
}
