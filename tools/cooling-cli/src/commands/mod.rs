//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod content;
pub mod engage;

use clap::{Args, Subcommand, ValueEnum};
use cooling_commerce::catalog::AcType;
use cooling_commerce::search::{CatalogView, SortKey};

/// Which catalog page to act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewArg {
    /// All products.
    #[default]
    Products,
    Split,
    Window,
    Cassette,
}

impl ViewArg {
    pub fn to_view(self) -> CatalogView {
        match self {
            ViewArg::Products => CatalogView::products(),
            ViewArg::Split => CatalogView::category(AcType::Split),
            ViewArg::Window => CatalogView::category(AcType::Window),
            ViewArg::Cassette => CatalogView::category(AcType::Cassette),
        }
    }
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    SortKey::parse(s).ok_or_else(|| {
        let keys: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("expected one of: {}", keys.join(", "))
    })
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Catalog page to list.
    #[arg(long, value_enum, default_value_t)]
    pub view: ViewArg,

    /// Brand to include (repeatable).
    #[arg(long)]
    pub brand: Vec<String>,

    /// Type to include (repeatable).
    #[arg(long = "type")]
    pub ac_type: Vec<String>,

    /// Tonnage to include (repeatable).
    #[arg(long)]
    pub tonnage: Vec<String>,

    /// Color to include (repeatable).
    #[arg(long)]
    pub color: Vec<String>,

    /// Coverage area to include (repeatable).
    #[arg(long)]
    pub coverage: Vec<String>,

    /// Lowest price.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Highest price.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Sort order.
    #[arg(long, value_parser = parse_sort, default_value = "featured")]
    pub sort: SortKey,

    /// Page number.
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Catalog page whose filters to show.
    #[arg(long, value_enum, default_value_t)]
    pub view: ViewArg,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id.
        id: u32,
    },
    /// Remove a product's line.
    Remove {
        /// Product id.
        id: u32,
    },
    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product id.
        id: u32,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the rate command.
#[derive(Args)]
pub struct RateArgs {
    /// Product id.
    pub id: u32,
    /// Stars, 1 to 5.
    pub stars: i64,
}

/// Arguments for the subscribe command.
#[derive(Args)]
pub struct SubscribeArgs {
    /// Email address.
    pub email: String,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub subject: String,

    /// Product the enquiry is about.
    #[arg(long)]
    pub product: Option<String>,

    #[arg(long)]
    pub message: String,

    /// Also subscribe to the newsletter.
    #[arg(long)]
    pub newsletter: bool,
}

/// Arguments for the faq command.
#[derive(Args)]
pub struct FaqArgs {
    /// Text to search for.
    pub search: Option<String>,

    /// Category to show ("all" for every category).
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the gallery command.
#[derive(Args)]
pub struct GalleryArgs {
    /// Tag, type or location to show ("all" for everything).
    #[arg(short, long, default_value = "all")]
    pub filter: String,

    /// Number of "load more" pages to show.
    #[arg(short, long, default_value = "1")]
    pub pages: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default cooling.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("price-desc"), Ok(SortKey::PriceDesc));
        assert!(parse_sort("cheapest").unwrap_err().contains("rating-desc"));
    }

    #[test]
    fn test_view_presets() {
        assert_eq!(ViewArg::Products.to_view(), CatalogView::products());
        assert_eq!(
            ViewArg::Window.to_view().type_restriction,
            Some(AcType::Window)
        );
    }
}
