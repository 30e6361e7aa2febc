//! Output formatting for the CLI.

use console::style;
use cooling_commerce::catalog::{brand_icon, Product, StarRating};
use cooling_commerce::search::{PageLink, Pagination};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
///
/// Results go to stdout; status messages go to stderr so `--json` output
/// stays machine-readable.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// One catalog listing line.
    pub fn product_row(&self, product: &Product, rating: f64) {
        let id = format!("#{}", product.id);
        let name = format!("{} {}", brand_icon(&product.brand), product.name);
        let price = product.price_money().display();
        let stars = format!("{} {:.1}", StarRating::from_rating(rating).render(), rating);
        self.table_row(&[&id, &name, &price, &stars], &[5, 40, 12, 14]);
    }

    /// The pager line: "‹ 1 … 4 [5] 6 … 12 ›".
    pub fn pager(&self, pagination: &Pagination) {
        if self.json {
            return;
        }
        let links: Vec<String> = pagination
            .page_links()
            .into_iter()
            .map(|link| match link {
                PageLink::Page {
                    number,
                    current: true,
                } => style(format!("[{}]", number)).bold().to_string(),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Ellipsis => "…".to_string(),
            })
            .collect();

        let prev = if pagination.has_prev { "‹" } else { " " };
        let next = if pagination.has_next { "›" } else { " " };
        println!("\n  {} {} {}", prev, links.join(" "), next);
        println!("  {}", style(pagination.summary("products")).dim());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
