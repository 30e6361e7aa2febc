//! Catalog listing commands: products, facets and the home page picks.

use anyhow::Result;
use cooling_commerce::catalog::{AcType, Catalog, Facet, Product, Showcase};
use cooling_commerce::engagement::UserRatings;
use cooling_commerce::money::Money;
use cooling_commerce::search::{
    results_label, CatalogView, FacetGroup, Pagination, QueryDescriptor, QueryEngine,
};
use serde::Serialize;
use tracing::debug;

use super::{FacetsArgs, ProductsArgs};
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductsReport<'a> {
    descriptor: &'a QueryDescriptor,
    pagination: Pagination,
    active_filters: usize,
    items: &'a [&'a Product],
}

fn view_title(view: &CatalogView) -> String {
    match view.type_restriction {
        Some(ac_type) => ac_type.display_name().to_string(),
        None => "All Products".to_string(),
    }
}

/// Build an engine for the requested page with the command line filters
/// applied.
fn build_engine(args: &ProductsArgs, catalog: Catalog, view: CatalogView) -> QueryEngine {
    let mut engine = QueryEngine::for_view(catalog, view);

    let selections = [
        (Facet::Brand, &args.brand),
        (Facet::Type, &args.ac_type),
        (Facet::Tonnage, &args.tonnage),
        (Facet::Color, &args.color),
        (Facet::CoverageArea, &args.coverage),
    ];
    for (facet, values) in selections {
        for value in values {
            engine.set_facet_filter(facet, value, true);
        }
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        let span = engine.descriptor().full_span;
        engine.set_price_range(
            args.min_price.unwrap_or(span.min),
            args.max_price.unwrap_or(span.max),
        );
    }

    engine.set_sort(args.sort);
    engine.set_page(args.page);
    if engine.descriptor().page != args.page {
        debug!(requested = args.page, page = engine.descriptor().page, "page clamped");
    }
    engine
}

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let loaded = ctx.load_catalog().await;
    let view = ctx.view(args.view.to_view());
    let title = view_title(&view);
    let engine = build_engine(&args, loaded.catalog, view);
    let results = engine.evaluate();

    if ctx.output.is_json() {
        ctx.output.json(&ProductsReport {
            descriptor: engine.descriptor(),
            pagination: results.pagination,
            active_filters: engine.descriptor().active_filter_count(),
            items: results.page_items(),
        });
        return Ok(());
    }

    let store = ctx.store()?;
    let ratings = UserRatings::new(&store);

    ctx.output.header(&title);
    let mut status = results_label(results.total_count());
    let active = engine.descriptor().active_filter_count();
    if active > 0 {
        status.push_str(&format!(" ({} filters active)", active));
    }
    ctx.output.info(&format!(
        "{}, sorted by {}",
        status,
        engine.descriptor().sort.display_name()
    ));

    if results.is_empty() {
        ctx.output.info("No products match the selected filters.");
        return Ok(());
    }

    println!();
    for product in results.page_items() {
        ctx.output.product_row(product, ratings.display_rating(product));
    }
    ctx.output.pager(&results.pagination);
    Ok(())
}

/// Run the facets command.
pub async fn facets(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let loaded = ctx.load_catalog().await;
    let engine = QueryEngine::for_view(loaded.catalog, ctx.view(args.view.to_view()));
    let groups: Vec<FacetGroup> = engine.facets(loaded.filters.as_ref());

    if ctx.output.is_json() {
        ctx.output.json(&groups);
        return Ok(());
    }

    let span = engine.descriptor().full_span;
    ctx.output.header(&format!("Filters: {}", view_title(engine.view())));
    ctx.output.kv(
        "Price",
        &format!(
            "{} to {}",
            Money::rupees(span.min).display(),
            Money::rupees(span.max).display()
        ),
    );

    for group in &groups {
        println!("\n  {}", console::style(group.label()).bold());
        for value in &group.values {
            ctx.output.list_item(&format!("{} ({})", value.value, value.count));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct HomeSection<'a> {
    #[serde(rename = "type")]
    ac_type: AcType,
    products: Vec<&'a Product>,
}

#[derive(Serialize)]
struct HomeReport<'a> {
    featured: Vec<&'a Product>,
    sections: Vec<HomeSection<'a>>,
}

/// Run the home command: featured products and a random pick per type.
pub async fn home(ctx: &Context) -> Result<()> {
    let loaded = ctx.load_catalog().await;
    let showcase = Showcase::new(&loaded.catalog);
    let mut rng = rand::thread_rng();

    let report = HomeReport {
        featured: showcase.top_rated(Showcase::FEATURED_COUNT),
        sections: AcType::ALL
            .into_iter()
            .map(|ac_type| HomeSection {
                ac_type,
                products: showcase.random_of_type(ac_type, Showcase::SECTION_COUNT, &mut rng),
            })
            .collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header("Featured Products");
    for product in &report.featured {
        ctx.output.product_row(product, product.rating);
    }
    for section in &report.sections {
        ctx.output.header(section.ac_type.display_name());
        if section.products.is_empty() {
            ctx.output.info("Coming soon.");
        }
        for product in &section.products {
            ctx.output.product_row(product, product.rating);
        }
    }
    Ok(())
}
