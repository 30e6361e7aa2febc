//! FAQ and installation gallery commands.

use anyhow::Result;
use console::style;
use cooling_commerce::content::{FaqItem, FaqQuery, GalleryFilter, GalleryItem, GalleryView};
use serde_json::json;

use super::{FaqArgs, GalleryArgs};
use crate::context::Context;

/// Run the faq command.
pub async fn faq(args: FaqArgs, ctx: &Context) -> Result<()> {
    let items: Vec<FaqItem> = ctx.read_document(&ctx.config.data.faq).await?;

    let mut query = FaqQuery::new();
    if let Some(category) = args.category {
        query = query.with_category(category);
    }
    if let Some(search) = args.search {
        query = query.with_search(search);
    }
    let matches = query.apply(&items);

    if ctx.output.is_json() {
        ctx.output.json(&matches);
        return Ok(());
    }

    ctx.output.info(&query.summary(matches.len()));
    if matches.is_empty() {
        ctx.output.info("No questions found. Try a different search term.");
    }
    for item in matches {
        println!("\n  {}", style(&item.question).bold());
        println!("  {}", item.answer);
    }
    Ok(())
}

/// Run the gallery command.
pub async fn gallery(args: GalleryArgs, ctx: &Context) -> Result<()> {
    let items: Vec<GalleryItem> = ctx.read_document(&ctx.config.data.gallery).await?;

    let mut view = GalleryView::new(items).with_page_size(ctx.config.catalog.gallery_page_size);
    view.set_filter(GalleryFilter::parse(&args.filter));
    for _ in 1..args.pages {
        if !view.load_more() {
            break;
        }
    }
    let visible = view.visible();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": visible,
            "total": view.filtered().len(),
            "allLoaded": view.all_loaded(),
        }));
        return Ok(());
    }

    ctx.output.header("Installation Gallery");
    for item in &visible {
        ctx.output.table_row(
            &[&item.title, &item.item_type, &item.location],
            &[36, 10, 12],
        );
    }
    println!();
    ctx.output.info(&view.load_more_label());
    Ok(())
}
