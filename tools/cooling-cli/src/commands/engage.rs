//! Ratings, newsletter, contact form and visitor counter commands.

use anyhow::Result;
use cooling_commerce::catalog::StarRating;
use cooling_commerce::engagement::{ContactForm, UserRatings, VisitorCounter};
use cooling_commerce::ids::ProductId;
use cooling_commerce::CommerceError;
use cooling_data::{DataError, SubmissionGateway};
use serde_json::json;

use super::{ContactArgs, RateArgs, SubscribeArgs};
use crate::context::Context;

/// Run the rate command.
pub async fn rate(args: RateArgs, ctx: &Context) -> Result<()> {
    let loaded = ctx.require_catalog().await?;
    let product = loaded.catalog.require(ProductId::new(args.id))?;

    let store = ctx.store()?;
    let ratings = UserRatings::new(&store);
    ratings.set(product.id, args.stars)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": product.id, "rating": args.stars }));
        return Ok(());
    }

    let stars = StarRating::from_rating(ratings.display_rating(product));
    ctx.output.success(&format!(
        "Thank you for rating {}! {} {}",
        product.name,
        stars.render(),
        ratings.label(product.id)
    ));
    Ok(())
}

/// Run the subscribe command.
pub async fn subscribe(args: SubscribeArgs, ctx: &Context) -> Result<()> {
    let gateway = ctx.gateway()?;
    let spinner = ctx.output.spinner("Subscribing...");
    let result = gateway.subscribe_newsletter(&args.email).await;
    spinner.finish_and_clear();

    let added = match result {
        Err(DataError::Commerce(CommerceError::InvalidEmail(_))) => {
            anyhow::bail!("Please enter a valid email address")
        }
        other => other?,
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "email": args.email.trim(), "subscribed": added }));
    } else if added {
        ctx.output.success("Thank you for subscribing!");
    } else {
        ctx.output.info("You are already subscribed.");
    }
    Ok(())
}

/// Run the contact command.
pub async fn contact(args: ContactArgs, ctx: &Context) -> Result<()> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        product: args.product,
        message: args.message,
        newsletter: args.newsletter,
    };

    // Report every invalid field, not just the first.
    let errors = form.field_errors();
    if !errors.is_empty() {
        for error in &errors {
            ctx.output.warn(&format!("{}: {}", error.field, error.message));
        }
        anyhow::bail!("Contact form has {} invalid field(s)", errors.len());
    }

    let gateway = ctx.gateway()?;
    let spinner = ctx.output.spinner("Sending...");
    let result = gateway.submit_contact(form).await;
    spinner.finish_and_clear();
    let submission = result?;

    if ctx.output.is_json() {
        ctx.output.json(&submission);
    } else {
        ctx.output.success(&format!(
            "Thank you {}! Your message has been sent. We'll get back to you within 24 hours.",
            submission.name
        ));
    }
    Ok(())
}

/// Run the visit command.
pub async fn visit(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let count = VisitorCounter::new(&store).record_visit()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "visitors": count }));
    } else {
        ctx.output.info(&format!("Visitors: {}", count));
    }
    Ok(())
}
