//! Runs every selected restaurant concurrently and isolates their failures.

use crate::config::OcrConfig;
use crate::error::{describe, MenuError};
use crate::extractors::{Handler, MarkupFn, ParsingContext, Restaurant};
use crate::fetcher::Fetcher;
use crate::model::{Food, Lunch, Outcome, RestaurantMenu, Soup};
use crate::normalize::normalize;
use chrono::NaiveDate;
use futures::future::join_all;
use futures::FutureExt;
use log::{error, info, warn};
use scraper::Html;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// Picks the restaurants named in `allowed` (by id or title); none or an empty
/// selection means all of them.
pub fn select<'a>(restaurants: &'a [Restaurant], allowed: Option<&[String]>) -> Vec<&'a Restaurant> {
    let allowed = match allowed {
        Some(allowed) if !allowed.is_empty() => allowed,
        _ => return restaurants.iter().collect(),
    };

    for name in allowed {
        if !restaurants.iter().any(|r| r.matches(name)) {
            warn!("No restaurant named '{}'", name);
        }
    }

    restaurants
        .iter()
        .filter(|r| allowed.iter().any(|name| r.matches(name)))
        .collect()
}

/// Collects menus of the selected restaurants.
///
/// Every selected restaurant gets exactly one record back, either its menu or
/// the error that stopped it. One restaurant failing (or panicking) never
/// affects the others.
pub async fn gather(
    fetcher: &Fetcher,
    ocr: &OcrConfig,
    restaurants: &[Restaurant],
    allowed: Option<&[String]>,
    today: NaiveDate,
) -> Vec<RestaurantMenu> {
    let context = ParsingContext {
        fetcher,
        ocr,
        today,
    };
    let selected = select(restaurants, allowed);
    info!("Collecting {} restaurants for {}", selected.len(), today);

    join_all(selected.into_iter().map(|r| collect(&context, r))).await
}

async fn collect(context: &ParsingContext<'_>, restaurant: &Restaurant) -> RestaurantMenu {
    let start = Instant::now();

    let result = AssertUnwindSafe(extract(context, restaurant))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(panic_message(panic)));

    let elapsed = start.elapsed();
    let outcome = match result {
        Ok((soups, lunches)) => {
            info!(
                "{}: {} soups, {} lunches in {:?}",
                restaurant.title,
                soups.len(),
                lunches.len(),
                elapsed
            );
            Outcome::Menu { soups, lunches }
        }
        Err(error) => {
            error!("{} failed after {:?}: {}", restaurant.title, elapsed, error);
            Outcome::Failed { error }
        }
    };

    RestaurantMenu {
        name: restaurant.title.to_string(),
        url: restaurant.url.clone(),
        outcome,
        elapsed,
    }
}

/// Everything that can fail for one restaurant, normalization included.
async fn extract(
    context: &ParsingContext<'_>,
    restaurant: &Restaurant,
) -> Result<(Vec<Soup>, Vec<Lunch>), String> {
    let foods = fetch_and_extract(context, restaurant)
        .await
        .map_err(|e| describe(&e))?;
    Ok(normalize(foods))
}

async fn fetch_and_extract(
    context: &ParsingContext<'_>,
    restaurant: &Restaurant,
) -> Result<Vec<Food>, MenuError> {
    match &restaurant.handler {
        Handler::Remote(extractor) => extractor.extract(context).await,
        Handler::Text(extractor) => {
            let body = fetch_page(context, restaurant).await?;
            extractor.extract(context, body).await
        }
        Handler::Markup(parse) => {
            let body = fetch_page(context, restaurant).await?;
            parse_markup(*parse, &body, context.today)
        }
    }
}

async fn fetch_page(context: &ParsingContext<'_>, restaurant: &Restaurant) -> Result<String, MenuError> {
    let url = restaurant
        .url
        .as_deref()
        .ok_or_else(|| MenuError::MissingUrl(restaurant.title.to_string()))?;
    context.fetcher.fetch_text(url).await
}

// The DOM never lives across an await point.
fn parse_markup(parse: MarkupFn, body: &str, today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let document = Html::parse_document(body);
    parse(&document, today)
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("Extractor panicked: {}", message)
}
