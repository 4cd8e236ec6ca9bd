pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod harness;
pub mod model;
pub mod normalize;
pub mod ocr;

// Re-export commonly used types
pub use builder::{MenuGatherer, MenuGathererBuilder};
pub use config::MenuConfig;
pub use error::MenuError;
pub use extractors::{registry, InputMode, Restaurant};
pub use model::{Food, Lunch, Outcome, Price, RestaurantMenu, Soup};

/// Collect today's menus, optionally restricted to the named restaurants
///
/// Configuration comes from `config.toml` and `LUNCH__*` environment variables.
/// A failing restaurant never fails the call: its record carries the error instead.
///
/// # Arguments
/// * `allowed` - Restaurant ids or titles to run; `None` or empty runs the configured default
///
/// # Errors
/// Returns an error only if configuration cannot be loaded or the HTTP client cannot be built
pub async fn gather_restaurants(
    allowed: Option<&[String]>,
) -> Result<Vec<RestaurantMenu>, MenuError> {
    let mut builder = MenuGatherer::builder();
    if let Some(allowed) = allowed {
        builder = builder.only(allowed.iter().cloned());
    }
    Ok(builder.build()?.gather().await)
}
