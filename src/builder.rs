use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::{
    config::MenuConfig,
    extractors::{registry, Restaurant},
    fetcher::Fetcher,
    harness, MenuError, RestaurantMenu,
};

/// Builder for configuring a menu collection run
#[derive(Default)]
pub struct MenuGathererBuilder {
    only: Vec<String>,
    date: Option<NaiveDate>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    config: Option<MenuConfig>,
    restaurants: Option<Vec<Restaurant>>,
}

impl MenuGathererBuilder {
    /// Restrict the run to the named restaurants (ids or display titles)
    ///
    /// # Example
    /// ```
    /// use lunch_menus::MenuGatherer;
    ///
    /// let builder = MenuGatherer::builder()
    ///     .only(["arrows", "La Strada"]);
    /// ```
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = names.into_iter().map(Into::into).collect();
        self
    }

    /// Collect the menu of a given day instead of today
    ///
    /// Only affects how extractors pick a day out of weekly menus; the pages
    /// fetched are still the current ones.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use lunch_menus::MenuGatherer;
    /// use std::time::Duration;
    ///
    /// let builder = MenuGatherer::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Override the browser user agent sent to the restaurant websites
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use this configuration instead of loading `config.toml` and `LUNCH__*` variables
    pub fn config(mut self, config: MenuConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the built-in restaurant registry
    pub fn restaurants(mut self, restaurants: Vec<Restaurant>) -> Self {
        self.restaurants = Some(restaurants);
        self
    }

    /// Resolve configuration and build the shared HTTP client
    ///
    /// # Errors
    /// Returns `MenuError` if:
    /// - The configuration cannot be loaded
    /// - The HTTP client cannot be constructed
    /// - A zero timeout was requested
    pub fn build(self) -> Result<MenuGatherer, MenuError> {
        let mut config = match self.config {
            Some(config) => config,
            None => MenuConfig::load()?,
        };

        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(MenuError::BuilderError(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        if !self.only.is_empty() {
            config.restaurants = self.only;
        }

        let timeout = self.timeout.unwrap_or_else(|| config.timeout());
        let fetcher = Fetcher::with_timeout(&config, timeout)?;

        Ok(MenuGatherer {
            fetcher,
            timeout,
            restaurants: self.restaurants.unwrap_or_else(registry),
            date: self.date,
            config,
        })
    }
}

/// A configured collection run, reusable across invocations
pub struct MenuGatherer {
    fetcher: Fetcher,
    timeout: Duration,
    config: MenuConfig,
    restaurants: Vec<Restaurant>,
    date: Option<NaiveDate>,
}

impl MenuGatherer {
    /// Creates a new builder for collecting menus
    ///
    /// # Example
    /// ```
    /// use lunch_menus::MenuGatherer;
    ///
    /// let builder = MenuGatherer::builder();
    /// ```
    pub fn builder() -> MenuGathererBuilder {
        MenuGathererBuilder::default()
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Per-request timeout, as given to the builder or taken from configuration
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Collect every selected restaurant, one record per restaurant
    ///
    /// # Example
    /// ```no_run
    /// # use lunch_menus::MenuGatherer;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let menus = MenuGatherer::builder()
    ///     .only(["arrows"])
    ///     .build()?
    ///     .gather()
    ///     .await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn gather(&self) -> Vec<RestaurantMenu> {
        let today = self.date.unwrap_or_else(|| Local::now().date_naive());
        harness::gather(
            &self.fetcher,
            &self.config.ocr,
            &self.restaurants,
            Some(self.config.restaurants.as_slice()),
            today,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_explicit_config() {
        let gatherer = MenuGatherer::builder()
            .config(MenuConfig::default())
            .only(["globus"])
            .user_agent("test-agent")
            .build()
            .unwrap();

        assert_eq!(gatherer.config.restaurants, vec!["globus".to_string()]);
        assert_eq!(gatherer.config.user_agent, "test-agent");
        assert_eq!(gatherer.restaurants().len(), registry().len());
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let gatherer = MenuGatherer::builder()
            .config(MenuConfig::default())
            .timeout(Duration::from_millis(1500))
            .build()
            .unwrap();
        assert_eq!(gatherer.timeout(), Duration::from_millis(1500));

        let gatherer = MenuGatherer::builder()
            .config(MenuConfig {
                timeout: 7,
                ..MenuConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(gatherer.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = MenuGatherer::builder()
            .config(MenuConfig::default())
            .timeout(Duration::ZERO)
            .build();

        assert!(matches!(result, Err(MenuError::BuilderError(_))));
    }
}
