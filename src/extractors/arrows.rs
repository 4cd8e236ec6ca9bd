use super::{ParsingContext, RemoteExtractor};
use crate::error::MenuError;
use crate::model::Food;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Deserialize;

const ENDPOINTS: [&str; 2] = ["GetSoupsByActualWeekNumber", "GetMenusByActualWeekNumber"];

/// Canteen with a JSON API keyed by ISO week number.
pub struct Arrows {
    base_url: String,
}

impl Arrows {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Arrows {
    fn default() -> Self {
        Self::new("https://restaurace.arrows.cz")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuItem {
    valid_date_time: String,
    #[serde(default)]
    deleted_date: Option<String>,
    #[serde(default)]
    is_soup: bool,
    text: String,
    #[serde(default)]
    menu_item_order: u32,
    #[serde(default)]
    price: Option<f64>,
}

impl MenuItem {
    fn valid_on(&self, today: NaiveDate) -> bool {
        self.deleted_date.is_none()
            && self
                .valid_date_time
                .get(..10)
                .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
                == Some(today)
    }

    fn into_food(self) -> Food {
        if self.is_soup {
            return Food::soup(self.text);
        }
        let lunch = Food::lunch(self.text).with_num(self.menu_item_order + 1);
        match self.price {
            Some(price) if price > 0.0 => lunch.with_price(price as u32),
            _ => lunch,
        }
    }
}

#[async_trait]
impl RemoteExtractor for Arrows {
    async fn extract(&self, context: &ParsingContext<'_>) -> Result<Vec<Food>, MenuError> {
        let week = context.today.iso_week().week();

        let mut foods = Vec::new();
        for endpoint in ENDPOINTS {
            let url = format!("{}/api/menu/{}/{}", self.base_url, endpoint, week);
            let items: Vec<MenuItem> = context.fetcher.fetch_json(&url).await?;
            debug!("{} returned {} items", endpoint, items.len());

            foods.extend(
                items
                    .into_iter()
                    .filter(|item| item.valid_on(context.today))
                    .map(MenuItem::into_food),
            );
        }

        Ok(foods)
    }
}
