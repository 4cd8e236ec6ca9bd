use super::{selector, text_of};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;
use serde::Deserialize;

/// Lunch menu items are listed with a small discount against their delivery price.
const MENU_DISCOUNT: u32 = 5;

#[derive(Deserialize)]
struct NextData {
    props: Props,
}

#[derive(Deserialize)]
struct Props {
    app: App,
}

#[derive(Deserialize)]
struct App {
    menu: Vec<MenuEntry>,
}

#[derive(Deserialize)]
struct MenuEntry {
    name: String,
    #[serde(default)]
    description: Option<String>,
    /// In hundredths of a crown
    #[serde(default)]
    price: u32,
}

pub fn parse(document: &Html, _today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let script = document
        .select(&selector("#__NEXT_DATA__")?)
        .next()
        .ok_or_else(|| MenuError::parse("No __NEXT_DATA__ payload"))?;
    let data: NextData = serde_json::from_str(&text_of(script))?;

    let allergens = Regex::new(r"Al\. \(.+").map_err(|e| MenuError::parse(e.to_string()))?;

    let mut foods = Vec::new();
    for entry in data.props.app.menu {
        let price = entry.price / 100;

        if entry.name.contains("Polévka") {
            let name = entry
                .name
                .split_once(':')
                .map_or(entry.name.as_str(), |(_, name)| name);
            foods.push(Food::soup(name).with_price(price));
        } else if let Some((num, name)) = entry.name.split_once('.') {
            let ingredients = entry
                .description
                .as_deref()
                .map(|description| allergens.replace(description, "").into_owned())
                .unwrap_or_default();
            foods.push(
                Food::lunch(name)
                    .with_num(num)
                    .with_price(price.saturating_sub(MENU_DISCOUNT))
                    .with_ingredients(ingredients),
            );
        }
    }

    Ok(foods)
}
