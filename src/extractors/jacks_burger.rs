use super::{has_class, selector, text_of};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;

/// Reads the daily menu widget.
///
/// The soup has no number of its own: it is the last unnumbered line before the
/// first numbered dish. A `line-wider` separator ends today's menu.
pub fn parse(document: &Html, _today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let numbered = Regex::new(r"^[0-9]+\..+").map_err(|e| MenuError::parse(e.to_string()))?;
    let name_selector = selector(".item-name")?;
    let price_selector = selector(".item-price")?;

    let mut foods = Vec::new();
    let mut started = false;
    let mut previous_line = String::new();

    for row in document.select(&selector(".main-body > div")?) {
        if has_class(row, "line-wider") {
            break;
        }
        let Some(name) = row.select(&name_selector).next() else {
            continue;
        };
        let name = text_of(name).trim().to_string();

        if !numbered.is_match(&name) {
            previous_line = name;
            continue;
        }

        if !started {
            foods.push(Food::soup(previous_line.as_str()));
            started = true;
        }

        let num = name.split('.').next().unwrap_or_default().to_string();
        if let Some(price) = row.select(&price_selector).next() {
            let price = text_of(price).trim().to_string();
            foods.push(Food::lunch(name).with_num(num).with_price(price));
        }
    }

    Ok(foods)
}
