use super::{selector, text_of};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use scraper::Html;

pub fn parse(document: &Html, _today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    // No soup heading means no daily menu is published today.
    let Some(soup) = document.select(&selector(".soup h2")?).next() else {
        return Ok(Vec::new());
    };
    let mut foods = vec![Food::soup(text_of(soup))];

    let carousel = document
        .select(&selector(".owl-carousel")?)
        .next()
        .ok_or_else(|| MenuError::parse("No menu carousel"))?;
    let title_selector = selector("h2")?;
    let ingredients_selector = selector("h2 + div")?;
    let price_selector = selector("span")?;

    for card in carousel.select(&selector(".menu-post")?) {
        let Some(title) = card.select(&title_selector).next() else {
            continue;
        };
        let title = text_of(title);
        let Some((num, name)) = title.split_once(')') else {
            continue;
        };

        let mut lunch = Food::lunch(name).with_num(num);
        if let Some(ingredients) = card.select(&ingredients_selector).next() {
            lunch = lunch.with_ingredients(text_of(ingredients));
        }
        if let Some(price) = card.select(&price_selector).next() {
            let price = text_of(price);
            lunch = lunch.with_price(price.split(',').next().unwrap_or_default());
        }
        foods.push(lunch);
    }

    Ok(foods)
}
