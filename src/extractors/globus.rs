use super::{selector, text_of};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use scraper::{ElementRef, Html};

/// Anything pricier than this is a main course; cheaper rows are soups.
const SOUP_PRICE_LIMIT: u32 = 50;

pub fn parse(document: &Html, _today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let table = document
        .select(&selector(".restaurant__menu-food-table")?)
        .next()
        .ok_or_else(|| MenuError::parse("No menu table"))?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let mut foods = Vec::new();
    for row in table.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let Some(name) = cells.get(1).map(|cell| text_of(*cell)) else {
            continue;
        };
        let price = cells
            .get(2)
            .map(|cell| text_of(*cell).replace(",–", "").trim().to_string());

        let amount = price.as_deref().and_then(|p| p.parse::<u32>().ok());
        let food = match amount {
            Some(amount) if amount > SOUP_PRICE_LIMIT => Food::lunch(name),
            _ => Food::soup(name),
        };
        foods.push(match price {
            Some(price) => food.with_price(price),
            None => food,
        });
    }

    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_decides_soup_or_lunch() {
        let document = Html::parse_document(
            r#"<table class="restaurant__menu-food-table">
                <tr><td>0,25 l</td><td>Hovězí vývar s nudlemi</td><td>29,–</td></tr>
                <tr><td>150 g</td><td>Kuřecí řízek, bramborová kaše</td><td>119,–</td></tr>
                <tr><td>350 g</td><td>Zeleninový salát</td></tr>
                <tr><td colspan="3">Ceny jsou uvedeny včetně DPH</td></tr>
            </table>"#,
        );

        let foods = parse(&document, NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()).unwrap();
        assert_eq!(
            foods,
            vec![
                Food::soup("Hovězí vývar s nudlemi").with_price("29"),
                Food::lunch("Kuřecí řízek, bramborová kaše").with_price("119"),
                Food::soup("Zeleninový salát"),
            ]
        );
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let document = Html::parse_document("<p>Restaurace je uzavřena</p>");
        assert!(parse(&document, NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()).is_err());
    }
}
