use super::{day_name, selector, text_of};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use html_escape::decode_html_entities;
use regex::Regex;
use scraper::Html;

/// Each weekday is its own module block headed by the day name. The first
/// paragraph is the soup, every following paragraph is
/// `num. name<br>ingredients<br>price`.
pub fn parse(document: &Html, today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let today = day_name(today);
    let line_break = Regex::new(r"(?i)<br\s*/?>").map_err(|e| MenuError::parse(e.to_string()))?;
    let tag = Regex::new(r"<[^>]*>").map_err(|e| MenuError::parse(e.to_string()))?;
    let heading_selector = selector("h3")?;
    let paragraph_selector = selector("p")?;

    let plain = |html: &str| decode_html_entities(&tag.replace_all(html, "")).into_owned();

    let mut foods = Vec::new();
    for block in document.select(&selector(".moduletable .custom")?) {
        let is_today = block
            .select(&heading_selector)
            .next()
            .is_some_and(|heading| text_of(heading).trim() == today);
        if !is_today {
            continue;
        }

        let mut paragraphs = block.select(&paragraph_selector);
        let Some(soup) = paragraphs.next() else {
            continue;
        };
        foods.push(Food::soup(text_of(soup)));

        for paragraph in paragraphs {
            let html = paragraph.inner_html();
            let mut parts = line_break.split(&html).map(|part| plain(part));

            let Some(title) = parts.next() else {
                continue;
            };
            let mut lunch = match title.split_once('.') {
                Some((num, name)) => Food::lunch(name).with_num(num),
                None => Food::lunch(title.as_str()),
            };
            if let Some(ingredients) = parts.next() {
                lunch = lunch.with_ingredients(ingredients);
            }
            if let Some(price) = parts.next() {
                lunch = lunch.with_price(price);
            }
            foods.push(lunch);
        }
    }

    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_todays_block() {
        let document = Html::parse_document(
            r#"<div class="moduletable">
                <div class="custom">
                    <h3>Pondělí</h3>
                    <p>Čočková polévka</p>
                    <p>1. Gyros s hranolky<br>vepřové maso, tzatziki &amp; cibule<br>165 Kč</p>
                </div>
                <div class="custom">
                    <h3> Úterý </h3>
                    <p>Fazolová polévka</p>
                    <p>1. Musaka<br/>lilek, mleté maso<br />175 Kč</p>
                    <p>2. <strong>Souvlaki</strong><br>kuřecí špízy<br>169 Kč</p>
                    <p>Řecký salát</p>
                </div>
            </div>"#,
        );

        let tuesday = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let foods = parse(&document, tuesday).unwrap();
        assert_eq!(
            foods,
            vec![
                Food::soup("Fazolová polévka"),
                Food::lunch(" Musaka")
                    .with_num("1")
                    .with_ingredients("lilek, mleté maso")
                    .with_price("175 Kč"),
                Food::lunch(" Souvlaki")
                    .with_num("2")
                    .with_ingredients("kuřecí špízy")
                    .with_price("169 Kč"),
                Food::lunch("Řecký salát"),
            ]
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        let document = Html::parse_document(
            r#"<div class="moduletable"><div class="custom">
                <h3>Pondělí</h3>
                <p>Polévka</p>
                <p>1. Gyros<br>maso &amp; tzatziki<br>165 Kč</p>
            </div></div>"#,
        );

        let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let foods = parse(&document, monday).unwrap();
        match &foods[1] {
            Food::Lunch { ingredients, .. } => {
                assert_eq!(ingredients.as_deref(), Some("maso & tzatziki"))
            }
            other => panic!("Expected lunch, got {:?}", other),
        }
    }
}
