use super::{day_name, has_class, selector, text_of};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use scraper::Html;

const WHOLE_WEEK: &str = "Menu na celý týden";

/// `tr.day` rows open a section; only today's and the whole-week section are read.
pub fn parse(document: &Html, today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let today = day_name(today);
    let cell_selector = selector("td")?;
    let price_selector = selector(".price")?;

    let mut foods = Vec::new();
    let mut capturing = false;

    for row in document.select(&selector("tr")?) {
        if has_class(row, "day") {
            let text = text_of(row);
            capturing = text.contains(today) || text.contains(WHOLE_WEEK);
        } else if capturing && has_class(row, "highlight") {
            let Some(name) = row.select(&cell_selector).next() else {
                continue;
            };
            let lunch = Food::lunch(text_of(name));
            foods.push(match row.select(&price_selector).next() {
                Some(price) => lunch.with_price(text_of(price)),
                None => lunch,
            });
        }
    }

    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_today_and_whole_week() {
        let document = Html::parse_document(
            r#"<table>
                <tr class="day"><td>Pondělí 13. 5.</td></tr>
                <tr class="highlight"><td>Penne all'arrabbiata</td><td class="price">159 Kč</td></tr>
                <tr class="day"><td>Úterý 14. 5.</td></tr>
                <tr class="highlight"><td>Risotto ai funghi</td><td class="price">169 Kč</td></tr>
                <tr><td>Alergeny: 1, 7</td></tr>
                <tr class="day"><td>Menu na celý týden</td></tr>
                <tr class="highlight"><td>Pizza Margherita</td><td class="price">149 Kč</td></tr>
            </table>"#,
        );

        let tuesday = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let foods = parse(&document, tuesday).unwrap();
        assert_eq!(
            foods,
            vec![
                Food::lunch("Risotto ai funghi").with_price("169 Kč"),
                Food::lunch("Pizza Margherita").with_price("149 Kč"),
            ]
        );
    }
}
