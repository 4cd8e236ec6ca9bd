use super::{day_name, selector, text_of, DAYS};
use crate::error::MenuError;
use crate::model::Food;
use chrono::NaiveDate;
use scraper::{ElementRef, Html};

fn is_header_noise(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\t' | '\u{a0}' | ':')
}

/// Reads today's block out of the weekly table.
///
/// A row whose first cell is a weekday opens a day and carries its soup. Item
/// rows are numbered 1, 2, 3, ...; a row that does not continue that sequence
/// is the next line of the previous item's name.
pub fn parse(document: &Html, today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let today = day_name(today);
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let mut foods = Vec::new();
    let mut current: Option<(u32, String, Option<String>)> = None;
    let mut counter = 0;
    let mut capturing = false;

    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let Some(first) = cells.first() else {
            continue;
        };
        let cell_text = |i: usize| cells.get(i).map(|cell| text_of(*cell));

        let first_text = text_of(*first);
        let day = first_text.trim_matches(is_header_noise);
        if DAYS.contains(&day) {
            if capturing {
                break;
            }
            if day == today {
                capturing = true;
                foods.push(Food::soup(cell_text(1).unwrap_or_default()));
            }
            continue;
        }
        if !capturing {
            continue;
        }

        if cells.iter().all(|cell| text_of(*cell).trim().is_empty()) {
            break;
        }

        let num = first_text
            .trim()
            .split('.')
            .next()
            .and_then(|num| num.trim().parse::<u32>().ok());
        let name = cell_text(1).unwrap_or_default();

        if num == Some(counter + 1) {
            counter += 1;
            if let Some(item) = current.take() {
                foods.push(lunch(item));
            }
            current = Some((counter, name, cell_text(2)));
        } else if let Some((_, previous, _)) = current.as_mut() {
            previous.push(' ');
            previous.push_str(&name);
        }
    }

    if let Some(item) = current {
        foods.push(lunch(item));
    }

    Ok(foods)
}

fn lunch((num, name, price): (u32, String, Option<String>)) -> Food {
    let food = Food::lunch(name).with_num(num);
    match price {
        Some(price) => food.with_price(price),
        None => food,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Price;

    const WEEK: &str = r#"
        <table>
            <tr><td>Pondělí:</td><td>Hovězí vývar</td></tr>
            <tr><td>1.</td><td>Svíčková</td><td>135 Kč</td></tr>
            <tr><td>Úterý:</td><td>Česnečka</td></tr>
            <tr><td>1.</td><td>Guláš</td><td>129 Kč</td></tr>
            <tr><td>Středa:</td><td>Kulajda</td></tr>
            <tr><td>1.</td><td>Kuřecí řízek,</td><td>139 Kč</td></tr>
            <tr><td></td><td>bramborový salát</td></tr>
            <tr><td>2.</td><td>Rizoto</td><td>125 Kč</td></tr>
            <tr><td>3.</td><td>Smažený sýr</td></tr>
            <tr><td>Čtvrtek:</td><td>Frankfurtská</td></tr>
            <tr><td>1.</td><td>Buchtičky</td><td>119 Kč</td></tr>
            <tr><td>Pátek:</td><td>Rybí</td></tr>
        </table>
    "#;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn test_only_todays_rows_are_read() {
        let document = Html::parse_document(WEEK);
        let foods = parse(&document, wednesday()).unwrap();

        assert_eq!(foods.len(), 4);
        assert_eq!(foods[0], Food::soup("Kulajda"));
        assert_eq!(
            foods[1],
            Food::lunch("Kuřecí řízek, bramborový salát")
                .with_num(1)
                .with_price("139 Kč")
        );
        assert_eq!(foods[2], Food::lunch("Rizoto").with_num(2).with_price("125 Kč"));
        match &foods[3] {
            Food::Lunch { num, name, price, .. } => {
                assert_eq!(num.as_deref(), Some("3"));
                assert_eq!(name, "Smažený sýr");
                assert_eq!(*price, None::<Price>);
            }
            other => panic!("Expected lunch, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_row_ends_the_day() {
        let document = Html::parse_document(
            r#"<table>
                <tr><td>Středa</td><td>Kulajda</td></tr>
                <tr><td>1.</td><td>Rizoto</td><td>125 Kč</td></tr>
                <tr><td> </td><td>&nbsp;</td></tr>
                <tr><td>2.</td><td>Reklama</td><td>1 Kč</td></tr>
            </table>"#,
        );

        let foods = parse(&document, wednesday()).unwrap();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[1].name(), "Rizoto");
    }

    #[test]
    fn test_weekend_yields_nothing() {
        let document = Html::parse_document(WEEK);
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
        assert!(parse(&document, saturday).unwrap().is_empty());
    }
}
