use super::{selector, text_of, DAYS};
use crate::error::MenuError;
use crate::model::Food;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use scraper::Html;

const SOUP_PREFIX: &str = "Polévka:";

enum Expect {
    Name,
    Price(Food),
}

pub fn parse(document: &Html, today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let block = document
        .select(&selector(".xr_txt.xr_s0")?)
        .next()
        .ok_or_else(|| MenuError::parse("No menu text block"))?;
    Ok(parse_lines(&text_of(block), today))
}

/// Walks the weekly text: today's weekday line opens the day, the following
/// weekday (Monday to Friday only) closes it. Items come as a numbered name
/// line followed by a price line.
pub(crate) fn parse_lines(text: &str, today: NaiveDate) -> Vec<Food> {
    // Both patterns are literals known to compile.
    let name_line = Regex::new(r"^[0-9]+\.").expect("valid name pattern");
    let price_line = Regex::new(r"^[0-9]+\s*(,-|Kč)$").expect("valid price pattern");

    let day = today.weekday().num_days_from_monday() as usize;
    let next_day = (day < 4).then(|| DAYS[day + 1]);

    let mut foods = Vec::new();
    let mut capturing = false;
    let mut expect = Expect::Name;

    for line in text.lines().map(str::trim) {
        if line.starts_with(DAYS[day]) {
            capturing = true;
            continue;
        }
        if !capturing {
            continue;
        }
        if next_day.is_some_and(|next| line.starts_with(next)) {
            break;
        }

        if let Some(soup) = line.strip_prefix(SOUP_PREFIX) {
            foods.push(Food::soup(soup));
            continue;
        }

        expect = match expect {
            Expect::Name => match line.split_once('.') {
                Some((num, name)) if name_line.is_match(line) => {
                    Expect::Price(Food::lunch(name).with_num(num))
                }
                _ => Expect::Name,
            },
            Expect::Price(food) => {
                if price_line.is_match(line) {
                    let price = line.split(' ').next().unwrap_or(line);
                    foods.push(food.with_price(price));
                    Expect::Name
                } else {
                    Expect::Price(food)
                }
            }
        };
    }

    foods
}
