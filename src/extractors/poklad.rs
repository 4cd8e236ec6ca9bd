use super::{ParsingContext, TextExtractor};
use crate::error::MenuError;
use crate::model::Food;
use crate::ocr;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::debug;
use regex::Regex;

/// Item lines shorter than this are OCR debris rather than dishes.
const MIN_NAME_LEN: usize = 8;

/// The weekly menu is published only as an image; it is OCR'd and read line by line.
pub struct Poklad;

#[async_trait]
impl TextExtractor for Poklad {
    async fn extract(
        &self,
        context: &ParsingContext<'_>,
        body: String,
    ) -> Result<Vec<Food>, MenuError> {
        let image_url = widest_image(&body)?;
        debug!("Poklad menu image: {}", image_url);

        let image = context.fetcher.fetch_bytes(&image_url).await?;
        let text = ocr::ocr_image_data(context.ocr, &image).await?;

        parse_text(&text, context.today)
    }
}

/// Picks the widest candidate from the first `srcset` attribute on the page.
pub(crate) fn widest_image(html: &str) -> Result<String, MenuError> {
    let srcset = Regex::new(r#"srcset="([^"]+)""#).map_err(|e| MenuError::parse(e.to_string()))?;
    let candidates = srcset
        .captures(html)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| MenuError::parse("No srcset with menu images"))?;

    candidates
        .as_str()
        .split(',')
        .filter_map(|candidate| {
            let mut parts = candidate.split_whitespace();
            let url = parts.next()?;
            let width = parts.next()?.trim_end_matches('w').parse::<u32>().ok()?;
            Some((width, url))
        })
        .max_by_key(|(width, _)| *width)
        .map(|(_, url)| url.to_string())
        .ok_or_else(|| MenuError::parse("No image width in srcset"))
}

/// Reads OCR output of the weekly menu.
///
/// Lines before the first date header apply to every day. A `D.M.YYYY` header
/// opens a day; the line right after today's header lists its soups separated
/// by `/`. Numbered lines carry `num weight name price`.
pub(crate) fn parse_text(text: &str, today: NaiveDate) -> Result<Vec<Food>, MenuError> {
    let invalid = |e: regex::Error| MenuError::parse(e.to_string());
    let date_line = Regex::new(r"^([0-9]{1,2})\s*\.*\s*([0-9]{1,2})\s*\.*\s*([0-9]{4})").map_err(invalid)?;
    let item_line = Regex::new(r"^[0-9]+").map_err(invalid)?;
    let item = Regex::new(
        r"^(?P<num>[0-9]+)\s*\.?\s*[0-9]+\s*(?:g|ks|)\s*[|—]?\s*(?P<name>.+).*?(?P<price>[12][0-9]{2})",
    )
    .map_err(invalid)?;

    let mut foods = Vec::new();
    let mut in_common = true;
    let mut in_day = false;
    let mut expect_soups = false;

    for line in text.lines() {
        if let Some(captures) = date_line.captures(line) {
            let number = |i: usize| captures[i].parse::<u32>().ok();
            let date = match (number(1), number(2), number(3)) {
                (Some(day), Some(month), Some(year)) => {
                    NaiveDate::from_ymd_opt(year as i32, month, day)
                }
                _ => None,
            };
            in_day = date.is_some_and(|date| date.weekday() == today.weekday());
            expect_soups = in_day;
            in_common = false;
        } else if item_line.is_match(line) {
            if !(in_common || in_day) {
                continue;
            }
            let lunch = match item.captures(line) {
                Some(captures) => Food::lunch(&captures["name"])
                    .with_num(&captures["num"])
                    .with_price(&captures["price"]),
                None => Food::lunch(line),
            };
            if lunch.name().chars().count() > MIN_NAME_LEN {
                foods.push(lunch);
            }
        } else if expect_soups {
            expect_soups = false;
            foods.extend(line.split('/').map(Food::soup));
        }
    }

    Ok(foods)
}
