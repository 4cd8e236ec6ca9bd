//! Post-extraction cleanup shared by every restaurant.

use crate::model::{Food, Lunch, Price, Soup};
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

struct NamePatterns {
    weight: Regex,
    parenthesized: Regex,
    trailing_allergens: Regex,
    allergen_list: Regex,
    whitespace: Regex,
}

fn name_patterns() -> &'static NamePatterns {
    static PATTERNS: OnceLock<NamePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NamePatterns {
        weight: Regex::new(r"\d+\s*(?:g|ml|ks)\b\s*").expect("valid weight pattern"),
        parenthesized: Regex::new(r"\([^)]+\)").expect("valid parenthesis pattern"),
        trailing_allergens: Regex::new(r"(?:\s*[0-9]+\s*,)+\s*$").expect("valid allergen pattern"),
        allergen_list: Regex::new(r"A?[0-9]+(?:,[0-9]+)+,?").expect("valid allergen pattern"),
        whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
    })
}

fn is_edge_noise(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_ascii_digit() || c.is_whitespace() || c == '–'
}

/// Cleans up a dish name or ingredients text.
///
/// Names shouting in capitals are turned into sentence case, weights and
/// allergen codes are removed and leading/trailing punctuation, digits and
/// whitespace are trimmed.
pub fn fix_name(name: &str) -> String {
    let patterns = name_patterns();

    let total = name.chars().count();
    let uppers = name.chars().filter(|c| c.is_uppercase()).count();
    let mut name = if uppers * 2 > total {
        capitalize(&name.to_lowercase())
    } else {
        name.to_string()
    };

    for pattern in [
        &patterns.weight,
        &patterns.parenthesized,
        &patterns.trailing_allergens,
        &patterns.allergen_list,
    ] {
        name = pattern.replace_all(&name, "").into_owned();
    }

    let name = patterns.whitespace.replace_all(&name, " ");
    name.trim_matches(is_edge_noise).to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Coerces a textual price like `"89 Kč"` or `"125,-"` into whole crowns.
///
/// Unparseable text is kept as-is; empty text and zero amounts are dropped.
pub fn fix_price(price: Price) -> Option<Price> {
    match price {
        Price::Amount(0) => None,
        Price::Amount(amount) => Some(Price::Amount(amount)),
        Price::Text(text) => {
            let stripped = text.replace("Kč", "").replace(".00", "");
            let stripped = stripped.trim_matches(|c: char| {
                c.is_ascii_punctuation() || c.is_whitespace() || c == '–'
            });
            if stripped.is_empty() {
                return None;
            }
            match stripped.parse::<u32>() {
                Ok(0) => None,
                Ok(amount) => Some(Price::Amount(amount)),
                Err(e) => {
                    warn!("Keeping unparseable price '{}': {}", text, e);
                    Some(Price::Text(text))
                }
            }
        }
    }
}

/// Printed menu numbers above this are treated as misparsed.
const MAX_MENU_NUMBER: u32 = 999;

fn next_free(previous: u32, used: &HashSet<u32>) -> Option<u32> {
    let mut next = previous.checked_add(1)?;
    while used.contains(&next) {
        next = next.checked_add(1)?;
    }
    Some(next)
}

/// Normalizes everything one restaurant produced and splits it into soups and lunches.
///
/// Lunches keep a printed number when it parses, lies in `1..=999` and has not
/// been used yet; otherwise they get the number following the previous lunch.
pub fn normalize(foods: Vec<Food>) -> (Vec<Soup>, Vec<Lunch>) {
    let mut soups = Vec::new();
    let mut lunches = Vec::new();
    let mut used = HashSet::new();
    let mut previous = 0u32;

    for food in foods {
        match food {
            Food::Soup { name, price } => {
                let name = fix_name(&name);
                if name.is_empty() {
                    debug!("Dropping soup without a name");
                    continue;
                }
                soups.push(Soup {
                    name,
                    price: price.and_then(fix_price),
                });
            }
            Food::Lunch {
                num,
                name,
                price,
                ingredients,
            } => {
                let name = fix_name(&name);
                if name.is_empty() {
                    debug!("Dropping lunch without a name");
                    continue;
                }

                let declared = num.and_then(|num| match num.trim().parse::<u32>() {
                    Ok(0) => None,
                    Ok(value) if value > MAX_MENU_NUMBER => {
                        warn!("Menu number {} of '{}' is out of range", value, name);
                        None
                    }
                    Ok(value) if used.contains(&value) => {
                        warn!("Menu number {} of '{}' is already taken", value, name);
                        None
                    }
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!("Discarding menu number '{}' of '{}': {}", num, name, e);
                        None
                    }
                });
                let Some(num) = declared.or_else(|| next_free(previous, &used)) else {
                    warn!("No menu number left for '{}'", name);
                    continue;
                };
                used.insert(num);
                previous = num;

                lunches.push(Lunch {
                    num,
                    name,
                    price: price.and_then(fix_price),
                    ingredients: ingredients
                        .map(|text| fix_name(&text))
                        .filter(|text| !text.is_empty()),
                });
            }
        }
    }

    (soups, lunches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_name_all_caps() {
        assert_eq!(fix_name("KUŘECÍ ŘÍZEK"), "Kuřecí řízek");
    }

    #[test]
    fn test_fix_name_keeps_mixed_case() {
        assert_eq!(fix_name("Kuřecí řízek"), "Kuřecí řízek");
        assert_eq!(fix_name("Hovězí guláš, Karlovarský knedlík"), "Hovězí guláš, Karlovarský knedlík");
    }

    #[test]
    fn test_fix_name_strips_weights_and_allergens() {
        assert_eq!(fix_name("150g Kuřecí řízek (1,3,7)"), "Kuřecí řízek");
        assert_eq!(fix_name("2ks Palačinky s džemem 1,3,7"), "Palačinky s džemem");
        assert_eq!(fix_name("Svíčková na smetaně A1,3,7"), "Svíčková na smetaně");
        assert_eq!(fix_name(" 3. Smažený sýr, hranolky 7, 3,"), "Smažený sýr, hranolky");
    }

    #[test]
    fn test_fix_name_collapses_whitespace() {
        assert_eq!(fix_name("Vepřová\n   pečeně\t"), "Vepřová pečeně");
    }

    #[test]
    fn test_fix_name_trims_edges() {
        let name = fix_name(" – 1) Rizoto s houbami.\u{a0}");
        assert_eq!(name, "Rizoto s houbami");
    }

    #[test]
    fn test_fix_price() {
        assert_eq!(fix_price(Price::from("89 Kč")), Some(Price::Amount(89)));
        assert_eq!(fix_price(Price::from("125,-")), Some(Price::Amount(125)));
        assert_eq!(fix_price(Price::from("139.00")), Some(Price::Amount(139)));
        assert_eq!(fix_price(Price::Amount(99)), Some(Price::Amount(99)));
        assert_eq!(fix_price(Price::from("   ")), None);
        assert_eq!(fix_price(Price::Amount(0)), None);
    }

    #[test]
    fn test_fix_price_is_idempotent() {
        let once = fix_price(Price::from("119 Kč"));
        let twice = once.clone().and_then(fix_price);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fix_price_keeps_unparseable_text() {
        assert_eq!(
            fix_price(Price::from("dle váhy")),
            Some(Price::Text("dle váhy".to_string()))
        );
    }

    #[test]
    fn test_normalize_splits_and_numbers() {
        let foods = vec![
            Food::soup("Česnečka"),
            Food::lunch("Guláš"),
            Food::lunch("Řízek").with_num("x"),
            Food::lunch("Rizoto").with_num(" 7 "),
            Food::lunch("Buchtičky"),
        ];

        let (soups, lunches) = normalize(foods);
        assert_eq!(soups.len(), 1);
        let nums: Vec<u32> = lunches.iter().map(|l| l.num).collect();
        assert_eq!(nums, vec![1, 2, 7, 8]);
    }

    #[test]
    fn test_normalize_keeps_numbers_unique() {
        let foods = vec![
            Food::lunch("Guláš").with_num(1),
            Food::lunch("Řízek").with_num(1),
            Food::lunch("Rizoto"),
        ];

        let (_, lunches) = normalize(foods);
        let nums: Vec<u32> = lunches.iter().map(|l| l.num).collect();
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[test]
    fn test_normalize_rejects_huge_numbers() {
        let foods = vec![
            Food::lunch("Guláš").with_num("4294967295"),
            Food::lunch("Řízek"),
            Food::lunch("Rizoto").with_num(12),
        ];

        let (_, lunches) = normalize(foods);
        let nums: Vec<u32> = lunches.iter().map(|l| l.num).collect();
        assert_eq!(nums, vec![1, 2, 12]);
    }

    #[test]
    fn test_next_free_stops_at_the_top() {
        let used = HashSet::from([u32::MAX]);
        assert_eq!(next_free(u32::MAX - 1, &used), None);
        assert_eq!(next_free(4, &HashSet::from([5, 6])), Some(7));
    }

    #[test]
    fn test_normalize_drops_empty_names() {
        let foods = vec![Food::soup(" 250 ml "), Food::lunch("(1,3)"), Food::lunch("Čočka")];

        let (soups, lunches) = normalize(foods);
        assert!(soups.is_empty());
        assert_eq!(lunches.len(), 1);
        assert_eq!(lunches[0].num, 1);
        assert_eq!(lunches[0].name, "Čočka");
    }

    #[test]
    fn test_normalize_cleans_ingredients() {
        let foods = vec![Food::lunch("1. Burger").with_ingredients("hovězí, slanina (1,7)")];

        let (_, lunches) = normalize(foods);
        assert_eq!(lunches[0].ingredients.as_deref(), Some("hovězí, slanina"));
        assert_eq!(lunches[0].name, "Burger");
    }
}
