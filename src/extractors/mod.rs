use crate::config::OcrConfig;
use crate::error::MenuError;
use crate::fetcher::Fetcher;
use crate::model::Food;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use scraper::{ElementRef, Html, Selector};
use std::fmt;

mod arrows;
mod bistroin;
mod ellas;
mod globus;
mod jacks_burger;
mod lastrada;
mod poklad;
mod trebovicky_mlyn;
mod u_jarosu;
mod u_zlateho_lva;

pub use arrows::Arrows;
pub use poklad::Poklad;

/// Czech weekday names, Monday first.
pub const DAYS: [&str; 7] = [
    "Pondělí", "Úterý", "Středa", "Čtvrtek", "Pátek", "Sobota", "Neděle",
];

/// What the harness has to fetch before handing control to an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    NoFetch,
    RawText,
    ParsedMarkup,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputMode::NoFetch => "none",
            InputMode::RawText => "raw-text",
            InputMode::ParsedMarkup => "parsed-markup",
        };
        f.pad(label)
    }
}

/// Shared collaborators available to extractors that issue their own requests.
pub struct ParsingContext<'a> {
    pub fetcher: &'a Fetcher,
    pub ocr: &'a OcrConfig,
    pub today: NaiveDate,
}

pub type MarkupFn = fn(&Html, NaiveDate) -> Result<Vec<Food>, MenuError>;

/// Extractor that receives the registered page body verbatim.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, context: &ParsingContext<'_>, body: String)
        -> Result<Vec<Food>, MenuError>;
}

/// Extractor that fetches its own data and needs no page from the harness.
#[async_trait]
pub trait RemoteExtractor: Send + Sync {
    async fn extract(&self, context: &ParsingContext<'_>) -> Result<Vec<Food>, MenuError>;
}

pub enum Handler {
    Markup(MarkupFn),
    Text(Box<dyn TextExtractor>),
    Remote(Box<dyn RemoteExtractor>),
}

impl Handler {
    pub fn input_mode(&self) -> InputMode {
        match self {
            Handler::Markup(_) => InputMode::ParsedMarkup,
            Handler::Text(_) => InputMode::RawText,
            Handler::Remote(_) => InputMode::NoFetch,
        }
    }
}

/// A registered restaurant: identity, source page and extraction routine.
pub struct Restaurant {
    pub id: &'static str,
    pub title: &'static str,
    pub url: Option<String>,
    pub handler: Handler,
}

impl Restaurant {
    pub fn markup(id: &'static str, title: &'static str, url: impl Into<String>, parse: MarkupFn) -> Self {
        Self {
            id,
            title,
            url: Some(url.into()),
            handler: Handler::Markup(parse),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.handler.input_mode()
    }

    /// Whether `name` selects this restaurant, by id or display title.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.id.eq_ignore_ascii_case(name) || self.title.to_lowercase() == name.to_lowercase()
    }
}

/// All restaurants this crate knows how to read.
pub fn registry() -> Vec<Restaurant> {
    vec![
        Restaurant::markup(
            "bistroin",
            "Bistro IN",
            "https://bistroin.choiceqr.com/delivery",
            bistroin::parse,
        ),
        Restaurant::markup(
            "u_jarosu",
            "U jarosu",
            "https://www.ujarosu.cz/cz/denni-menu/",
            u_jarosu::parse,
        ),
        Restaurant::markup(
            "u_zlateho_lva",
            "U zlateho lva",
            "http://www.zlatylev.com/menu_zlaty_lev.html",
            u_zlateho_lva::parse,
        ),
        Restaurant::markup(
            "globus",
            "Globus",
            "https://www.globus.cz/ostrava/nabidka/restaurace.html",
            globus::parse,
        ),
        Restaurant::markup(
            "jacks_burger",
            "Jacks Burger",
            "https://www.zomato.com/cs/widgets/daily_menu.php?entity_id=16525845",
            jacks_burger::parse,
        ),
        Restaurant {
            id: "poklad",
            title: "Poklad",
            url: Some("https://dkpoklad.cz/restaurace/poledni-menu-4-8-6-8/".to_string()),
            handler: Handler::Text(Box::new(Poklad)),
        },
        Restaurant::markup(
            "trebovicky_mlyn",
            "Trebovicky mlyn",
            "https://www.trebovickymlyn.cz/",
            trebovicky_mlyn::parse,
        ),
        Restaurant {
            id: "arrows",
            title: "Arrows",
            url: Some("https://restaurace.arrows.cz/".to_string()),
            handler: Handler::Remote(Box::new(Arrows::default())),
        },
        Restaurant::markup(
            "lastrada",
            "La Strada",
            "http://www.lastrada.cz/cz/?tpl=plugins/DailyMenu/print&week_shift=",
            lastrada::parse,
        ),
        Restaurant::markup(
            "ellas",
            "Ellas",
            "https://www.restauraceellas.cz/",
            ellas::parse,
        ),
    ]
}

/// Localized name of the given date's weekday.
pub fn day_name(date: NaiveDate) -> &'static str {
    DAYS[date.weekday().num_days_from_monday() as usize]
}

pub(crate) fn selector(css: &str) -> Result<Selector, MenuError> {
    Selector::parse(css).map_err(|e| MenuError::parse(format!("Invalid selector '{}': {:?}", css, e)))
}

/// Concatenated text of an element, as the browser would render it without layout.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub(crate) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
