use serde::{Serialize, Serializer};
use std::time::Duration;

/// Price of a dish in whole crowns, or the scraped text when it could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Price {
    Amount(u32),
    Text(String),
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Price::Amount(amount)
    }
}

impl From<&str> for Price {
    fn from(text: &str) -> Self {
        Price::Text(text.to_string())
    }
}

impl From<String> for Price {
    fn from(text: String) -> Self {
        Price::Text(text)
    }
}

/// A dish as produced by an extractor, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Food {
    Soup {
        name: String,
        price: Option<Price>,
    },
    Lunch {
        /// Number as printed on the menu; may be missing or garbled
        num: Option<String>,
        name: String,
        price: Option<Price>,
        ingredients: Option<String>,
    },
}

impl Food {
    pub fn soup(name: impl Into<String>) -> Self {
        Food::Soup {
            name: name.into(),
            price: None,
        }
    }

    pub fn lunch(name: impl Into<String>) -> Self {
        Food::Lunch {
            num: None,
            name: name.into(),
            price: None,
            ingredients: None,
        }
    }

    pub fn with_price(mut self, value: impl Into<Price>) -> Self {
        match &mut self {
            Food::Soup { price, .. } | Food::Lunch { price, .. } => *price = Some(value.into()),
        }
        self
    }

    /// Sets the printed menu number. Ignored for soups.
    pub fn with_num(mut self, value: impl ToString) -> Self {
        if let Food::Lunch { num, .. } = &mut self {
            *num = Some(value.to_string());
        }
        self
    }

    /// Sets the ingredients/allergen text. Ignored for soups.
    pub fn with_ingredients(mut self, value: impl Into<String>) -> Self {
        if let Food::Lunch { ingredients, .. } = &mut self {
            *ingredients = Some(value.into());
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Food::Soup { name, .. } | Food::Lunch { name, .. } => name,
        }
    }

    pub fn is_soup(&self) -> bool {
        matches!(self, Food::Soup { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Soup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lunch {
    pub num: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

/// Either the normalized menu or the reason collecting it failed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Menu { soups: Vec<Soup>, lunches: Vec<Lunch> },
    Failed { error: String },
}

/// Result of collecting one restaurant.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantMenu {
    pub name: String,
    pub url: Option<String>,
    #[serde(flatten)]
    pub outcome: Outcome,
    #[serde(serialize_with = "serialize_seconds")]
    pub elapsed: Duration,
}

impl RestaurantMenu {
    pub fn soups(&self) -> &[Soup] {
        match &self.outcome {
            Outcome::Menu { soups, .. } => soups,
            Outcome::Failed { .. } => &[],
        }
    }

    pub fn lunches(&self) -> &[Lunch] {
        match &self.outcome {
            Outcome::Menu { lunches, .. } => lunches,
            Outcome::Failed { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Menu { .. } => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}

fn serialize_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}
