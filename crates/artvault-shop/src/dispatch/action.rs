//! Delegated UI events and their classification.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::contact::ContactForm;
use crate::ids::ProductId;

/// An event as it arrives from the page: a tag plus string data attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAction {
    pub tag: String,
    pub data: BTreeMap<String, String>,
}

impl RawAction {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            data: BTreeMap::new(),
        }
    }

    /// Attach a data attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Failure to tokenize an action line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,
    #[error("expected key=value, got {0:?}")]
    MissingValue(String),
    #[error("unterminated quote in {0:?}")]
    UnterminatedQuote(String),
}

impl FromStr for RawAction {
    type Err = ActionParseError;

    /// Parse `tag key=value key="quoted value"`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = tokenize(line)?.into_iter();
        let tag = tokens.next().ok_or(ActionParseError::Empty)?;

        let mut action = RawAction::new(tag);
        for token in tokens {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| ActionParseError::MissingValue(token.clone()))?;
            action.data.insert(key.to_string(), value.to_string());
        }
        Ok(action)
    }
}

impl fmt::Display for RawAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        for (key, value) in &self.data {
            if value.is_empty() || value.contains(char::is_whitespace) {
                write!(f, " {}=\"{}\"", key, value)?;
            } else {
                write!(f, " {}={}", key, value)?;
            }
        }
        Ok(())
    }
}

/// Split on whitespace, keeping double-quoted runs together and dropping the quotes.
fn tokenize(line: &str) -> Result<Vec<String>, ActionParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;

    for c in line.trim().chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }

    if in_quotes {
        return Err(ActionParseError::UnterminatedQuote(line.to_string()));
    }
    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

/// A classified, well-formed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ViewDetail(ProductId),
    AddToCart(ProductId),
    IncreaseQty(usize),
    DecreaseQty(usize),
    RemoveEntry(usize),
    /// Absent fields keep their current value.
    FilterChanged {
        category: Option<String>,
        sort: Option<String>,
        search: Option<String>,
    },
    Checkout,
    OpenCart,
    CloseDetail,
    OpenCallPicker,
    CloseCallPicker,
    CallPhone,
    CallWhatsApp,
    SubmitContact(ContactForm),
    SubscribeNewsletter,
}

impl Action {
    /// Classify a raw event. Unknown tags and missing or non-numeric
    /// identifiers yield `None`.
    pub fn classify(raw: &RawAction) -> Option<Action> {
        let action = match raw.tag.as_str() {
            "view-detail" | "view" => Action::ViewDetail(product_id(raw)?),
            "add-to-cart" | "add" => Action::AddToCart(product_id(raw)?),
            "increase-qty" | "increase" => Action::IncreaseQty(index(raw)?),
            "decrease-qty" | "decrease" => Action::DecreaseQty(index(raw)?),
            "remove-entry" | "remove" => Action::RemoveEntry(index(raw)?),
            "filter-changed" | "filter" => Action::FilterChanged {
                category: raw.get("category").map(str::to_string),
                sort: raw.get("sort").map(str::to_string),
                search: raw.get("search").map(str::to_string),
            },
            "checkout" => Action::Checkout,
            "open-cart" | "cart" => Action::OpenCart,
            "close-detail" => Action::CloseDetail,
            "open-call-picker" | "call" => Action::OpenCallPicker,
            "close-call-picker" => Action::CloseCallPicker,
            "call-phone" => Action::CallPhone,
            "call-whatsapp" | "whatsapp" => Action::CallWhatsApp,
            "submit-contact" | "contact" => Action::SubmitContact(ContactForm::from_fields(&raw.data)),
            "subscribe-newsletter" | "newsletter" => Action::SubscribeNewsletter,
            _ => return None,
        };
        Some(action)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::ViewDetail(_) => "view-detail",
            Action::AddToCart(_) => "add-to-cart",
            Action::IncreaseQty(_) => "increase-qty",
            Action::DecreaseQty(_) => "decrease-qty",
            Action::RemoveEntry(_) => "remove-entry",
            Action::FilterChanged { .. } => "filter-changed",
            Action::Checkout => "checkout",
            Action::OpenCart => "open-cart",
            Action::CloseDetail => "close-detail",
            Action::OpenCallPicker => "open-call-picker",
            Action::CloseCallPicker => "close-call-picker",
            Action::CallPhone => "call-phone",
            Action::CallWhatsApp => "call-whatsapp",
            Action::SubmitContact(_) => "submit-contact",
            Action::SubscribeNewsletter => "subscribe-newsletter",
        }
    }
}

fn product_id(raw: &RawAction) -> Option<ProductId> {
    raw.get("id")?.parse().ok()
}

fn index(raw: &RawAction) -> Option<usize> {
    raw.get("idx")?.trim().parse().ok()
}
